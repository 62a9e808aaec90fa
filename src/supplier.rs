use serde::{Deserialize, Serialize};

use crate::trip::{SortPreference, TripRequest, TripType};

// Protocol version marker sent with every search
pub const SEARCH_API_VERSION: u8 = 3;
pub const CONFIRMED_STATUS: &str = "confirmed";

// Query string for the flight search endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchQuery {
    pub v: u8,
    pub date_from: String,
    pub date_to: String,
    pub fly_from: String,
    pub to: String,
    #[serde(rename = "affilid")]
    pub affiliate_id: String,
    pub type_flight: TripType,
    pub sort: SortPreference,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub days_in_destination_from: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub days_in_destination_to: Option<u32>,
}

impl SearchQuery {
    // A single-date search: the travel date bounds both ends of the window
    pub fn new(trip: &TripRequest, affiliate_id: &str) -> Self {
        let date = trip.api_date();

        Self {
            v: SEARCH_API_VERSION,
            date_from: date.clone(),
            date_to: date,
            fly_from: trip.origin.clone(),
            to: trip.destination.clone(),
            affiliate_id: affiliate_id.to_string(),
            type_flight: trip.trip_type(),
            sort: trip.sort,
            days_in_destination_from: trip.return_days,
            days_in_destination_to: trip.return_days,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SearchResponse {
    #[serde(rename = "_results", default)]
    pub results: u64,
    #[serde(default)]
    pub data: Vec<FlightOffer>,
}

// Only the first offer is ever booked, so a token is not required on the others
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct FlightOffer {
    #[serde(default)]
    pub booking_token: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Passenger {
    pub first_name: String,
    pub last_name: String,
    pub title: String,
    pub birthday: String,
    #[serde(rename = "documentID")]
    pub document_id: String,
    pub email: String,
}

// The dummy traveller every booking is made for
impl Default for Passenger {
    fn default() -> Self {
        Self {
            first_name: "Name".to_string(),
            last_name: "Surname".to_string(),
            title: "Mr".to_string(),
            birthday: "1991-01-01".to_string(),
            document_id: "TEST5121905".to_string(),
            email: "test@test.com".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookingRequest {
    pub passengers: Vec<Passenger>,
    pub currency: String,
    pub booking_token: String,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct BookingResponse {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub pnr: Option<String>,
}

impl BookingResponse {
    pub fn is_confirmed(&self) -> bool {
        self.status == CONFIRMED_STATUS
    }
}
