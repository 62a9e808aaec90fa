// Search-then-book orchestration

use clap::Parser;
use std::ffi::OsString;
use std::fmt;
use thiserror::Error;
use tracing::{debug, info, instrument, warn};

use crate::api::{ApiError, FlightApi};
use crate::args::Cli;
use crate::supplier::{BookingRequest, FlightOffer, Passenger, SearchQuery};
use crate::trip::{TripError, TripRequest};

pub const DEFAULT_AFFILIATE_ID: &str = "picky";
pub const DEFAULT_CURRENCY: &str = "EUR";

#[derive(Error, Debug)]
pub enum BookingError {
    #[error(transparent)]
    Cli(#[from] clap::Error),

    #[error("{0}\n\nRun with -h or --help for the help message")]
    InvalidTrip(#[from] TripError),

    #[error("Flight search failed: {0}")]
    SearchFailed(ApiError),

    #[error("Flights not found")]
    FlightsNotFound,

    #[error("Search result carries no booking token")]
    MissingToken,

    #[error("Booking failed: {0}")]
    BookingFailed(ApiError),

    #[error("Status: not confirmed ({status})")]
    NotConfirmed { status: String },

    #[error("Booking confirmed without a PNR")]
    MissingPnr,
}

impl BookingError {
    pub fn is_usage(&self) -> bool {
        matches!(self, BookingError::Cli(_) | BookingError::InvalidTrip(_))
    }

    pub fn exit_code(&self) -> i32 {
        match self {
            // help and version requests are rendered by clap and exit cleanly
            BookingError::Cli(e) if !e.use_stderr() => 0,
            BookingError::Cli(_) | BookingError::InvalidTrip(_) => 2,
            _ => 1,
        }
    }
}

#[derive(Debug, Clone)]
pub struct BookerConfig {
    pub affiliate_id: String,
    pub currency: String,
    pub passenger: Passenger,
}

impl Default for BookerConfig {
    fn default() -> Self {
        Self {
            affiliate_id: DEFAULT_AFFILIATE_ID.to_string(),
            currency: DEFAULT_CURRENCY.to_string(),
            passenger: Passenger::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    pub booking_token: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingConfirmation {
    pub pnr: String,
}

impl fmt::Display for BookingConfirmation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Your PNR number is: {}", self.pnr)
    }
}

pub struct FlightBooker<A: FlightApi> {
    api: A,
    config: BookerConfig,
}

impl<A: FlightApi> FlightBooker<A> {
    pub fn new(api: A, config: BookerConfig) -> Self {
        Self { api, config }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn config(&self) -> &BookerConfig {
        &self.config
    }

    /// Returns the token of the first offer. The search endpoint already
    /// orders results by the requested sort key.
    #[instrument(skip(self, trip), fields(from = %trip.origin, to = %trip.destination))]
    pub async fn find_flight(&self, trip: &TripRequest) -> Result<SearchResult, BookingError> {
        let query = SearchQuery::new(trip, &self.config.affiliate_id);
        debug!(?query, "searching flights");

        let response = self
            .api
            .search(&query)
            .await
            .map_err(BookingError::SearchFailed)?;

        info!(results = response.results, "search finished");

        if response.results == 0 {
            return Err(BookingError::FlightsNotFound);
        }

        match response.data.into_iter().next() {
            Some(FlightOffer {
                booking_token: Some(booking_token),
            }) => Ok(SearchResult { booking_token }),
            Some(_) => Err(BookingError::MissingToken),
            None => {
                warn!(
                    results = response.results,
                    "search reported results but returned none"
                );
                Err(BookingError::FlightsNotFound)
            }
        }
    }

    #[instrument(skip_all)]
    pub async fn book_flight(&self, booking_token: &str) -> Result<BookingConfirmation, BookingError> {
        let request = BookingRequest {
            passengers: vec![self.config.passenger.clone()],
            currency: self.config.currency.clone(),
            booking_token: booking_token.to_string(),
        };

        let response = self
            .api
            .book(&request)
            .await
            .map_err(BookingError::BookingFailed)?;

        info!(status = %response.status, "booking answered");

        if !response.is_confirmed() {
            return Err(BookingError::NotConfirmed {
                status: response.status,
            });
        }

        response
            .pnr
            .map(|pnr| BookingConfirmation { pnr })
            .ok_or(BookingError::MissingPnr)
    }

    pub async fn run(&self, trip: &TripRequest) -> Result<BookingConfirmation, BookingError> {
        let flight = self.find_flight(trip).await?;
        self.book_flight(&flight.booking_token).await
    }
}

// Needs no client, so help and usage errors never depend on HTTP setup
pub fn parse_trip<I, T>(args: I) -> Result<TripRequest, BookingError>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let cli = Cli::try_parse_from(args)?;
    Ok(TripRequest::try_from(cli)?)
}

// Parses the command line and runs the whole flow; nothing is sent on usage errors
pub async fn run_cli<A, I, T>(
    booker: &FlightBooker<A>,
    args: I,
) -> Result<BookingConfirmation, BookingError>
where
    A: FlightApi,
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let trip = parse_trip(args)?;
    booker.run(&trip).await
}
