// Flight search and booking client

pub mod api;
pub mod args;
pub mod booker;
pub mod supplier;
pub mod trip;

// Re-export key types for convenience
pub use api::{ApiError, ClientConfig, FlightApi, HttpFlightApi};
pub use args::Cli;
pub use booker::{
    parse_trip, run_cli, BookerConfig, BookingConfirmation, BookingError, FlightBooker, SearchResult,
};
pub use supplier::{BookingRequest, BookingResponse, Passenger, SearchQuery, SearchResponse};
pub use trip::{SortPreference, TripError, TripRequest, TripType};
