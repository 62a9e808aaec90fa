use anyhow::{Context, Result};
use flight_booker::{
    parse_trip, BookerConfig, BookingError, ClientConfig, FlightBooker, HttpFlightApi,
};
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

// Logs go to stderr; stdout only carries the PNR line
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}

fn build_booker() -> Result<FlightBooker<HttpFlightApi>> {
    let api = HttpFlightApi::new(ClientConfig::default())
        .context("failed to initialise the flight API client")?;

    Ok(FlightBooker::new(api, BookerConfig::default()))
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    init_logging();

    let trip = match parse_trip(std::env::args_os()) {
        Ok(trip) => trip,
        Err(e) => return report(e),
    };

    let booker = match build_booker() {
        Ok(booker) => booker,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            return ExitCode::FAILURE;
        }
    };

    match booker.run(&trip).await {
        Ok(confirmation) => {
            println!("{}", confirmation);
            ExitCode::SUCCESS
        }
        Err(e) => report(e),
    }
}

fn report(error: BookingError) -> ExitCode {
    match error {
        BookingError::Cli(e) => e.exit(),
        e => {
            debug!(usage = e.is_usage(), "run aborted");
            eprintln!("{}", e);
            ExitCode::from(e.exit_code() as u8)
        }
    }
}
