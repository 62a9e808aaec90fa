use chrono::NaiveDate;
use clap::Parser;

use crate::trip::{SortPreference, TripError, TripRequest};

/// Search for a flight and book it for a test passenger.
#[derive(Parser, Debug)]
#[clap(name = "book_flight", version)]
pub struct Cli {
    /// Format: YYYY-MM-DD
    #[clap(long, value_name = "DATE", value_parser = parser::parse_date)]
    pub date: NaiveDate,

    /// IATA code.
    #[clap(long, value_name = "IATA", value_parser = parser::parse_iata)]
    pub from: String,

    /// IATA code.
    #[clap(long, value_name = "IATA", value_parser = parser::parse_iata)]
    pub to: String,

    /// One way flight [default].
    #[clap(long, action, conflicts_with = "return-days")]
    pub one_way: bool,

    /// Book 2 flights there and back again with a gap of DAYS nights.
    #[clap(long = "return", value_name = "DAYS", value_parser = parser::parse_return_days)]
    pub return_days: Option<u32>,

    /// Book cheapest flight [default].
    #[clap(long, action, conflicts_with = "shortest")]
    pub cheapest: bool,

    /// Book shortest flight.
    #[clap(long, action)]
    pub shortest: bool,
}

impl Cli {
    pub fn sort_preference(&self) -> SortPreference {
        if self.shortest {
            SortPreference::Duration
        } else {
            SortPreference::Price
        }
    }
}

impl TryFrom<Cli> for TripRequest {
    type Error = TripError;

    fn try_from(cli: Cli) -> Result<Self, Self::Error> {
        let sort = cli.sort_preference();
        TripRequest::new(cli.date, &cli.from, &cli.to, cli.return_days, sort)
    }
}

pub mod parser {
    use chrono::NaiveDate;

    use crate::trip::{self, TripError};

    pub fn parse_date(input: &str) -> Result<NaiveDate, TripError> {
        trip::parse_date(input)
    }

    pub fn parse_iata(input: &str) -> Result<String, TripError> {
        trip::parse_iata(input)
    }

    pub fn parse_return_days(input: &str) -> Result<u32, TripError> {
        trip::parse_return_days(input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::ErrorKind;
    use test_case::test_case;

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("book_flight").chain(args.iter().copied()))
    }

    #[test]
    fn test_defaults_are_one_way_and_cheapest() {
        let cli = parse(&["--date", "2024-06-01", "--from", "LHR", "--to", "JFK"]).unwrap();
        let trip = TripRequest::try_from(cli).unwrap();

        assert_eq!(trip.return_days, None);
        assert_eq!(trip.sort, SortPreference::Price);
        assert_eq!(trip.api_date(), "01/06/2024");
    }

    #[test]
    fn test_return_and_shortest() {
        let cli = parse(&[
            "--date", "2024-06-01", "--from", "LHR", "--to", "JFK", "--return", "5", "--shortest",
        ])
        .unwrap();
        let trip = TripRequest::try_from(cli).unwrap();

        assert_eq!(trip.return_days, Some(5));
        assert_eq!(trip.sort, SortPreference::Duration);
    }

    #[test]
    fn test_explicit_defaults_are_accepted() {
        let cli = parse(&[
            "--date", "2024-06-01", "--from", "lhr", "--to", "jfk", "--one-way", "--cheapest",
        ])
        .unwrap();

        assert!(cli.one_way);
        assert_eq!(cli.sort_preference(), SortPreference::Price);
        assert_eq!(cli.from, "lhr");
    }

    #[test_case(&["--date", "2024-06-01", "--from", "LHR", "--to", "JFK", "--one-way", "--return", "5"]; "#1 One way with return")]
    #[test_case(&["--date", "2024-06-01", "--from", "LHR", "--to", "JFK", "--cheapest", "--shortest"]; "#2 Cheapest with shortest")]
    fn test_mutually_exclusive_flags(args: &[&str]) {
        let error = parse(args).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::ArgumentConflict);
    }

    #[test_case(&["--date", "2024-06-31", "--from", "LHR", "--to", "JFK"]; "#1 Invalid date")]
    #[test_case(&["--date", "2024-06-01", "--from", "LH1", "--to", "JFK"]; "#2 Digit in origin")]
    #[test_case(&["--date", "2024-06-01", "--from", "LHR", "--to", "JFKX"]; "#3 Long destination")]
    #[test_case(&["--date", "2024-06-01", "--from", "LHR", "--to", "JFK", "--return", "0"]; "#4 Zero days")]
    #[test_case(&["--date", "2024-06-01", "--from", "LHR", "--to", "JFK", "--return", "x"]; "#5 Non numeric days")]
    fn test_invalid_values(args: &[&str]) {
        let error = parse(args).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::ValueValidation);
    }

    #[test]
    fn test_missing_required_argument() {
        let error = parse(&["--date", "2024-06-01", "--from", "LHR"]).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn test_error_message_mentions_help() {
        let error = parse(&["--date", "2024-06-01", "--from", "LH", "--to", "JFK"]).unwrap_err();
        let rendered = error.to_string();

        assert!(rendered.contains("Invalid IATA code `LH`"));
        assert!(rendered.contains("--help"));
    }

    #[test]
    fn test_help_and_version() {
        assert_eq!(parse(&["--help"]).unwrap_err().kind(), ErrorKind::DisplayHelp);
        assert_eq!(parse(&["-h"]).unwrap_err().kind(), ErrorKind::DisplayHelp);
        assert_eq!(
            parse(&["--version"]).unwrap_err().kind(),
            ErrorKind::DisplayVersion
        );
    }
}
