// Trip parameters: validated travel date, airports and search preferences

use chrono::NaiveDate;
use serde::Serialize;
use thiserror::Error;

// Date format accepted on the command line
pub const INPUT_DATE_FORMAT: &str = "%Y-%m-%d";
// Date format expected by the search endpoint
pub const API_DATE_FORMAT: &str = "%d/%m/%Y";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TripError {
    #[error("Invalid date `{0}`: expected a calendar date in YYYY-MM-DD format")]
    InvalidDate(String),

    #[error("Invalid IATA code `{0}`: expected exactly 3 letters")]
    InvalidIata(String),

    #[error("Invalid number of days `{0}`: expected a positive integer")]
    InvalidReturnDays(String),
}

// Sort order requested from the search endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortPreference {
    #[default]
    Price,
    Duration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TripType {
    #[serde(rename = "oneway")]
    OneWay,
    #[serde(rename = "return")]
    Return,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TripRequest {
    pub date: NaiveDate,
    pub origin: String,
    pub destination: String,
    pub return_days: Option<u32>,
    pub sort: SortPreference,
}

impl TripRequest {
    pub fn new(
        date: NaiveDate,
        origin: &str,
        destination: &str,
        return_days: Option<u32>,
        sort: SortPreference,
    ) -> Result<Self, TripError> {
        if return_days == Some(0) {
            return Err(TripError::InvalidReturnDays("0".to_string()));
        }

        Ok(Self {
            date,
            origin: parse_iata(origin)?,
            destination: parse_iata(destination)?,
            return_days,
            sort,
        })
    }

    pub fn trip_type(&self) -> TripType {
        match self.return_days {
            Some(_) => TripType::Return,
            None => TripType::OneWay,
        }
    }

    pub fn api_date(&self) -> String {
        format_api_date(self.date)
    }
}

// Strict YYYY-MM-DD: chrono alone would also accept unpadded fields like 2024-6-1
pub fn parse_date(input: &str) -> Result<NaiveDate, TripError> {
    let bytes = input.as_bytes();
    let well_shaped = bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        });

    if !well_shaped {
        return Err(TripError::InvalidDate(input.to_string()));
    }

    NaiveDate::parse_from_str(input, INPUT_DATE_FORMAT)
        .map_err(|_| TripError::InvalidDate(input.to_string()))
}

pub fn format_api_date(date: NaiveDate) -> String {
    date.format(API_DATE_FORMAT).to_string()
}

// Shape check only; identical origin and destination are not rejected here
pub fn parse_iata(input: &str) -> Result<String, TripError> {
    if input.len() == 3 && input.chars().all(|c| c.is_ascii_alphabetic()) {
        Ok(input.to_string())
    } else {
        Err(TripError::InvalidIata(input.to_string()))
    }
}

// Digits only: no surrounding whitespace or sign
pub fn parse_return_days(input: &str) -> Result<u32, TripError> {
    if input.is_empty() || !input.bytes().all(|b| b.is_ascii_digit()) {
        return Err(TripError::InvalidReturnDays(input.to_string()));
    }

    match input.parse::<u32>() {
        Ok(days) if days > 0 => Ok(days),
        _ => Err(TripError::InvalidReturnDays(input.to_string())),
    }
}
