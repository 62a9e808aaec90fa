// HTTP access to the flight search and booking services

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

use crate::supplier::{BookingRequest, BookingResponse, SearchQuery, SearchResponse};

pub const DEFAULT_SEARCH_HOST: &str = "https://api.skypicker.com";
pub const DEFAULT_BOOKING_HOST: &str = "http://37.139.6.125:8080";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("API error: {status_code} - {message}")]
    Status { status_code: u16, message: String },

    #[error("Invalid response body: {0}")]
    Decode(String),

    #[error("Client error: {0}")]
    Client(String),
}

// Service endpoints; swap the hosts to target another environment
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub search_host: String,
    pub booking_host: String,
    pub timeout: Option<Duration>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            search_host: DEFAULT_SEARCH_HOST.to_string(),
            booking_host: DEFAULT_BOOKING_HOST.to_string(),
            timeout: None,
        }
    }
}

impl ClientConfig {
    pub fn search_url(&self) -> String {
        format!("{}/flights", self.search_host.trim_end_matches('/'))
    }

    pub fn booking_url(&self) -> String {
        format!("{}/booking", self.booking_host.trim_end_matches('/'))
    }
}

#[async_trait]
pub trait FlightApi: Send + Sync {
    async fn search(&self, query: &SearchQuery) -> Result<SearchResponse, ApiError>;

    async fn book(&self, request: &BookingRequest) -> Result<BookingResponse, ApiError>;
}

pub struct HttpFlightApi {
    config: ClientConfig,
    client: reqwest::Client,
}

impl HttpFlightApi {
    pub fn new(config: ClientConfig) -> Result<Self, ApiError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        let client = builder
            .build()
            .map_err(|e| ApiError::Client(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn search_request(&self, query: &SearchQuery) -> Result<reqwest::Request, ApiError> {
        self.client
            .get(self.config.search_url())
            .query(query)
            .build()
            .map_err(|e| ApiError::Client(e.to_string()))
    }

    pub fn booking_request(&self, request: &BookingRequest) -> Result<reqwest::Request, ApiError> {
        self.client
            .post(self.config.booking_url())
            .json(request)
            .build()
            .map_err(|e| ApiError::Client(e.to_string()))
    }

    // Non-success statuses are rejected before the body is decoded
    async fn execute<T: DeserializeOwned>(&self, request: reqwest::Request) -> Result<T, ApiError> {
        debug!(method = %request.method(), url = %request.url(), "sending request");

        let response = self
            .client
            .execute(request)
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ApiError::Status {
                status_code: status.as_u16(),
                message,
            });
        }

        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }
}

#[async_trait]
impl FlightApi for HttpFlightApi {
    async fn search(&self, query: &SearchQuery) -> Result<SearchResponse, ApiError> {
        let request = self.search_request(query)?;
        self.execute(request).await
    }

    async fn book(&self, request: &BookingRequest) -> Result<BookingResponse, ApiError> {
        let request = self.booking_request(request)?;
        self.execute(request).await
    }
}

// In-memory stand-in for both services
#[cfg(test)]
pub mod mock_server {
    use super::*;
    use crate::supplier::FlightOffer;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::sync::Mutex;

    pub struct MockServer {
        search_calls: AtomicUsize,
        booking_calls: AtomicUsize,
        search_response: Mutex<Result<SearchResponse, ApiError>>,
        booking_response: Mutex<Result<BookingResponse, ApiError>>,
        search_queries: Mutex<Vec<SearchQuery>>,
        booking_requests: Mutex<Vec<BookingRequest>>,
    }

    impl MockServer {
        // Defaults: no flights found, every booking confirmed
        pub fn new() -> Self {
            Self {
                search_calls: AtomicUsize::new(0),
                booking_calls: AtomicUsize::new(0),
                search_response: Mutex::new(Ok(SearchResponse::default())),
                booking_response: Mutex::new(Ok(BookingResponse {
                    status: "confirmed".to_string(),
                    pnr: Some("MOCKPNR".to_string()),
                })),
                search_queries: Mutex::new(Vec::new()),
                booking_requests: Mutex::new(Vec::new()),
            }
        }

        pub async fn set_search_response(&self, response: Result<SearchResponse, ApiError>) {
            *self.search_response.lock().await = response;
        }

        pub async fn set_booking_response(&self, response: Result<BookingResponse, ApiError>) {
            *self.booking_response.lock().await = response;
        }

        pub async fn offer_tokens(&self, tokens: &[&str]) {
            let data: Vec<FlightOffer> = tokens
                .iter()
                .map(|token| FlightOffer {
                    booking_token: Some(token.to_string()),
                })
                .collect();

            self.set_search_response(Ok(SearchResponse {
                results: data.len() as u64,
                data,
            }))
            .await;
        }

        pub fn search_calls(&self) -> usize {
            self.search_calls.load(Ordering::SeqCst)
        }

        pub fn booking_calls(&self) -> usize {
            self.booking_calls.load(Ordering::SeqCst)
        }

        pub async fn search_queries(&self) -> Vec<SearchQuery> {
            self.search_queries.lock().await.clone()
        }

        pub async fn booking_requests(&self) -> Vec<BookingRequest> {
            self.booking_requests.lock().await.clone()
        }
    }

    #[async_trait]
    impl FlightApi for MockServer {
        async fn search(&self, query: &SearchQuery) -> Result<SearchResponse, ApiError> {
            self.search_calls.fetch_add(1, Ordering::SeqCst);
            self.search_queries.lock().await.push(query.clone());
            self.search_response.lock().await.clone()
        }

        async fn book(&self, request: &BookingRequest) -> Result<BookingResponse, ApiError> {
            self.booking_calls.fetch_add(1, Ordering::SeqCst);
            self.booking_requests.lock().await.push(request.clone());
            self.booking_response.lock().await.clone()
        }
    }
}
