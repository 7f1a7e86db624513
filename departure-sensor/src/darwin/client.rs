//! Darwin LDB HTTP client.
//!
//! Queries the Live Departure Boards API for departures from one station
//! that call at a given destination.

use reqwest::StatusCode;
use reqwest::header::{HeaderMap, HeaderValue};
use tracing::debug;

use crate::domain::Crs;

use super::error::DarwinError;
use super::types::DepartureBoard;

/// Default base URL for Darwin LDB API.
const DEFAULT_BASE_URL: &str =
    "https://api1.raildata.org.uk/1010-live-departure-board-dep-with-details/LDBWS";

/// Default number of services requested per board.
const DEFAULT_NUM_ROWS: u8 = 10;

/// Configuration for the Darwin client.
#[derive(Debug, Clone)]
pub struct DarwinConfig {
    /// API key for authentication
    pub api_key: String,
    /// Base URL for the API (defaults to production Darwin)
    pub base_url: String,
    /// Number of services to request (max 150)
    pub num_rows: u8,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl DarwinConfig {
    /// Create a new config with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            num_rows: DEFAULT_NUM_ROWS,
            timeout_secs: 30,
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the number of services requested per board.
    pub fn with_num_rows(mut self, n: u8) -> Self {
        self.num_rows = n;
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// One departure board request: services from `station` calling at `destination`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DepartureQuery {
    pub station: Crs,
    pub destination: Crs,
    /// Minutes offset from now (-120 to 120)
    pub time_offset: i16,
    /// Minutes window for results (0 to 120)
    pub time_window: u16,
}

/// Darwin LDB API client.
#[derive(Debug, Clone)]
pub struct DarwinClient {
    http: reqwest::Client,
    base_url: String,
    num_rows: u8,
}

impl DarwinClient {
    /// Create a new Darwin client with the given configuration.
    pub fn new(config: DarwinConfig) -> Result<Self, DarwinError> {
        let mut headers = HeaderMap::new();

        // Darwin uses "x-apikey" for authentication
        let api_key = HeaderValue::from_str(&config.api_key)
            .map_err(|_| DarwinError::InvalidConfig("invalid API key format".to_string()))?;
        headers.insert("x-apikey", api_key);

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url,
            num_rows: config.num_rows,
        })
    }

    /// Get the departure board for `query.station`, filtered to services
    /// calling at `query.destination`.
    ///
    /// Returns `Ok(None)` when Darwin answers with an empty body, which it
    /// does when it has nothing to say about the station.
    pub async fn get_departures_to(
        &self,
        query: &DepartureQuery,
    ) -> Result<Option<DepartureBoard>, DarwinError> {
        let url = format!(
            "{}/api/20220120/GetDepBoardWithDetails/{}",
            self.base_url,
            query.station.as_str()
        );

        debug!(
            station = %query.station,
            destination = %query.destination,
            time_offset = query.time_offset,
            time_window = query.time_window,
            "requesting departure board"
        );

        let response = self
            .http
            .get(&url)
            .query(&[
                ("numRows", self.num_rows.to_string()),
                ("timeOffset", query.time_offset.to_string()),
                ("timeWindow", query.time_window.to_string()),
                ("filterCrs", query.destination.as_str().to_string()),
                ("filterType", "to".to_string()),
            ])
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        classify(status, &body)
    }
}

/// Map an HTTP status and body to a board, no data, or an error.
fn classify(status: StatusCode, body: &str) -> Result<Option<DepartureBoard>, DarwinError> {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(DarwinError::Unauthorized),
        StatusCode::TOO_MANY_REQUESTS => Err(DarwinError::RateLimited),
        StatusCode::NO_CONTENT => Ok(None),
        status if !status.is_success() => Err(DarwinError::ApiError {
            status: status.as_u16(),
            message: body.to_string(),
        }),
        _ => parse_board(body),
    }
}

/// Decode a board response body, treating an empty or `null` body as no data.
fn parse_board(body: &str) -> Result<Option<DepartureBoard>, DarwinError> {
    let trimmed = body.trim();
    if trimmed.is_empty() || trimmed == "null" {
        return Ok(None);
    }

    serde_json::from_str(trimmed)
        .map(Some)
        .map_err(|e| DarwinError::json(&e, body))
}
