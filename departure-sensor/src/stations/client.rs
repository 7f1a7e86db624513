//! Client for the National Rail knowledgebase station feed.
//!
//! The feed lists every station with a CRS code. Only the code and name
//! matter to the sensors, so the client hands back validated
//! `(Crs, name)` pairs and nothing else.

use reqwest::StatusCode;
use reqwest::header::{HeaderMap, HeaderValue};
use serde::Deserialize;
use tracing::debug;

use crate::domain::Crs;

use super::error::StationError;

const DEFAULT_BASE_URL: &str = "https://api1.raildata.org.uk/1010-nationalrail-knowledgebase-stations-feed-_json_---production5_0";

const TIMEOUT_SECS: u64 = 30;

/// Wire shape of the feed; everything but the code and name is ignored.
#[derive(Deserialize)]
struct Feed {
    stations: Vec<FeedStation>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct FeedStation {
    crs_code: String,
    name: String,
}

#[derive(Debug, Clone)]
pub struct StationClient {
    http: reqwest::Client,
    base_url: String,
}

impl StationClient {
    /// Client for the production feed, authenticated with `api_key`.
    pub fn new(api_key: &str) -> Result<Self, StationError> {
        let key = HeaderValue::from_str(api_key).map_err(|_| StationError::InvalidApiKey)?;
        let mut headers = HeaderMap::new();
        headers.insert("x-apikey", key);

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(std::time::Duration::from_secs(TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            http,
            base_url: DEFAULT_BASE_URL.to_string(),
        })
    }

    /// Point the client somewhere other than the production feed.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Every station in the feed with a usable CRS code.
    ///
    /// Codes are trimmed and upper-cased. Entries whose code is still not a
    /// CRS code are dropped, and a feed with none left is `Empty`.
    pub async fn fetch_stations(&self) -> Result<Vec<(Crs, String)>, StationError> {
        let url = format!("{}/stations", self.base_url);
        let response = self.http.get(&url).send().await?;
        let status = response.status();

        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                Err(StationError::Rejected(status.as_u16()))
            }
            _ if !status.is_success() => Err(StationError::Status(status.as_u16())),
            _ => decode_stations(&response.text().await?),
        }
    }
}

fn decode_stations(body: &str) -> Result<Vec<(Crs, String)>, StationError> {
    let feed: Feed = serde_json::from_str(body).map_err(StationError::Decode)?;
    let listed = feed.stations.len();

    let stations: Vec<(Crs, String)> = feed
        .stations
        .into_iter()
        .filter_map(|s| Crs::normalize(&s.crs_code).ok().map(|crs| (crs, s.name)))
        .collect();

    if stations.is_empty() {
        return Err(StationError::Empty);
    }
    if stations.len() < listed {
        debug!(
            skipped = listed - stations.len(),
            "dropped feed entries without a CRS code"
        );
    }
    Ok(stations)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn crs(s: &str) -> Crs {
        Crs::parse(s).unwrap()
    }

    #[test]
    fn codes_are_normalized_and_unusable_ones_dropped() {
        let stations = decode_stations(
            r#"{"stations": [
                {"crsCode": "kgx", "name": "London Kings Cross", "postcode": "N1 9AP"},
                {"crsCode": " PAD ", "name": "London Paddington"},
                {"crsCode": "", "name": "Private siding"},
                {"crsCode": "YORK", "name": "Not a code"}
            ]}"#,
        )
        .unwrap();

        assert_eq!(
            stations,
            vec![
                (crs("KGX"), "London Kings Cross".to_string()),
                (crs("PAD"), "London Paddington".to_string()),
            ]
        );
    }

    #[test]
    fn feed_without_usable_codes_is_empty() {
        assert!(matches!(
            decode_stations(r#"{"stations": [{"crsCode": "??", "name": "Nowhere"}]}"#),
            Err(StationError::Empty)
        ));
        assert!(matches!(
            decode_stations(r#"{"stations": []}"#),
            Err(StationError::Empty)
        ));
    }

    #[test]
    fn garbage_body_is_decode_error() {
        assert!(matches!(
            decode_stations("<html>"),
            Err(StationError::Decode(_))
        ));
    }

    #[test]
    fn unprintable_key_is_rejected_up_front() {
        assert!(matches!(
            StationClient::new("bad\nkey"),
            Err(StationError::InvalidApiKey)
        ));
    }

    #[tokio::test]
    async fn unreachable_feed_is_request_error() {
        let client = StationClient::new("key")
            .unwrap()
            .with_base_url("http://127.0.0.1:9");
        assert!(matches!(
            client.fetch_stations().await,
            Err(StationError::Request(_))
        ));
    }
}
