//! The fetch interface a departure sensor polls.
//!
//! A feed is bound to one station/destination pair and one time
//! offset/window, so each call to [`RailDataClient::fetch`] returns the
//! current board for exactly what the sensor displays.

use std::future::Future;

use crate::domain::Crs;

use super::client::{DarwinClient, DarwinConfig, DepartureQuery};
use super::error::{DarwinError, ErrorKind};
use super::types::DepartureBoard;

/// Result of one fetch, tagged by what the caller should do with it.
#[derive(Debug)]
pub enum FetchOutcome {
    /// A departure board was received and decoded.
    Success(Box<DepartureBoard>),
    /// The source replied with nothing.
    NoData,
    /// The request failed before a usable response arrived.
    TransportError(DarwinError),
    /// A response arrived but could not be interpreted.
    DataShapeError(DarwinError),
}

impl From<Result<Option<DepartureBoard>, DarwinError>> for FetchOutcome {
    fn from(result: Result<Option<DepartureBoard>, DarwinError>) -> Self {
        match result {
            Ok(Some(board)) => FetchOutcome::Success(Box::new(board)),
            Ok(None) => FetchOutcome::NoData,
            Err(err) => match err.kind() {
                ErrorKind::Transport => FetchOutcome::TransportError(err),
                ErrorKind::DataShape => FetchOutcome::DataShapeError(err),
            },
        }
    }
}

/// Source of departure boards for a single sensor.
///
/// Implementations report every failure through [`FetchOutcome`] rather
/// than panicking; the sensor turns outcomes into display state.
pub trait RailDataClient {
    /// Fetch the current departure board.
    fn fetch(&self) -> impl Future<Output = FetchOutcome> + Send;
}

/// Live Darwin feed for one station/destination pair.
#[derive(Debug, Clone)]
pub struct DarwinFeed {
    client: DarwinClient,
    query: DepartureQuery,
}

impl DarwinFeed {
    /// Create a feed with no time offset and the widest time window.
    pub fn new(
        api_key: impl Into<String>,
        station: Crs,
        destination: Crs,
    ) -> Result<Self, DarwinError> {
        Self::with_config(DarwinConfig::new(api_key), station, destination)
    }

    /// Create a feed using a custom client configuration.
    pub fn with_config(
        config: DarwinConfig,
        station: Crs,
        destination: Crs,
    ) -> Result<Self, DarwinError> {
        Ok(Self {
            client: DarwinClient::new(config)?,
            query: DepartureQuery {
                station,
                destination,
                time_offset: 0,
                time_window: 120,
            },
        })
    }

    /// Only show departures this many minutes from now onwards.
    pub fn with_time_offset(mut self, minutes: i16) -> Self {
        self.query.time_offset = minutes;
        self
    }

    /// Only show departures within this many minutes of the offset.
    pub fn with_time_window(mut self, minutes: u16) -> Self {
        self.query.time_window = minutes;
        self
    }

    /// The request this feed sends on every fetch.
    pub fn query(&self) -> &DepartureQuery {
        &self.query
    }
}

impl RailDataClient for DarwinFeed {
    async fn fetch(&self) -> FetchOutcome {
        self.client.get_departures_to(&self.query).await.into()
    }
}
