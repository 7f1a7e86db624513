//! Mock Darwin client for running without API access.
//!
//! Loads sample departure boards from JSON files and serves them
//! as if they were live API responses.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use crate::domain::Crs;

use super::error::DarwinError;
use super::feed::{FetchOutcome, RailDataClient};
use super::types::DepartureBoard;

/// Mock Darwin client that serves boards loaded from JSON files.
#[derive(Debug, Clone)]
pub struct MockDarwinClient {
    /// Pre-loaded station boards, keyed by CRS.
    boards: Arc<HashMap<Crs, DepartureBoard>>,
}

impl MockDarwinClient {
    /// Create a new mock client by loading JSON files from a directory.
    ///
    /// Expects files named `{CRS}.json` (e.g., `PAD.json`, `KGX.json`).
    /// Files whose stem is not a CRS code are skipped.
    pub fn new(data_dir: impl AsRef<Path>) -> Result<Self, DarwinError> {
        let data_dir = data_dir.as_ref();
        let mut boards = HashMap::new();

        let entries = std::fs::read_dir(data_dir).map_err(|e| {
            DarwinError::InvalidConfig(format!(
                "failed to read mock data directory {}: {e}",
                data_dir.display()
            ))
        })?;

        for entry in entries {
            let path = entry
                .map_err(|e| DarwinError::InvalidConfig(format!("failed to read entry: {e}")))?
                .path();
            if !path.is_file() || path.extension().and_then(|s| s.to_str()) != Some("json") {
                continue;
            }

            let Some(crs) = path
                .file_stem()
                .and_then(|s| s.to_str())
                .and_then(|s| Crs::parse(s).ok())
            else {
                continue;
            };

            let json = std::fs::read_to_string(&path).map_err(|e| {
                DarwinError::InvalidConfig(format!("failed to read {}: {e}", path.display()))
            })?;
            let board: DepartureBoard =
                serde_json::from_str(&json).map_err(|e| DarwinError::json(&e, &json))?;

            boards.insert(crs, board);
        }

        if boards.is_empty() {
            return Err(DarwinError::InvalidConfig(format!(
                "no mock board files found in {}",
                data_dir.display()
            )));
        }

        Ok(Self {
            boards: Arc::new(boards),
        })
    }

    /// Get the board for a station, if one was loaded.
    ///
    /// Services are narrowed to those calling at `destination`, mirroring
    /// Darwin's `filterCrs`. Time parameters are ignored; mock data is static.
    pub fn get_departures_to(&self, station: &Crs, destination: &Crs) -> Option<DepartureBoard> {
        let mut board = self.boards.get(station)?.clone();

        if let Some(services) = board.train_services.as_mut() {
            services.retain(|service| {
                service
                    .subsequent_calling_points
                    .iter()
                    .flatten()
                    .flat_map(|group| &group.calling_point)
                    .any(|cp| cp.crs.as_deref() == Some(destination.as_str()))
            });
        }
        board.filter_crs = Some(destination.to_string());
        if board.filter_location_name.is_none() {
            board.filter_location_name = Some(destination_name(&board, destination));
        }

        Some(board)
    }

    /// List available stations in the mock data.
    pub fn available_stations(&self) -> Vec<Crs> {
        let mut stations: Vec<Crs> = self.boards.keys().copied().collect();
        stations.sort();
        stations
    }

    /// Bind this client to a station/destination pair.
    pub fn feed(&self, station: Crs, destination: Crs) -> MockFeed {
        MockFeed {
            client: self.clone(),
            station,
            destination,
        }
    }
}

/// Name of `destination` as it appears among the board's calling points.
fn destination_name(board: &DepartureBoard, destination: &Crs) -> String {
    board
        .services()
        .iter()
        .filter_map(|s| s.subsequent_calling_points.as_ref())
        .flatten()
        .flat_map(|group| &group.calling_point)
        .find(|cp| cp.crs.as_deref() == Some(destination.as_str()))
        .map(|cp| cp.location_name.clone())
        .unwrap_or_else(|| destination.to_string())
}

/// A [`MockDarwinClient`] bound to one station/destination pair.
#[derive(Debug, Clone)]
pub struct MockFeed {
    client: MockDarwinClient,
    station: Crs,
    destination: Crs,
}

impl RailDataClient for MockFeed {
    async fn fetch(&self) -> FetchOutcome {
        match self.client.get_departures_to(&self.station, &self.destination) {
            Some(board) => FetchOutcome::Success(Box::new(board)),
            None => FetchOutcome::NoData,
        }
    }
}
