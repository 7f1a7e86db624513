//! Station name lookup.

use std::collections::HashMap;

use tracing::{debug, warn};

use crate::domain::Crs;

use super::builtin::BUILTIN_STATIONS;
use super::cache::StationCache;
use super::client::StationClient;
use super::error::StationError;

/// Read-only CRS → station name table.
///
/// Built once and shared by every sensor; sensors never mutate it.
#[derive(Debug, Clone, Default)]
pub struct StationLookup {
    names: HashMap<Crs, String>,
}

impl StationLookup {
    /// An empty lookup.
    pub fn new() -> Self {
        Self::default()
    }

    /// The table compiled into the crate, covering major stations.
    pub fn builtin() -> Self {
        Self::from_entries(
            BUILTIN_STATIONS
                .iter()
                .filter_map(|(code, name)| Crs::parse(code).ok().map(|crs| (crs, *name))),
        )
    }

    pub fn from_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (Crs, S)>,
        S: Into<String>,
    {
        Self {
            names: entries
                .into_iter()
                .map(|(crs, name)| (crs, name.into()))
                .collect(),
        }
    }

    /// Load the full knowledgebase station list.
    ///
    /// A fresh disk cache is used when present. Otherwise the feed is
    /// fetched and written back to the cache; a failed cache write is
    /// logged and does not fail the load.
    pub async fn load(client: &StationClient, cache: &StationCache) -> Result<Self, StationError> {
        if let Some(stations) = cache.load().filter(|stations| !stations.is_empty()) {
            debug!(count = stations.len(), path = %cache.path().display(), "station names loaded from cache");
            return Ok(Self::from_entries(stations));
        }

        let stations = client.fetch_stations().await?;
        if let Err(e) = cache.store(&stations) {
            warn!(error = %e, "failed to cache station names");
        }
        Ok(Self::from_entries(stations))
    }

    /// Look up a station name by CRS code.
    pub fn get(&self, crs: &Crs) -> Option<&str> {
        self.names.get(crs).map(String::as_str)
    }

    pub fn contains(&self, crs: &Crs) -> bool {
        self.names.contains_key(crs)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
