//! Disk cache for the knowledgebase station list.
//!
//! The feed changes rarely and is large, so a copy is kept on disk and
//! reused until it is older than the TTL.

use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use serde::{Deserialize, Serialize};

use crate::domain::Crs;

use super::error::StationError;

/// Default cache TTL: 24 hours.
const DEFAULT_TTL: Duration = Duration::from_secs(24 * 60 * 60);

#[derive(Debug, Serialize, Deserialize)]
struct CacheFile {
    /// Unix timestamp when the cache was written.
    written_at_secs: u64,
    stations: Vec<(Crs, String)>,
}

/// Disk cache for station data.
#[derive(Debug, Clone)]
pub struct StationCache {
    path: PathBuf,
    ttl: Duration,
}

impl StationCache {
    /// Cache at `path` with the default TTL (24 hours).
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            ttl: DEFAULT_TTL,
        }
    }

    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Stations from the cache, or `None` if it is missing, unreadable or stale.
    pub fn load(&self) -> Option<Vec<(Crs, String)>> {
        self.load_at(SystemTime::now())
    }

    fn load_at(&self, now: SystemTime) -> Option<Vec<(Crs, String)>> {
        let contents = std::fs::read_to_string(&self.path).ok()?;
        let cached: CacheFile = serde_json::from_str(&contents).ok()?;

        let age = unix_secs(now)?.saturating_sub(cached.written_at_secs);
        (age < self.ttl.as_secs()).then_some(cached.stations)
    }

    /// Write stations to the cache, creating parent directories as needed.
    pub fn store(&self, stations: &[(Crs, String)]) -> Result<(), StationError> {
        let file = CacheFile {
            // A clock before the epoch writes a cache that is already stale.
            written_at_secs: unix_secs(SystemTime::now()).unwrap_or(0),
            stations: stations.to_vec(),
        };
        let json = serde_json::to_string(&file).map_err(StationError::CacheEncode)?;

        let write_error = |source| StationError::CacheWrite {
            path: self.path.clone(),
            source,
        };
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(write_error)?;
        }
        std::fs::write(&self.path, json).map_err(write_error)
    }
}

fn unix_secs(time: SystemTime) -> Option<u64> {
    time.duration_since(SystemTime::UNIX_EPOCH)
        .ok()
        .map(|d| d.as_secs())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn kgx() -> (Crs, String) {
        (Crs::parse("KGX").unwrap(), "London Kings Cross".to_string())
    }

    #[test]
    fn store_then_load() {
        let dir = tempdir().unwrap();
        let cache = StationCache::new(dir.path().join("stations.json"));

        cache.store(&[kgx()]).unwrap();

        assert_eq!(cache.load().unwrap(), vec![kgx()]);
    }

    #[test]
    fn stale_cache_is_ignored() {
        let dir = tempdir().unwrap();
        let cache = StationCache::new(dir.path().join("stations.json"))
            .with_ttl(Duration::from_secs(60));

        cache.store(&[kgx()]).unwrap();

        let later = SystemTime::now() + Duration::from_secs(61);
        assert!(cache.load_at(later).is_none());
        assert!(cache.load_at(SystemTime::now()).is_some());
    }

    #[test]
    fn missing_or_corrupt_cache_is_ignored() {
        let dir = tempdir().unwrap();
        let cache = StationCache::new(dir.path().join("stations.json"));
        assert!(cache.load().is_none());

        std::fs::write(cache.path(), "not json").unwrap();
        assert!(cache.load().is_none());
    }

    #[test]
    fn creates_parent_directories() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("stations.json");
        let cache = StationCache::new(&path);

        cache.store(&[kgx()]).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn cache_with_invalid_code_is_ignored() {
        let dir = tempdir().unwrap();
        let cache = StationCache::new(dir.path().join("stations.json"));
        let written_at = unix_secs(SystemTime::now()).unwrap();
        std::fs::write(
            cache.path(),
            format!(r#"{{"written_at_secs": {written_at}, "stations": [["kgx", "London Kings Cross"]]}}"#),
        )
        .unwrap();

        assert!(cache.load().is_none());
    }

    #[test]
    fn unwritable_path_names_the_file() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("blocker"), "").unwrap();
        let cache = StationCache::new(dir.path().join("blocker").join("stations.json"));

        let err = cache.store(&[kgx()]).unwrap_err();
        assert!(matches!(err, StationError::CacheWrite { .. }));
        assert!(err.to_string().contains("stations.json"));
    }
}
