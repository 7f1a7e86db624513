//! Errors from loading the knowledgebase station table.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum StationError {
    #[error("station feed request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("STATIONS_API_KEY is not a valid header value")]
    InvalidApiKey,

    /// 401 or 403.
    #[error("station feed rejected STATIONS_API_KEY (HTTP {0})")]
    Rejected(u16),

    #[error("station feed answered HTTP {0}")]
    Status(u16),

    #[error("station feed body is not a station list: {0}")]
    Decode(#[source] serde_json::Error),

    /// Every entry in the feed had an unusable CRS code.
    #[error("station feed listed no valid CRS codes")]
    Empty,

    #[error("could not write station cache {}: {source}", .path.display())]
    CacheWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not encode station cache: {0}")]
    CacheEncode(#[source] serde_json::Error),
}
