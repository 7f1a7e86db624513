//! Darwin client error types.

/// Errors from the Darwin HTTP client.
#[derive(Debug, thiserror::Error)]
pub enum DarwinError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Response body could not be decoded as a departure board
    #[error("JSON parse error: {message}{}", body_suffix(.body))]
    Json {
        message: String,
        body: Option<String>,
    },

    /// API returned an error status code
    #[error("API error {status}: {message}")]
    ApiError { status: u16, message: String },

    /// Rate limited by the API
    #[error("rate limited by Darwin API")]
    RateLimited,

    /// Invalid API key or unauthorized
    #[error("unauthorized (invalid API key)")]
    Unauthorized,

    /// Client configuration rejected before any request was made
    #[error("invalid client configuration: {0}")]
    InvalidConfig(String),
}

/// Broad failure category, used to pick what the sensor displays.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The request never produced a usable response.
    Transport,
    /// A response arrived but could not be interpreted.
    DataShape,
}

impl DarwinError {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            DarwinError::Json { .. } => ErrorKind::DataShape,
            DarwinError::Http(e) if e.is_decode() => ErrorKind::DataShape,
            DarwinError::Http(_)
            | DarwinError::ApiError { .. }
            | DarwinError::RateLimited
            | DarwinError::Unauthorized
            | DarwinError::InvalidConfig(_) => ErrorKind::Transport,
        }
    }

    /// Build a JSON error, keeping the start of the offending body for logs.
    pub(crate) fn json(err: &serde_json::Error, body: &str) -> Self {
        DarwinError::Json {
            message: err.to_string(),
            body: Some(body.chars().take(500).collect()),
        }
    }
}

fn body_suffix(body: &Option<String>) -> String {
    body.as_ref()
        .map(|b| format!(" (body: {b})"))
        .unwrap_or_default()
}
