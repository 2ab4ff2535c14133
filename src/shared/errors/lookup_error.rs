use serde::Serialize;
use std::time::Duration;
use thiserror::Error;

/// Failure taxonomy for a single outbound call and for a query's terminal result.
///
/// The transport produces the first four variants; `NotFound` and
/// `PartialData` only ever appear on a `MatchResult`.
#[derive(Error, Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum LookupError {
    /// Timeout, refused connection, reset socket.
    #[error("Network error: {0}")]
    Network(String),

    #[error("Rate limit exceeded{}", retry_after_suffix(.retry_after))]
    RateLimit {
        #[serde(skip)]
        retry_after: Option<Duration>,
    },

    /// Invalid or revoked credential. Never retried.
    #[error("API authentication failed: {0}")]
    Authentication(String),

    /// Any other HTTP failure or a response body that does not match the
    /// expected shape (`status` is `None` for the latter).
    #[error("API error{}: {message}", status_suffix(.status))]
    Api {
        status: Option<u16>,
        message: String,
    },

    #[error("No match found for '{query}'")]
    NotFound { query: String },

    /// The candidate was chosen but its details could not be fetched.
    #[error("Could not retrieve details for {place_id}: {reason}")]
    PartialData { place_id: String, reason: String },
}

impl LookupError {
    pub fn invalid_response(message: impl Into<String>) -> Self {
        LookupError::Api {
            status: None,
            message: message.into(),
        }
    }

    pub fn http(status: u16, message: impl Into<String>) -> Self {
        LookupError::Api {
            status: Some(status),
            message: message.into(),
        }
    }

    pub fn is_authentication(&self) -> bool {
        matches!(self, LookupError::Authentication(_))
    }

    /// Short machine-friendly name used in reports.
    pub fn kind(&self) -> &'static str {
        match self {
            LookupError::Network(_) => "network",
            LookupError::RateLimit { .. } => "rate_limit",
            LookupError::Authentication(_) => "authentication",
            LookupError::Api { .. } => "api",
            LookupError::NotFound { .. } => "not_found",
            LookupError::PartialData { .. } => "partial_data",
        }
    }
}

impl From<reqwest::Error> for LookupError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            LookupError::Network(format!("Request timeout: {}", err))
        } else if err.is_connect() || err.is_request() {
            LookupError::Network(format!("Failed to reach Places API: {}", err))
        } else if err.is_decode() {
            LookupError::invalid_response(format!("Malformed response body: {}", err))
        } else if let Some(status) = err.status() {
            LookupError::http(status.as_u16(), err.to_string())
        } else {
            LookupError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for LookupError {
    fn from(err: serde_json::Error) -> Self {
        LookupError::invalid_response(format!("Failed to parse Places response: {}", err))
    }
}

fn retry_after_suffix(retry_after: &Option<Duration>) -> String {
    retry_after
        .map(|d| format!(", retry after {} seconds", d.as_secs()))
        .unwrap_or_default()
}

fn status_suffix(status: &Option<u16>) -> String {
    status.map(|s| format!(" (HTTP {})", s)).unwrap_or_default()
}
