//! Error types for the event search proxy.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while serving a search.
#[derive(Error, Debug)]
pub enum Error {
    /// Missing or empty query, or a malformed request body
    #[error("Validation error: {0}")]
    Validation(String),

    /// Configuration error (missing API key, malformed setting)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Non-success response from the completion API
    #[error("Upstream error ({status}): {body}")]
    Upstream { status: u16, body: String },

    /// Malformed JSON between the located brackets
    #[error("Failed to parse events: {0}")]
    Parse(#[source] serde_json::Error),

    /// Connection-level failure talking to the completion API
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// AWS SDK error
    #[error("AWS error: {0}")]
    Aws(String),
}

impl Error {
    /// Get HTTP status code for this error.
    ///
    /// Upstream failures keep the upstream status; one that is not a valid
    /// HTTP status code maps to 502.
    pub fn status_code(&self) -> u16 {
        match self {
            Error::Validation(_) => 400,
            Error::Upstream { status, .. } if (100..=999).contains(status) => *status,
            Error::Upstream { .. } => 502,
            _ => 500,
        }
    }

    /// Text placed in the `error` field of the response body.
    pub fn client_message(&self) -> String {
        match self {
            Error::Validation(msg) | Error::Config(msg) => msg.clone(),
            Error::Upstream { body, .. } => body.clone(),
            other => other.to_string(),
        }
    }
}
