//! Error types shared across the Railway MCP crates.

/// Result type for core operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while talking to the Railway API.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Required configuration is missing or malformed.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The GraphQL response carried one or more application-level errors.
    /// The payload is the `"; "`-join of every error message, in order.
    #[error("Railway API error: {0}")]
    Api(String),

    /// HTTP request failed (network error, malformed response body).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Check if this error is a per-call configuration failure.
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }
}
