//! Error types for paddock-core

use thiserror::Error;

/// Result type alias using paddock-core's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in paddock-core operations
#[derive(Error, Debug)]
pub enum Error {
    /// The service has no rows for the requested owner (HTTP 404).
    ///
    /// This is the benign "no entries yet" case and must be handled
    /// separately from real failures on the read path.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The service refused a mutation, e.g. on another owner's entry
    #[error("Not allowed: {0}")]
    Forbidden(String),

    /// Connectivity or protocol failure talking to the catalog service
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Non-2xx, non-404 response from the catalog service
    #[error("Server error (HTTP {status}): {message}")]
    Server {
        /// HTTP status code returned by the service
        status: u16,
        /// Truncated response body
        message: String,
    },

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
