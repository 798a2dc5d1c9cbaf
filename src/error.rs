//! Error types for the tilda client.
//!
//! Failures are split so callers can tell a transport problem (connection
//! refused, non-2xx status) apart from a response that streamed to completion
//! without ever producing a usable analysis payload.

use thiserror::Error;

/// Result type alias used throughout the crate.
pub type Result<T> = std::result::Result<T, TildaError>;

/// Errors produced by the tilda client.
#[derive(Debug, Error)]
pub enum TildaError {
    /// HTTP request failed at the connection level.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Server returned a non-success status before any stream processing.
    #[error("server error ({status}): {message}")]
    Server { status: u16, message: String },

    /// The response stream ended and no candidate record, fallback record,
    /// or whole-body JSON document could be resolved.
    #[error("no usable analysis payload found in the response")]
    NoPayload,

    /// JSON serialization or deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Local file access failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration could not be resolved.
    #[error("configuration error: {0}")]
    Config(String),
}

impl TildaError {
    /// Whether the error happened before any response payload was usable
    /// (connection-level failure or a non-2xx status).
    pub fn is_transport(&self) -> bool {
        matches!(self, TildaError::Http(_) | TildaError::Server { .. })
    }
}
