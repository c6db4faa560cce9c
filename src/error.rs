//! Error types for feedrank
//!
//! This module provides error handling for the library, including:
//! - Batch-level outcomes (no content, partial content)
//! - Per-item fetch failures (network, HTTP status, decode)
//! - Errors from the leaf utilities (translation, chat completion, rendering)

use thiserror::Error;

/// Result type alias for feedrank operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for feedrank
///
/// This is the primary error type used throughout the library. Per-item task
/// failures and batch-level conditions share this type so that callers can
/// classify outcomes without re-scanning the original inputs.
#[derive(Debug, Error)]
pub enum Error {
    /// The batch as a whole produced no usable results
    #[error("no content")]
    NoContent,

    /// Some items in the batch failed but usable results remain
    #[error("partial content: {failed} items failed")]
    PartialContent {
        /// Number of items that failed in the batch
        failed: usize,
    },

    /// Remote endpoint answered with a non-success status code
    #[error("unexpected status code {status} from {url}")]
    Http {
        /// The HTTP status code returned
        status: u16,
        /// The URL that was requested
        url: String,
    },

    /// Network error (connection, timeout, TLS, body transfer)
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Payload could not be decoded into the expected shape
    #[error("decode error: {0}")]
    Decode(#[from] serde_json::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Translation request failed or was rejected by the service
    #[error("translation error: {0}")]
    Translation(String),

    /// Chat-completion request failed or returned no choices
    #[error("chat completion error: {0}")]
    ChatCompletion(String),

    /// Dynamic key did not match any key in the accepted time window
    #[error("dynamic key verification failed")]
    InvalidKey,

    /// External page renderer failed to produce HTML
    #[error("render error: {0}")]
    Render(String),

    /// Configuration error with context about which setting is invalid
    #[error("configuration error: {message}")]
    Config {
        /// Human-readable error message describing the configuration issue
        message: String,
        /// The configuration key that caused the error (e.g., "video_ranking.api_url")
        key: Option<String>,
    },

    /// Other error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// True if this error represents the total-failure batch condition
    #[must_use]
    pub fn is_no_content(&self) -> bool {
        matches!(self, Error::NoContent)
    }

    /// True if this error represents the degraded-but-usable batch condition
    #[must_use]
    pub fn is_partial_content(&self) -> bool {
        matches!(self, Error::PartialContent { .. })
    }
}
