//! Unified error types for the orderbook viewer.

use thiserror::Error;

/// Unified error type for the orderbook viewer.
#[derive(Error, Debug)]
pub enum ViewerError {
    /// Configuration loading error.
    #[error("configuration error: {0}")]
    Config(#[from] envy::Error),

    /// Configuration loaded but failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Snapshot feed error.
    #[error("feed error: {0}")]
    Feed(#[from] FeedError),

    /// Terminal setup, drawing or teardown failed.
    #[error("terminal error: {0}")]
    Terminal(#[from] std::io::Error),

    /// Metrics exporter could not be installed.
    #[error("metrics error: {0}")]
    Metrics(String),
}

/// Errors raised while fetching a book snapshot.
#[derive(Error, Debug)]
pub enum FeedError {
    /// Transport-level failure (connect, timeout, body read).
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The endpoint answered with a non-success status.
    #[error("snapshot endpoint {url} returned HTTP {status}")]
    Status {
        /// Requested URL.
        url: String,
        /// HTTP status code.
        status: u16,
    },

    /// The body was not a valid snapshot payload.
    #[error("failed to parse snapshot: {0}")]
    Parse(String),
}

impl From<serde_json::Error> for FeedError {
    fn from(err: serde_json::Error) -> Self {
        FeedError::Parse(err.to_string())
    }
}

/// Convenient Result type alias.
pub type Result<T> = std::result::Result<T, ViewerError>;
