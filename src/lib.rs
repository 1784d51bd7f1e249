//! Terminal L2 orderbook viewer.
//!
//! Polls an HTTP endpoint for multi-symbol order book snapshots and renders
//! the selected symbol as a two-column depth ladder with spread statistics.
//!
//! # Pipeline
//!
//! ```text
//! GET /book ──▶ Poller ──seq──▶ BookController ──▶ BookView ──▶ ladder
//!                 │                  │
//!                 └─ failure ──▶ keep last snapshot (or fallback data)
//! ```
//!
//! # Modules
//!
//! - [`config`]: Configuration loading from environment
//! - [`error`]: Unified error types
//! - [`feed`]: Wire format, HTTP client and poller
//! - [`orderbook`]: Book types, row metrics, spread and formatting
//! - [`session`]: Selection, snapshot store and view resolution
//! - [`tui`]: Terminal display
//! - [`metrics`]: Prometheus counters and latency
//! - [`utils`]: Utility functions

pub mod config;
pub mod error;
pub mod feed;
pub mod metrics;
pub mod orderbook;
pub mod session;
pub mod tui;
pub mod utils;

pub use config::Config;
pub use error::{Result, ViewerError};
