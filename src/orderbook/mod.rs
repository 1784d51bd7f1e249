//! Order book module: domain types and the display derivation pipeline.
//!
//! This module handles:
//! - Book and snapshot data structures
//! - Per-row depth metrics and side rendering
//! - Spread statistics and the combined book view
//! - Fixed-precision display formatting

pub mod format;
pub mod ladder;
pub mod types;
pub mod view;

pub use ladder::{compute_row_metrics, render_side, RenderedRow, RowMetrics};
pub use types::{Book, PriceLevel, Snapshot, SnapshotOrigin};
pub use view::{derive_book_view, BookView, SpreadStatus};
