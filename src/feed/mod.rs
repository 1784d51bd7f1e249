//! Snapshot feed module.
//!
//! This module handles:
//! - The backend's JSON wire format
//! - HTTP fetching behind the `SnapshotSource` trait
//! - Serialized periodic polling
//! - The built-in fallback snapshot
//! - A scripted mock source for tests

pub mod client;
pub mod fallback;
pub mod mock;
pub mod poller;
pub mod wire;

pub use client::{HttpBookFeed, SnapshotSource};
pub use fallback::fallback_snapshot;
pub use mock::{MockBookBuilder, MockOutcome, MockSnapshotSource};
pub use poller::{PollOutcome, Poller, PollerHandle};
pub use wire::{parse_snapshot, BooksResponse};
