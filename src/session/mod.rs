//! Display session state.
//!
//! This module handles:
//! - The symbol catalog and the user's selection
//! - The latest snapshot and its version
//! - The controller that resolves what the book pane shows

pub mod catalog;
pub mod controller;
pub mod store;

pub use catalog::{SelectionState, SymbolCatalog};
pub use controller::{ApplyResult, BookController, Notice, NoticeLevel, Pane};
pub use store::SnapshotStore;
