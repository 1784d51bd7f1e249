//! Latest snapshot plus a version counter for cache keys.

use crate::orderbook::types::{Book, Snapshot};

/// Holds the most recent snapshot.
///
/// `version` increases by one on every replacement, so anything derived
/// from a snapshot can be keyed by it.
#[derive(Debug, Default)]
pub struct SnapshotStore {
    current: Option<Snapshot>,
    version: u64,
    last_seq: u64,
}

impl SnapshotStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the snapshot wholesale and return the new version.
    pub fn replace(&mut self, snapshot: Snapshot) -> u64 {
        self.current = Some(snapshot);
        self.version += 1;
        self.version
    }

    /// Record that poll `seq` is being applied.
    ///
    /// Returns false, and records nothing, when `seq` is not newer than the
    /// last accepted poll.
    pub fn accept_seq(&mut self, seq: u64) -> bool {
        if seq <= self.last_seq {
            return false;
        }
        self.last_seq = seq;
        true
    }

    /// Current snapshot, if any has been adopted.
    pub fn current(&self) -> Option<&Snapshot> {
        self.current.as_ref()
    }

    /// Whether any snapshot (live or fallback) has been adopted.
    pub fn is_loaded(&self) -> bool {
        self.current.is_some()
    }

    /// Version of the current snapshot; 0 before the first one.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Look up a symbol's book in the current snapshot.
    pub fn lookup(&self, symbol: &str) -> Option<&Book> {
        self.current.as_ref().and_then(|s| s.book(symbol))
    }
}
