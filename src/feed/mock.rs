//! Mock snapshot source for unit testing.
//!
//! Replays a scripted sequence of fetch outcomes without touching the
//! network.

use std::collections::VecDeque;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use super::client::SnapshotSource;
use crate::error::FeedError;
use crate::orderbook::types::{Book, PriceLevel, Snapshot};

/// One scripted fetch result.
#[derive(Debug, Clone)]
pub enum MockOutcome {
    /// Return these books as a live snapshot.
    Books(Vec<Book>),
    /// Fail with a non-success status.
    Fail(u16),
}

/// Mock snapshot source for testing.
///
/// Outcomes are consumed in order; once the script is exhausted the last
/// outcome repeats.
#[derive(Debug, Clone, Default)]
pub struct MockSnapshotSource {
    /// Remaining scripted outcomes.
    script: Arc<Mutex<VecDeque<MockOutcome>>>,
    /// Outcome replayed after the script runs out.
    last: Arc<Mutex<Option<MockOutcome>>>,
    /// Number of fetches served.
    calls: Arc<AtomicU64>,
    /// Simulated latency per fetch.
    latency: Duration,
}

impl MockSnapshotSource {
    /// Create a mock that replays `outcomes`.
    pub fn new(outcomes: impl IntoIterator<Item = MockOutcome>) -> Self {
        Self {
            script: Arc::new(Mutex::new(outcomes.into_iter().collect())),
            ..Self::default()
        }
    }

    /// Add simulated latency to every fetch.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Append an outcome to the script.
    pub fn push(&self, outcome: MockOutcome) {
        self.script.lock().unwrap().push_back(outcome);
    }

    /// Number of fetches served so far.
    pub fn calls(&self) -> u64 {
        self.calls.load(Ordering::SeqCst)
    }

    fn next_outcome(&self) -> Option<MockOutcome> {
        let mut script = self.script.lock().unwrap();
        let mut last = self.last.lock().unwrap();
        if let Some(outcome) = script.pop_front() {
            *last = Some(outcome.clone());
            return Some(outcome);
        }
        last.clone()
    }
}

impl SnapshotSource for MockSnapshotSource {
    fn fetch(&self) -> impl Future<Output = Result<Snapshot, FeedError>> + Send {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let outcome = self.next_outcome();
        let latency = self.latency;

        async move {
            if !latency.is_zero() {
                tokio::time::sleep(latency).await;
            }

            match outcome {
                Some(MockOutcome::Books(books)) => Ok(Snapshot::live(books)),
                Some(MockOutcome::Fail(status)) => Err(FeedError::Status {
                    url: "mock://book".to_string(),
                    status,
                }),
                None => Err(FeedError::Parse("mock script is empty".to_string())),
            }
        }
    }
}

/// Builder for creating mock books with common patterns.
pub struct MockBookBuilder {
    symbol: String,
    bids: Vec<PriceLevel>,
    asks: Vec<PriceLevel>,
}

impl MockBookBuilder {
    /// Create a new builder for the given symbol.
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            bids: Vec::new(),
            asks: Vec::new(),
        }
    }

    /// Append a bid level.
    pub fn bid(mut self, price: f64, quantity: f64) -> Self {
        self.bids.push(PriceLevel::new(price, quantity));
        self
    }

    /// Append an ask level.
    pub fn ask(mut self, price: f64, quantity: f64) -> Self {
        self.asks.push(PriceLevel::new(price, quantity));
        self
    }

    /// One bid and one ask around `mid`, `half_spread` away on each side.
    pub fn with_tight_spread(self, mid: f64, half_spread: f64, quantity: f64) -> Self {
        self.bid(mid - half_spread, quantity)
            .ask(mid + half_spread, quantity)
    }

    /// Build the book.
    pub fn build(self) -> Book {
        Book::new(self.symbol, self.bids, self.asks)
    }
}
