//! Periodic snapshot polling.
//!
//! Polls run one at a time: the next fetch starts only after the previous
//! one has finished, and late ticks are delayed rather than bursted. Each
//! outcome carries a sequence number so the consumer can reject anything
//! older than what it already applied.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use super::client::SnapshotSource;
use crate::error::FeedError;
use crate::metrics;
use crate::orderbook::types::Snapshot;

/// Channel depth between the poller and its consumer.
const OUTCOME_BUFFER: usize = 16;

/// Result of one poll attempt.
#[derive(Debug)]
pub struct PollOutcome {
    /// Position of this poll in start order, starting at 1.
    pub seq: u64,
    /// Fetched snapshot or the failure.
    pub result: Result<Snapshot, FeedError>,
}

/// Drives a [`SnapshotSource`] on a fixed period.
pub struct Poller<S> {
    source: Arc<S>,
    interval: Duration,
}

impl<S: SnapshotSource> Poller<S> {
    /// Create a poller for `source` firing every `interval`.
    pub fn new(source: S, interval: Duration) -> Self {
        Self {
            source: Arc::new(source),
            interval,
        }
    }

    /// Start polling in a background task.
    ///
    /// The first poll fires immediately.
    pub fn spawn(self) -> PollerHandle {
        let (tx, rx) = mpsc::channel(OUTCOME_BUFFER);
        let source = self.source;
        let interval = self.interval;

        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            let mut seq = 0u64;

            info!(interval_ms = interval.as_millis() as u64, "Snapshot poller started");

            loop {
                ticker.tick().await;
                seq += 1;
                metrics::inc_polls();

                let result = source.fetch().await;
                match &result {
                    Ok(snapshot) => debug!(seq, books = snapshot.books.len(), "Poll succeeded"),
                    Err(e) => {
                        metrics::inc_poll_failures();
                        warn!(seq, error = %e, "Poll failed");
                    }
                }

                if tx.send(PollOutcome { seq, result }).await.is_err() {
                    info!("Outcome receiver dropped, stopping poller");
                    return;
                }
            }
        });

        PollerHandle { rx, task }
    }
}

/// Receiving end of a running poller. Dropping it stops the poller and
/// abandons any poll in flight.
pub struct PollerHandle {
    rx: mpsc::Receiver<PollOutcome>,
    task: JoinHandle<()>,
}

impl PollerHandle {
    /// Wait for the next poll outcome. `None` once the poller has stopped.
    pub async fn recv(&mut self) -> Option<PollOutcome> {
        self.rx.recv().await
    }

    /// Whether the background task has exited.
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

impl Drop for PollerHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::mock::{MockBookBuilder, MockOutcome, MockSnapshotSource};

    #[tokio::test]
    async fn delivers_sequenced_outcomes() {
        let book = MockBookBuilder::new("ETH/USD").bid(100.0, 1.0).ask(101.0, 1.0).build();
        let source = MockSnapshotSource::new([
            MockOutcome::Books(vec![book.clone()]),
            MockOutcome::Fail(502),
            MockOutcome::Books(vec![book]),
        ]);

        let mut handle = Poller::new(source, Duration::from_millis(5)).spawn();

        let first = handle.recv().await.unwrap();
        let second = handle.recv().await.unwrap();
        let third = handle.recv().await.unwrap();

        assert_eq!((first.seq, second.seq, third.seq), (1, 2, 3));
        assert!(first.result.is_ok());
        assert!(matches!(second.result, Err(FeedError::Status { status: 502, .. })));
        assert!(third.result.is_ok());
    }

    #[tokio::test]
    async fn polls_never_overlap() {
        let book = MockBookBuilder::new("ETH/USD").bid(100.0, 1.0).build();
        // Fetch takes longer than the interval.
        let source = MockSnapshotSource::new([MockOutcome::Books(vec![book])])
            .with_latency(Duration::from_millis(30));
        let probe = source.clone();

        let mut handle = Poller::new(source, Duration::from_millis(5)).spawn();
        for expected in 1..=3 {
            let outcome = handle.recv().await.unwrap();
            assert_eq!(outcome.seq, expected);
            // The poll that produced this outcome is done and the next one
            // has at most just started.
            assert!(probe.calls() <= expected + 1);
        }
    }

    #[tokio::test]
    async fn stops_when_handle_dropped() {
        let source = MockSnapshotSource::new([MockOutcome::Fail(500)]);
        let probe = source.clone();

        let mut handle = Poller::new(source, Duration::from_millis(5)).spawn();
        handle.recv().await.unwrap();
        drop(handle);

        tokio::time::sleep(Duration::from_millis(30)).await;
        let calls = probe.calls();
        tokio::time::sleep(Duration::from_millis(30)).await;
        assert_eq!(probe.calls(), calls);
    }
}
