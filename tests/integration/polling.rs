//! Poller and controller together, driven by the scripted mock source.

use std::time::{Duration, Instant};

use pretty_assertions::assert_eq;

use l2book_viewer::feed::{MockBookBuilder, MockOutcome, MockSnapshotSource, Poller};
use l2book_viewer::orderbook::types::SnapshotOrigin;
use l2book_viewer::session::{ApplyResult, BookController, NoticeLevel, Pane};

fn eth_book() -> l2book_viewer::orderbook::types::Book {
    MockBookBuilder::new("ETH/USD")
        .with_tight_spread(100.0, 0.5, 1.0)
        .build()
}

#[tokio::test]
async fn fallback_then_live_replaces_it() {
    let source = MockSnapshotSource::new([
        MockOutcome::Fail(503),
        MockOutcome::Fail(503),
        MockOutcome::Books(vec![eth_book()]),
    ]);
    let mut handle = Poller::new(source.clone(), Duration::from_millis(5)).spawn();
    let mut controller = BookController::new("XRP/USD", Duration::from_secs(3));

    // First failure: built-in demo data so the display is never stuck.
    let first = controller.apply_outcome(handle.recv().await.unwrap());
    assert!(matches!(first, ApplyResult::FallbackAdopted { .. }));
    assert_eq!(
        controller.snapshot().map(|s| s.origin),
        Some(SnapshotOrigin::Fallback)
    );
    assert_eq!(
        controller.available_symbols(),
        ["XRP/USD", "ETH/USD", "BTC/USD"]
    );
    assert!(matches!(controller.pane(), Pane::Book(ref v) if v.symbol == "XRP/USD"));
    assert_eq!(
        controller.active_notice(Instant::now()).map(|n| n.level),
        Some(NoticeLevel::Error)
    );

    // Second failure keeps what is shown.
    let second = controller.apply_outcome(handle.recv().await.unwrap());
    assert_eq!(second, ApplyResult::Retained);
    assert_eq!(
        controller.snapshot().map(|s| s.origin),
        Some(SnapshotOrigin::Fallback)
    );

    // Live data replaces the fallback books entirely.
    let third = controller.apply_outcome(handle.recv().await.unwrap());
    assert!(matches!(third, ApplyResult::Adopted { .. }));
    assert_eq!(controller.available_symbols(), ["ETH/USD"]);
    assert_eq!(controller.pane(), Pane::Empty);

    controller.select("ETH/USD");
    let Pane::Book(view) = controller.pane() else {
        panic!("expected a book pane");
    };
    assert_eq!(view.spread, 1.0);

    assert!(source.calls() >= 3);
}

#[tokio::test]
async fn dropping_the_handle_stops_polling() {
    let source = MockSnapshotSource::new([MockOutcome::Books(vec![eth_book()])]);
    let mut handle = Poller::new(source.clone(), Duration::from_millis(5)).spawn();

    handle.recv().await.unwrap();
    drop(handle);

    tokio::time::sleep(Duration::from_millis(30)).await;
    let calls = source.calls();
    tokio::time::sleep(Duration::from_millis(50)).await;

    assert_eq!(source.calls(), calls);
}
