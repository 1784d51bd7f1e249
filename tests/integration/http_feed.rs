//! `HttpBookFeed` against the fixture server.

use std::time::{Duration, Instant};

use pretty_assertions::assert_eq;
use tokio_test::{assert_err, assert_ok};

use l2book_viewer::error::FeedError;
use l2book_viewer::feed::{HttpBookFeed, Poller, SnapshotSource};
use l2book_viewer::orderbook::types::{PriceLevel, SnapshotOrigin};
use l2book_viewer::orderbook::view::SpreadStatus;
use l2book_viewer::session::{ApplyResult, BookController, Pane};

use crate::fixture::{spawn_fixture, SLOW_DELAY};

fn feed(url: String) -> HttpBookFeed {
    HttpBookFeed::with_timeout(url, Duration::from_secs(2)).unwrap()
}

#[tokio::test]
async fn fetches_and_parses_snapshot() {
    let base = spawn_fixture().await;
    let snapshot = assert_ok!(feed(format!("{}/book", base)).get_snapshot().await);

    assert_eq!(snapshot.origin, SnapshotOrigin::Live);
    assert_eq!(snapshot.symbols(), vec!["ETH/USD", "BTC/USD"]);

    let eth = snapshot.book("ETH/USD").unwrap();
    assert_eq!(
        eth.bids,
        vec![PriceLevel::new(100.0, 2.0), PriceLevel::new(99.5, 4.0)]
    );
    assert_eq!(eth.asks, vec![PriceLevel::new(101.0, 1.0)]);

    let btc = snapshot.book("BTC/USD").unwrap();
    assert!(btc.bids.is_empty());
}

#[tokio::test]
async fn non_success_status_is_reported() {
    let base = spawn_fixture().await;
    let err = assert_err!(feed(format!("{}/broken", base)).get_snapshot().await);

    match err {
        FeedError::Status { status, url } => {
            assert_eq!(status, 500);
            assert!(url.ends_with("/broken"));
        }
        other => panic!("expected status error, got {:?}", other),
    }
}

#[tokio::test]
async fn malformed_body_is_a_parse_error() {
    let base = spawn_fixture().await;
    let err = assert_err!(feed(format!("{}/garbage", base)).get_snapshot().await);

    assert!(matches!(err, FeedError::Parse(_)));
}

#[tokio::test]
async fn request_timeout_bounds_each_poll() {
    let base = spawn_fixture().await;
    let feed = HttpBookFeed::with_timeout(format!("{}/slow", base), Duration::from_millis(200)).unwrap();

    let started = Instant::now();
    let err = assert_err!(feed.get_snapshot().await);
    let elapsed = started.elapsed();

    match err {
        FeedError::Http(e) => assert!(e.is_timeout(), "expected timeout, got {}", e),
        other => panic!("expected http timeout, got {:?}", other),
    }
    assert!(elapsed < SLOW_DELAY / 2, "poll took {:?}", elapsed);
}

#[tokio::test]
async fn trait_fetch_matches_inherent_fetch() {
    let base = spawn_fixture().await;
    let feed = feed(format!("{}/book", base));

    let via_trait = feed.fetch().await.unwrap();
    let direct = feed.get_snapshot().await.unwrap();

    assert_eq!(via_trait.books, direct.books);
}

#[tokio::test]
async fn polled_http_snapshot_reaches_the_view() {
    let base = spawn_fixture().await;
    let mut handle = Poller::new(feed(format!("{}/book", base)), Duration::from_millis(20)).spawn();
    let mut controller = BookController::new("ETH/USD", Duration::from_secs(3));

    let outcome = handle.recv().await.unwrap();
    assert_eq!(outcome.seq, 1);
    assert_eq!(
        controller.apply_outcome(outcome),
        ApplyResult::Adopted { version: 1 }
    );

    let Pane::Book(view) = controller.pane() else {
        panic!("expected a book pane");
    };
    assert_eq!(view.spread, 1.0);
    assert_eq!(view.spread_percentage, 1.0);
    assert_eq!(view.rendered_bids[0].notional_total, 200.0);
    assert_eq!(view.rendered_bids[1].depth_fraction, 100.0);

    controller.select("BTC/USD");
    let Pane::Book(view) = controller.pane() else {
        panic!("expected a book pane");
    };
    assert_eq!(view.spread_status, SpreadStatus::OneSided);
    assert_eq!(view.spread, 0.0);
}
