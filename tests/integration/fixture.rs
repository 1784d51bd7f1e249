//! In-process snapshot endpoint.

use axum::http::{header, StatusCode};
use axum::routing::get;
use std::time::Duration;

use axum::Router;
use tokio::net::TcpListener;

/// Two books: ETH/USD with both sides, BTC/USD asks only.
pub const BOOK_JSON: &str = r#"{
  "books": [
    {
      "symbol": "ETH/USD",
      "bid": [
        { "price_": 100.0, "qty_": 2.0 },
        { "price_": 99.5, "qty_": 4.0 }
      ],
      "asks": [
        { "price_": 101.0, "qty_": 1.0 }
      ]
    },
    {
      "symbol": "BTC/USD",
      "bid": [],
      "asks": [
        { "price_": 60000.0, "qty_": 0.5 }
      ]
    }
  ]
}"#;

/// How long `/slow` waits before answering.
pub const SLOW_DELAY: Duration = Duration::from_secs(5);

/// Start the fixture server and return its base URL.
///
/// Routes:
/// - `/book`: [`BOOK_JSON`]
/// - `/broken`: HTTP 500
/// - `/garbage`: 200 with a body that is not JSON
/// - `/slow`: [`BOOK_JSON`] after [`SLOW_DELAY`]
pub async fn spawn_fixture() -> String {
    let app = Router::new()
        .route(
            "/book",
            get(|| async { ([(header::CONTENT_TYPE, "application/json")], BOOK_JSON) }),
        )
        .route(
            "/broken",
            get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "upstream unavailable") }),
        )
        .route("/garbage", get(|| async { "<html>not a book</html>" }))
        .route(
            "/slow",
            get(|| async {
                tokio::time::sleep(SLOW_DELAY).await;
                BOOK_JSON
            }),
        );

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{}", addr)
}
