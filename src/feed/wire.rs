//! JSON payload served by the snapshot endpoint.
//!
//! ```text
//! { "books": [ { "symbol": "ETH/USD",
//!                "bid":  [ { "price_": 3639.09, "qty_": 6.865 }, ... ],
//!                "asks": [ { "price_": 3639.10, "qty_": 7.373 }, ... ] } ] }
//! ```
//!
//! The trailing underscores and the singular `bid` are part of the backend's
//! format and must not be renamed.

use serde::Deserialize;

use crate::error::FeedError;
use crate::orderbook::types::{Book, PriceLevel, Snapshot};

/// Top-level snapshot response.
#[derive(Debug, Clone, Deserialize)]
pub struct BooksResponse {
    /// One entry per symbol.
    pub books: Vec<BookPayload>,
}

/// One symbol's book as sent by the backend.
#[derive(Debug, Clone, Deserialize)]
pub struct BookPayload {
    /// Trading symbol.
    pub symbol: String,
    /// Bid side (singular name on the wire).
    #[serde(rename = "bid", default)]
    pub bids: Vec<LevelPayload>,
    /// Ask side.
    #[serde(default)]
    pub asks: Vec<LevelPayload>,
}

/// Single price level on the wire.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct LevelPayload {
    /// Level price.
    #[serde(rename = "price_")]
    pub price: f64,
    /// Level quantity.
    #[serde(rename = "qty_")]
    pub qty: f64,
}

impl From<LevelPayload> for PriceLevel {
    fn from(level: LevelPayload) -> Self {
        PriceLevel::new(level.price, level.qty)
    }
}

impl From<BookPayload> for Book {
    fn from(payload: BookPayload) -> Self {
        Book {
            symbol: payload.symbol,
            bids: payload.bids.into_iter().map(PriceLevel::from).collect(),
            asks: payload.asks.into_iter().map(PriceLevel::from).collect(),
        }
    }
}

impl BooksResponse {
    /// Convert into a live snapshot, keeping book and level order.
    pub fn into_snapshot(self) -> Snapshot {
        Snapshot::live(self.books.into_iter().map(Book::from).collect())
    }
}

/// Parse a response body into a snapshot.
pub fn parse_snapshot(body: &[u8]) -> Result<Snapshot, FeedError> {
    let response: BooksResponse = serde_json::from_slice(body)?;
    Ok(response.into_snapshot())
}
