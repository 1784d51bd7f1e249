//! Order book types and data structures.

use serde::{Deserialize, Serialize};
use strum::Display;
use time::OffsetDateTime;

/// Single price level in an order book.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct PriceLevel {
    /// Price at this level.
    pub price: f64,
    /// Total quantity resting at this price.
    pub quantity: f64,
}

impl PriceLevel {
    /// Create a new price level.
    pub fn new(price: f64, quantity: f64) -> Self {
        Self { price, quantity }
    }
}

/// L2 book for one symbol.
///
/// Levels keep the order they arrived in. Bids are expected highest price
/// first and asks lowest price first; the feed is trusted on this.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Book {
    /// Trading symbol, e.g. `ETH/USD`.
    pub symbol: String,
    /// Bid levels, best first.
    pub bids: Vec<PriceLevel>,
    /// Ask levels, best first.
    pub asks: Vec<PriceLevel>,
}

impl Book {
    /// Create a book from its two sides.
    pub fn new(symbol: impl Into<String>, bids: Vec<PriceLevel>, asks: Vec<PriceLevel>) -> Self {
        Self {
            symbol: symbol.into(),
            bids,
            asks,
        }
    }

    /// Best bid level (first bid).
    pub fn best_bid(&self) -> Option<&PriceLevel> {
        self.bids.first()
    }

    /// Best ask level (first ask).
    pub fn best_ask(&self) -> Option<&PriceLevel> {
        self.asks.first()
    }
}

/// Where a snapshot came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum SnapshotOrigin {
    /// Fetched from the snapshot endpoint.
    Live,
    /// Built-in data substituted after a failed first poll.
    Fallback,
}

/// Full view of every symbol's book at one point in time.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    /// Books in the order the feed listed them.
    pub books: Vec<Book>,
    /// When this snapshot was received or built.
    pub received_at: OffsetDateTime,
    /// Source of the data.
    pub origin: SnapshotOrigin,
}

impl Snapshot {
    /// Wrap books fetched from the endpoint.
    pub fn live(books: Vec<Book>) -> Self {
        Self {
            books,
            received_at: OffsetDateTime::now_utc(),
            origin: SnapshotOrigin::Live,
        }
    }

    /// Wrap built-in fallback books.
    pub fn fallback(books: Vec<Book>) -> Self {
        Self {
            books,
            received_at: OffsetDateTime::now_utc(),
            origin: SnapshotOrigin::Fallback,
        }
    }

    /// First book whose symbol matches.
    pub fn book(&self, symbol: &str) -> Option<&Book> {
        self.books.iter().find(|b| b.symbol == symbol)
    }

    /// Symbols in book order, duplicates collapsed to their first occurrence.
    pub fn symbols(&self) -> Vec<String> {
        let mut symbols: Vec<String> = Vec::with_capacity(self.books.len());
        for book in &self.books {
            if !symbols.iter().any(|s| *s == book.symbol) {
                symbols.push(book.symbol.clone());
            }
        }
        symbols
    }

    /// Whether this snapshot is the built-in fallback.
    pub fn is_fallback(&self) -> bool {
        self.origin == SnapshotOrigin::Fallback
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn book(symbol: &str, bid: f64, ask: f64) -> Book {
        Book::new(
            symbol,
            vec![PriceLevel::new(bid, 1.0)],
            vec![PriceLevel::new(ask, 1.0)],
        )
    }

    #[test]
    fn best_levels_are_first_entries() {
        let book = Book::new(
            "ETH/USD",
            vec![PriceLevel::new(100.0, 2.0), PriceLevel::new(99.0, 5.0)],
            vec![PriceLevel::new(101.0, 1.0), PriceLevel::new(102.0, 3.0)],
        );

        assert_eq!(book.best_bid(), Some(&PriceLevel::new(100.0, 2.0)));
        assert_eq!(book.best_ask(), Some(&PriceLevel::new(101.0, 1.0)));
    }

    #[test]
    fn empty_sides_have_no_best_level() {
        let book = Book::new("BTC/USD", Vec::new(), Vec::new());
        assert!(book.best_bid().is_none());
        assert!(book.best_ask().is_none());
    }

    #[test]
    fn lookup_returns_first_match() {
        let snapshot = Snapshot::live(vec![
            book("XRP/USD", 2.0, 2.1),
            book("ETH/USD", 100.0, 101.0),
            book("XRP/USD", 9.0, 9.1),
        ]);

        assert_eq!(snapshot.book("XRP/USD").map(|b| b.bids[0].price), Some(2.0));
        assert!(snapshot.book("SOL/USD").is_none());
    }

    #[test]
    fn symbols_keep_feed_order_without_duplicates() {
        let snapshot = Snapshot::live(vec![
            book("XRP/USD", 2.0, 2.1),
            book("ETH/USD", 100.0, 101.0),
            book("XRP/USD", 9.0, 9.1),
            book("BTC/USD", 50.0, 51.0),
        ]);

        assert_eq!(snapshot.symbols(), vec!["XRP/USD", "ETH/USD", "BTC/USD"]);
    }

    #[test]
    fn origin_displays_lowercase() {
        assert_eq!(SnapshotOrigin::Live.to_string(), "live");
        assert_eq!(SnapshotOrigin::Fallback.to_string(), "fallback");
        assert!(Snapshot::fallback(Vec::new()).is_fallback());
    }
}
