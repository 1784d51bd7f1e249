//! Top-of-book spread statistics and the full two-sided book view.

use serde::Serialize;
use strum::{AsRefStr, Display};

use super::ladder::{render_side, RenderedRow};
use super::types::Book;

/// How the spread figures were obtained.
///
/// Degenerate books still report `spread` and `spread_percentage` as 0.0;
/// this tells them apart from a book that is genuinely locked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display, AsRefStr)]
pub enum SpreadStatus {
    /// Both sides present and the best bid is non-zero.
    #[strum(serialize = "quoted")]
    Quoted,
    /// At least one side is empty; spread and percentage are 0.
    #[strum(serialize = "one-sided")]
    OneSided,
    /// Both sides present but the best bid price is 0; percentage is 0.
    #[strum(serialize = "zero bid")]
    ZeroBid,
}

/// Everything needed to draw one symbol's ladder.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BookView {
    /// Symbol of the source book.
    pub symbol: String,
    /// Best ask minus best bid.
    pub spread: f64,
    /// Spread relative to the best bid, in percent.
    pub spread_percentage: f64,
    /// Whether the spread figures are meaningful.
    pub spread_status: SpreadStatus,
    /// Bid rows, best first.
    pub rendered_bids: Vec<RenderedRow>,
    /// Ask rows, best first.
    pub rendered_asks: Vec<RenderedRow>,
}

/// Derive spread statistics and rendered rows for a book.
pub fn derive_book_view(book: &Book) -> BookView {
    let (spread, spread_percentage, spread_status) = spread_stats(book);

    BookView {
        symbol: book.symbol.clone(),
        spread,
        spread_percentage,
        spread_status,
        rendered_bids: render_side(&book.bids),
        rendered_asks: render_side(&book.asks),
    }
}

fn spread_stats(book: &Book) -> (f64, f64, SpreadStatus) {
    let (best_bid, best_ask) = match (book.best_bid(), book.best_ask()) {
        (Some(bid), Some(ask)) => (bid.price, ask.price),
        _ => return (0.0, 0.0, SpreadStatus::OneSided),
    };

    let spread = best_ask - best_bid;
    if best_bid == 0.0 {
        return (spread, 0.0, SpreadStatus::ZeroBid);
    }

    (spread, spread / best_bid * 100.0, SpreadStatus::Quoted)
}
