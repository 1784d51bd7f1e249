//! Fixed-precision formatting and the plain-text ladder.

use std::fmt::Write;

use super::ladder::RenderedRow;
use super::view::BookView;

/// Decimal places shown for prices.
pub const PRICE_DECIMALS: usize = 5;
/// Decimal places shown for quantities.
pub const QUANTITY_DECIMALS: usize = 4;
/// Decimal places shown for notional totals.
pub const TOTAL_DECIMALS: usize = 2;
/// Decimal places shown for the spread.
pub const SPREAD_DECIMALS: usize = 5;
/// Decimal places shown for the spread percentage.
pub const SPREAD_PCT_DECIMALS: usize = 3;

/// Column headers shared by every ladder surface.
pub const COLUMN_HEADERS: [&str; 3] = ["Price (USD)", "Amount", "Total"];

const BAR_WIDTH: usize = 12;
const COLUMN_WIDTH: usize = 14;

/// Price with [`PRICE_DECIMALS`] places.
pub fn format_price(price: f64) -> String {
    format!("{:.*}", PRICE_DECIMALS, price)
}

/// Quantity with [`QUANTITY_DECIMALS`] places.
pub fn format_quantity(quantity: f64) -> String {
    format!("{:.*}", QUANTITY_DECIMALS, quantity)
}

/// Notional total with [`TOTAL_DECIMALS`] places.
pub fn format_total(total: f64) -> String {
    format!("{:.*}", TOTAL_DECIMALS, total)
}

/// `Spread: 0.00001 (0.000%)` style summary.
pub fn format_spread(view: &BookView) -> String {
    format!(
        "{:.*} ({:.*}%)",
        SPREAD_DECIMALS, view.spread, SPREAD_PCT_DECIMALS, view.spread_percentage
    )
}

/// Number of cells a depth bar occupies out of `width`.
///
/// Non-finite fractions (all-zero sides) draw no bar.
pub fn bar_cells(depth_fraction: f64, width: usize) -> usize {
    if !depth_fraction.is_finite() || depth_fraction <= 0.0 {
        return 0;
    }
    let cells = (depth_fraction.min(100.0) / 100.0 * width as f64).round() as usize;
    cells.min(width)
}

/// Depth bar drawn with block characters, padded to `width`.
pub fn depth_bar(depth_fraction: f64, width: usize) -> String {
    let filled = bar_cells(depth_fraction, width);
    let mut bar = "█".repeat(filled);
    bar.push_str(&" ".repeat(width - filled));
    bar
}

fn write_side(out: &mut String, title: &str, rows: &[RenderedRow]) {
    let _ = writeln!(out, "{}", title);
    let _ = writeln!(
        out,
        "{:<bar$} {:>col$} {:>col$} {:>col$}",
        "",
        COLUMN_HEADERS[0],
        COLUMN_HEADERS[1],
        COLUMN_HEADERS[2],
        bar = BAR_WIDTH,
        col = COLUMN_WIDTH
    );
    if rows.is_empty() {
        let _ = writeln!(out, "  (no levels)");
    }
    for row in rows {
        let _ = writeln!(
            out,
            "{} {:>col$} {:>col$} {:>col$}",
            depth_bar(row.depth_fraction, BAR_WIDTH),
            format_price(row.price),
            format_quantity(row.quantity),
            format_total(row.notional_total),
            col = COLUMN_WIDTH
        );
    }
}

/// Render a book view as a printable ladder.
pub fn render_text_ladder(view: &BookView) -> String {
    let rule = "=".repeat(BAR_WIDTH + 3 * (COLUMN_WIDTH + 1));
    let mut out = String::new();

    let _ = writeln!(out, "{}", rule);
    let _ = writeln!(out, "{}  Spread: {}", view.symbol, format_spread(view));
    let _ = writeln!(out, "{}", rule);
    write_side(&mut out, "BIDS", &view.rendered_bids);
    let _ = writeln!(out, "{}", "-".repeat(rule.chars().count()));
    write_side(&mut out, "ASKS", &view.rendered_asks);
    let _ = writeln!(out, "{}", rule);

    out
}
