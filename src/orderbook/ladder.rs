//! Per-row depth metrics and side rendering.

use serde::Serialize;

use super::types::PriceLevel;

/// Derived values for one price level.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RowMetrics {
    /// Quantity relative to the largest quantity on the side, in percent.
    pub depth_fraction: f64,
    /// `price * quantity`, rounded to cents.
    pub notional_total: f64,
}

/// One ladder row ready for display.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RenderedRow {
    /// Level price.
    pub price: f64,
    /// Level quantity.
    pub quantity: f64,
    /// Depth bar width in percent of the side maximum (0-100).
    pub depth_fraction: f64,
    /// Notional value of the level.
    pub notional_total: f64,
}

/// Compute depth fraction and notional total for a level.
///
/// Returns a NaN `depth_fraction` when `max_quantity_on_side` is zero;
/// [`render_side`] never calls this for an empty side.
pub fn compute_row_metrics(level: &PriceLevel, max_quantity_on_side: f64) -> RowMetrics {
    RowMetrics {
        depth_fraction: level.quantity / max_quantity_on_side * 100.0,
        notional_total: round_cents(level.price * level.quantity),
    }
}

/// Render one side of the book, preserving level order.
pub fn render_side(levels: &[PriceLevel]) -> Vec<RenderedRow> {
    let Some(max_quantity) = max_quantity(levels) else {
        return Vec::new();
    };

    levels
        .iter()
        .map(|level| {
            let metrics = compute_row_metrics(level, max_quantity);
            RenderedRow {
                price: level.price,
                quantity: level.quantity,
                depth_fraction: metrics.depth_fraction,
                notional_total: metrics.notional_total,
            }
        })
        .collect()
}

/// Largest quantity on a side, `None` when the side is empty.
pub fn max_quantity(levels: &[PriceLevel]) -> Option<f64> {
    if levels.is_empty() {
        return None;
    }
    Some(
        levels
            .iter()
            .map(|l| l.quantity)
            .fold(f64::NEG_INFINITY, f64::max),
    )
}

fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
