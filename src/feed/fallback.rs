//! Built-in snapshot shown when the very first poll fails.

use once_cell::sync::Lazy;

use crate::orderbook::types::{Book, PriceLevel, Snapshot};

fn levels(raw: &[(f64, f64)]) -> Vec<PriceLevel> {
    raw.iter().map(|&(price, qty)| PriceLevel::new(price, qty)).collect()
}

static FALLBACK_BOOKS: Lazy<Vec<Book>> = Lazy::new(|| {
    vec![
        Book::new(
            "XRP/USD",
            levels(&[
                (2.34309, 4088.0),
                (2.34189, 396.5625),
                (2.34174, 12365.45436627),
                (2.34165, 396.5625),
                (2.34163, 22.03070257),
                (2.34162, 4270.53237653),
                (2.34155, 4270.66601497),
                (2.34149, 53.7),
                (2.34145, 4270.85092144),
                (2.34131, 2767.74764954),
            ]),
            levels(&[
                (2.3431, 23725.750487190002),
                (2.34318, 16110.670930119999),
                (2.34319, 2401.964191),
                (2.34322, 8535.29777466),
                (2.34324, 8535.1905908),
                (2.34334, 396.5625),
                (2.3434, 4605.7985317),
                (2.34343, 1281.53100237),
                (2.34351, 644.7417798600001),
                (2.34352, 8961.5),
            ]),
        ),
        Book::new(
            "ETH/USD",
            levels(&[
                (3639.09, 6.86508396),
                (3639.03, 4.29593636),
                (3638.98, 2.74802105),
                (3638.82, 0.23),
                (3638.81, 2.74814633),
                (3638.79, 2.74816199),
                (3638.7, 5.34399533),
                (3638.59, 2.7483125),
                (3638.5, 0.82432642),
                (3638.43, 0.00725924),
            ]),
            levels(&[
                (3639.1, 7.37354367),
                (3639.11, 0.16),
                (3639.47, 17.3207),
                (3639.63, 9.92478142),
                (3639.79, 0.027),
                (3639.8, 19.223),
                (3639.9, 5.36925698),
                (3639.98, 1.37363734),
                (3640.0, 0.8437),
                (3640.03, 2.7472327),
            ]),
        ),
        Book::new(
            "BTC/USD",
            levels(&[
                (106856.6, 0.03204447),
                (106840.0, 0.00006083),
                (106830.0, 0.00006084),
                (106820.0, 0.00006085),
                (106813.1, 0.00936194),
                (106811.8, 0.01190442),
                (106811.7, 0.09362268),
                (106810.4, 0.04680971),
                (106810.2, 0.09362395),
                (106810.0, 0.00006085),
            ]),
            levels(&[
                (106856.7, 8.733147409999997),
                (106856.9, 0.09731722),
                (106857.6, 1.90036451),
                (106857.7, 0.20117),
                (106857.9, 1.8292989),
                (106858.5, 0.2150002),
                (106859.1, 0.0935812),
                (106860.0, 0.00025),
                (106860.1, 0.00006083),
                (106861.0, 0.09357954),
            ]),
        ),
    ]
});

/// Fresh copy of the built-in snapshot.
pub fn fallback_snapshot() -> Snapshot {
    Snapshot::fallback(FALLBACK_BOOKS.clone())
}
