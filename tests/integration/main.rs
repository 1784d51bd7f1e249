//! Integration tests for the orderbook viewer.
//!
//! The HTTP tests run against an in-process fixture server bound to an
//! ephemeral port, so no external network access is needed.
//! Run with: cargo test --test integration

mod fixture;
mod http_feed;
mod polling;
