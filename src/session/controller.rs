//! Page-level state: wires the snapshot store to the symbol catalog and
//! decides what the book pane shows.

use std::sync::Arc;
use std::time::{Duration, Instant};

use strum::Display;
use tracing::{debug, info, warn};

use super::catalog::SymbolCatalog;
use super::store::SnapshotStore;
use crate::config::Config;
use crate::error::FeedError;
use crate::feed::fallback::fallback_snapshot;
use crate::feed::poller::PollOutcome;
use crate::metrics;
use crate::orderbook::types::Snapshot;
use crate::orderbook::view::{derive_book_view, BookView};

/// What the book pane should display.
#[derive(Debug, Clone, PartialEq)]
pub enum Pane {
    /// No snapshot has ever been adopted.
    Loading,
    /// Data is loaded but the selected symbol has no book in it.
    Empty,
    /// Derived view for the selected symbol.
    Book(Arc<BookView>),
}

/// Effect of applying one poll outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyResult {
    /// A fetched snapshot replaced the previous one.
    Adopted { version: u64 },
    /// First-ever poll failed; the built-in snapshot was adopted.
    FallbackAdopted { version: u64 },
    /// Poll failed; the last snapshot stays.
    Retained,
    /// Outcome was older than one already applied and was ignored.
    Stale,
}

/// Severity of a notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum NoticeLevel {
    /// Something went wrong; shown in red.
    Error,
    /// Informational.
    Info,
}

/// Transient message for the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    /// Severity.
    pub level: NoticeLevel,
    /// Short description.
    pub message: String,
    /// When it was raised.
    pub raised_at: Instant,
}

#[derive(Debug)]
struct CachedView {
    version: u64,
    symbol: String,
    view: Arc<BookView>,
}

/// Owns the snapshot, the selection and the derived view.
#[derive(Debug)]
pub struct BookController {
    catalog: SymbolCatalog,
    store: SnapshotStore,
    cache: Option<CachedView>,
    notice: Option<Notice>,
    notice_ttl: Duration,
    last_poll_failed: bool,
}

impl BookController {
    /// Create a controller with `default_symbol` selected.
    pub fn new(default_symbol: impl Into<String>, notice_ttl: Duration) -> Self {
        Self {
            catalog: SymbolCatalog::new(default_symbol),
            store: SnapshotStore::new(),
            cache: None,
            notice: None,
            notice_ttl,
            last_poll_failed: false,
        }
    }

    /// Create a controller from config.
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.default_symbol.clone(), config.notice_ttl())
    }

    /// Apply a poll outcome, honouring sequence order.
    pub fn apply_outcome(&mut self, outcome: PollOutcome) -> ApplyResult {
        if !self.store.accept_seq(outcome.seq) {
            metrics::inc_stale_outcomes();
            debug!(seq = outcome.seq, "Discarding out-of-order poll outcome");
            return ApplyResult::Stale;
        }

        match outcome.result {
            Ok(snapshot) => {
                if self.last_poll_failed {
                    self.raise(NoticeLevel::Info, "Live orderbook data restored");
                }
                self.last_poll_failed = false;
                ApplyResult::Adopted {
                    version: self.on_snapshot(snapshot),
                }
            }
            Err(e) => {
                self.last_poll_failed = true;
                self.on_failure(&e)
            }
        }
    }

    /// Adopt a fetched snapshot, replacing whatever was shown.
    pub fn on_snapshot(&mut self, snapshot: Snapshot) -> u64 {
        self.catalog.refresh(snapshot.symbols());
        let version = self.store.replace(snapshot);
        metrics::inc_snapshots_applied();
        debug!(version, "Adopted snapshot");
        version
    }

    /// Handle a failed poll.
    ///
    /// Keeps the last snapshot if there is one, otherwise adopts the
    /// built-in snapshot so the display is never stuck loading.
    pub fn on_failure(&mut self, error: &FeedError) -> ApplyResult {
        self.raise(NoticeLevel::Error, format!("Failed to fetch orderbook data: {}", error));

        if self.store.is_loaded() {
            warn!(error = %error, "Poll failed, keeping last snapshot");
            return ApplyResult::Retained;
        }

        info!(error = %error, "First poll failed, using built-in snapshot");
        metrics::inc_fallback_applied();
        let snapshot = fallback_snapshot();
        self.catalog.refresh(snapshot.symbols());
        let version = self.store.replace(snapshot);
        ApplyResult::FallbackAdopted { version }
    }

    /// Overwrite the selected symbol.
    pub fn select(&mut self, symbol: impl Into<String>) {
        self.catalog.select(symbol);
    }

    /// Select the next listed symbol.
    pub fn select_next(&mut self) {
        self.catalog.select_next();
    }

    /// Select the previous listed symbol.
    pub fn select_previous(&mut self) {
        self.catalog.select_previous();
    }

    /// Select by list position.
    pub fn select_index(&mut self, index: usize) -> bool {
        self.catalog.select_index(index)
    }

    /// Symbols of the current snapshot.
    pub fn available_symbols(&self) -> &[String] {
        self.catalog.available_symbols()
    }

    /// Currently selected symbol.
    pub fn selected_symbol(&self) -> &str {
        self.catalog.selected()
    }

    /// Position of the selection in `available_symbols`.
    pub fn selected_index(&self) -> Option<usize> {
        self.catalog.selected_index()
    }

    /// Current snapshot, if loaded.
    pub fn snapshot(&self) -> Option<&Snapshot> {
        self.store.current()
    }

    /// Version of the current snapshot.
    pub fn version(&self) -> u64 {
        self.store.version()
    }

    /// Resolve the book pane for the current snapshot and selection.
    ///
    /// The derived view is reused while neither the snapshot version nor
    /// the selection changes.
    pub fn pane(&mut self) -> Pane {
        if !self.store.is_loaded() {
            return Pane::Loading;
        }

        let version = self.store.version();
        let symbol = self.catalog.selected();

        if let Some(cached) = &self.cache {
            if cached.version == version && cached.symbol == symbol {
                return Pane::Book(Arc::clone(&cached.view));
            }
        }

        let Some(book) = self.store.lookup(symbol) else {
            self.cache = None;
            return Pane::Empty;
        };

        let view = Arc::new(derive_book_view(book));
        self.cache = Some(CachedView {
            version,
            symbol: symbol.to_string(),
            view: Arc::clone(&view),
        });
        Pane::Book(view)
    }

    /// Raise a transient notice.
    pub fn raise(&mut self, level: NoticeLevel, message: impl Into<String>) {
        self.notice = Some(Notice {
            level,
            message: message.into(),
            raised_at: Instant::now(),
        });
    }

    /// The notice to show at `now`, if it has not expired.
    pub fn active_notice(&self, now: Instant) -> Option<&Notice> {
        self.notice
            .as_ref()
            .filter(|n| now.saturating_duration_since(n.raised_at) < self.notice_ttl)
    }
}
