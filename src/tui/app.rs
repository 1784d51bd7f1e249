//! Display state and key handling, kept free of terminal I/O.

use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use time::OffsetDateTime;

use crate::feed::poller::PollOutcome;
use crate::orderbook::types::SnapshotOrigin;
use crate::session::{ApplyResult, BookController, Notice, Pane};

/// User intents decoded from key presses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Leave the display.
    Quit,
    /// Move to the next listed symbol, wrapping around.
    NextSymbol,
    /// Move to the previous listed symbol, wrapping around.
    PreviousSymbol,
    /// Jump to a zero-based list position.
    SelectIndex(usize),
}

/// Map a key press to an action.
pub fn action_for_key(key: KeyEvent) -> Option<Action> {
    if key.kind != KeyEventKind::Press {
        return None;
    }

    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Some(Action::Quit),
        KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
        KeyCode::Right | KeyCode::Tab | KeyCode::Char('l') => Some(Action::NextSymbol),
        KeyCode::Left | KeyCode::BackTab | KeyCode::Char('h') => Some(Action::PreviousSymbol),
        KeyCode::Char(c @ '1'..='9') => Some(Action::SelectIndex(c as usize - '1' as usize)),
        _ => None,
    }
}

/// Everything `ui::draw` needs for one frame.
#[derive(Debug, Clone)]
pub struct FrameState {
    /// Symbols shown as tabs.
    pub symbols: Vec<String>,
    /// Tab to highlight; `None` when the selection is not listed.
    pub selected_index: Option<usize>,
    /// Selected symbol, listed or not.
    pub selected_symbol: String,
    /// Book pane contents.
    pub pane: Pane,
    /// Notice still within its TTL.
    pub notice: Option<Notice>,
    /// Whether the data is live or built-in.
    pub origin: Option<SnapshotOrigin>,
    /// When the shown snapshot was adopted.
    pub received_at: Option<OffsetDateTime>,
    /// Endpoint being polled.
    pub feed_url: String,
}

/// Terminal display state.
pub struct TuiApp {
    /// Snapshot, selection and notices.
    pub controller: BookController,
    /// Endpoint being polled, shown in the title.
    pub feed_url: String,
    /// Set once the user asks to leave.
    pub should_quit: bool,
}

impl TuiApp {
    /// Create the display state around a controller.
    pub fn new(controller: BookController, feed_url: impl Into<String>) -> Self {
        Self {
            controller,
            feed_url: feed_url.into(),
            should_quit: false,
        }
    }

    /// Apply a poll outcome.
    pub fn apply(&mut self, outcome: PollOutcome) -> ApplyResult {
        self.controller.apply_outcome(outcome)
    }

    /// Update selection or quit flag for a key press.
    pub fn handle_key(&mut self, key: KeyEvent) {
        match action_for_key(key) {
            Some(Action::Quit) => self.should_quit = true,
            Some(Action::NextSymbol) => self.controller.select_next(),
            Some(Action::PreviousSymbol) => self.controller.select_previous(),
            Some(Action::SelectIndex(i)) => {
                self.controller.select_index(i);
            }
            None => {}
        }
    }

    /// Collect what the next draw needs.
    pub fn frame(&mut self, now: Instant) -> FrameState {
        let pane = self.controller.pane();
        let snapshot = self.controller.snapshot();

        FrameState {
            symbols: self.controller.available_symbols().to_vec(),
            selected_index: self.controller.selected_index(),
            selected_symbol: self.controller.selected_symbol().to_string(),
            origin: snapshot.map(|s| s.origin),
            received_at: snapshot.map(|s| s.received_at),
            pane,
            notice: self.controller.active_notice(now).cloned(),
            feed_url: self.feed_url.clone(),
        }
    }
}
