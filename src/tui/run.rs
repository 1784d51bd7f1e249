//! Terminal lifecycle and the display event loop.

use std::io::{self, stdout, Stdout};
use std::sync::Once;
use std::time::{Duration, Instant};

use crossterm::event::{Event, EventStream};
use crossterm::{cursor, execute, terminal};
use futures::StreamExt;
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::error::Result;
use crate::feed::client::{HttpBookFeed, SnapshotSource};
use crate::feed::poller::{Poller, PollerHandle};
use crate::session::{ApplyResult, BookController};
use crate::tui::{app::TuiApp, ui::draw};
use crate::utils::shutdown_signal;

/// Redraw cadence when nothing else happens, so notices expire on screen.
const REDRAW_INTERVAL: Duration = Duration::from_millis(250);

type Term = Terminal<CrosstermBackend<Stdout>>;

static PANIC_HOOK: Once = Once::new();

/// Poll the configured endpoint and show the ladder until the user quits.
pub async fn run_tui(config: &Config) -> Result<()> {
    let feed = HttpBookFeed::new(config)?;
    info!(url = feed.url(), interval_ms = config.poll_interval_ms, "Starting viewer");
    run_with_source(config, feed).await
}

/// Same as [`run_tui`] with any snapshot source.
pub async fn run_with_source<S: SnapshotSource>(config: &Config, source: S) -> Result<()> {
    let mut app = TuiApp::new(BookController::from_config(config), config.book_url.clone());
    let mut poller = Poller::new(source, config.poll_interval()).spawn();

    install_panic_hook();
    let mut terminal = setup_terminal()?;
    let res = event_loop(&mut terminal, &mut app, &mut poller).await;
    restore_terminal(&mut terminal)?;

    info!("Viewer stopped");
    res
}

fn setup_terminal() -> Result<Term> {
    terminal::enable_raw_mode()?;
    with_rollback(execute!(stdout(), terminal::EnterAlternateScreen), reset_terminal)?;
    let backend = CrosstermBackend::new(stdout());
    Ok(with_rollback(Terminal::new(backend), reset_terminal)?)
}

/// Run `rollback` when a setup step failed, then hand the result back.
fn with_rollback<T>(step: io::Result<T>, rollback: impl FnOnce()) -> io::Result<T> {
    if step.is_err() {
        rollback();
    }
    step
}

/// Best-effort restore for error and panic paths.
fn reset_terminal() {
    let _ = terminal::disable_raw_mode();
    let _ = execute!(stdout(), terminal::LeaveAlternateScreen, cursor::Show);
}

/// Restore the terminal before the default panic message is printed.
fn install_panic_hook() {
    PANIC_HOOK.call_once(|| {
        let previous = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            reset_terminal();
            previous(info);
        }));
    });
}

fn restore_terminal(terminal: &mut Term) -> Result<()> {
    terminal::disable_raw_mode()?;
    execute!(terminal.backend_mut(), terminal::LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

async fn event_loop(terminal: &mut Term, app: &mut TuiApp, poller: &mut PollerHandle) -> Result<()> {
    let mut events = EventStream::new();
    let mut redraw = tokio::time::interval(REDRAW_INTERVAL);
    let shutdown = shutdown_signal();
    tokio::pin!(shutdown);

    loop {
        let state = app.frame(Instant::now());
        terminal.draw(|f| draw(f, &state))?;

        if app.should_quit {
            return Ok(());
        }

        tokio::select! {
            outcome = poller.recv() => match outcome {
                Some(outcome) => {
                    let seq = outcome.seq;
                    match app.apply(outcome) {
                        ApplyResult::Stale => debug!(seq, "Stale outcome ignored"),
                        result => debug!(seq, ?result, "Outcome applied"),
                    }
                }
                None => {
                    warn!("Poller stopped");
                    return Ok(());
                }
            },
            event = events.next() => match event {
                Some(Ok(Event::Key(key))) => app.handle_key(key),
                Some(Ok(_)) => {}
                Some(Err(e)) => return Err(e.into()),
                None => return Ok(()),
            },
            _ = redraw.tick() => {}
            _ = &mut shutdown => app.should_quit = true,
        }
    }
}
