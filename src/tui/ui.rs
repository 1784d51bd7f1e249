//! Ratatui rendering of the symbol tabs, spread summary and ladder.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, Tabs},
    Frame,
};
use time::macros::format_description;

use crate::orderbook::format::{
    bar_cells, format_price, format_quantity, format_spread, format_total, COLUMN_HEADERS,
};
use crate::orderbook::ladder::RenderedRow;
use crate::orderbook::view::{BookView, SpreadStatus};
use crate::session::{NoticeLevel, Pane};
use crate::tui::app::FrameState;

const DEPTH_WIDTH: u16 = 14;
const HELP: &str = "←/→ switch symbol · 1-9 jump · q quit";

/// Book side a ladder table is drawn for.
#[derive(Clone, Copy)]
enum Side {
    Bid,
    Ask,
}

impl Side {
    fn title(self) -> &'static str {
        match self {
            Side::Bid => "Bids",
            Side::Ask => "Asks",
        }
    }

    fn color(self) -> Color {
        match self {
            Side::Bid => Color::Green,
            Side::Ask => Color::Red,
        }
    }
}

/// Draw one frame.
pub fn draw(f: &mut Frame, state: &FrameState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // symbols
            Constraint::Length(3), // summary
            Constraint::Min(5),    // ladder
            Constraint::Length(1), // notice
        ])
        .split(f.area());

    draw_symbols(f, state, chunks[0]);

    match &state.pane {
        Pane::Loading => {
            draw_summary(f, Line::from("Waiting for first snapshot"), chunks[1]);
            let msg = Paragraph::new("Loading orderbook...")
                .alignment(Alignment::Center)
                .block(Block::default().borders(Borders::ALL));
            f.render_widget(msg, chunks[2]);
        }
        Pane::Empty => {
            draw_summary(f, Line::from(state.selected_symbol.clone()), chunks[1]);
            let msg = Paragraph::new(format!("No book for {}", state.selected_symbol))
                .alignment(Alignment::Center)
                .block(Block::default().borders(Borders::ALL));
            f.render_widget(msg, chunks[2]);
        }
        Pane::Book(view) => {
            draw_summary(f, summary_line(state, view), chunks[1]);
            draw_ladder(f, view, chunks[2]);
        }
    }

    draw_notice(f, state, chunks[3]);
}

fn draw_symbols(f: &mut Frame, state: &FrameState, area: Rect) {
    let titles: Vec<Line> = state
        .symbols
        .iter()
        .enumerate()
        .map(|(i, s)| Line::from(format!("{} {}", i + 1, s)))
        .collect();

    let block = Block::default()
        .title(format!("L2 Orderbook · {}", state.feed_url))
        .borders(Borders::ALL);

    let mut tabs = Tabs::new(titles).block(block);
    tabs = match state.selected_index {
        Some(i) => tabs.select(i).highlight_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD | Modifier::REVERSED),
        ),
        // Selected symbol is not in the current snapshot.
        None => tabs.highlight_style(Style::default()),
    };

    f.render_widget(tabs, area);
}

fn summary_line(state: &FrameState, view: &BookView) -> Line<'static> {
    let mut spans = vec![
        Span::styled(
            view.symbol.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw(format!("   Spread: {}", format_spread(view))),
    ];

    if view.spread_status != SpreadStatus::Quoted {
        spans.push(Span::styled(
            format!("  [{}]", view.spread_status),
            Style::default().fg(Color::Yellow),
        ));
    }

    if let Some(origin) = state.origin {
        let at = state
            .received_at
            .and_then(|t| t.format(format_description!("[hour]:[minute]:[second]")).ok())
            .unwrap_or_default();
        spans.push(Span::styled(
            format!("   source: {} @ {}", origin, at),
            Style::default().fg(Color::DarkGray),
        ));
    }

    Line::from(spans)
}

fn draw_summary(f: &mut Frame, line: Line, area: Rect) {
    let summary = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
    f.render_widget(summary, area);
}

fn draw_ladder(f: &mut Frame, view: &BookView, area: Rect) {
    let halves = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    f.render_widget(side_table(&view.rendered_bids, Side::Bid), halves[0]);
    f.render_widget(side_table(&view.rendered_asks, Side::Ask), halves[1]);
}

/// Bids carry the depth bar on the left growing toward the centre; asks
/// mirror it on the right.
fn side_table(rows: &[RenderedRow], side: Side) -> Table<'static> {
    let style = Style::default().fg(side.color());

    let body: Vec<Row> = rows
        .iter()
        .map(|row| {
            let bar = "█".repeat(bar_cells(row.depth_fraction, DEPTH_WIDTH as usize));
            let values = [
                Cell::from(Line::from(format_price(row.price)).alignment(Alignment::Right)),
                Cell::from(Line::from(format_quantity(row.quantity)).alignment(Alignment::Right)),
                Cell::from(Line::from(format_total(row.notional_total)).alignment(Alignment::Right)),
            ];
            let cells: Vec<Cell> = match side {
                Side::Bid => std::iter::once(Cell::from(
                    Line::from(Span::styled(bar, style)).alignment(Alignment::Right),
                ))
                .chain(values)
                .collect(),
                Side::Ask => values
                    .into_iter()
                    .chain(std::iter::once(Cell::from(Line::from(Span::styled(bar, style)))))
                    .collect(),
            };
            Row::new(cells)
        })
        .collect();

    let headers = COLUMN_HEADERS
        .iter()
        .map(|h| Cell::from(Line::from(*h).alignment(Alignment::Right)));
    let (header, widths): (Row, Vec<Constraint>) = match side {
        Side::Bid => (
            Row::new(std::iter::once(Cell::from("")).chain(headers)),
            vec![
                Constraint::Length(DEPTH_WIDTH),
                Constraint::Min(12),
                Constraint::Min(10),
                Constraint::Min(10),
            ],
        ),
        Side::Ask => (
            Row::new(headers.chain(std::iter::once(Cell::from("")))),
            vec![
                Constraint::Min(12),
                Constraint::Min(10),
                Constraint::Min(10),
                Constraint::Length(DEPTH_WIDTH),
            ],
        ),
    };

    let title = if rows.is_empty() {
        format!("{} (no levels)", side.title())
    } else {
        side.title().to_string()
    };

    Table::new(body, widths)
        .header(header.style(Style::default().add_modifier(Modifier::BOLD)))
        .block(
            Block::default()
                .title(Span::styled(title, style))
                .borders(Borders::ALL),
        )
}

fn draw_notice(f: &mut Frame, state: &FrameState, area: Rect) {
    let line = match &state.notice {
        Some(notice) => {
            let color = match notice.level {
                NoticeLevel::Error => Color::Red,
                NoticeLevel::Info => Color::Cyan,
            };
            Line::from(Span::styled(
                notice.message.clone(),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ))
        }
        None => Line::from(Span::styled(HELP, Style::default().fg(Color::DarkGray))),
    };

    f.render_widget(Paragraph::new(line), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::mock::MockBookBuilder;
    use crate::feed::poller::PollOutcome;
    use crate::orderbook::types::Snapshot;
    use crate::session::BookController;
    use crate::tui::app::TuiApp;
    use ratatui::{backend::TestBackend, Terminal};
    use std::time::{Duration, Instant};

    fn render(app: &mut TuiApp) -> String {
        let state = app.frame(Instant::now());
        let mut terminal = Terminal::new(TestBackend::new(120, 24)).unwrap();
        terminal.draw(|f| draw(f, &state)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    fn app() -> TuiApp {
        TuiApp::new(
            BookController::new("ETH/USD", Duration::from_secs(3)),
            "http://127.0.0.1:4000/book",
        )
    }

    #[test]
    fn loading_screen() {
        let screen = render(&mut app());
        assert!(screen.contains("Loading orderbook..."));
    }

    #[test]
    fn book_screen() {
        let mut app = app();
        app.apply(PollOutcome {
            seq: 1,
            result: Ok(Snapshot::live(vec![MockBookBuilder::new("ETH/USD")
                .bid(100.0, 2.0)
                .ask(101.0, 1.0)
                .build()])),
        });

        let screen = render(&mut app);

        assert!(screen.contains("1 ETH/USD"));
        assert!(screen.contains("Spread: 1.00000 (1.000%)"));
        assert!(screen.contains("Price (USD)"));
        assert!(screen.contains("100.00000"));
        assert!(screen.contains("2.0000"));
        assert!(screen.contains("200.00"));
        assert!(screen.contains("101.00000"));
        assert!(screen.contains("source: live"));
    }

    #[test]
    fn missing_symbol_screen() {
        let mut app = app();
        app.apply(PollOutcome {
            seq: 1,
            result: Ok(Snapshot::live(vec![MockBookBuilder::new("BTC/USD")
                .bid(1.0, 1.0)
                .build()])),
        });

        let screen = render(&mut app);

        assert!(screen.contains("No book for ETH/USD"));
        assert!(screen.contains("BTC/USD"));
    }
}
