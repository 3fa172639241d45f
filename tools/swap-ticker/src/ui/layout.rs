//! Main layout orchestration.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  SWAP-TICKER v0.1.0  www.okx.com SWAP     Last update: 12:00:01 │
//! ├─────────────────────┬─────────────────────┬─────────────────────┤
//! │  card               │  card               │  card               │
//! ├─────────────────────┴─────────────────────┴─────────────────────┤
//! │  [R] Refresh  [Q] Quit                                          │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Narrow terminals stack the cards in a single column.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::domain::{Dashboard, InstrumentSlot, TIMESTAMP_FORMAT};

use super::card::{self, CARD_HEIGHT};

/// Terminal width from which cards sit side by side.
pub const WIDE_LAYOUT_MIN_WIDTH: u16 = 90;

/// Cards per row in the wide layout.
const WIDE_COLUMNS: usize = 3;

/// Number of card columns for a given width.
pub fn card_columns(width: u16) -> usize {
    if width >= WIDE_LAYOUT_MIN_WIDTH {
        WIDE_COLUMNS
    } else {
        1
    }
}

/// Render the entire UI.
pub fn render(frame: &mut Frame, dashboard: &Dashboard, source: &str) {
    let [header, body, footer] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Min(CARD_HEIGHT),
        Constraint::Length(3),
    ])
    .areas(frame.area());

    render_header(frame, header, dashboard, source);
    render_cards(frame, body, dashboard);
    render_footer(frame, footer);
}

/// Render the header bar.
fn render_header(frame: &mut Frame, area: Rect, dashboard: &Dashboard, source: &str) {
    let title = vec![
        Span::styled(
            " SWAP-TICKER ",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            concat!("v", env!("CARGO_PKG_VERSION")),
            Style::default().fg(Color::DarkGray),
        ),
        Span::styled(format!("  {} ", source), Style::default().fg(Color::Gray)),
    ];

    let status = match dashboard.last_update() {
        Some(time) => Span::styled(
            format!(
                " {}/{} live  Last update: {} ",
                dashboard.visible_slots().count(),
                dashboard.slots().len(),
                time.format(TIMESTAMP_FORMAT)
            ),
            Style::default().fg(Color::DarkGray),
        ),
        None => Span::styled(" No data ", Style::default().fg(Color::DarkGray)),
    };

    // Right-align the status
    let title_len: usize = title.iter().map(|s| s.content.chars().count()).sum();
    let status_len = status.content.chars().count();
    let padding = area
        .width
        .saturating_sub(2)
        .saturating_sub((title_len + status_len) as u16);

    let mut spans = title;
    spans.push(Span::raw(" ".repeat(padding as usize)));
    spans.push(status);

    let header = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray)),
    );

    frame.render_widget(header, area);
}

/// Render one card per instrument with a snapshot.
fn render_cards(frame: &mut Frame, area: Rect, dashboard: &Dashboard) {
    let visible: Vec<(usize, &InstrumentSlot)> = dashboard
        .slots()
        .iter()
        .enumerate()
        .filter(|(_, slot)| slot.is_visible())
        .collect();

    if visible.is_empty() {
        let waiting = Paragraph::new(Span::styled(
            " Waiting for market data...",
            Style::default().fg(Color::DarkGray),
        ))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray)),
        );
        frame.render_widget(waiting, area);
        return;
    }

    let columns = card_columns(area.width);
    let rows: Vec<&[(usize, &InstrumentSlot)]> = visible.chunks(columns).collect();

    let mut row_constraints = vec![Constraint::Length(CARD_HEIGHT); rows.len()];
    row_constraints.push(Constraint::Min(0));
    let row_areas = Layout::vertical(row_constraints).split(area);

    for (row, row_area) in rows.iter().zip(row_areas.iter()) {
        let col_areas =
            Layout::horizontal(vec![Constraint::Ratio(1, columns as u32); columns]).split(*row_area);

        for (&(position, slot), col_area) in row.iter().zip(col_areas.iter()) {
            card::render(frame, *col_area, slot, position, dashboard.timestamps());
        }
    }
}

/// Render the footer with keyboard shortcuts.
fn render_footer(frame: &mut Frame, area: Rect) {
    let keybinds = vec![
        Span::styled("[R]", Style::default().fg(Color::Yellow)),
        Span::raw(" Refresh  "),
        Span::styled("[Q]", Style::default().fg(Color::Yellow)),
        Span::raw(" Quit  "),
    ];

    let footer = Paragraph::new(Line::from(keybinds))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray)),
        )
        .centered();

    frame.render_widget(footer, area);
}
