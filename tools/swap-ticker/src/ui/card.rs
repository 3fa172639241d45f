//! Instrument card: label, sparkline and latest price.

use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{Axis, Block, BorderType, Borders, Chart, Dataset, GraphType, Paragraph},
    Frame,
};

use crate::domain::{HistoryWindow, Instrument, InstrumentSlot};

/// Rows taken by one card, borders included.
pub const CARD_HEIGHT: u16 = 7;

/// Background for instruments without a brand color, by display position.
const PALETTE: [Color; 4] = [
    Color::Rgb(0x00, 0xb3, 0x8f),
    Color::Rgb(0xe1, 0x4e, 0xca),
    Color::Rgb(0x5e, 0x72, 0xe4),
    Color::Rgb(0xfd, 0x5d, 0x93),
];

/// Card background for an instrument.
pub fn card_color(instrument: &Instrument, position: usize) -> Color {
    match instrument.base() {
        "BTC" => Color::Rgb(0xf7, 0x93, 0x1a),
        "ETH" => Color::Rgb(0x1d, 0x8c, 0xf8),
        "BNB" => Color::Rgb(0xf3, 0xba, 0x2f),
        _ => PALETTE[position % PALETTE.len()],
    }
}

/// Chart points for a price window, x being the sample's position in the
/// shared timestamp window. Gaps are skipped.
pub fn sparkline_points(
    history: &HistoryWindow<Option<f64>>,
    timestamps: &HistoryWindow<String>,
) -> Vec<(f64, f64)> {
    history
        .iter()
        .zip(timestamps.iter())
        .enumerate()
        .filter_map(|(i, (price, _))| price.map(|p| (i as f64, p)))
        .collect()
}

/// Vertical bounds with a little headroom so a flat series stays visible.
pub fn y_bounds(range: Option<(f64, f64)>) -> [f64; 2] {
    let Some((lo, hi)) = range else {
        return [0.0, 1.0];
    };

    let pad = ((hi - lo) * 0.05).max(hi.abs() * 1e-4).max(1e-9);
    [lo - pad, hi + pad]
}

/// Render one card. Callers only pass visible slots.
pub(super) fn render(
    frame: &mut Frame,
    area: Rect,
    slot: &InstrumentSlot,
    position: usize,
    timestamps: &HistoryWindow<String>,
) {
    let Some(ticker) = &slot.snapshot else {
        return;
    };

    let color = card_color(&slot.instrument, position);
    let base = Style::default().bg(color).fg(Color::White);

    let block = Block::default()
        .title(Span::styled(
            format!(" {} ", slot.instrument.label()),
            Style::default().add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .style(base);

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let [chart_area, price_area] =
        Layout::horizontal([Constraint::Fill(1), Constraint::Fill(1)])
            .spacing(2)
            .areas(inner);

    // Sparkline: no axes, labels, legend or markers
    let points = sparkline_points(&slot.history, timestamps);
    if !points.is_empty() {
        let x_max = (timestamps.len().saturating_sub(1)).max(1) as f64;
        let dataset = Dataset::default()
            .marker(Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(Color::White))
            .data(&points);

        let chart = Chart::new(vec![dataset])
            .x_axis(Axis::default().bounds([0.0, x_max]))
            .y_axis(Axis::default().bounds(y_bounds(slot.price_range())))
            .legend_position(None)
            .style(base);

        frame.render_widget(chart, chart_area);
    }

    let mut lines = vec![Line::from(Span::styled(
        ticker.last.clone(),
        Style::default().add_modifier(Modifier::BOLD),
    ))];
    if let Some(change) = ticker.change_24h_pct() {
        let arrow = if change >= 0.0 { "▲" } else { "▼" };
        lines.push(Line::from(format!("{} {:+.2}%", arrow, change)));
    }

    let [_, text_area, _] = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(lines.len() as u16),
        Constraint::Fill(1),
    ])
    .areas(price_area);

    let price = Paragraph::new(lines)
        .alignment(Alignment::Right)
        .style(base);
    frame.render_widget(price, text_area);
}
