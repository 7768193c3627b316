//! Daily totals bar chart with the 24h limit

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Bar, BarChart, BarGroup, Block, Borders, Paragraph},
    Frame,
};

use super::app::App;
use crate::stats::DAILY_LIMIT_HOURS;

const BAR_WIDTH: u16 = 6;
const BAR_GAP: u16 = 1;

/// Bars are capped at twice the limit; the label still shows the real total
const SCALE_CAP_HOURS: f64 = 2.0 * DAILY_LIMIT_HOURS;

/// Bar values are in tenths of an hour
fn to_tenths(hours: f64) -> u64 {
    (hours.clamp(0.0, SCALE_CAP_HOURS) * 10.0).round() as u64
}

/// Render the daily totals chart; only the most recent days that fit are shown
pub fn render(f: &mut Frame, app: &App, area: Rect) {
    let by_date = &app.summary.by_date;
    let over_limit = app.summary.days_over_limit().len();

    let title = if over_limit > 0 {
        Line::from(vec![
            Span::raw(" Daily Evolution (limit 24h) "),
            Span::styled(
                format!("⚠ {} day(s) over 24h ", over_limit),
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ),
        ])
    } else {
        Line::from(" Daily Evolution (limit 24h) ")
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .border_style(Style::default().fg(Color::Cyan));

    if by_date.is_empty() {
        let paragraph = Paragraph::new(Span::styled(
            "No activities logged yet",
            Style::default().fg(Color::Gray),
        ))
        .block(block);
        f.render_widget(paragraph, area);
        return;
    }

    let inner_width = area.width.saturating_sub(2);
    let capacity = ((inner_width + BAR_GAP) / (BAR_WIDTH + BAR_GAP)).max(1) as usize;
    let visible = &by_date[by_date.len().saturating_sub(capacity)..];

    let bars: Vec<Bar> = visible
        .iter()
        .map(|(date, hours)| {
            let color = if app.summary.is_over_limit(*date) {
                Color::Red
            } else {
                Color::Green
            };
            Bar::default()
                .value(to_tenths(*hours))
                .text_value(format!("{:.1}", hours))
                .label(Line::from(date.format("%m-%d").to_string()))
                .style(Style::default().fg(color))
                .value_style(Style::default().fg(Color::Black).bg(color))
        })
        .collect();

    // Keep the scale at least at the limit so a full bar means 24h
    let max = visible
        .iter()
        .map(|(_, h)| to_tenths(*h))
        .max()
        .unwrap_or(0)
        .max(to_tenths(DAILY_LIMIT_HOURS));

    let chart = BarChart::default()
        .block(block)
        .data(BarGroup::default().bars(&bars))
        .bar_width(BAR_WIDTH)
        .bar_gap(BAR_GAP)
        .max(max);

    f.render_widget(chart, area);
}
