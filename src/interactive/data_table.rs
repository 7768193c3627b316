//! Data tab: the record table backed by the edit buffer

use ratatui::{
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    text::Span,
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame,
};

use super::app::App;
use super::utils::get_category_color;
use crate::utils::{format_date, format_hours, MAX_HOURS};

/// Render the table of all rows with the selection highlighted
pub fn render(f: &mut Frame, app: &App, area: Rect) {
    let editor = &app.editor;

    let title = if editor.is_dirty() {
        Span::styled(
            " Data (modified - u: apply, r: discard) ",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
    } else {
        Span::raw(" Data ")
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .border_style(Style::default().fg(Color::Cyan));

    if editor.is_empty() {
        let paragraph = Paragraph::new(Span::styled(
            "No rows. Press 'n' to add a row or 'a' to log an activity",
            Style::default().fg(Color::Gray),
        ))
        .block(block);
        f.render_widget(paragraph, area);
        return;
    }

    let header = Row::new(vec!["#", "Date", "Category", "Hours"])
        .style(Style::default().add_modifier(Modifier::BOLD))
        .height(1);

    let rows: Vec<Row> = editor
        .rows()
        .iter()
        .enumerate()
        .map(|(i, record)| {
            // Rows read from disk may hold values the form would reject
            let hours_style = if record.hours > 0.0 && record.hours <= MAX_HOURS {
                Style::default()
            } else {
                Style::default().fg(Color::Red)
            };
            let category_style = if record.category.is_known() {
                Style::default().fg(get_category_color(&record.category))
            } else {
                Style::default().fg(Color::Red)
            };

            Row::new(vec![
                Cell::from(format!("{}", i + 1)),
                Cell::from(format_date(record.date)),
                Cell::from(record.category.label().to_string()).style(category_style),
                Cell::from(format_hours(record.hours)).style(hours_style),
            ])
        })
        .collect();

    let widths = [
        Constraint::Length(5),
        Constraint::Length(12),
        Constraint::Length(14),
        Constraint::Length(9),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(block)
        .highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
        .highlight_symbol("▶ ");

    let mut state = TableState::default().with_selected(Some(editor.selected()));
    f.render_stateful_widget(table, area, &mut state);
}

// Made with Bob
