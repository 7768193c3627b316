//! Form UI rendering with context-aware right panel

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

use super::app::{App, AppMode};
use super::form::{FormData, FormField};
use super::utils::get_category_color;
use crate::record::Category;
use crate::utils::{format_date, format_hours, parse_date};

/// Render the form editor
pub fn render_form(f: &mut Frame, app: &App, area: Rect) {
    let Some(form) = &app.form_data else {
        return;
    };

    let title = match app.mode {
        AppMode::EditRow => format!(" Edit Row {} ", app.editor.selected() + 1),
        _ => " Log Activity ".to_string(),
    };

    let mut lines = vec![
        Line::from(Span::styled(
            "Tab/↓: Next | Shift+Tab/↑: Prev | ←→: Move cursor | Home/End | Backspace/Del | Enter: Save | Esc: Cancel",
            Style::default().fg(Color::Gray),
        )),
        Line::from(""),
    ];

    for field in FormField::all() {
        let is_current = form.current_field == field;
        let value = form.get_field_value(field);

        let label_style = if is_current {
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };

        let value_style = if is_current {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };

        let display_value = if is_current && field != FormField::Category {
            with_cursor(&value, form.cursor_position)
        } else if value.is_empty() {
            "<empty>".to_string()
        } else {
            value
        };

        lines.push(Line::from(vec![
            Span::styled(format!("{:10}", field.label()), label_style),
            Span::raw(": "),
            Span::styled(display_value, value_style),
        ]));
    }

    lines.push(Line::from(""));

    let hint = match form.current_field {
        FormField::Date => "Format: YYYY-MM-DD, YYYY.MM.DD or YYYY/MM/DD",
        FormField::Category => "Press 1-6 or ←→/Space to pick a category →",
        FormField::Hours => "Enter hours between 0 and 24 (e.g., 8, 1.5 or 1,5)",
    };
    lines.push(Line::from(Span::styled(
        format!("💡 {}", hint),
        Style::default().fg(Color::Blue),
    )));

    let paragraph =
        Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(title));

    f.render_widget(paragraph, area);
}

/// Value with a block cursor inserted at `cursor` (in characters)
fn with_cursor(value: &str, cursor: usize) -> String {
    let mut display = String::with_capacity(value.len() + 3);
    let mut placed = false;
    for (i, c) in value.chars().enumerate() {
        if i == cursor {
            display.push('█');
            placed = true;
        }
        display.push(c);
    }
    if !placed {
        display.push('█');
    }
    display
}

/// Render context-aware right panel based on current field
pub fn render_context_panel(f: &mut Frame, app: &App, area: Rect) {
    let Some(form) = &app.form_data else {
        return;
    };

    match form.current_field {
        FormField::Category => render_category_panel(f, &form.category, area),
        FormField::Date | FormField::Hours => render_day_panel(f, app, form, area),
    }
}

/// Render the category list with the current choice highlighted
fn render_category_panel(f: &mut Frame, current: &Category, area: Rect) {
    let items: Vec<ListItem> = Category::ALL
        .iter()
        .map(|category| {
            let is_selected = category == current;
            let style = if is_selected {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(get_category_color(category))
            };

            let prefix = if is_selected { "▶ " } else { "  " };
            let number = category.menu_number().unwrap_or_default();
            let content = format!(
                "{}{} - {} ({})",
                prefix,
                number,
                category.label(),
                category.english_name()
            );

            ListItem::new(content).style(style)
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Categories (press 1-6) ")
            .style(Style::default().fg(Color::Cyan)),
    );

    f.render_widget(list, area);
}

/// Render what is already stored for the date in the form
fn render_day_panel(f: &mut Frame, app: &App, form: &FormData, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .style(Style::default().fg(Color::Cyan));

    let Ok(date) = parse_date(&form.date) else {
        let paragraph = Paragraph::new(Span::styled(
            "Enter a valid date to see what is already logged",
            Style::default().fg(Color::Gray),
        ))
        .block(block.title(" Same Day "));
        f.render_widget(paragraph, area);
        return;
    };

    let entries: Vec<_> = app
        .session
        .records()
        .iter()
        .filter(|r| r.date == date)
        .collect();
    let total: f64 = entries.iter().map(|r| r.hours).sum();

    let mut items: Vec<ListItem> = entries
        .iter()
        .map(|r| {
            ListItem::new(format!("  {:12} {}", r.category.label(), format_hours(r.hours)))
                .style(Style::default().fg(get_category_color(&r.category)))
        })
        .collect();
    if items.is_empty() {
        items.push(ListItem::new("  Nothing logged yet").style(Style::default().fg(Color::Gray)));
    }

    let title = format!(" {} - {} logged ", format_date(date), format_hours(total));
    let list = List::new(items).block(block.title(title));

    f.render_widget(list, area);
}


// Made with Bob
