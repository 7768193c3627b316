//! Utility functions for the interactive UI

use super::messages::MessageType;
use crate::record::Category;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Style};

/// Get color for a category
pub fn get_category_color(category: &Category) -> Color {
    match category {
        Category::Work => Color::Green,
        Category::Study => Color::LightBlue,
        Category::Sleep => Color::Blue,
        Category::Gym => Color::Red,
        Category::Leisure => Color::Magenta,
        Category::Transport => Color::Yellow,
        Category::Other(_) => Color::Gray,
    }
}

/// Get style for message type
pub fn get_message_style(message_type: MessageType) -> Style {
    match message_type {
        MessageType::Info => Style::default().fg(Color::Cyan),
        MessageType::Success => Style::default().fg(Color::Green),
        MessageType::Warning => Style::default().fg(Color::Yellow),
        MessageType::Error => Style::default().fg(Color::Red),
    }
}

/// Rectangle of the given percentage size centered in `area`
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}


// Made with Bob
