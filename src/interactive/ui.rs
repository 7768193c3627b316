//! Main UI rendering logic

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Tabs},
    Frame,
};
use std::time::Duration;

use super::app::{App, AppMode, Tab};
use super::utils::{centered_rect, get_message_style};
use super::{daily_chart, data_table, form_ui, summary_chart};
use crate::utils::format_hours;

/// Informational messages disappear after this long
const MESSAGE_TTL: Duration = Duration::from_secs(15);

/// Main draw function
pub fn draw(f: &mut Frame, app: &App) {
    let size = f.size();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Length(3), // Key figures
            Constraint::Length(3), // Tabs
            Constraint::Min(10),   // Main content
            Constraint::Length(5), // Messages
            Constraint::Length(3), // Footer
        ])
        .split(size);

    render_header(f, app, chunks[0]);
    render_kpis(f, app, chunks[1]);
    render_tabs(f, app, chunks[2]);
    render_main_content(f, app, chunks[3]);
    render_messages(f, app, chunks[4]);
    render_footer(f, app, chunks[5]);

    if app.mode == AppMode::Help {
        render_help(f, centered_rect(70, 80, size));
    }
}

/// Render the header
fn render_header(f: &mut Frame, app: &App, area: Rect) {
    let title = format!(
        " Life Tracker - {} ({} records) ",
        app.session.store().path().display(),
        app.session.len()
    );
    let header = Paragraph::new(title)
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        );

    f.render_widget(header, area);
}

/// Render total hours, main focus and daily average
fn render_kpis(f: &mut Frame, app: &App, area: Rect) {
    let summary = &app.summary;

    let line = if summary.is_empty() {
        Line::from(Span::styled(
            "👋 Welcome! Press 'a' to log your first activity",
            Style::default().fg(Color::Yellow),
        ))
    } else {
        let label = Style::default().fg(Color::Gray);
        let value = Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD);
        let focus = summary
            .most_frequent_category
            .as_ref()
            .map(|c| c.label().to_string())
            .unwrap_or_else(|| "N/A".to_string());
        let average = summary
            .average_daily_hours
            .map(format_hours)
            .unwrap_or_else(|| "N/A".to_string());

        Line::from(vec![
            Span::styled("Total hours: ", label),
            Span::styled(format_hours(summary.total_hours), value),
            Span::raw("   "),
            Span::styled("Main focus: ", label),
            Span::styled(focus, value),
            Span::raw("   "),
            Span::styled("Daily average: ", label),
            Span::styled(average, value),
        ])
    };

    let paragraph = Paragraph::new(line).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Key Figures ")
            .border_style(Style::default().fg(Color::Cyan)),
    );

    f.render_widget(paragraph, area);
}

fn render_tabs(f: &mut Frame, app: &App, area: Rect) {
    let titles = [Tab::Analysis, Tab::Data]
        .iter()
        .enumerate()
        .map(|(i, tab)| Line::from(format!("{} {}", i + 1, tab.title())))
        .collect::<Vec<_>>();

    let tabs = Tabs::new(titles)
        .select(app.tab.index())
        .block(Block::default().borders(Borders::ALL))
        .style(Style::default().fg(Color::Gray))
        .highlight_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        );

    f.render_widget(tabs, area);
}

/// Render the main content area
fn render_main_content(f: &mut Frame, app: &App, area: Rect) {
    let in_form_mode = matches!(app.mode, AppMode::AddEntry | AppMode::EditRow);

    let (content_area, form_area) = if in_form_mode {
        let main_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(65), // Form and tab content
                Constraint::Percentage(35), // Side panel
            ])
            .split(area);

        let content_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
            .split(main_chunks[0]);

        form_ui::render_context_panel(f, app, main_chunks[1]);
        (content_chunks[0], Some(content_chunks[1]))
    } else {
        (area, None)
    };

    match app.tab {
        Tab::Analysis => {
            let chunks = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
                .split(content_area);
            summary_chart::render(f, app, chunks[0]);
            daily_chart::render(f, app, chunks[1]);
        }
        Tab::Data => data_table::render(f, app, content_area),
    }

    if let Some(form_area) = form_area {
        form_ui::render_form(f, app, form_area);
    }
}

/// Render the help screen
fn render_help(f: &mut Frame, area: Rect) {
    let heading = Style::default().add_modifier(Modifier::BOLD);
    let key = Style::default().fg(Color::Yellow);

    let section = |title: &'static str| Line::from(Span::styled(title, heading));
    let entry = |keys: &'static str, text: &'static str| {
        Line::from(vec![
            Span::styled(format!("  {:14}", keys), key),
            Span::raw(text),
        ])
    };

    let help_text = vec![
        Line::from(Span::styled(
            "Keyboard Shortcuts",
            Style::default()
                .add_modifier(Modifier::BOLD)
                .fg(Color::Cyan),
        )),
        Line::from(""),
        section("General:"),
        entry("Tab", "Switch between Analysis and Data"),
        entry("a", "Log an activity (saved immediately)"),
        entry("?", "Toggle this help"),
        entry("q / Ctrl+C", "Quit"),
        Line::from(""),
        section("Data tab:"),
        entry("↑↓ / j k", "Select row"),
        entry("Home / End", "First / last row"),
        entry("e / Enter", "Edit selected row"),
        entry("d / Del", "Delete selected row"),
        entry("n", "New row (today, Trabajo, 1 h)"),
        entry("u", "Apply table changes to the file"),
        entry("r", "Discard table changes"),
        Line::from(""),
        section("Form:"),
        entry("Tab / ↓", "Next field"),
        entry("Shift+Tab / ↑", "Previous field"),
        entry("1-6", "Pick a category on the Category field"),
        entry("Enter", "Save"),
        entry("Esc", "Cancel"),
    ];

    let paragraph = Paragraph::new(help_text).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Help ")
            .border_style(Style::default().fg(Color::Cyan)),
    );

    f.render_widget(Clear, area);
    f.render_widget(paragraph, area);
}

/// Render the messages panel
fn render_messages(f: &mut Frame, app: &App, area: Rect) {
    let mut lines = Vec::new();

    // Show recent messages (last 3)
    let recent_messages: Vec<_> = app
        .messages
        .iter()
        .filter(|m| !m.is_expired(MESSAGE_TTL))
        .rev()
        .take(3)
        .collect();

    for msg in recent_messages.iter().rev() {
        let style = get_message_style(msg.message_type);
        lines.push(Line::from(vec![
            Span::styled(format!("{} ", msg.icon()), style),
            Span::styled(msg.text.as_str(), style),
        ]));
    }

    if lines.is_empty() {
        lines.push(Line::from(Span::styled(
            "Ready",
            Style::default().fg(Color::Gray),
        )));
    }

    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Messages ")
            .border_style(Style::default().fg(Color::Cyan)),
    );

    f.render_widget(paragraph, area);
}

/// Render the footer with keyboard shortcuts
fn render_footer(f: &mut Frame, app: &App, area: Rect) {
    let shortcuts = match (app.mode, app.tab) {
        (AppMode::Normal, Tab::Analysis) => "[Tab] Data  [a]dd activity  [?] help  [q]uit",
        (AppMode::Normal, Tab::Data) => {
            "[Tab] Analysis  [↑↓] Select  [e]dit  [d]elete  [n]ew row  [u] apply  [r] discard  [a]dd  [?] help  [q]uit"
        }
        (AppMode::AddEntry, _) => "[Enter] Save  [Esc] Cancel add",
        (AppMode::EditRow, _) => "[Enter] Keep change  [Esc] Cancel edit",
        (AppMode::Help, _) => "[Esc/?/q] Close help",
    };

    let footer = Paragraph::new(shortcuts)
        .style(Style::default().fg(Color::Gray))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray)),
        );

    f.render_widget(footer, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{ActivityRecord, Category};
    use crate::session::Session;
    use crate::store::CsvStore;
    use chrono::NaiveDate;
    use ratatui::{backend::TestBackend, Terminal};

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        buffer.content().iter().map(|c| c.symbol()).collect()
    }

    #[test]
    fn test_draw_dashboard() {
        let dir = tempfile::tempdir().unwrap();
        let records = vec![
            ActivityRecord::new(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(), Category::Work, 3.0),
            ActivityRecord::new(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(), Category::Sleep, 8.0),
            ActivityRecord::new(NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(), Category::Work, 2.0),
        ];
        let session = Session::with_records(CsvStore::new(dir.path().join("data.csv")), records);
        let app = App::new(session, None);

        let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
        terminal.draw(|f| draw(f, &app)).unwrap();

        let text = buffer_text(&terminal);
        assert!(text.contains("Total hours: 13.0 h"));
        assert!(text.contains("Main focus: Trabajo"));
        assert!(text.contains("Daily average: 6.5 h"));
        assert!(text.contains("Time Distribution"));
    }

    #[test]
    fn test_draw_empty_dashboard() {
        let dir = tempfile::tempdir().unwrap();
        let session = Session::with_records(CsvStore::new(dir.path().join("data.csv")), Vec::new());
        let app = App::new(session, None);

        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|f| draw(f, &app)).unwrap();

        assert!(buffer_text(&terminal).contains("Welcome!"));
    }
}

// Made with Bob
