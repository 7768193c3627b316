//! Summary chart component for displaying the category distribution

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::app::App;
use super::utils::get_category_color;
use crate::utils::{create_bar, format_hours, format_percentage, pad_right, truncate_string};

const LABEL_WIDTH: usize = 12;
const MAX_BAR_WIDTH: usize = 30;

/// Render the category distribution
pub fn render(f: &mut Frame, app: &App, area: Rect) {
    let summary = &app.summary;
    let mut lines = Vec::new();

    if !summary.is_empty() {
        // Already sorted by hours (descending), then label
        for (category, hours) in &summary.by_category {
            // Hand-edited files may hold negative hours, so the share is clamped
            let bar = create_bar(*hours, summary.total_hours, MAX_BAR_WIDTH);
            let color = get_category_color(category);

            lines.push(Line::from(vec![
                Span::styled(
                    format!(
                        "{} ",
                        pad_right(&truncate_string(category.label(), LABEL_WIDTH), LABEL_WIDTH)
                    ),
                    Style::default().fg(Color::White),
                ),
                Span::styled(bar, Style::default().fg(color)),
                Span::styled(
                    format!(
                        " {} ({})",
                        format_hours(*hours),
                        format_percentage(*hours, summary.total_hours)
                    ),
                    Style::default().fg(color),
                ),
            ]));
        }

        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            Span::styled("Total: ", Style::default().add_modifier(Modifier::BOLD)),
            Span::styled(
                format_hours(summary.total_hours),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
        ]));
    } else {
        lines.push(Line::from(Span::styled(
            "No activities logged yet",
            Style::default().fg(Color::Gray),
        )));
    }

    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Time Distribution ")
            .border_style(Style::default().fg(Color::Cyan)),
    );

    f.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{ActivityRecord, Category};
    use crate::session::Session;
    use crate::store::CsvStore;
    use chrono::NaiveDate;
    use ratatui::{backend::TestBackend, Terminal};

    fn draw(records: Vec<ActivityRecord>) -> String {
        let dir = tempfile::tempdir().unwrap();
        let session = Session::with_records(CsvStore::new(dir.path().join("data.csv")), records);
        let app = App::new(session, None);

        let mut terminal = Terminal::new(TestBackend::new(80, 12)).unwrap();
        terminal.draw(|f| render(f, &app, f.size())).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_render_distribution() {
        let day = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let text = draw(vec![
            ActivityRecord::new(day, Category::Work, 3.0),
            ActivityRecord::new(day, Category::Sleep, 1.0),
        ]);
        assert!(text.contains("Trabajo"));
        assert!(text.contains("75.0%"));
        assert!(text.contains("Total: 4.0 h"));
    }

    #[test]
    fn test_render_hand_edited_hours() {
        // Nearly cancelling totals must not blow up the bar width
        let day = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let text = draw(vec![
            ActivityRecord::new(day, Category::Work, 1e20),
            ActivityRecord::new(day, Category::Sleep, -1e20),
            ActivityRecord::new(day, Category::Leisure, 1.0),
        ]);
        assert!(text.contains("Ocio"));

        let text = draw(vec![
            ActivityRecord::new(day, Category::Work, 50.0),
            ActivityRecord::new(day, Category::Sleep, -49.0),
        ]);
        assert!(text.contains("Trabajo"));
        assert!(text.matches('█').count() <= MAX_BAR_WIDTH);
    }
}

// Made with Bob
