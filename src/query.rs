use chrono::NaiveDate;

use crate::record::ActivityRecord;
use crate::stats::{Summary, DAILY_LIMIT_HOURS};
use crate::utils::{self, create_bar, format_hours, format_percentage, pad_right, truncate_string};

const CATEGORY_WIDTH: usize = 12;
const BAR_WIDTH: usize = 30;

/// Print the record table with 1-based row numbers
pub fn handle_list_command(records: &[ActivityRecord], limit: usize, date: Option<NaiveDate>) {
    let rows = select_rows(records, limit, date);

    if rows.is_empty() {
        match date {
            Some(d) => println!("No records for {}", utils::format_date(d)),
            None => println!("👋 No records yet. Use 'lifetracker add' to log your first activity."),
        }
        return;
    }

    println!("{:>4}  {:<10}  {}  {:>7}", "#", "Date", pad_right("Category", CATEGORY_WIDTH), "Hours");
    println!("{}", "-".repeat(4 + 2 + 10 + 2 + CATEGORY_WIDTH + 2 + 7));
    for (row, record) in &rows {
        println!(
            "{:>4}  {:<10}  {}  {:>7}",
            row,
            utils::format_date(record.date),
            pad_right(&truncate_string(record.category.label(), CATEGORY_WIDTH), CATEGORY_WIDTH),
            format_hours(record.hours)
        );
    }

    let shown_total: f64 = rows.iter().map(|(_, r)| r.hours).sum();
    println!(
        "\nShowing {} of {} records ({})",
        rows.len(),
        records.len(),
        format_hours(shown_total)
    );
}

/// Rows matching the date filter, keeping their 1-based position in the
/// full table. `limit` 0 means no limit; otherwise the most recent rows
/// (by position) are kept.
pub fn select_rows(
    records: &[ActivityRecord],
    limit: usize,
    date: Option<NaiveDate>,
) -> Vec<(usize, &ActivityRecord)> {
    let matching: Vec<(usize, &ActivityRecord)> = records
        .iter()
        .enumerate()
        .map(|(i, r)| (i + 1, r))
        .filter(|(_, r)| date.map_or(true, |d| r.date == d))
        .collect();

    if limit == 0 || matching.len() <= limit {
        matching
    } else {
        matching[matching.len() - limit..].to_vec()
    }
}

/// Print the KPIs, the category distribution and the daily totals
pub fn handle_summary_command(summary: &Summary) {
    if summary.is_empty() {
        println!("👋 Welcome! Use 'lifetracker add' to log your first activity.");
        return;
    }

    for line in render_summary(summary) {
        println!("{}", line);
    }
}

/// Text lines of the summary report
pub fn render_summary(summary: &Summary) -> Vec<String> {
    let mut lines = Vec::new();

    lines.push("=== Key Figures ===".to_string());
    lines.push(format!("Total hours logged: {}", format_hours(summary.total_hours)));
    lines.push(format!(
        "Main focus:         {}",
        summary
            .most_frequent_category
            .as_ref()
            .map(|c| c.label().to_string())
            .unwrap_or_else(|| "N/A".to_string())
    ));
    lines.push(format!(
        "Daily average:      {}",
        summary
            .average_daily_hours
            .map(format_hours)
            .unwrap_or_else(|| "N/A".to_string())
    ));
    lines.push(format!(
        "Records / days:     {} / {}",
        summary.record_count,
        summary.day_count()
    ));

    lines.push(String::new());
    lines.push("=== Time Distribution ===".to_string());
    let max_category = summary
        .by_category
        .iter()
        .map(|(_, h)| *h)
        .fold(0.0, f64::max);
    for (category, hours) in &summary.by_category {
        lines.push(format!(
            "{} {} {} ({})",
            pad_right(&truncate_string(category.label(), CATEGORY_WIDTH), CATEGORY_WIDTH),
            pad_right(&create_bar(*hours, max_category, BAR_WIDTH), BAR_WIDTH),
            format_hours(*hours),
            format_percentage(*hours, summary.total_hours)
        ));
    }

    lines.push(String::new());
    lines.push("=== Daily Evolution (full bar = 24h limit) ===".to_string());
    let max_day = summary
        .by_date
        .iter()
        .map(|(_, h)| *h)
        .fold(DAILY_LIMIT_HOURS, f64::max);
    for (date, hours) in &summary.by_date {
        let marker = if summary.is_over_limit(*date) {
            "  ⚠ over 24h"
        } else {
            ""
        };
        lines.push(format!(
            "{} {} {}{}",
            utils::format_date(*date),
            pad_right(&create_bar(*hours, max_day, BAR_WIDTH), BAR_WIDTH),
            format_hours(*hours),
            marker
        ));
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Category;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    fn sample() -> Vec<ActivityRecord> {
        vec![
            ActivityRecord::new(date(1), Category::Work, 3.0),
            ActivityRecord::new(date(1), Category::Sleep, 8.0),
            ActivityRecord::new(date(2), Category::Work, 2.0),
        ]
    }

    #[test]
    fn test_select_rows_keeps_positions() {
        let records = sample();
        let rows = select_rows(&records, 0, Some(date(1)));
        assert_eq!(rows.iter().map(|(i, _)| *i).collect::<Vec<_>>(), vec![1, 2]);

        let rows = select_rows(&records, 2, None);
        assert_eq!(rows.iter().map(|(i, _)| *i).collect::<Vec<_>>(), vec![2, 3]);

        assert!(select_rows(&records, 0, Some(date(9))).is_empty());
    }

    #[test]
    fn test_render_summary_kpis() {
        let lines = render_summary(&Summary::compute(&sample()));
        assert!(lines.contains(&"Total hours logged: 13.0 h".to_string()));
        assert!(lines.contains(&"Main focus:         Trabajo".to_string()));
        assert!(lines.contains(&"Daily average:      6.5 h".to_string()));
        assert!(lines.iter().any(|l| l.starts_with("2024-01-01") && l.contains("11.0 h")));
        assert!(!lines.iter().any(|l| l.contains("over 24h")));
    }

    #[test]
    fn test_render_summary_flags_long_days() {
        let mut records = sample();
        records.push(ActivityRecord::new(date(2), Category::Leisure, 23.0));
        let lines = render_summary(&Summary::compute(&records));
        assert!(lines
            .iter()
            .any(|l| l.starts_with("2024-01-02") && l.contains("over 24h")));
    }
}

// Made with Bob
