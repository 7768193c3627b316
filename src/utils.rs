use chrono::{DateTime, Local, NaiveDate, NaiveDateTime};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::error::ValidationError;

/// Utility functions for the lifetracker application

// ===== STRING UTILITIES =====

/// Truncates a string to a maximum display width, adding "..." if truncated
pub fn truncate_string(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    if max_width <= 3 {
        return "...".to_string();
    }

    let mut out = String::new();
    let mut width = 0;
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if width + w > max_width - 3 {
            break;
        }
        width += w;
        out.push(c);
    }
    out.push_str("...");
    out
}

/// Pads a string with spaces to the given display width
pub fn pad_right(s: &str, width: usize) -> String {
    let current = s.width();
    if current >= width {
        s.to_string()
    } else {
        format!("{}{}", s, " ".repeat(width - current))
    }
}

// ===== DATE/TIME UTILITIES =====

const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%Y.%m.%d", "%Y/%m/%d"];

const DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
];

/// Today's date in local time
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Parses a date typed by the user (YYYY-MM-DD, YYYY.MM.DD or YYYY/MM/DD)
pub fn parse_date(date_str: &str) -> Result<NaiveDate, ValidationError> {
    let trimmed = date_str.trim();
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(trimmed, format).ok())
        .ok_or_else(|| ValidationError::InvalidDateFormat(date_str.to_string()))
}

/// Parses a date read from the store, dropping any time-of-day component.
///
/// Accepts everything [`parse_date`] does plus `YYYY-MM-DD HH:MM:SS`,
/// the `T`-separated variant and RFC 3339 timestamps.
pub fn parse_stored_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if let Ok(date) = parse_date(trimmed) {
        return Some(date);
    }
    if let Some(datetime) = DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(trimmed, format).ok())
    {
        return Some(datetime.date());
    }
    DateTime::parse_from_rfc3339(trimmed)
        .ok()
        .map(|dt| dt.date_naive())
}

/// Validates a date string in multiple formats (YYYY-MM-DD, YYYY.MM.DD, YYYY/MM/DD)
pub fn validate_date(date_str: &str) -> Result<(), ValidationError> {
    parse_date(date_str).map(|_| ())
}

/// Normalizes a date string to YYYY-MM-DD format
pub fn normalize_date(date_str: &str) -> String {
    match parse_date(date_str) {
        Ok(date) => format_date(date),
        // Only reachable when validate_date was skipped
        Err(_) => date_str.to_string(),
    }
}

/// Formats a date the way the store writes it
pub fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

// ===== FORMATTING UTILITIES =====

/// Formats a number of hours for KPIs and tables ("13.0 h")
pub fn format_hours(hours: f64) -> String {
    format!("{:.1} h", hours)
}

/// Creates a horizontal bar proportional to `value / max`
pub fn create_bar(value: f64, max: f64, width: usize) -> String {
    if max <= 0.0 || value <= 0.0 {
        return String::new();
    }
    let ratio = (value / max).min(1.0);
    let filled = (ratio * width as f64).round() as usize;
    "█".repeat(filled)
}

/// Formats a percentage value
pub fn format_percentage(value: f64, total: f64) -> String {
    if total == 0.0 {
        "0.0%".to_string()
    } else {
        format!("{:.1}%", (value / total) * 100.0)
    }
}

// ===== VALIDATION UTILITIES =====

/// Largest number of hours a single record may carry
pub const MAX_HOURS: f64 = 24.0;

/// Validates that hours lie in (0, 24]
pub fn validate_hours(hours: f64) -> Result<(), ValidationError> {
    if hours.is_finite() && hours > 0.0 && hours <= MAX_HOURS {
        Ok(())
    } else {
        Err(ValidationError::InvalidHours(hours))
    }
}

/// Parses and validates an hours value typed by the user
pub fn parse_hours(input: &str) -> Result<f64, ValidationError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::MissingField("hours".to_string()));
    }
    let hours: f64 = trimmed
        .replace(',', ".")
        .parse()
        .map_err(|_| ValidationError::HoursNotANumber(trimmed.to_string()))?;
    validate_hours(hours)?;
    Ok(hours)
}
