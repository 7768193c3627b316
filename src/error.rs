//! Custom error types for the lifetracker application
//!
//! This module provides structured error handling using thiserror.
//! Command handlers at the binary edge still return `anyhow::Result`,
//! and these types convert into it through `?`.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the lifetracker application
#[derive(Error, Debug)]
pub enum TrackerError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Store (CSV file) errors
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Session mutation errors
    #[error("Session error: {0}")]
    Session(#[from] SessionError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Logging setup errors
    #[error("Logging error: {0}")]
    Logging(String),
}

/// Configuration-related errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Could not determine the configuration directory")]
    NoConfigDir,

    #[error("Failed to load configuration file: {0}")]
    LoadFailed(String),

    #[error("Failed to save configuration file: {0}")]
    SaveFailed(String),

    #[error("Failed to create config directory: {0}")]
    DirectoryCreationFailed(String),
}

/// Errors raised while reading or writing the CSV store
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to encode records: {0}")]
    Encode(#[source] std::io::Error),

    #[error("Error reading the file at line {line}: {message}")]
    Parse { line: u64, message: String },

    #[error("Missing column '{0}' in header")]
    MissingColumn(&'static str),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Errors raised by session mutations
#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Row {row} does not exist (table has {len} rows)")]
    RowOutOfRange { row: usize, len: usize },

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Validation errors for new or edited records
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Invalid date format: {0}. Expected YYYY-MM-DD, YYYY.MM.DD, or YYYY/MM/DD")]
    InvalidDateFormat(String),

    #[error("Invalid category: {0}")]
    InvalidCategory(String),

    #[error("Invalid hours value: {0}. Must be greater than 0 and at most 24")]
    InvalidHours(f64),

    #[error("Hours must be a valid number: {0}")]
    HoursNotANumber(String),

    #[error("Missing required field: {0}")]
    MissingField(String),
}

/// Result type alias for the lifetracker application
pub type Result<T> = std::result::Result<T, TrackerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = TrackerError::Config(ConfigError::NoConfigDir);
        assert!(err.to_string().contains("configuration directory"));

        let err = TrackerError::Validation(ValidationError::InvalidHours(25.0));
        assert!(err.to_string().contains("Invalid hours value"));
    }

    #[test]
    fn test_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: TrackerError = io_err.into();
        assert!(matches!(err, TrackerError::Io(_)));

        let store_err = StoreError::MissingColumn("Horas");
        let err: TrackerError = SessionError::from(store_err).into();
        assert!(matches!(err, TrackerError::Session(SessionError::Store(_))));
    }

    #[test]
    fn test_parse_error_mentions_line() {
        let err = StoreError::Parse {
            line: 3,
            message: "bad date".to_string(),
        };
        assert_eq!(err.to_string(), "Error reading the file at line 3: bad date");
    }

    #[test]
    fn test_encode_error_display() {
        let err = StoreError::Encode(std::io::Error::new(
            std::io::ErrorKind::WriteZero,
            "buffer full",
        ));
        assert_eq!(err.to_string(), "Failed to encode records: buffer full");
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_validation_errors() {
        let err = ValidationError::InvalidDateFormat("2025-13-01".to_string());
        assert!(err.to_string().contains("Invalid date format"));

        let err = ValidationError::InvalidHours(0.0);
        assert!(err.to_string().contains("at most 24"));
    }
}

// Made with Bob
