//! Flat-file CSV store for activity records
//!
//! The whole collection is read on load and the whole file is rewritten on
//! save. There is no locking: when two sessions share a file the last
//! writer wins.

use serde::Deserialize;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info};

use crate::error::StoreError;
use crate::record::{ActivityRecord, Category};
use crate::utils;

/// Column names of the header row
pub const DATE_COLUMN: &str = "Fecha";
pub const CATEGORY_COLUMN: &str = "Categoria";
pub const HOURS_COLUMN: &str = "Horas";

/// Row as it appears in the file, before date normalization
#[derive(Debug, Deserialize)]
struct RawRow {
    #[serde(rename = "Fecha")]
    date: String,
    #[serde(rename = "Categoria")]
    category: String,
    #[serde(rename = "Horas")]
    hours: f64,
}

/// Outcome of a tolerant load: the records, or an empty collection plus the
/// error that caused the file to be ignored
#[derive(Debug)]
pub struct Loaded {
    pub records: Vec<ActivityRecord>,
    pub error: Option<StoreError>,
}

/// CSV file holding every activity record
#[derive(Debug, Clone)]
pub struct CsvStore {
    path: PathBuf,
}

impl CsvStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the store, propagating any read or parse failure.
    ///
    /// A missing or empty file is an empty collection.
    pub fn try_load(&self) -> Result<Vec<ActivityRecord>, StoreError> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "store file does not exist yet");
                return Ok(Vec::new());
            }
            Err(source) => {
                return Err(StoreError::Read {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        let records = decode(&contents)?;
        debug!(path = %self.path.display(), count = records.len(), "loaded records");
        Ok(records)
    }

    /// Load the store, reporting failures instead of propagating them.
    ///
    /// On failure the collection is empty and the file is left untouched.
    pub fn load(&self) -> Loaded {
        match self.try_load() {
            Ok(records) => Loaded {
                records,
                error: None,
            },
            Err(e) => {
                error!(path = %self.path.display(), error = %e, "failed to load store");
                Loaded {
                    records: Vec::new(),
                    error: Some(e),
                }
            }
        }
    }

    /// Overwrite the store with the given collection.
    ///
    /// The data is written to a sibling temp file first and renamed over the
    /// target, so an interrupted save leaves the previous file intact.
    pub fn save(&self, records: &[ActivityRecord]) -> Result<(), StoreError> {
        let bytes = encode(records)?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|source| StoreError::Write {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
        }

        let tmp_path = self.tmp_path();
        fs::write(&tmp_path, &bytes).map_err(|source| StoreError::Write {
            path: tmp_path.clone(),
            source,
        })?;
        fs::rename(&tmp_path, &self.path).map_err(|source| StoreError::Write {
            path: self.path.clone(),
            source,
        })?;

        info!(path = %self.path.display(), count = records.len(), "saved records");
        Ok(())
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

/// Parse the contents of a store file
pub fn decode(contents: &str) -> Result<Vec<ActivityRecord>, StoreError> {
    if contents.trim().is_empty() {
        return Ok(Vec::new());
    }

    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(contents.as_bytes());

    let headers = reader.headers()?.clone();
    for column in [DATE_COLUMN, CATEGORY_COLUMN, HOURS_COLUMN] {
        if !headers.iter().any(|h| h == column) {
            return Err(StoreError::MissingColumn(column));
        }
    }

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row?;
        let line = row.position().map(|p| p.line()).unwrap_or(0);

        let raw: RawRow = row
            .deserialize(Some(&headers))
            .map_err(|e| StoreError::Parse {
                line,
                message: e.to_string(),
            })?;

        let date = utils::parse_stored_date(&raw.date).ok_or_else(|| StoreError::Parse {
            line,
            message: format!("invalid date '{}'", raw.date),
        })?;

        records.push(ActivityRecord::new(
            date,
            Category::from_label(&raw.category),
            raw.hours,
        ));
    }

    Ok(records)
}

/// Serialize a collection to the bytes of a store file.
///
/// The output depends only on the records, so encoding the same
/// collection twice yields identical bytes.
pub fn encode(records: &[ActivityRecord]) -> Result<Vec<u8>, StoreError> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());

    writer.write_record([DATE_COLUMN, CATEGORY_COLUMN, HOURS_COLUMN])?;
    for record in records {
        writer.write_record([
            utils::format_date(record.date),
            record.category.label().to_string(),
            format_hours_field(record.hours),
        ])?;
    }

    writer.into_inner().map_err(|e| {
        StoreError::Encode(std::io::Error::new(e.error().kind(), e.error().to_string()))
    })
}

/// Shortest decimal that reads back to the same value, keeping one decimal
/// place for whole numbers ("3.0")
fn format_hours_field(hours: f64) -> String {
    if hours.is_finite() && hours.fract() == 0.0 && hours.abs() < 1e15 {
        format!("{:.1}", hours)
    } else {
        hours.to_string()
    }
}
