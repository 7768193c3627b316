//! Session state: the in-memory working copy of the store
//!
//! A `Session` is created from an initial load and then mutated only by
//! appending one record or replacing the whole collection. Every mutation
//! is saved immediately.

use tracing::{info, warn};

use crate::error::{SessionError, StoreError};
use crate::record::ActivityRecord;
use crate::stats::Summary;
use crate::store::CsvStore;

#[derive(Debug)]
pub struct Session {
    store: CsvStore,
    records: Vec<ActivityRecord>,
}

impl Session {
    /// Load the store and start a session.
    ///
    /// A load failure does not abort: the session starts empty and the
    /// error is handed back for display.
    pub fn open(store: CsvStore) -> (Self, Option<StoreError>) {
        let loaded = store.load();
        if let Some(e) = &loaded.error {
            warn!(error = %e, "starting with an empty collection");
        }
        let session = Self {
            store,
            records: loaded.records,
        };
        (session, loaded.error)
    }

    /// Start a session over records that are already in memory
    pub fn with_records(store: CsvStore, records: Vec<ActivityRecord>) -> Self {
        Self { store, records }
    }

    pub fn records(&self) -> &[ActivityRecord] {
        &self.records
    }

    pub fn store(&self) -> &CsvStore {
        &self.store
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn summary(&self) -> Summary {
        Summary::compute(&self.records)
    }

    /// Append one record and save
    pub fn append(&mut self, record: ActivityRecord) -> Result<(), SessionError> {
        info!(%record, "appending record");
        let mut next = self.records.clone();
        next.push(record);
        self.commit(next)
    }

    /// Replace the whole collection (the table editor's apply) and save
    pub fn replace(&mut self, records: Vec<ActivityRecord>) -> Result<(), SessionError> {
        info!(
            before = self.records.len(),
            after = records.len(),
            "replacing collection"
        );
        self.commit(records)
    }

    /// Replace the row at `index` with `record`
    pub fn update_row(&mut self, index: usize, record: ActivityRecord) -> Result<(), SessionError> {
        self.check_row(index)?;
        let mut next = self.records.clone();
        next[index] = record;
        self.replace(next)
    }

    /// Remove the row at `index`, returning it
    pub fn remove_row(&mut self, index: usize) -> Result<ActivityRecord, SessionError> {
        self.check_row(index)?;
        let mut next = self.records.clone();
        let removed = next.remove(index);
        self.replace(next)?;
        Ok(removed)
    }

    fn check_row(&self, index: usize) -> Result<(), SessionError> {
        if index < self.records.len() {
            Ok(())
        } else {
            Err(SessionError::RowOutOfRange {
                row: index + 1,
                len: self.records.len(),
            })
        }
    }

    /// Save `next` and adopt it; the current state is kept if the save fails
    fn commit(&mut self, next: Vec<ActivityRecord>) -> Result<(), SessionError> {
        self.store.save(&next)?;
        self.records = next;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Category;
    use chrono::NaiveDate;
    use std::fs;

    fn record(day: u32, category: Category, hours: f64) -> ActivityRecord {
        ActivityRecord::new(NaiveDate::from_ymd_opt(2024, 1, day).unwrap(), category, hours)
    }

    #[test]
    fn test_open_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let (session, error) = Session::open(CsvStore::new(dir.path().join("data.csv")));
        assert!(error.is_none());
        assert!(session.is_empty());
    }

    #[test]
    fn test_append_persists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.csv");
        let (mut session, _) = Session::open(CsvStore::new(&path));

        session.append(record(1, Category::Work, 3.0)).unwrap();
        session.append(record(2, Category::Gym, 1.0)).unwrap();

        let reloaded = CsvStore::new(&path).try_load().unwrap();
        assert_eq!(reloaded, session.records());
        assert_eq!(session.len(), 2);
    }

    #[test]
    fn test_update_and_remove_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.csv");
        let store = CsvStore::new(&path);
        let mut session = Session::with_records(
            store,
            vec![
                record(1, Category::Work, 3.0),
                record(1, Category::Sleep, 8.0),
                record(2, Category::Work, 2.0),
            ],
        );

        session.update_row(1, record(1, Category::Sleep, 7.5)).unwrap();
        let removed = session.remove_row(0).unwrap();
        assert_eq!(removed, record(1, Category::Work, 3.0));

        let reloaded = CsvStore::new(&path).try_load().unwrap();
        assert_eq!(
            reloaded,
            vec![record(1, Category::Sleep, 7.5), record(2, Category::Work, 2.0)]
        );
    }

    #[test]
    fn test_row_out_of_range() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = Session::with_records(
            CsvStore::new(dir.path().join("data.csv")),
            vec![record(1, Category::Work, 1.0)],
        );
        assert!(matches!(
            session.remove_row(1),
            Err(SessionError::RowOutOfRange { row: 2, len: 1 })
        ));
        assert!(!dir.path().join("data.csv").exists());
    }

    #[test]
    fn test_failed_save_keeps_state() {
        let dir = tempfile::tempdir().unwrap();
        // A directory in place of the file makes the rename fail
        let path = dir.path().join("data.csv");
        fs::create_dir(&path).unwrap();
        fs::write(path.join("keep"), "x").unwrap();

        let mut session =
            Session::with_records(CsvStore::new(&path), vec![record(1, Category::Work, 1.0)]);
        assert!(session.append(record(2, Category::Work, 1.0)).is_err());
        assert_eq!(session.len(), 1);
    }
}
