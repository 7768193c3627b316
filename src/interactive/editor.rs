//! Edit buffer behind the Data tab
//!
//! Changes made in the table are kept in a copy of the records until they
//! are applied with `Session::replace` or discarded.

use crate::record::{ActivityRecord, Category};
use crate::utils;

#[derive(Debug, Clone)]
pub struct TableEditor {
    rows: Vec<ActivityRecord>,
    selected: usize,
    dirty: bool,
}

impl TableEditor {
    pub fn new(records: &[ActivityRecord]) -> Self {
        Self {
            rows: records.to_vec(),
            selected: 0,
            dirty: false,
        }
    }

    /// Throw away pending changes and start over from `records`
    pub fn reset(&mut self, records: &[ActivityRecord]) {
        self.rows = records.to_vec();
        self.selected = self.selected.min(self.rows.len().saturating_sub(1));
        self.dirty = false;
    }

    pub fn rows(&self) -> &[ActivityRecord] {
        &self.rows
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Index of the highlighted row; 0 when the table is empty
    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn selected_record(&self) -> Option<&ActivityRecord> {
        self.rows.get(self.selected)
    }

    pub fn select_next(&mut self) {
        if self.selected + 1 < self.rows.len() {
            self.selected += 1;
        }
    }

    pub fn select_previous(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn select_first(&mut self) {
        self.selected = 0;
    }

    pub fn select_last(&mut self) {
        self.selected = self.rows.len().saturating_sub(1);
    }

    /// Add a row for today (Work, 1 h) at the end and select it
    pub fn insert_row(&mut self) {
        self.push(ActivityRecord::new(utils::today(), Category::Work, 1.0));
    }

    /// Add `record` at the end and select it
    pub fn push(&mut self, record: ActivityRecord) {
        self.rows.push(record);
        self.selected = self.rows.len() - 1;
        self.dirty = true;
    }

    /// Mirror a record that was already saved, keeping the dirty flag
    pub fn push_saved(&mut self, record: ActivityRecord) {
        self.rows.push(record);
    }

    /// Replace the selected row
    pub fn update_selected(&mut self, record: ActivityRecord) -> bool {
        match self.rows.get_mut(self.selected) {
            Some(row) => {
                if *row != record {
                    *row = record;
                    self.dirty = true;
                }
                true
            }
            None => false,
        }
    }

    /// Remove the selected row
    pub fn delete_selected(&mut self) -> Option<ActivityRecord> {
        if self.selected >= self.rows.len() {
            return None;
        }
        let removed = self.rows.remove(self.selected);
        self.selected = self.selected.min(self.rows.len().saturating_sub(1));
        self.dirty = true;
        Some(removed)
    }

    /// Records to hand to `Session::replace`
    pub fn to_records(&self) -> Vec<ActivityRecord> {
        self.rows.clone()
    }

    /// Mark the buffer as matching the store
    pub fn mark_saved(&mut self) {
        self.dirty = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn records() -> Vec<ActivityRecord> {
        vec![
            ActivityRecord::new(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(), Category::Work, 3.0),
            ActivityRecord::new(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(), Category::Sleep, 8.0),
            ActivityRecord::new(NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(), Category::Work, 2.0),
        ]
    }

    #[test]
    fn test_navigation_is_clamped() {
        let mut editor = TableEditor::new(&records());
        editor.select_previous();
        assert_eq!(editor.selected(), 0);
        editor.select_last();
        editor.select_next();
        assert_eq!(editor.selected(), 2);
        editor.select_first();
        assert_eq!(editor.selected(), 0);
        assert!(!editor.is_dirty());
    }

    #[test]
    fn test_delete_selected() {
        let mut editor = TableEditor::new(&records());
        editor.select_last();
        let removed = editor.delete_selected().unwrap();
        assert_eq!(removed.hours, 2.0);
        assert_eq!(editor.selected(), 1);
        assert!(editor.is_dirty());

        editor.delete_selected();
        editor.delete_selected();
        assert!(editor.is_empty());
        assert!(editor.delete_selected().is_none());
        assert!(editor.selected_record().is_none());
    }

    #[test]
    fn test_insert_row_defaults() {
        let mut editor = TableEditor::new(&[]);
        editor.insert_row();
        let row = editor.selected_record().unwrap();
        assert_eq!(row.date, utils::today());
        assert_eq!(row.category, Category::Work);
        assert_eq!(row.hours, 1.0);
        assert!(editor.is_dirty());
    }

    #[test]
    fn test_update_selected_only_dirties_on_change() {
        let mut editor = TableEditor::new(&records());
        let same = editor.selected_record().cloned().unwrap();
        assert!(editor.update_selected(same));
        assert!(!editor.is_dirty());

        let mut changed = records()[0].clone();
        changed.hours = 4.0;
        assert!(editor.update_selected(changed.clone()));
        assert!(editor.is_dirty());
        assert_eq!(editor.to_records()[0], changed);
    }

    #[test]
    fn test_reset_discards_changes() {
        let original = records();
        let mut editor = TableEditor::new(&original);
        editor.select_last();
        editor.delete_selected();
        editor.reset(&original);
        assert_eq!(editor.rows(), original.as_slice());
        assert!(!editor.is_dirty());
        assert_eq!(editor.selected(), 1);
    }

    #[test]
    fn test_push_saved_keeps_dirty_flag() {
        let mut editor = TableEditor::new(&records());
        editor.push_saved(records()[0].clone());
        assert!(!editor.is_dirty());
        assert_eq!(editor.rows().len(), 4);
    }
}
