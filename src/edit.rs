use anyhow::{anyhow, Result};
use tracing::info;

use crate::record::{ActivityRecord, Category};
use crate::session::Session;
use crate::utils;

/// Change fields of one row (1-based, as shown by `list`) and save the table
pub fn handle_edit_command(
    session: &mut Session,
    row: usize,
    date: Option<String>,
    category: Option<String>,
    hours: Option<f64>,
) -> Result<()> {
    if date.is_none() && category.is_none() && hours.is_none() {
        return Err(anyhow!(
            "Nothing to change. Pass at least one of --date, --category or --hours"
        ));
    }

    let index = row_index(row, session.len())?;
    let current = session.records()[index].clone();
    let updated = apply_changes(&current, date, category, hours)?;

    println!("\n=== Edit Row {} ===", row);
    println!("Before: {}", current);
    println!("After:  {}", updated);

    session.update_row(index, updated)?;
    info!(row, "row updated");
    println!("✅ Table updated");

    Ok(())
}

/// Build the edited record; unchanged fields are kept as they are, even
/// when they hold values the form would reject
pub fn apply_changes(
    current: &ActivityRecord,
    date: Option<String>,
    category: Option<String>,
    hours: Option<f64>,
) -> Result<ActivityRecord> {
    let date = match date {
        Some(d) => utils::parse_date(&d)?,
        None => current.date,
    };
    let category = match category {
        Some(c) => Category::parse_input(&c)?,
        None => current.category.clone(),
    };
    let hours = match hours {
        Some(h) => {
            utils::validate_hours(h)?;
            h
        }
        None => current.hours,
    };
    Ok(ActivityRecord::new(date, category, hours))
}

/// Convert a 1-based row number into an index
pub fn row_index(row: usize, len: usize) -> Result<usize> {
    if row == 0 || row > len {
        return Err(anyhow!(
            "Row {} does not exist. Use 'lifetracker list' to see rows 1-{}",
            row,
            len
        ));
    }
    Ok(row - 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::CsvStore;
    use chrono::NaiveDate;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    #[test]
    fn test_row_index() {
        assert_eq!(row_index(1, 3).unwrap(), 0);
        assert_eq!(row_index(3, 3).unwrap(), 2);
        assert!(row_index(0, 3).is_err());
        assert!(row_index(4, 3).is_err());
        assert!(row_index(1, 0).is_err());
    }

    #[test]
    fn test_apply_changes_keeps_untouched_fields() {
        let current = ActivityRecord::new(date(1), Category::Other("Siesta".to_string()), 30.0);
        let updated = apply_changes(&current, Some("2024-01-05".to_string()), None, None).unwrap();
        assert_eq!(updated.date, date(5));
        assert_eq!(updated.category, Category::Other("Siesta".to_string()));
        assert_eq!(updated.hours, 30.0);

        assert!(apply_changes(&current, None, None, Some(0.0)).is_err());
        assert!(apply_changes(&current, None, Some("nap".to_string()), None).is_err());
    }

    #[test]
    fn test_edit_command_saves() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.csv");
        let mut session = Session::with_records(
            CsvStore::new(&path),
            vec![
                ActivityRecord::new(date(1), Category::Work, 3.0),
                ActivityRecord::new(date(2), Category::Work, 2.0),
            ],
        );

        handle_edit_command(&mut session, 2, None, Some("gym".to_string()), Some(1.0)).unwrap();

        let reloaded = CsvStore::new(&path).try_load().unwrap();
        assert_eq!(reloaded[1], ActivityRecord::new(date(2), Category::Gym, 1.0));
        assert_eq!(reloaded[0], ActivityRecord::new(date(1), Category::Work, 3.0));
    }

    #[test]
    fn test_edit_command_requires_a_change() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = Session::with_records(
            CsvStore::new(dir.path().join("data.csv")),
            vec![ActivityRecord::new(date(1), Category::Work, 3.0)],
        );
        assert!(handle_edit_command(&mut session, 1, None, None, None).is_err());
    }
}
