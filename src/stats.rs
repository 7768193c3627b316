//! Aggregate statistics over the record collection
//!
//! Everything here is a pure function of the records and is recomputed on
//! every view refresh.

use chrono::NaiveDate;
use std::collections::{BTreeMap, HashMap};

use crate::record::{ActivityRecord, Category};

/// Daily total above which a day is flagged in the views
pub const DAILY_LIMIT_HOURS: f64 = 24.0;

/// Sum of all records' hours
pub fn total_hours(records: &[ActivityRecord]) -> f64 {
    records.iter().map(|r| r.hours).sum()
}

/// Mode of the category field.
///
/// Ties go to the lexicographically smallest stored label, so the result is
/// deterministic. `None` for an empty collection.
pub fn most_frequent_category(records: &[ActivityRecord]) -> Option<Category> {
    let mut counts: HashMap<&Category, usize> = HashMap::new();
    for record in records {
        *counts.entry(&record.category).or_insert(0) += 1;
    }

    counts
        .into_iter()
        .max_by(|(a, a_count), (b, b_count)| {
            a_count
                .cmp(b_count)
                // Reversed so the smaller label wins among equals
                .then_with(|| b.label().cmp(a.label()))
        })
        .map(|(category, _)| category.clone())
}

/// Sum of hours per date, in ascending date order
pub fn totals_by_date(records: &[ActivityRecord]) -> BTreeMap<NaiveDate, f64> {
    let mut totals = BTreeMap::new();
    for record in records {
        *totals.entry(record.date).or_insert(0.0) += record.hours;
    }
    totals
}

/// Mean of the per-date sums across all distinct dates
pub fn average_daily_hours(records: &[ActivityRecord]) -> Option<f64> {
    let daily = totals_by_date(records);
    if daily.is_empty() {
        return None;
    }
    Some(daily.values().sum::<f64>() / daily.len() as f64)
}

/// Sum of hours per category, largest first, then by label
pub fn totals_by_category(records: &[ActivityRecord]) -> Vec<(Category, f64)> {
    let mut totals: HashMap<&Category, f64> = HashMap::new();
    for record in records {
        *totals.entry(&record.category).or_insert(0.0) += record.hours;
    }

    let mut totals: Vec<(Category, f64)> = totals
        .into_iter()
        .map(|(category, hours)| (category.clone(), hours))
        .collect();
    totals.sort_by(|a, b| {
        b.1.total_cmp(&a.1)
            .then_with(|| a.0.label().cmp(b.0.label()))
    });
    totals
}

/// Dates whose total exceeds `limit`
pub fn days_over_limit(records: &[ActivityRecord], limit: f64) -> Vec<(NaiveDate, f64)> {
    totals_by_date(records)
        .into_iter()
        .filter(|(_, hours)| *hours > limit)
        .collect()
}

/// Everything the dashboard shows, computed in one pass over the records
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub record_count: usize,
    pub total_hours: f64,
    pub most_frequent_category: Option<Category>,
    pub average_daily_hours: Option<f64>,
    pub by_category: Vec<(Category, f64)>,
    pub by_date: Vec<(NaiveDate, f64)>,
    /// Dates above `DAILY_LIMIT_HOURS`, ascending
    pub over_limit: Vec<(NaiveDate, f64)>,
}

impl Summary {
    pub fn compute(records: &[ActivityRecord]) -> Self {
        Self {
            record_count: records.len(),
            total_hours: total_hours(records),
            most_frequent_category: most_frequent_category(records),
            average_daily_hours: average_daily_hours(records),
            by_category: totals_by_category(records),
            by_date: totals_by_date(records).into_iter().collect(),
            over_limit: days_over_limit(records, DAILY_LIMIT_HOURS),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.record_count == 0
    }

    /// Number of distinct dates with at least one record
    pub fn day_count(&self) -> usize {
        self.by_date.len()
    }

    /// Days whose total exceeds the 24 h reference line
    pub fn days_over_limit(&self) -> &[(NaiveDate, f64)] {
        &self.over_limit
    }

    /// Whether `date` is one of the days over the reference line
    pub fn is_over_limit(&self, date: NaiveDate) -> bool {
        self.over_limit.iter().any(|(d, _)| *d == date)
    }
}
