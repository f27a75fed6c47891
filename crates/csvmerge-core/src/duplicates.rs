//! Duplicate value detection over the merged output
//!
//! A read-only reporting pass: nothing here changes the merged data.

use crate::record::Record;
use serde::Serialize;
use std::collections::HashMap;
use tracing::{info, warn};

/// Row number of the first data record; row 1 is the header
const FIRST_DATA_ROW: usize = 2;

/// A value that occurs more than once in a column
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DuplicateEntry {
    pub value: String,
    pub count: usize,
    /// Spreadsheet-style row numbers, ascending
    pub rows: Vec<usize>,
}

/// Duplicates found in one column, most frequent first
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DuplicateReport {
    pub column: String,
    pub entries: Vec<DuplicateEntry>,
}

impl DuplicateReport {
    /// Whether any value repeats in this column
    pub fn has_duplicates(&self) -> bool {
        !self.entries.is_empty()
    }
}

/// Result of a duplicate scan over several columns
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DuplicateScan {
    /// One report per checked column that exists, in request order
    pub reports: Vec<DuplicateReport>,
    /// Requested columns that no record has
    pub skipped: Vec<String>,
}

impl DuplicateScan {
    /// Total number of duplicated values across all columns
    pub fn duplicate_value_count(&self) -> usize {
        self.reports.iter().map(|r| r.entries.len()).sum()
    }
}

/// Find repeated values in each of `columns`.
///
/// Blank and whitespace-only values never count. Values are compared by
/// exact string equality.
pub fn detect(records: &[Record], columns: &[String]) -> DuplicateScan {
    let mut scan = DuplicateScan::default();

    for column in columns {
        if !records.iter().any(|r| r.contains_key(column)) {
            warn!(column = %column, "duplicate check skipped: column not in output");
            scan.skipped.push(column.clone());
            continue;
        }

        let report = detect_column(records, column);
        if report.has_duplicates() {
            info!(
                column = %column,
                values = report.entries.len(),
                "duplicate values found"
            );
        }
        scan.reports.push(report);
    }

    scan
}

fn detect_column(records: &[Record], column: &str) -> DuplicateReport {
    // Groups in first-seen order, with an index for lookup
    let mut groups: Vec<(&str, Vec<usize>)> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for (i, record) in records.iter().enumerate() {
        let Some(value) = record.get(column) else {
            continue;
        };
        if value.trim().is_empty() {
            continue;
        }

        let row = i + FIRST_DATA_ROW;
        match index.get(value) {
            Some(&g) => groups[g].1.push(row),
            None => {
                index.insert(value, groups.len());
                groups.push((value, vec![row]));
            }
        }
    }

    let mut entries: Vec<DuplicateEntry> = groups
        .into_iter()
        .filter(|(_, rows)| rows.len() > 1)
        .map(|(value, rows)| DuplicateEntry {
            value: value.to_string(),
            count: rows.len(),
            rows,
        })
        .collect();

    // Stable, so equal counts keep first-seen order
    entries.sort_by(|a, b| b.count.cmp(&a.count));

    DuplicateReport {
        column: column.to_string(),
        entries,
    }
}
