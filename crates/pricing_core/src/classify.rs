//! Partitioning of result rows into success / failure / not-found.
//!
//! Precedence, highest first:
//! - every cell except the key is blank: failure;
//! - note carries the not-found marker: not found, whatever the price says;
//! - price parses as a finite number: success;
//! - anything else: failure.

use crate::{ResultRecord, ResultTable, TableError, NOTE_COLUMN, NOT_FOUND_NOTE, PRICE_COLUMN};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Bucket {
    Success,
    Failure,
    NotFound,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ClassificationSet {
    /// Every input row, unchanged and in input order.
    pub master: ResultTable,
    pub success: ResultTable,
    pub failure: ResultTable,
    pub not_found: ResultTable,
}

impl ClassificationSet {
    pub fn bucket(&self, bucket: Bucket) -> &ResultTable {
        match bucket {
            Bucket::Success => &self.success,
            Bucket::Failure => &self.failure,
            Bucket::NotFound => &self.not_found,
        }
    }
}

pub fn bucket_for(row: &[String], price_idx: usize, note_idx: usize) -> Bucket {
    if is_blank_except_key(row) {
        return Bucket::Failure;
    }
    let note = row.get(note_idx).map(String::as_str).unwrap_or("");
    if note.contains(NOT_FOUND_NOTE) {
        return Bucket::NotFound;
    }
    let price = row.get(price_idx).map(String::as_str).unwrap_or("");
    if parses_as_number(price) {
        Bucket::Success
    } else {
        Bucket::Failure
    }
}

/// Classifies freshly fetched records (standard four-column layout).
pub fn classify(records: &[ResultRecord]) -> ClassificationSet {
    let table = ResultTable::from_records(records);
    // The standard layout always has both columns.
    partition(table, 1, 3)
}

/// Classifies an arbitrary table carrying `price` and `note` columns.
pub fn classify_table(table: &ResultTable) -> Result<ClassificationSet, TableError> {
    if table.columns().is_empty() {
        return Err(TableError::NoColumns);
    }
    let price_idx = table.require_column(PRICE_COLUMN)?;
    let note_idx = table.require_column(NOTE_COLUMN)?;
    Ok(partition(table.clone(), price_idx, note_idx))
}

fn partition(master: ResultTable, price_idx: usize, note_idx: usize) -> ClassificationSet {
    let mut success = master.empty_like();
    let mut failure = master.empty_like();
    let mut not_found = master.empty_like();

    for row in master.rows() {
        let target = match bucket_for(row, price_idx, note_idx) {
            Bucket::Success => &mut success,
            Bucket::Failure => &mut failure,
            Bucket::NotFound => &mut not_found,
        };
        target.push_row(row.clone());
    }

    ClassificationSet {
        master,
        success,
        failure,
        not_found,
    }
}

fn is_blank_except_key(row: &[String]) -> bool {
    row.iter().skip(1).all(|cell| cell.trim().is_empty())
}

fn parses_as_number(text: &str) -> bool {
    text.trim()
        .parse::<f64>()
        .map(f64::is_finite)
        .unwrap_or(false)
}
