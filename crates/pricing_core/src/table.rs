use thiserror::Error;

use crate::ResultRecord;

pub const CODE_COLUMN: &str = "code";
pub const PRICE_COLUMN: &str = "price";
pub const TITLE_COLUMN: &str = "title";
pub const NOTE_COLUMN: &str = "note";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TableError {
    #[error("required column `{0}` is missing")]
    MissingColumn(String),
    #[error("table has no columns")]
    NoColumns,
}

/// Rectangular text table. The first column is the key (product code).
///
/// Rows are padded or truncated to the header width on insertion.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ResultTable {
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl ResultTable {
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// Standard four-column layout used for freshly fetched results.
    pub fn standard() -> Self {
        Self::new(
            [CODE_COLUMN, PRICE_COLUMN, TITLE_COLUMN, NOTE_COLUMN]
                .iter()
                .map(|c| c.to_string())
                .collect(),
        )
    }

    pub fn from_records(records: &[ResultRecord]) -> Self {
        let mut table = Self::standard();
        for record in records {
            table.push_row(record.to_row());
        }
        table
    }

    /// Same header, no rows.
    pub fn empty_like(&self) -> Self {
        Self::new(self.columns.clone())
    }

    pub fn push_row(&mut self, mut row: Vec<String>) {
        row.resize(self.columns.len(), String::new());
        self.rows.push(row);
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Case-insensitive header lookup, ignoring surrounding whitespace.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns
            .iter()
            .position(|c| c.trim().eq_ignore_ascii_case(name))
    }

    pub fn require_column(&self, name: &str) -> Result<usize, TableError> {
        self.column_index(name)
            .ok_or_else(|| TableError::MissingColumn(name.to_string()))
    }
}
