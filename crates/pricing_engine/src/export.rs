use std::fs::File;
use std::path::{Path, PathBuf};

use pricing_core::{ClassificationSet, ResultRecord, ResultTable};
use thiserror::Error;

use crate::persist::{AtomicFileWriter, PersistError};

pub const MASTER_FILE: &str = "master.csv";
pub const SUCCESS_FILE: &str = "success.csv";
pub const FAILURE_FILE: &str = "failure.csv";
pub const NOT_FOUND_FILE: &str = "not_found.csv";
pub const INTERIM_FILE: &str = "interim.csv";

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("cannot open {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("persist error: {0}")]
    Persist(#[from] PersistError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSummary {
    pub output_dir: PathBuf,
    pub master: usize,
    pub success: usize,
    pub failure: usize,
    pub not_found: usize,
}

/// Reads a header-less code list: the first cell of every row, in order.
pub fn read_codes(path: &Path) -> Result<Vec<String>, ExportError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(open(path)?);

    let mut codes = Vec::new();
    for record in reader.records() {
        let record = record?;
        let cell = record.get(0).unwrap_or("");
        codes.push(cell.trim_start_matches('\u{feff}').to_string());
    }
    Ok(codes)
}

/// Reads a CSV table with a header row. Short rows are padded with blanks.
pub fn read_table(path: &Path) -> Result<ResultTable, ExportError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(open(path)?);

    let columns = reader
        .headers()?
        .iter()
        .map(|h| h.trim_start_matches('\u{feff}').to_string())
        .collect();
    let mut table = ResultTable::new(columns);
    for record in reader.records() {
        let record = record?;
        table.push_row(record.iter().map(str::to_string).collect());
    }
    Ok(table)
}

/// Writes the master table and the three partitions into `dir`.
pub fn write_classification(
    dir: &Path,
    set: &ClassificationSet,
) -> Result<ExportSummary, ExportError> {
    let writer = AtomicFileWriter::new(dir.to_path_buf());
    writer.write_table(MASTER_FILE, &set.master)?;
    writer.write_table(SUCCESS_FILE, &set.success)?;
    writer.write_table(FAILURE_FILE, &set.failure)?;
    writer.write_table(NOT_FOUND_FILE, &set.not_found)?;

    Ok(ExportSummary {
        output_dir: dir.to_path_buf(),
        master: set.master.len(),
        success: set.success.len(),
        failure: set.failure.len(),
        not_found: set.not_found.len(),
    })
}

/// Persists an interim snapshot of the records collected so far.
pub fn write_interim(dir: &Path, records: &[ResultRecord]) -> Result<PathBuf, ExportError> {
    let writer = AtomicFileWriter::new(dir.to_path_buf());
    Ok(writer.write_table(INTERIM_FILE, &ResultTable::from_records(records))?)
}

fn open(path: &Path) -> Result<File, ExportError> {
    File::open(path).map_err(|source| ExportError::Open {
        path: path.to_path_buf(),
        source,
    })
}
