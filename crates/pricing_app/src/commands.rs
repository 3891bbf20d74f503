use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::Local;
use pricing_core::{align_to_codes, classify, classify_table, dedupe_by_key, normalize_codes};
use pricing_engine::{
    ensure_output_dir, read_codes, read_table, write_classification, AtomicFileWriter,
    BatchHandle, BatchRunner, ExportSummary, HttpPriceResolver, RunHooks,
};
use pricing_logging::price_info;

use crate::config::AppConfig;
use crate::error::AppError;
use crate::progress::ProgressReporter;
use crate::shutdown;

pub struct FetchReport {
    pub summary: ExportSummary,
    pub cancelled: bool,
}

/// Logs session boundaries; where a platform keep-awake call would hook in.
struct SessionHooks;

impl RunHooks for SessionHooks {
    fn on_run_start(&self) {
        price_info!("Run started at {}", Local::now().to_rfc3339());
    }

    fn on_run_end(&self) {
        price_info!("Run ended at {}", Local::now().to_rfc3339());
    }
}

pub fn fetch(
    input: &Path,
    api_key: String,
    config: &AppConfig,
    output_dir: &Path,
) -> Result<FetchReport, AppError> {
    let raw_codes = read_codes(input)?;
    price_info!("Read {} rows from {:?}", raw_codes.len(), input);

    let folder = output_dir.join(format!(
        "results_{}",
        Local::now().format("%Y%m%d_%H%M%S")
    ));
    ensure_output_dir(&folder)?;

    let resolver = Arc::new(HttpPriceResolver::new(config.resolver_settings(api_key))?);
    let runner = BatchRunner::new(config.retry_policy(), config.run_settings());
    let handle = BatchHandle::spawn(raw_codes, resolver, runner, Arc::new(SessionHooks))?;
    shutdown::cancel_on_ctrl_c(handle.context());

    let mut reporter = ProgressReporter::new(folder.clone());
    while let Some(event) = handle.recv() {
        reporter.handle(&event);
    }
    let state = handle.join()?;

    let set = classify(&state.records);
    let summary = write_classification(&folder, &set)?;
    Ok(FetchReport {
        summary,
        cancelled: state.cancelled,
    })
}

pub fn align(
    codes_path: &Path,
    table_path: &Path,
    output_dir: Option<PathBuf>,
) -> Result<ExportSummary, AppError> {
    let codes = normalize_codes(read_codes(codes_path)?);
    let table = read_table(table_path)?;
    let aligned = align_to_codes(&codes, &table);
    let set = classify_table(&aligned)?;

    let folder = match output_dir {
        Some(dir) => dir,
        None => parent_of(table_path).join("results"),
    };
    Ok(write_classification(&folder, &set)?)
}

pub struct DedupeReport {
    pub before: usize,
    pub after: usize,
    pub output: PathBuf,
}

pub fn dedupe(input: &Path, output: Option<PathBuf>) -> Result<DedupeReport, AppError> {
    let table = read_table(input)?;
    let (kept, _removed) = dedupe_by_key(&table);

    let output = match output {
        Some(path) => path,
        None => {
            let stem = input
                .file_stem()
                .and_then(|s| s.to_str())
                .ok_or_else(|| AppError::InvalidPath(input.display().to_string()))?;
            parent_of(input).join(format!("{stem}_unique.csv"))
        }
    };
    let filename = output
        .file_name()
        .and_then(|s| s.to_str())
        .ok_or_else(|| AppError::InvalidPath(output.display().to_string()))?;

    let writer = AtomicFileWriter::new(parent_of(&output).to_path_buf());
    let written = writer.write_table(filename, &kept)?;
    Ok(DedupeReport {
        before: table.len(),
        after: kept.len(),
        output: written,
    })
}

fn parent_of(path: &Path) -> &Path {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn align_writes_four_tables_next_to_the_product_table() {
        let temp = tempfile::TempDir::new().unwrap();
        let codes = temp.path().join("codes.csv");
        let table = temp.path().join("products.csv");
        fs::write(&codes, "111\n222\n\n333\n").unwrap();
        fs::write(
            &table,
            "JAN,price,title,note\n111,1200,Tea,\n333,Null,,product not found\n",
        )
        .unwrap();

        let summary = align(&codes, &table, None).unwrap();
        assert_eq!(summary.output_dir, temp.path().join("results"));
        assert_eq!(
            (summary.master, summary.success, summary.failure, summary.not_found),
            (3, 1, 1, 1)
        );
        let failure = read_table(&temp.path().join("results").join("failure.csv")).unwrap();
        assert_eq!(failure.rows()[0], ["222", "", "", ""]);
    }

    #[test]
    fn align_requires_price_and_note_columns() {
        let temp = tempfile::TempDir::new().unwrap();
        let codes = temp.path().join("codes.csv");
        let table = temp.path().join("products.csv");
        fs::write(&codes, "111\n").unwrap();
        fs::write(&table, "JAN,title\n111,Tea\n").unwrap();

        let err = align(&codes, &table, None).unwrap_err();
        assert!(matches!(err, AppError::Table(_)));
    }

    #[test]
    fn dedupe_defaults_to_unique_suffix() {
        let temp = tempfile::TempDir::new().unwrap();
        let input = temp.path().join("list.csv");
        fs::write(&input, "JAN,name\n1,a\n2,b\n1,c\n").unwrap();

        let report = dedupe(&input, None).unwrap();
        assert_eq!((report.before, report.after), (3, 2));
        assert_eq!(report.output, temp.path().join("list_unique.csv"));
        assert_eq!(
            fs::read_to_string(&report.output).unwrap(),
            "JAN,name\n1,a\n2,b\n"
        );
    }
}
