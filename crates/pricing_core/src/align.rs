use std::collections::{HashMap, HashSet};

use crate::{ProductCode, ResultTable, CODE_COLUMN};

/// Picks the code column of a product table: the first header mentioning
/// `JAN` or `CODE` (any case), otherwise the first column.
pub fn find_code_column(columns: &[String]) -> usize {
    columns
        .iter()
        .position(|c| {
            let upper = c.to_ascii_uppercase();
            upper.contains("JAN") || upper.contains("CODE")
        })
        .unwrap_or(0)
}

/// Left-joins `table` onto the ordered code list.
///
/// The result starts with a `code` column followed by the table's remaining
/// columns. Every code yields one row per matching table row, or a single row
/// blank except the key when nothing matches.
pub fn align_to_codes(codes: &[ProductCode], table: &ResultTable) -> ResultTable {
    let key_idx = find_code_column(table.columns());

    let mut columns = vec![CODE_COLUMN.to_string()];
    columns.extend(
        table
            .columns()
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != key_idx)
            .map(|(_, c)| c.clone()),
    );

    let mut by_code: HashMap<ProductCode, Vec<&Vec<String>>> = HashMap::new();
    for row in table.rows() {
        if let Some(code) = row.get(key_idx).and_then(|cell| ProductCode::parse(cell)) {
            by_code.entry(code).or_default().push(row);
        }
    }

    let mut aligned = ResultTable::new(columns);
    for code in codes {
        match by_code.get(code) {
            Some(matches) => {
                for row in matches {
                    let mut out = vec![code.to_string()];
                    out.extend(
                        row.iter()
                            .enumerate()
                            .filter(|(i, _)| *i != key_idx)
                            .map(|(_, cell)| cell.clone()),
                    );
                    aligned.push_row(out);
                }
            }
            None => aligned.push_row(vec![code.to_string()]),
        }
    }
    aligned
}

/// Drops rows whose first cell repeats an earlier one. Returns the kept rows
/// and how many were removed.
pub fn dedupe_by_key(table: &ResultTable) -> (ResultTable, usize) {
    let mut seen = HashSet::new();
    let mut kept = table.empty_like();
    let mut removed = 0;
    for row in table.rows() {
        let key = row.first().map(|cell| cell.trim()).unwrap_or("");
        if seen.insert(key.to_string()) {
            kept.push_row(row.clone());
        } else {
            removed += 1;
        }
    }
    (kept, removed)
}
