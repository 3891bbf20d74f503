use pretty_assertions::assert_eq;
use pricing_core::{
    bucket_for, classify, classify_table, Bucket, ClassificationSet, ProductCode, ResultRecord,
    ResultTable, TableError,
};

fn record(code: &str, price: Option<i64>, title: &str, note: &str) -> ResultRecord {
    ResultRecord {
        code: ProductCode::parse(code).unwrap(),
        price_minor: price,
        title: title.to_string(),
        note: note.to_string(),
    }
}

fn row(cells: &[&str]) -> Vec<String> {
    cells.iter().map(|c| c.to_string()).collect()
}

fn keys(table: &ResultTable) -> Vec<String> {
    table.rows().iter().map(|r| r[0].clone()).collect()
}

fn sample() -> Vec<ResultRecord> {
    vec![
        record("4901234567894", Some(1200), "Green tea", ""),
        record("9999999999999", None, "", "product not found"),
        record("4900000000001", None, "Soap", "no price available (2 offers)"),
        record("4900000000002", None, "", "network error: connection reset"),
        record("4900000000003", Some(300), "", ""),
    ]
}

#[test]
fn records_land_in_expected_buckets() {
    let set = classify(&sample());
    assert_eq!(keys(&set.success), vec!["4901234567894", "4900000000003"]);
    assert_eq!(keys(&set.not_found), vec!["9999999999999"]);
    assert_eq!(keys(&set.failure), vec!["4900000000001", "4900000000002"]);
    assert_eq!(set.master.len(), 5);
    assert_eq!(set.master.rows()[1], row(&["9999999999999", "Null", "", "product not found"]));
}

#[test]
fn partitions_cover_master_exactly_once() {
    let set = classify(&sample());
    let mut seen: Vec<String> = [Bucket::Success, Bucket::Failure, Bucket::NotFound]
        .iter()
        .flat_map(|b| keys(set.bucket(*b)))
        .collect();
    seen.sort();
    let mut master = keys(&set.master);
    master.sort();
    assert_eq!(seen, master);
}

#[test]
fn classification_is_idempotent() {
    let first = classify(&sample());
    let second = classify(&sample());
    assert_eq!(first, second);

    let again: ClassificationSet = classify_table(&first.master).unwrap();
    assert_eq!(first, again);
}

#[test]
fn blank_except_key_is_failure_even_if_otherwise_not_found() {
    // Row blank except key.
    assert_eq!(bucket_for(&row(&["1", "", "", ""]), 1, 3), Bucket::Failure);
    // Not-found note wins over a parseable price.
    assert_eq!(
        bucket_for(&row(&["2", "100", "", "product not found"]), 1, 3),
        Bucket::NotFound
    );
}

#[test]
fn table_with_extra_columns_is_classified_by_header() {
    let mut table = ResultTable::new(row(&["code", "shop", "Price", "Note "]));
    table.push_row(row(&["1", "a", "100", ""]));
    table.push_row(row(&["2"]));
    table.push_row(row(&["3", "b", "Null", "product not found"]));

    let set = classify_table(&table).unwrap();
    assert_eq!(keys(&set.success), vec!["1"]);
    assert_eq!(keys(&set.failure), vec!["2"]);
    assert_eq!(keys(&set.not_found), vec!["3"]);
    assert_eq!(set.failure.rows()[0], row(&["2", "", "", ""]));
}

#[test]
fn missing_note_column_is_reported() {
    let table = ResultTable::new(row(&["code", "price"]));
    assert_eq!(
        classify_table(&table).unwrap_err(),
        TableError::MissingColumn("note".to_string())
    );
    assert_eq!(
        classify_table(&ResultTable::default()).unwrap_err(),
        TableError::NoColumns
    );
}
