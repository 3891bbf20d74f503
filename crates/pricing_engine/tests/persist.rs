use std::fs;

use pricing_core::{ProductCode, ResultRecord, ResultTable};
use pricing_engine::{
    ensure_output_dir, read_codes, read_table, write_interim, AtomicFileWriter, INTERIM_FILE,
};
use tempfile::TempDir;

fn table(rows: &[&[&str]]) -> ResultTable {
    let mut table = ResultTable::standard();
    for row in rows {
        table.push_row(row.iter().map(|c| c.to_string()).collect());
    }
    table
}

#[test]
fn creates_missing_output_dir() {
    let temp = TempDir::new().unwrap();
    let new_dir = temp.path().join("results").join("run");
    assert!(!new_dir.exists());
    ensure_output_dir(&new_dir).unwrap();
    assert!(new_dir.is_dir());
}

#[test]
fn table_write_replaces_existing_file() {
    let temp = TempDir::new().unwrap();
    let writer = AtomicFileWriter::new(temp.path().to_path_buf());

    let first = writer
        .write_table("master.csv", &table(&[&["1", "100", "Tea", ""]]))
        .unwrap();
    let second = writer
        .write_table("master.csv", &table(&[&["2", "Null", "", "product not found"]]))
        .unwrap();
    assert_eq!(first, second);
    assert_eq!(
        fs::read_to_string(&second).unwrap(),
        "code,price,title,note\n2,Null,,product not found\n"
    );
}

#[test]
fn writing_into_a_file_path_fails_cleanly() {
    let temp = TempDir::new().unwrap();
    let file_path = temp.path().join("not_a_dir");
    fs::write(&file_path, "x").unwrap();

    let writer = AtomicFileWriter::new(file_path.clone());
    assert!(writer.write_table("master.csv", &table(&[])).is_err());
    assert!(!file_path.with_file_name("master.csv").exists());
}

#[test]
fn code_list_reads_first_cell_of_each_row() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("codes.csv");
    fs::write(&path, "\u{feff}4901234567894\n 4900000000001 ,extra\nnan\n\n").unwrap();

    let codes = read_codes(&path).unwrap();
    assert_eq!(codes[0], "4901234567894");
    assert_eq!(codes[1], " 4900000000001 ");
    assert_eq!(codes[2], "nan");
}

#[test]
fn missing_input_file_names_the_path() {
    let temp = TempDir::new().unwrap();
    let err = read_codes(&temp.path().join("absent.csv")).unwrap_err();
    assert!(err.to_string().contains("absent.csv"));
}

#[test]
fn interim_snapshot_round_trips_through_read_table() {
    let temp = TempDir::new().unwrap();
    let records = vec![ResultRecord {
        code: ProductCode::parse("123").unwrap(),
        price_minor: Some(990),
        title: "Mug, large".to_string(),
        note: String::new(),
    }];

    let path = write_interim(temp.path(), &records).unwrap();
    assert_eq!(path.file_name().unwrap(), INTERIM_FILE);
    let table = read_table(&path).unwrap();
    assert_eq!(table.rows()[0], ["123", "990", "Mug, large", ""]);
}
