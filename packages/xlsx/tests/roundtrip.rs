use hostlib_xlsx::{read_sheet_names, read_workbook, write_workbook, Error, Rows, TabularValue};
use tempfile::tempdir;

fn rows(cells: &[&[&str]]) -> Rows {
    cells
        .iter()
        .map(|row| row.iter().map(|c| c.to_string()).collect())
        .collect()
}

#[test]
fn two_sheets_keep_names_and_order() {
    let dir = tempdir().unwrap();
    let first = dir.path().join("first.xlsx");
    let second = dir.path().join("second.xlsx");

    let original = TabularValue::new()
        .with_sheet("Sheet1", rows(&[&["name", "qty"], &["apple", "3"]]))
        .with_sheet("Sheet2", rows(&[&["x"]]));
    write_workbook(&first, &original).unwrap();

    let read_once = read_workbook(&first).unwrap();
    assert_eq!(read_once.sheet_names(), vec!["Sheet1", "Sheet2"]);

    write_workbook(&second, &read_once).unwrap();
    let read_twice = read_workbook(&second).unwrap();

    assert_eq!(read_twice.sheet_names(), vec!["Sheet1", "Sheet2"]);
    assert_eq!(read_twice, original);
}

#[test]
fn sheet_order_is_not_alphabetical() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("order.xlsx");

    let value = TabularValue::new()
        .with_sheet("Zebra", rows(&[&["z"]]))
        .with_sheet("Apple", rows(&[&["a"]]));
    write_workbook(&path, &value).unwrap();

    assert_eq!(read_workbook(&path).unwrap().sheet_names(), vec!["Zebra", "Apple"]);
    assert_eq!(read_sheet_names(&path).unwrap(), vec!["Zebra", "Apple"]);
}

#[test]
fn ragged_rows_and_gaps_survive() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("ragged.xlsx");

    let value = TabularValue::new().with_sheet(
        "Data",
        rows(&[&["a", "b", "c"], &["d"], &["", "", "f"]]),
    );
    write_workbook(&path, &value).unwrap();

    assert_eq!(read_workbook(&path).unwrap(), value);
}

#[test]
fn leading_blank_rows_and_columns_are_padded() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("offset.xlsx");

    let value = TabularValue::new().with_sheet("Offset", rows(&[&[], &["", "b2"]]));
    write_workbook(&path, &value).unwrap();

    let back = read_workbook(&path).unwrap();
    assert_eq!(back.sheet("Offset").unwrap().rows, rows(&[&[], &["", "b2"]]));
}

#[test]
fn invalid_sheet_is_skipped_not_fatal() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("partial.xlsx");

    let value = TabularValue::new()
        .with_sheet("Good", rows(&[&["ok"]]))
        .with_sheet("Bad[name]", rows(&[&["nope"]]))
        .with_sheet("good", rows(&[&["duplicate in Excel's eyes"]]));

    let report = write_workbook(&path, &value).unwrap();
    assert_eq!(report.written, vec!["Good"]);
    assert_eq!(report.skipped.len(), 2);
    assert!(!report.is_complete());

    assert_eq!(read_workbook(&path).unwrap().sheet_names(), vec!["Good"]);
}

#[test]
fn missing_file_is_an_open_error() {
    let dir = tempdir().unwrap();
    let err = read_workbook(dir.path().join("absent.xlsx")).unwrap_err();
    assert!(matches!(err, Error::Open { .. }));

    let err = read_sheet_names(dir.path().join("absent.xlsx")).unwrap_err();
    assert!(matches!(err, Error::Open { .. }));
}

#[test]
fn unwritable_path_is_a_save_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("no_such_dir").join("out.xlsx");

    let value = TabularValue::new().with_sheet("Sheet1", rows(&[&["a"]]));
    let err = write_workbook(&path, &value).unwrap_err();
    assert!(matches!(err, Error::Save { .. }));
}
