use std::path::Path;

use calamine::{open_workbook_auto, Data, Reader};

use crate::error::Error;
use crate::tabular::{Rows, Sheet, TabularValue};

/// Sheet names of a workbook in workbook order, without reading any cells.
pub fn read_sheet_names(path: impl AsRef<Path>) -> Result<Vec<String>, Error> {
    let path = path.as_ref();
    let workbook = open_workbook_auto(path).map_err(|source| Error::Open {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(workbook.sheet_names())
}

/// Read every sheet of a workbook as text, in workbook order.
///
/// Cells are rendered as their display text. A sheet whose data starts below
/// the first row or right of the first column is padded so that cell
/// positions match the spreadsheet. Trailing blank cells of a row are
/// dropped.
pub fn read_workbook(path: impl AsRef<Path>) -> Result<TabularValue, Error> {
    let path = path.as_ref();
    let mut workbook = open_workbook_auto(path).map_err(|source| Error::Open {
        path: path.to_path_buf(),
        source,
    })?;

    let mut value = TabularValue::new();
    for name in workbook.sheet_names() {
        let range = workbook
            .worksheet_range(&name)
            .map_err(|source| Error::Sheet {
                path: path.to_path_buf(),
                name: name.clone(),
                source,
            })?;

        let (first_row, first_col) = range.start().unwrap_or((0, 0));
        let mut rows: Rows = vec![Vec::new(); first_row as usize];
        for cells in range.rows() {
            let mut row = vec![String::new(); first_col as usize];
            let used = cells
                .iter()
                .rposition(|cell| !matches!(cell, Data::Empty))
                .map_or(0, |last| last + 1);
            row.extend(cells[..used].iter().map(|cell| cell.to_string()));
            if row.iter().all(String::is_empty) {
                row.clear();
            }
            rows.push(row);
        }

        tracing::debug!(sheet = %name, rows = rows.len(), "read sheet");
        value.insert(Sheet::new(name, rows));
    }

    Ok(value)
}
