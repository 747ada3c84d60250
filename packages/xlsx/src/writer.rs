use std::collections::HashSet;
use std::path::Path;

use rust_xlsxwriter::{Workbook, Worksheet, XlsxError};

use crate::error::Error;
use crate::tabular::{Sheet, TabularValue};

/// A sheet left out of a written workbook.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedSheet {
    pub name: String,
    pub reason: String,
}

/// What [`write_workbook`] did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WriteReport {
    pub written: Vec<String>,
    pub skipped: Vec<SkippedSheet>,
}

impl WriteReport {
    pub fn is_complete(&self) -> bool {
        self.skipped.is_empty()
    }
}

/// Write `value` to `path` as an xlsx workbook, one worksheet per sheet in
/// order, every cell as a string.
///
/// A sheet that cannot be created (bad or repeated name, too many rows or
/// columns) is logged and skipped; the rest of the workbook is still written.
/// Only failing to save the file is an error. Empty cells are left blank.
pub fn write_workbook(path: impl AsRef<Path>, value: &TabularValue) -> Result<WriteReport, Error> {
    let path = path.as_ref();
    let mut workbook = Workbook::new();
    let mut report = WriteReport::default();
    // Excel compares sheet names case-insensitively.
    let mut seen = HashSet::new();

    for sheet in value {
        let result = if seen.insert(sheet.name.to_lowercase()) {
            build_worksheet(sheet)
        } else {
            Err(XlsxError::SheetnameReused(sheet.name.clone()))
        };

        match result {
            Ok(worksheet) => {
                workbook.push_worksheet(worksheet);
                report.written.push(sheet.name.clone());
            }
            Err(e) => {
                tracing::warn!(
                    path = %path.display(),
                    sheet = %sheet.name,
                    "can't add sheet, {}",
                    e
                );
                report.skipped.push(SkippedSheet {
                    name: sheet.name.clone(),
                    reason: e.to_string(),
                });
            }
        }
    }

    workbook.save(path).map_err(|source| Error::Save {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(report)
}

fn build_worksheet(sheet: &Sheet) -> Result<Worksheet, XlsxError> {
    let mut worksheet = Worksheet::new();
    worksheet.set_name(&sheet.name)?;

    for (r, row) in sheet.rows.iter().enumerate() {
        let r = u32::try_from(r).map_err(|_| XlsxError::RowColumnLimitError)?;
        for (c, cell) in row.iter().enumerate() {
            if cell.is_empty() {
                continue;
            }
            let c = u16::try_from(c).map_err(|_| XlsxError::RowColumnLimitError)?;
            worksheet.write_string(r, c, cell)?;
        }
    }

    Ok(worksheet)
}
