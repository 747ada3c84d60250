//! # hostlib-xlsx
//!
//! Spreadsheet workbooks as plain text tables.
//!
//! A workbook is read into a [`TabularValue`], an ordered list of named
//! sheets whose rows are arrays of cell strings, and written back the same
//! way. Formatting, formulas and cell types are not carried.
//!
//! ```rust,no_run
//! use hostlib_xlsx::{read_workbook, write_workbook, TabularValue};
//!
//! let value = TabularValue::new().with_sheet(
//!     "Sheet1",
//!     vec![vec!["name".into(), "qty".into()], vec!["apple".into(), "3".into()]],
//! );
//! let report = write_workbook("fruit.xlsx", &value)?;
//! assert!(report.is_complete());
//!
//! let back = read_workbook("fruit.xlsx")?;
//! assert_eq!(back.sheet_names(), vec!["Sheet1"]);
//! # Ok::<(), hostlib_xlsx::Error>(())
//! ```

mod error;
mod reader;
pub mod tabular;
mod writer;

pub use error::Error;
pub use reader::{read_sheet_names, read_workbook};
pub use tabular::{Rows, Sheet, TabularValue};
pub use writer::{write_workbook, SkippedSheet, WriteReport};
