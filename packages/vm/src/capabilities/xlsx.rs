//! The `xlsx` object and the script-side `Workbook` wrapper.
//!
//! Workbooks cross into the guest as maps from sheet name to rows of cell
//! strings. Reads are synthesized as a map literal and evaluated by the
//! engine, so the guest receives ordinary script values it owns outright.

use hostlib_help::CapabilityRegistry;
use hostlib_xlsx::{read_sheet_names, read_workbook, write_workbook, TabularValue};
use rhai::{Array, Dynamic, NativeCallContext};

use super::{document, error_object};
use crate::error::ScriptError;
use crate::vm::ScriptVm;

#[derive(Debug, Clone, Copy, Default)]
pub struct XlsxObject;

const HELP: &[(&str, &[&str], &str)] = &[
    (
        "read",
        &["filename string"],
        "Reads a workbook and returns a map of sheet name to rows, each row an array of cell strings.",
    ),
    (
        "write",
        &["filename string", "sheets object", "order []string"],
        "Writes a map of sheet name to rows as a workbook. Sheets named in the optional order come first, the rest follow alphabetically. Sheets that can't be written are logged and skipped.",
    ),
    (
        "sheetNames",
        &["filename string"],
        "Returns the sheet names of a workbook in file order. Maps list their keys alphabetically, so read() alone loses it.",
    ),
    (
        "New",
        &["data object"],
        "Returns a Workbook wrapper around data, or around an empty workbook. Passing another wrapper copies its data.",
    ),
];

const WORKBOOK_HELP: &[(&str, &[&str], &str)] = &[
    ("read", &["filename string"], "Replaces the wrapped data with the workbook read from filename. Returns false if the read failed."),
    ("write", &["filename string"], "Writes the wrapped data to filename."),
    ("getSheetNames", &[], "Returns the sheet names in file order, with added sheets last."),
    ("getSheet", &["name string"], "Returns the rows of the named sheet."),
    ("setSheet", &["name string", "rows [][]string"], "Sets the rows of the named sheet, adding it if needed."),
    ("getSheetNo", &["sheetNo int"], "Returns the rows of the sheet at position sheetNo in getSheetNames()."),
    (
        "setSheetNo",
        &["sheetNo int", "rows [][]string"],
        "Sets the rows of the sheet at position sheetNo. Out of range positions add a sheet named \"Untitled Sheet <sheetNo>\".",
    ),
    ("valueOf", &[], "Returns the wrapped data."),
    ("toString", &[], "Returns the wrapped data as JSON, sheets in getSheetNames() order."),
];

const WORKBOOK_SOURCE: &str = include_str!("workbook.rhai");

pub fn install(vm: &mut ScriptVm, registry: &mut CapabilityRegistry) -> Result<(), ScriptError> {
    let engine = vm.engine_mut();
    engine.register_type_with_name::<XlsxObject>("XlsxObject");

    engine.register_fn(
        "read",
        |ctx: NativeCallContext, _: XlsxObject, path: &str| -> Dynamic {
            let value = match read_workbook(path) {
                Ok(value) => value,
                Err(e) => return error_object(format!("xlsx.read({:?}), {}", path, e)),
            };
            match ctx.engine().eval_expression::<Dynamic>(&render_literal(&value)) {
                Ok(sheets) => sheets,
                Err(e) => error_object(format!("xlsx.read({:?}), {}", path, e)),
            }
        },
    );
    engine.register_fn("read", |_: XlsxObject| -> Dynamic {
        error_object("xlsx.read(), a filename is required")
    });

    engine.register_fn("write", |_: XlsxObject, path: &str, sheets: Dynamic| -> Dynamic {
        write_sheets(path, &sheets, None)
    });
    engine.register_fn(
        "write",
        |_: XlsxObject, path: &str, sheets: Dynamic, order: Dynamic| -> Dynamic {
            write_sheets(path, &sheets, Some(&order))
        },
    );
    engine.register_fn("write", |_: XlsxObject, path: &str| -> Dynamic {
        error_object(format!("xlsx.write({:?}), sheets are required", path))
    });

    engine.register_fn("sheetNames", |_: XlsxObject, path: &str| -> Dynamic {
        match read_sheet_names(path) {
            Ok(names) => Dynamic::from_array(names.into_iter().map(Dynamic::from).collect::<Array>()),
            Err(e) => error_object(format!("xlsx.sheetNames({:?}), {}", path, e)),
        }
    });

    engine.register_fn("toJson", |_: XlsxObject, value: Dynamic| -> Dynamic {
        let json = hostlib_marshal::export(&value)
            .map_err(|e| e.to_string())
            .and_then(|tree| serde_json::to_string(&tree).map_err(|e| e.to_string()));
        match json {
            Ok(json) => Dynamic::from(json),
            Err(e) => error_object(format!("xlsx.toJson(), {}", e)),
        }
    });
    engine.register_fn("toJson", |_: XlsxObject, value: Dynamic, order: Dynamic| -> Dynamic {
        let json = ordered(&value, Some(&order))
            .and_then(|sheets| serde_json::to_string(&sheets).map_err(|e| e.to_string()));
        match json {
            Ok(json) => Dynamic::from(json),
            Err(e) => error_object(format!("xlsx.toJson(), {}", e)),
        }
    });

    vm.set_global("xlsx", XlsxObject);
    document(registry, "xlsx", HELP);
    document(registry, "Workbook", WORKBOOK_HELP);

    vm.run(WORKBOOK_SOURCE, "workbook").map(drop)
}

/// Convert a guest sheet map to a [`TabularValue`], putting the sheets named
/// in `order` first.
fn ordered(sheets: &Dynamic, order: Option<&Dynamic>) -> Result<TabularValue, String> {
    let mut value: TabularValue = hostlib_marshal::to_struct(sheets).map_err(|e| e.to_string())?;
    if let Some(order) = order {
        let names: Vec<String> = hostlib_marshal::to_struct(order).map_err(|e| e.to_string())?;
        value.order_by(&names);
    }
    Ok(value)
}

fn write_sheets(path: &str, sheets: &Dynamic, order: Option<&Dynamic>) -> Dynamic {
    let value = match ordered(sheets, order) {
        Ok(value) => value,
        Err(e) => return error_object(format!("xlsx.write({:?}), {}", path, e)),
    };
    match write_workbook(path, &value) {
        Ok(report) => {
            tracing::debug!(
                path,
                written = report.written.len(),
                skipped = report.skipped.len(),
                "workbook written"
            );
            Dynamic::TRUE
        }
        Err(e) => error_object(format!("xlsx.write({:?}), {}", path, e)),
    }
}

/// Render `value` as a script map literal, e.g.
/// `#{"Sheet1": [["a", "b"], []]}`.
pub fn render_literal(value: &TabularValue) -> String {
    let mut out = String::from("#{");
    for (i, sheet) in value.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        push_quoted(&mut out, &sheet.name);
        out.push_str(": [");
        for (j, row) in sheet.rows.iter().enumerate() {
            if j > 0 {
                out.push_str(", ");
            }
            out.push('[');
            for (k, cell) in row.iter().enumerate() {
                if k > 0 {
                    out.push_str(", ");
                }
                push_quoted(&mut out, cell);
            }
            out.push(']');
        }
        out.push(']');
    }
    out.push('}');
    out
}

fn push_quoted(out: &mut String, text: &str) {
    out.push('"');
    for c in text.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() && (c as u32) <= 0xFFFF => {
                out.push_str(&format!("\\u{:04X}", c as u32));
            }
            c => out.push(c),
        }
    }
    out.push('"');
}
