//! Host capabilities exposed to scripts as the global objects `os`, `http`
//! and `xlsx`, plus the script-side `Workbook` wrapper.
//!
//! Each capability module registers its functions on the engine and its help
//! entries in the registry. Failures never raise script exceptions; they are
//! logged and returned as an error object:
//!
//! ```text
//! #{status: "error", error: "os.readFile(\"missing.txt\"), open missing.txt: ..."}
//! ```

pub mod http;
pub mod os;
pub mod xlsx;

use hostlib_help::CapabilityRegistry;
use hostlib_sys::proc::Args;
use rhai::{Dynamic, Map};

use crate::error::ScriptError;
use crate::vm::ScriptVm;

/// Build the error object scripts receive, logging `message` as well.
pub fn error_object(message: impl Into<String>) -> Dynamic {
    let message = message.into();
    tracing::error!("{}", message);

    let mut map = Map::new();
    map.insert("status".into(), Dynamic::from("error".to_string()));
    map.insert("error".into(), Dynamic::from(message));
    Dynamic::from_map(map)
}

/// True for values shaped like [`error_object`] output.
pub fn is_error_object(value: &Dynamic) -> bool {
    value
        .read_lock::<Map>()
        .and_then(|map| map.get("status").map(|status| status.to_string() == "error"))
        .unwrap_or(false)
}

/// Install every capability, document it, and bind the default `Workbook`.
pub fn install(
    vm: &mut ScriptVm,
    registry: &mut CapabilityRegistry,
    args: Args,
) -> Result<(), ScriptError> {
    os::install(vm, registry, args);
    http::install(vm, registry);
    xlsx::install(vm, registry)?;
    tracing::debug!(entries = registry.len(), "capabilities installed");
    Ok(())
}

/// Register a table of `(function, params, description)` under `object`.
pub(crate) fn document(
    registry: &mut CapabilityRegistry,
    object: &str,
    entries: &[(&str, &[&str], &str)],
) {
    for (function, params, description) in entries {
        registry.register(object, function, params, description);
    }
}
