//! # hostlib-vm
//!
//! An embedded [Rhai](https://rhai.rs) engine with host capabilities.
//!
//! A [`ScriptVm`] keeps variables and function definitions across
//! evaluations, so a shell can feed it one unit at a time. [`install`] adds
//! the global objects scripts talk to the host through:
//!
//! - `os`: files, directories, environment, arguments and exit
//! - `http`: blocking GET and POST
//! - `xlsx`: workbooks as maps of sheet name to rows of strings
//! - `Workbook`: a script-side wrapper over `xlsx`
//!
//! ```rust
//! use hostlib_help::CapabilityRegistry;
//! use hostlib_sys::proc::Args;
//! use hostlib_vm::{install, ScriptVm};
//!
//! let mut vm = ScriptVm::new();
//! let mut registry = CapabilityRegistry::new();
//! install(&mut vm, &mut registry, Args::default()).unwrap();
//!
//! let value = vm.run(r#"os.getEnv("HOSTLIB_DOC_UNSET")"#, "command 1").unwrap();
//! assert_eq!(value.into_string().unwrap(), "");
//! ```

pub mod capabilities;
mod error;
mod vm;

pub use capabilities::{error_object, install, is_error_object};
pub use error::ScriptError;
pub use vm::ScriptVm;
