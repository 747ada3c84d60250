//! # hostlib-help
//!
//! A catalog of the host capabilities exposed to scripts.
//!
//! The same [`CapabilityRegistry`] answers `.help` queries in the shell and
//! seeds the shell's tab completion, so every capability documents itself
//! exactly once, at the point where it is installed.
//!
//! ```rust
//! use hostlib_help::CapabilityRegistry;
//!
//! let mut registry = CapabilityRegistry::new();
//! registry.register("os", "readFile", &["filepath string"], "Reads a file");
//!
//! assert_eq!(registry.terms(), ["os.readFile(filepath string)"]);
//! assert!(registry.lookup("os", "").to_string().contains("os.readFile"));
//! ```

pub mod completion;
pub mod entry;
pub mod meta;
pub mod registry;

pub use completion::CompletionTree;
pub use entry::HelpEntry;
pub use meta::{MetaCommandDoc, META_COMMANDS};
pub use registry::{CapabilityRegistry, Lookup};
