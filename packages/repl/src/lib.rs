//! # hostlib-repl
//!
//! An interactive shell for the hostlib script engine.
//!
//! ## Features
//!
//! - Multi-line entry: a command that doesn't compile yet keeps collecting
//!   lines under an `NN: ` prompt until it does, or until `.break`
//! - Functions and variables persist between commands
//! - `.help` backed by the capability registry, which also drives tab
//!   completion
//! - Command history in `$HOME/.<program>_history`
//! - Vi mode support (detected from EDITOR, VISUAL, .inputrc, or
//!   HOSTLIB_EDIT_MODE)
//!
//! ## Usage
//!
//! ```bash
//! # Run the shell
//! hostlib
//!
//! # Inside the shell:
//! > .help os
//! > let rows = xlsx.read("report.xlsx");
//! > fn total(sheet) {
//! 01:     sheet.len()
//! 02: }
//! > total(rows.Sheet1)
//! ```

pub mod commands;
pub mod completer;
pub mod config;
pub mod highlighter;
pub mod history;
pub mod host;
pub mod io;
pub mod repl;
pub mod shell;

pub use config::ShellConfig;
pub use repl::run;

/// Version reported by `-v` and the banner.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
