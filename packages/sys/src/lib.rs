//! # hostlib-sys
//!
//! OS primitives for script hosts.
//!
//! Every operation here is a plain blocking call that returns a
//! [`Result`]. The script runtime turns failures into guest-visible error
//! objects; this crate knows nothing about scripts.
//!
//! ## Layout
//!
//! ```text
//! env     # environment variables
//! fs      # files and directories
//! proc    # process arguments and exit
//! ```
//!
//! ## Example
//!
//! ```rust,no_run
//! use hostlib_sys::fs;
//!
//! fs::write_file("notes.txt", "hello")?;
//! assert_eq!(fs::read_file("notes.txt")?, "hello");
//!
//! // Refuses to remove a directory, without failing.
//! assert!(!fs::remove(".")?);
//! # Ok::<(), hostlib_sys::Error>(())
//! ```

pub mod env;
pub mod error;
pub mod fs;
pub mod proc;

pub use error::{Error, Result};
