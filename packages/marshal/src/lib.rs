//! # hostlib-marshal
//!
//! Moves data between script values and host records.
//!
//! Every conversion goes through one canonical tree, `serde_json::Value`
//! (null, bool, number, string, array, string-keyed map):
//!
//! ```text
//! script value --export--> tree --encode--> JSON bytes --decode--> host record
//! host record  --serialize--> tree --import--> script value
//! ```
//!
//! Routing through the encoding means any `Deserialize` type can be filled
//! from a script value without a per-type converter. The price is that only
//! shapes the encoding can hold survive: no cycles, no functions, no
//! non-finite floats.

pub mod convert;
pub mod error;

pub use convert::{export, from_struct, import, to_struct};
pub use error::{MarshalError, Stage};
