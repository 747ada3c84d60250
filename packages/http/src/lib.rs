//! # hostlib-http
//!
//! Blocking HTTP client for script hosts.
//!
//! Two operations, `get` and `post`, both returning the response body as
//! text whatever the status code. Failures are split by where they happened:
//! building the request, connecting, or reading the body.
//!
//! ```rust,no_run
//! let response = hostlib_http::post(
//!     "https://example.com/api",
//!     "application/json",
//!     r#"{"name": "test"}"#,
//!     &[],
//! )?;
//! assert!(response.is_success());
//! # Ok::<(), hostlib_http::Error>(())
//! ```

pub mod blocking;
mod error;
pub mod types;

pub use blocking::{get, post, HttpClient};
pub use error::Error;
pub use types::{Header, HttpResponse};
