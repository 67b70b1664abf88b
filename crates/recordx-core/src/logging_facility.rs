//! Structured logging for submissions
//!
//! Every crate logs through `tracing`. The dispatcher brackets each
//! submission with the operation macros:
//!
//! - `log_op_start!(op, ...)` when a line arrives
//! - `log_op_end!(op, duration_ms = .., ...)` after a successful save
//! - `log_op_error!(op, err, duration_ms = .., ...)` when the line is
//!   rejected or the save fails; adds `err_class` and `err_code`
//!
//! Lower layers only emit `debug!`/`warn!` detail. Binaries call
//! [`init`] once; tests install [`init_test_capture`] instead.
//!
//! ```rust
//! use recordx_core::logging_facility::{init, Profile};
//!
//! init(Profile::Development);
//! ```

pub mod init;
pub mod macros;
pub mod test_capture;

pub use init::{init, Profile};
pub use test_capture::{init_test_capture, CapturedEvent, TestCapture};
