//! RecordX Engine - command dispatch for the record manager
//!
//! Turns one line of text into a validated mutation of a record store,
//! runs the yes/no confirmation protocol for destructive commands, keeps the
//! undo/redo history and persists the result after every successful
//! submission.
//!
//! ## Logging contract
//! - `log_op_start!` / `log_op_end!` / `log_op_error!` around each `submit`
//! - lower layers (store, core) use only `tracing::debug!()`

#![allow(clippy::result_large_err)]

pub mod config;
pub mod dispatcher;

pub use config::{AnswerPolicy, EngineConfig};
pub use dispatcher::{DispatchState, Dispatcher};
