//! Command history: the undo/redo stacks and the raw input log

pub mod command_log;
pub mod tracker;

pub use command_log::{CommandLog, DEFAULT_COMMAND_LOG_CAPACITY};
pub use tracker::{HistoryTracker, RedoInvalidation};
