//! RecordX Core - command execution kernel for the record manager
//!
//! This crate provides:
//! - the record model with validated fields and functional patches
//! - the Record Store contract and the in-memory `RecordBook`
//! - commands with undo/redo and confirmation capabilities
//! - the history tracker and bounded command log
//! - the text parser and the name similarity scorer
//! - the error facility and structured logging shared by every crate

pub mod commands;
pub mod errors;
pub mod history;
pub mod logging_facility;
pub mod model;
pub mod ops;
pub mod parser;
pub mod similarity;

pub use recordx_core_types as types;

// Re-export commonly used types
pub use commands::{Command, CommandResult, Completed, Confirmable, Execution, ExecutionContext, Undoable};
pub use errors::{ErrorClass, ExError, ExErrorKind, PersistenceFailure, RecordXError, Result};
pub use history::{CommandLog, HistoryTracker, RedoInvalidation};
pub use model::{Record, RecordPatch};
pub use ops::{RecordBook, RecordFilter, RecordOrder, RecordStore};
pub use parser::{parse_answer, parse_command, Answer};
