//! User-facing feedback shared across commands

use crate::model::Record;

pub const HELP_WORD: &str = "help";
pub const EXIT_WORD: &str = "exit";

pub const HELP_USAGE: &str = "help: Shows program usage instructions.\nExample: help";
pub const EXIT_USAGE: &str = "exit: Exits the program.\nExample: exit";

pub const SHOWING_HELP: &str = "Opened help window.";
pub const EXITING: &str = "Exiting RecordX as requested ...";

/// Usage line listing every command word
pub const COMMAND_SUMMARY: &str =
    "Commands: add, delete, edit, clear, list, find, undo, redo, help, exit";

/// Names of the given records joined for prompts and feedback
pub fn names(records: &[Record]) -> String {
    records
        .iter()
        .map(Record::summary)
        .collect::<Vec<_>>()
        .join(", ")
}
