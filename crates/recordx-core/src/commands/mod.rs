//! Commands: parsed units of work over a [`RecordStore`]
//!
//! A [`Command`] is built by the parser and consumed by
//! [`Command::execute`]. Execution either finishes straight away
//! ([`Execution::Done`]) or stages a mutation that waits for a yes/no answer
//! ([`Execution::AwaitingConfirmation`]). Commands that can be reversed hand
//! back an [`Undoable`] carrying exactly the data they captured while running;
//! the caller decides whether to push it onto the [`HistoryTracker`].

use chrono::NaiveDate;

use crate::errors::{RecordXError, Result};
use crate::history::HistoryTracker;
use crate::model::Record;
use crate::ops::RecordStore;

pub mod add;
pub mod clear;
pub mod delete;
pub mod edit;
pub mod find;
pub mod history;
pub mod list;
pub mod messages;

pub use add::{AddCommand, AddedRecord};
pub use clear::{ClearCommand, ClearedBook, PendingClear};
pub use delete::{DeleteCommand, DeletedRecords, PendingDelete};
pub use edit::{EditCommand, EditedRecord};
pub use find::FindCommand;
pub use list::{ListCommand, ListSort};

/// A command that can reverse and reapply its own effect
///
/// Implementations replay from the data captured when they first ran, never
/// from the current view. Both directions tolerate a store that already
/// reflects the target state; any other mismatch is an error and leaves the
/// store untouched.
pub trait Undoable: std::fmt::Debug {
    /// # Errors
    /// `RecordNotFound` or `DuplicateRecord` when the store has diverged
    /// from the state this command left behind.
    fn undo(&self, store: &mut dyn RecordStore) -> Result<()>;

    /// # Errors
    /// `RecordNotFound` or `DuplicateRecord` when the store has diverged
    /// from the state this command started from.
    fn redo(&self, store: &mut dyn RecordStore) -> Result<()>;

    /// Short summary for undo/redo feedback
    fn description(&self) -> String;
}

/// A staged command waiting for a yes/no answer
///
/// Staging never mutates the store; only [`confirm`](Confirmable::confirm)
/// does.
pub trait Confirmable: std::fmt::Debug {
    fn prompt(&self) -> String;

    /// Apply the staged mutation
    ///
    /// # Errors
    /// `CommandException`-class errors when the staged records are gone.
    fn confirm(self: Box<Self>, store: &mut dyn RecordStore) -> Result<Completed>;

    /// Drop the staged mutation
    fn abort(self: Box<Self>) -> CommandResult;

    /// Command word that staged this confirmation
    fn word(&self) -> &'static str;
}

/// What the caller sees after a dispatch
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CommandResult {
    pub feedback: String,
    pub show_help: bool,
    pub exit: bool,
    /// A confirmable command is now pending
    pub awaiting_confirmation: bool,
}

impl CommandResult {
    pub fn message(feedback: impl Into<String>) -> Self {
        Self {
            feedback: feedback.into(),
            ..Self::default()
        }
    }

    pub fn help(feedback: impl Into<String>) -> Self {
        Self {
            show_help: true,
            ..Self::message(feedback)
        }
    }

    pub fn exit(feedback: impl Into<String>) -> Self {
        Self {
            exit: true,
            ..Self::message(feedback)
        }
    }

    pub fn confirmation(prompt: impl Into<String>) -> Self {
        Self {
            awaiting_confirmation: true,
            ..Self::message(prompt)
        }
    }
}

/// A fully resolved command
#[derive(Debug)]
pub struct Completed {
    pub result: CommandResult,
    pub undoable: Option<Box<dyn Undoable>>,
}

impl Completed {
    pub fn plain(result: CommandResult) -> Self {
        Self {
            result,
            undoable: None,
        }
    }

    pub fn undoable(result: CommandResult, undoable: impl Undoable + 'static) -> Self {
        Self {
            result,
            undoable: Some(Box::new(undoable)),
        }
    }
}

/// Outcome of [`Command::execute`]
#[derive(Debug)]
pub enum Execution {
    Done(Completed),
    AwaitingConfirmation(Box<dyn Confirmable>),
}

/// Record shown at a one-based position of the current view
///
/// # Errors
/// `InvalidRecordIndex` if the position is outside the view.
pub(crate) fn record_at(store: &dyn RecordStore, index: usize) -> Result<Record> {
    let view = store.list();
    index
        .checked_sub(1)
        .and_then(|i| view.get(i))
        .map(|r| (*r).clone())
        .ok_or(RecordXError::InvalidRecordIndex {
            index,
            view_len: view.len(),
        })
}

/// Everything a command may touch while executing
pub struct ExecutionContext<'a> {
    pub store: &'a mut dyn RecordStore,
    pub history: &'a mut HistoryTracker,
    /// Calendar date used for birthday ordering
    pub today: NaiveDate,
    pub similarity_threshold: f64,
}

/// Every command the text protocol understands
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Add(AddCommand),
    Delete(DeleteCommand),
    Edit(EditCommand),
    Clear(ClearCommand),
    List(ListCommand),
    Find(FindCommand),
    Undo,
    Redo,
    Help,
    Exit,
}

impl Command {
    /// Command word as typed by the user
    pub fn word(&self) -> &'static str {
        match self {
            Command::Add(_) => add::COMMAND_WORD,
            Command::Delete(_) => delete::COMMAND_WORD,
            Command::Edit(_) => edit::COMMAND_WORD,
            Command::Clear(_) => clear::COMMAND_WORD,
            Command::List(_) => list::COMMAND_WORD,
            Command::Find(_) => find::COMMAND_WORD,
            Command::Undo => history::UNDO_WORD,
            Command::Redo => history::REDO_WORD,
            Command::Help => messages::HELP_WORD,
            Command::Exit => messages::EXIT_WORD,
        }
    }

    /// Run the command against the context
    ///
    /// # Errors
    /// Command-class errors (bad index, duplicate record, empty history).
    /// The store is left unchanged when an error is returned.
    pub fn execute(self, ctx: &mut ExecutionContext<'_>) -> Result<Execution> {
        match self {
            Command::Add(cmd) => cmd.execute(ctx.store).map(Execution::Done),
            Command::Delete(cmd) => cmd.execute(ctx.store),
            Command::Edit(cmd) => cmd.execute(ctx.store).map(Execution::Done),
            Command::Clear(cmd) => Ok(cmd.execute()),
            Command::List(cmd) => Ok(Execution::Done(cmd.execute(ctx.store, ctx.today))),
            Command::Find(cmd) => Ok(Execution::Done(
                cmd.execute(ctx.store, ctx.similarity_threshold),
            )),
            Command::Undo => history::undo(ctx.history, ctx.store).map(Execution::Done),
            Command::Redo => history::redo(ctx.history, ctx.store).map(Execution::Done),
            Command::Help => Ok(Execution::Done(Completed::plain(CommandResult::help(
                messages::SHOWING_HELP,
            )))),
            Command::Exit => Ok(Execution::Done(Completed::plain(CommandResult::exit(
                messages::EXITING,
            )))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ops::RecordBook;

    #[test]
    fn test_command_result_constructors() {
        assert!(CommandResult::help("h").show_help);
        assert!(CommandResult::exit("x").exit);
        let prompt = CommandResult::confirmation("sure? (y/n)");
        assert!(prompt.awaiting_confirmation);
        assert!(!prompt.exit);
        assert_eq!(CommandResult::message("ok").feedback, "ok");
    }

    #[test]
    fn test_help_and_exit_flags() {
        let mut store = RecordBook::new();
        let mut history = HistoryTracker::new();
        let mut ctx = ExecutionContext {
            store: &mut store,
            history: &mut history,
            today: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            similarity_threshold: 0.6,
        };

        match Command::Help.execute(&mut ctx).unwrap() {
            Execution::Done(done) => {
                assert!(done.result.show_help);
                assert!(done.undoable.is_none());
            }
            other => panic!("unexpected {:?}", other),
        }
        match Command::Exit.execute(&mut ctx).unwrap() {
            Execution::Done(done) => assert!(done.result.exit),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_words() {
        assert_eq!(Command::Undo.word(), "undo");
        assert_eq!(Command::Redo.word(), "redo");
        assert_eq!(Command::Help.word(), "help");
        assert_eq!(Command::Exit.word(), "exit");
    }
}
