//! `undo` and `redo`: walk the history tracker

use tracing::debug;

use crate::errors::{RecordXError, Result};
use crate::history::HistoryTracker;
use crate::ops::RecordStore;

use super::{CommandResult, Completed};

pub const UNDO_WORD: &str = "undo";
pub const REDO_WORD: &str = "redo";

pub const UNDO_USAGE: &str =
    "undo: Undoes the most recent command entered by the user.\nExample: undo";
pub const REDO_USAGE: &str =
    "redo: Redoes the most recent command entered by the user.\nExample: redo";

/// Reverse the newest undoable command
///
/// The command moves to the redo stack only once its undo succeeded.
///
/// # Errors
/// `NothingToUndo` when the undo stack is empty; the replay error when the
/// store no longer matches, with store and stacks unchanged.
pub fn undo(history: &mut HistoryTracker, store: &mut dyn RecordStore) -> Result<Completed> {
    let command = history.peek_undo().ok_or(RecordXError::NothingToUndo)?;
    let description = command.description();
    command.undo(store)?;
    history.pop_undo();
    debug!(command = %description, "undone");
    Ok(Completed::plain(CommandResult::message(format!(
        "Undo successful! Reverted Command: {}",
        description
    ))))
}

/// Reapply the most recently undone command
///
/// # Errors
/// `NothingToRedo` when the redo stack is empty; the replay error when the
/// store no longer matches, with store and stacks unchanged.
pub fn redo(history: &mut HistoryTracker, store: &mut dyn RecordStore) -> Result<Completed> {
    let command = history.peek_redo().ok_or(RecordXError::NothingToRedo)?;
    let description = command.description();
    command.redo(store)?;
    history.pop_redo();
    debug!(command = %description, "redone");
    Ok(Completed::plain(CommandResult::message(format!(
        "Redo successful! Re-did Command: {}",
        description
    ))))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::AddCommand;
    use crate::model::{Name, Record};
    use crate::ops::RecordBook;

    #[test]
    fn test_empty_history() {
        let mut history = HistoryTracker::new();
        let mut store = RecordBook::new();
        assert!(matches!(
            undo(&mut history, &mut store),
            Err(RecordXError::NothingToUndo)
        ));
        assert!(matches!(
            redo(&mut history, &mut store),
            Err(RecordXError::NothingToRedo)
        ));
    }

    #[test]
    fn test_undo_then_redo_add() {
        let mut history = HistoryTracker::new();
        let mut store = RecordBook::new();
        let done = AddCommand::new(Record::new(Name::parse("Alice").unwrap()))
            .execute(&mut store)
            .unwrap();
        history.push(done.undoable.unwrap());

        let undone = undo(&mut history, &mut store).unwrap();
        assert_eq!(
            undone.result.feedback,
            "Undo successful! Reverted Command: add Alice"
        );
        assert!(store.is_empty());

        let redone = redo(&mut history, &mut store).unwrap();
        assert_eq!(redone.result.feedback, "Redo successful! Re-did Command: add Alice");
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_failed_undo_keeps_command_on_undo_stack() {
        // GIVEN an added record that was then removed behind the history's back
        let mut history = HistoryTracker::new();
        let mut store = RecordBook::new();
        let alice = Record::new(Name::parse("Alice").unwrap());
        let done = AddCommand::new(alice.clone()).execute(&mut store).unwrap();
        history.push(done.undoable.unwrap());
        store.delete(&alice).unwrap();

        // WHEN undo runs
        let result = undo(&mut history, &mut store);

        // THEN it fails and nothing moves
        assert!(matches!(result, Err(RecordXError::RecordNotFound { .. })));
        assert_eq!(history.undo_len(), 1);
        assert_eq!(history.redo_len(), 0);
        assert!(!history.last_action_was_undo());
    }
}
