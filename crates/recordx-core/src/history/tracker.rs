//! Undo/redo stacks of executed undoable commands

use serde::{Deserialize, Serialize};

use crate::commands::Undoable;

/// When a freshly executed command discards the redo stack
///
/// `KeepAfterUndo` is the rule of the address-book tracker this engine
/// replaces; `Always` keeps every redo a replay of the newest undo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RedoInvalidation {
    /// Every fresh command discards the abandoned redo branch
    #[default]
    Always,

    /// A command pushed straight after an undo keeps the redo stack
    KeepAfterUndo,
}

/// Two stacks of undoable commands plus the "last action was undo" flag
///
/// The tracker only sequences commands; it never touches the record store.
/// Callers run [`Undoable::undo`] / [`Undoable::redo`] on the command handed
/// back by [`pop_undo`](HistoryTracker::pop_undo) /
/// [`pop_redo`](HistoryTracker::pop_redo).
#[derive(Debug, Default)]
pub struct HistoryTracker {
    undo_stack: Vec<Box<dyn Undoable>>,
    redo_stack: Vec<Box<dyn Undoable>>,
    last_was_undo: bool,
    invalidation: RedoInvalidation,
}

impl HistoryTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_invalidation(invalidation: RedoInvalidation) -> Self {
        Self {
            invalidation,
            ..Self::default()
        }
    }

    /// Record a freshly executed command
    pub fn push(&mut self, command: Box<dyn Undoable>) {
        self.undo_stack.push(command);
        let keep_redo =
            self.invalidation == RedoInvalidation::KeepAfterUndo && self.last_was_undo;
        if !keep_redo {
            self.redo_stack.clear();
        }
        self.last_was_undo = false;
    }

    /// Newest command on the undo stack, left in place
    pub fn peek_undo(&self) -> Option<&dyn Undoable> {
        self.undo_stack.last().map(|c| c.as_ref())
    }

    /// Most recently undone command, left in place
    pub fn peek_redo(&self) -> Option<&dyn Undoable> {
        self.redo_stack.last().map(|c| c.as_ref())
    }

    /// Move the newest command to the redo stack and return it
    ///
    /// Returns `None` (and leaves the flag alone) when there is nothing to undo.
    pub fn pop_undo(&mut self) -> Option<&dyn Undoable> {
        let command = self.undo_stack.pop()?;
        self.redo_stack.push(command);
        self.last_was_undo = true;
        self.redo_stack.last().map(|c| c.as_ref())
    }

    /// Move the most recently undone command back to the undo stack and return it
    pub fn pop_redo(&mut self) -> Option<&dyn Undoable> {
        let command = self.redo_stack.pop()?;
        self.undo_stack.push(command);
        self.last_was_undo = false;
        self.undo_stack.last().map(|c| c.as_ref())
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_len(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_len(&self) -> usize {
        self.redo_stack.len()
    }

    pub fn last_action_was_undo(&self) -> bool {
        self.last_was_undo
    }

    pub fn invalidation(&self) -> RedoInvalidation {
        self.invalidation
    }

    /// Descriptions of the undo stack, oldest first
    pub fn undo_descriptions(&self) -> Vec<String> {
        self.undo_stack.iter().map(|c| c.description()).collect()
    }

    /// Descriptions of the redo stack, oldest first
    pub fn redo_descriptions(&self) -> Vec<String> {
        self.redo_stack.iter().map(|c| c.description()).collect()
    }

    /// Drop both stacks and the flag, keeping the invalidation policy
    pub fn reset(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
        self.last_was_undo = false;
    }
}
