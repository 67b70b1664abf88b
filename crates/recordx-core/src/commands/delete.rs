//! `delete`: remove one or more records after confirmation

use tracing::debug;

use crate::errors::{RecordXError, Result};
use crate::model::Record;
use crate::ops::RecordStore;

use super::{messages, record_at, CommandResult, Completed, Confirmable, Execution, Undoable};

pub const COMMAND_WORD: &str = "delete";

pub const USAGE: &str = "delete: Deletes the person(s) identified by the index number(s) \
used in the displayed person list.\n\
Parameters: INDEX [MORE_INDICES]... (must be positive integers)\n\
Example: delete 1 3";

/// Staging step: resolves every index against the current view
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteCommand {
    /// One-based view positions, distinct
    pub indices: Vec<usize>,
}

impl DeleteCommand {
    pub fn new(indices: Vec<usize>) -> Self {
        Self { indices }
    }

    /// Stage the deletion without touching the store
    ///
    /// # Errors
    /// `InvalidRecordIndex` if any index is outside the view; nothing is staged.
    pub fn execute(self, store: &dyn RecordStore) -> Result<Execution> {
        let targets = self
            .indices
            .iter()
            .map(|&index| record_at(store, index))
            .collect::<Result<Vec<_>>>()?;
        debug!(indices = ?self.indices, "delete staged");
        Ok(Execution::AwaitingConfirmation(Box::new(PendingDelete {
            targets,
        })))
    }
}

/// Records resolved by `delete`, waiting for the answer
#[derive(Debug, Clone)]
pub struct PendingDelete {
    targets: Vec<Record>,
}

impl PendingDelete {
    pub fn targets(&self) -> &[Record] {
        &self.targets
    }
}

impl Confirmable for PendingDelete {
    fn prompt(&self) -> String {
        format!(
            "Confirm Deleting Person: {} ? (y/n)",
            messages::names(&self.targets)
        )
    }

    fn confirm(self: Box<Self>, store: &mut dyn RecordStore) -> Result<Completed> {
        if let Some(missing) = self.targets.iter().find(|r| !store.contains(r)) {
            return Err(RecordXError::RecordNotFound {
                name: missing.name.to_string(),
            });
        }
        let mut removed = Vec::with_capacity(self.targets.len());
        for record in self.targets {
            let position = store.delete(&record)?;
            removed.push((record, position));
        }
        let deleted = DeletedRecords { removed };
        let result = CommandResult::message(format!(
            "Deleted Person: {}",
            messages::names(&deleted.records())
        ));
        Ok(Completed::undoable(result, deleted))
    }

    fn abort(self: Box<Self>) -> CommandResult {
        CommandResult::message("Aborted deletion!")
    }

    fn word(&self) -> &'static str {
        COMMAND_WORD
    }
}

/// History entry for a confirmed `delete`
///
/// Each record is kept with the book position it was removed from, in
/// removal order.
#[derive(Debug, Clone, Default)]
pub struct DeletedRecords {
    pub removed: Vec<(Record, usize)>,
}

impl DeletedRecords {
    pub fn records(&self) -> Vec<Record> {
        self.removed.iter().map(|(r, _)| r.clone()).collect()
    }
}

impl Undoable for DeletedRecords {
    fn undo(&self, store: &mut dyn RecordStore) -> Result<()> {
        // Reverse removal order so every position refers to the book it was
        // taken from.
        for (record, position) in self.removed.iter().rev() {
            if !store.contains(record) {
                store.add_at(record.clone(), *position);
            }
        }
        Ok(())
    }

    fn redo(&self, store: &mut dyn RecordStore) -> Result<()> {
        for (record, _) in &self.removed {
            if store.contains(record) {
                store.delete(record)?;
            }
        }
        Ok(())
    }

    fn description(&self) -> String {
        if self.removed.is_empty() {
            return format!("{} <unknown person(s)>", COMMAND_WORD);
        }
        format!("{} {}", COMMAND_WORD, messages::names(&self.records()))
    }
}
