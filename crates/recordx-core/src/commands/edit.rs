//! `edit`: patch the record at a view position

use tracing::debug;

use crate::errors::{RecordXError, Result};
use crate::model::{Record, RecordPatch};
use crate::ops::{RecordFilter, RecordStore};

use super::{record_at, CommandResult, Completed, Undoable};

pub const COMMAND_WORD: &str = "edit";

pub const USAGE: &str = "edit: Edits the details of the person identified by the index number \
used in the displayed person list. Existing values will be overwritten by the input values; \
a prefix with no value clears that field.\n\
Parameters: INDEX (must be a positive integer) [n/NAME] [p/PHONE] [e/EMAIL] [a/ADDRESS] \
[b/BIRTHDAY] [r/RELATIONSHIP] [nn/NICKNAME] [no/NOTES] [t/TAG]...\n\
Example: edit 1 p/91234567 e/johndoe@example.com";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditCommand {
    /// One-based view position
    pub index: usize,
    pub patch: RecordPatch,
}

impl EditCommand {
    pub fn new(index: usize, patch: RecordPatch) -> Self {
        Self { index, patch }
    }

    /// # Errors
    /// `InvalidRecordIndex` for a position outside the view; `DuplicateRecord`
    /// if the new name belongs to another record.
    pub fn execute(self, store: &mut dyn RecordStore) -> Result<Completed> {
        let before = record_at(store, self.index)?;
        let after = self.patch.apply(&before);
        if !before.is_same_record(&after) && store.contains(&after) {
            return Err(RecordXError::DuplicateRecord {
                name: after.name.to_string(),
            });
        }
        store.replace(&before, after.clone())?;
        debug!(index = self.index, record = %after.summary(), "record edited");

        let result = CommandResult::message(format!("Edited Person: {}", after));
        Ok(Completed::undoable(
            result,
            EditedRecord {
                index: self.index,
                before,
                after,
            },
        ))
    }
}

/// History entry for a completed `edit`
#[derive(Debug, Clone)]
pub struct EditedRecord {
    pub index: usize,
    pub before: Record,
    pub after: Record,
}

impl EditedRecord {
    /// Replace `from` with `to`; a no-op when `to` is already in place
    fn swap(store: &mut dyn RecordStore, from: &Record, to: &Record) -> Result<()> {
        let already_applied = store.records().contains(to)
            && (from.is_same_record(to) || !store.contains(from));
        if !already_applied {
            store.replace(from, to.clone())?;
        }
        store.set_filter(RecordFilter::All);
        Ok(())
    }
}

impl Undoable for EditedRecord {
    fn undo(&self, store: &mut dyn RecordStore) -> Result<()> {
        Self::swap(store, &self.after, &self.before)
    }

    fn redo(&self, store: &mut dyn RecordStore) -> Result<()> {
        Self::swap(store, &self.before, &self.after)
    }

    fn description(&self) -> String {
        format!(
            "{} {}: {} -> {}",
            COMMAND_WORD,
            self.index,
            self.before.summary(),
            self.after.summary()
        )
    }
}
