//! `add`: append a new record

use tracing::debug;

use crate::errors::{RecordXError, Result};
use crate::model::Record;
use crate::ops::RecordStore;

use super::{CommandResult, Completed, Undoable};

pub const COMMAND_WORD: &str = "add";

pub const USAGE: &str = "add: Adds a person to the address book.\n\
Parameters: n/NAME [p/PHONE] [e/EMAIL] [a/ADDRESS] [b/BIRTHDAY] [r/RELATIONSHIP] \
[nn/NICKNAME] [no/NOTES] [t/TAG]...\n\
Example: add n/John Doe p/98765432 e/johnd@example.com b/01-01-1990 t/friends";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddCommand {
    pub record: Record,
}

impl AddCommand {
    pub fn new(record: Record) -> Self {
        Self { record }
    }

    /// # Errors
    /// `DuplicateRecord` if a record with the same name exists.
    pub fn execute(self, store: &mut dyn RecordStore) -> Result<Completed> {
        store.add(self.record.clone())?;
        debug!(record = %self.record.summary(), "record added");
        let result = CommandResult::message(format!("New person added: {}", self.record));
        Ok(Completed::undoable(
            result,
            AddedRecord {
                record: self.record,
            },
        ))
    }
}

/// History entry for a completed `add`
#[derive(Debug, Clone)]
pub struct AddedRecord {
    pub record: Record,
}

impl Undoable for AddedRecord {
    fn undo(&self, store: &mut dyn RecordStore) -> Result<()> {
        store.delete(&self.record).map(drop)
    }

    fn redo(&self, store: &mut dyn RecordStore) -> Result<()> {
        match store.position_of(&self.record) {
            Some(i) if store.records()[i] == self.record => Ok(()),
            Some(_) => Err(RecordXError::DuplicateRecord {
                name: self.record.name.to_string(),
            }),
            None => store.add(self.record.clone()),
        }
    }

    fn description(&self) -> String {
        format!("{} {}", COMMAND_WORD, self.record.summary())
    }
}
