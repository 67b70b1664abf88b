//! `clear`: empty the whole book after confirmation

use tracing::info;

use crate::errors::Result;
use crate::model::Record;
use crate::ops::RecordStore;

use super::{CommandResult, Completed, Confirmable, Execution, Undoable};

pub const COMMAND_WORD: &str = "clear";

pub const USAGE: &str = "clear: Deletes every person in the address book.\nExample: clear";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ClearCommand;

impl ClearCommand {
    pub fn execute(self) -> Execution {
        Execution::AwaitingConfirmation(Box::new(PendingClear))
    }
}

#[derive(Debug, Clone, Copy)]
pub struct PendingClear;

impl Confirmable for PendingClear {
    fn prompt(&self) -> String {
        "Are you sure you want to clear the address book? (y/n)".to_string()
    }

    fn confirm(self: Box<Self>, store: &mut dyn RecordStore) -> Result<Completed> {
        let records = store.replace_all(Vec::new());
        info!(record_count = records.len(), "record book cleared");
        Ok(Completed::undoable(
            CommandResult::message("Address book has been cleared!"),
            ClearedBook { records },
        ))
    }

    fn abort(self: Box<Self>) -> CommandResult {
        CommandResult::message("Clear aborted")
    }

    fn word(&self) -> &'static str {
        COMMAND_WORD
    }
}

/// History entry for a confirmed `clear`: the book as it was
#[derive(Debug, Clone, Default)]
pub struct ClearedBook {
    pub records: Vec<Record>,
}

impl Undoable for ClearedBook {
    fn undo(&self, store: &mut dyn RecordStore) -> Result<()> {
        for (position, record) in self.records.iter().enumerate() {
            if !store.contains(record) {
                store.add_at(record.clone(), position);
            }
        }
        Ok(())
    }

    fn redo(&self, store: &mut dyn RecordStore) -> Result<()> {
        for record in &self.records {
            if store.contains(record) {
                store.delete(record)?;
            }
        }
        Ok(())
    }

    fn description(&self) -> String {
        format!("{} ({} persons)", COMMAND_WORD, self.records.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Name;
    use crate::ops::RecordBook;

    fn book() -> RecordBook {
        RecordBook::from_records(vec![
            Record::new(Name::parse("Alice").unwrap()),
            Record::new(Name::parse("Benson").unwrap()),
        ])
    }

    fn pending() -> Box<dyn Confirmable> {
        match ClearCommand.execute() {
            Execution::AwaitingConfirmation(pending) => pending,
            other => panic!("expected confirmation, got {:?}", other),
        }
    }

    #[test]
    fn test_clear_round_trip() {
        let mut store = book();
        let original = store.records().to_vec();

        let done = pending().confirm(&mut store).unwrap();
        assert_eq!(done.result.feedback, "Address book has been cleared!");
        assert!(store.is_empty());

        let undoable = done.undoable.unwrap();
        undoable.undo(&mut store).unwrap();
        assert_eq!(store.records(), original.as_slice());
        undoable.redo(&mut store).unwrap();
        assert!(store.is_empty());
        assert_eq!(undoable.description(), "clear (2 persons)");
    }

    #[test]
    fn test_abort() {
        let store = book();
        assert_eq!(pending().abort().feedback, "Clear aborted");
        assert_eq!(store.len(), 2);
    }
}
