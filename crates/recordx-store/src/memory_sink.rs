//! In-memory sink with failure injection

#![allow(clippy::result_large_err)]

use recordx_core::errors::{ExError, ExErrorKind};
use recordx_core::model::Record;
use recordx_core::{CommandLog, PersistenceFailure};

use crate::errors::Result;
use crate::sink::{PersistenceSink, Snapshot};

const MEMORY_TARGET: &str = "memory://recordx";

/// Keeps the last saved snapshot in memory
///
/// `fail_with` makes every following `save` fail until `recover` is called.
/// A failed save leaves the previous snapshot untouched.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    snapshot: Snapshot,
    failure: Option<PersistenceFailure>,
    save_count: usize,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing snapshot, as if it had been saved before
    pub fn with_snapshot(snapshot: Snapshot) -> Self {
        Self {
            snapshot,
            ..Self::default()
        }
    }

    pub fn fail_with(&mut self, failure: PersistenceFailure) {
        self.failure = Some(failure);
    }

    pub fn recover(&mut self) {
        self.failure = None;
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    /// Number of successful saves
    pub fn save_count(&self) -> usize {
        self.save_count
    }
}

impl PersistenceSink for MemorySink {
    fn save(&mut self, records: &[Record], log: &CommandLog) -> Result<()> {
        if let Some(failure) = self.failure {
            let err = match failure {
                PersistenceFailure::Permission => ExError::new(ExErrorKind::PermissionDenied)
                    .with_op("save")
                    .with_entity_id(MEMORY_TARGET)
                    .with_message("permission denied"),
                PersistenceFailure::Io => ExError::new(ExErrorKind::Io)
                    .with_op("save")
                    .with_entity_id(MEMORY_TARGET)
                    .with_message("simulated disk failure"),
            };
            return Err(err);
        }

        self.snapshot = Snapshot::new(records.to_vec(), log.to_vec());
        self.save_count += 1;
        Ok(())
    }

    fn load(&self) -> Result<Snapshot> {
        Ok(self.snapshot.clone())
    }
}
