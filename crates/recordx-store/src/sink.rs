//! Persistence sink abstraction
//!
//! A sink durably stores the whole record book plus the raw command log.
//! The dispatcher calls `save` once per successful submission.

#![allow(clippy::result_large_err)]

use recordx_core::model::Record;
use recordx_core::CommandLog;

use crate::errors::Result;

/// Version stamped into every saved snapshot (`schema_version`)
pub const SNAPSHOT_FORMAT_VERSION: u32 = 1;

/// Everything a sink persists
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    pub records: Vec<Record>,
    pub commands: Vec<String>,
}

impl Snapshot {
    pub fn new(records: Vec<Record>, commands: Vec<String>) -> Self {
        Self { records, commands }
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty() && self.commands.is_empty()
    }
}

/// Durable storage for the record book and command log
pub trait PersistenceSink {
    /// Replace the stored snapshot with `records` and `log`
    ///
    /// # Errors
    /// `PermissionDenied` when the target cannot be written for lack of
    /// permission; `Io`, `Serialization` or `Persistence` otherwise.
    fn save(&mut self, records: &[Record], log: &CommandLog) -> Result<()>;

    /// Read the last saved snapshot; empty when nothing was saved yet
    ///
    /// # Errors
    /// `Io`, `Serialization`, `Persistence` or `DigestMismatch`.
    fn load(&self) -> Result<Snapshot>;
}

impl<S: PersistenceSink + ?Sized> PersistenceSink for Box<S> {
    fn save(&mut self, records: &[Record], log: &CommandLog) -> Result<()> {
        (**self).save(records, log)
    }

    fn load(&self) -> Result<Snapshot> {
        (**self).load()
    }
}
