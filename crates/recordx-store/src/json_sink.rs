//! JSON file sink
//!
//! Two files under one data directory:
//! - `records.json`: `{schema_version, saved_at, digest, records}`
//! - `command_history.json`: `{commands}`
//!
//! Each file is written with [`atomic_write`], so a crash leaves either the
//! previous or the new content, never a torn file.

#![allow(clippy::result_large_err)]

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use recordx_core::model::Record;
use recordx_core::CommandLog;
use serde::{Deserialize, Serialize};

use crate::atomic::atomic_write;
use crate::digest::compute_records_digest;
use crate::errors::{digest_mismatch, io_error, serialization_error, Result};
use crate::sink::{PersistenceSink, Snapshot, SNAPSHOT_FORMAT_VERSION};

pub const RECORDS_FILE: &str = "records.json";
pub const COMMAND_HISTORY_FILE: &str = "command_history.json";

#[derive(Debug, Serialize, Deserialize)]
struct RecordsFile {
    schema_version: u32,
    saved_at: DateTime<Utc>,
    digest: String,
    records: Vec<Record>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct CommandHistoryFile {
    #[serde(default)]
    commands: Vec<String>,
}

/// Sink writing pretty-printed JSON files into a data directory
#[derive(Debug, Clone)]
pub struct JsonFileSink {
    data_dir: PathBuf,
}

impl JsonFileSink {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn records_path(&self) -> PathBuf {
        self.data_dir.join(RECORDS_FILE)
    }

    pub fn command_history_path(&self) -> PathBuf {
        self.data_dir.join(COMMAND_HISTORY_FILE)
    }

    /// Load and verify the records file; a missing file yields no records
    ///
    /// # Errors
    /// `DigestMismatch` if the stored digest does not match the records.
    pub fn load_records(&self) -> Result<Vec<Record>> {
        let path = self.records_path();
        let Some(bytes) = read_optional(&path)? else {
            return Ok(Vec::new());
        };
        let file: RecordsFile =
            serde_json::from_slice(&bytes).map_err(|e| serialization_error("load_records", &e))?;

        let computed = compute_records_digest(&file.records)?;
        if computed != file.digest {
            return Err(digest_mismatch(
                &path.display().to_string(),
                &file.digest,
                &computed,
            ));
        }
        Ok(file.records)
    }

    /// Load the command log file; a missing file yields no commands
    ///
    /// # Errors
    /// `Io` or `Serialization` if the file exists but cannot be read.
    pub fn load_commands(&self) -> Result<Vec<String>> {
        let Some(bytes) = read_optional(&self.command_history_path())? else {
            return Ok(Vec::new());
        };
        let file: CommandHistoryFile = serde_json::from_slice(&bytes)
            .map_err(|e| serialization_error("load_commands", &e))?;
        Ok(file.commands)
    }
}

fn read_optional(path: &Path) -> Result<Option<Vec<u8>>> {
    match fs::read(path) {
        Ok(bytes) => Ok(Some(bytes)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(io_error("read_file", path.display().to_string(), &e)),
    }
}

impl PersistenceSink for JsonFileSink {
    fn save(&mut self, records: &[Record], log: &CommandLog) -> Result<()> {
        let records_file = RecordsFile {
            schema_version: SNAPSHOT_FORMAT_VERSION,
            saved_at: Utc::now(),
            digest: compute_records_digest(records)?,
            records: records.to_vec(),
        };
        let history_file = CommandHistoryFile {
            commands: log.to_vec(),
        };

        let records_json = serde_json::to_vec_pretty(&records_file)
            .map_err(|e| serialization_error("save_records", &e))?;
        let history_json = serde_json::to_vec_pretty(&history_file)
            .map_err(|e| serialization_error("save_commands", &e))?;

        atomic_write(&self.records_path(), &records_json)?;
        atomic_write(&self.command_history_path(), &history_json)?;

        tracing::debug!(
            data_dir = %self.data_dir.display(),
            records = records.len(),
            commands = log.len(),
            digest = %records_file.digest,
            "saved json snapshot"
        );
        Ok(())
    }

    fn load(&self) -> Result<Snapshot> {
        Ok(Snapshot::new(self.load_records()?, self.load_commands()?))
    }
}
