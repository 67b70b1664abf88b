//! SQLite sink
//!
//! Records are stored one row per position with the record JSON in `data`.
//! Every save replaces the whole snapshot inside one transaction.

#![allow(clippy::result_large_err)]

use std::path::{Path, PathBuf};

use recordx_core::model::Record;
use recordx_core::CommandLog;
use rusqlite::{params, Connection, OptionalExtension};

use crate::digest::compute_records_digest;
use crate::errors::{digest_mismatch, from_rusqlite, serialization_error, Result};
use crate::sink::{PersistenceSink, Snapshot, SNAPSHOT_FORMAT_VERSION};

pub const DATABASE_FILE: &str = "recordx.db";

/// Table definitions, all `IF NOT EXISTS`
const SCHEMA: &str = include_str!("../sql/schema.sql");

fn create_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(SCHEMA).map_err(from_rusqlite)
}

/// Sink backed by a SQLite database
#[derive(Debug)]
pub struct SqliteSink {
    conn: Connection,
    path: Option<PathBuf>,
}

impl SqliteSink {
    /// Open (creating if needed) the database file and its tables
    ///
    /// # Errors
    /// `Io`/`PermissionDenied` if the parent directory cannot be created,
    /// `Persistence` if the database cannot be opened or the tables created.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let label = path.display().to_string();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| crate::errors::io_error("create_data_dir", label.clone(), &e))?;
        }
        let conn =
            Connection::open(path).map_err(|e| from_rusqlite(e).with_entity_id(label.clone()))?;
        let journal: String = conn
            .pragma_update_and_check(None, "journal_mode", "WAL", |row| row.get(0))
            .map_err(from_rusqlite)?;
        tracing::trace!(db = %label, journal, "opened sqlite database");
        conn.pragma_update(None, "synchronous", "NORMAL")
            .map_err(from_rusqlite)?;
        create_schema(&conn)?;
        Ok(Self {
            conn,
            path: Some(path.to_path_buf()),
        })
    }

    /// In-memory database, mostly for tests
    ///
    /// # Errors
    /// `Persistence` if the database or its tables cannot be created.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(from_rusqlite)?;
        create_schema(&conn)?;
        Ok(Self { conn, path: None })
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    fn label(&self) -> String {
        self.path
            .as_ref()
            .map_or_else(|| ":memory:".to_string(), |p| p.display().to_string())
    }

    fn sqlite_error(&self, err: rusqlite::Error) -> recordx_core::ExError {
        from_rusqlite(err).with_entity_id(self.label())
    }

    fn load_records(&self) -> Result<Vec<Record>> {
        let mut stmt = self
            .conn
            .prepare("SELECT data FROM records ORDER BY position")
            .map_err(|e| self.sqlite_error(e))?;
        let rows = stmt
            .query_map([], |row| row.get::<_, String>(0))
            .map_err(|e| self.sqlite_error(e))?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| self.sqlite_error(e))?;

        rows.iter()
            .map(|data| {
                serde_json::from_str(data).map_err(|e| serialization_error("load_records", &e))
            })
            .collect()
    }

    fn load_commands(&self) -> Result<Vec<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT command FROM command_log ORDER BY position")
            .map_err(|e| self.sqlite_error(e))?;
        let commands = stmt
            .query_map([], |row| row.get(0))
            .map_err(|e| self.sqlite_error(e))?
            .collect::<std::result::Result<Vec<String>, _>>()
            .map_err(|e| self.sqlite_error(e))?;
        Ok(commands)
    }

    fn stored_digest(&self) -> Result<Option<String>> {
        self.conn
            .query_row("SELECT digest FROM snapshot_meta WHERE id = 1", [], |row| {
                row.get(0)
            })
            .optional()
            .map_err(|e| self.sqlite_error(e))
    }
}

impl PersistenceSink for SqliteSink {
    fn save(&mut self, records: &[Record], log: &CommandLog) -> Result<()> {
        let digest = compute_records_digest(records)?;
        let encoded = records
            .iter()
            .map(|r| serde_json::to_string(r).map_err(|e| serialization_error("save_records", &e)))
            .collect::<Result<Vec<_>>>()?;
        let label = self.label();

        let tx = self
            .conn
            .transaction()
            .map_err(|e| from_rusqlite(e).with_entity_id(label.clone()))?;
        let write = || -> std::result::Result<(), rusqlite::Error> {
            tx.execute("DELETE FROM records", [])?;
            tx.execute("DELETE FROM command_log", [])?;
            for (position, (record, data)) in records.iter().zip(&encoded).enumerate() {
                tx.execute(
                    "INSERT INTO records (position, name, data) VALUES (?1, ?2, ?3)",
                    params![position as i64, record.name.as_str(), data],
                )?;
            }
            for (position, command) in log.commands().enumerate() {
                tx.execute(
                    "INSERT INTO command_log (position, command) VALUES (?1, ?2)",
                    params![position as i64, command],
                )?;
            }
            tx.execute(
                "INSERT OR REPLACE INTO snapshot_meta (id, schema_version, saved_at, digest)
                 VALUES (1, ?1, ?2, ?3)",
                params![SNAPSHOT_FORMAT_VERSION, chrono::Utc::now().to_rfc3339(), digest],
            )?;
            Ok(())
        };
        write().map_err(|e| from_rusqlite(e).with_entity_id(label.clone()))?;
        tx.commit()
            .map_err(|e| from_rusqlite(e).with_entity_id(label.clone()))?;

        tracing::debug!(
            db = %label,
            records = records.len(),
            commands = log.len(),
            digest = %digest,
            "saved sqlite snapshot"
        );
        Ok(())
    }

    fn load(&self) -> Result<Snapshot> {
        let records = self.load_records()?;
        if let Some(expected) = self.stored_digest()? {
            let computed = compute_records_digest(&records)?;
            if computed != expected {
                return Err(digest_mismatch(&self.label(), &expected, &computed));
            }
        }
        Ok(Snapshot::new(records, self.load_commands()?))
    }
}
