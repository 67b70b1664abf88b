//! RecordX Store - persistence sinks for the record manager
//!
//! This crate provides:
//! - the `PersistenceSink` contract and `Snapshot`
//! - `JsonFileSink` with atomic temp→rename writes and digest verification
//! - `SqliteSink` storing the same snapshot in three SQLite tables
//! - `MemorySink` for tests and failure injection

#![allow(clippy::result_large_err)]

pub mod atomic;
pub mod digest;
pub mod errors;
pub mod json_sink;
pub mod memory_sink;
pub mod sink;
pub mod sqlite_sink;

pub use json_sink::JsonFileSink;
pub use memory_sink::MemorySink;
pub use sink::{PersistenceSink, Snapshot, SNAPSHOT_FORMAT_VERSION};
pub use sqlite_sink::SqliteSink;
