//! Core types shared across RecordX crates
//!
//! This crate provides foundational types used by the error, logging and
//! dispatch layers:
//!
//! - **Correlation types**: `SubmissionId` ties every log line emitted while
//!   one line of input is dispatched back to that line
//! - **Schema constants**: canonical field keys and event names

pub mod correlation;
pub mod schema;

pub use correlation::SubmissionId;
