//! Error handling for recordx-store
//!
//! Wraps recordx-core ExError with store-specific helpers

use recordx_core::errors::{ExError, ExErrorKind};

/// Result type alias using ExError
pub type Result<T> = std::result::Result<T, ExError>;

pub use recordx_core::errors::io_error;

/// Create a snapshot digest mismatch error
pub fn digest_mismatch(source: &str, expected: &str, actual: &str) -> ExError {
    ExError::new(ExErrorKind::DigestMismatch)
        .with_op("load_snapshot")
        .with_entity_id(source)
        .with_message(format!(
            "Snapshot digest mismatch: expected {}, computed {}",
            expected, actual
        ))
}

/// Create a serialization error
pub fn serialization_error(op: &str, err: &serde_json::Error) -> ExError {
    ExError::new(ExErrorKind::Serialization)
        .with_op(op)
        .with_message(err.to_string())
}

/// Create a database error from rusqlite::Error
///
/// Read-only and permission failures map to `PermissionDenied`.
pub fn from_rusqlite(err: rusqlite::Error) -> ExError {
    let kind = match &err {
        rusqlite::Error::SqliteFailure(failure, _)
            if matches!(
                failure.code,
                rusqlite::ErrorCode::ReadOnly | rusqlite::ErrorCode::PermissionDenied
            ) =>
        {
            ExErrorKind::PermissionDenied
        }
        _ => ExErrorKind::Persistence,
    };
    ExError::new(kind)
        .with_op("sqlite")
        .with_message(err.to_string())
}
