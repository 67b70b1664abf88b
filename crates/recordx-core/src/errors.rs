use recordx_core_types::SubmissionId;
use thiserror::Error;

/// Result type alias using RecordXError
pub type Result<T> = std::result::Result<T, RecordXError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// This taxonomy provides a stable, structured classification of all errors
/// in the RecordX system. Each kind maps to a stable error code that can be
/// used for programmatic error handling, testing, and log assertions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Input
    InvalidInput,
    UnknownCommand,
    InvalidIndex,
    DuplicateIndex,
    DuplicateField,
    InvalidField,
    NothingToEdit,
    ConfirmationRequired,

    // Command
    NotFound,
    AlreadyExists,
    IndexOutOfRange,
    NothingToUndo,
    NothingToRedo,

    // Persistence
    PermissionDenied,
    Io,
    Serialization,
    Persistence,
    DigestMismatch,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::InvalidInput => "ERR_INVALID_INPUT",
            ExErrorKind::UnknownCommand => "ERR_UNKNOWN_COMMAND",
            ExErrorKind::InvalidIndex => "ERR_INVALID_INDEX",
            ExErrorKind::DuplicateIndex => "ERR_DUPLICATE_INDEX",
            ExErrorKind::DuplicateField => "ERR_DUPLICATE_FIELD",
            ExErrorKind::InvalidField => "ERR_INVALID_FIELD",
            ExErrorKind::NothingToEdit => "ERR_NOTHING_TO_EDIT",
            ExErrorKind::ConfirmationRequired => "ERR_CONFIRMATION_REQUIRED",
            ExErrorKind::NotFound => "ERR_NOT_FOUND",
            ExErrorKind::AlreadyExists => "ERR_ALREADY_EXISTS",
            ExErrorKind::IndexOutOfRange => "ERR_INDEX_OUT_OF_RANGE",
            ExErrorKind::NothingToUndo => "ERR_NOTHING_TO_UNDO",
            ExErrorKind::NothingToRedo => "ERR_NOTHING_TO_REDO",
            ExErrorKind::PermissionDenied => "ERR_PERMISSION_DENIED",
            ExErrorKind::Io => "ERR_IO",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
            ExErrorKind::Persistence => "ERR_PERSISTENCE",
            ExErrorKind::DigestMismatch => "ERR_DIGEST_MISMATCH",
        }
    }
}

/// Canonical structured error type
///
/// This error type provides a structured representation of errors with
/// classification fields for programmatic handling and rich context for debugging.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    entity_id: Option<String>,
    submission_id: Option<SubmissionId>,
    message: String,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            entity_id: None,
            submission_id: None,
            message: String::new(),
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add entity context (a record name or a file path)
    pub fn with_entity_id(mut self, id: impl Into<String>) -> Self {
        self.entity_id = Some(id.into());
        self
    }

    /// Add submission correlation context
    pub fn with_submission_id(mut self, submission_id: SubmissionId) -> Self {
        self.submission_id = Some(submission_id);
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    /// Get the operation context, if any
    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    /// Get the entity context, if any
    pub fn entity_id(&self) -> Option<&str> {
        self.entity_id.as_deref()
    }

    /// Get the submission correlation id, if any
    pub fn submission_id(&self) -> Option<&SubmissionId> {
        self.submission_id.as_ref()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(entity_id) = &self.entity_id {
            write!(f, " (entity: {})", entity_id)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {}

/// Build an I/O error, classifying permission failures separately
pub fn io_error(op: &str, path: impl Into<String>, err: &std::io::Error) -> ExError {
    let kind = if err.kind() == std::io::ErrorKind::PermissionDenied {
        ExErrorKind::PermissionDenied
    } else {
        ExErrorKind::Io
    };
    ExError::new(kind)
        .with_op(op)
        .with_entity_id(path)
        .with_message(err.to_string())
}

// ========== End Error Facility ==========

/// How a caller should react to an error
///
/// - `Input`: the text could not be understood; retry with different input
/// - `Command`: the command was understood but cannot run against the current
///   records; nothing changed
/// - `Persistence`: the in-memory change happened but could not be saved
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    Input,
    Command,
    Persistence,
}

/// Which side of a failed save went wrong
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersistenceFailure {
    Permission,
    Io,
}

/// Comprehensive error taxonomy for RecordX operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RecordXError {
    // ===== Input Errors =====
    /// First word of the input is not a known command
    #[error("Unknown command, try typing 'help' for assistance!")]
    UnknownCommand { word: String, usage: String },

    /// Arguments do not fit the command's shape
    #[error("Invalid command format! {reason}\n{usage}")]
    InvalidFormat { reason: String, usage: String },

    /// Index argument is not a positive integer
    #[error("Index is not a non-zero unsigned integer: '{value}'\n{usage}")]
    InvalidIndex { value: String, usage: String },

    /// The same index appears more than once
    #[error("Duplicate indices are not allowed for this command. Entered: {input}\n{usage}")]
    DuplicateIndex { input: String, usage: String },

    /// A single-valued prefix was given more than once
    #[error("Multiple values specified for the following single-valued field(s): {}\n{usage}", .prefixes.join(" "))]
    DuplicateField { prefixes: Vec<String>, usage: String },

    /// A field value violates its domain constraint
    #[error("Invalid {field}: {reason}\n{usage}")]
    InvalidField {
        field: String,
        reason: String,
        usage: String,
    },

    /// Edit command without any field to change
    #[error("At least one field to edit must be provided.\n{usage}")]
    NothingToEdit { usage: String },

    /// An answer other than yes/no while a confirmation is pending
    #[error("Invalid command: y to confirm, n to cancel")]
    ConfirmationRequired { input: String },

    // ===== Command Errors =====
    /// Index is outside the displayed list
    #[error("The person index provided is invalid")]
    InvalidRecordIndex { index: usize, view_len: usize },

    /// A record with the same identity already exists
    #[error("This person already exists in the address book.")]
    DuplicateRecord { name: String },

    /// A record the command relies on is gone
    #[error("Person not found: {name}")]
    RecordNotFound { name: String },

    /// Undo requested on an empty history
    #[error("Nothing to undo!")]
    NothingToUndo,

    /// Redo requested with nothing undone
    #[error("Nothing to redo!")]
    NothingToRedo,

    // ===== Persistence Errors =====
    /// The snapshot could not be written
    #[error("{}", persistence_message(.kind, .detail))]
    Persistence {
        kind: PersistenceFailure,
        detail: String,
    },
}

fn persistence_message(kind: &PersistenceFailure, detail: &str) -> String {
    match kind {
        PersistenceFailure::Permission => format!(
            "Could not save data to file {} due to insufficient permissions to write to the file or the folder.",
            detail
        ),
        PersistenceFailure::Io => {
            format!("Could not save data due to the following error: {}", detail)
        }
    }
}

impl RecordXError {
    /// Classify the error for the caller
    pub fn class(&self) -> ErrorClass {
        match self {
            RecordXError::UnknownCommand { .. }
            | RecordXError::InvalidFormat { .. }
            | RecordXError::InvalidIndex { .. }
            | RecordXError::DuplicateIndex { .. }
            | RecordXError::DuplicateField { .. }
            | RecordXError::InvalidField { .. }
            | RecordXError::NothingToEdit { .. }
            | RecordXError::ConfirmationRequired { .. } => ErrorClass::Input,

            RecordXError::InvalidRecordIndex { .. }
            | RecordXError::DuplicateRecord { .. }
            | RecordXError::RecordNotFound { .. }
            | RecordXError::NothingToUndo
            | RecordXError::NothingToRedo => ErrorClass::Command,

            RecordXError::Persistence { .. } => ErrorClass::Persistence,
        }
    }

    /// Usage text for input errors, if the error carries one
    pub fn usage_hint(&self) -> Option<&str> {
        match self {
            RecordXError::UnknownCommand { usage, .. }
            | RecordXError::InvalidFormat { usage, .. }
            | RecordXError::InvalidIndex { usage, .. }
            | RecordXError::DuplicateIndex { usage, .. }
            | RecordXError::DuplicateField { usage, .. }
            | RecordXError::InvalidField { usage, .. }
            | RecordXError::NothingToEdit { usage } => Some(usage.as_str()),
            RecordXError::ConfirmationRequired { .. } => Some("y to confirm, n to cancel"),
            _ => None,
        }
    }

    /// Replace the usage text carried by an input error
    ///
    /// Field parsers do not know which command they serve; the command parser
    /// attaches its own usage on the way out.
    pub fn with_usage(self, new_usage: &str) -> Self {
        match self {
            RecordXError::InvalidFormat { reason, .. } => RecordXError::InvalidFormat {
                reason,
                usage: new_usage.to_string(),
            },
            RecordXError::InvalidIndex { value, .. } => RecordXError::InvalidIndex {
                value,
                usage: new_usage.to_string(),
            },
            RecordXError::DuplicateIndex { input, .. } => RecordXError::DuplicateIndex {
                input,
                usage: new_usage.to_string(),
            },
            RecordXError::DuplicateField { prefixes, .. } => RecordXError::DuplicateField {
                prefixes,
                usage: new_usage.to_string(),
            },
            RecordXError::InvalidField { field, reason, .. } => RecordXError::InvalidField {
                field,
                reason,
                usage: new_usage.to_string(),
            },
            RecordXError::NothingToEdit { .. } => RecordXError::NothingToEdit {
                usage: new_usage.to_string(),
            },
            other => other,
        }
    }

    /// Map a sink failure into the dispatcher-facing persistence error
    pub fn from_persistence(err: &ExError) -> Self {
        let kind = match err.kind() {
            ExErrorKind::PermissionDenied => PersistenceFailure::Permission,
            _ => PersistenceFailure::Io,
        };
        let detail = match (kind, err.entity_id()) {
            (PersistenceFailure::Permission, Some(path)) => path.to_string(),
            _ if err.message().is_empty() => err.code().to_string(),
            _ => err.message().to_string(),
        };
        RecordXError::Persistence { kind, detail }
    }
}

impl From<RecordXError> for ExError {
    fn from(err: RecordXError) -> Self {
        let message = err.to_string();
        let (kind, entity) = match &err {
            RecordXError::UnknownCommand { word, .. } => {
                (ExErrorKind::UnknownCommand, Some(word.clone()))
            }
            RecordXError::InvalidFormat { .. } => (ExErrorKind::InvalidInput, None),
            RecordXError::InvalidIndex { value, .. } => {
                (ExErrorKind::InvalidIndex, Some(value.clone()))
            }
            RecordXError::DuplicateIndex { .. } => (ExErrorKind::DuplicateIndex, None),
            RecordXError::DuplicateField { .. } => (ExErrorKind::DuplicateField, None),
            RecordXError::InvalidField { field, .. } => {
                (ExErrorKind::InvalidField, Some(field.clone()))
            }
            RecordXError::NothingToEdit { .. } => (ExErrorKind::NothingToEdit, None),
            RecordXError::ConfirmationRequired { .. } => {
                (ExErrorKind::ConfirmationRequired, None)
            }
            RecordXError::InvalidRecordIndex { index, .. } => {
                (ExErrorKind::IndexOutOfRange, Some(index.to_string()))
            }
            RecordXError::DuplicateRecord { name } => {
                (ExErrorKind::AlreadyExists, Some(name.clone()))
            }
            RecordXError::RecordNotFound { name } => (ExErrorKind::NotFound, Some(name.clone())),
            RecordXError::NothingToUndo => (ExErrorKind::NothingToUndo, None),
            RecordXError::NothingToRedo => (ExErrorKind::NothingToRedo, None),
            RecordXError::Persistence { kind, .. } => match kind {
                PersistenceFailure::Permission => (ExErrorKind::PermissionDenied, None),
                PersistenceFailure::Io => (ExErrorKind::Io, None),
            },
        };

        let ex = ExError::new(kind).with_message(message);
        match entity {
            Some(id) => ex.with_entity_id(id),
            None => ex,
        }
    }
}
