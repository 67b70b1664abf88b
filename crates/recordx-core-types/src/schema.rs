//! Field and event names shared by every structured log line
//!
//! A submission is logged as one `start` event and exactly one `end` or
//! `end_error` event, all carrying the same `submission_id`.

// Envelope carried by every operation event
pub const FIELD_COMPONENT: &str = "component";
pub const FIELD_OP: &str = "op";
pub const FIELD_EVENT: &str = "event";
pub const FIELD_DURATION_MS: &str = "duration_ms";

// Submission context
pub const FIELD_SUBMISSION_ID: &str = "submission_id";
pub const FIELD_INPUT: &str = "input";
pub const FIELD_COMMAND_WORD: &str = "command_word";
pub const FIELD_CONFIRMATION: &str = "confirmation";
pub const FIELD_PERSISTED: &str = "persisted";

// Failures
pub const FIELD_ERR_CLASS: &str = "err_class";
pub const FIELD_ERR_CODE: &str = "err_code";

pub const EVENT_START: &str = "start";
pub const EVENT_END: &str = "end";
pub const EVENT_END_ERROR: &str = "end_error";

/// Values of [`FIELD_CONFIRMATION`]
pub const CONFIRMATION_REQUESTED: &str = "requested";
pub const CONFIRMATION_CONFIRMED: &str = "confirmed";
pub const CONFIRMATION_ABORTED: &str = "aborted";
