//! Operation logging macros
//!
//! All three expand to one `tracing` event with `component`, `op` and
//! `event` set, followed by any extra fields in `tracing` syntax.

#[doc(hidden)]
#[macro_export]
macro_rules! __log_op_event {
    ($level:ident, $op:expr, $event:expr $(, $($field:tt)+)?) => {
        tracing::$level!(
            component = module_path!(),
            op = $op,
            event = $event
            $(, $($field)+)?
        )
    };
}

/// Log that an operation started
///
/// ```
/// # use recordx_core::log_op_start;
/// log_op_start!("submit");
/// log_op_start!("submit", input = "list");
/// ```
#[macro_export]
macro_rules! log_op_start {
    ($op:expr $(, $($field:tt)+)?) => {
        $crate::__log_op_event!(
            info,
            $op,
            $crate::types::schema::EVENT_START
            $(, $($field)+)?
        )
    };
}

/// Log that an operation finished
///
/// ```
/// # use recordx_core::log_op_end;
/// log_op_end!("submit", duration_ms = 3, command_word = "list");
/// ```
#[macro_export]
macro_rules! log_op_end {
    ($op:expr, duration_ms = $duration:expr $(, $($field:tt)+)?) => {
        $crate::__log_op_event!(
            info,
            $op,
            $crate::types::schema::EVENT_END,
            duration_ms = $duration
            $(, $($field)+)?
        )
    };
}

/// Log that an operation failed with a [`RecordXError`](crate::errors::RecordXError)
///
/// The error is only borrowed.
///
/// ```
/// # use recordx_core::{log_op_error, errors::RecordXError};
/// let err = RecordXError::NothingToUndo;
/// log_op_error!("submit", err, duration_ms = 1);
/// assert_eq!(err, RecordXError::NothingToUndo);
/// ```
#[macro_export]
macro_rules! log_op_error {
    ($op:expr, $err:expr, duration_ms = $duration:expr $(, $($field:tt)+)?) => {{
        let failure: &$crate::errors::RecordXError = &$err;
        let canonical = $crate::errors::ExError::from(::std::clone::Clone::clone(failure));
        $crate::__log_op_event!(
            warn,
            $op,
            $crate::types::schema::EVENT_END_ERROR,
            duration_ms = $duration,
            err_class = ?failure.class(),
            err_code = canonical.code()
            $(, $($field)+)?
        )
    }};
}
