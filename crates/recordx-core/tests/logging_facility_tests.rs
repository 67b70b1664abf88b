use recordx_core::errors::{ExError, ExErrorKind, RecordXError};
use recordx_core::logging_facility::test_capture::init_test_capture;
use recordx_core::types::schema::{EVENT_END, EVENT_END_ERROR, EVENT_START};
use recordx_core::{log_op_end, log_op_error, log_op_start};

#[test]
fn test_log_op_start_macro() {
    let capture = init_test_capture();
    let op_name = "test_log_op_start_unique_1";

    log_op_start!(op_name);

    capture.assert_event_exists(op_name, EVENT_START);
}

#[test]
fn test_log_op_end_records_duration() {
    let capture = init_test_capture();
    let op_name = "test_log_op_end_unique_2";

    log_op_end!(op_name, duration_ms = 42);

    let end_events: Vec<_> = capture
        .events_for_op(op_name)
        .into_iter()
        .filter(|e| e.event() == Some(EVENT_END))
        .collect();
    assert_eq!(end_events.len(), 1);
    assert_eq!(end_events[0].field("duration_ms"), Some("42"));
}

#[test]
fn test_log_op_error_adds_class_and_code() {
    // GIVEN an out-of-range index error
    let capture = init_test_capture();
    let op_name = "test_log_op_error_unique_3";
    let err = RecordXError::InvalidRecordIndex {
        index: 7,
        view_len: 2,
    };

    // WHEN it is logged
    log_op_error!(op_name, err, duration_ms = 10);

    // THEN the warning carries the command class and canonical code
    let error_event = capture
        .events_for_op(op_name)
        .into_iter()
        .find(|e| e.event() == Some(EVENT_END_ERROR))
        .expect("Should have error event");
    assert_eq!(error_event.level, tracing::Level::WARN);
    assert_eq!(error_event.field("err_code"), Some("ERR_INDEX_OUT_OF_RANGE"));
    assert_eq!(error_event.field("err_class"), Some("Command"));
}

#[test]
fn test_error_is_still_usable_after_logging() {
    let capture = init_test_capture();
    let op_name = "test_error_reuse_unique_4";

    let err = RecordXError::NothingToUndo;
    log_op_error!(op_name, err, duration_ms = 1, input = "undo");

    let ex: ExError = err.into();
    assert_eq!(ex.kind(), ExErrorKind::NothingToUndo);
    let events = capture.events_for_op(op_name);
    assert_eq!(events[0].field("input"), Some("undo"));
}

#[test]
fn test_log_macros_with_extra_fields() {
    let capture = init_test_capture();
    let op_name = "test_log_macros_fields_unique_5";

    log_op_start!(op_name, command_word = "delete", record_count = 3);

    let start_event = capture
        .events_for_op(op_name)
        .into_iter()
        .next()
        .expect("Should have start event");
    assert_eq!(start_event.field("command_word"), Some("delete"));
    assert_eq!(start_event.field("record_count"), Some("3"));
    assert!(start_event
        .field("component")
        .is_some_and(|c| c.starts_with("logging_facility_tests")));
}

#[test]
#[should_panic(expected = "Expected event")]
fn test_capture_assert_event_exists_fails() {
    let capture = init_test_capture();
    capture.assert_event_exists("nonexistent_op_truly_unique_999", EVENT_START);
}

#[test]
fn test_submission_groups_events_by_id() {
    let capture = init_test_capture();
    let op_name = "test_submission_grouping_unique_6";

    log_op_start!(op_name, submission_id = "sub-a", input = "find alice");
    log_op_start!(op_name, submission_id = "sub-b", input = "list");
    log_op_end!(op_name, duration_ms = 2, submission_id = "sub-a");

    let events = capture.submission("find alice");
    assert_eq!(events.len(), 2);
    assert!(events.iter().all(|e| e.submission_id() == Some("sub-a")));
    assert_eq!(events[1].event(), Some(EVENT_END));
}
