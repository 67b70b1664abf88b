mod common;

use common::{
    dispatcher_with, record, sample_dispatcher, sample_records, stored_names, view_names,
};
use recordx_core::{ErrorClass, RecordStore, RecordXError, RedoInvalidation};
use recordx_engine::EngineConfig;

#[test]
fn test_two_edits_undo_in_reverse_order() {
    // GIVEN two edits to different records
    let mut d = sample_dispatcher();
    d.submit("edit 1 p/11111111").unwrap();
    d.submit("edit 2 n/Benson Mayer").unwrap();

    // WHEN the first undo runs
    let first = d.submit("undo").unwrap();

    // THEN the later edit is reverted first
    assert!(first.feedback.contains("Benson Mayer"), "{}", first.feedback);
    assert_eq!(
        stored_names(&d),
        vec!["Alice Pauline", "Benson Meier", "Carl Kurz", "Daniel Meier"]
    );
    assert_eq!(
        d.store().records()[0].phone.as_ref().map(ToString::to_string),
        Some("11111111".to_string())
    );

    // WHEN the second undo runs
    d.submit("undo").unwrap();

    // THEN both records are back to their originals
    assert_eq!(d.store().records(), sample_records().as_slice());
    assert_eq!(d.history().redo_len(), 2);
}

#[test]
fn test_fresh_command_discards_redo_by_default() {
    let mut d = sample_dispatcher();
    d.submit("add n/Eve").unwrap();
    d.submit("add n/Frank").unwrap();
    d.submit("undo").unwrap();
    assert!(d.history().can_redo());

    d.submit("add n/Grace").unwrap();

    assert!(!d.history().can_redo());
    let err = d.submit("redo").unwrap_err();
    assert_eq!(err, RecordXError::NothingToRedo);
    assert_eq!(err.class(), ErrorClass::Command);
}

#[test]
fn test_keep_after_undo_preserves_redo_branch() {
    let config = EngineConfig {
        redo_invalidation: RedoInvalidation::KeepAfterUndo,
        ..EngineConfig::default()
    };
    let mut d = dispatcher_with(sample_records(), config);
    d.submit("add n/Eve").unwrap();
    d.submit("undo").unwrap();

    d.submit("add n/Frank").unwrap();

    assert_eq!(d.history().redo_len(), 1);
    d.submit("redo").unwrap();
    assert!(stored_names(&d).contains(&"Eve".to_string()));
}

#[test]
fn test_undo_redo_chain_keeps_redo_stack() {
    let mut d = sample_dispatcher();
    d.submit("add n/Eve").unwrap();
    d.submit("add n/Frank").unwrap();

    d.submit("undo").unwrap();
    d.submit("undo").unwrap();
    d.submit("redo").unwrap();

    assert_eq!(d.history().redo_len(), 1);
    assert_eq!(d.history().undo_len(), 1);
    assert!(stored_names(&d).contains(&"Eve".to_string()));
    assert!(!stored_names(&d).contains(&"Frank".to_string()));
}

#[test]
fn test_non_undoable_commands_leave_history_alone() {
    let mut d = sample_dispatcher();
    d.submit("add n/Eve").unwrap();

    d.submit("list").unwrap();
    d.submit("find meier").unwrap();
    d.submit("help").unwrap();

    assert_eq!(d.history().undo_len(), 1);
    assert_eq!(view_names(&d), vec!["Benson Meier", "Daniel Meier"]);
}

#[test]
fn test_nothing_to_undo_is_not_logged() {
    let mut d = sample_dispatcher();

    let err = d.submit("undo").unwrap_err();

    assert_eq!(err, RecordXError::NothingToUndo);
    assert!(d.command_log().is_empty());
    assert_eq!(d.sink().save_count(), 0);
}

#[test]
fn test_duplicate_add_is_command_error() {
    let mut d = sample_dispatcher();

    let err = d.submit("add n/alice pauline").unwrap_err();

    assert_eq!(err.class(), ErrorClass::Command);
    assert_eq!(d.store().len(), 4);
    assert!(!d.history().can_undo());
}

#[test]
fn test_redo_onto_diverged_record_fails_without_moving_history() {
    // GIVEN Alice renamed to Bob, undone, then renamed to Carl with the
    // redo branch kept
    let config = EngineConfig {
        redo_invalidation: RedoInvalidation::KeepAfterUndo,
        ..EngineConfig::default()
    };
    let mut d = dispatcher_with(vec![record("Alice")], config);
    d.submit("edit 1 n/Bob").unwrap();
    d.submit("undo").unwrap();
    d.submit("edit 1 n/Carl").unwrap();
    let saves = d.sink().save_count();
    let logged = d.command_log().len();

    // WHEN the Alice -> Bob edit is redone
    let err = d.submit("redo").unwrap_err();

    // THEN it fails as a command error and nothing changes
    assert!(matches!(err, RecordXError::RecordNotFound { .. }), "{:?}", err);
    assert_eq!(err.class(), ErrorClass::Command);
    assert_eq!(stored_names(&d), vec!["Carl"]);
    assert_eq!(d.history().undo_descriptions(), vec!["edit 1: Alice -> Carl"]);
    assert_eq!(d.history().redo_descriptions(), vec!["edit 1: Alice -> Bob"]);
    assert_eq!(d.sink().save_count(), saves);
    assert_eq!(d.command_log().len(), logged);

    // AND the next undo reverts the Carl edit, not the stale one
    let undone = d.submit("undo").unwrap();
    assert!(undone.feedback.ends_with("edit 1: Alice -> Carl"), "{}", undone.feedback);
    assert_eq!(stored_names(&d), vec!["Alice"]);
}
