mod common;

use common::{record, sample_dispatcher, sample_records, stored_names, today};
use recordx_core::{ErrorClass, PersistenceFailure, RecordStore, RecordXError};
use recordx_engine::{DispatchState, Dispatcher, EngineConfig};
use recordx_store::{JsonFileSink, PersistenceSink, SqliteSink};
use tempfile::TempDir;

#[test]
fn test_permission_failure_keeps_in_memory_change() {
    // GIVEN a sink that refuses writes
    let mut d = sample_dispatcher();
    d.sink_mut().fail_with(PersistenceFailure::Permission);

    // WHEN a record is added
    let err = d.submit("add n/Eve").unwrap_err();

    // THEN the failure names the permission problem
    assert_eq!(err.class(), ErrorClass::Persistence);
    assert!(matches!(
        err,
        RecordXError::Persistence {
            kind: PersistenceFailure::Permission,
            ..
        }
    ));
    assert!(err.to_string().contains("insufficient permissions"), "{}", err);

    // AND the add is not rolled back
    assert_eq!(d.store().len(), 5);
    assert!(d.history().can_undo());
    assert_eq!(d.sink().save_count(), 0);
}

#[test]
fn test_io_failure_message_and_recovery() {
    let mut d = sample_dispatcher();
    d.sink_mut().fail_with(PersistenceFailure::Io);

    let err = d.submit("delete 1").unwrap_err();
    assert_eq!(
        err.to_string(),
        "Could not save data due to the following error: simulated disk failure"
    );
    // The confirmation was staged before the save failed
    assert_eq!(d.state(), DispatchState::AwaitingConfirmation);

    d.sink_mut().recover();
    d.submit("y").unwrap();

    let saved = &d.sink().snapshot();
    assert_eq!(saved.records.len(), 3);
    assert_eq!(saved.commands, vec!["delete 1", "y"]);
}

#[test]
fn test_command_log_is_bounded() {
    let config = EngineConfig {
        command_log_capacity: 3,
        ..EngineConfig::default()
    };
    let mut d = common::dispatcher_with(vec![], config);

    for name in ["Ann", "Bob", "Cat", "Dan", "Eve"] {
        d.submit(&format!("add n/{}", name)).unwrap();
    }

    let logged: Vec<&str> = d.command_log().commands().collect();
    assert_eq!(logged, vec!["add n/Cat", "add n/Dan", "add n/Eve"]);
    assert_eq!(d.sink().snapshot().commands.len(), 3);
    assert_eq!(d.store().len(), 5);
}

#[test]
fn test_json_sink_round_trip_through_dispatcher() {
    // GIVEN a dispatcher saving to a JSON data directory
    let temp_dir = TempDir::new().unwrap();
    let data_dir = temp_dir.path().join("data");
    let mut d = Dispatcher::open(JsonFileSink::new(&data_dir), EngineConfig::default())
        .unwrap()
        .with_today(today());

    // WHEN commands are submitted
    d.submit("add n/Alice Pauline p/94351253").unwrap();
    d.submit("add n/Benson Meier").unwrap();
    d.submit("delete 1").unwrap();
    d.submit("y").unwrap();

    // THEN a fresh dispatcher sees the same records and log, with empty history
    let reopened = Dispatcher::open(JsonFileSink::new(&data_dir), EngineConfig::default()).unwrap();
    assert_eq!(reopened.store().records(), &[record("Benson Meier")]);
    assert_eq!(reopened.command_log().len(), 4);
    assert!(!reopened.history().can_undo());
}

#[test]
fn test_sqlite_sink_round_trip_through_dispatcher() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("recordx.db");
    {
        let sink = SqliteSink::open(&path).unwrap();
        let mut d = Dispatcher::open(sink, EngineConfig::default())
            .unwrap()
            .with_today(today());
        d.submit("add n/Carl Kurz b/02-06-1988").unwrap();
        d.submit("list s/desc").unwrap();
    }

    let sink = SqliteSink::open(&path).unwrap();
    let snapshot = sink.load().unwrap();
    assert_eq!(snapshot.records.len(), 1);
    assert_eq!(snapshot.commands, vec!["add n/Carl Kurz b/02-06-1988", "list s/desc"]);
}

#[test]
fn test_failed_command_does_not_touch_sink() {
    let mut d = sample_dispatcher();

    let _ = d.submit("edit 9 p/123").unwrap_err();
    let _ = d.submit("bogus").unwrap_err();

    assert_eq!(d.sink().save_count(), 0);
    assert_eq!(stored_names(&d).len(), sample_records().len());
}
