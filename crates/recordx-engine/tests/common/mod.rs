#![allow(dead_code)]

use chrono::NaiveDate;
use recordx_core::model::{Birthday, Name, Phone, Record};
use recordx_core::{RecordBook, RecordStore};
use recordx_engine::{Dispatcher, EngineConfig};
use recordx_store::MemorySink;

pub type TestDispatcher = Dispatcher<RecordBook, MemorySink>;

pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
}

pub fn record(name: &str) -> Record {
    Record::new(Name::parse(name).unwrap())
}

pub fn sample_records() -> Vec<Record> {
    vec![
        record("Alice Pauline")
            .with_phone(Phone::parse("94351253").unwrap())
            .with_birthday(Birthday::parse("12-06-1995", today()).unwrap()),
        record("Benson Meier").with_phone(Phone::parse("98765432").unwrap()),
        record("Carl Kurz").with_birthday(Birthday::parse("02-06-1988", today()).unwrap()),
        record("Daniel Meier"),
    ]
}

pub fn dispatcher_with(records: Vec<Record>, config: EngineConfig) -> TestDispatcher {
    Dispatcher::new(RecordBook::from_records(records), MemorySink::new(), config)
        .with_today(today())
}

pub fn sample_dispatcher() -> TestDispatcher {
    dispatcher_with(sample_records(), EngineConfig::default())
}

/// Names in the current view
pub fn view_names(dispatcher: &TestDispatcher) -> Vec<String> {
    dispatcher
        .store()
        .list()
        .iter()
        .map(|r| r.summary().to_string())
        .collect()
}

/// Names of every stored record, ignoring the view filter
pub fn stored_names(dispatcher: &TestDispatcher) -> Vec<String> {
    dispatcher
        .store()
        .records()
        .iter()
        .map(|r| r.summary().to_string())
        .collect()
}
