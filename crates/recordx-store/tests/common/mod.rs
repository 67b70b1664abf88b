#![allow(dead_code)]

use recordx_core::model::{Birthday, Name, Phone, Record, Tag};
use recordx_core::CommandLog;

pub fn record(name: &str) -> Record {
    Record::new(Name::parse(name).unwrap())
}

pub fn sample_records() -> Vec<Record> {
    vec![
        record("Alice Pauline")
            .with_phone(Phone::parse("94351253").unwrap())
            .with_birthday(Birthday::parse_today("12-06-1995").unwrap())
            .with_tag(Tag::parse("friends").unwrap()),
        record("Benson Meier").with_phone(Phone::parse("98765432").unwrap()),
        record("Carl Kurz"),
    ]
}

pub fn sample_log() -> CommandLog {
    let mut log = CommandLog::with_capacity(100);
    log.push("add n/Carl Kurz");
    log.push("list");
    log
}
