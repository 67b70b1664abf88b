use chrono::NaiveDate;
use recordx_core::commands::{Completed, Execution, ExecutionContext};
use recordx_core::model::{Birthday, Name, Phone, Record};
use recordx_core::{parse_command, HistoryTracker, RecordBook, RecordStore};

/// Fixed calendar date used by every fixture
#[allow(dead_code)]
pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
}

/// Record with only a name
#[allow(dead_code)]
pub fn record(name: &str) -> Record {
    Record::new(Name::parse(name).unwrap())
}

/// Book with the usual sample contacts, in this order
#[allow(dead_code)]
pub fn sample_book() -> RecordBook {
    RecordBook::from_records(vec![
        record("Alice Pauline")
            .with_phone(Phone::parse("94351253").unwrap())
            .with_birthday(Birthday::parse("12-06-1995", today()).unwrap()),
        record("Benson Meier").with_phone(Phone::parse("98765432").unwrap()),
        record("Carl Kurz").with_birthday(Birthday::parse("02-06-1988", today()).unwrap()),
        record("Daniel Meier"),
    ])
}

/// Names of the records in the current view
#[allow(dead_code)]
pub fn view_names(store: &dyn RecordStore) -> Vec<String> {
    store
        .list()
        .iter()
        .map(|r| r.summary().to_string())
        .collect()
}

/// Parse and execute one line, answering any confirmation with yes, and push
/// the undoable part onto `history`
#[allow(dead_code)]
pub fn run(store: &mut RecordBook, history: &mut HistoryTracker, text: &str) -> Completed {
    let command = parse_command(text, today()).unwrap();
    let mut ctx = ExecutionContext {
        store: &mut *store,
        history: &mut *history,
        today: today(),
        similarity_threshold: 0.6,
    };
    let done = match command.execute(&mut ctx).unwrap() {
        Execution::Done(done) => done,
        Execution::AwaitingConfirmation(pending) => pending.confirm(&mut *store).unwrap(),
    };
    let Completed { result, undoable } = done;
    if let Some(undoable) = undoable {
        history.push(undoable);
    }
    Completed {
        result,
        undoable: None,
    }
}
