//! `list`: show every record, optionally by upcoming birthday

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::ops::{RecordFilter, RecordOrder, RecordStore};

use super::{CommandResult, Completed};

pub const COMMAND_WORD: &str = "list";

pub const USAGE: &str = "list: Lists all persons, optionally sorted by upcoming birthday.\n\
Parameters: [s/asc|desc]\n\
Example: list s/asc";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListSort {
    #[default]
    None,
    Ascending,
    Descending,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ListCommand {
    pub sort: ListSort,
}

impl ListCommand {
    pub fn new(sort: ListSort) -> Self {
        Self { sort }
    }

    pub fn execute(self, store: &mut dyn RecordStore, today: NaiveDate) -> Completed {
        store.set_filter(RecordFilter::All);
        let (order, feedback) = match self.sort {
            ListSort::None => (RecordOrder::Insertion, "Listed all persons"),
            ListSort::Ascending => (
                RecordOrder::UpcomingBirthday {
                    today,
                    descending: false,
                },
                "Listed all persons by upcoming birthdays (soonest first)",
            ),
            ListSort::Descending => (
                RecordOrder::UpcomingBirthday {
                    today,
                    descending: true,
                },
                "Listed all persons by upcoming birthdays (latest first)",
            ),
        };
        store.sort(order);
        Completed::plain(CommandResult::message(feedback))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Birthday, Name, Record};
    use crate::ops::RecordBook;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
    }

    fn record(name: &str, birthday: Option<&str>) -> Record {
        let r = Record::new(Name::parse(name).unwrap());
        match birthday {
            Some(b) => r.with_birthday(Birthday::parse(b, today()).unwrap()),
            None => r,
        }
    }

    fn names(store: &RecordBook) -> Vec<String> {
        store.list().iter().map(|r| r.summary().to_string()).collect()
    }

    fn book() -> RecordBook {
        RecordBook::from_records(vec![
            record("Nobirthday", None),
            record("December", Some("24-12-1990")),
            record("March", Some("05-03-1985")),
        ])
    }

    #[test]
    fn test_ascending_puts_missing_birthdays_last() {
        let mut store = book();
        let done = ListCommand::new(ListSort::Ascending).execute(&mut store, today());
        assert_eq!(
            done.result.feedback,
            "Listed all persons by upcoming birthdays (soonest first)"
        );
        assert_eq!(names(&store), vec!["March", "December", "Nobirthday"]);
    }

    #[test]
    fn test_descending_is_full_reversal() {
        let mut store = book();
        ListCommand::new(ListSort::Descending).execute(&mut store, today());
        assert_eq!(names(&store), vec!["Nobirthday", "December", "March"]);
    }

    #[test]
    fn test_plain_list_resets_filter_and_order() {
        let mut store = book();
        store.set_filter(RecordFilter::NameHasWord(vec!["march".to_string()]));
        ListCommand::new(ListSort::Descending).execute(&mut store, today());
        let done = ListCommand::default().execute(&mut store, today());

        assert_eq!(done.result.feedback, "Listed all persons");
        assert_eq!(names(&store), vec!["Nobirthday", "December", "March"]);
        assert_eq!(store.order(), RecordOrder::Insertion);
    }
}
