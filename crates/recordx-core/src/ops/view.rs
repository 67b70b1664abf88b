//! View configuration for the record store: which records are shown and in
//! what order.
//!
//! Filtering and ordering never touch the underlying book; they only shape
//! the sequence returned by [`RecordStore::list`](super::RecordStore::list),
//! which is what command indices refer to.

use std::cmp::Ordering;

use chrono::NaiveDate;

use crate::model::Record;
use crate::similarity;

/// Predicate selecting the records in the current view
#[derive(Debug, Clone, PartialEq, Default)]
pub enum RecordFilter {
    /// Every record
    #[default]
    All,

    /// Records whose name contains one of the keywords as a whole word
    /// (case-insensitive)
    NameHasWord(Vec<String>),

    /// Records with a name token scoring at or above `threshold` against one
    /// of the keywords
    NameSimilarTo { keywords: Vec<String>, threshold: f64 },
}

impl RecordFilter {
    pub fn matches(&self, record: &Record) -> bool {
        match self {
            RecordFilter::All => true,
            RecordFilter::NameHasWord(keywords) => keywords.iter().any(|keyword| {
                let keyword = keyword.to_lowercase();
                record.name.words().any(|word| word.to_lowercase() == keyword)
            }),
            RecordFilter::NameSimilarTo {
                keywords,
                threshold,
            } => similarity::name_matches(record.name.as_str(), keywords, *threshold),
        }
    }
}

/// Ordering applied to the current view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RecordOrder {
    /// Book order (the order records were added or restored in)
    #[default]
    Insertion,

    /// Soonest upcoming birthday first relative to `today`; records without a
    /// birthday go last. `descending` reverses the whole ordering.
    UpcomingBirthday { today: NaiveDate, descending: bool },
}

impl RecordOrder {
    /// Compare two records under this ordering
    pub fn compare(&self, a: &Record, b: &Record) -> Ordering {
        match self {
            RecordOrder::Insertion => Ordering::Equal,
            RecordOrder::UpcomingBirthday { today, descending } => {
                let key = |r: &Record| {
                    r.birthday
                        .as_ref()
                        .map_or(i64::MAX, |b| b.days_until_next(*today))
                };
                let ordering = key(a).cmp(&key(b));
                if *descending {
                    ordering.reverse()
                } else {
                    ordering
                }
            }
        }
    }
}
