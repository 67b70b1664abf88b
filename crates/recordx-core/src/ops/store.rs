//! Record Store contract and the in-memory record book

use crate::errors::{RecordXError, Result};
use crate::model::Record;

use super::view::{RecordFilter, RecordOrder};

/// The collection of records commands operate on
///
/// Positions passed to [`add_at`](RecordStore::add_at) and returned by
/// [`delete`](RecordStore::delete) refer to the underlying book, not the
/// filtered view, so a removed record can be put back exactly where it was.
pub trait RecordStore {
    /// Current view: the filtered, ordered records that indices refer to
    fn list(&self) -> Vec<&Record>;

    /// Every record in book order, ignoring filter and ordering
    fn records(&self) -> &[Record];

    /// Append a record
    ///
    /// # Errors
    /// `DuplicateRecord` if a record with the same identity already exists.
    fn add(&mut self, record: Record) -> Result<()>;

    /// Insert a record at a book position (clamped to the end)
    fn add_at(&mut self, record: Record, position: usize);

    /// Remove the record with the same identity, returning its book position
    ///
    /// # Errors
    /// `RecordNotFound` if no such record exists.
    fn delete(&mut self, record: &Record) -> Result<usize>;

    /// Swap `old` for `new` in place
    ///
    /// # Errors
    /// `RecordNotFound` if `old` is missing; `DuplicateRecord` if `new` would
    /// collide with a different existing record.
    fn replace(&mut self, old: &Record, new: Record) -> Result<()>;

    /// Identity membership test
    fn contains(&self, record: &Record) -> bool {
        self.position_of(record).is_some()
    }

    /// Book position of the record with the same identity
    fn position_of(&self, record: &Record) -> Option<usize>;

    fn set_filter(&mut self, filter: RecordFilter);

    fn filter(&self) -> &RecordFilter;

    fn sort(&mut self, order: RecordOrder);

    fn order(&self) -> RecordOrder;

    /// Replace the whole book, returning the previous contents
    fn replace_all(&mut self, records: Vec<Record>) -> Vec<Record>;
}

/// In-memory [`RecordStore`] backed by a `Vec`
#[derive(Debug, Clone, Default)]
pub struct RecordBook {
    records: Vec<Record>,
    filter: RecordFilter,
    order: RecordOrder,
}

impl RecordBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a book from previously saved records, keeping their order
    pub fn from_records(records: Vec<Record>) -> Self {
        Self {
            records,
            ..Self::default()
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl RecordStore for RecordBook {
    fn list(&self) -> Vec<&Record> {
        let mut view: Vec<&Record> = self
            .records
            .iter()
            .filter(|r| self.filter.matches(r))
            .collect();
        if self.order != RecordOrder::Insertion {
            view.sort_by(|a, b| self.order.compare(a, b));
        }
        view
    }

    fn records(&self) -> &[Record] {
        &self.records
    }

    fn add(&mut self, record: Record) -> Result<()> {
        if self.contains(&record) {
            return Err(RecordXError::DuplicateRecord {
                name: record.name.to_string(),
            });
        }
        self.records.push(record);
        Ok(())
    }

    fn add_at(&mut self, record: Record, position: usize) {
        let position = position.min(self.records.len());
        self.records.insert(position, record);
    }

    fn delete(&mut self, record: &Record) -> Result<usize> {
        let position = self
            .position_of(record)
            .ok_or_else(|| RecordXError::RecordNotFound {
                name: record.name.to_string(),
            })?;
        self.records.remove(position);
        Ok(position)
    }

    fn replace(&mut self, old: &Record, new: Record) -> Result<()> {
        let position = self
            .position_of(old)
            .ok_or_else(|| RecordXError::RecordNotFound {
                name: old.name.to_string(),
            })?;
        let collides = self
            .records
            .iter()
            .enumerate()
            .any(|(i, r)| i != position && r.is_same_record(&new));
        if collides {
            return Err(RecordXError::DuplicateRecord {
                name: new.name.to_string(),
            });
        }
        self.records[position] = new;
        Ok(())
    }

    fn position_of(&self, record: &Record) -> Option<usize> {
        self.records.iter().position(|r| r.is_same_record(record))
    }

    fn set_filter(&mut self, filter: RecordFilter) {
        self.filter = filter;
    }

    fn filter(&self) -> &RecordFilter {
        &self.filter
    }

    fn sort(&mut self, order: RecordOrder) {
        self.order = order;
    }

    fn order(&self) -> RecordOrder {
        self.order
    }

    fn replace_all(&mut self, records: Vec<Record>) -> Vec<Record> {
        std::mem::replace(&mut self.records, records)
    }
}
