//! Field-by-field edits applied functionally to a [`Record`]
//!
//! A `RecordPatch` never mutates its input: [`RecordPatch::apply`] returns a
//! fresh record so the original can be kept for undo.

use std::collections::BTreeSet;

use super::fields::{Address, Birthday, Email, Name, Nickname, Notes, Phone, Relationship, Tag};
use super::record::Record;

/// Edit instruction for one optional field
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FieldPatch<T> {
    /// Leave the current value as-is
    #[default]
    Keep,
    /// Replace with a new value
    Set(T),
    /// Remove the value
    Clear,
}

impl<T: Clone> FieldPatch<T> {
    /// Resolve the patched value against the current one
    pub fn apply(&self, current: &Option<T>) -> Option<T> {
        match self {
            FieldPatch::Keep => current.clone(),
            FieldPatch::Set(value) => Some(value.clone()),
            FieldPatch::Clear => None,
        }
    }

    pub fn is_keep(&self) -> bool {
        matches!(self, FieldPatch::Keep)
    }
}

/// Edit instruction for the tag set
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TagsPatch {
    #[default]
    Keep,
    /// Replace the whole set; an empty set clears every tag
    Replace(BTreeSet<Tag>),
}

/// Edits to apply to a record; every field defaults to `Keep`
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RecordPatch {
    pub name: Option<Name>,
    pub phone: FieldPatch<Phone>,
    pub email: FieldPatch<Email>,
    pub address: FieldPatch<Address>,
    pub birthday: FieldPatch<Birthday>,
    pub relationship: FieldPatch<Relationship>,
    pub nickname: FieldPatch<Nickname>,
    pub notes: FieldPatch<Notes>,
    pub tags: TagsPatch,
}

impl RecordPatch {
    /// True when no field would change
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.phone.is_keep()
            && self.email.is_keep()
            && self.address.is_keep()
            && self.birthday.is_keep()
            && self.relationship.is_keep()
            && self.nickname.is_keep()
            && self.notes.is_keep()
            && self.tags == TagsPatch::Keep
    }

    /// Produce the edited record
    pub fn apply(&self, record: &Record) -> Record {
        Record {
            name: self.name.clone().unwrap_or_else(|| record.name.clone()),
            phone: self.phone.apply(&record.phone),
            email: self.email.apply(&record.email),
            address: self.address.apply(&record.address),
            birthday: self.birthday.apply(&record.birthday),
            relationship: self.relationship.apply(&record.relationship),
            nickname: self.nickname.apply(&record.nickname),
            notes: self.notes.apply(&record.notes),
            tags: match &self.tags {
                TagsPatch::Keep => record.tags.clone(),
                TagsPatch::Replace(tags) => tags.clone(),
            },
        }
    }
}
