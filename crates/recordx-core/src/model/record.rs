use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::fields::{Address, Birthday, Email, Name, Nickname, Notes, Phone, Relationship, Tag};

/// Record - a single contact managed by the record book
///
/// Records are immutable values: an edit produces a new `Record` (see
/// [`RecordPatch`](super::RecordPatch)) that replaces the old one in the
/// store. Two records describe the same contact when their names match
/// (see [`Record::is_same_record`]); full equality compares every field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Display name; also the identity of the record
    pub name: Name,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<Phone>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<Email>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birthday: Option<Birthday>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relationship: Option<Relationship>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nickname: Option<Nickname>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<Notes>,

    /// Free-form labels, kept sorted
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub tags: BTreeSet<Tag>,
}

impl Record {
    /// Create a record with only a name
    pub fn new(name: Name) -> Self {
        Self {
            name,
            phone: None,
            email: None,
            address: None,
            birthday: None,
            relationship: None,
            nickname: None,
            notes: None,
            tags: BTreeSet::new(),
        }
    }

    pub fn with_phone(mut self, phone: Phone) -> Self {
        self.phone = Some(phone);
        self
    }

    pub fn with_email(mut self, email: Email) -> Self {
        self.email = Some(email);
        self
    }

    pub fn with_address(mut self, address: Address) -> Self {
        self.address = Some(address);
        self
    }

    pub fn with_birthday(mut self, birthday: Birthday) -> Self {
        self.birthday = Some(birthday);
        self
    }

    pub fn with_relationship(mut self, relationship: Relationship) -> Self {
        self.relationship = Some(relationship);
        self
    }

    pub fn with_nickname(mut self, nickname: Nickname) -> Self {
        self.nickname = Some(nickname);
        self
    }

    pub fn with_notes(mut self, notes: Notes) -> Self {
        self.notes = Some(notes);
        self
    }

    pub fn with_tag(mut self, tag: Tag) -> Self {
        self.tags.insert(tag);
        self
    }

    /// Identity comparison: same name means same contact
    pub fn is_same_record(&self, other: &Record) -> bool {
        self.name == other.name
    }

    /// Short human-readable summary used in undo/redo feedback
    pub fn summary(&self) -> &str {
        self.name.as_str()
    }
}

impl std::fmt::Display for Record {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)?;
        let labelled: [(&str, Option<String>); 7] = [
            ("Phone", self.phone.as_ref().map(ToString::to_string)),
            ("Email", self.email.as_ref().map(ToString::to_string)),
            ("Address", self.address.as_ref().map(ToString::to_string)),
            ("Birthday", self.birthday.as_ref().map(ToString::to_string)),
            (
                "Relationship",
                self.relationship.as_ref().map(ToString::to_string),
            ),
            ("Nickname", self.nickname.as_ref().map(ToString::to_string)),
            ("Notes", self.notes.as_ref().map(ToString::to_string)),
        ];
        for (label, value) in labelled {
            if let Some(value) = value {
                write!(f, "; {}: {}", label, value)?;
            }
        }
        if !self.tags.is_empty() {
            write!(f, "; Tags: ")?;
            for tag in &self.tags {
                write!(f, "{}", tag)?;
            }
        }
        Ok(())
    }
}
