//! Validated field values for a [`Record`](super::Record)
//!
//! Each type is a thin newtype over its canonical text form. Construction
//! goes through `parse`, which trims the input and enforces the field's
//! length and character constraints.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::errors::{RecordXError, Result};

pub const NAME_MAX_LENGTH: usize = 150;
pub const EMAIL_MAX_LENGTH: usize = 100;
pub const ADDRESS_MAX_LENGTH: usize = 200;
pub const NICKNAME_MAX_LENGTH: usize = 50;
pub const NOTES_MAX_LENGTH: usize = 300;
pub const TAG_MAX_LENGTH: usize = 30;
pub const TAG_MAX_COUNT: usize = 10;
pub const PHONE_MIN_DIGITS: usize = 3;
pub const PHONE_MAX_DIGITS: usize = 17;

/// Accepted birthday format (DD-MM-YYYY)
pub const BIRTHDAY_FORMAT: &str = "%d-%m-%Y";

const NAME_SPECIALS: &[char] = &['@', '.', ',', '\'', '-', '/'];
const EMAIL_LOCAL_SPECIALS: &[char] = &['+', '_', '.', '-'];

pub(crate) fn invalid(field: &str, reason: impl Into<String>) -> RecordXError {
    RecordXError::InvalidField {
        field: field.to_string(),
        reason: reason.into(),
        usage: String::new(),
    }
}

fn check_length(field: &str, value: &str, max: usize) -> Result<()> {
    if value.chars().count() > max {
        return Err(invalid(
            field,
            format!("can be at most {} characters long", max),
        ));
    }
    Ok(())
}

fn is_printable_ascii(value: &str) -> bool {
    value.chars().all(|c| (' '..='~').contains(&c))
}

/// Implements the accessors every text-backed field shares.
macro_rules! text_field {
    ($ty:ident) => {
        impl $ty {
            /// Borrow the canonical text
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $ty {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

/// A person's display name; the identity of a record
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Name(String);
text_field!(Name);

impl Name {
    /// Normalise and validate a name
    ///
    /// Runs of whitespace collapse to one space, escape backslashes are
    /// dropped, and each word that starts with a letter gets an upper-case
    /// first letter.
    ///
    /// # Errors
    /// `InvalidField` if the name is empty, too long, does not start with a
    /// letter, ends with a special character, or contains other characters.
    pub fn parse(raw: &str) -> Result<Self> {
        let formatted = format_name(&raw.replace('\\', ""));
        if formatted.is_empty() {
            return Err(invalid("name", "cannot be blank"));
        }
        check_length("name", &formatted, NAME_MAX_LENGTH)?;

        let first = formatted.chars().next().unwrap_or(' ');
        if !first.is_alphabetic() {
            return Err(invalid("name", "must start with a letter"));
        }
        let last = formatted.chars().last().unwrap_or(' ');
        if NAME_SPECIALS.contains(&last) {
            return Err(invalid(
                "name",
                "cannot start or end with a special character",
            ));
        }
        if let Some(bad) = formatted
            .chars()
            .find(|c| !(c.is_alphanumeric() || *c == ' ' || NAME_SPECIALS.contains(c)))
        {
            return Err(invalid(
                "name",
                format!(
                    "should only contain letters, digits, spaces and @ . , ' - / (found '{}')",
                    bad
                ),
            ));
        }
        Ok(Self(formatted))
    }

    /// Whitespace-delimited words of the name
    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.0.split_whitespace()
    }
}

fn format_name(raw: &str) -> String {
    raw.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) if first.is_alphabetic() && !word.contains('/') => {
                    first.to_uppercase().chain(chars).collect::<String>()
                }
                _ => word.to_string(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Phone number: digits with an optional leading `+`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Phone(String);
text_field!(Phone);

impl Phone {
    /// # Errors
    /// `InvalidField` unless the value is 3 to 17 digits, optionally prefixed by `+`.
    pub fn parse(raw: &str) -> Result<Self> {
        let value = raw.trim();
        let digits = value.strip_prefix('+').unwrap_or(value);
        if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid("phone", "should only contain digits"));
        }
        if digits.len() < PHONE_MIN_DIGITS || digits.len() > PHONE_MAX_DIGITS {
            return Err(invalid(
                "phone",
                format!(
                    "should be between {} and {} digits long",
                    PHONE_MIN_DIGITS, PHONE_MAX_DIGITS
                ),
            ));
        }
        Ok(Self(value.to_string()))
    }
}

/// Email address in `local-part@domain` form
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Email(String);
text_field!(Email);

impl Email {
    /// # Errors
    /// `InvalidField` if the value is too long or not of the form `local-part@domain`.
    pub fn parse(raw: &str) -> Result<Self> {
        let value = raw.trim();
        check_length("email", value, EMAIL_MAX_LENGTH)?;

        let shape = "should be of the format local-part@domain";
        let (local, domain) = value.split_once('@').ok_or_else(|| invalid("email", shape))?;
        let local_ok = !local.is_empty()
            && !local.starts_with(EMAIL_LOCAL_SPECIALS)
            && !local.ends_with(EMAIL_LOCAL_SPECIALS)
            && !local.contains("..")
            && local
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || EMAIL_LOCAL_SPECIALS.contains(&c));
        let domain_ok = domain.contains('.')
            && domain.split('.').all(|label| {
                !label.is_empty()
                    && !label.starts_with('-')
                    && !label.ends_with('-')
                    && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
            })
            && domain.rsplit('.').next().is_some_and(|tld| tld.len() >= 2);
        if !local_ok || !domain_ok {
            return Err(invalid("email", shape));
        }
        Ok(Self(value.to_string()))
    }
}

/// Free-form postal address
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Address(String);
text_field!(Address);

impl Address {
    /// # Errors
    /// `InvalidField` if blank or too long.
    pub fn parse(raw: &str) -> Result<Self> {
        let value = raw.trim();
        if value.is_empty() {
            return Err(invalid("address", "cannot be blank"));
        }
        check_length("address", value, ADDRESS_MAX_LENGTH)?;
        Ok(Self(value.to_string()))
    }
}

/// Date of birth, never in the future
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Birthday(NaiveDate);

impl Birthday {
    /// Parse a `DD-MM-YYYY` birthday, rejecting dates after `today`
    ///
    /// # Errors
    /// `InvalidField` for a malformed string, an impossible calendar date,
    /// or a date in the future.
    pub fn parse(raw: &str, today: NaiveDate) -> Result<Self> {
        let value = raw.trim();
        let shaped = value.len() == 10
            && value
                .char_indices()
                .all(|(i, c)| if i == 2 || i == 5 { c == '-' } else { c.is_ascii_digit() });
        if !shaped {
            return Err(invalid("birthday", "should be in the format DD-MM-YYYY"));
        }
        let date = NaiveDate::parse_from_str(value, BIRTHDAY_FORMAT)
            .map_err(|_| invalid("birthday", "should be a real date"))?;
        if date > today {
            return Err(invalid("birthday", "can't be in the future"));
        }
        Ok(Self(date))
    }

    /// Parse against the local calendar date
    ///
    /// # Errors
    /// See [`Birthday::parse`].
    pub fn parse_today(raw: &str) -> Result<Self> {
        Self::parse(raw, chrono::Local::now().date_naive())
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }

    /// Days from `today` until the next occurrence of this birthday (0 if today)
    ///
    /// 29 February birthdays are celebrated on 28 February in common years.
    pub fn days_until_next(&self, today: NaiveDate) -> i64 {
        let this_year = anniversary_in(self.0, today.year());
        let next = if this_year < today {
            anniversary_in(self.0, today.year() + 1)
        } else {
            this_year
        };
        (next - today).num_days()
    }
}

fn anniversary_in(birth: NaiveDate, year: i32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, birth.month(), birth.day())
        .or_else(|| NaiveDate::from_ymd_opt(year, 2, 28))
        .unwrap_or(birth)
}

impl std::fmt::Display for Birthday {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.format(BIRTHDAY_FORMAT))
    }
}

impl TryFrom<String> for Birthday {
    type Error = String;

    // Stored snapshots are not re-checked against today's date.
    fn try_from(value: String) -> std::result::Result<Self, Self::Error> {
        NaiveDate::parse_from_str(value.trim(), BIRTHDAY_FORMAT)
            .map(Birthday)
            .map_err(|e| format!("invalid birthday '{}': {}", value, e))
    }
}

impl From<Birthday> for String {
    fn from(value: Birthday) -> Self {
        value.to_string()
    }
}

/// Relationship to the owner of the book (e.g. `friend`, `colleague`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Relationship(String);
text_field!(Relationship);

impl Relationship {
    /// # Errors
    /// `InvalidField` unless the value is a single alphanumeric word.
    pub fn parse(raw: &str) -> Result<Self> {
        let value = raw.trim();
        if value.is_empty() || !value.chars().all(char::is_alphanumeric) {
            return Err(invalid("relationship", "should be alphanumeric"));
        }
        Ok(Self(value.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Nickname(String);
text_field!(Nickname);

impl Nickname {
    /// # Errors
    /// `InvalidField` if blank, too long, or not printable ASCII.
    pub fn parse(raw: &str) -> Result<Self> {
        let value = raw.trim();
        if value.is_empty() {
            return Err(invalid("nickname", "cannot be blank"));
        }
        check_length("nickname", value, NICKNAME_MAX_LENGTH)?;
        if !is_printable_ascii(value) {
            return Err(invalid("nickname", "should only contain printable ASCII"));
        }
        Ok(Self(value.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Notes(String);
text_field!(Notes);

impl Notes {
    /// # Errors
    /// `InvalidField` if blank, too long, or not printable ASCII.
    pub fn parse(raw: &str) -> Result<Self> {
        let value = raw.trim();
        if value.is_empty() {
            return Err(invalid("notes", "cannot be blank"));
        }
        check_length("notes", value, NOTES_MAX_LENGTH)?;
        if !is_printable_ascii(value) {
            return Err(invalid("notes", "should only contain printable ASCII"));
        }
        Ok(Self(value.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Tag(String);

impl Tag {
    /// # Errors
    /// `InvalidField` unless the value is 1 to 30 alphanumeric characters.
    pub fn parse(raw: &str) -> Result<Self> {
        let value = raw.trim();
        if value.is_empty() || !value.chars().all(char::is_alphanumeric) {
            return Err(invalid("tag", "tag names should be alphanumeric"));
        }
        check_length("tag", value, TAG_MAX_LENGTH)?;
        Ok(Self(value.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Tag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.0)
    }
}
