//! Value parsers shared by the command parsers

use std::collections::BTreeSet;

use chrono::NaiveDate;

use crate::errors::{RecordXError, Result};
use crate::model::fields::{invalid, TAG_MAX_COUNT};
use crate::model::{Birthday, FieldPatch, Tag, TagsPatch};

/// Parse a one-based index
///
/// # Errors
/// `InvalidIndex` unless the text is a non-zero unsigned integer (no sign).
pub fn parse_index(raw: &str) -> Result<usize> {
    let value = raw.trim();
    let index = value
        .chars()
        .all(|c| c.is_ascii_digit())
        .then(|| value.parse::<usize>().ok())
        .flatten()
        .filter(|i| *i > 0);
    index.ok_or_else(|| RecordXError::InvalidIndex {
        value: value.to_string(),
        usage: String::new(),
    })
}

/// Parse whitespace-separated distinct indices, keeping input order
///
/// # Errors
/// `InvalidFormat` when empty, `InvalidIndex` for a bad entry,
/// `DuplicateIndex` when an index repeats.
pub fn parse_indices(raw: &str, command_word: &str) -> Result<Vec<usize>> {
    let mut indices = Vec::new();
    for token in raw.split_whitespace() {
        let index = parse_index(token)?;
        if indices.contains(&index) {
            return Err(RecordXError::DuplicateIndex {
                input: format!("{} {}", command_word, raw.trim()),
                usage: String::new(),
            });
        }
        indices.push(index);
    }
    if indices.is_empty() {
        return Err(RecordXError::InvalidFormat {
            reason: "Missing index.".to_string(),
            usage: String::new(),
        });
    }
    Ok(indices)
}

/// Parse an optional field value for `add`
///
/// # Errors
/// Whatever `parse` reports for a present value.
pub fn optional<T>(raw: Option<&str>, parse: impl Fn(&str) -> Result<T>) -> Result<Option<T>> {
    raw.map(parse).transpose()
}

/// Parse an optional field value for `edit`: absent keeps, empty clears
///
/// # Errors
/// Whatever `parse` reports for a non-empty value.
pub fn field_patch<T>(raw: Option<&str>, parse: impl Fn(&str) -> Result<T>) -> Result<FieldPatch<T>> {
    match raw {
        None => Ok(FieldPatch::Keep),
        Some(value) if value.trim().is_empty() => Ok(FieldPatch::Clear),
        Some(value) => parse(value).map(FieldPatch::Set),
    }
}

/// Birthday parser bound to a calendar date
pub fn birthday(today: NaiveDate) -> impl Fn(&str) -> Result<Birthday> {
    move |raw| Birthday::parse(raw, today)
}

/// # Errors
/// `InvalidField` for a bad tag or more than the allowed number of tags.
pub fn parse_tags(values: &[String]) -> Result<BTreeSet<Tag>> {
    let tags = values
        .iter()
        .map(|v| Tag::parse(v))
        .collect::<Result<BTreeSet<_>>>()?;
    if tags.len() > TAG_MAX_COUNT {
        return Err(invalid(
            "tag",
            format!("a person can have at most {} tags", TAG_MAX_COUNT),
        ));
    }
    Ok(tags)
}

/// Tags for `edit`: none keeps, a single empty `t/` clears
///
/// # Errors
/// See [`parse_tags`].
pub fn tags_patch(values: &[String]) -> Result<TagsPatch> {
    match values {
        [] => Ok(TagsPatch::Keep),
        [only] if only.trim().is_empty() => Ok(TagsPatch::Replace(BTreeSet::new())),
        _ => parse_tags(values).map(TagsPatch::Replace),
    }
}
