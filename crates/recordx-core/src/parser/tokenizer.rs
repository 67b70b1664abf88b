//! Splits command arguments into a preamble and `prefix/value` pairs

use std::collections::BTreeMap;

use crate::errors::{RecordXError, Result};

/// An argument prefix such as `n/`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Prefix(&'static str);

impl Prefix {
    pub const fn as_str(&self) -> &'static str {
        self.0
    }
}

impl std::fmt::Display for Prefix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.0)
    }
}

pub const PREFIX_NAME: Prefix = Prefix("n/");
pub const PREFIX_PHONE: Prefix = Prefix("p/");
pub const PREFIX_EMAIL: Prefix = Prefix("e/");
pub const PREFIX_ADDRESS: Prefix = Prefix("a/");
pub const PREFIX_BIRTHDAY: Prefix = Prefix("b/");
pub const PREFIX_RELATIONSHIP: Prefix = Prefix("r/");
pub const PREFIX_NICKNAME: Prefix = Prefix("nn/");
pub const PREFIX_NOTES: Prefix = Prefix("no/");
pub const PREFIX_TAG: Prefix = Prefix("t/");
pub const PREFIX_SORT: Prefix = Prefix("s/");

/// Record field prefixes accepted by `add` and `edit`
pub const RECORD_PREFIXES: [Prefix; 9] = [
    PREFIX_NAME,
    PREFIX_PHONE,
    PREFIX_EMAIL,
    PREFIX_ADDRESS,
    PREFIX_BIRTHDAY,
    PREFIX_RELATIONSHIP,
    PREFIX_NICKNAME,
    PREFIX_NOTES,
    PREFIX_TAG,
];

/// Record field prefixes that may appear at most once
pub const SINGLE_VALUED_PREFIXES: [Prefix; 8] = [
    PREFIX_NAME,
    PREFIX_PHONE,
    PREFIX_EMAIL,
    PREFIX_ADDRESS,
    PREFIX_BIRTHDAY,
    PREFIX_RELATIONSHIP,
    PREFIX_NICKNAME,
    PREFIX_NOTES,
];

/// Tokenized arguments: the text before the first prefix plus every value
/// given for each prefix, in input order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArgumentMultimap {
    preamble: String,
    values: BTreeMap<Prefix, Vec<String>>,
}

impl ArgumentMultimap {
    pub fn preamble(&self) -> &str {
        &self.preamble
    }

    /// Last value given for `prefix`
    pub fn value(&self, prefix: Prefix) -> Option<&str> {
        self.values
            .get(&prefix)
            .and_then(|v| v.last())
            .map(String::as_str)
    }

    pub fn all_values(&self, prefix: Prefix) -> &[String] {
        self.values.get(&prefix).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn contains(&self, prefix: Prefix) -> bool {
        self.values.contains_key(&prefix)
    }

    /// # Errors
    /// `DuplicateField` listing every prefix that appears more than once.
    pub fn verify_no_duplicates(&self, prefixes: &[Prefix]) -> Result<()> {
        let repeated: Vec<String> = prefixes
            .iter()
            .filter(|p| self.all_values(**p).len() > 1)
            .map(|p| p.to_string())
            .collect();
        if repeated.is_empty() {
            Ok(())
        } else {
            Err(RecordXError::DuplicateField {
                prefixes: repeated,
                usage: String::new(),
            })
        }
    }
}

/// Tokenize `args` against `prefixes`
///
/// A prefix only counts when it starts the string or follows whitespace;
/// values are trimmed.
pub fn tokenize(args: &str, prefixes: &[Prefix]) -> ArgumentMultimap {
    let mut marks: Vec<(usize, Prefix)> = Vec::new();
    for prefix in prefixes {
        for (at, _) in args.match_indices(prefix.as_str()) {
            let starts_word = args[..at]
                .chars()
                .next_back()
                .map_or(true, char::is_whitespace);
            if starts_word {
                marks.push((at, *prefix));
            }
        }
    }
    marks.sort_by_key(|(at, _)| *at);

    let preamble_end = marks.first().map_or(args.len(), |(at, _)| *at);
    let mut multimap = ArgumentMultimap {
        preamble: args[..preamble_end].trim().to_string(),
        values: BTreeMap::new(),
    };
    for (i, (at, prefix)) in marks.iter().enumerate() {
        let start = at + prefix.as_str().len();
        let end = marks.get(i + 1).map_or(args.len(), |(next, _)| *next);
        multimap
            .values
            .entry(*prefix)
            .or_default()
            .push(args[start..end].trim().to_string());
    }
    multimap
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preamble_and_values() {
        let map = tokenize(" 1 n/Alice Pauline p/9435 t/a t/b", &RECORD_PREFIXES);
        assert_eq!(map.preamble(), "1");
        assert_eq!(map.value(PREFIX_NAME), Some("Alice Pauline"));
        assert_eq!(map.value(PREFIX_PHONE), Some("9435"));
        assert_eq!(map.all_values(PREFIX_TAG), &["a".to_string(), "b".to_string()]);
        assert!(!map.contains(PREFIX_EMAIL));
    }

    #[test]
    fn test_longer_prefixes_are_not_confused_with_name() {
        let map = tokenize(" nn/Ally no/likes tea n/Alice", &RECORD_PREFIXES);
        assert_eq!(map.value(PREFIX_NICKNAME), Some("Ally"));
        assert_eq!(map.value(PREFIX_NOTES), Some("likes tea"));
        assert_eq!(map.value(PREFIX_NAME), Some("Alice"));
    }

    #[test]
    fn test_prefix_inside_word_is_plain_text() {
        let map = tokenize(" a/Blk 30a/5 road", &[PREFIX_ADDRESS]);
        assert_eq!(map.value(PREFIX_ADDRESS), Some("Blk 30a/5 road"));
    }

    #[test]
    fn test_empty_value_is_kept() {
        let map = tokenize(" 2 p/ e/x@y.com", &RECORD_PREFIXES);
        assert_eq!(map.value(PREFIX_PHONE), Some(""));
    }

    #[test]
    fn test_duplicate_single_valued_prefix() {
        let map = tokenize(" n/A n/B p/1 p/2 t/x t/y", &RECORD_PREFIXES);
        match map.verify_no_duplicates(&SINGLE_VALUED_PREFIXES) {
            Err(RecordXError::DuplicateField { prefixes, .. }) => {
                assert_eq!(prefixes, vec!["n/", "p/"]);
            }
            other => panic!("expected duplicate error, got {:?}", other),
        }
    }
}
