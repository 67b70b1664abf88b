//! `find`: whole-word name search with a similarity fallback

use tracing::debug;

use crate::ops::{RecordFilter, RecordStore};

use super::{CommandResult, Completed};

pub const COMMAND_WORD: &str = "find";

pub const USAGE: &str = "find: Finds all persons whose names contain any of the specified \
keywords (case-insensitive) and displays them as a list with index numbers. When nothing \
matches exactly, similar names are shown instead.\n\
Parameters: KEYWORD [MORE_KEYWORDS]...\n\
Example: find alice bob charlie";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FindCommand {
    pub keywords: Vec<String>,
}

impl FindCommand {
    pub fn new(keywords: Vec<String>) -> Self {
        Self { keywords }
    }

    pub fn execute(self, store: &mut dyn RecordStore, threshold: f64) -> Completed {
        store.set_filter(RecordFilter::NameHasWord(self.keywords.clone()));
        let exact = store.list().len();
        if exact > 0 {
            return Completed::plain(CommandResult::message(format!(
                "{} persons listed!",
                exact
            )));
        }

        store.set_filter(RecordFilter::NameSimilarTo {
            keywords: self.keywords,
            threshold,
        });
        let similar = store.list().len();
        debug!(similar, "no exact match, similarity fallback used");
        Completed::plain(CommandResult::message(format!(
            "No match found, found {} similar entries",
            similar
        )))
    }
}
