//! Text protocol: `<word> [args...]` into a [`Command`], and yes/no answers
//!
//! Every error returned here is an input error carrying the usage text of
//! the command being parsed (see [`RecordXError::usage_hint`]).

use chrono::NaiveDate;

use crate::commands::{
    add, clear, delete, edit, find, history, list, messages, AddCommand, ClearCommand, Command,
    DeleteCommand, EditCommand, FindCommand, ListCommand, ListSort,
};
use crate::errors::{RecordXError, Result};
use crate::model::{
    Address, Email, Name, Nickname, Notes, Phone, Record, RecordPatch, Relationship,
};

pub mod fields;
pub mod tokenizer;

use tokenizer::{
    tokenize, PREFIX_ADDRESS, PREFIX_BIRTHDAY, PREFIX_EMAIL, PREFIX_NAME, PREFIX_NICKNAME,
    PREFIX_NOTES, PREFIX_PHONE, PREFIX_RELATIONSHIP, PREFIX_SORT, PREFIX_TAG, RECORD_PREFIXES,
    SINGLE_VALUED_PREFIXES,
};

/// Reply to a confirmation prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Answer {
    Yes,
    No,
}

/// Accepts `y`/`yes` and `n`/`no`, case-insensitive and trimmed
///
/// # Errors
/// `ConfirmationRequired` for anything else.
pub fn parse_answer(text: &str) -> Result<Answer> {
    let answer = text.trim();
    match answer.to_lowercase().as_str() {
        "y" | "yes" => Ok(Answer::Yes),
        "n" | "no" => Ok(Answer::No),
        _ => Err(RecordXError::ConfirmationRequired {
            input: answer.to_string(),
        }),
    }
}

/// Parse one line of input
///
/// `today` bounds birthday values.
///
/// # Errors
/// `UnknownCommand` for an unrecognised word; the per-command format and
/// field errors otherwise.
pub fn parse_command(text: &str, today: NaiveDate) -> Result<Command> {
    let trimmed = text.trim();
    let (word, args) = match trimmed.find(char::is_whitespace) {
        Some(at) => (&trimmed[..at], &trimmed[at..]),
        None => (trimmed, ""),
    };

    match word {
        "" => Err(RecordXError::InvalidFormat {
            reason: "Empty command.".to_string(),
            usage: messages::COMMAND_SUMMARY.to_string(),
        }),
        add::COMMAND_WORD => parse_add(args, today).map_err(|e| e.with_usage(add::USAGE)),
        delete::COMMAND_WORD => {
            let indices = fields::parse_indices(args, delete::COMMAND_WORD)
                .map_err(|e| e.with_usage(delete::USAGE))?;
            Ok(Command::Delete(DeleteCommand::new(indices)))
        }
        edit::COMMAND_WORD => parse_edit(args, today).map_err(|e| e.with_usage(edit::USAGE)),
        clear::COMMAND_WORD => {
            no_arguments(args, clear::USAGE)?;
            Ok(Command::Clear(ClearCommand))
        }
        list::COMMAND_WORD => parse_list(args).map_err(|e| e.with_usage(list::USAGE)),
        find::COMMAND_WORD => {
            let keywords: Vec<String> = args.split_whitespace().map(str::to_string).collect();
            if keywords.is_empty() {
                return Err(format_error("Missing keyword.", find::USAGE));
            }
            Ok(Command::Find(FindCommand::new(keywords)))
        }
        history::UNDO_WORD => {
            no_arguments(args, history::UNDO_USAGE)?;
            Ok(Command::Undo)
        }
        history::REDO_WORD => {
            no_arguments(args, history::REDO_USAGE)?;
            Ok(Command::Redo)
        }
        messages::HELP_WORD => Ok(Command::Help),
        messages::EXIT_WORD => Ok(Command::Exit),
        other => Err(RecordXError::UnknownCommand {
            word: other.to_string(),
            usage: messages::COMMAND_SUMMARY.to_string(),
        }),
    }
}

fn format_error(reason: &str, usage: &str) -> RecordXError {
    RecordXError::InvalidFormat {
        reason: reason.to_string(),
        usage: usage.to_string(),
    }
}

fn no_arguments(args: &str, usage: &str) -> Result<()> {
    if args.trim().is_empty() {
        Ok(())
    } else {
        Err(format_error("This command takes no arguments.", usage))
    }
}

fn parse_add(args: &str, today: NaiveDate) -> Result<Command> {
    let map = tokenize(args, &RECORD_PREFIXES);
    let Some(name) = map.value(PREFIX_NAME) else {
        return Err(format_error("Missing compulsory parameter: n/NAME", ""));
    };
    if !map.preamble().is_empty() {
        return Err(format_error(
            "Detected unexpected string between command and first valid parameter.",
            "",
        ));
    }
    map.verify_no_duplicates(&SINGLE_VALUED_PREFIXES)?;

    let record = Record {
        name: Name::parse(name)?,
        phone: fields::optional(map.value(PREFIX_PHONE), Phone::parse)?,
        email: fields::optional(map.value(PREFIX_EMAIL), Email::parse)?,
        address: fields::optional(map.value(PREFIX_ADDRESS), Address::parse)?,
        birthday: fields::optional(map.value(PREFIX_BIRTHDAY), fields::birthday(today))?,
        relationship: fields::optional(map.value(PREFIX_RELATIONSHIP), Relationship::parse)?,
        nickname: fields::optional(map.value(PREFIX_NICKNAME), Nickname::parse)?,
        notes: fields::optional(map.value(PREFIX_NOTES), Notes::parse)?,
        tags: fields::parse_tags(map.all_values(PREFIX_TAG))?,
    };
    Ok(Command::Add(AddCommand::new(record)))
}

fn parse_edit(args: &str, today: NaiveDate) -> Result<Command> {
    let map = tokenize(args, &RECORD_PREFIXES);
    if map.preamble().is_empty() {
        return Err(format_error("Missing index.", ""));
    }
    let index = fields::parse_index(map.preamble())?;
    map.verify_no_duplicates(&SINGLE_VALUED_PREFIXES)?;

    let name = map.value(PREFIX_NAME).map(Name::parse).transpose()?;
    let patch = RecordPatch {
        name,
        phone: fields::field_patch(map.value(PREFIX_PHONE), Phone::parse)?,
        email: fields::field_patch(map.value(PREFIX_EMAIL), Email::parse)?,
        address: fields::field_patch(map.value(PREFIX_ADDRESS), Address::parse)?,
        birthday: fields::field_patch(map.value(PREFIX_BIRTHDAY), fields::birthday(today))?,
        relationship: fields::field_patch(map.value(PREFIX_RELATIONSHIP), Relationship::parse)?,
        nickname: fields::field_patch(map.value(PREFIX_NICKNAME), Nickname::parse)?,
        notes: fields::field_patch(map.value(PREFIX_NOTES), Notes::parse)?,
        tags: fields::tags_patch(map.all_values(PREFIX_TAG))?,
    };
    if patch.is_empty() {
        return Err(RecordXError::NothingToEdit {
            usage: String::new(),
        });
    }
    Ok(Command::Edit(EditCommand::new(index, patch)))
}

fn parse_list(args: &str) -> Result<Command> {
    if args.trim().is_empty() {
        return Ok(Command::List(ListCommand::default()));
    }
    let map = tokenize(args, &[PREFIX_SORT]);
    if !map.preamble().is_empty() {
        return Err(format_error("Unexpected arguments.", ""));
    }
    map.verify_no_duplicates(&[PREFIX_SORT])?;
    let sort = match map.value(PREFIX_SORT).map(str::to_lowercase).as_deref() {
        None => ListSort::None,
        Some("asc") => ListSort::Ascending,
        Some("desc") => ListSort::Descending,
        Some(_) => return Err(format_error("Invalid sort order!", "")),
    };
    Ok(Command::List(ListCommand::new(sort)))
}
