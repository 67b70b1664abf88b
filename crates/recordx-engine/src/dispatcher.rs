//! Dispatcher: one line of text in, one result out
//!
//! ## Protocol
//! - `Idle`: the line is parsed into a command and executed. A confirmable
//!   command only stages its mutation and moves the dispatcher to
//!   `AwaitingConfirmation`. Undoable results are pushed onto the history.
//! - `AwaitingConfirmation`: the line is read as a yes/no answer and nothing
//!   else. Yes applies the staged mutation, no drops it; either way the
//!   dispatcher returns to `Idle`. An unreadable answer under the strict
//!   policy is rejected and the same command stays pending.
//!
//! Every successful submission appends the raw line to the command log and
//! saves the whole store through the sink. A failed save is reported as a
//! persistence error, but the in-memory change it follows is kept.

#![allow(clippy::result_large_err)]

use std::time::Instant;

use chrono::NaiveDate;
use recordx_core::commands::{CommandResult, Confirmable, Execution, ExecutionContext};
use recordx_core::errors::ExError;
use recordx_core::parser::Answer;
use recordx_core::types::schema::{
    CONFIRMATION_ABORTED, CONFIRMATION_CONFIRMED, CONFIRMATION_REQUESTED,
};
use recordx_core::types::SubmissionId;
use recordx_core::{
    log_op_end, log_op_error, log_op_start, parse_command, CommandLog, HistoryTracker,
    RecordBook, RecordStore, RecordXError,
};
use recordx_store::PersistenceSink;

use crate::config::EngineConfig;

const OP_SUBMIT: &str = "submit";

/// Which kind of input the next `submit` expects
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchState {
    Idle,
    AwaitingConfirmation,
}

/// What happened to a pending confirmation during one submission
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ConfirmationStatus {
    Requested,
    Confirmed,
    Aborted,
}

impl ConfirmationStatus {
    fn as_str(self) -> &'static str {
        match self {
            ConfirmationStatus::Requested => CONFIRMATION_REQUESTED,
            ConfirmationStatus::Confirmed => CONFIRMATION_CONFIRMED,
            ConfirmationStatus::Aborted => CONFIRMATION_ABORTED,
        }
    }
}

#[derive(Debug)]
struct Dispatched {
    result: CommandResult,
    command_word: &'static str,
    confirmation: Option<ConfirmationStatus>,
}

/// Command dispatcher over a record store and a persistence sink
///
/// Owns the history tracker, the command log and the single pending
/// confirmation slot. One `submit` runs to completion before the next; a
/// multi-threaded host must hold a lock around the whole call.
#[derive(Debug)]
pub struct Dispatcher<S, P> {
    store: S,
    sink: P,
    history: HistoryTracker,
    command_log: CommandLog,
    pending: Option<Box<dyn Confirmable>>,
    config: EngineConfig,
    today: Option<NaiveDate>,
}

impl<P: PersistenceSink> Dispatcher<RecordBook, P> {
    /// Build a dispatcher over the snapshot last saved to `sink`
    ///
    /// # Errors
    /// Whatever the sink reports while loading.
    pub fn open(sink: P, config: EngineConfig) -> Result<Self, ExError> {
        let snapshot = sink.load()?;
        tracing::debug!(
            records = snapshot.records.len(),
            commands = snapshot.commands.len(),
            "loaded snapshot"
        );
        let command_log = CommandLog::from_commands(config.command_log_capacity, snapshot.commands);
        let mut dispatcher = Self::new(RecordBook::from_records(snapshot.records), sink, config);
        dispatcher.command_log = command_log;
        Ok(dispatcher)
    }
}

impl<S: RecordStore, P: PersistenceSink> Dispatcher<S, P> {
    pub fn new(store: S, sink: P, config: EngineConfig) -> Self {
        Self {
            store,
            sink,
            history: HistoryTracker::with_invalidation(config.redo_invalidation),
            command_log: CommandLog::with_capacity(config.command_log_capacity),
            pending: None,
            config,
            today: None,
        }
    }

    /// Pin the date used for birthday checks and ordering
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    /// Dispatch one line of input
    ///
    /// # Errors
    /// - input-class errors for unparseable text or answers; nothing changes
    /// - command-class errors when the command cannot run; nothing changes
    /// - `Persistence` when the save after a successful command fails; the
    ///   in-memory change is kept
    pub fn submit(&mut self, text: &str) -> Result<CommandResult, RecordXError> {
        let submission_id = SubmissionId::new();
        let state = self.state();
        log_op_start!(
            OP_SUBMIT,
            submission_id = %submission_id,
            input = text,
            state = ?state
        );
        let start = Instant::now();

        let dispatched = match self.dispatch(text) {
            Ok(dispatched) => dispatched,
            Err(err) => {
                log_op_error!(
                    OP_SUBMIT,
                    err,
                    duration_ms = start.elapsed().as_millis() as u64,
                    submission_id = %submission_id
                );
                return Err(err);
            }
        };

        if let Err(err) = self.persist(text, submission_id) {
            log_op_error!(
                OP_SUBMIT,
                err,
                duration_ms = start.elapsed().as_millis() as u64,
                submission_id = %submission_id,
                command_word = dispatched.command_word
            );
            return Err(err);
        }

        log_op_end!(
            OP_SUBMIT,
            duration_ms = start.elapsed().as_millis() as u64,
            submission_id = %submission_id,
            command_word = dispatched.command_word,
            confirmation = dispatched.confirmation.map(ConfirmationStatus::as_str),
            persisted = true
        );
        Ok(dispatched.result)
    }

    fn dispatch(&mut self, text: &str) -> Result<Dispatched, RecordXError> {
        match self.pending.take() {
            Some(pending) => self.answer(pending, text),
            None => self.execute(text),
        }
    }

    fn execute(&mut self, text: &str) -> Result<Dispatched, RecordXError> {
        let today = self.today();
        let command = parse_command(text, today)?;
        let command_word = command.word();
        tracing::debug!(command_word, "parsed command");

        let mut ctx = ExecutionContext {
            store: &mut self.store,
            history: &mut self.history,
            today,
            similarity_threshold: self.config.similarity_threshold,
        };
        match command.execute(&mut ctx)? {
            Execution::Done(completed) => {
                if let Some(undoable) = completed.undoable {
                    tracing::debug!(command = %undoable.description(), "pushed to history");
                    self.history.push(undoable);
                }
                Ok(Dispatched {
                    result: completed.result,
                    command_word,
                    confirmation: None,
                })
            }
            Execution::AwaitingConfirmation(pending) => {
                let prompt = pending.prompt();
                self.pending = Some(pending);
                Ok(Dispatched {
                    result: CommandResult::confirmation(prompt),
                    command_word,
                    confirmation: Some(ConfirmationStatus::Requested),
                })
            }
        }
    }

    /// Resolve the pending confirmation; it is put back only on a rejected answer
    fn answer(
        &mut self,
        pending: Box<dyn Confirmable>,
        text: &str,
    ) -> Result<Dispatched, RecordXError> {
        let answer = match self.config.answer_policy.interpret(text) {
            Ok(answer) => answer,
            Err(err) => {
                self.pending = Some(pending);
                return Err(err);
            }
        };

        let command_word = pending.word();
        match answer {
            Answer::Yes => {
                let completed = pending.confirm(&mut self.store)?;
                if let Some(undoable) = completed.undoable {
                    tracing::debug!(command = %undoable.description(), "pushed to history");
                    self.history.push(undoable);
                }
                Ok(Dispatched {
                    result: completed.result,
                    command_word,
                    confirmation: Some(ConfirmationStatus::Confirmed),
                })
            }
            Answer::No => Ok(Dispatched {
                result: pending.abort(),
                command_word,
                confirmation: Some(ConfirmationStatus::Aborted),
            }),
        }
    }

    fn persist(&mut self, text: &str, submission_id: SubmissionId) -> Result<(), RecordXError> {
        self.command_log.push(text);
        self.sink
            .save(self.store.records(), &self.command_log)
            .map_err(|err| {
                let err = err.with_submission_id(submission_id);
                tracing::error!(
                    error = %err,
                    submission_id = ?err.submission_id(),
                    "snapshot save failed, in-memory change kept"
                );
                RecordXError::from_persistence(&err)
            })
    }

    fn today(&self) -> NaiveDate {
        self.today
            .unwrap_or_else(|| chrono::Local::now().date_naive())
    }

    pub fn state(&self) -> DispatchState {
        if self.pending.is_some() {
            DispatchState::AwaitingConfirmation
        } else {
            DispatchState::Idle
        }
    }

    /// Prompt of the pending confirmation, if any
    pub fn pending_prompt(&self) -> Option<String> {
        self.pending.as_ref().map(|p| p.prompt())
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn history(&self) -> &HistoryTracker {
        &self.history
    }

    pub fn command_log(&self) -> &CommandLog {
        &self.command_log
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn sink(&self) -> &P {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut P {
        &mut self.sink
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use recordx_core::model::{Name, Record};
    use recordx_store::MemorySink;

    fn dispatcher() -> Dispatcher<RecordBook, MemorySink> {
        let book = RecordBook::from_records(vec![Record::new(Name::parse("Alice Pauline").unwrap())]);
        Dispatcher::new(book, MemorySink::new(), EngineConfig::default())
            .with_today(NaiveDate::from_ymd_opt(2024, 6, 1).unwrap())
    }

    #[test]
    fn test_starts_idle() {
        let d = dispatcher();
        assert_eq!(d.state(), DispatchState::Idle);
        assert!(d.pending_prompt().is_none());
        assert!(d.command_log().is_empty());
    }

    #[test]
    fn test_failed_parse_is_not_logged_or_saved() {
        let mut d = dispatcher();
        let err = d.submit("frobnicate").unwrap_err();

        assert!(matches!(err, RecordXError::UnknownCommand { .. }));
        assert!(d.command_log().is_empty());
        assert_eq!(d.sink().save_count(), 0);
    }

    #[test]
    fn test_open_restores_saved_snapshot() {
        let mut first = dispatcher();
        first.submit("add n/Benson Meier").unwrap();
        let sink = first.sink().clone();

        let reopened = Dispatcher::open(sink, EngineConfig::default()).unwrap();

        assert_eq!(reopened.store().len(), 2);
        assert_eq!(reopened.command_log().last(), Some("add n/Benson Meier"));
        assert!(!reopened.history().can_undo());
    }
}
