//! Engine configuration

use recordx_core::errors::{ExError, ExErrorKind};
use recordx_core::history::command_log::DEFAULT_COMMAND_LOG_CAPACITY;
use recordx_core::parser::Answer;
use recordx_core::similarity::DEFAULT_THRESHOLD;
use recordx_core::{parse_answer, RecordXError, RedoInvalidation};
use serde::{Deserialize, Serialize};

/// How a pending confirmation reads the next line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnswerPolicy {
    /// Only `y`/`yes`/`n`/`no`; anything else is rejected and the
    /// confirmation stays pending
    #[default]
    Strict,

    /// Anything that is not a yes aborts
    Lenient,
}

impl AnswerPolicy {
    /// Interpret a reply under this policy
    ///
    /// # Errors
    /// `ConfirmationRequired` under `Strict` for an unrecognised reply.
    pub fn interpret(self, text: &str) -> Result<Answer, RecordXError> {
        match (parse_answer(text), self) {
            (Ok(answer), _) => Ok(answer),
            (Err(_), AnswerPolicy::Lenient) => Ok(Answer::No),
            (Err(err), AnswerPolicy::Strict) => Err(err),
        }
    }
}

/// Tunables for a [`Dispatcher`](crate::Dispatcher)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    pub answer_policy: AnswerPolicy,
    /// Raw input lines kept in the command log
    pub command_log_capacity: usize,
    /// Fallback `find` score a name token must reach
    pub similarity_threshold: f64,
    pub redo_invalidation: RedoInvalidation,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            answer_policy: AnswerPolicy::default(),
            command_log_capacity: DEFAULT_COMMAND_LOG_CAPACITY,
            similarity_threshold: DEFAULT_THRESHOLD,
            redo_invalidation: RedoInvalidation::default(),
        }
    }
}

impl EngineConfig {
    /// Reject values the engine cannot run with
    ///
    /// # Errors
    /// `InvalidInput` if the threshold lies outside `[0, 1]` or the log
    /// capacity is zero.
    pub fn validate(&self) -> Result<(), ExError> {
        if !(0.0..=1.0).contains(&self.similarity_threshold) {
            return Err(ExError::new(ExErrorKind::InvalidInput)
                .with_op("engine_config")
                .with_entity_id("similarity_threshold")
                .with_message(format!(
                    "similarity_threshold must be between 0 and 1, got {}",
                    self.similarity_threshold
                )));
        }
        if self.command_log_capacity == 0 {
            return Err(ExError::new(ExErrorKind::InvalidInput)
                .with_op("engine_config")
                .with_entity_id("command_log_capacity")
                .with_message("command_log_capacity must be at least 1"));
        }
        Ok(())
    }
}
