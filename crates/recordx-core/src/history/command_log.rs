//! Bounded log of raw command text

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

pub const DEFAULT_COMMAND_LOG_CAPACITY: usize = 100;

/// Raw input lines of successfully dispatched commands, oldest first
///
/// Once `capacity` entries are held, each append drops the oldest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandLog {
    capacity: usize,
    commands: VecDeque<String>,
}

impl Default for CommandLog {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_COMMAND_LOG_CAPACITY)
    }
}

impl CommandLog {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity,
            commands: VecDeque::new(),
        }
    }

    /// Rebuild a log from saved entries, keeping only the newest `capacity`
    pub fn from_commands(capacity: usize, commands: Vec<String>) -> Self {
        let mut log = Self::with_capacity(capacity);
        for command in commands {
            log.push(command);
        }
        log
    }

    pub fn push(&mut self, command: impl Into<String>) {
        if self.capacity == 0 {
            return;
        }
        while self.commands.len() >= self.capacity {
            self.commands.pop_front();
        }
        self.commands.push_back(command.into());
    }

    pub fn commands(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().map(String::as_str)
    }

    pub fn to_vec(&self) -> Vec<String> {
        self.commands.iter().cloned().collect()
    }

    pub fn last(&self) -> Option<&str> {
        self.commands.back().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
