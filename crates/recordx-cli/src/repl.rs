//! Interactive shell and script runner over a [`Dispatcher`]

use std::io::{self, BufRead, Write};

use recordx_core::commands::messages::COMMAND_SUMMARY;
use recordx_core::{RecordStore, RecordXError};
use recordx_engine::{DispatchState, Dispatcher};
use recordx_store::PersistenceSink;
use thiserror::Error;

const PROMPT: &str = "recordx> ";
const CONFIRM_PROMPT: &str = "(y/n)> ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplControl {
    Continue,
    Exit,
}

/// Submit one line and print its feedback followed by the current view
///
/// # Errors
/// The dispatcher's error; nothing is printed for it.
pub fn handle_line<S: RecordStore, P: PersistenceSink>(
    dispatcher: &mut Dispatcher<S, P>,
    line: &str,
    out: &mut impl Write,
) -> Result<ReplControl, ReplError> {
    let result = dispatcher.submit(line)?;
    writeln!(out, "{}", result.feedback)?;
    if result.show_help {
        writeln!(out, "{}", COMMAND_SUMMARY)?;
    }
    if !(result.awaiting_confirmation || result.show_help || result.exit) {
        for (i, record) in dispatcher.store().list().iter().enumerate() {
            writeln!(out, "{:>3}. {}", i + 1, record)?;
        }
    }
    Ok(if result.exit {
        ReplControl::Exit
    } else {
        ReplControl::Continue
    })
}

/// Failure while handling a line
#[derive(Debug, Error)]
pub enum ReplError {
    #[error("{0}")]
    Command(#[from] RecordXError),

    #[error("output error: {0}")]
    Io(#[from] io::Error),
}

/// Read lines until EOF or `exit`
///
/// Blank lines are skipped unless a confirmation is pending, where they are
/// submitted as the answer.
///
/// # Errors
/// Only I/O failures on `input`/`out`; command errors are printed and the
/// loop continues.
pub fn run_repl<S: RecordStore, P: PersistenceSink>(
    dispatcher: &mut Dispatcher<S, P>,
    mut input: impl BufRead,
    out: &mut impl Write,
) -> io::Result<()> {
    writeln!(out, "RecordX. Type `help` for commands, `exit` to quit.")?;
    loop {
        let prompt = match dispatcher.state() {
            DispatchState::Idle => PROMPT,
            DispatchState::AwaitingConfirmation => CONFIRM_PROMPT,
        };
        write!(out, "{}", prompt)?;
        out.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            writeln!(out)?;
            break;
        }
        let line = line.trim();
        if line.is_empty() && dispatcher.state() == DispatchState::Idle {
            continue;
        }

        match handle_line(dispatcher, line, out) {
            Ok(ReplControl::Continue) => {}
            Ok(ReplControl::Exit) => break,
            Err(ReplError::Io(err)) => return Err(err),
            Err(err) => writeln!(out, "{}", err)?,
        }
    }
    Ok(())
}

/// Run every line of `script` in order
///
/// Blank lines and lines starting with `#` are skipped. Each line is echoed
/// after the prompt unless `quiet`.
///
/// # Errors
/// The first failing line, unless `continue_on_error`.
pub fn run_script<S: RecordStore, P: PersistenceSink>(
    dispatcher: &mut Dispatcher<S, P>,
    script: &str,
    continue_on_error: bool,
    quiet: bool,
    out: &mut impl Write,
) -> Result<(), Box<dyn std::error::Error>> {
    for (idx, raw_line) in script.lines().enumerate() {
        let line = raw_line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if !quiet {
            writeln!(out, "{}{}", PROMPT, line)?;
        }

        match handle_line(dispatcher, line, out) {
            Ok(ReplControl::Continue) => {}
            Ok(ReplControl::Exit) => break,
            Err(ReplError::Io(err)) => return Err(err.into()),
            Err(err) if continue_on_error => writeln!(out, "error: {}", err)?,
            Err(err) => return Err(format!("script failed at line {}: {}", idx + 1, err).into()),
        }
    }
    Ok(())
}
