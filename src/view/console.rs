//! Console tab: full stdout, stderr and runtime error transcript.

use crate::execution::{ExecutionResult, RuntimeError};

pub const UNAVAILABLE_TITLE: &str = "Console Not Available";
pub const UNAVAILABLE_HINT: &str = "Console output is only available for Python code interpreter results.";
pub const EMPTY_TITLE: &str = "No Console Output";
pub const EMPTY_HINT: &str = "The code executed without producing console output.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleView<'a> {
    Unavailable,
    Empty,
    Output {
        stdout: &'a [String],
        stderr: &'a [String],
        runtime_error: Option<&'a RuntimeError>,
    },
}

pub fn console<'a>(result: Option<&'a ExecutionResult>, interpreter_template: &str) -> ConsoleView<'a> {
    let Some(result) = result.filter(|r| r.is_interpreter(interpreter_template)) else {
        return ConsoleView::Unavailable;
    };
    if result.has_no_console_output() {
        return ConsoleView::Empty;
    }
    ConsoleView::Output {
        stdout: &result.stdout,
        stderr: &result.stderr,
        runtime_error: result.runtime_error.as_ref(),
    }
}

/// `name: value` followed by the traceback, if any. Both are kept verbatim,
/// embedded newlines included.
pub fn error_transcript(err: &RuntimeError) -> Vec<String> {
    let mut parts = vec![err.headline()];
    parts.extend(err.traceback().map(str::to_string));
    parts
}
