//! Compact stdout/stderr strip.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stream {
    Stdout,
    Stderr,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogLine<'a> {
    pub stream: Stream,
    pub text: &'a str,
}

impl LogLine<'_> {
    pub fn is_error(&self) -> bool {
        self.stream == Stream::Stderr
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogsView<'a> {
    pub lines: Vec<LogLine<'a>>,
}

/// All stdout lines, then all stderr lines. `None` when both are empty so the
/// strip is not drawn at all.
pub fn logs_output<'a>(stdout: &'a [String], stderr: &'a [String]) -> Option<LogsView<'a>> {
    if stdout.is_empty() && stderr.is_empty() {
        return None;
    }
    let lines = stdout
        .iter()
        .map(|text| LogLine { stream: Stream::Stdout, text })
        .chain(stderr.iter().map(|text| LogLine { stream: Stream::Stderr, text }))
        .collect();
    Some(LogsView { lines })
}
