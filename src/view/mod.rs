//! Stateless view models for the fragment preview.
//!
//! Every function here maps already-computed inputs to a descriptor; the TUI
//! and the printer only draw what these return.

pub mod code;
pub mod console;
pub mod logs;
pub mod preview;
pub mod tabs;

pub use code::{code_view, CodeView};
pub use console::{console, ConsoleView};
pub use logs::{logs_output, LogLine, LogsView, Stream};
pub use preview::{classify, PrimaryView};
pub use tabs::{tab_bar, Deploy, Tab, TabBar, TabState};

use crate::execution::ExecutionResult;
use crate::fragment::Fragment;

/// Loading state owned by whoever drives generation and execution.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadingFlags {
    pub is_chat_loading: bool,
    pub is_preview_loading: bool,
}

/// Body of the preview tab.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FragmentBody<'a> {
    /// Nothing has been executed yet.
    Pending,
    Interpreter {
        primary: PrimaryView<'a>,
        logs: Option<LogsView<'a>>,
    },
    /// Web templates run as a live sandbox reachable by URL.
    Web { url: Option<&'a str> },
}

pub fn fragment_body<'a>(result: Option<&'a ExecutionResult>, interpreter_template: &str) -> FragmentBody<'a> {
    match result {
        None => FragmentBody::Pending,
        Some(r) if r.is_interpreter(interpreter_template) => FragmentBody::Interpreter {
            primary: classify(r),
            logs: logs_output(&r.stdout, &r.stderr),
        },
        Some(r) => FragmentBody::Web { url: r.url.as_deref() },
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Body<'a> {
    Code(CodeView<'a>),
    Fragment(FragmentBody<'a>),
    Console(ConsoleView<'a>),
}

/// Tab bar plus the body of the selected tab.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preview<'a> {
    pub selected: Tab,
    pub tabs: TabBar<'a>,
    pub body: Body<'a>,
}

impl<'a> Preview<'a> {
    /// `None` when there is no fragment yet: nothing is drawn at all.
    pub fn build(
        fragment: Option<&'a Fragment>,
        result: Option<&'a ExecutionResult>,
        flags: LoadingFlags,
        selected: Tab,
        interpreter_template: &str,
    ) -> Option<Self> {
        let fragment = fragment?;
        let body = match selected {
            Tab::Code => Body::Code(code_view(fragment, flags.is_chat_loading)),
            Tab::Fragment => Body::Fragment(fragment_body(result, interpreter_template)),
            Tab::Console => Body::Console(console(result, interpreter_template)),
        };
        Some(Self {
            selected,
            tabs: tab_bar(result, flags, interpreter_template),
            body,
        })
    }
}
