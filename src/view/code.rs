//! Code tab.

use crate::fragment::Fragment;

pub const GENERATING_TITLE: &str = "Generating Code";
pub const GENERATING_HINT: &str = "Please wait while the code is being generated...";
pub const NO_CODE_TITLE: &str = "No Code Generated";
pub const NO_CODE_HINT: &str = "Please try a more specific request.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodeView<'a> {
    Generating,
    File { name: &'a str, content: &'a str },
    NoCode,
}

pub fn code_view(fragment: &Fragment, is_chat_loading: bool) -> CodeView<'_> {
    if is_chat_loading {
        return CodeView::Generating;
    }
    match fragment.code_file() {
        Some((name, content)) => CodeView::File { name, content },
        None => CodeView::NoCode,
    }
}
