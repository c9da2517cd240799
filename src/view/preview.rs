//! Primary view of an interpreter result.

use crate::execution::{ExecutionResult, RuntimeError};

pub const NO_VISUAL_OUTPUT_TITLE: &str = "No Visual Output";
pub const NO_VISUAL_OUTPUT_HINT: &str = "Check the Console tab for text output and logs.";

/// What the preview pane shows. Exactly one applies, first match wins:
/// a runtime error, then the first cell's PNG, then the placeholder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimaryView<'a> {
    RuntimeError(&'a RuntimeError),
    Image { png: &'a str },
    NoVisualOutput,
}

pub fn classify(result: &ExecutionResult) -> PrimaryView<'_> {
    if let Some(err) = &result.runtime_error {
        return PrimaryView::RuntimeError(err);
    }
    // Only the first cell is shown, and only its PNG.
    match result.first_png() {
        Some(png) => PrimaryView::Image { png },
        None => PrimaryView::NoVisualOutput,
    }
}
