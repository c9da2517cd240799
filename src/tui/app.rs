//! TUI application state management.

use std::path::PathBuf;

use anyhow::Result;

use crate::execution::ExecutionResult;
use crate::fragment::Fragment;
use crate::view::{tab_bar, LoadingFlags, Preview, Tab};

const SPINNER: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Files the viewer was started with; re-read on reload.
#[derive(Debug, Clone, Default)]
pub struct Sources {
    pub fragment: Option<PathBuf>,
    pub result: Option<PathBuf>,
}

impl Sources {
    pub fn load(&self) -> Result<(Option<Fragment>, Option<ExecutionResult>)> {
        let fragment = self.fragment.as_deref().map(Fragment::load).transpose()?;
        let result = self.result.as_deref().map(ExecutionResult::load).transpose()?;
        Ok((fragment, result))
    }
}

/// Application state for the TUI. The selected tab and loading flags live
/// here; views are derived from them on every frame.
#[derive(Debug)]
pub struct App {
    pub fragment: Option<Fragment>,
    pub result: Option<ExecutionResult>,
    pub flags: LoadingFlags,
    pub selected_tab: Tab,
    pub interpreter_template: String,
    /// Vertical scroll of the body, in lines
    pub scroll: u16,
    pub show_help: bool,
    pub spinner_frame: usize,
    pub status_message: String,
}

impl App {
    pub fn new(
        fragment: Option<Fragment>,
        result: Option<ExecutionResult>,
        flags: LoadingFlags,
        selected_tab: Tab,
        interpreter_template: String,
    ) -> Self {
        let mut app = Self {
            fragment,
            result,
            flags,
            selected_tab,
            interpreter_template,
            scroll: 0,
            show_help: false,
            spinner_frame: 0,
            status_message: String::new(),
        };
        app.update_status_message();
        app
    }

    pub fn preview(&self) -> Option<Preview<'_>> {
        Preview::build(
            self.fragment.as_ref(),
            self.result.as_ref(),
            self.flags,
            self.selected_tab,
            &self.interpreter_template,
        )
    }

    /// Switch to `tab` if it is enabled. Returns whether the selection changed.
    pub fn select_tab(&mut self, tab: Tab) -> bool {
        let bar = tab_bar(self.result.as_ref(), self.flags, &self.interpreter_template);
        if tab == self.selected_tab || !bar.is_enabled(tab) {
            return false;
        }
        tracing::debug!(from = ?self.selected_tab, to = ?tab, "tab changed");
        self.selected_tab = tab;
        self.scroll = 0;
        true
    }

    pub fn cycle_tab(&mut self, forward: bool) -> bool {
        let bar = tab_bar(self.result.as_ref(), self.flags, &self.interpreter_template);
        let next = bar.cycle(self.selected_tab, forward);
        self.select_tab(next)
    }

    pub fn scroll_up(&mut self, lines: u16) {
        self.scroll = self.scroll.saturating_sub(lines);
    }

    pub fn scroll_down(&mut self, lines: u16) {
        self.scroll = self.scroll.saturating_add(lines);
    }

    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    pub fn is_loading(&self) -> bool {
        self.flags.is_chat_loading || self.flags.is_preview_loading
    }

    /// Advance the spinner; only moves while something is loading.
    pub fn tick(&mut self) {
        if self.is_loading() {
            self.spinner_frame = (self.spinner_frame + 1) % SPINNER.len();
        }
    }

    pub fn spinner(&self) -> &'static str {
        SPINNER[self.spinner_frame]
    }

    /// Swap in freshly loaded inputs, keeping the caller's tab selection.
    pub fn replace_inputs(&mut self, fragment: Option<Fragment>, result: Option<ExecutionResult>) {
        self.fragment = fragment;
        self.result = result;
        self.scroll = 0;
        self.update_status_message();
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = message.into();
    }

    fn update_status_message(&mut self) {
        self.status_message = match (&self.fragment, &self.result) {
            (None, _) => "No fragment loaded | r reload | q quit".to_string(),
            (Some(_), None) => "Not executed yet | 1-3/tab switch | F1 help".to_string(),
            (Some(_), Some(r)) => format!("Template: {} | 1-3/tab switch | F1 help", r.template),
        };
    }
}
