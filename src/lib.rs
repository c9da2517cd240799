//! Terminal preview of generated code fragments and their sandbox execution
//! results, plus the prompt builder used to request new fragments.

pub mod cli;
pub mod config;
pub mod execution;
pub mod fragment;
pub mod printer;
pub mod prompt;
pub mod templates;
pub mod tui;
pub mod utils;
pub mod view;
