//! Interactive preview using Ratatui.

pub mod app;
pub mod events;
pub mod handler;
pub mod ui;

pub use app::{App, Sources};
pub use handler::run_tui;
