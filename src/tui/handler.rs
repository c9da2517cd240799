//! Async event loop for the interactive viewer.

use std::io;
use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::ExecutableCommand;
use ratatui::prelude::*;
use tokio::sync::mpsc;

use super::{
    app::{App, Sources},
    events::TuiEvent,
    ui::render_ui,
};
use crate::view::Tab;

const PAGE: u16 = 10;

/// Run the interactive viewer until the user quits.
pub async fn run_tui(mut app: App, sources: Sources, tick_rate: Duration) -> Result<()> {
    if !io::IsTerminal::is_terminal(&io::stdout()) {
        return Err(anyhow::anyhow!("TUI mode requires a proper terminal environment"));
    }

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app, &sources, tick_rate).await;

    // Restore terminal
    disable_raw_mode()?;
    terminal.backend_mut().execute(LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    sources: &Sources,
    tick_rate: Duration,
) -> Result<()> {
    let (event_tx, mut event_rx) = mpsc::unbounded_channel::<TuiEvent>();

    // Keyboard polling runs on a blocking thread and stops once the channel closes.
    let input_tx = event_tx.clone();
    tokio::task::spawn_blocking(move || loop {
        if event::poll(Duration::from_millis(100)).unwrap_or(false) {
            if let Ok(Event::Key(key)) = event::read() {
                if input_tx.send(TuiEvent::Key(key)).is_err() {
                    break;
                }
            }
        } else if input_tx.is_closed() {
            break;
        }
    });

    let tick_tx = event_tx.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(tick_rate);
        loop {
            interval.tick().await;
            if tick_tx.send(TuiEvent::Tick).is_err() {
                break;
            }
        }
    });

    loop {
        terminal.draw(|frame| render_ui(frame, app))?;

        let Some(tui_event) = event_rx.recv().await else {
            break;
        };
        match tui_event {
            TuiEvent::Key(key) => {
                if let Some(follow_up) = handle_key_event(app, key) {
                    let _ = event_tx.send(follow_up);
                }
            }
            TuiEvent::Tick => app.tick(),
            TuiEvent::Reload => reload(app, sources),
            TuiEvent::Quit => break,
        }
    }

    Ok(())
}

fn reload(app: &mut App, sources: &Sources) {
    match sources.load() {
        Ok((fragment, result)) => {
            tracing::info!(
                fragment = fragment.is_some(),
                result = result.is_some(),
                "reloaded inputs"
            );
            app.replace_inputs(fragment, result);
        }
        Err(e) => {
            tracing::warn!(error = %format!("{e:#}"), "reload failed");
            app.set_status(format!("Reload failed: {e:#}"));
        }
    }
}

/// Apply a key press to the app. Returns an event the loop should process
/// next (quit or reload), if any.
pub fn handle_key_event(app: &mut App, key: KeyEvent) -> Option<TuiEvent> {
    if key.kind == KeyEventKind::Release {
        return None;
    }

    if app.show_help {
        app.toggle_help();
        return None;
    }

    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => return Some(TuiEvent::Quit),
        KeyCode::Char('q') | KeyCode::Esc => return Some(TuiEvent::Quit),
        KeyCode::Char('r') => return Some(TuiEvent::Reload),
        KeyCode::F(1) | KeyCode::Char('?') => app.toggle_help(),
        KeyCode::Char('1') => {
            app.select_tab(Tab::Code);
        }
        KeyCode::Char('2') => {
            app.select_tab(Tab::Fragment);
        }
        KeyCode::Char('3') => {
            app.select_tab(Tab::Console);
        }
        KeyCode::Tab => {
            app.cycle_tab(true);
        }
        KeyCode::BackTab => {
            app.cycle_tab(false);
        }
        KeyCode::Up => app.scroll_up(1),
        KeyCode::Down => app.scroll_down(1),
        KeyCode::PageUp => app.scroll_up(PAGE),
        KeyCode::PageDown => app.scroll_down(PAGE),
        KeyCode::Home => app.scroll = 0,
        _ => {}
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::execution::ExecutionResult;
    use crate::fragment::Fragment;
    use crate::view::LoadingFlags;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn app() -> App {
        let result = ExecutionResult { template: "code-interpreter-v1".into(), ..Default::default() };
        App::new(
            Some(Fragment::default()),
            Some(result),
            LoadingFlags::default(),
            Tab::Code,
            "code-interpreter-v1".into(),
        )
    }

    #[test]
    fn quit_keys() {
        let mut a = app();
        assert!(matches!(handle_key_event(&mut a, key(KeyCode::Char('q'))), Some(TuiEvent::Quit)));
        assert!(matches!(handle_key_event(&mut a, key(KeyCode::Esc)), Some(TuiEvent::Quit)));
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert!(matches!(handle_key_event(&mut a, ctrl_c), Some(TuiEvent::Quit)));
    }

    #[test]
    fn number_keys_switch_tabs() {
        let mut a = app();
        handle_key_event(&mut a, key(KeyCode::Char('3')));
        assert_eq!(a.selected_tab, Tab::Console);
        handle_key_event(&mut a, key(KeyCode::Tab));
        assert_eq!(a.selected_tab, Tab::Code);
        handle_key_event(&mut a, key(KeyCode::BackTab));
        assert_eq!(a.selected_tab, Tab::Console);
    }

    #[test]
    fn help_swallows_next_key() {
        let mut a = app();
        handle_key_event(&mut a, key(KeyCode::F(1)));
        assert!(a.show_help);
        assert!(handle_key_event(&mut a, key(KeyCode::Char('q'))).is_none());
        assert!(!a.show_help);
    }

    #[test]
    fn reload_and_scroll() {
        let mut a = app();
        assert!(matches!(handle_key_event(&mut a, key(KeyCode::Char('r'))), Some(TuiEvent::Reload)));
        handle_key_event(&mut a, key(KeyCode::PageDown));
        handle_key_event(&mut a, key(KeyCode::Up));
        assert_eq!(a.scroll, PAGE - 1);
        handle_key_event(&mut a, key(KeyCode::Home));
        assert_eq!(a.scroll, 0);
    }

    #[test]
    fn failed_reload_sets_status() {
        let mut a = app();
        let sources = Sources { fragment: Some("/nonexistent/fragment.json".into()), result: None };
        reload(&mut a, &sources);
        assert!(a.status_message.starts_with("Reload failed"));
        assert!(a.fragment.is_some());
    }
}
