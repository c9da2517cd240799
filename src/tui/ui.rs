//! UI layout and rendering logic for the TUI.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, Paragraph, Tabs, Wrap},
    Frame,
};

use super::app::App;
use crate::execution::png;
use crate::utils::unicode::truncate_to_width;
use crate::view::{
    code, console, preview, Body, CodeView, ConsoleView, FragmentBody, LogsView, Preview, PrimaryView, TabBar,
};

const LOGS_MAX_HEIGHT: u16 = 8;

/// Render the main UI
pub fn render_ui(frame: &mut Frame, app: &App) {
    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Tab bar
            Constraint::Min(3),    // Body
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    if let Some(view) = app.preview() {
        render_tab_bar(frame, app, &view.tabs, main_layout[0]);
        render_body(frame, app, &view, main_layout[1]);
    }

    render_status_bar(frame, app, main_layout[2]);

    if app.show_help {
        render_help_overlay(frame);
    }
}

fn render_tab_bar(frame: &mut Frame, app: &App, tabs: &TabBar<'_>, area: Rect) {
    let deploy = tabs.deploy.map(|d| {
        format!(
            "Deploy: {} ({})",
            d.url.unwrap_or("no url"),
            d.sbx_id.unwrap_or("no sandbox")
        )
    });
    let deploy_width = deploy
        .as_ref()
        .map(|d| (d.chars().count() as u16 + 2).min(area.width / 2))
        .unwrap_or(0);
    let layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(10), Constraint::Length(deploy_width)])
        .split(area);

    let titles: Vec<Line> = tabs
        .tabs
        .iter()
        .map(|state| {
            let style = if state.enabled {
                Style::default()
            } else {
                Style::default().fg(Color::DarkGray)
            };
            let mut spans = vec![Span::styled(state.tab.label(), style)];
            if state.loading {
                spans.push(Span::styled(format!(" {}", app.spinner()), Style::default().fg(Color::Yellow)));
            }
            Line::from(spans)
        })
        .collect();

    let widget = Tabs::new(titles)
        .block(Block::default().borders(Borders::ALL))
        .select(app.selected_tab.index())
        .highlight_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .divider("|");
    frame.render_widget(widget, layout[0]);

    if let Some(deploy) = deploy {
        let text = truncate_to_width(&deploy, deploy_width.saturating_sub(2) as usize);
        let paragraph = Paragraph::new(text)
            .style(Style::default().fg(Color::Cyan))
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(paragraph, layout[1]);
    }
}

fn render_body(frame: &mut Frame, app: &App, view: &Preview<'_>, area: Rect) {
    match &view.body {
        Body::Code(CodeView::Generating) => render_placeholder(
            frame,
            area,
            Some(app.spinner()),
            code::GENERATING_TITLE,
            code::GENERATING_HINT,
        ),
        Body::Code(CodeView::NoCode) => {
            render_placeholder(frame, area, None, code::NO_CODE_TITLE, code::NO_CODE_HINT)
        }
        Body::Code(CodeView::File { name, content }) => render_code(frame, app, name, content, area),
        Body::Fragment(FragmentBody::Pending) => {}
        Body::Fragment(FragmentBody::Web { url }) => {
            let paragraph = Paragraph::new(format!("Sandbox running at {}", url.unwrap_or("(no url)")))
                .block(Block::default().borders(Borders::ALL).title("Preview"))
                .wrap(Wrap { trim: false });
            frame.render_widget(paragraph, area);
        }
        Body::Fragment(FragmentBody::Interpreter { primary, logs }) => {
            let logs_height = logs
                .as_ref()
                .map(|l| (l.lines.len() as u16 + 1).min(LOGS_MAX_HEIGHT))
                .unwrap_or(0);
            let layout = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Min(3), Constraint::Length(logs_height)])
                .split(area);
            render_primary(frame, app, primary, layout[0]);
            if let Some(logs) = logs {
                render_logs(frame, app, logs, layout[1]);
            }
        }
        Body::Console(view) => render_console(frame, app, view, area),
    }
}

fn render_code(frame: &mut Frame, app: &App, name: &str, content: &str, area: Rect) {
    let total = content.lines().count();
    let gutter = total.to_string().len();
    let lines: Vec<Line> = content
        .lines()
        .enumerate()
        .map(|(i, line)| {
            Line::from(vec![
                Span::styled(format!("{:>gutter$} ", i + 1), Style::default().fg(Color::DarkGray)),
                Span::raw(line.to_string()),
            ])
        })
        .collect();
    let paragraph = Paragraph::new(Text::from(lines))
        .block(Block::default().borders(Borders::ALL).title(name.to_string()))
        .scroll((app.scroll, 0));
    frame.render_widget(paragraph, area);
}

fn render_primary(frame: &mut Frame, app: &App, primary: &PrimaryView<'_>, area: Rect) {
    match primary {
        PrimaryView::RuntimeError(err) => {
            let red = Style::default().fg(Color::Red);
            let mut lines = styled_lines(&err.headline(), red.add_modifier(Modifier::BOLD));
            if let Some(tb) = err.traceback() {
                lines.extend(styled_lines(tb, red));
            }
            let paragraph = Paragraph::new(Text::from(lines))
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(red)
                        .title("Runtime Error")
                        .title_style(red.add_modifier(Modifier::BOLD)),
                )
                .wrap(Wrap { trim: false })
                .scroll((app.scroll, 0));
            frame.render_widget(paragraph, area);
        }
        PrimaryView::Image { png: data } => {
            let lines = vec![
                Line::from(Span::styled(
                    format!("[image] {}", png::caption(data)),
                    Style::default().add_modifier(Modifier::BOLD),
                )),
                Line::from(""),
                Line::from(Span::styled(
                    "Run with --save-image <PATH> to write it to disk.",
                    Style::default().fg(Color::DarkGray),
                )),
            ];
            let paragraph = Paragraph::new(lines)
                .alignment(Alignment::Center)
                .block(Block::default().borders(Borders::ALL).title("Result"));
            frame.render_widget(paragraph, area);
        }
        PrimaryView::NoVisualOutput => render_placeholder(
            frame,
            area,
            None,
            preview::NO_VISUAL_OUTPUT_TITLE,
            preview::NO_VISUAL_OUTPUT_HINT,
        ),
    }
}

/// Logs strip below the primary view. Shares the body scroll offset, clamped
/// so the last line can always be reached.
fn render_logs(frame: &mut Frame, app: &App, logs: &LogsView<'_>, area: Rect) {
    let mut lines = Vec::with_capacity(logs.lines.len());
    for l in &logs.lines {
        let style = if l.is_error() { Style::default().fg(Color::Red) } else { Style::default() };
        lines.extend(styled_lines(l.text, style));
    }

    let total = lines.len();
    let visible = area.height.saturating_sub(1) as usize;
    let offset = (app.scroll as usize).min(total.saturating_sub(visible));
    let title = if total > visible {
        format!("Logs {}-{} of {} (↑/↓ to scroll)", offset + 1, offset + visible, total)
    } else {
        "Logs".to_string()
    };

    let paragraph = Paragraph::new(Text::from(lines))
        .block(Block::default().borders(Borders::TOP).title(title))
        .scroll((offset as u16, 0));
    frame.render_widget(paragraph, area);
}

fn render_console(frame: &mut Frame, app: &App, view: &ConsoleView<'_>, area: Rect) {
    let (stdout, stderr, runtime_error) = match view {
        ConsoleView::Unavailable => {
            return render_placeholder(frame, area, None, console::UNAVAILABLE_TITLE, console::UNAVAILABLE_HINT)
        }
        ConsoleView::Empty => {
            return render_placeholder(frame, area, None, console::EMPTY_TITLE, console::EMPTY_HINT)
        }
        ConsoleView::Output { stdout, stderr, runtime_error } => (stdout, stderr, runtime_error),
    };

    let header = Style::default().add_modifier(Modifier::BOLD);
    let red = Style::default().fg(Color::Red);
    let mut lines = Vec::new();
    if !stdout.is_empty() {
        lines.push(Line::from(Span::styled("Standard Output", header.fg(Color::Gray))));
        for l in stdout.iter() {
            lines.extend(styled_lines(l, Style::default()));
        }
        lines.push(Line::from(""));
    }
    if !stderr.is_empty() {
        lines.push(Line::from(Span::styled("Standard Error", header.fg(Color::Red))));
        for l in stderr.iter() {
            lines.extend(styled_lines(l, red));
        }
        lines.push(Line::from(""));
    }
    if let Some(err) = runtime_error {
        lines.push(Line::from(Span::styled("Runtime Error", header.fg(Color::Red))));
        for part in console::error_transcript(err) {
            lines.extend(styled_lines(&part, red));
        }
    }

    let paragraph = Paragraph::new(Text::from(lines))
        .block(Block::default().borders(Borders::ALL).title("Console"))
        .wrap(Wrap { trim: false })
        .scroll((app.scroll, 0));
    frame.render_widget(paragraph, area);
}

/// One line per `\n`-separated segment, empty segments included, so
/// multi-line values keep their shape.
fn styled_lines(text: &str, style: Style) -> Vec<Line<'static>> {
    text.split('\n')
        .map(|l| Line::from(Span::styled(l.trim_end_matches('\r').to_string(), style)))
        .collect()
}

fn render_placeholder(frame: &mut Frame, area: Rect, icon: Option<&str>, title: &str, hint: &str) {
    let muted = Style::default().fg(Color::DarkGray);
    let mut lines = Vec::new();
    if let Some(icon) = icon {
        lines.push(Line::from(Span::styled(icon.to_string(), Style::default().fg(Color::Yellow))));
    }
    lines.push(Line::from(Span::styled(title.to_string(), Style::default().add_modifier(Modifier::BOLD))));
    lines.push(Line::from(Span::styled(hint.to_string(), muted)));

    let height = lines.len() as u16;
    let inner = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Fill(1),
            Constraint::Length(height),
            Constraint::Fill(1),
        ])
        .split(area);
    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, inner[1]);
}

/// Render the status bar
fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let text = truncate_to_width(&app.status_message, area.width as usize);
    let status_paragraph =
        Paragraph::new(text).style(Style::default().bg(Color::DarkGray).fg(Color::White));
    frame.render_widget(status_paragraph, area);
}

/// Render help overlay
fn render_help_overlay(frame: &mut Frame) {
    let popup_area = centered_rect(60, 60, frame.area());
    frame.render_widget(Clear, popup_area);

    let help_lines = vec![
        Line::from("Tabs:"),
        Line::from("  1 / 2 / 3      - Code / Preview / Console"),
        Line::from("  Tab / S-Tab    - Next / previous enabled tab"),
        Line::from(""),
        Line::from("Navigation:"),
        Line::from("  ↑/↓            - Scroll"),
        Line::from("  PgUp/PgDn      - Scroll a page"),
        Line::from(""),
        Line::from("Other:"),
        Line::from("  r              - Reload input files"),
        Line::from("  F1 / ?         - Toggle this help"),
        Line::from("  q / Esc        - Quit"),
    ];

    let help_paragraph = Paragraph::new(Text::from(help_lines))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Help")
                .title_style(
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                ),
        )
        .wrap(Wrap { trim: false });

    frame.render_widget(help_paragraph, popup_area);
}

/// Helper function to create a centered rectangle
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::execution::{CellResult, ExecutionResult, RuntimeError};
    use crate::fragment::Fragment;
    use crate::view::{LoadingFlags, Tab};
    use ratatui::{backend::TestBackend, buffer::Buffer, Terminal};

    const CI: &str = "code-interpreter-v1";

    fn draw(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 24)).unwrap();
        terminal.draw(|f| render_ui(f, app)).unwrap();
        buffer_text(terminal.backend().buffer())
    }

    fn buffer_text(buf: &Buffer) -> String {
        let width = buf.area.width as usize;
        let mut out = String::new();
        for (i, cell) in buf.content().iter().enumerate() {
            out.push_str(cell.symbol());
            if (i + 1) % width == 0 {
                out.push('\n');
            }
        }
        out
    }

    fn app(fragment: Option<Fragment>, result: Option<ExecutionResult>, tab: Tab) -> App {
        App::new(fragment, result, LoadingFlags::default(), tab, CI.into())
    }

    #[test]
    fn no_fragment_draws_only_status() {
        let text = draw(&app(None, None, Tab::Code));
        assert!(!text.contains("Code"));
        assert!(text.contains("No fragment loaded"));
    }

    #[test]
    fn runtime_error_panel_wins_over_image() {
        let result = ExecutionResult {
            template: CI.into(),
            runtime_error: Some(RuntimeError {
                name: "ZeroDivisionError".into(),
                value: "division by zero".into(),
                traceback: Some("Cell In[1], line 1\n----> 1 1/0".into()),
            }),
            cell_results: vec![CellResult { png: Some("AAAA".into()), ..Default::default() }],
            ..Default::default()
        };
        let text = draw(&app(Some(Fragment::default()), Some(result), Tab::Fragment));
        assert!(text.contains("ZeroDivisionError: division by zero"));
        assert!(text.contains("----> 1 1/0"));
        assert!(!text.contains("[image]"));
    }

    #[test]
    fn long_error_value_wraps_in_body() {
        let value = format!("could not convert string to float: '{}' END_OF_VALUE", "x".repeat(60));
        let result = ExecutionResult {
            template: CI.into(),
            runtime_error: Some(RuntimeError {
                name: "ValueError".into(),
                value,
                traceback: None,
            }),
            ..Default::default()
        };
        let a = app(Some(Fragment::default()), Some(result), Tab::Fragment);
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        terminal.draw(|f| render_ui(f, &a)).unwrap();
        let text = buffer_text(terminal.backend().buffer());
        assert!(text.contains("Runtime Error"));
        assert!(text.contains("ValueError: could not convert string to float"));
        assert!(text.contains("END_OF_VALUE"));
    }

    #[test]
    fn multiline_error_value_keeps_its_lines() {
        let result = ExecutionResult {
            template: CI.into(),
            runtime_error: Some(RuntimeError {
                name: "AssertionError".into(),
                value: "first half\nsecond half".into(),
                traceback: Some("tb line".into()),
            }),
            ..Default::default()
        };
        let text = draw(&app(Some(Fragment::default()), Some(result), Tab::Fragment));
        let rows: Vec<&str> = text.lines().collect();
        let first = rows.iter().position(|r| r.contains("AssertionError: first half")).unwrap();
        assert!(rows[first + 1].contains("second half"));
        assert!(rows[first + 2].contains("tb line"));
    }

    #[test]
    fn long_logs_scroll_to_the_last_line() {
        let result = ExecutionResult {
            template: CI.into(),
            stdout: (1..=10).map(|i| format!("out-{i:02}")).collect(),
            ..Default::default()
        };
        let mut a = app(Some(Fragment::default()), Some(result), Tab::Fragment);
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();

        terminal.draw(|f| render_ui(f, &a)).unwrap();
        let text = buffer_text(terminal.backend().buffer());
        assert!(text.contains("out-01"));
        assert!(text.contains("Logs 1-7 of 10"));

        a.scroll_down(50);
        terminal.draw(|f| render_ui(f, &a)).unwrap();
        let text = buffer_text(terminal.backend().buffer());
        assert!(text.contains("out-10"));
        assert!(!text.contains("out-01"));
        assert!(text.contains("Logs 4-10 of 10"));
    }

    #[test]
    fn empty_interpreter_result_shows_placeholder() {
        let result = ExecutionResult { template: CI.into(), ..Default::default() };
        let text = draw(&app(Some(Fragment::default()), Some(result), Tab::Fragment));
        assert!(text.contains(preview::NO_VISUAL_OUTPUT_TITLE));
        assert!(!text.contains("Logs"));
    }

    #[test]
    fn logs_strip_under_primary_view() {
        let result = ExecutionResult {
            template: CI.into(),
            stdout: vec!["first".into(), "second".into()],
            ..Default::default()
        };
        let text = draw(&app(Some(Fragment::default()), Some(result), Tab::Fragment));
        let first = text.find("first").unwrap();
        let second = text.find("second").unwrap();
        assert!(text.contains("Logs"));
        assert!(first < second);
    }

    #[test]
    fn console_sections_and_deploy() {
        let result = ExecutionResult {
            template: CI.into(),
            stdout: vec!["42".into()],
            stderr: vec!["DeprecationWarning".into()],
            ..Default::default()
        };
        let text = draw(&app(Some(Fragment::default()), Some(result), Tab::Console));
        assert!(text.contains("Standard Output"));
        assert!(text.contains("Standard Error"));
        assert!(text.find("42").unwrap() < text.find("DeprecationWarning").unwrap());
        assert!(!text.contains("Deploy:"));

        let web = ExecutionResult {
            template: "nextjs-developer".into(),
            url: Some("https://3000-x.e2b.dev".into()),
            sbx_id: Some("x".into()),
            ..Default::default()
        };
        let text = draw(&app(Some(Fragment::default()), Some(web), Tab::Console));
        assert!(text.contains("Deploy: https://3000-x.e2b.dev (x)"));
        assert!(text.contains(console::UNAVAILABLE_TITLE));
    }

    #[test]
    fn code_tab_with_line_numbers() {
        let fragment = Fragment {
            file_path: Some("script.py".into()),
            code: Some("import numpy as np\nprint(np.pi)".into()),
            ..Default::default()
        };
        let text = draw(&app(Some(fragment), None, Tab::Code));
        assert!(text.contains("script.py"));
        assert!(text.contains("1 import numpy as np"));
        assert!(text.contains("2 print(np.pi)"));
    }

    #[test]
    fn generating_placeholder_while_chat_loading() {
        let mut a = app(Some(Fragment::default()), None, Tab::Code);
        a.flags.is_chat_loading = true;
        let text = draw(&a);
        assert!(text.contains(code::GENERATING_TITLE));
    }

    #[test]
    fn help_overlay() {
        let mut a = app(Some(Fragment::default()), None, Tab::Code);
        a.toggle_help();
        assert!(draw(&a).contains("Reload input files"));
    }
}
