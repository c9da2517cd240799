//! Printers: plain/colored text and markdown (termimad).

use owo_colors::OwoColorize;
use termimad::MadSkin;

use crate::execution::png;
use crate::view::{
    code, console, preview, Body, CodeView, ConsoleView, FragmentBody, LogsView, Preview, PrimaryView, TabBar,
};

pub struct TextPrinter {
    pub color: bool,
    pub markdown: bool,
}

impl TextPrinter {
    pub fn print(&self, view: &Preview<'_>) {
        if self.markdown {
            if let Body::Code(CodeView::File { name, content }) = &view.body {
                println!("{}", tab_line(&view.tabs, view.selected, self.color));
                MarkdownPrinter::default().print(&fenced(name, content));
                return;
            }
        }
        for line in render_lines(view, self.color) {
            println!("{line}");
        }
    }
}

pub struct MarkdownPrinter {
    pub skin: MadSkin,
}

impl Default for MarkdownPrinter {
    fn default() -> Self {
        Self { skin: MadSkin::default() }
    }
}

impl MarkdownPrinter {
    pub fn print(&self, text: &str) {
        self.skin.print_text(text);
        println!();
    }
}

fn fenced(name: &str, content: &str) -> String {
    let lang = name.rsplit_once('.').map(|(_, ext)| ext).unwrap_or("");
    format!("**{name}**\n\n```{lang}\n{content}\n```")
}

fn red(text: &str, color: bool) -> String {
    if color { text.red().to_string() } else { text.to_string() }
}

fn heading(text: &str, color: bool) -> String {
    if color { text.bold().to_string() } else { text.to_string() }
}

fn placeholder(title: &str, hint: &str, color: bool) -> Vec<String> {
    vec![heading(title, color), hint.to_string()]
}

/// `[Code *] | Preview | (Console)`: selected in brackets, disabled in
/// parentheses, `*` while loading.
pub fn tab_line(tabs: &TabBar<'_>, selected: crate::view::Tab, color: bool) -> String {
    let mut parts = Vec::with_capacity(tabs.tabs.len());
    for state in tabs.tabs {
        let mut label = state.tab.label().to_string();
        if state.loading {
            label.push_str(" *");
        }
        let label = if state.tab == selected {
            format!("[{label}]")
        } else if !state.enabled {
            format!("({label})")
        } else {
            label
        };
        parts.push(label);
    }
    let mut line = parts.join(" | ");
    if let Some(deploy) = tabs.deploy {
        let deploy = format!(
            "  Deploy: {} (sandbox {})",
            deploy.url.unwrap_or("-"),
            deploy.sbx_id.unwrap_or("-")
        );
        line.push_str(&if color { deploy.cyan().to_string() } else { deploy });
    }
    line
}

pub fn render_lines(view: &Preview<'_>, color: bool) -> Vec<String> {
    let mut out = vec![tab_line(&view.tabs, view.selected, color), String::new()];
    match &view.body {
        Body::Code(CodeView::Generating) => {
            out.extend(placeholder(code::GENERATING_TITLE, code::GENERATING_HINT, color))
        }
        Body::Code(CodeView::NoCode) => out.extend(placeholder(code::NO_CODE_TITLE, code::NO_CODE_HINT, color)),
        Body::Code(CodeView::File { name, content }) => {
            out.push(heading(name, color));
            out.extend(content.lines().map(str::to_string));
        }
        Body::Fragment(FragmentBody::Pending) => {}
        Body::Fragment(FragmentBody::Web { url }) => {
            out.push(format!("Sandbox running at {}", url.unwrap_or("(no url)")));
        }
        Body::Fragment(FragmentBody::Interpreter { primary, logs }) => {
            out.extend(primary_lines(primary, color));
            if let Some(logs) = logs {
                out.push(String::new());
                out.extend(log_lines(logs, color));
            }
        }
        Body::Console(view) => out.extend(console_lines(view, color)),
    }
    out
}

fn primary_lines(primary: &PrimaryView<'_>, color: bool) -> Vec<String> {
    match primary {
        PrimaryView::RuntimeError(err) => console::error_transcript(err)
            .iter()
            .map(|part| red(part, color))
            .collect(),
        PrimaryView::Image { png: data } => vec![format!("[image] {}", png::caption(data))],
        PrimaryView::NoVisualOutput => {
            placeholder(preview::NO_VISUAL_OUTPUT_TITLE, preview::NO_VISUAL_OUTPUT_HINT, color)
        }
    }
}

fn log_lines(logs: &LogsView<'_>, color: bool) -> Vec<String> {
    logs.lines
        .iter()
        .map(|l| if l.is_error() { red(l.text, color) } else { l.text.to_string() })
        .collect()
}

fn console_lines(view: &ConsoleView<'_>, color: bool) -> Vec<String> {
    match view {
        ConsoleView::Unavailable => placeholder(console::UNAVAILABLE_TITLE, console::UNAVAILABLE_HINT, color),
        ConsoleView::Empty => placeholder(console::EMPTY_TITLE, console::EMPTY_HINT, color),
        ConsoleView::Output { stdout, stderr, runtime_error } => {
            let mut out = Vec::new();
            if !stdout.is_empty() {
                out.push(heading("Standard Output", color));
                out.extend(stdout.iter().cloned());
                out.push(String::new());
            }
            if !stderr.is_empty() {
                out.push(red("Standard Error", color));
                out.extend(stderr.iter().map(|l| red(l, color)));
                out.push(String::new());
            }
            if let Some(err) = runtime_error {
                out.push(red("Runtime Error", color));
                out.extend(console::error_transcript(err).iter().map(|l| red(l, color)));
            }
            out
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::execution::{ExecutionResult, RuntimeError};
    use crate::fragment::Fragment;
    use crate::view::{LoadingFlags, Tab};

    const CI: &str = "code-interpreter-v1";

    fn lines(f: &Fragment, r: Option<&ExecutionResult>, flags: LoadingFlags, tab: Tab) -> Vec<String> {
        let view = Preview::build(Some(f), r, flags, tab, CI).unwrap();
        render_lines(&view, false)
    }

    #[test]
    fn tab_line_marks_state() {
        let flags = LoadingFlags { is_chat_loading: true, is_preview_loading: false };
        let out = lines(&Fragment::default(), None, flags, Tab::Code);
        assert_eq!(out[0], "[Code *] | (Preview) | (Console)");
        assert_eq!(out[2], code::GENERATING_TITLE);
    }

    #[test]
    fn deploy_shown_for_web_results() {
        let r = ExecutionResult {
            template: "nextjs-developer".into(),
            url: Some("https://x".into()),
            sbx_id: Some("s1".into()),
            ..Default::default()
        };
        let out = lines(&Fragment::default(), Some(&r), LoadingFlags::default(), Tab::Fragment);
        assert_eq!(out[0], "Code | [Preview] | (Console)  Deploy: https://x (sandbox s1)");
        assert_eq!(out[2], "Sandbox running at https://x");
    }

    #[test]
    fn console_sections_in_order() {
        let r = ExecutionResult {
            template: CI.into(),
            stdout: vec!["1".into()],
            stderr: vec!["warn".into()],
            runtime_error: Some(RuntimeError { name: "E".into(), value: "v".into(), traceback: Some("tb".into()) }),
            ..Default::default()
        };
        let out = lines(&Fragment::default(), Some(&r), LoadingFlags::default(), Tab::Console);
        assert_eq!(
            &out[2..],
            ["Standard Output", "1", "", "Standard Error", "warn", "", "Runtime Error", "E: v", "tb"]
        );
    }

    #[test]
    fn error_panel_prints_traceback_verbatim() {
        let tb = "Traceback (most recent call last):\r\n  File \"<cell>\", line 1\n\n";
        let r = ExecutionResult {
            template: CI.into(),
            runtime_error: Some(RuntimeError { name: "E".into(), value: "v".into(), traceback: Some(tb.into()) }),
            ..Default::default()
        };
        let out = lines(&Fragment::default(), Some(&r), LoadingFlags::default(), Tab::Fragment);
        assert_eq!(&out[2..], ["E: v", tb]);
    }

    #[test]
    fn empty_traceback_not_printed() {
        let r = ExecutionResult {
            template: CI.into(),
            runtime_error: Some(RuntimeError { name: "E".into(), value: "v".into(), traceback: Some(String::new()) }),
            ..Default::default()
        };
        let out = lines(&Fragment::default(), Some(&r), LoadingFlags::default(), Tab::Fragment);
        assert_eq!(&out[2..], ["E: v"]);
        let out = lines(&Fragment::default(), Some(&r), LoadingFlags::default(), Tab::Console);
        assert_eq!(&out[2..], ["Runtime Error", "E: v"]);
    }

    #[test]
    fn code_file_is_printed_with_name() {
        let f = Fragment { file_path: Some("script.py".into()), code: Some("a = 1\nprint(a)".into()), ..Default::default() };
        let out = lines(&f, None, LoadingFlags::default(), Tab::Code);
        assert_eq!(&out[2..], ["script.py", "a = 1", "print(a)"]);
    }

    #[test]
    fn fenced_block_uses_extension() {
        assert_eq!(fenced("app.py", "x"), "**app.py**\n\n```py\nx\n```");
        assert_eq!(fenced("Makefile", "x"), "**Makefile**\n\n```\nx\n```");
    }
}
