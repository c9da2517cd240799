//! Tab availability, loading spinners and the deploy affordance.

use clap::ValueEnum;

use super::LoadingFlags;
use crate::execution::ExecutionResult;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, ValueEnum)]
pub enum Tab {
    #[default]
    Code,
    #[value(alias = "preview")]
    Fragment,
    Console,
}

impl Tab {
    pub const ALL: [Tab; 3] = [Tab::Code, Tab::Fragment, Tab::Console];

    pub fn label(self) -> &'static str {
        match self {
            Tab::Code => "Code",
            Tab::Fragment => "Preview",
            Tab::Console => "Console",
        }
    }

    pub fn index(self) -> usize {
        match self {
            Tab::Code => 0,
            Tab::Fragment => 1,
            Tab::Console => 2,
        }
    }

    /// Parse a config value such as `code`, `preview` or `Console`.
    pub fn parse(s: &str) -> Option<Tab> {
        <Tab as ValueEnum>::from_str(s.trim(), true).ok()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TabState {
    pub tab: Tab,
    pub enabled: bool,
    /// Show a spinner next to the label.
    pub loading: bool,
}

/// Link to the running sandbox of a non-interpreter result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Deploy<'a> {
    pub url: Option<&'a str>,
    pub sbx_id: Option<&'a str>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TabBar<'a> {
    pub tabs: [TabState; 3],
    pub deploy: Option<Deploy<'a>>,
}

pub fn tab_bar<'a>(
    result: Option<&'a ExecutionResult>,
    flags: LoadingFlags,
    interpreter_template: &str,
) -> TabBar<'a> {
    let is_interpreter = result.is_some_and(|r| r.is_interpreter(interpreter_template));
    let tabs = [
        TabState { tab: Tab::Code, enabled: true, loading: flags.is_chat_loading },
        TabState { tab: Tab::Fragment, enabled: result.is_some(), loading: flags.is_preview_loading },
        TabState { tab: Tab::Console, enabled: is_interpreter, loading: false },
    ];
    let deploy = result
        .filter(|_| !is_interpreter)
        .map(|r| Deploy { url: r.url.as_deref(), sbx_id: r.sbx_id.as_deref() });
    TabBar { tabs, deploy }
}

impl TabBar<'_> {
    pub fn state(&self, tab: Tab) -> TabState {
        self.tabs[tab.index()]
    }

    pub fn is_enabled(&self, tab: Tab) -> bool {
        self.state(tab).enabled
    }

    /// Next enabled tab after `from`, wrapping around. Returns `from` when no
    /// other tab is enabled.
    pub fn cycle(&self, from: Tab, forward: bool) -> Tab {
        let n = Tab::ALL.len();
        (1..n)
            .map(|step| {
                let i = if forward { from.index() + step } else { from.index() + n - step };
                Tab::ALL[i % n]
            })
            .find(|t| self.is_enabled(*t))
            .unwrap_or(from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CI: &str = "code-interpreter-v1";

    fn result(template: &str) -> ExecutionResult {
        ExecutionResult {
            template: template.into(),
            url: Some("https://3000-abc.e2b.dev".into()),
            sbx_id: Some("abc".into()),
            ..Default::default()
        }
    }

    #[test]
    fn without_result_only_code_is_enabled() {
        let bar = tab_bar(None, LoadingFlags::default(), CI);
        assert!(bar.is_enabled(Tab::Code));
        assert!(!bar.is_enabled(Tab::Fragment));
        assert!(!bar.is_enabled(Tab::Console));
        assert!(bar.deploy.is_none());
    }

    #[test]
    fn interpreter_result_enables_console_and_hides_deploy() {
        let r = result(CI);
        let bar = tab_bar(Some(&r), LoadingFlags::default(), CI);
        assert!(bar.tabs.iter().all(|t| t.enabled));
        assert!(bar.deploy.is_none());
    }

    #[test]
    fn web_result_disables_console_and_offers_deploy() {
        let r = result("nextjs-developer");
        let bar = tab_bar(Some(&r), LoadingFlags::default(), CI);
        assert!(bar.is_enabled(Tab::Fragment));
        assert!(!bar.is_enabled(Tab::Console));
        assert_eq!(
            bar.deploy,
            Some(Deploy { url: Some("https://3000-abc.e2b.dev"), sbx_id: Some("abc") })
        );
    }

    #[test]
    fn spinners_follow_flags() {
        let flags = LoadingFlags { is_chat_loading: true, is_preview_loading: false };
        let bar = tab_bar(None, flags, CI);
        assert!(bar.state(Tab::Code).loading);
        assert!(!bar.state(Tab::Fragment).loading);

        let flags = LoadingFlags { is_chat_loading: false, is_preview_loading: true };
        let bar = tab_bar(None, flags, CI);
        assert!(bar.state(Tab::Fragment).loading);
        assert!(!bar.state(Tab::Console).loading);
    }

    #[test]
    fn cycle_skips_disabled_tabs() {
        let r = result("streamlit-developer");
        let bar = tab_bar(Some(&r), LoadingFlags::default(), CI);
        assert_eq!(bar.cycle(Tab::Code, true), Tab::Fragment);
        assert_eq!(bar.cycle(Tab::Fragment, true), Tab::Code);
        assert_eq!(bar.cycle(Tab::Code, false), Tab::Fragment);

        let bar = tab_bar(None, LoadingFlags::default(), CI);
        assert_eq!(bar.cycle(Tab::Code, true), Tab::Code);
    }

    #[test]
    fn parse_accepts_aliases() {
        assert_eq!(Tab::parse("preview"), Some(Tab::Fragment));
        assert_eq!(Tab::parse(" Console "), Some(Tab::Console));
        assert_eq!(Tab::parse("logs"), None);
    }
}
