use std::path::PathBuf;

use clap::{ArgGroup, Parser};

use crate::view::Tab;

#[derive(Parser, Debug, Clone)]
#[command(name = "fragview", about = "Preview generated fragments and their sandbox execution results", version)]
#[command(group(ArgGroup::new("mode").args(["print", "prompt", "list_templates"]).multiple(false)))]
pub struct Cli {
    /// Execution result JSON produced by the sandbox.
    #[arg(long, value_name = "FILE")]
    pub result: Option<PathBuf>,

    /// Generated fragment JSON (may be partial while streaming).
    #[arg(long, value_name = "FILE")]
    pub fragment: Option<PathBuf>,

    /// Template registry JSON. Defaults to TEMPLATES_PATH or the built-in registry.
    #[arg(long, value_name = "FILE")]
    pub templates: Option<PathBuf>,

    /// Tab to open (code|preview|console). Defaults to DEFAULT_TAB.
    #[arg(long, value_enum)]
    pub tab: Option<Tab>,

    /// Code generation is still running.
    #[arg(long = "chat-loading")]
    pub chat_loading: bool,

    /// Sandbox execution is still running.
    #[arg(long = "preview-loading")]
    pub preview_loading: bool,

    /// Print the selected tab instead of starting the TUI.
    ///
    /// Implied when stdout is not a terminal.
    #[arg(long)]
    pub print: bool,

    /// Print the generation prompt built from the template registry.
    #[arg(long)]
    pub prompt: bool,

    /// List templates in the registry.
    #[arg(short = 'l', long = "list-templates")]
    pub list_templates: bool,

    /// Write the displayed PNG artifact of the result to PATH.
    #[arg(long = "save-image", value_name = "PATH")]
    pub save_image: Option<PathBuf>,
}

impl Cli {
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }
}
