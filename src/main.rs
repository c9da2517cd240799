use std::fs::File;
use std::io;
use std::sync::Mutex;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use is_terminal::IsTerminal;
use tracing_subscriber::EnvFilter;

use fragview::{
    cli,
    config::Config,
    execution::{png::PngImage, ExecutionResult},
    printer::TextPrinter,
    prompt::to_prompt,
    templates::TemplateRegistry,
    tui::{self, App, Sources},
    view::{classify, LoadingFlags, Preview, PrimaryView},
};

#[tokio::main]
async fn main() -> Result<()> {
    let args = cli::Cli::parse();
    let cfg = Config::load();

    let stdout_is_tty = io::stdout().is_terminal();
    let interactive = stdout_is_tty && !args.print && !args.prompt && !args.list_templates;
    init_tracing(&cfg, interactive)?;

    // Template registry: CLI overrides config; fall back to the built-in set
    let registry = match args.templates.clone().or_else(|| cfg.templates_path()) {
        Some(path) => TemplateRegistry::load(&path)?,
        None => TemplateRegistry::builtin()?,
    };

    if args.prompt {
        print!("{}", to_prompt(&registry));
        return Ok(());
    }
    if args.list_templates {
        for (id, t) in registry.iter() {
            println!("{:<24} {}", id, t.name);
        }
        return Ok(());
    }

    let sources = Sources { fragment: args.fragment.clone(), result: args.result.clone() };
    let (fragment, result) = sources.load()?;
    let interpreter = cfg.interpreter_template();

    if let Some(path) = &args.save_image {
        save_image(result.as_ref(), &interpreter, path)?;
    }

    let flags = LoadingFlags {
        is_chat_loading: args.chat_loading,
        is_preview_loading: args.preview_loading,
    };
    let tab = args.tab.unwrap_or_else(|| cfg.default_tab());

    if interactive {
        let app = App::new(fragment, result, flags, tab, interpreter);
        return tui::run_tui(app, sources, Duration::from_millis(cfg.tick_rate_ms())).await;
    }

    // Without a fragment there is nothing to show
    if let Some(view) = Preview::build(fragment.as_ref(), result.as_ref(), flags, tab, &interpreter) {
        let printer = TextPrinter {
            color: stdout_is_tty,
            markdown: stdout_is_tty && cfg.get_bool("PRETTIFY_MARKDOWN"),
        };
        printer.print(&view);
    }
    Ok(())
}

fn save_image(result: Option<&ExecutionResult>, interpreter: &str, path: &std::path::Path) -> Result<()> {
    let view = result.filter(|r| r.is_interpreter(interpreter)).map(classify);
    let Some(PrimaryView::Image { png }) = view else {
        bail!("the execution result has no image to save");
    };
    PngImage::from_base64(png)?.save(path)
}

fn init_tracing(cfg: &Config, interactive: bool) -> Result<()> {
    let level = cfg.get("LOG_LEVEL").unwrap_or_else(|| "warn".into());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    match cfg.log_file() {
        Some(path) => {
            let file = File::create(&path)
                .with_context(|| format!("failed to open log file '{}'", path.display()))?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        // The TUI owns the terminal; stay quiet unless logging to a file
        None if interactive => {}
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(io::stderr)
                .init();
        }
    }
    Ok(())
}
