mod app;
mod browser;
mod components;
mod config;
mod error;
mod event;
mod fs;
mod handler;
mod logging;
mod theme;
mod tui;
mod ui;
mod viewer;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;

use crate::app::App;
use crate::config::{AppConfig, GeneralConfig, ThemeConfig, ViewerConfig};
use crate::event::{Event, EventHandler};
use crate::tui::{install_panic_hook, Tui};
use crate::viewer::{Highlighter, SyntectHighlighter};

/// A terminal file browser with a read-only file viewer.
#[derive(Parser, Debug)]
#[command(name = "fv", version, about)]
struct Cli {
    /// Directory to browse, or a file to open directly (defaults to current directory)
    #[arg(default_value = ".")]
    path: PathBuf,

    /// Path to a config file (overrides the default locations)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Start the viewer with line wrapping enabled
    #[arg(long)]
    wrap: bool,

    /// Start the viewer with syntax highlighting disabled
    #[arg(long)]
    no_syntax: bool,

    /// Color scheme: dark, light or custom
    #[arg(long)]
    theme: Option<String>,

    /// Show hidden files in the browser
    #[arg(long)]
    show_hidden: bool,

    /// Write logs to this file (also: $FV_LOG_FILE; filter via $FV_LOG)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

impl Cli {
    /// Flags that were given, as a partial config layered over the files.
    fn overrides(&self) -> AppConfig {
        AppConfig {
            general: GeneralConfig {
                show_hidden: self.show_hidden.then_some(true),
            },
            viewer: ViewerConfig {
                line_wrap: self.wrap.then_some(true),
                syntax_highlight: self.no_syntax.then_some(false),
                ..ViewerConfig::default()
            },
            theme: ThemeConfig {
                scheme: self.theme.clone(),
                custom: None,
            },
        }
    }
}

#[tokio::main]
async fn main() -> error::Result<()> {
    let cli = Cli::parse();

    let log_file = logging::resolve_log_file(cli.log_file.as_deref());
    logging::init(log_file.as_deref())?;

    let path = cli.path.canonicalize().map_err(|_| {
        error::AppError::InvalidPath(format!("{} does not exist", cli.path.display()))
    })?;
    // A file argument browses its directory and opens the file straight away.
    let (browse_dir, initial_file) = if path.is_file() {
        let dir = path
            .parent()
            .map(PathBuf::from)
            .ok_or_else(|| error::AppError::InvalidPath(path.display().to_string()))?;
        (dir, Some(path))
    } else {
        (path, None)
    };

    let config = AppConfig::load(cli.config.as_deref(), Some(&cli.overrides()));
    let theme = theme::resolve_theme(&config.theme);
    let highlighter: Arc<dyn Highlighter> =
        Arc::new(SyntectHighlighter::new(config.syntax_theme_name()));
    tracing::info!(path = %browse_dir.display(), scheme = config.theme_scheme(), "starting");

    install_panic_hook();

    let mut tui = Tui::new()?;
    let mut app = App::new(
        &browse_dir,
        config.show_hidden(),
        config.viewer_options(),
        highlighter,
        theme,
        tui.size()?,
    );
    if let Some(file) = initial_file {
        if let Some(idx) = app.browser.items.iter().position(|i| i.path == file) {
            app.browser.cursor = idx;
        }
        app.open_file(&file);
    }
    let mut events = EventHandler::new(Duration::from_millis(100));

    loop {
        tui.terminal_mut().draw(|frame| {
            ui::render(&mut app, frame);
        })?;

        match events.next().await? {
            Event::Key(key) => handler::handle_key_event(&mut app, key),
            Event::Tick => app.clear_expired_status(),
            Event::Resize(width, height) => app.resize(width, height),
        }

        if app.should_quit {
            break;
        }
    }

    tui.restore()?;
    tracing::info!("exiting");
    Ok(())
}
