use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use crate::browser::{BrowserState, EnterAction};
use crate::theme::ThemeColors;
use crate::viewer::{Highlighter, Viewer, ViewerOptions, ViewerStyle};

/// How long a browser status message stays visible.
const STATUS_TTL_SECS: u64 = 3;

/// Which screen has the keyboard.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum AppMode {
    #[default]
    Browse,
    View,
}

/// Main application state.
pub struct App {
    pub browser: BrowserState,
    pub viewer: Option<Viewer>,
    pub mode: AppMode,
    pub highlighter: Arc<dyn Highlighter>,
    pub viewer_options: ViewerOptions,
    pub viewer_style: ViewerStyle,
    pub theme: ThemeColors,
    pub width: u16,
    pub height: u16,
    pub should_quit: bool,
    pub show_help: bool,
    pub help_scroll: usize,
    pub status_message: Option<(String, Instant)>,
}

impl App {
    /// Create a new App browsing `path`.
    pub fn new(
        path: &Path,
        show_hidden: bool,
        viewer_options: ViewerOptions,
        highlighter: Arc<dyn Highlighter>,
        theme: ThemeColors,
        (width, height): (u16, u16),
    ) -> Self {
        Self {
            browser: BrowserState::new(path, show_hidden),
            viewer: None,
            mode: AppMode::Browse,
            highlighter,
            viewer_options,
            viewer_style: ViewerStyle::from_theme(&theme),
            theme,
            width,
            height,
            should_quit: false,
            show_help: false,
            help_scroll: 0,
            status_message: None,
        }
    }

    /// Enter the selected directory, or open the selected file in the viewer.
    pub fn open_selected(&mut self) {
        match self.browser.enter() {
            EnterAction::OpenFile(path) => self.open_file(&path),
            EnterAction::ChangedDirectory => {
                if let Some(err) = self.browser.error.clone() {
                    self.set_status_message(format!("Cannot read directory: {err}"));
                }
            }
            EnterAction::None => {}
        }
    }

    /// Open `path` in a fresh viewer sized to the terminal.
    pub fn open_file(&mut self, path: &Path) {
        let display_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        let viewer = Viewer::open(
            path,
            &display_name,
            &self.viewer_options,
            Arc::clone(&self.highlighter),
            self.width,
            self.height,
        );
        self.viewer = Some(viewer);
        self.mode = AppMode::View;
    }

    /// Drop the viewer and return to the browser.
    pub fn close_viewer(&mut self) {
        if let Some(viewer) = self.viewer.take() {
            tracing::info!(path = %viewer.file_path().display(), "closed file");
        }
        self.mode = AppMode::Browse;
    }

    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        if let Some(viewer) = self.viewer.as_mut() {
            viewer.resize(width, height);
        }
    }

    /// Set a status message with current timestamp.
    pub fn set_status_message(&mut self, msg: String) {
        self.status_message = Some((msg, Instant::now()));
    }

    /// Clear the status message if it has been displayed for more than 3 seconds.
    pub fn clear_expired_status(&mut self) {
        if let Some((_, ref created)) = self.status_message {
            if created.elapsed().as_secs() > STATUS_TTL_SECS {
                self.status_message = None;
            }
        }
    }

    pub fn toggle_hidden(&mut self) {
        self.browser.toggle_hidden();
        let msg = if self.browser.show_hidden {
            "Showing hidden files"
        } else {
            "Hiding hidden files"
        };
        self.set_status_message(msg.to_string());
    }

    /// Quit the application.
    pub fn quit(&mut self) {
        self.should_quit = true;
    }
}
