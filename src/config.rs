//! Application configuration: TOML file loading, CLI overrides, and defaults.
//!
//! Resolution order (first found wins, values merge/override):
//! 1. CLI flags (`--wrap`, `--no-syntax`, `--theme`, etc.)
//! 2. Explicit `--config <file>`
//! 3. `$FV_CONFIG` environment variable (path to config file)
//! 4. Project-local `.fv.toml` in the current working directory
//! 5. Global `~/.config/fv/config.toml`
//! 6. Built-in defaults

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::viewer::ViewerOptions;

// ── Section configs ──────────────────────────────────────────────────────────

/// General application settings.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct GeneralConfig {
    /// Show hidden files in the browser.
    pub show_hidden: Option<bool>,
}

/// File viewer settings.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct ViewerConfig {
    /// Files larger than this many bytes are refused.
    pub max_file_bytes: Option<u64>,
    /// Number of spaces a tab expands to.
    pub tab_width: Option<usize>,
    /// Start with soft wrapping enabled.
    pub line_wrap: Option<bool>,
    /// Start with syntax highlighting enabled.
    pub syntax_highlight: Option<bool>,
    /// Syntax highlighting theme (syntect theme name).
    pub syntax_theme: Option<String>,
}

/// Color settings for a single theme palette.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct ThemeColorsConfig {
    pub browser_fg: Option<String>,
    pub browser_selected_bg: Option<String>,
    pub browser_selected_fg: Option<String>,
    pub browser_dir_fg: Option<String>,
    pub browser_file_fg: Option<String>,
    pub viewer_title_fg: Option<String>,
    pub viewer_gutter_fg: Option<String>,
    pub viewer_info_fg: Option<String>,
    pub status_bg: Option<String>,
    pub status_fg: Option<String>,
    pub border_fg: Option<String>,
}

/// Theme configuration section.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct ThemeConfig {
    /// Color scheme: "dark", "light", "custom".
    pub scheme: Option<String>,
    /// Custom color overrides.
    pub custom: Option<ThemeColorsConfig>,
}

// ── Top-level config ─────────────────────────────────────────────────────────

/// Top-level application configuration.
///
/// All fields are optional so that partial configs from different sources
/// can be merged together (CLI overrides file, file overrides defaults).
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub general: GeneralConfig,
    pub viewer: ViewerConfig,
    pub theme: ThemeConfig,
}

// ── Default constants ────────────────────────────────────────────────────────

/// Default size ceiling for viewable files (10 MiB).
pub const DEFAULT_MAX_FILE_BYTES: u64 = 10 * 1024 * 1024;
/// Default tab expansion width.
pub const DEFAULT_TAB_WIDTH: usize = 4;
/// Default syntect theme.
pub const DEFAULT_SYNTAX_THEME: &str = "base16-ocean.dark";

// ── Config file locator ──────────────────────────────────────────────────────

/// Return the list of candidate config file paths in priority order.
///
/// Does NOT include the CLI `--config` path, which is handled separately.
fn candidate_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();

    if let Ok(env_path) = std::env::var("FV_CONFIG") {
        paths.push(PathBuf::from(env_path));
    }

    if let Ok(cwd) = std::env::current_dir() {
        paths.push(cwd.join(".fv.toml"));
    }

    if let Some(config_dir) = dirs::config_dir() {
        paths.push(config_dir.join("fv").join("config.toml"));
    }

    paths
}

/// Try to read and parse a TOML config file. Returns `None` if the file
/// doesn't exist or can't be parsed.
fn load_file(path: &Path) -> Option<AppConfig> {
    let content = std::fs::read_to_string(path).ok()?;
    match toml::from_str::<AppConfig>(&content) {
        Ok(cfg) => {
            tracing::debug!(path = %path.display(), "loaded config file");
            Some(cfg)
        }
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "failed to parse config file");
            None
        }
    }
}

// ── Merge logic ──────────────────────────────────────────────────────────────

impl AppConfig {
    /// Merge `other` on top of `self`; `other`'s `Some` values win.
    pub fn merge(self, other: &AppConfig) -> AppConfig {
        AppConfig {
            general: GeneralConfig {
                show_hidden: other.general.show_hidden.or(self.general.show_hidden),
            },
            viewer: ViewerConfig {
                max_file_bytes: other.viewer.max_file_bytes.or(self.viewer.max_file_bytes),
                tab_width: other.viewer.tab_width.or(self.viewer.tab_width),
                line_wrap: other.viewer.line_wrap.or(self.viewer.line_wrap),
                syntax_highlight: other
                    .viewer
                    .syntax_highlight
                    .or(self.viewer.syntax_highlight),
                syntax_theme: other
                    .viewer
                    .syntax_theme
                    .clone()
                    .or(self.viewer.syntax_theme),
            },
            theme: ThemeConfig {
                scheme: other.theme.scheme.clone().or(self.theme.scheme),
                custom: match (&self.theme.custom, &other.theme.custom) {
                    (_, Some(o)) => Some(o.clone()),
                    (Some(s), None) => Some(s.clone()),
                    (None, None) => None,
                },
            },
        }
    }

    /// Load the final merged configuration.
    ///
    /// `cli_config_path` is an explicit config file path from `--config`.
    /// `cli_overrides` are partial overrides derived from CLI flags.
    pub fn load(cli_config_path: Option<&Path>, cli_overrides: Option<&AppConfig>) -> AppConfig {
        let mut config = AppConfig::default();

        // Walk in reverse so that highest-priority (env var) overwrites lower.
        for path in candidate_paths().iter().rev() {
            if let Some(file_cfg) = load_file(path) {
                config = config.merge(&file_cfg);
            }
        }

        if let Some(cli_path) = cli_config_path {
            if let Some(file_cfg) = load_file(cli_path) {
                config = config.merge(&file_cfg);
            }
        }

        if let Some(overrides) = cli_overrides {
            config = config.merge(overrides);
        }

        config
    }

    // ── Convenience getters with built-in defaults ──────────────────────────

    /// Whether to show hidden files by default.
    pub fn show_hidden(&self) -> bool {
        self.general.show_hidden.unwrap_or(false)
    }

    /// Size ceiling in bytes for the viewer.
    pub fn max_file_bytes(&self) -> u64 {
        self.viewer.max_file_bytes.unwrap_or(DEFAULT_MAX_FILE_BYTES)
    }

    /// Spaces per tab; zero is treated as one.
    pub fn tab_width(&self) -> usize {
        self.viewer.tab_width.unwrap_or(DEFAULT_TAB_WIDTH).max(1)
    }

    pub fn line_wrap(&self) -> bool {
        self.viewer.line_wrap.unwrap_or(false)
    }

    pub fn syntax_highlight(&self) -> bool {
        self.viewer.syntax_highlight.unwrap_or(true)
    }

    /// Syntax highlighting theme name.
    pub fn syntax_theme_name(&self) -> &str {
        self.viewer
            .syntax_theme
            .as_deref()
            .unwrap_or(DEFAULT_SYNTAX_THEME)
    }

    /// Theme scheme: "dark", "light", or "custom".
    pub fn theme_scheme(&self) -> &str {
        self.theme.scheme.as_deref().unwrap_or("dark")
    }

    /// Options handed to every newly opened viewer.
    pub fn viewer_options(&self) -> ViewerOptions {
        ViewerOptions {
            max_file_bytes: self.max_file_bytes(),
            tab_width: self.tab_width(),
            wrap: self.line_wrap(),
            highlight: self.syntax_highlight(),
        }
    }
}

// ── Tests ────────────────────────────────────────────────────────────────────
