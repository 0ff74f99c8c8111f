use ratatui::style::Color;

use crate::theme::{self, ThemeColors};

/// Escape sequences and markers the viewer renders with.
///
/// Built once from the resolved theme and passed by reference to
/// [`super::Viewer::render`]; nothing in here changes at runtime.
#[derive(Debug, Clone)]
pub struct ViewerStyle {
    pub title: String,
    pub info: String,
    pub gutter: String,
    pub status: String,
    pub error: String,
    pub hints: String,
    pub match_start: String,
    pub match_end: String,
    pub continuation_marker: String,
    pub ellipsis: String,
}

/// Foreground SGR sequence for a ratatui color. Unsupported variants map to the default color.
pub fn ansi_fg(color: Color) -> String {
    match color {
        Color::Rgb(r, g, b) => format!("\x1b[38;2;{r};{g};{b}m"),
        Color::Indexed(n) => format!("\x1b[38;5;{n}m"),
        Color::Black => "\x1b[30m".to_string(),
        Color::Red => "\x1b[31m".to_string(),
        Color::Green => "\x1b[32m".to_string(),
        Color::Yellow => "\x1b[33m".to_string(),
        Color::Blue => "\x1b[34m".to_string(),
        Color::Magenta => "\x1b[35m".to_string(),
        Color::Cyan => "\x1b[36m".to_string(),
        Color::Gray => "\x1b[37m".to_string(),
        Color::DarkGray => "\x1b[90m".to_string(),
        _ => "\x1b[39m".to_string(),
    }
}

impl ViewerStyle {
    pub fn from_theme(theme: &ThemeColors) -> Self {
        Self {
            title: format!("\x1b[1m{}", ansi_fg(theme.viewer_title_fg)),
            info: ansi_fg(theme.viewer_info_fg),
            gutter: ansi_fg(theme.viewer_gutter_fg),
            status: ansi_fg(theme.success_fg),
            error: format!("\x1b[1m{}", ansi_fg(theme.error_fg)),
            hints: format!("\x1b[2m{}", ansi_fg(theme.dim_fg)),
            match_start: "\x1b[7m".to_string(),
            match_end: "\x1b[27m".to_string(),
            continuation_marker: "↪".to_string(),
            ellipsis: "…".to_string(),
        }
    }
}

impl Default for ViewerStyle {
    fn default() -> Self {
        Self::from_theme(&theme::dark_theme())
    }
}
