use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Widget,
};
use unicode_width::UnicodeWidthStr;

use crate::theme::ThemeColors;

const KEY_HINTS: &str = " ↑/k ↓/j move  Enter/l open  h/⌫ back  . hidden  ? help  q quit ";

/// Keep the last `max` columns of `s`, prefixed with "..." when shortened.
fn tail_fit(s: &str, max: usize) -> String {
    if s.width() <= max {
        return s.to_string();
    }
    if max <= 3 {
        return ".".repeat(max);
    }
    let mut kept: Vec<char> = Vec::new();
    let mut used = 0;
    for c in s.chars().rev() {
        let w = unicode_width::UnicodeWidthChar::width(c).unwrap_or(0);
        if used + w > max - 3 {
            break;
        }
        used += w;
        kept.push(c);
    }
    format!("...{}", kept.into_iter().rev().collect::<String>())
}

/// Keep the first `max` columns of `s`.
fn head_fit(s: &str, max: usize) -> String {
    let mut out = String::new();
    let mut used = 0;
    for c in s.chars() {
        let w = unicode_width::UnicodeWidthChar::width(c).unwrap_or(0);
        if used + w > max {
            break;
        }
        used += w;
        out.push(c);
    }
    out
}

/// Browser status bar: current directory, listing info and key hints, or a status message.
pub struct StatusBarWidget<'a> {
    path_str: &'a str,
    listing_info: &'a str,
    theme: &'a ThemeColors,
    status_message: Option<&'a str>,
    is_error: bool,
}

impl<'a> StatusBarWidget<'a> {
    pub fn new(path_str: &'a str, listing_info: &'a str, theme: &'a ThemeColors) -> Self {
        Self {
            path_str,
            listing_info,
            theme,
            status_message: None,
            is_error: false,
        }
    }

    pub fn status_message(mut self, msg: &'a str, is_error: bool) -> Self {
        self.status_message = Some(msg);
        self.is_error = is_error;
        self
    }
}

impl<'a> Widget for StatusBarWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 || area.width == 0 {
            return;
        }

        let width = area.width as usize;
        let base = Style::default().bg(self.theme.status_bg);

        if let Some(msg) = self.status_message {
            let style = if self.is_error {
                Style::default()
                    .bg(self.theme.error_fg)
                    .fg(self.theme.status_fg)
            } else {
                base.fg(self.theme.success_fg)
            };
            let msg = head_fit(msg, width);
            let pad = width.saturating_sub(msg.width());
            let line = Line::from(Span::styled(format!("{msg}{}", " ".repeat(pad)), style));
            buf.set_line(area.x, area.y, &line, area.width);
            return;
        }

        // [path] [gap] [listing info] [key hints]; hints are dropped first when narrow.
        let hints = if KEY_HINTS.width() + self.listing_info.width() + 10 <= width {
            KEY_HINTS
        } else {
            ""
        };
        let remaining = width.saturating_sub(hints.width());
        let info_display = head_fit(self.listing_info, remaining);
        let path_budget = remaining
            .saturating_sub(info_display.width())
            .saturating_sub(1);
        let path_display = tail_fit(self.path_str, path_budget);
        let gap = remaining
            .saturating_sub(path_display.width())
            .saturating_sub(info_display.width());

        let spans = vec![
            Span::styled(path_display, base.fg(self.theme.status_fg)),
            Span::styled(" ".repeat(gap), base),
            Span::styled(info_display, base.fg(self.theme.viewer_info_fg)),
            Span::styled(
                hints,
                base.fg(self.theme.dim_fg).add_modifier(Modifier::DIM),
            ),
        ];

        let line = Line::from(spans);
        buf.set_line(area.x, area.y, &line, area.width);
    }
}
