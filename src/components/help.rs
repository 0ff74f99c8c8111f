use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Widget},
};

use crate::theme::ThemeColors;

/// A single keybinding entry for display.
struct KeyEntry {
    key: &'static str,
    description: &'static str,
}

/// A category of keybindings.
struct KeyCategory {
    name: &'static str,
    entries: &'static [KeyEntry],
}

const BROWSER_KEYS: &[KeyEntry] = &[
    KeyEntry {
        key: "j / ↓",
        description: "Move down",
    },
    KeyEntry {
        key: "k / ↑",
        description: "Move up",
    },
    KeyEntry {
        key: "g / Home",
        description: "Jump to first item",
    },
    KeyEntry {
        key: "G / End",
        description: "Jump to last item",
    },
    KeyEntry {
        key: "Enter / l / →",
        description: "Open directory or view file",
    },
    KeyEntry {
        key: "Backspace / h / ←",
        description: "Go to parent directory",
    },
    KeyEntry {
        key: ".",
        description: "Toggle hidden files",
    },
];

const VIEWER_KEYS: &[KeyEntry] = &[
    KeyEntry {
        key: "j / ↓, k / ↑",
        description: "Scroll one line",
    },
    KeyEntry {
        key: "g / Home, G / End",
        description: "Jump to top / bottom",
    },
    KeyEntry {
        key: "PgUp / Ctrl+U",
        description: "Scroll up half a page",
    },
    KeyEntry {
        key: "PgDn / Ctrl+D",
        description: "Scroll down half a page",
    },
    KeyEntry {
        key: "/",
        description: "Search",
    },
    KeyEntry {
        key: "n / N",
        description: "Next / previous match",
    },
    KeyEntry {
        key: ":",
        description: "Command line",
    },
    KeyEntry {
        key: "q / Esc",
        description: "Back to browser",
    },
];

const COMMAND_KEYS: &[KeyEntry] = &[
    KeyEntry {
        key: ":/text, :search text",
        description: "Find text (case-insensitive)",
    },
    KeyEntry {
        key: ":n, :next / :N, :prev",
        description: "Next / previous match",
    },
    KeyEntry {
        key: ":clear",
        description: "Clear search",
    },
    KeyEntry {
        key: ":wrap, :syntax",
        description: "Toggle line wrap / highlighting",
    },
    KeyEntry {
        key: ":set wrap|nowrap",
        description: "Set line wrap",
    },
    KeyEntry {
        key: ":set syntax|nosyntax",
        description: "Set highlighting",
    },
    KeyEntry {
        key: ":help",
        description: "Command summary",
    },
];

const GENERAL_KEYS: &[KeyEntry] = &[
    KeyEntry {
        key: "?",
        description: "Toggle this help overlay",
    },
    KeyEntry {
        key: "q",
        description: "Quit (from the browser)",
    },
    KeyEntry {
        key: "Ctrl+C",
        description: "Quit",
    },
];

const CATEGORIES: &[KeyCategory] = &[
    KeyCategory {
        name: "Browser",
        entries: BROWSER_KEYS,
    },
    KeyCategory {
        name: "Viewer",
        entries: VIEWER_KEYS,
    },
    KeyCategory {
        name: "Viewer Commands",
        entries: COMMAND_KEYS,
    },
    KeyCategory {
        name: "General",
        entries: GENERAL_KEYS,
    },
];

/// Help overlay widget showing all keybindings.
pub struct HelpOverlay<'a> {
    theme: &'a ThemeColors,
    scroll_offset: usize,
}

impl<'a> HelpOverlay<'a> {
    pub fn new(theme: &'a ThemeColors, scroll_offset: usize) -> Self {
        Self {
            theme,
            scroll_offset,
        }
    }

    /// Build all the lines for the help content.
    fn build_content_lines(&self) -> Vec<Line<'static>> {
        let mut lines: Vec<Line<'static>> = Vec::new();

        lines.push(Line::from(vec![Span::styled(
            " Keybinding Reference ",
            Style::default()
                .fg(self.theme.accent_fg)
                .add_modifier(Modifier::BOLD),
        )]));
        lines.push(Line::from(""));

        for category in CATEGORIES {
            lines.push(Line::from(vec![
                Span::styled(
                    format!("── {} ", category.name),
                    Style::default()
                        .fg(self.theme.accent_fg)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled("─".repeat(40), Style::default().fg(self.theme.dim_fg)),
            ]));

            for entry in category.entries {
                let key_padded = format!("  {:<24}", entry.key);
                lines.push(Line::from(vec![
                    Span::styled(
                        key_padded,
                        Style::default()
                            .fg(self.theme.warning_fg)
                            .add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(
                        entry.description.to_string(),
                        Style::default().fg(self.theme.browser_file_fg),
                    ),
                ]));
            }

            lines.push(Line::from(""));
        }

        lines.push(Line::from(vec![Span::styled(
            " Press ? or Esc to close ",
            Style::default().fg(self.theme.dim_fg),
        )]));

        lines
    }

    /// Get total number of content lines (for scroll bounds).
    pub fn total_lines() -> usize {
        // title + blank, then header + entries + blank per category, then footer
        2 + CATEGORIES
            .iter()
            .map(|c| c.entries.len() + 2)
            .sum::<usize>()
            + 1
    }
}

impl<'a> Widget for HelpOverlay<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // Centered: 70% width, 80% height
        let overlay_width = (area.width as f32 * 0.70).min(80.0) as u16;
        let overlay_height = (area.height as f32 * 0.80).min(50.0) as u16;

        let x = area.x + (area.width.saturating_sub(overlay_width)) / 2;
        let y = area.y + (area.height.saturating_sub(overlay_height)) / 2;
        let overlay_area = Rect::new(x, y, overlay_width, overlay_height);

        Clear.render(overlay_area, buf);

        let block = Block::default()
            .title(" Help ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.border_focused_fg))
            .style(Style::default().bg(self.theme.overlay_bg));

        let inner = block.inner(overlay_area);
        block.render(overlay_area, buf);

        let content_lines = self.build_content_lines();
        let visible_height = inner.height as usize;
        let scroll = self.scroll_offset;

        for (i, line) in content_lines
            .iter()
            .skip(scroll)
            .take(visible_height)
            .enumerate()
        {
            let line_y = inner.y + i as u16;
            buf.set_line(inner.x + 1, line_y, line, inner.width.saturating_sub(2));
        }

        if content_lines.len() > visible_height && overlay_area.height > 0 {
            let total = content_lines.len();
            let indicator = format!(" {}/{} ", (scroll + 1).min(total), total);
            let ind_span = Span::styled(indicator, Style::default().fg(self.theme.dim_fg));
            let ind_x = overlay_area.x
                + overlay_area
                    .width
                    .saturating_sub(ind_span.width() as u16 + 1);
            let ind_y = overlay_area.y + overlay_area.height - 1;
            buf.set_span(ind_x, ind_y, &ind_span, ind_span.width() as u16);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_lines_is_nonzero() {
        assert!(HelpOverlay::total_lines() > 0);
    }

    #[test]
    fn all_categories_have_entries() {
        for cat in CATEGORIES {
            assert!(
                !cat.entries.is_empty(),
                "Category '{}' has no entries",
                cat.name
            );
        }
    }

    #[test]
    fn content_lines_match_total() {
        let theme = crate::theme::dark_theme();
        let overlay = HelpOverlay::new(&theme, 0);
        let lines = overlay.build_content_lines();
        assert_eq!(lines.len(), HelpOverlay::total_lines());
    }

    #[test]
    fn renders_title_into_buffer() {
        let theme = crate::theme::dark_theme();
        let area = Rect::new(0, 0, 80, 40);
        let mut buf = Buffer::empty(area);
        HelpOverlay::new(&theme, 0).render(area, &mut buf);
        let text: String = buf.content().iter().map(|c| c.symbol()).collect();
        assert!(text.contains("Keybinding Reference"));
        assert!(text.contains("Help"));
    }
}
