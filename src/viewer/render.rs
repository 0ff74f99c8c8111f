use super::ansi::{self, RESET};
use super::{Viewer, ViewerStyle};
use crate::error::LoadError;

/// Separator between the line-number gutter and the content.
const GUTTER_SEP: &str = " │ ";
const GUTTER_SEP_WIDTH: usize = 3;
/// Minimum digits reserved for line numbers.
const MIN_GUTTER_DIGITS: usize = 4;

const HINTS: &str =
    "↑/k ↓/j scroll  g/G top/bottom  ^u/^d half page  / search  n/N match  : command  q back";

impl Viewer {
    /// Render the whole viewport as ANSI text, one `\n`-separated row per terminal row.
    ///
    /// No row is wider than the viewport, and every row ends with an SGR reset.
    pub fn render(&self, style: &ViewerStyle) -> String {
        let width = self.viewport_width.max(1);
        let rows = match &self.load_error {
            Some(err) => self.error_rows(err, style),
            None => {
                let mut rows = Vec::with_capacity(self.page_height() + super::CHROME_ROWS);
                rows.push(format!("{}Viewing: {}", style.title, self.display_name));
                rows.push(format!("{}{}", style.info, self.info_text()));
                rows.extend(self.content_rows(style));
                rows.push(self.status_row(style));
                rows.push(format!("{}{HINTS}", style.hints));
                rows
            }
        };
        rows.iter()
            .map(|row| {
                let mut row = ansi::truncate(row, width, &style.ellipsis);
                row.push_str(RESET);
                row
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn info_text(&self) -> String {
        let on_off = |b: bool| if b { "on" } else { "off" };
        let mut info = format!(
            "Lines: {} | Position: {} | Wrap: {} | Syntax: {}",
            self.line_count(),
            self.scroll_pos + 1,
            on_off(self.wrap_enabled),
            on_off(self.highlight_enabled),
        );
        if self.search.is_active() {
            match self.search.position() {
                Some((i, n)) => info.push_str(&format!(" | Match {i}/{n}")),
                None => info.push_str(" | No matches"),
            }
        }
        info
    }

    fn status_row(&self, style: &ViewerStyle) -> String {
        if self.is_command_mode() {
            format!(":{}{}", self.command_buffer, "\x1b[7m \x1b[27m")
        } else if self.status_message.is_empty() {
            String::new()
        } else {
            format!("{}{}", style.status, self.status_message)
        }
    }

    fn gutter_digits(&self) -> usize {
        self.line_count().to_string().len().max(MIN_GUTTER_DIGITS)
    }

    /// Display line with search hits marked.
    fn decorated_line(&self, index: usize, style: &ViewerStyle) -> String {
        let line = self.display_line(index);
        if self.search.is_active() {
            ansi::mark_matches(line, &self.search.term, &style.match_start, &style.match_end)
        } else {
            line.to_string()
        }
    }

    /// Exactly `page_height` rows of file content starting at the scroll
    /// position, padded with blank rows past the end of the file.
    pub(crate) fn content_rows(&self, style: &ViewerStyle) -> Vec<String> {
        let budget = self.page_height();
        let digits = self.gutter_digits();
        let available = self
            .viewport_width
            .saturating_sub(digits + GUTTER_SEP_WIDTH)
            .max(1);
        let continuation = format!(
            "{}{:>digits$}{GUTTER_SEP}{RESET}",
            style.gutter, style.continuation_marker
        );

        let mut rows = Vec::with_capacity(budget);
        let mut index = self.scroll_pos;
        while rows.len() < budget && index < self.raw_lines.len() {
            let line = self.decorated_line(index, style);
            let number = format!("{}{:>digits$}{GUTTER_SEP}{RESET}", style.gutter, index + 1);
            if self.wrap_enabled {
                let remaining = budget - rows.len();
                let segments = ansi::wrap(&line, available, remaining);
                for (k, segment) in segments.into_iter().enumerate() {
                    let gutter = if k == 0 { &number } else { &continuation };
                    rows.push(format!("{gutter}{segment}{RESET}"));
                }
            } else {
                let cut = ansi::truncate(&line, available, &style.ellipsis);
                rows.push(format!("{number}{cut}{RESET}"));
            }
            index += 1;
        }
        rows.resize(budget, String::new());
        rows
    }

    fn error_rows(&self, err: &LoadError, style: &ViewerStyle) -> Vec<String> {
        vec![
            format!("{}Viewing: {}", style.title, self.display_name),
            String::new(),
            format!("{}Error loading file: {err}", style.error),
            String::new(),
            format!("{}Press q or Esc to go back.", style.hints),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::super::ViewerOptions;
    use super::*;
    use crossterm::event::KeyCode;
    use std::sync::Arc;

    /// Visible text of a content row with the gutter removed.
    fn body(row: &str, digits: usize) -> String {
        ansi::strip(row).chars().skip(digits + GUTTER_SEP_WIDTH).collect()
    }

    fn long_line() -> String {
        (0..200)
            .map(|i| char::from(b'a' + (i % 26) as u8))
            .collect::<String>()
    }

    #[test]
    fn frame_fills_viewport_height() {
        let v = plain_viewer(&numbered(3), 80, 24);
        let frame = v.render(&ViewerStyle::default());
        assert_eq!(frame.split('\n').count(), 24);
    }

    #[test]
    fn every_row_fits_and_ends_with_reset() {
        let mut v = plain_viewer(&format!("{}\nshort", long_line()), 80, 24);
        v.perform_search("abc");
        for wrap in [false, true] {
            v.set_wrap(wrap);
            for row in v.render(&ViewerStyle::default()).split('\n') {
                assert!(ansi::visible_width(row) <= 80, "row too wide: {row:?}");
                assert!(row.ends_with(RESET));
            }
        }
    }

    #[test]
    fn long_line_unwrapped_is_one_truncated_row() {
        let v = plain_viewer(&long_line(), 80, 24);
        let rows = v.content_rows(&ViewerStyle::default());
        let numbered: Vec<&String> = rows.iter().filter(|r| !r.is_empty()).collect();
        assert_eq!(numbered.len(), 1);
        let row = numbered[0];
        assert!(ansi::visible_width(row) <= 80);
        assert!(ansi::strip(row).ends_with('…'));
        assert!(ansi::strip(row).starts_with("   1 │ "));
    }

    #[test]
    fn long_line_wrapped_reproduces_content() {
        let line = long_line();
        let mut v = plain_viewer(&line, 80, 24);
        v.set_wrap(true);
        let rows: Vec<String> = v
            .content_rows(&ViewerStyle::default())
            .into_iter()
            .filter(|r| !r.is_empty())
            .collect();
        assert!(rows.len() > 1);
        assert!(rows.iter().all(|r| ansi::visible_width(r) <= 80));
        let joined: String = rows.iter().map(|r| body(r, 4)).collect();
        assert_eq!(joined, line);
        assert!(ansi::strip(&rows[1]).starts_with("   ↪ │ "));
    }

    #[test]
    fn wrapped_rows_stop_at_page_height() {
        let text = vec![long_line(); 10].join("\n");
        let mut v = plain_viewer(&text, 40, 10);
        v.set_wrap(true);
        let rows = v.content_rows(&ViewerStyle::default());
        assert_eq!(rows.len(), v.page_height());
        assert!(rows.iter().all(|r| !r.is_empty()));
    }

    #[test]
    fn huge_wrapped_line_builds_only_visible_rows() {
        let line = "x".repeat(500_000);
        let mut v = plain_viewer(&line, 40, 10);
        v.set_wrap(true);
        let rows = v.content_rows(&ViewerStyle::default());
        assert_eq!(rows.len(), v.page_height());
        let shown: String = rows.iter().map(|r| body(r, 4)).collect();
        assert_eq!(shown, "x".repeat(v.page_height() * (40 - 4 - 3)));
    }

    #[test]
    fn greek_search_hit_is_marked() {
        let mut v = plain_viewer("ΟΔΟΣ\nother", 80, 24);
        v.perform_search("οδος");
        let style = ViewerStyle::default();
        assert_eq!(v.search_matches(), &[0]);
        let rows = v.content_rows(&style);
        assert!(rows[0].contains(&format!("{}ΟΔΟΣ{}", style.match_start, style.match_end)));
    }

    #[test]
    fn rows_start_at_scroll_position() {
        let mut v = plain_viewer(&numbered(50), 80, 14);
        v.handle_key(key(KeyCode::Down));
        v.handle_key(key(KeyCode::Down));
        let rows = v.content_rows(&ViewerStyle::default());
        assert_eq!(body(&rows[0], 4), "line 2");
        assert!(ansi::strip(&rows[0]).starts_with("   3 │ "));
    }

    #[test]
    fn gutter_grows_with_line_count() {
        let v = plain_viewer(&numbered(12_345), 80, 14);
        let rows = v.content_rows(&ViewerStyle::default());
        assert!(ansi::strip(&rows[0]).starts_with("    1 │ "));
    }

    #[test]
    fn search_hits_are_marked() {
        let mut v = plain_viewer("alpha\nbeta gamma\ndelta", 80, 24);
        v.perform_search("GAMMA");
        let style = ViewerStyle::default();
        let rows = v.content_rows(&style);
        assert!(rows[1].contains(&format!("{}gamma{}", style.match_start, style.match_end)));
        assert!(!rows[0].contains(&style.match_start));
    }

    #[test]
    fn marks_survive_highlighting() {
        let mut v = Viewer::from_text(
            "x.txt",
            "some text",
            &ViewerOptions::default(),
            Arc::new(BracketHighlighter),
            80,
            24,
        );
        v.perform_search("text");
        let style = ViewerStyle::default();
        let rows = v.content_rows(&style);
        assert!(rows[0].contains("\x1b[31m"));
        assert!(rows[0].contains(&style.match_start));
        assert_eq!(body(&rows[0], 4), "some text");
    }

    #[test]
    fn missing_highlighted_line_renders_plain() {
        let v = Viewer::from_text(
            "x.txt",
            "one\ntwo",
            &ViewerOptions::default(),
            Arc::new(FirstLineOnlyHighlighter),
            80,
            24,
        );
        let rows = v.content_rows(&ViewerStyle::default());
        assert_eq!(body(&rows[1], 4), "two");
    }

    #[test]
    fn info_line_reports_position_and_match() {
        let mut v = plain_viewer(&numbered(30), 80, 14);
        v.perform_search("line 1");
        let frame = ansi::strip(&v.render(&ViewerStyle::default()));
        let info = frame.split('\n').nth(1).unwrap_or_default().to_string();
        assert!(info.contains("Lines: 30"));
        assert!(info.contains("Position: 2"));
        assert!(info.contains("Match 1/11"));
    }

    #[test]
    fn command_prompt_replaces_status() {
        let mut v = plain_viewer("x", 80, 24);
        v.handle_key(key(KeyCode::Char('/')));
        v.handle_key(key(KeyCode::Char('q')));
        let frame = ansi::strip(&v.render(&ViewerStyle::default()));
        let rows: Vec<&str> = frame.split('\n').collect();
        assert!(rows[rows.len() - 2].starts_with(":/q"));
    }

    #[test]
    fn load_error_renders_error_screen() {
        let dir = tempfile::TempDir::new().unwrap();
        let v = Viewer::open(
            &dir.path().join("gone.txt"),
            "gone.txt",
            &ViewerOptions::default(),
            no_highlight(),
            80,
            24,
        );
        let frame = ansi::strip(&v.render(&ViewerStyle::default()));
        assert!(frame.contains("Error loading file:"));
        assert!(frame.contains("Press q or Esc to go back."));
    }

    #[test]
    fn narrow_viewport_never_overflows() {
        let v = plain_viewer(&long_line(), 3, 24);
        for row in v.render(&ViewerStyle::default()).split('\n') {
            assert!(ansi::visible_width(row) <= 3);
        }
    }
}
