//! Read-only file viewer: scroll position, soft wrapping, search, and a
//! small command line, rendered into a fixed-size terminal viewport.
//!
//! A [`Viewer`] is created for each opened file and dropped when the user
//! goes back to the browser. It is driven synchronously: one key or resize
//! event at a time, followed by [`Viewer::render`].

pub mod ansi;
pub mod command;
pub mod highlight;
pub mod loader;
mod render;
pub mod search;
pub mod style;

#[cfg(test)]
pub(crate) mod test_support;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::config::{DEFAULT_MAX_FILE_BYTES, DEFAULT_TAB_WIDTH};
use crate::error::LoadError;
use command::{Command, HELP_SUMMARY};
use search::SearchState;

pub use highlight::{Highlighter, SyntectHighlighter};
pub use style::ViewerStyle;

/// Frame rows not available to file content: title, info, status, key hints.
pub const CHROME_ROWS: usize = 4;

/// Settings applied when a viewer is opened.
#[derive(Debug, Clone)]
pub struct ViewerOptions {
    pub max_file_bytes: u64,
    pub tab_width: usize,
    pub wrap: bool,
    pub highlight: bool,
}

impl Default for ViewerOptions {
    fn default() -> Self {
        Self {
            max_file_bytes: DEFAULT_MAX_FILE_BYTES,
            tab_width: DEFAULT_TAB_WIDTH,
            wrap: false,
            highlight: true,
        }
    }
}

/// Input state of the viewer.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum ViewerMode {
    /// Keys scroll and navigate.
    #[default]
    Normal,
    /// Keys edit the command buffer.
    CommandEntry,
}

/// State of one opened file.
pub struct Viewer {
    file_path: PathBuf,
    display_name: String,
    raw_lines: Vec<String>,
    /// Colored counterpart of `raw_lines`; may be empty or (defensively) a different length.
    highlighted_lines: Vec<String>,
    highlight_attempted: bool,
    highlighter: Arc<dyn Highlighter>,
    scroll_pos: usize,
    viewport_width: usize,
    viewport_height: usize,
    wrap_enabled: bool,
    highlight_enabled: bool,
    search: SearchState,
    mode: ViewerMode,
    command_buffer: String,
    status_message: String,
    load_error: Option<LoadError>,
}

impl Viewer {
    fn blank(
        file_path: PathBuf,
        display_name: &str,
        options: &ViewerOptions,
        highlighter: Arc<dyn Highlighter>,
        width: u16,
        height: u16,
    ) -> Self {
        Self {
            file_path,
            display_name: display_name.to_string(),
            raw_lines: Vec::new(),
            highlighted_lines: Vec::new(),
            highlight_attempted: false,
            highlighter,
            scroll_pos: 0,
            viewport_width: width as usize,
            viewport_height: height as usize,
            wrap_enabled: options.wrap,
            highlight_enabled: options.highlight,
            search: SearchState::default(),
            mode: ViewerMode::Normal,
            command_buffer: String::new(),
            status_message: String::new(),
            load_error: None,
        }
    }

    /// Load `path` and build a viewer sized to the terminal.
    ///
    /// Load failures don't return an error: they are stored and the viewer
    /// renders an error screen instead of content.
    pub fn open(
        path: &Path,
        display_name: &str,
        options: &ViewerOptions,
        highlighter: Arc<dyn Highlighter>,
        width: u16,
        height: u16,
    ) -> Self {
        let mut viewer = Self::blank(
            path.to_path_buf(),
            display_name,
            options,
            highlighter,
            width,
            height,
        );
        match loader::load(path, options.max_file_bytes, options.tab_width) {
            Ok(content) => {
                tracing::info!(
                    path = %path.display(),
                    lines = content.lines.len(),
                    "opened file"
                );
                viewer.raw_lines = content.lines;
                if viewer.highlight_enabled {
                    viewer.apply_highlighting(&content.text);
                }
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "failed to load file");
                viewer.load_error = Some(e);
            }
        }
        viewer
    }

    /// Build a viewer over in-memory text, normalized the same way as a loaded file.
    #[cfg(test)]
    pub fn from_text(
        display_name: &str,
        text: &str,
        options: &ViewerOptions,
        highlighter: Arc<dyn Highlighter>,
        width: u16,
        height: u16,
    ) -> Self {
        let mut viewer = Self::blank(
            PathBuf::from(display_name),
            display_name,
            options,
            highlighter,
            width,
            height,
        );
        let text = loader::normalize(text, options.tab_width);
        viewer.raw_lines = loader::split_lines(&text);
        if viewer.highlight_enabled {
            viewer.apply_highlighting(&text);
        }
        viewer
    }

    fn apply_highlighting(&mut self, text: &str) {
        self.highlight_attempted = true;
        match self.highlighter.highlight(text, &self.display_name) {
            Ok(colored) => {
                self.highlighted_lines = loader::split_lines(&colored);
                if self.highlighted_lines.len() != self.raw_lines.len() {
                    tracing::debug!(
                        file = %self.display_name,
                        plain = self.raw_lines.len(),
                        colored = self.highlighted_lines.len(),
                        "highlighter changed the line count"
                    );
                }
            }
            Err(e) => {
                tracing::debug!(file = %self.display_name, error = %e, "highlighting unavailable");
                self.highlighted_lines.clear();
            }
        }
    }

    // ── Accessors ────────────────────────────────────────────────────────────

    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    #[cfg(test)]
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    #[cfg(test)]
    pub fn raw_lines(&self) -> &[String] {
        &self.raw_lines
    }

    #[cfg(test)]
    pub fn highlighted_lines(&self) -> &[String] {
        &self.highlighted_lines
    }

    pub fn line_count(&self) -> usize {
        self.raw_lines.len()
    }

    #[cfg(test)]
    pub fn scroll_pos(&self) -> usize {
        self.scroll_pos
    }

    #[cfg(test)]
    pub fn viewport(&self) -> (usize, usize) {
        (self.viewport_width, self.viewport_height)
    }

    #[cfg(test)]
    pub fn wrap_enabled(&self) -> bool {
        self.wrap_enabled
    }

    #[cfg(test)]
    pub fn highlight_enabled(&self) -> bool {
        self.highlight_enabled
    }

    #[cfg(test)]
    pub fn search_term(&self) -> &str {
        &self.search.term
    }

    #[cfg(test)]
    pub fn search_matches(&self) -> &[usize] {
        &self.search.matches
    }

    /// Index into [`Self::search_matches`]; `None` when nothing is selected.
    #[cfg(test)]
    pub fn current_match_index(&self) -> Option<usize> {
        self.search.current
    }

    pub fn is_command_mode(&self) -> bool {
        self.mode == ViewerMode::CommandEntry
    }

    #[cfg(test)]
    pub fn command_buffer(&self) -> &str {
        &self.command_buffer
    }

    pub fn status_message(&self) -> &str {
        &self.status_message
    }

    #[cfg(test)]
    pub fn load_error(&self) -> Option<&LoadError> {
        self.load_error.as_ref()
    }

    /// The line to display at `index`: colored when enabled and available, plain otherwise.
    fn display_line(&self, index: usize) -> &str {
        if self.highlight_enabled {
            if let Some(line) = self.highlighted_lines.get(index) {
                return line;
            }
        }
        self.raw_lines.get(index).map_or("", String::as_str)
    }

    // ── Scrolling ────────────────────────────────────────────────────────────

    /// Rows available for file content.
    pub fn page_height(&self) -> usize {
        self.viewport_height.saturating_sub(CHROME_ROWS).max(1)
    }

    pub fn max_scroll(&self) -> usize {
        self.raw_lines.len().saturating_sub(self.page_height())
    }

    fn scroll_to(&mut self, pos: usize) {
        self.scroll_pos = pos.min(self.max_scroll());
    }

    pub fn scroll_up(&mut self, n: usize) {
        self.scroll_to(self.scroll_pos.saturating_sub(n));
    }

    pub fn scroll_down(&mut self, n: usize) {
        self.scroll_to(self.scroll_pos.saturating_add(n));
    }

    pub fn scroll_top(&mut self) {
        self.scroll_to(0);
    }

    pub fn scroll_bottom(&mut self) {
        self.scroll_to(self.max_scroll());
    }

    pub fn half_page_up(&mut self) {
        self.scroll_up(self.page_height() / 2);
    }

    pub fn half_page_down(&mut self) {
        self.scroll_down(self.page_height() / 2);
    }

    /// Record new terminal dimensions; the scroll position is clamped right away.
    pub fn resize(&mut self, width: u16, height: u16) {
        self.viewport_width = width as usize;
        self.viewport_height = height as usize;
        self.scroll_to(self.scroll_pos);
    }

    // ── Input ────────────────────────────────────────────────────────────────

    /// Apply one key press. Keys are ignored on the error screen.
    pub fn handle_key(&mut self, key: KeyEvent) {
        if self.load_error.is_some() {
            return;
        }
        match self.mode {
            ViewerMode::Normal => self.handle_normal_key(key),
            ViewerMode::CommandEntry => self.handle_command_key(key),
        }
    }

    fn handle_normal_key(&mut self, key: KeyEvent) {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Char('u') if ctrl => self.half_page_up(),
            KeyCode::Char('d') if ctrl => self.half_page_down(),
            KeyCode::Up | KeyCode::Char('k') => self.scroll_up(1),
            KeyCode::Down | KeyCode::Char('j') => self.scroll_down(1),
            KeyCode::Home | KeyCode::Char('g') => self.scroll_top(),
            KeyCode::End | KeyCode::Char('G') => self.scroll_bottom(),
            KeyCode::PageUp => self.half_page_up(),
            KeyCode::PageDown => self.half_page_down(),
            KeyCode::Char(':') => self.enter_command_mode(""),
            KeyCode::Char('/') => self.enter_command_mode("/"),
            KeyCode::Char('n') => self.next_match(),
            KeyCode::Char('N') => self.prev_match(),
            _ => {}
        }
    }

    fn handle_command_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter => self.submit_command(),
            KeyCode::Esc => self.cancel_command(),
            KeyCode::Backspace => {
                self.command_buffer.pop();
            }
            KeyCode::Char(c)
                if !key
                    .modifiers
                    .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                self.command_buffer.push(c);
            }
            _ => {}
        }
    }

    fn enter_command_mode(&mut self, prefix: &str) {
        self.mode = ViewerMode::CommandEntry;
        self.command_buffer = prefix.to_string();
    }

    /// Leave command mode and run the buffered command.
    pub fn submit_command(&mut self) {
        let input = std::mem::take(&mut self.command_buffer);
        self.mode = ViewerMode::Normal;
        let command = command::parse(&input);
        tracing::debug!(?command, "viewer command");
        self.execute(command);
    }

    /// Leave command mode, discarding the buffer and the status line.
    pub fn cancel_command(&mut self) {
        self.command_buffer.clear();
        self.mode = ViewerMode::Normal;
        self.status_message.clear();
    }

    /// Run a parsed command. Failures only ever change the status message.
    pub fn execute(&mut self, command: Command) {
        match command {
            Command::Noop => {}
            Command::Search(text) => self.perform_search(&text),
            Command::SetWrap(on) => self.set_wrap(on),
            Command::SetHighlight(on) => self.set_highlight(on),
            Command::ToggleWrap => self.set_wrap(!self.wrap_enabled),
            Command::ToggleHighlight => self.set_highlight(!self.highlight_enabled),
            Command::NextMatch => self.next_match(),
            Command::PrevMatch => self.prev_match(),
            Command::ClearSearch => self.perform_search(""),
            Command::Help => self.status_message = HELP_SUMMARY.to_string(),
            Command::InvalidSet(option) if option.is_empty() => {
                self.status_message = "Usage: set wrap|nowrap|syntax|nosyntax".to_string();
            }
            Command::InvalidSet(option) => {
                self.status_message =
                    format!("Unknown option: {option} (expected wrap, nowrap, syntax or nosyntax)");
            }
            Command::Unknown(name) => {
                self.status_message = format!("Unknown command: {name} (type :help for commands)");
            }
        }
    }

    // ── Toggles ──────────────────────────────────────────────────────────────

    pub fn set_wrap(&mut self, on: bool) {
        self.wrap_enabled = on;
        self.status_message = if on {
            "Line wrap enabled".to_string()
        } else {
            "Line wrap disabled".to_string()
        };
    }

    /// Switch syntax coloring; the first switch-on of a viewer opened without
    /// highlighting runs the highlighter.
    pub fn set_highlight(&mut self, on: bool) {
        self.highlight_enabled = on;
        if on && !self.highlight_attempted {
            let text = self.raw_lines.join("\n");
            self.apply_highlighting(&text);
        }
        self.status_message = match (on, self.highlighted_lines.is_empty()) {
            (true, true) => "Syntax highlighting unavailable for this file".to_string(),
            (true, false) => "Syntax highlighting enabled".to_string(),
            (false, _) => "Syntax highlighting disabled".to_string(),
        };
    }

    // ── Search ───────────────────────────────────────────────────────────────

    /// Search plain lines for `text`, case-insensitively. Empty text clears the search.
    pub fn perform_search(&mut self, text: &str) {
        if text.is_empty() {
            self.search.clear();
            self.status_message = "Search cleared".to_string();
            return;
        }
        self.search.run(text, &self.raw_lines);
        match self.search.matches.first().copied() {
            Some(line) => {
                self.scroll_to(line);
                let n = self.search.matches.len();
                let noun = if n == 1 { "match" } else { "matches" };
                self.status_message = format!("Found {n} {noun} for \"{text}\"");
            }
            None => {
                self.status_message = format!("Pattern not found: {text}");
            }
        }
    }

    pub fn next_match(&mut self) {
        let line = self.search.advance();
        self.jump_to_match(line);
    }

    pub fn prev_match(&mut self) {
        let line = self.search.retreat();
        self.jump_to_match(line);
    }

    fn jump_to_match(&mut self, line: Option<usize>) {
        match (line, self.search.position()) {
            (Some(line), Some((i, n))) => {
                self.scroll_to(line);
                self.status_message = format!("Match {i} of {n}");
            }
            _ => self.status_message = "No active search".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::*;
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn check_invariant(v: &Viewer) {
        let max = v.line_count().saturating_sub(v.page_height());
        assert!(v.scroll_pos() <= max, "scroll {} > max {}", v.scroll_pos(), max);
    }

    #[test]
    fn scroll_stays_in_range_for_any_navigation() {
        let keys = [
            key(KeyCode::Down),
            key(KeyCode::Char('j')),
            key(KeyCode::PageDown),
            key(KeyCode::End),
            key(KeyCode::Down),
            ctrl('d'),
            key(KeyCode::Char('G')),
            key(KeyCode::Up),
            ctrl('u'),
            key(KeyCode::PageUp),
            key(KeyCode::Home),
            key(KeyCode::Up),
            key(KeyCode::Char('k')),
        ];
        for (lines, height) in [(0, 24), (1, 24), (5, 24), (20, 24), (100, 10), (100, 3)] {
            let mut v = plain_viewer(&numbered(lines), 80, height);
            for k in keys.iter().cycle().take(60) {
                v.handle_key(*k);
                check_invariant(&v);
            }
        }
    }

    #[test]
    fn step_and_jump_navigation() {
        let mut v = plain_viewer(&numbered(100), 80, 24); // page 20, max 80
        v.handle_key(key(KeyCode::Down));
        assert_eq!(v.scroll_pos(), 1);
        v.handle_key(key(KeyCode::Char('G')));
        assert_eq!(v.scroll_pos(), 80);
        v.handle_key(key(KeyCode::Down));
        assert_eq!(v.scroll_pos(), 80);
        v.handle_key(key(KeyCode::Char('g')));
        assert_eq!(v.scroll_pos(), 0);
        v.handle_key(key(KeyCode::Up));
        assert_eq!(v.scroll_pos(), 0);
    }

    #[test]
    fn half_page_moves_by_half_the_content_rows() {
        let mut v = plain_viewer(&numbered(100), 80, 24);
        v.handle_key(ctrl('d'));
        assert_eq!(v.scroll_pos(), 10);
        v.handle_key(key(KeyCode::PageDown));
        assert_eq!(v.scroll_pos(), 20);
        v.handle_key(key(KeyCode::PageUp));
        assert_eq!(v.scroll_pos(), 10);
        v.handle_key(ctrl('u'));
        v.handle_key(ctrl('u'));
        assert_eq!(v.scroll_pos(), 0);
    }

    #[test]
    fn short_file_never_scrolls() {
        let mut v = plain_viewer("a\nb\nc", 80, 24);
        v.handle_key(key(KeyCode::End));
        assert_eq!(v.scroll_pos(), 0);
    }

    #[test]
    fn resize_clamps_scroll_eagerly() {
        let mut v = plain_viewer(&numbered(30), 80, 14); // page 10, max 20
        v.handle_key(key(KeyCode::End));
        assert_eq!(v.scroll_pos(), 20);
        v.resize(80, 24); // page 20, max 10
        assert_eq!(v.scroll_pos(), 10);
        assert_eq!(v.viewport(), (80, 24));
    }

    fn needle_text() -> String {
        (0..40)
            .map(|i| {
                if [2, 5, 9].contains(&i) {
                    format!("line {i} has the Needle")
                } else {
                    format!("line {i}")
                }
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn search_records_matches_and_scrolls_to_first() {
        let mut v = plain_viewer(&needle_text(), 80, 14);
        v.perform_search("needle");
        assert_eq!(v.search_matches(), &[2, 5, 9]);
        assert_eq!(v.current_match_index(), Some(0));
        assert_eq!(v.scroll_pos(), 2);
        assert!(v.status_message().contains('3'));
    }

    #[test]
    fn search_is_case_insensitive_and_stores_lowercase_term() {
        let mut v = plain_viewer(&needle_text(), 80, 14);
        v.perform_search("NEEDLE");
        assert_eq!(v.search_term(), "needle");
        assert_eq!(v.search_matches().len(), 3);
    }

    #[test]
    fn search_scroll_is_clamped() {
        let mut v = plain_viewer("a\nb\nc\nfind me", 80, 24);
        v.perform_search("find");
        assert_eq!(v.search_matches(), &[3]);
        assert_eq!(v.scroll_pos(), 0);
    }

    #[test]
    fn next_match_cycles_back_to_first() {
        let mut v = plain_viewer(&needle_text(), 80, 14);
        v.perform_search("needle");
        v.next_match();
        assert_eq!(v.current_match_index(), Some(1));
        assert_eq!(v.scroll_pos(), 5);
        assert_eq!(v.status_message(), "Match 2 of 3");
        v.next_match();
        assert_eq!(v.current_match_index(), Some(2));
        v.next_match();
        assert_eq!(v.current_match_index(), Some(0));
        assert_eq!(v.scroll_pos(), 2);
    }

    #[test]
    fn prev_match_from_first_goes_to_last() {
        let mut v = plain_viewer(&needle_text(), 80, 14);
        v.perform_search("needle");
        v.prev_match();
        assert_eq!(v.current_match_index(), Some(2));
        assert_eq!(v.scroll_pos(), 9);
        assert_eq!(v.status_message(), "Match 3 of 3");
    }

    #[test]
    fn n_and_shift_n_keys_navigate_matches() {
        let mut v = plain_viewer(&needle_text(), 80, 14);
        v.perform_search("needle");
        v.handle_key(key(KeyCode::Char('n')));
        assert_eq!(v.current_match_index(), Some(1));
        v.handle_key(key(KeyCode::Char('N')));
        assert_eq!(v.current_match_index(), Some(0));
    }

    #[test]
    fn absent_term_reports_not_found() {
        let mut v = plain_viewer(&needle_text(), 80, 14);
        v.perform_search("zebra");
        assert!(v.search_matches().is_empty());
        assert_eq!(v.current_match_index(), None);
        assert!(v.status_message().contains("not found"));
        assert!(v.status_message().contains("zebra"));
    }

    #[test]
    fn navigation_without_search_reports_no_active_search() {
        let mut v = plain_viewer(&needle_text(), 80, 14);
        v.next_match();
        assert_eq!(v.status_message(), "No active search");
        v.prev_match();
        assert_eq!(v.status_message(), "No active search");
        assert_eq!(v.current_match_index(), None);
    }

    #[test]
    fn empty_search_clears_state() {
        let mut v = plain_viewer(&needle_text(), 80, 14);
        v.perform_search("needle");
        v.perform_search("");
        assert_eq!(v.search_term(), "");
        assert!(v.search_matches().is_empty());
        assert_eq!(v.current_match_index(), None);
        assert_eq!(v.status_message(), "Search cleared");
    }

    #[test]
    fn search_never_matches_color_markup() {
        let mut v = Viewer::from_text(
            "x.txt",
            "plain\nwords",
            &ViewerOptions::default(),
            Arc::new(BracketHighlighter),
            80,
            24,
        );
        assert!(!v.highlighted_lines().is_empty());
        v.perform_search("31m");
        assert!(v.search_matches().is_empty());
    }

    #[test]
    fn set_nowrap_then_wrap_toggles_on() {
        let mut v = plain_viewer("x", 80, 24);
        type_command(&mut v, "set nowrap");
        assert!(!v.wrap_enabled());
        type_command(&mut v, "wrap");
        assert!(v.wrap_enabled());
        assert_eq!(v.status_message(), "Line wrap enabled");
    }

    #[test]
    fn help_command_leaves_command_mode_with_summary() {
        let mut v = plain_viewer("x", 80, 24);
        v.handle_key(key(KeyCode::Char(':')));
        assert!(v.is_command_mode());
        for c in "help".chars() {
            v.handle_key(key(KeyCode::Char(c)));
        }
        assert_eq!(v.command_buffer(), "help");
        v.handle_key(key(KeyCode::Enter));
        assert!(!v.is_command_mode());
        assert_eq!(v.command_buffer(), "");
        assert!(v.status_message().contains("Commands"));
        assert!(v.status_message().contains("search"));
    }

    #[test]
    fn command_mode_swallows_navigation_keys() {
        let mut v = plain_viewer(&numbered(100), 80, 24);
        v.handle_key(key(KeyCode::Char(':')));
        v.handle_key(key(KeyCode::Char('j')));
        v.handle_key(key(KeyCode::Down));
        assert_eq!(v.scroll_pos(), 0);
        assert_eq!(v.command_buffer(), "j");
    }

    #[test]
    fn backspace_and_cancel() {
        let mut v = plain_viewer("x", 80, 24);
        v.perform_search("zzz");
        v.handle_key(key(KeyCode::Char(':')));
        v.handle_key(key(KeyCode::Char('a')));
        v.handle_key(key(KeyCode::Char('b')));
        v.handle_key(key(KeyCode::Backspace));
        assert_eq!(v.command_buffer(), "a");
        v.handle_key(key(KeyCode::Esc));
        assert!(!v.is_command_mode());
        assert_eq!(v.command_buffer(), "");
        assert_eq!(v.status_message(), "");
    }

    #[test]
    fn ctrl_chars_are_not_typed_into_buffer() {
        let mut v = plain_viewer("x", 80, 24);
        v.handle_key(key(KeyCode::Char(':')));
        v.handle_key(ctrl('d'));
        assert_eq!(v.command_buffer(), "");
    }

    #[test]
    fn slash_key_starts_a_search_prompt() {
        let mut v = plain_viewer(&needle_text(), 80, 14);
        v.handle_key(key(KeyCode::Char('/')));
        assert_eq!(v.command_buffer(), "/");
        for c in "needle".chars() {
            v.handle_key(key(KeyCode::Char(c)));
        }
        v.handle_key(key(KeyCode::Enter));
        assert_eq!(v.search_matches(), &[2, 5, 9]);
    }

    #[test]
    fn clear_command_clears_search() {
        let mut v = plain_viewer(&needle_text(), 80, 14);
        type_command(&mut v, "search needle");
        assert_eq!(v.search_matches().len(), 3);
        type_command(&mut v, "clear");
        assert!(v.search_matches().is_empty());
    }

    #[test]
    fn unknown_command_is_reported_not_fatal() {
        let mut v = plain_viewer("x", 80, 24);
        type_command(&mut v, "frobnicate");
        assert!(v.status_message().contains("Unknown command: frobnicate"));
        type_command(&mut v, "set bogus");
        assert!(v.status_message().contains("bogus"));
        assert!(!v.is_command_mode());
    }

    #[test]
    fn syntax_toggle_and_set() {
        let mut v = Viewer::from_text(
            "x.txt",
            "a\nb",
            &ViewerOptions::default(),
            Arc::new(BracketHighlighter),
            80,
            24,
        );
        assert!(v.highlight_enabled());
        type_command(&mut v, "syntax");
        assert!(!v.highlight_enabled());
        type_command(&mut v, "set syntax");
        assert!(v.highlight_enabled());
        assert_eq!(v.status_message(), "Syntax highlighting enabled");
        type_command(&mut v, "set nosyntax");
        assert!(!v.highlight_enabled());
    }

    #[test]
    fn highlighting_is_computed_lazily_when_started_off() {
        let options = ViewerOptions {
            highlight: false,
            ..ViewerOptions::default()
        };
        let mut v = Viewer::from_text("x.txt", "a\nb", &options, Arc::new(BracketHighlighter), 80, 24);
        assert!(v.highlighted_lines().is_empty());
        v.set_highlight(true);
        assert_eq!(v.highlighted_lines().len(), 2);
    }

    #[test]
    fn failing_highlighter_falls_back_silently() {
        let v = plain_viewer("a\nb", 80, 24);
        assert!(v.highlighted_lines().is_empty());
        assert_eq!(v.display_line(1), "b");
        assert_eq!(v.status_message(), "");
    }

    #[test]
    fn short_highlighter_output_is_index_guarded() {
        let v = Viewer::from_text(
            "x.txt",
            "one\ntwo\nthree",
            &ViewerOptions::default(),
            Arc::new(FirstLineOnlyHighlighter),
            80,
            24,
        );
        assert_eq!(v.highlighted_lines().len(), 1);
        assert!(v.display_line(0).contains("\x1b["));
        assert_eq!(v.display_line(2), "three");
        assert_eq!(v.display_line(99), "");
    }

    #[test]
    fn open_reads_and_normalizes_file() {
        let dir = TempDir::new().unwrap();
        let crlf = dir.path().join("crlf.txt");
        let lf = dir.path().join("lf.txt");
        fs::write(&crlf, "a\r\n\tb\r\n").unwrap();
        fs::write(&lf, "a\n\tb\n").unwrap();
        let a = Viewer::open(&crlf, "crlf.txt", &ViewerOptions::default(), no_highlight(), 80, 24);
        let b = Viewer::open(&lf, "lf.txt", &ViewerOptions::default(), no_highlight(), 80, 24);
        assert_eq!(a.raw_lines(), b.raw_lines());
        assert_eq!(a.raw_lines(), &["a".to_string(), "    b".to_string()]);
        assert_eq!(a.file_path(), crlf.as_path());
        assert_eq!(a.display_name(), "crlf.txt");
    }

    #[test]
    fn oversize_file_sets_load_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("big.txt");
        fs::write(&path, "12345").unwrap();
        let options = ViewerOptions {
            max_file_bytes: 4,
            ..ViewerOptions::default()
        };
        let v = Viewer::open(&path, "big.txt", &options, no_highlight(), 80, 24);
        assert!(matches!(v.load_error(), Some(LoadError::TooLarge { .. })));
        assert!(v.raw_lines().is_empty());
    }

    #[test]
    fn file_at_exact_limit_opens() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("fits.txt");
        fs::write(&path, "1234").unwrap();
        let options = ViewerOptions {
            max_file_bytes: 4,
            ..ViewerOptions::default()
        };
        let v = Viewer::open(&path, "fits.txt", &options, no_highlight(), 80, 24);
        assert!(v.load_error().is_none());
        assert_eq!(v.raw_lines(), &["1234".to_string()]);
    }

    #[test]
    fn keys_are_ignored_after_load_error() {
        let dir = TempDir::new().unwrap();
        let mut v = Viewer::open(
            &dir.path().join("missing.txt"),
            "missing.txt",
            &ViewerOptions::default(),
            no_highlight(),
            80,
            24,
        );
        assert!(matches!(v.load_error(), Some(LoadError::Io(_))));
        v.handle_key(key(KeyCode::Char(':')));
        assert!(!v.is_command_mode());
    }
}
