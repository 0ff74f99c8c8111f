use std::sync::Arc;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::{Highlighter, Viewer, ViewerOptions};
use crate::error::HighlightError;

/// Always fails, like a file type with no syntax definition.
pub struct NoHighlighter;

impl Highlighter for NoHighlighter {
    fn highlight(&self, _text: &str, file_name: &str) -> Result<String, HighlightError> {
        Err(HighlightError::NoSyntax(file_name.to_string()))
    }
}

/// Colors every line red.
pub struct BracketHighlighter;

impl Highlighter for BracketHighlighter {
    fn highlight(&self, text: &str, _file_name: &str) -> Result<String, HighlightError> {
        Ok(text
            .split('\n')
            .map(|line| format!("\x1b[31m{line}\x1b[0m"))
            .collect::<Vec<_>>()
            .join("\n"))
    }
}

/// Returns fewer lines than it was given.
pub struct FirstLineOnlyHighlighter;

impl Highlighter for FirstLineOnlyHighlighter {
    fn highlight(&self, text: &str, _file_name: &str) -> Result<String, HighlightError> {
        let first = text.split('\n').next().unwrap_or_default();
        Ok(format!("\x1b[32m{first}\x1b[0m"))
    }
}

pub fn no_highlight() -> Arc<dyn Highlighter> {
    Arc::new(NoHighlighter)
}

pub fn plain_viewer(text: &str, width: u16, height: u16) -> Viewer {
    Viewer::from_text(
        "test.txt",
        text,
        &ViewerOptions::default(),
        no_highlight(),
        width,
        height,
    )
}

/// `n` lines reading "line 0", "line 1", ...
pub fn numbered(n: usize) -> String {
    (0..n)
        .map(|i| format!("line {i}"))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

pub fn ctrl(c: char) -> KeyEvent {
    KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
}

/// Open command mode, type `input`, and submit it.
pub fn type_command(viewer: &mut Viewer, input: &str) {
    viewer.handle_key(key(KeyCode::Char(':')));
    for c in input.chars() {
        viewer.handle_key(key(KeyCode::Char(c)));
    }
    viewer.handle_key(key(KeyCode::Enter));
}
