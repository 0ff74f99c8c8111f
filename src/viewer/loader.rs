use std::fs;
use std::path::Path;

use crate::error::LoadError;

/// How much of the file is scanned for NUL bytes before calling it binary.
const BINARY_SNIFF_BYTES: usize = 8192;

/// File content after line-ending normalization and tab expansion.
#[derive(Debug)]
pub struct LoadedContent {
    /// The whole normalized text, as handed to the highlighter.
    pub text: String,
    pub lines: Vec<String>,
}

/// Read `path` into normalized lines.
///
/// Files larger than `max_bytes` are refused before any data is read.
pub fn load(path: &Path, max_bytes: u64, tab_width: usize) -> Result<LoadedContent, LoadError> {
    let size = fs::metadata(path)?.len();
    if size > max_bytes {
        return Err(LoadError::TooLarge {
            size,
            limit: max_bytes,
        });
    }

    let bytes = fs::read(path)?;
    if bytes[..bytes.len().min(BINARY_SNIFF_BYTES)].contains(&0) {
        return Err(LoadError::Binary);
    }

    let text = normalize(&String::from_utf8_lossy(&bytes), tab_width);
    let lines = split_lines(&text);
    Ok(LoadedContent { text, lines })
}

/// Convert CRLF and bare CR to LF, then expand tabs to `tab_width` spaces.
pub fn normalize(content: &str, tab_width: usize) -> String {
    content
        .replace("\r\n", "\n")
        .replace('\r', "\n")
        .replace('\t', &" ".repeat(tab_width))
}

/// Split on LF. A final newline does not produce an extra empty line, but an
/// empty text is still one (empty) line.
pub fn split_lines(text: &str) -> Vec<String> {
    let body = text.strip_suffix('\n').unwrap_or(text);
    body.split('\n').map(str::to_string).collect()
}
