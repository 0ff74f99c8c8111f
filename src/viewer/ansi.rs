//! Visible-width scanning over strings that carry embedded ANSI escape sequences.
//!
//! Truncation, soft wrapping and search-marker insertion all go through
//! [`scan`], so escape sequences are skipped (and never split) in exactly
//! one place.

use unicode_width::UnicodeWidthChar;

/// SGR reset.
pub const RESET: &str = "\x1b[0m";

/// Columns before the wrap budget in which a soft break is preferred.
pub const WRAP_LOOKBACK: usize = 20;

const ESC: u8 = 0x1b;
const BEL: u8 = 0x07;

/// One unit of a scanned string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token<'a> {
    /// A complete control sequence, zero columns wide.
    Escape(&'a str),
    /// A visible character.
    Text(char),
}

/// Iterator splitting a string into escape sequences and visible characters.
pub struct Scanner<'a> {
    src: &'a str,
    pos: usize,
}

pub fn scan(src: &str) -> Scanner<'_> {
    Scanner { src, pos: 0 }
}

impl<'a> Scanner<'a> {
    /// Byte length of the escape sequence starting at `start` (which holds ESC).
    fn escape_len(&self, start: usize) -> usize {
        let bytes = self.src.as_bytes();
        let mut i = start + 1;
        match bytes.get(i) {
            // CSI: parameters and intermediates up to a final byte in 0x40..=0x7e
            Some(b'[') => {
                i += 1;
                while let Some(&b) = bytes.get(i) {
                    i += 1;
                    if (0x40..=0x7e).contains(&b) {
                        break;
                    }
                }
            }
            // OSC: terminated by BEL or ESC '\'
            Some(b']') => {
                i += 1;
                while let Some(&b) = bytes.get(i) {
                    if b == BEL {
                        i += 1;
                        break;
                    }
                    if b == ESC && bytes.get(i + 1) == Some(&b'\\') {
                        i += 2;
                        break;
                    }
                    i += 1;
                }
            }
            Some(_) => {
                // Two-byte escape; step over a whole char in case it isn't ASCII.
                let ch_len = self.src[i..].chars().next().map_or(1, char::len_utf8);
                i += ch_len;
            }
            None => {}
        }
        i - start
    }
}

impl<'a> Iterator for Scanner<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let start = self.pos;
        let rest = &self.src[start..];
        let ch = rest.chars().next()?;
        if ch as u32 == ESC as u32 {
            let len = self.escape_len(start);
            self.pos += len;
            Some(Token::Escape(&self.src[start..start + len]))
        } else {
            self.pos += ch.len_utf8();
            Some(Token::Text(ch))
        }
    }
}

/// Display width of a single character; control characters count as zero.
pub fn char_width(c: char) -> usize {
    c.width().unwrap_or(0)
}

/// Visible text with all escape sequences removed.
#[cfg(test)]
pub fn strip(src: &str) -> String {
    scan(src)
        .filter_map(|t| match t {
            Token::Text(c) => Some(c),
            Token::Escape(_) => None,
        })
        .collect()
}

/// Number of terminal columns the string occupies.
pub fn visible_width(src: &str) -> usize {
    scan(src)
        .map(|t| match t {
            Token::Text(c) => char_width(c),
            Token::Escape(_) => 0,
        })
        .sum()
}

fn is_reset(seq: &str) -> bool {
    seq == "\x1b[0m" || seq == "\x1b[m"
}

/// Effective SGR state at some point of a line.
///
/// Folding every escape into this keeps the prefix re-emitted on a wrapped
/// row bounded, however many colour changes preceded the break.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
struct SgrState {
    /// Attributes 1 through 9 (bold, dim, italic, underline, blink, ..., strike).
    attrs: [bool; 10],
    fg: Option<String>,
    bg: Option<String>,
}

impl SgrState {
    /// Fold one escape sequence into the state; non-SGR sequences are ignored.
    fn apply(&mut self, seq: &str) {
        let Some(body) = seq.strip_prefix("\x1b[").and_then(|s| s.strip_suffix('m')) else {
            return;
        };
        let params: Vec<&str> = body.split(';').collect();
        let mut i = 0;
        while i < params.len() {
            let param = params[i];
            let code: u16 = if param.is_empty() {
                0
            } else {
                match param.parse() {
                    Ok(code) => code,
                    Err(_) => {
                        i += 1;
                        continue;
                    }
                }
            };
            match code {
                0 => *self = Self::default(),
                1..=9 => self.attrs[code as usize] = true,
                22 => {
                    self.attrs[1] = false;
                    self.attrs[2] = false;
                }
                23..=29 => self.attrs[(code - 20) as usize] = false,
                30..=37 | 90..=97 => self.fg = Some(param.to_string()),
                39 => self.fg = None,
                40..=47 | 100..=107 => self.bg = Some(param.to_string()),
                49 => self.bg = None,
                38 | 48 => {
                    // 38;5;n or 38;2;r;g;b
                    let len = match params.get(i + 1).copied() {
                        Some("5") => 3,
                        Some("2") => 5,
                        _ => {
                            i += 1;
                            continue;
                        }
                    };
                    let end = (i + len).min(params.len());
                    let value = params[i..end].join(";");
                    if code == 38 {
                        self.fg = Some(value);
                    } else {
                        self.bg = Some(value);
                    }
                    i = end;
                    continue;
                }
                _ => {}
            }
            i += 1;
        }
    }

    /// A single SGR sequence re-establishing this state; empty for the default state.
    fn prefix(&self) -> String {
        let mut params: Vec<String> = (1..self.attrs.len())
            .filter(|&a| self.attrs[a])
            .map(|a| a.to_string())
            .collect();
        params.extend(self.fg.iter().cloned());
        params.extend(self.bg.iter().cloned());
        if params.is_empty() {
            String::new()
        } else {
            format!("\x1b[{}m", params.join(";"))
        }
    }
}

/// Case-fold one character. Final sigma folds to plain sigma.
fn fold_char(c: char) -> impl Iterator<Item = char> {
    c.to_lowercase().map(|l| if l == 'ς' { 'σ' } else { l })
}

/// Case-fold `src` one character at a time; search and match marking both use this.
pub fn fold_case(src: &str) -> String {
    src.chars().flat_map(fold_char).collect()
}

/// Cut `src` so that it fits in `max_width` columns.
///
/// Strings that already fit are returned unchanged. Otherwise the kept
/// prefix is followed by a reset and `ellipsis`, and the whole result is at
/// most `max_width` columns wide.
pub fn truncate(src: &str, max_width: usize, ellipsis: &str) -> String {
    if visible_width(src) <= max_width {
        return src.to_string();
    }
    let ellipsis_width = visible_width(ellipsis);
    if max_width < ellipsis_width {
        return String::new();
    }
    let budget = max_width - ellipsis_width;

    let mut out = String::with_capacity(src.len().min(max_width * 4));
    let mut used = 0;
    for token in scan(src) {
        match token {
            Token::Escape(seq) => out.push_str(seq),
            Token::Text(c) => {
                let w = char_width(c);
                if used + w > budget {
                    break;
                }
                used += w;
                out.push(c);
            }
        }
    }
    out.push_str(RESET);
    out.push_str(ellipsis);
    out
}

/// True for characters after which a soft wrap may break the line.
fn is_break_char(c: char) -> bool {
    c.is_whitespace()
        || matches!(
            c,
            ',' | '.' | ';' | ':' | '!' | '?' | ')' | ']' | '}' | '-' | '/' | '\\' | '|' | '&'
        )
}

/// Soft-wrap `src` into at most `max_rows` rows of at most `width` columns.
///
/// A break is placed after the last whitespace or punctuation character
/// if one lies within the final [`WRAP_LOOKBACK`] columns of the row,
/// otherwise the row is cut at the width boundary. Every visible character
/// up to the row limit lands in exactly one row, in order. Colour state
/// active at a break is re-emitted at the start of the following row.
pub fn wrap(src: &str, width: usize, max_rows: usize) -> Vec<String> {
    let width = width.max(1);
    let mut rows = Vec::new();
    if max_rows == 0 {
        return rows;
    }
    let mut state = SgrState::default();

    let mut row_start = 0;
    let mut col = 0;
    // (byte offset just past the break character, column at that point)
    let mut soft_break: Option<(usize, usize)> = None;
    let mut scanner = scan(src);

    loop {
        let at = scanner.pos;
        let Some(token) = scanner.next() else {
            break;
        };
        let Token::Text(c) = token else {
            continue;
        };
        let w = char_width(c);
        while col > 0 && col + w > width {
            let (split, split_col) = match soft_break {
                Some((b, bc)) if bc + WRAP_LOOKBACK >= width => (b, bc),
                _ => (at, col),
            };
            let row = &src[row_start..split];
            rows.push(format!("{}{row}", state.prefix()));
            if rows.len() == max_rows {
                return rows;
            }
            for token in scan(row) {
                if let Token::Escape(seq) = token {
                    state.apply(seq);
                }
            }
            row_start = split;
            col -= split_col;
            soft_break = None;
        }
        col += w;
        if is_break_char(c) {
            soft_break = Some((scanner.pos, col));
        }
    }
    rows.push(format!("{}{}", state.prefix(), &src[row_start..]));
    rows
}

/// Wrap every case-insensitive occurrence of `needle_lower` in the visible
/// text of `src` between `start` and `end` markers.
///
/// Matching runs on visible characters only, so escape sequences already in
/// `src` are kept in place and never matched against. A full reset inside a
/// marked run re-opens the marker.
pub fn mark_matches(src: &str, needle_lower: &str, start: &str, end: &str) -> String {
    if needle_lower.is_empty() {
        return src.to_string();
    }
    let visible: Vec<char> = scan(src)
        .filter_map(|t| match t {
            Token::Text(c) => Some(c),
            Token::Escape(_) => None,
        })
        .collect();

    // Lower-case the visible text while remembering which source char each byte came from.
    let mut lowered = String::with_capacity(visible.len());
    let mut owner: Vec<usize> = Vec::with_capacity(visible.len());
    for (idx, c) in visible.iter().enumerate() {
        for lc in fold_char(*c) {
            let before = lowered.len();
            lowered.push(lc);
            owner.extend(std::iter::repeat(idx).take(lowered.len() - before));
        }
    }

    let mut marked = vec![false; visible.len()];
    let mut any = false;
    for (byte, m) in lowered.match_indices(needle_lower) {
        let first = owner[byte];
        let last = owner[byte + m.len() - 1];
        for flag in &mut marked[first..=last] {
            *flag = true;
        }
        any = true;
    }
    if !any {
        return src.to_string();
    }

    let mut out = String::with_capacity(src.len() + 16);
    let mut k = 0;
    let mut open = false;
    for token in scan(src) {
        match token {
            Token::Escape(seq) => {
                out.push_str(seq);
                if open && is_reset(seq) {
                    out.push_str(start);
                }
            }
            Token::Text(c) => {
                if marked[k] && !open {
                    out.push_str(start);
                    open = true;
                }
                out.push(c);
                let next_marked = marked.get(k + 1).copied().unwrap_or(false);
                if open && !next_marked {
                    out.push_str(end);
                    open = false;
                }
                k += 1;
            }
        }
    }
    out
}
