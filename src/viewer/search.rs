use super::ansi;

/// Active search: the lowercase needle, the lines containing it, and the selected match.
#[derive(Debug, Default, Clone)]
pub struct SearchState {
    pub term: String,
    pub matches: Vec<usize>,
    pub current: Option<usize>,
}

impl SearchState {
    pub fn is_active(&self) -> bool {
        !self.term.is_empty()
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Scan `lines` top to bottom for a case-insensitive literal substring.
    ///
    /// `term` must already be non-empty. The selected match becomes the first hit, if any.
    pub fn run(&mut self, term: &str, lines: &[String]) {
        self.term = ansi::fold_case(term);
        self.matches = lines
            .iter()
            .enumerate()
            .filter(|(_, line)| ansi::fold_case(line).contains(&self.term))
            .map(|(i, _)| i)
            .collect();
        self.current = if self.matches.is_empty() { None } else { Some(0) };
    }

    /// Step forward circularly; returns the selected line.
    pub fn advance(&mut self) -> Option<usize> {
        let n = self.matches.len();
        if n == 0 {
            return None;
        }
        let next = self.current.map_or(0, |c| (c + 1) % n);
        self.current = Some(next);
        Some(self.matches[next])
    }

    /// Step backward circularly; returns the selected line.
    pub fn retreat(&mut self) -> Option<usize> {
        let n = self.matches.len();
        if n == 0 {
            return None;
        }
        let prev = self.current.map_or(n - 1, |c| (c + n - 1) % n);
        self.current = Some(prev);
        Some(self.matches[prev])
    }

    /// "i/n" position of the selected match, 1-based.
    pub fn position(&self) -> Option<(usize, usize)> {
        self.current.map(|c| (c + 1, self.matches.len()))
    }
}
