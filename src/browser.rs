use std::path::{Path, PathBuf};

use crate::fs::listing::{self, FileItem};

/// What opening the selected entry should do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnterAction {
    /// The browser moved into a directory.
    ChangedDirectory,
    /// The selection is a file to open in the viewer.
    OpenFile(PathBuf),
    /// Nothing selected.
    None,
}

/// Directory listing with a cursor.
#[derive(Debug)]
pub struct BrowserState {
    pub current_path: PathBuf,
    pub items: Vec<FileItem>,
    pub cursor: usize,
    pub scroll_offset: usize,
    pub show_hidden: bool,
    /// Error from the last directory read, shown instead of the listing.
    pub error: Option<String>,
}

impl BrowserState {
    pub fn new(path: &Path, show_hidden: bool) -> Self {
        let mut state = Self {
            current_path: path.to_path_buf(),
            items: Vec::new(),
            cursor: 0,
            scroll_offset: 0,
            show_hidden,
            error: None,
        };
        state.load();
        state
    }

    /// Re-read the current directory and reset the cursor.
    pub fn load(&mut self) {
        self.cursor = 0;
        self.scroll_offset = 0;
        match listing::read_directory(&self.current_path, self.show_hidden) {
            Ok(items) => {
                tracing::info!(path = %self.current_path.display(), entries = items.len(), "listed directory");
                self.items = items;
                self.error = None;
            }
            Err(e) => {
                tracing::warn!(path = %self.current_path.display(), error = %e, "failed to list directory");
                self.items.clear();
                self.error = Some(e.to_string());
            }
        }
    }

    pub fn selected(&self) -> Option<&FileItem> {
        self.items.get(self.cursor)
    }

    pub fn select_next(&mut self) {
        if self.cursor + 1 < self.items.len() {
            self.cursor += 1;
        }
    }

    pub fn select_previous(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn select_first(&mut self) {
        self.cursor = 0;
    }

    pub fn select_last(&mut self) {
        self.cursor = self.items.len().saturating_sub(1);
    }

    /// Move into the parent directory, keeping the cursor on the directory we came from.
    pub fn go_parent(&mut self) {
        let Some(parent) = self.current_path.parent().map(Path::to_path_buf) else {
            return;
        };
        let previous = std::mem::replace(&mut self.current_path, parent);
        self.load();
        if let Some(idx) = self.items.iter().position(|i| i.path == previous) {
            self.cursor = idx;
        }
    }

    /// Open the selected entry: directories are entered, files are handed back.
    pub fn enter(&mut self) -> EnterAction {
        let Some(item) = self.selected().cloned() else {
            return EnterAction::None;
        };
        if item.is_parent_entry() {
            self.go_parent();
            EnterAction::ChangedDirectory
        } else if item.is_dir {
            self.current_path = item.path;
            self.load();
            EnterAction::ChangedDirectory
        } else {
            EnterAction::OpenFile(item.path)
        }
    }

    /// Show or hide dotfiles, keeping the selection on the same entry when it is still listed.
    pub fn toggle_hidden(&mut self) {
        self.show_hidden = !self.show_hidden;
        let selected = self.selected().map(|i| i.path.clone());
        self.load();
        if let Some(path) = selected {
            if let Some(idx) = self.items.iter().position(|i| i.path == path) {
                self.cursor = idx;
            }
        }
    }

    /// Update the scroll offset to ensure the cursor is visible.
    pub fn update_scroll(&mut self, visible_height: usize) {
        if visible_height == 0 {
            return;
        }
        if self.cursor < self.scroll_offset {
            self.scroll_offset = self.cursor;
        } else if self.cursor >= self.scroll_offset + visible_height {
            self.scroll_offset = self.cursor - visible_height + 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn setup() -> TempDir {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();
        fs::write(dir.path().join("sub").join("inner.txt"), "x").unwrap();
        fs::write(dir.path().join("a.txt"), "a").unwrap();
        fs::write(dir.path().join(".hidden"), "h").unwrap();
        dir
    }

    #[test]
    fn cursor_is_bounded() {
        let dir = setup();
        let mut b = BrowserState::new(dir.path(), false);
        assert_eq!(b.items.len(), 3); // .., sub, a.txt
        b.select_previous();
        assert_eq!(b.cursor, 0);
        b.select_last();
        assert_eq!(b.cursor, 2);
        b.select_next();
        assert_eq!(b.cursor, 2);
        b.select_first();
        assert_eq!(b.cursor, 0);
    }

    #[test]
    fn enter_directory_then_back_to_parent() {
        let dir = setup();
        let mut b = BrowserState::new(dir.path(), false);
        b.cursor = 1;
        assert_eq!(b.enter(), EnterAction::ChangedDirectory);
        assert_eq!(b.current_path, dir.path().join("sub"));
        assert_eq!(b.selected().map(|i| i.name.as_str()), Some(".."));

        b.go_parent();
        assert_eq!(b.current_path, dir.path());
        assert_eq!(b.selected().map(|i| i.name.as_str()), Some("sub"));
    }

    #[test]
    fn enter_parent_entry_goes_up() {
        let dir = setup();
        let mut b = BrowserState::new(&dir.path().join("sub"), false);
        assert_eq!(b.enter(), EnterAction::ChangedDirectory);
        assert_eq!(b.current_path, dir.path());
    }

    #[test]
    fn enter_file_returns_its_path() {
        let dir = setup();
        let mut b = BrowserState::new(dir.path(), false);
        b.select_last();
        assert_eq!(b.enter(), EnterAction::OpenFile(dir.path().join("a.txt")));
        assert_eq!(b.current_path, dir.path());
    }

    #[test]
    fn toggle_hidden_keeps_selection() {
        let dir = setup();
        let mut b = BrowserState::new(dir.path(), false);
        b.select_last();
        b.toggle_hidden();
        assert!(b.show_hidden);
        assert_eq!(b.items.len(), 4);
        assert_eq!(b.selected().map(|i| i.name.as_str()), Some("a.txt"));
    }

    #[test]
    fn unreadable_directory_records_error() {
        let dir = TempDir::new().unwrap();
        let b = BrowserState::new(&dir.path().join("missing"), false);
        assert!(b.error.is_some());
        assert!(b.items.is_empty());
        assert!(b.selected().is_none());
    }

    #[test]
    fn scroll_follows_cursor() {
        let dir = TempDir::new().unwrap();
        for i in 0..20 {
            fs::write(dir.path().join(format!("f{i:02}")), "").unwrap();
        }
        let mut b = BrowserState::new(dir.path(), false);
        b.select_last();
        b.update_scroll(5);
        assert_eq!(b.scroll_offset, b.cursor - 4);
        b.select_first();
        b.update_scroll(5);
        assert_eq!(b.scroll_offset, 0);
    }
}
