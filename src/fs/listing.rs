use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Result;

/// Name of the synthetic entry that leads to the parent directory.
pub const PARENT_ENTRY: &str = "..";

/// One row of the directory listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileItem {
    pub name: String,
    pub path: PathBuf,
    pub is_dir: bool,
    /// Size in bytes; zero for directories.
    pub size: u64,
}

impl FileItem {
    pub fn is_parent_entry(&self) -> bool {
        self.name == PARENT_ENTRY
    }

    pub fn is_hidden(&self) -> bool {
        self.name.starts_with('.') && !self.is_parent_entry()
    }
}

/// List `path`: a `..` entry when the directory has a parent, then
/// directories, then files, each group sorted case-insensitively by name.
///
/// Entries whose metadata cannot be read (permission denied, broken
/// symlinks) are skipped.
pub fn read_directory(path: &Path, show_hidden: bool) -> Result<Vec<FileItem>> {
    let mut dirs = Vec::new();
    let mut files = Vec::new();

    for entry in fs::read_dir(path)? {
        let Ok(entry) = entry else { continue };
        // Follows symlinks, so a link to a directory is listed as a directory.
        let Ok(meta) = fs::metadata(entry.path()) else {
            continue;
        };
        let name = entry.file_name().to_string_lossy().into_owned();
        if !show_hidden && name.starts_with('.') {
            continue;
        }
        let item = FileItem {
            name,
            path: entry.path(),
            is_dir: meta.is_dir(),
            size: if meta.is_dir() { 0 } else { meta.len() },
        };
        if item.is_dir {
            dirs.push(item);
        } else {
            files.push(item);
        }
    }

    let by_name = |a: &FileItem, b: &FileItem| a.name.to_lowercase().cmp(&b.name.to_lowercase());
    dirs.sort_by(by_name);
    files.sort_by(by_name);

    let mut items = Vec::with_capacity(dirs.len() + files.len() + 1);
    if let Some(parent) = path.parent() {
        items.push(FileItem {
            name: PARENT_ENTRY.to_string(),
            path: parent.to_path_buf(),
            is_dir: true,
            size: 0,
        });
    }
    items.extend(dirs);
    items.extend(files);
    Ok(items)
}

/// Format a byte count as a human-readable size.
pub fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = 1024 * KB;
    const GB: u64 = 1024 * MB;
    const TB: u64 = 1024 * GB;

    if bytes >= TB {
        format!("{:.2} TB", bytes as f64 / TB as f64)
    } else if bytes >= GB {
        format!("{:.2} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}
