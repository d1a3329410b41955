pub mod error;
pub mod format;
pub mod search;
pub mod tree;

use std::collections::HashSet;
use std::io;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use serde::{Deserialize, Serialize};

pub use error::CoreError;
pub use search::SearchEngine;
pub use tree::TreeBuilder;

/// Entry names containing any of these substrings are excluded by default.
pub const DEFAULT_EXCLUDE_PATTERNS: [&str; 5] = [
    "__pycache__",
    ".git",
    ".DS_Store",
    ".pytest_cache",
    "node_modules",
];

/// Options governing a single scan (tree build or search).
///
/// A config is immutable for the duration of one scan; consumers mutate it
/// only between scans.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScanConfig {
    /// Include entries whose names start with a dot.
    pub show_hidden: bool,
    /// Maximum directory depth below the root (root = 0). `None` is unlimited.
    pub max_depth: Option<usize>,
    /// Substring patterns; a name containing any of them is excluded.
    pub exclude_patterns: HashSet<String>,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            show_hidden: false,
            max_depth: None,
            exclude_patterns: DEFAULT_EXCLUDE_PATTERNS
                .iter()
                .map(|p| p.to_string())
                .collect(),
        }
    }
}

impl ScanConfig {
    /// The single exclusion policy shared by the tree builder and the
    /// search engine: hidden names (unless `show_hidden` is set) and names
    /// containing any exclude pattern as a plain substring.
    pub fn should_exclude(&self, name: &str) -> bool {
        if !self.show_hidden && name.starts_with('.') {
            return true;
        }
        self.exclude_patterns.iter().any(|p| name.contains(p))
    }

    /// Returns true if a directory at `depth` may still be listed.
    pub fn within_depth(&self, depth: usize) -> bool {
        self.max_depth.is_none_or(|max| depth <= max)
    }
}

/// A single filesystem entry observed during traversal.
///
/// Transient: derived on demand from the filesystem and never cached
/// between scans.
#[derive(Debug, Clone)]
pub struct DirectoryEntry {
    pub name: String,
    pub path: PathBuf,
    pub is_directory: bool,
}

impl DirectoryEntry {
    /// File size in bytes; `None` for directories or on a failed stat.
    pub fn size(&self) -> Option<u64> {
        if self.is_directory {
            return None;
        }
        std::fs::metadata(&self.path).ok().map(|md| md.len())
    }

    /// Last-modified time, if the filesystem can report one.
    pub fn modified(&self) -> Option<SystemTime> {
        std::fs::metadata(&self.path)
            .and_then(|md| md.modified())
            .ok()
    }
}

/// Lists the immediate children of `dir`, unfiltered and unsorted.
///
/// Callers apply `ScanConfig::should_exclude` themselves; the tree builder
/// and the search engine react differently to a listing failure.
pub(crate) fn list_entries(dir: &Path) -> io::Result<Vec<DirectoryEntry>> {
    let mut entries = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        let is_directory = entry
            .file_type()
            .map(|ft| ft.is_dir())
            .unwrap_or_else(|_| path.is_dir());
        entries.push(DirectoryEntry {
            name: entry.file_name().to_string_lossy().to_string(),
            path,
            is_directory,
        });
    }
    Ok(entries)
}

/// Whether a search hit is a file or a directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    File,
    Directory,
}

impl std::fmt::Display for EntryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EntryKind::File => write!(f, "file"),
            EntryKind::Directory => write!(f, "directory"),
        }
    }
}

/// One match produced by the search engine, in pre-order traversal order.
#[derive(Debug, Clone, Serialize)]
pub struct SearchResult {
    /// The entry's own name.
    pub name: String,
    /// Absolute path of the entry.
    pub path: PathBuf,
    /// Path relative to the scan root. A match on the root itself reports
    /// its own name rather than an empty path.
    pub relative_path: PathBuf,
    pub kind: EntryKind,
    /// Human-readable size for files; `None` for directories.
    pub size: Option<String>,
    /// Local mtime as `YYYY-MM-DD HH:MM:SS`, or `"Unknown"` if unreadable.
    pub modified: String,
}
