//! Recursive filename search over a directory tree.

use std::path::{Path, PathBuf};

use regex::Regex;

use super::format::{format_modified, human_size};
use super::{list_entries, CoreError, DirectoryEntry, EntryKind, ScanConfig, SearchResult};

/// A compiled search pattern.
///
/// Patterns containing `*` or `?` become anchored, case-insensitive
/// wildcard matches over the whole name; anything else is case-insensitive
/// substring containment.
#[derive(Debug)]
pub enum SearchPattern {
    Substring(String),
    Wildcard(Regex),
}

impl SearchPattern {
    pub fn parse(raw: &str) -> Result<Self, CoreError> {
        if !raw.contains('*') && !raw.contains('?') {
            return Ok(Self::Substring(raw.to_lowercase()));
        }

        let mut translated = String::with_capacity(raw.len() + 2);
        translated.push('^');
        for ch in raw.to_lowercase().chars() {
            match ch {
                '.' => translated.push_str("\\."),
                '*' => translated.push_str(".*"),
                '?' => translated.push('.'),
                other => translated.push(other),
            }
        }
        translated.push('$');

        Ok(Self::Wildcard(Regex::new(&translated)?))
    }

    /// Case-insensitive match of `name` against the pattern.
    pub fn matches(&self, name: &str) -> bool {
        let name = name.to_lowercase();
        match self {
            Self::Substring(needle) => name.contains(needle),
            Self::Wildcard(regex) => regex.is_match(&name),
        }
    }
}

/// Collects entries whose names match a search pattern.
///
/// This struct is stateless and provides methods as associated functions;
/// each search is a pure function of `(root, pattern, config)`.
pub struct SearchEngine;

impl SearchEngine {
    /// Recursively searches `root` for entries matching `pattern`,
    /// honoring the same exclusion policy and depth bound as the tree
    /// builder. Results arrive in pre-order traversal order.
    ///
    /// `progress` receives the raw listing size of each visited directory.
    /// Directories that cannot be listed are skipped silently; only a
    /// pattern that fails to compile aborts the search.
    pub fn search<P>(
        root: &Path,
        pattern: &str,
        config: &ScanConfig,
        progress: &P,
    ) -> Result<Vec<SearchResult>, CoreError>
    where
        P: Fn(usize),
    {
        let pattern = SearchPattern::parse(pattern)?;
        let mut results = Vec::new();
        Self::walk(root, root, 0, &pattern, config, progress, &mut results);
        Ok(results)
    }

    fn walk<P>(
        dir: &Path,
        root: &Path,
        depth: usize,
        pattern: &SearchPattern,
        config: &ScanConfig,
        progress: &P,
        results: &mut Vec<SearchResult>,
    ) where
        P: Fn(usize),
    {
        if !config.within_depth(depth) {
            return;
        }

        let entries = match list_entries(dir) {
            Ok(entries) => entries,
            Err(e) => {
                // Unlike the tree builder, the search leaves no trace of an
                // unreadable subtree.
                tracing::debug!("Skipping unreadable directory {:?}: {}", dir, e);
                return;
            }
        };
        progress(entries.len());

        for entry in entries {
            if config.should_exclude(&entry.name) {
                continue;
            }

            if pattern.matches(&entry.name) {
                results.push(Self::to_result(&entry, root));
            }

            // A matching directory is still descended into.
            if entry.is_directory {
                Self::walk(&entry.path, root, depth + 1, pattern, config, progress, results);
            }
        }
    }

    fn to_result(entry: &DirectoryEntry, root: &Path) -> SearchResult {
        let relative_path = match entry.path.strip_prefix(root) {
            Ok(rel) if !rel.as_os_str().is_empty() => rel.to_path_buf(),
            // The root itself reports its own name, not an empty path.
            _ => PathBuf::from(&entry.name),
        };

        let kind = if entry.is_directory {
            EntryKind::Directory
        } else {
            EntryKind::File
        };

        SearchResult {
            name: entry.name.clone(),
            path: entry.path.clone(),
            relative_path,
            kind,
            size: entry.size().map(human_size),
            modified: format_modified(&entry.path),
        }
    }
}
