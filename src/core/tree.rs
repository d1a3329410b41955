//! Renders an ASCII representation of a directory tree.

use std::path::Path;

use super::{list_entries, DirectoryEntry, ScanConfig};

/// Rendered in place of a subtree whose directory could not be listed.
pub const PERMISSION_DENIED_LEAF: &str = "[Permission Denied]";

/// Builds the prefix-decorated line sequence for a directory tree.
///
/// This struct is stateless and provides methods as associated functions;
/// each build is a pure function of `(root, config)`.
pub struct TreeBuilder;

impl TreeBuilder {
    /// Walks `root` and returns one line per visited entry, the first being
    /// `"<root-name>/"`.
    ///
    /// `progress` is invoked once per listed directory with the number of
    /// entries that survived filtering. It is advisory only; pass `|_| {}`
    /// when no liveness feedback is needed.
    pub fn build<P>(root: &Path, config: &ScanConfig, progress: &P) -> Vec<String>
    where
        P: Fn(usize),
    {
        let root_name = root
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_else(|| root.display().to_string());

        let mut lines = vec![format!("{root_name}/")];
        Self::walk(root, "", 0, config, progress, &mut lines);
        lines
    }

    /// Convenience wrapper returning the newline-joined tree text.
    pub fn render<P>(root: &Path, config: &ScanConfig, progress: &P) -> String
    where
        P: Fn(usize),
    {
        Self::build(root, config, progress).join("\n")
    }

    /// Appends the lines for the children of `dir`, each prefixed for its
    /// position in the tree.
    ///
    /// A directory that cannot be listed becomes a single terminal
    /// `[Permission Denied]` leaf; the walk continues with its siblings.
    fn walk<P>(
        dir: &Path,
        prefix: &str,
        depth: usize,
        config: &ScanConfig,
        progress: &P,
        lines: &mut Vec<String>,
    ) where
        P: Fn(usize),
    {
        if !config.within_depth(depth) {
            return;
        }

        let entries = match list_entries(dir) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::debug!("Could not list {:?}: {}", dir, e);
                lines.push(format!("{prefix}└── {PERMISSION_DENIED_LEAF}"));
                return;
            }
        };

        let mut kept: Vec<DirectoryEntry> = entries
            .into_iter()
            .filter(|entry| !config.should_exclude(&entry.name))
            .collect();
        progress(kept.len());

        // Directories before files, each group case-insensitively ascending.
        kept.sort_by(|a, b| {
            b.is_directory
                .cmp(&a.is_directory)
                .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
        });

        let count = kept.len();
        for (i, entry) in kept.iter().enumerate() {
            let is_last = i + 1 == count;
            let connector = if is_last { "└── " } else { "├── " };
            lines.push(format!("{prefix}{connector}{}", entry.name));

            if entry.is_directory {
                let child_prefix = if is_last {
                    format!("{prefix}    ")
                } else {
                    format!("{prefix}│   ")
                };
                Self::walk(&entry.path, &child_prefix, depth + 1, config, progress, lines);
            }
        }
    }
}
