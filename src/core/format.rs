//! Human-readable formatting for file sizes and timestamps.

use std::path::Path;

use chrono::{DateTime, Local};

/// Placeholder used when an entry's mtime cannot be read.
pub const UNKNOWN_TIMESTAMP: &str = "Unknown";

/// Formats a byte count using binary (1024-based) units with one decimal
/// place, escalating B -> KB -> MB -> GB -> TB.
pub fn human_size(bytes: u64) -> String {
    let mut size = bytes as f64;
    for unit in ["B", "KB", "MB", "GB"] {
        if size < 1024.0 {
            return format!("{size:.1} {unit}");
        }
        size /= 1024.0;
    }
    format!("{size:.1} TB")
}

/// Formats a path's mtime as `YYYY-MM-DD HH:MM:SS` in local time.
///
/// An unreadable timestamp degrades to [`UNKNOWN_TIMESTAMP`] rather than
/// failing the entry.
pub fn format_modified(path: &Path) -> String {
    std::fs::metadata(path)
        .and_then(|md| md.modified())
        .map(|mtime| {
            DateTime::<Local>::from(mtime)
                .format("%Y-%m-%d %H:%M:%S")
                .to_string()
        })
        .unwrap_or_else(|_| UNKNOWN_TIMESTAMP.to_string())
}
