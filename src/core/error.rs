//! Defines the custom error type for the `core` module.

use std::path::PathBuf;
use thiserror::Error;

/// The primary error type for the `core` module.
///
/// Expected, localized failures during a walk (an unreadable directory, an
/// unreadable timestamp) are absorbed into degraded output and never reach
/// this type; `CoreError` covers the failures that abort a whole operation.
#[derive(Debug, Error)]
pub enum CoreError {
    /// An I/O error that cannot be degraded away, e.g. while writing a
    /// structure file.
    #[error("I/O error for path {1}: {0}")]
    Io(#[source] std::io::Error, PathBuf),

    /// A search pattern that failed to compile into a regular expression.
    #[error("Invalid search pattern: {0}")]
    Pattern(#[from] regex::Error),
}
