pub mod settings;

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::PathBuf;

use crate::core::{ScanConfig, DEFAULT_EXCLUDE_PATTERNS};

/// The persisted application configuration.
///
/// Holds the scan options a user can change between scans plus the last
/// directory they worked in.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AppConfig {
    pub show_hidden: bool,
    pub max_depth: Option<usize>,
    pub exclude_patterns: HashSet<String>,
    pub last_directory: Option<PathBuf>,
}

impl AppConfig {
    pub fn load() -> Result<Self> {
        settings::load_config(None)
    }

    /// The immutable snapshot handed to the core for one scan.
    pub fn scan_config(&self) -> ScanConfig {
        ScanConfig {
            show_hidden: self.show_hidden,
            max_depth: self.max_depth,
            exclude_patterns: self.exclude_patterns.clone(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            show_hidden: false,
            max_depth: None,
            exclude_patterns: DEFAULT_EXCLUDE_PATTERNS
                .iter()
                .map(|p| p.to_string())
                .collect(),
            last_directory: None,
        }
    }
}
