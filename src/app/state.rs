//! Defines the mutable state of one visualizer session.

use std::path::PathBuf;

use crate::config::AppConfig;

/// Holds the mutable state of a session.
///
/// Wrapped in an `Arc<Mutex<...>>` so the initiating context and background
/// tasks can share it. The core scan functions never see this type; they
/// receive an immutable `ScanConfig` snapshot per run.
pub struct SessionState {
    /// The active configuration; mutated only between scans.
    pub config: AppConfig,
    /// The directory currently selected for scanning.
    pub current_path: Option<PathBuf>,
    /// `true` while a tree build, search, or save is in flight. Operations
    /// are serialized through this flag.
    pub is_busy: bool,
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new(AppConfig::default())
    }
}

impl SessionState {
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            current_path: None,
            is_busy: false,
        }
    }

    /// Selects the directory for subsequent scans and remembers it in the
    /// configuration.
    pub fn select_directory(&mut self, path: PathBuf) {
        self.config.last_directory = Some(path.clone());
        self.current_path = Some(path);
    }

    /// Claims the busy flag. Returns `false` if another operation is
    /// already in flight.
    pub(crate) fn try_begin(&mut self) -> bool {
        if self.is_busy {
            return false;
        }
        self.is_busy = true;
        true
    }

    /// Releases the busy flag once an operation reaches its terminal state.
    pub(crate) fn finish(&mut self) {
        self.is_busy = false;
    }
}
