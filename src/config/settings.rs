//! Loading and saving the persisted configuration.

use anyhow::Result;
use directories::ProjectDirs;
use std::fs;
use std::path::{Path, PathBuf};

use super::AppConfig;

const APP_NAME: &str = "Treescope";
const CONFIG_FILE: &str = "config.json";

/// Returns the platform-specific configuration directory for the
/// application, or the override when one is given (used by tests).
pub fn get_config_directory(override_dir: Option<&Path>) -> Option<PathBuf> {
    if let Some(dir) = override_dir {
        return Some(dir.to_path_buf());
    }
    ProjectDirs::from("io", "treescope", APP_NAME)
        .map(|proj_dirs| proj_dirs.config_dir().to_path_buf())
}

/// Returns the full path to the configuration file.
pub fn get_config_file_path(override_dir: Option<&Path>) -> Option<PathBuf> {
    get_config_directory(override_dir).map(|dir| dir.join(CONFIG_FILE))
}

/// Loads the application configuration from the config file.
///
/// If the file doesn't exist, a default one is created. If it exists but
/// cannot be parsed, a warning is logged and the defaults are used instead
/// of failing.
pub fn load_config(override_dir: Option<&Path>) -> Result<AppConfig> {
    let config_path = get_config_file_path(override_dir)
        .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

    if !config_path.exists() {
        tracing::info!(
            "Config file not found, creating default config at {:?}",
            config_path
        );
        let default_config = AppConfig::default();
        save_config(&default_config, override_dir)?;
        return Ok(default_config);
    }

    let config_content = fs::read_to_string(&config_path)?;
    match serde_json::from_str::<AppConfig>(&config_content) {
        Ok(config) => {
            tracing::info!("Loaded config from {:?}", config_path);
            Ok(config)
        }
        Err(e) => {
            tracing::warn!(
                "Failed to parse config file at {:?}: {}. Falling back to default config.",
                config_path,
                e
            );
            Ok(AppConfig::default())
        }
    }
}

/// Saves the provided configuration to the config file.
pub fn save_config(config: &AppConfig, override_dir: Option<&Path>) -> Result<()> {
    let config_dir = get_config_directory(override_dir)
        .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

    if !config_dir.exists() {
        fs::create_dir_all(&config_dir)?;
        tracing::info!("Created config directory: {:?}", config_dir);
    }

    let config_path = config_dir.join(CONFIG_FILE);
    let config_json = serde_json::to_string_pretty(config)?;
    fs::write(&config_path, config_json)?;
    tracing::debug!("Saved config to {:?}", config_path);

    Ok(())
}
