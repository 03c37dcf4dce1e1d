//! Configuration loading functionality.
//!
//! Handles locating the configuration file, creating it on first start,
//! parsing, validation and applying defaults.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use super::Config;
use super::validation::validate_config;
use crate::common::constants::*;
use crate::common::utils::private_path;

pub const CONFIG_FILE_NAME: &str = "yearglance.toml";
const CONFIG_DIR_NAME: &str = "yearglance";

/// Global configuration directory, set once at startup
static CONFIG_DIR: OnceLock<Option<PathBuf>> = OnceLock::new();

/// Set the configuration directory for the current process.
/// This can only be called once, typically at startup.
/// Returns an error if already set.
pub fn set_config_dir(dir: Option<String>) -> Result<()> {
    CONFIG_DIR
        .set(dir.map(PathBuf::from))
        .map_err(|_| anyhow::anyhow!("Configuration directory already set"))
}

/// Get the custom configuration directory if one was set.
/// Returns None if using the default directory.
pub fn get_custom_config_dir() -> Option<PathBuf> {
    CONFIG_DIR.get().and_then(|d| d.clone())
}

/// Load configuration using automatic path detection.
///
/// This function will create a default configuration file if none exists.
pub fn load() -> Result<Config> {
    let config_path = get_config_path()?;

    if !config_path.exists() {
        super::builder::create_default_config(&config_path)
            .context("Failed to create default config during load")?;
    }

    load_from_path(&config_path).with_context(|| {
        format!(
            "Failed to load configuration from {}",
            private_path(&config_path)
        )
    })
}

/// Load configuration from a specific path.
///
/// This version does NOT create a default config if the path doesn't exist.
pub fn load_from_path(path: &Path) -> Result<Config> {
    if !path.exists() {
        anyhow::bail!("Configuration file not found at {}", private_path(path));
    }

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config from {}", private_path(path)))?;

    let mut config: Config = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config from {}", private_path(path)))?;

    validate_config(&config)?;
    apply_defaults(&mut config);

    Ok(config)
}

/// Get the configuration file path.
pub fn get_config_path() -> Result<PathBuf> {
    if let Some(custom_dir) = get_custom_config_dir() {
        return Ok(custom_dir.join(CONFIG_FILE_NAME));
    }

    let config_dir = dirs::config_dir().context("Could not determine config directory")?;
    Ok(config_dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
}

/// Apply default values to configuration fields.
pub(crate) fn apply_defaults(config: &mut Config) {
    config.tick_interval.get_or_insert(DEFAULT_TICK_INTERVAL);
    config
        .animation_duration
        .get_or_insert(DEFAULT_ANIMATION_DURATION);
    config
        .day_of_year_animation_duration
        .get_or_insert(DEFAULT_DAY_OF_YEAR_ANIMATION_DURATION);
    config.frame_interval.get_or_insert(DEFAULT_FRAME_INTERVAL);

    config.midnight_refresh.get_or_insert(DEFAULT_MIDNIGHT_REFRESH);
    config.midnight_rearm.get_or_insert(DEFAULT_MIDNIGHT_REARM);
    config.midnight_settle.get_or_insert(DEFAULT_MIDNIGHT_SETTLE);

    config.upcoming_days.get_or_insert(DEFAULT_UPCOMING_DAYS);
    config
        .progress_bar_width
        .get_or_insert(DEFAULT_PROGRESS_BAR_WIDTH);
    config.color.get_or_insert(DEFAULT_COLOR);
}
