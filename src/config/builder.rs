//! Default configuration file generation.
//!
//! The generated file lists every setting with its default and an aligned
//! comment describing the accepted range.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use crate::common::constants::*;
use crate::common::utils::private_path;

/// Create a default config file at `path`, creating parent directories.
pub fn create_default_config(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("Failed to create config directory")?;
    }

    fs::write(path, default_config_content())
        .with_context(|| format!("Failed to write default config to {}", private_path(path)))?;

    log_block_start!("Created default configuration");
    log_indented!("{}", private_path(path));
    Ok(())
}

/// Text of the default configuration file.
pub fn default_config_content() -> String {
    let mut content = ConfigBuilder::new()
        .add_section("Timing")
        .add_setting(
            "tick_interval",
            &DEFAULT_TICK_INTERVAL.to_string(),
            &format!(
                "Milliseconds between metric recomputations ({MINIMUM_TICK_INTERVAL}-{MAXIMUM_TICK_INTERVAL})"
            ),
        )
        .add_setting(
            "animation_duration",
            &DEFAULT_ANIMATION_DURATION.to_string(),
            &format!(
                "Milliseconds per value transition ({MINIMUM_ANIMATION_DURATION}-{MAXIMUM_ANIMATION_DURATION} | 0 = instant)"
            ),
        )
        .add_setting(
            "day_of_year_animation_duration",
            &DEFAULT_DAY_OF_YEAR_ANIMATION_DURATION.to_string(),
            &format!(
                "Milliseconds for the day counter transition ({MINIMUM_ANIMATION_DURATION}-{MAXIMUM_ANIMATION_DURATION})"
            ),
        )
        .add_setting(
            "frame_interval",
            &DEFAULT_FRAME_INTERVAL.to_string(),
            &format!(
                "Milliseconds between animation frames ({MINIMUM_FRAME_INTERVAL}-{MAXIMUM_FRAME_INTERVAL})"
            ),
        )
        .add_section("Midnight")
        .add_setting(
            "midnight_refresh",
            &DEFAULT_MIDNIGHT_REFRESH.to_string(),
            "Recompute everything right after local midnight",
        )
        .add_setting(
            "midnight_rearm",
            &DEFAULT_MIDNIGHT_REARM.to_string(),
            "Re-arm the midnight refresh for every following day",
        )
        .add_setting(
            "midnight_settle",
            &DEFAULT_MIDNIGHT_SETTLE.to_string(),
            &format!("Milliseconds to wait past midnight (0-{MAXIMUM_MIDNIGHT_SETTLE})"),
        )
        .add_section("Display")
        .add_setting(
            "upcoming_days",
            &DEFAULT_UPCOMING_DAYS.to_string(),
            &format!(
                "Days shown in the weekday strip ({MINIMUM_UPCOMING_DAYS}-{MAXIMUM_UPCOMING_DAYS})"
            ),
        )
        .add_setting(
            "progress_bar_width",
            &DEFAULT_PROGRESS_BAR_WIDTH.to_string(),
            &format!(
                "Width of the day progress bar ({MINIMUM_PROGRESS_BAR_WIDTH}-{MAXIMUM_PROGRESS_BAR_WIDTH})"
            ),
        )
        .add_setting("color", &DEFAULT_COLOR.to_string(), "Use the accent colour palette")
        .build();

    content.push('\n');
    content
}

/// Builder for the aligned `key = value  # comment` layout.
struct ConfigBuilder {
    entries: Vec<ConfigEntry>,
}

enum ConfigEntry {
    Section(String),
    Setting { line: String, comment: String },
}

impl ConfigBuilder {
    fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    fn add_section(mut self, title: &str) -> Self {
        self.entries.push(ConfigEntry::Section(format!("#[{title}]")));
        self
    }

    fn add_setting(mut self, key: &str, value: &str, comment: &str) -> Self {
        self.entries.push(ConfigEntry::Setting {
            line: format!("{key} = {value}"),
            comment: format!("# {comment}"),
        });
        self
    }

    fn build(self) -> String {
        // One space between the longest setting and its comment
        let max_width = self
            .entries
            .iter()
            .filter_map(|entry| match entry {
                ConfigEntry::Setting { line, .. } => Some(line.len()),
                ConfigEntry::Section(_) => None,
            })
            .max()
            .unwrap_or(0)
            + 1;

        let mut result = Vec::new();
        let mut first_section = true;

        for entry in self.entries {
            match entry {
                ConfigEntry::Section(title) => {
                    if !first_section {
                        result.push(String::new());
                    }
                    result.push(title);
                    first_section = false;
                }
                ConfigEntry::Setting { line, comment } => {
                    let padding = " ".repeat(max_width - line.len());
                    result.push(format!("{line}{padding}{comment}"));
                }
            }
        }

        result.join("\n")
    }
}
