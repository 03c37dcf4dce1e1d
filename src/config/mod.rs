//! Configuration system for yearglance.
//!
//! Settings live in a single TOML file:
//! 1. `<dir>/yearglance.toml` when started with `--config <dir>`
//! 2. `$XDG_CONFIG_HOME/yearglance/yearglance.toml` otherwise
//!
//! A commented default file is written on first start. Every field is
//! optional; missing fields fall back to the defaults in
//! [`crate::common::constants`].
//!
//! ```toml
//! #[Timing]
//! tick_interval = 1000                  # Milliseconds between metric recomputations (100-60000)
//! animation_duration = 800              # Milliseconds per value transition (0-10000 | 0 = instant)
//! day_of_year_animation_duration = 1000 # Milliseconds for the day counter transition (0-10000)
//! frame_interval = 16                   # Milliseconds between animation frames (1-1000)
//!
//! #[Midnight]
//! midnight_refresh = true               # Recompute everything right after local midnight
//! midnight_rearm = true                 # Re-arm the midnight refresh for every following day
//! midnight_settle = 200                 # Milliseconds to wait past midnight (0-5000)
//!
//! #[Display]
//! upcoming_days = 5                     # Days shown in the weekday strip (1-14)
//! progress_bar_width = 30               # Width of the day progress bar (10-120)
//! color = true                          # Use the accent colour palette
//! ```
//!
//! Loading parses the file, validates every present field against its range
//! and only then fills in defaults, so error messages always quote what the
//! user actually wrote.

pub mod builder;
pub mod loading;
pub mod validation;

use serde::Deserialize;
use std::time::Duration;

use crate::common::constants::*;

pub use builder::create_default_config;
pub use loading::{get_config_path, get_custom_config_dir, load, load_from_path, set_config_dir};

/// Configuration structure for yearglance settings.
///
/// All fields are optional in the file. After [`load`] or [`load_from_path`]
/// every field is `Some`.
#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    pub tick_interval: Option<u64>,                  // ms between recomputations
    pub animation_duration: Option<u64>,             // ms per transition
    pub day_of_year_animation_duration: Option<u64>, // ms, day counter only
    pub frame_interval: Option<u64>,                 // ms between frames

    /// Whether to schedule a full recompute right after local midnight.
    pub midnight_refresh: Option<bool>,
    /// Whether the midnight refresh re-arms itself for the next day.
    ///
    /// When `false` it fires only once per run.
    pub midnight_rearm: Option<bool>,
    pub midnight_settle: Option<u64>, // ms past midnight

    pub upcoming_days: Option<u32>,
    pub progress_bar_width: Option<usize>,
    pub color: Option<bool>,
}

impl Config {
    /// Configuration with every field set to its default.
    pub fn defaults() -> Self {
        let mut config = Self::default();
        loading::apply_defaults(&mut config);
        config
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval.unwrap_or(DEFAULT_TICK_INTERVAL))
    }

    pub fn animation_duration(&self) -> Duration {
        Duration::from_millis(self.animation_duration.unwrap_or(DEFAULT_ANIMATION_DURATION))
    }

    pub fn day_of_year_animation_duration(&self) -> Duration {
        Duration::from_millis(
            self.day_of_year_animation_duration
                .unwrap_or(DEFAULT_DAY_OF_YEAR_ANIMATION_DURATION),
        )
    }

    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_interval.unwrap_or(DEFAULT_FRAME_INTERVAL))
    }

    pub fn midnight_refresh(&self) -> bool {
        self.midnight_refresh.unwrap_or(DEFAULT_MIDNIGHT_REFRESH)
    }

    pub fn midnight_rearm(&self) -> bool {
        self.midnight_rearm.unwrap_or(DEFAULT_MIDNIGHT_REARM)
    }

    pub fn midnight_settle(&self) -> Duration {
        Duration::from_millis(self.midnight_settle.unwrap_or(DEFAULT_MIDNIGHT_SETTLE))
    }

    pub fn upcoming_days(&self) -> u32 {
        self.upcoming_days.unwrap_or(DEFAULT_UPCOMING_DAYS)
    }

    pub fn progress_bar_width(&self) -> usize {
        self.progress_bar_width.unwrap_or(DEFAULT_PROGRESS_BAR_WIDTH)
    }

    pub fn color(&self) -> bool {
        self.color.unwrap_or(DEFAULT_COLOR)
    }

    /// Print the effective settings as an indented log block.
    pub fn log_config(&self) {
        log_block_start!("Loaded configuration");

        if let Ok(path) = get_config_path() {
            log_indented!("File: {}", crate::common::utils::private_path(&path));
        }

        for line in self.summary_lines() {
            log_indented!(line);
        }
    }

    /// One line per effective setting, in the order `log_config` prints them.
    fn summary_lines(&self) -> Vec<String> {
        let midnight = if self.midnight_refresh() {
            format!(
                "Midnight refresh: {} (+{}ms)",
                if self.midnight_rearm() { "daily" } else { "once" },
                self.midnight_settle().as_millis()
            )
        } else {
            "Midnight refresh: disabled".to_string()
        };

        vec![
            format!("Tick interval: {}ms", self.tick_interval().as_millis()),
            format!(
                "Animation: {}ms ({}ms for the day counter)",
                self.animation_duration().as_millis(),
                self.day_of_year_animation_duration().as_millis()
            ),
            format!("Frame interval: {}ms", self.frame_interval().as_millis()),
            midnight,
            format!("Upcoming days: {}", self.upcoming_days()),
            format!("Progress bar width: {}", self.progress_bar_width()),
            format!("Color: {}", if self.color() { "on" } else { "off" }),
        ]
    }
}

#[cfg(test)]
mod tests;
