//! Configuration validation functionality.
//!
//! Hard range checks reject the file; combinations that work but look
//! unintended only produce a warning.

use anyhow::Result;

use super::Config;
use crate::common::constants::*;

/// Validate every field that is present in the file.
pub fn validate_config(config: &Config) -> Result<()> {
    if let Some(interval) = config.tick_interval
        && !(MINIMUM_TICK_INTERVAL..=MAXIMUM_TICK_INTERVAL).contains(&interval)
    {
        anyhow::bail!(
            "tick_interval ({} ms) must be between {} and {} milliseconds",
            interval,
            MINIMUM_TICK_INTERVAL,
            MAXIMUM_TICK_INTERVAL
        );
    }

    validate_animation_duration(config.animation_duration, "animation_duration")?;
    validate_animation_duration(
        config.day_of_year_animation_duration,
        "day_of_year_animation_duration",
    )?;

    if let Some(interval) = config.frame_interval
        && !(MINIMUM_FRAME_INTERVAL..=MAXIMUM_FRAME_INTERVAL).contains(&interval)
    {
        anyhow::bail!(
            "frame_interval ({} ms) must be between {} and {} milliseconds",
            interval,
            MINIMUM_FRAME_INTERVAL,
            MAXIMUM_FRAME_INTERVAL
        );
    }

    if let Some(settle) = config.midnight_settle
        && settle > MAXIMUM_MIDNIGHT_SETTLE
    {
        anyhow::bail!(
            "midnight_settle ({} ms) must be at most {} milliseconds",
            settle,
            MAXIMUM_MIDNIGHT_SETTLE
        );
    }

    if let Some(days) = config.upcoming_days
        && !(MINIMUM_UPCOMING_DAYS..=MAXIMUM_UPCOMING_DAYS).contains(&days)
    {
        anyhow::bail!(
            "upcoming_days ({}) must be between {} and {}",
            days,
            MINIMUM_UPCOMING_DAYS,
            MAXIMUM_UPCOMING_DAYS
        );
    }

    if let Some(width) = config.progress_bar_width
        && !(MINIMUM_PROGRESS_BAR_WIDTH..=MAXIMUM_PROGRESS_BAR_WIDTH).contains(&width)
    {
        anyhow::bail!(
            "progress_bar_width ({}) must be between {} and {} columns",
            width,
            MINIMUM_PROGRESS_BAR_WIDTH,
            MAXIMUM_PROGRESS_BAR_WIDTH
        );
    }

    // Soft check: transitions longer than a tick never settle on the
    // fractional metrics, they are retargeted every tick instead
    let tick = config.tick_interval.unwrap_or(DEFAULT_TICK_INTERVAL);
    let animation = config
        .animation_duration
        .unwrap_or(DEFAULT_ANIMATION_DURATION);
    if animation > tick {
        log_pipe!();
        log_warning!(
            "animation_duration ({animation} ms) is longer than tick_interval ({tick} ms)"
        );
        log_indented!("Day and year progress will be retargeted before they settle");
    }

    Ok(())
}

fn validate_animation_duration(value: Option<u64>, field: &str) -> Result<()> {
    if let Some(duration) = value
        && !(MINIMUM_ANIMATION_DURATION..=MAXIMUM_ANIMATION_DURATION).contains(&duration)
    {
        anyhow::bail!(
            "{} ({} ms) must be between {} and {} milliseconds",
            field,
            duration,
            MINIMUM_ANIMATION_DURATION,
            MAXIMUM_ANIMATION_DURATION
        );
    }
    Ok(())
}
