//! Implementation of `--simulate` for watching time-based behaviour.
//!
//! Installs a simulated time source so the dashboard can be run across a
//! midnight or New Year rollover without waiting for it.

use crate::time_source::{self, SimulatedTimeSource};
use anyhow::Result;
use chrono::Local;
use std::sync::Arc;

/// Handle `--simulate` by setting up a simulated time source.
///
/// Control returns to `main.rs`, which then runs the dashboard normally on
/// the accelerated clock.
///
/// # Arguments
/// * `start_time` - Start time in format "YYYY-MM-DD HH:MM:SS"
/// * `end_time` - End time in format "YYYY-MM-DD HH:MM:SS"
/// * `multiplier` - Time acceleration factor (0 = fast-forward)
/// * `debug_enabled` - Whether debug mode is enabled
pub fn handle_simulate_command(
    start_time: &str,
    end_time: &str,
    multiplier: f64,
    debug_enabled: bool,
) -> Result<()> {
    let start = time_source::parse_datetime(start_time)
        .map_err(|e| anyhow::anyhow!("Invalid start time: {}", e))?;
    let end = time_source::parse_datetime(end_time)
        .map_err(|e| anyhow::anyhow!("Invalid end time: {}", e))?;

    if end <= start {
        anyhow::bail!("End time must be after start time");
    }

    // Install before the first log line so timestamps are simulated from the start
    let source = Arc::new(SimulatedTimeSource::new(start, end, multiplier));
    let is_fast_forward = source.is_fast_forward();
    let actual_multiplier = source.multiplier();
    time_source::init_time_source(source);

    log_version!();
    log_block_start!("Simulation Mode");

    let duration = end.signed_duration_since(start);
    log_decorated!(
        "Simulating from {} to {}",
        start.format("%Y-%m-%d %H:%M:%S"),
        end.format("%Y-%m-%d %H:%M:%S")
    );
    log_indented!(
        "Total simulated time: {} hours {} minutes",
        duration.num_hours(),
        duration.num_minutes() % 60
    );

    if is_fast_forward {
        log_indented!("Time acceleration: fast-forward (instant execution)");
    } else {
        let real_duration_secs = duration.num_seconds() as f64 / actual_multiplier;
        log_indented!(
            "Time acceleration: {}x (will complete in ~{:.1} seconds)",
            actual_multiplier,
            real_duration_secs
        );
    }

    let log_filename = format!(
        "yearglance-simulation-{}.log",
        Local::now().format("%Y%m%d-%H%M%S")
    );
    log_pipe!();
    log_decorated!("To save output to a file, run:");
    log_indented!(
        "yearglance -S \"{}\" \"{}\" {}--log {}",
        start_time,
        end_time,
        if debug_enabled { "-d " } else { "" },
        log_filename
    );

    if debug_enabled {
        log_pipe!();
        log_debug!("Simulated time source initialized");
    }

    Ok(())
}

/// Display help for `--simulate`
pub fn display_help() {
    log_version!();
    log_block_start!("--simulate - Run the dashboard on simulated time");
    log_block_start!(
        "Usage: yearglance --simulate <start> <end> [multiplier | --fast-forward]"
    );
    log_block_start!("Arguments:");
    log_indented!("start         \"YYYY-MM-DD HH:MM:SS\" local time to begin at");
    log_indented!("end           \"YYYY-MM-DD HH:MM:SS\" local time to stop at");
    log_indented!("multiplier    Acceleration factor, 0.1 to 3600 (default 60)");
    log_indented!("--fast-forward  Jump straight to every scheduled wake-up");
    log_block_start!("Examples:");
    log_indented!("# Watch New Year's Eve roll over");
    log_indented!("yearglance -S \"2025-12-31 23:59:00\" \"2026-01-01 00:01:00\" 10");
    log_end!();
}
