//! Implementation of the `now` command.
//!
//! Captures every metric at a single instant and prints it either as a
//! logger block or as pretty JSON for scripts.

use anyhow::{Context, Result};
use chrono::{DateTime, Local, TimeZone};
use serde::Serialize;

use crate::calendar::{self, DayCell, MetricKind, MetricsSnapshot};
use crate::config::{self, Config};
use crate::time_source;

/// JSON shape of `yearglance now --json`.
#[derive(Debug, Serialize)]
pub struct SnapshotReport {
    #[serde(flatten)]
    pub metrics: MetricsSnapshot,
    pub upcoming: Vec<DayCell>,
}

impl SnapshotReport {
    pub fn capture<Tz: TimeZone>(now: &DateTime<Tz>, upcoming_days: u32) -> Self
    where
        Tz::Offset: std::fmt::Display,
    {
        Self {
            metrics: MetricsSnapshot::capture(now),
            upcoming: calendar::upcoming_days(now, upcoming_days),
        }
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("failed to serialize snapshot")
    }
}

/// Handle `yearglance now`.
///
/// # Arguments
/// * `json` - Print JSON instead of a log block
/// * `at` - Optional "YYYY-MM-DD HH:MM:SS" instant to evaluate instead of now
pub fn handle_snapshot_command(json: bool, at: Option<&str>) -> Result<()> {
    let now: DateTime<Local> = match at {
        Some(text) => time_source::parse_datetime(text)
            .map_err(|e| anyhow::anyhow!("Invalid time for --at: {e}"))?,
        None => time_source::now(),
    };

    // A broken config file should not stop a one-shot query
    let config = config::load().unwrap_or_else(|e| {
        if !json {
            log_warning_standalone!("Using default settings: {e}");
        }
        Config::defaults()
    });

    let report = SnapshotReport::capture(&now, config.upcoming_days());

    if json {
        println!("{}", report.to_json()?);
        return Ok(());
    }

    log_version!();
    log_block_start!("{}", now.format("%A, %-d %B %Y %H:%M:%S"));
    let metrics = &report.metrics;
    log_indented!(
        "{}: {} / {}",
        MetricKind::DayOfYear.label(),
        metrics.day_of_year,
        metrics.days_in_year
    );
    for kind in MetricKind::ALL.into_iter().skip(1) {
        log_indented!("{}: {}", kind.label(), kind.format_value(metrics.value(kind)));
    }

    let strip: Vec<String> = report
        .upcoming
        .iter()
        .map(|cell| format!("{} {}", cell.weekday, cell.day_of_month))
        .collect();
    log_block_start!("Upcoming: {}", strip.join(", "));
    log_end!();

    Ok(())
}

/// Display help for the `now` command
pub fn display_help() {
    log_version!();
    log_block_start!("now - Print the calendar metrics once and exit");
    log_block_start!("Usage: yearglance now [--json] [--at <time>]");
    log_block_start!("Options:");
    log_indented!("-j, --json     Print the snapshot as JSON");
    log_indented!("--at <time>    Evaluate at \"YYYY-MM-DD HH:MM:SS\" local time");
    log_block_start!("Examples:");
    log_indented!("yearglance now");
    log_indented!("yearglance now --json --at \"2025-12-31 23:59:59\"");
    log_end!();
}
