use super::builder::default_config_content;
use super::validation::validate_config;
use super::*;
use crate::common::constants::test_constants::*;
use serial_test::serial;
use std::fs;
use std::path::PathBuf;
use tempfile::tempdir;

fn write_config(dir: &std::path::Path, content: &str) -> PathBuf {
    let path = dir.join("yearglance.toml");
    fs::write(&path, content).unwrap();
    path
}

#[test]
#[serial]
fn test_config_load_default_creation() {
    let temp_dir = tempdir().unwrap();
    let config_path = temp_dir.path().join("yearglance").join("yearglance.toml");

    // Save and restore XDG_CONFIG_HOME
    let original = std::env::var("XDG_CONFIG_HOME").ok();
    unsafe {
        std::env::set_var("XDG_CONFIG_HOME", temp_dir.path());
    }

    // First load should create default config
    let result = load();

    unsafe {
        match original {
            Some(val) => std::env::set_var("XDG_CONFIG_HOME", val),
            None => std::env::remove_var("XDG_CONFIG_HOME"),
        }
    }

    if let Err(e) = &result {
        eprintln!("load() failed: {:?}", e);
    }
    assert!(result.is_ok());
    assert!(config_path.exists());
    assert_eq!(result.unwrap(), Config::defaults());
}

#[test]
fn test_default_content_round_trips_to_defaults() {
    let temp_dir = tempdir().unwrap();
    let path = write_config(temp_dir.path(), &default_config_content());

    let config = load_from_path(&path).unwrap();
    assert_eq!(config, Config::defaults());
    assert_eq!(config.tick_interval, Some(TEST_STANDARD_TICK_INTERVAL));
    assert_eq!(config.animation_duration, Some(TEST_STANDARD_ANIMATION_DURATION));
    assert_eq!(config.frame_interval, Some(TEST_STANDARD_FRAME_INTERVAL));
    assert_eq!(config.upcoming_days, Some(TEST_STANDARD_UPCOMING_DAYS));
    assert_eq!(
        config.progress_bar_width,
        Some(TEST_STANDARD_PROGRESS_BAR_WIDTH)
    );
}

#[test]
fn test_default_content_comments_are_aligned() {
    let content = default_config_content();
    let columns: Vec<usize> = content
        .lines()
        .filter(|line| !line.starts_with("#[") && !line.is_empty())
        .map(|line| line.find('#').unwrap())
        .collect();

    assert!(!columns.is_empty());
    assert!(columns.iter().all(|&c| c == columns[0]));
    assert!(content.contains("#[Timing]"));
    assert!(content.contains("#[Midnight]"));
    assert!(content.contains("#[Display]"));
}

#[test]
fn test_partial_config_gets_defaults() {
    let temp_dir = tempdir().unwrap();
    let path = write_config(
        temp_dir.path(),
        "tick_interval = 500\nmidnight_rearm = false\ncolor = false\n",
    );

    let config = load_from_path(&path).unwrap();
    assert_eq!(config.tick_interval, Some(500));
    assert_eq!(config.midnight_rearm, Some(false));
    assert_eq!(config.color, Some(false));
    assert_eq!(config.animation_duration, Some(DEFAULT_ANIMATION_DURATION));
    assert_eq!(config.midnight_refresh, Some(DEFAULT_MIDNIGHT_REFRESH));
    assert_eq!(config.midnight_settle, Some(DEFAULT_MIDNIGHT_SETTLE));
}

#[test]
fn test_empty_config_is_all_defaults() {
    let temp_dir = tempdir().unwrap();
    let path = write_config(temp_dir.path(), "");
    assert_eq!(load_from_path(&path).unwrap(), Config::defaults());
}

#[test]
fn test_summary_covers_display_settings() {
    let temp_dir = tempdir().unwrap();
    let path = write_config(temp_dir.path(), "progress_bar_width = 40\ncolor = false\n");

    let lines = load_from_path(&path).unwrap().summary_lines();
    assert!(lines.contains(&"Progress bar width: 40".to_string()));
    assert!(lines.contains(&"Color: off".to_string()));

    let lines = Config::defaults().summary_lines();
    assert!(lines.contains(&format!(
        "Progress bar width: {TEST_STANDARD_PROGRESS_BAR_WIDTH}"
    )));
    assert!(lines.contains(&"Color: on".to_string()));
    assert!(lines.contains(&"Midnight refresh: daily (+200ms)".to_string()));
}

#[test]
fn test_missing_file_is_an_error() {
    let temp_dir = tempdir().unwrap();
    let result = load_from_path(&temp_dir.path().join("absent.toml"));
    assert!(result.is_err());
    assert!(result.unwrap_err().to_string().contains("not found"));
}

#[test]
fn test_malformed_toml_is_an_error() {
    let temp_dir = tempdir().unwrap();
    let path = write_config(temp_dir.path(), "tick_interval = \"fast\"\n");
    let err = load_from_path(&path).unwrap_err();
    assert!(format!("{err:#}").contains("Failed to parse config"));
}

#[test]
fn test_unknown_field_is_rejected() {
    let temp_dir = tempdir().unwrap();
    let path = write_config(temp_dir.path(), "tick_intervall = 1000\n");
    assert!(load_from_path(&path).is_err());
}

#[test]
fn test_validation_accepts_boundaries() {
    let config = Config {
        tick_interval: Some(MINIMUM_TICK_INTERVAL),
        animation_duration: Some(MINIMUM_ANIMATION_DURATION),
        day_of_year_animation_duration: Some(MAXIMUM_ANIMATION_DURATION),
        frame_interval: Some(MAXIMUM_FRAME_INTERVAL),
        midnight_settle: Some(MAXIMUM_MIDNIGHT_SETTLE),
        upcoming_days: Some(MAXIMUM_UPCOMING_DAYS),
        progress_bar_width: Some(MINIMUM_PROGRESS_BAR_WIDTH),
        ..Config::default()
    };
    assert!(validate_config(&config).is_ok());
}

#[test]
fn test_validation_rejects_out_of_range_values() {
    let cases = [
        (
            Config {
                tick_interval: Some(MINIMUM_TICK_INTERVAL - 1),
                ..Config::default()
            },
            "tick_interval",
        ),
        (
            Config {
                tick_interval: Some(MAXIMUM_TICK_INTERVAL + 1),
                ..Config::default()
            },
            "tick_interval",
        ),
        (
            Config {
                animation_duration: Some(MAXIMUM_ANIMATION_DURATION + 1),
                ..Config::default()
            },
            "animation_duration",
        ),
        (
            Config {
                day_of_year_animation_duration: Some(MAXIMUM_ANIMATION_DURATION + 1),
                ..Config::default()
            },
            "day_of_year_animation_duration",
        ),
        (
            Config {
                frame_interval: Some(0),
                ..Config::default()
            },
            "frame_interval",
        ),
        (
            Config {
                midnight_settle: Some(MAXIMUM_MIDNIGHT_SETTLE + 1),
                ..Config::default()
            },
            "midnight_settle",
        ),
        (
            Config {
                upcoming_days: Some(0),
                ..Config::default()
            },
            "upcoming_days",
        ),
        (
            Config {
                progress_bar_width: Some(MAXIMUM_PROGRESS_BAR_WIDTH + 1),
                ..Config::default()
            },
            "progress_bar_width",
        ),
    ];

    for (config, field) in cases {
        let err = validate_config(&config).unwrap_err().to_string();
        assert!(err.starts_with(field), "expected {field} error, got: {err}");
    }
}

#[test]
fn test_long_animation_is_only_a_warning() {
    let config = Config {
        tick_interval: Some(500),
        animation_duration: Some(2000),
        ..Config::default()
    };
    assert!(validate_config(&config).is_ok());
}

#[test]
fn test_accessors_fall_back_to_defaults() {
    let config = Config::default();
    assert_eq!(
        config.tick_interval(),
        std::time::Duration::from_millis(DEFAULT_TICK_INTERVAL)
    );
    assert_eq!(
        config.day_of_year_animation_duration(),
        std::time::Duration::from_millis(DEFAULT_DAY_OF_YEAR_ANIMATION_DURATION)
    );
    assert_eq!(config.upcoming_days(), DEFAULT_UPCOMING_DAYS);
    assert_eq!(config.progress_bar_width(), DEFAULT_PROGRESS_BAR_WIDTH);
    assert!(config.midnight_refresh());
    assert!(config.midnight_rearm());
    assert!(config.color());
}

#[test]
#[serial]
fn test_get_config_path_uses_xdg() {
    let temp_dir = tempdir().unwrap();
    let original = std::env::var("XDG_CONFIG_HOME").ok();
    unsafe {
        std::env::set_var("XDG_CONFIG_HOME", temp_dir.path());
    }

    let path = get_config_path();

    unsafe {
        match original {
            Some(val) => std::env::set_var("XDG_CONFIG_HOME", val),
            None => std::env::remove_var("XDG_CONFIG_HOME"),
        }
    }

    assert_eq!(
        path.unwrap(),
        temp_dir.path().join("yearglance").join("yearglance.toml")
    );
}
