//! Application constants and default values for yearglance.
//!
//! This module contains the configuration defaults, validation limits,
//! and operational constants used throughout the application.

// ═══ Application Configuration Defaults ═══
// These values are used when config options are not specified by the user

pub const DEFAULT_TICK_INTERVAL: u64 = 1000; // milliseconds between metric recomputations
pub const DEFAULT_ANIMATION_DURATION: u64 = 800; // milliseconds per value transition
pub const DEFAULT_DAY_OF_YEAR_ANIMATION_DURATION: u64 = 1000; // milliseconds, the day counter rolls slower
pub const DEFAULT_FRAME_INTERVAL: u64 = 16; // milliseconds (~60 frames per second)
pub const DEFAULT_MIDNIGHT_REFRESH: bool = true;
pub const DEFAULT_MIDNIGHT_REARM: bool = true;
pub const DEFAULT_MIDNIGHT_SETTLE: u64 = 200; // milliseconds past midnight before recomputing
pub const DEFAULT_UPCOMING_DAYS: u32 = 5; // days shown in the weekday strip
pub const DEFAULT_PROGRESS_BAR_WIDTH: usize = 30; // columns
pub const DEFAULT_COLOR: bool = true;

// ═══ Validation Limits ═══
// These limits keep user inputs within ranges the dashboard can render sensibly

// Tick interval limits
pub const MINIMUM_TICK_INTERVAL: u64 = 100; // milliseconds
pub const MAXIMUM_TICK_INTERVAL: u64 = 60_000; // milliseconds (one minute)

// Animation duration limits (0 = jump straight to the target)
pub const MINIMUM_ANIMATION_DURATION: u64 = 0;
pub const MAXIMUM_ANIMATION_DURATION: u64 = 10_000; // milliseconds

// Frame interval limits
pub const MINIMUM_FRAME_INTERVAL: u64 = 1; // milliseconds
pub const MAXIMUM_FRAME_INTERVAL: u64 = 1000; // milliseconds

// Midnight settle limits
pub const MAXIMUM_MIDNIGHT_SETTLE: u64 = 5000; // milliseconds

// Weekday strip limits
pub const MINIMUM_UPCOMING_DAYS: u32 = 1;
pub const MAXIMUM_UPCOMING_DAYS: u32 = 14;

// Progress bar limits
pub const MINIMUM_PROGRESS_BAR_WIDTH: usize = 10;
pub const MAXIMUM_PROGRESS_BAR_WIDTH: usize = 120;

// ═══ Calendar Arithmetic ═══

pub const SECONDS_PER_DAY: f64 = 86_400.0;

// ═══ Operational Timing Constants ═══
// Internal timing values for application operation

pub const SIGNAL_CHECK_INTERVAL_MS: u64 = 250; // longest the main loop waits without checking `running`
pub const KEYBOARD_POLL_INTERVAL_MS: u64 = 100; // crossterm event poll timeout

// ═══ Simulation ═══

pub const DEFAULT_SIMULATION_MULTIPLIER: f64 = 60.0; // one simulated minute per real second
pub const MINIMUM_SIMULATION_MULTIPLIER: f64 = 0.1;
pub const MAXIMUM_SIMULATION_MULTIPLIER: f64 = 3600.0;

// ═══ Display Palette ═══
// RGB triples taken from the dashboard's accent colours

pub const COLOR_ACCENT: (u8, u8, u8) = (0xFE, 0x54, 0x6A); // figures and today's cell
pub const COLOR_WARM: (u8, u8, u8) = (0xFE, 0xB4, 0x72); // progress bar fill
pub const COLOR_MUTED: (u8, u8, u8) = (0x8A, 0x8A, 0x8A); // labels and inactive cells

// ═══ Exit Codes ═══

pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_FAILURE: i32 = 1;

// ═══ Test Constants ═══
// Shared values for unit tests

#[cfg(test)]
pub mod test_constants {
    use super::*;

    pub const TEST_STANDARD_TICK_INTERVAL: u64 = DEFAULT_TICK_INTERVAL;
    pub const TEST_STANDARD_ANIMATION_DURATION: u64 = DEFAULT_ANIMATION_DURATION;
    pub const TEST_STANDARD_FRAME_INTERVAL: u64 = DEFAULT_FRAME_INTERVAL;
    pub const TEST_STANDARD_UPCOMING_DAYS: u32 = DEFAULT_UPCOMING_DAYS;
    pub const TEST_STANDARD_PROGRESS_BAR_WIDTH: usize = DEFAULT_PROGRESS_BAR_WIDTH;
}
