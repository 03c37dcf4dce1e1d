//! Time source abstraction for real and simulated time.
//!
//! The dashboard reads two clocks: the wall clock (`now`), from which the
//! calendar metrics are derived, and a monotonic clock (`monotonic`), which
//! drives the scheduler and animation frames. Routing both through one
//! global source lets `--simulate` run the whole application on accelerated
//! time, for example to watch a midnight or New Year rollover.

use chrono::{DateTime, Local, NaiveDateTime, TimeZone};
use once_cell::sync::OnceCell;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

/// Global time source instance, defaults to RealTimeSource
static TIME_SOURCE: OnceCell<Arc<dyn TimeSource>> = OnceCell::new();

/// Trait for abstracting time operations
pub trait TimeSource: Send + Sync {
    /// Current wall-clock time in the local timezone
    fn now(&self) -> DateTime<Local>;

    /// Time elapsed since the source was created, never going backwards
    fn monotonic(&self) -> Duration;

    /// Sleep for the specified duration (or simulate it)
    fn sleep(&self, duration: Duration);

    /// Check if this is a simulated time source
    fn is_simulated(&self) -> bool;

    /// Check if simulation has ended (always false for real time)
    fn is_ended(&self) -> bool {
        false
    }
}

/// Real-time implementation backed by the system clocks
pub struct RealTimeSource {
    origin: Instant,
}

impl RealTimeSource {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for RealTimeSource {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeSource for RealTimeSource {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }

    fn monotonic(&self) -> Duration {
        self.origin.elapsed()
    }

    fn sleep(&self, duration: Duration) {
        std::thread::sleep(duration);
    }

    fn is_simulated(&self) -> bool {
        false
    }
}

/// Simulated time source for accelerated runs.
///
/// Two modes are supported:
/// - Linear acceleration: each simulated sleep takes `duration / multiplier` of real time
/// - Fast-forward (`multiplier == 0.0`): simulated sleeps return almost immediately
///
/// Simulated time only advances through [`TimeSource::sleep`], so the wall
/// clock and the monotonic clock always move together and stop at `end_time`.
pub struct SimulatedTimeSource {
    start_time: DateTime<Local>,
    end_time: DateTime<Local>,
    /// Time acceleration factor, 0.0 means fast-forward
    time_multiplier: f64,
    /// Simulated time slept so far
    elapsed: Mutex<Duration>,
}

impl SimulatedTimeSource {
    /// Create a new simulated time source
    ///
    /// # Arguments
    /// * `start_time` - Starting time for the simulation
    /// * `end_time` - Ending time for the simulation
    /// * `multiplier` - Time acceleration (e.g., 60.0 = 1 simulated minute per real second),
    ///   0.0 means fast-forward mode, negative values fall back to the default
    pub fn new(start_time: DateTime<Local>, end_time: DateTime<Local>, multiplier: f64) -> Self {
        let time_multiplier = if multiplier == 0.0 {
            0.0
        } else if multiplier < 0.0 {
            crate::common::constants::DEFAULT_SIMULATION_MULTIPLIER
        } else {
            multiplier
        };

        Self {
            start_time,
            end_time,
            time_multiplier,
            elapsed: Mutex::new(Duration::ZERO),
        }
    }

    /// Total simulated span between start and end
    fn span(&self) -> Duration {
        (self.end_time - self.start_time)
            .to_std()
            .unwrap_or(Duration::ZERO)
    }

    fn elapsed(&self) -> Duration {
        *self.elapsed.lock().unwrap()
    }

    pub fn is_fast_forward(&self) -> bool {
        self.time_multiplier == 0.0
    }

    pub fn multiplier(&self) -> f64 {
        self.time_multiplier
    }
}

impl TimeSource for SimulatedTimeSource {
    fn now(&self) -> DateTime<Local> {
        let elapsed = chrono::Duration::from_std(self.elapsed()).unwrap_or(chrono::Duration::zero());
        (self.start_time + elapsed).min(self.end_time)
    }

    fn monotonic(&self) -> Duration {
        self.elapsed()
    }

    fn sleep(&self, duration: Duration) {
        let remaining = self.span().saturating_sub(self.elapsed());
        let step = duration.min(remaining);
        if step.is_zero() {
            return;
        }

        if self.is_fast_forward() {
            // Yield so other threads (signals, file logger) get to run
            std::thread::sleep(Duration::from_millis(1));
        } else {
            std::thread::sleep(step.div_f64(self.time_multiplier));
        }

        *self.elapsed.lock().unwrap() += step;
    }

    fn is_simulated(&self) -> bool {
        true
    }

    fn is_ended(&self) -> bool {
        self.elapsed() >= self.span()
    }
}

fn source() -> &'static Arc<dyn TimeSource> {
    TIME_SOURCE.get_or_init(|| Arc::new(RealTimeSource::new()))
}

/// Initialize the global time source (call once at startup)
pub fn init_time_source(source: Arc<dyn TimeSource>) {
    TIME_SOURCE.set(source).ok();
}

/// Check if the time source has been initialized
pub fn is_initialized() -> bool {
    TIME_SOURCE.get().is_some()
}

/// Get the current time from the global time source
pub fn now() -> DateTime<Local> {
    source().now()
}

/// Get the monotonic clock reading from the global time source
pub fn monotonic() -> Duration {
    source().monotonic()
}

/// Sleep for the specified duration using the global time source
pub fn sleep(duration: Duration) {
    source().sleep(duration)
}

/// Check if we're running in simulation mode
pub fn is_simulated() -> bool {
    source().is_simulated()
}

/// Check if simulation has reached its end time (always false for real time)
pub fn simulation_ended() -> bool {
    source().is_ended()
}

/// Parse a datetime string in the format "YYYY-MM-DD HH:MM:SS" as local time
pub fn parse_datetime(s: &str) -> Result<DateTime<Local>, String> {
    let naive = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
        .map_err(|e| format!("Invalid datetime format: {e}. Use YYYY-MM-DD HH:MM:SS"))?;

    Local
        .from_local_datetime(&naive)
        .earliest()
        .ok_or_else(|| format!("'{s}' does not exist in the local timezone"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn local(s: &str) -> DateTime<Local> {
        parse_datetime(s).unwrap()
    }

    #[test]
    fn test_parse_datetime_valid() {
        let dt = local("2025-03-14 15:09:26");
        assert_eq!(dt.format("%Y-%m-%d %H:%M:%S").to_string(), "2025-03-14 15:09:26");
    }

    #[test]
    fn test_parse_datetime_invalid() {
        assert!(parse_datetime("2025-03-14").is_err());
        assert!(parse_datetime("2025-13-01 00:00:00").is_err());
        assert!(parse_datetime("not a date").is_err());
    }

    #[test]
    fn test_simulated_fast_forward_advances_both_clocks() {
        let source = SimulatedTimeSource::new(
            local("2025-12-31 23:59:00"),
            local("2026-01-01 00:05:00"),
            0.0,
        );
        assert!(source.is_simulated());
        assert_eq!(source.monotonic(), Duration::ZERO);

        source.sleep(Duration::from_secs(90));
        assert_eq!(source.monotonic(), Duration::from_secs(90));
        assert_eq!(
            source.now().format("%Y-%m-%d %H:%M:%S").to_string(),
            "2026-01-01 00:00:30"
        );
        assert!(!source.is_ended());
    }

    #[test]
    fn test_simulated_stops_at_end_time() {
        let end = local("2025-06-01 12:01:00");
        let source = SimulatedTimeSource::new(local("2025-06-01 12:00:00"), end, 0.0);

        source.sleep(Duration::from_secs(3600));
        assert_eq!(source.now(), end);
        assert_eq!(source.monotonic(), Duration::from_secs(60));
        assert!(source.is_ended());

        // Further sleeps are no-ops
        source.sleep(Duration::from_secs(10));
        assert_eq!(source.monotonic(), Duration::from_secs(60));
    }

    #[test]
    fn test_simulated_linear_acceleration() {
        let source = SimulatedTimeSource::new(
            local("2025-06-01 12:00:00"),
            local("2025-06-01 13:00:00"),
            1000.0,
        );
        assert!(!source.is_fast_forward());

        let real_start = Instant::now();
        source.sleep(Duration::from_secs(2));
        // Two simulated seconds at 1000x take about two real milliseconds
        assert!(real_start.elapsed() < Duration::from_millis(500));
        assert_eq!(source.monotonic(), Duration::from_secs(2));
    }

    #[test]
    fn test_negative_multiplier_uses_default() {
        let source = SimulatedTimeSource::new(
            local("2025-06-01 12:00:00"),
            local("2025-06-01 13:00:00"),
            -1.0,
        );
        assert_eq!(
            source.multiplier(),
            crate::common::constants::DEFAULT_SIMULATION_MULTIPLIER
        );
    }

    #[test]
    fn test_real_time_source_monotonic() {
        let source = RealTimeSource::new();
        let first = source.monotonic();
        let second = source.monotonic();
        assert!(second >= first);
        assert!(!source.is_simulated());
        assert!(!source.is_ended());
    }
}
