//! Dashboard state: the six animated metrics and the timers that drive them.
//!
//! The dashboard is a single-threaded state machine. The main loop feeds it
//! the current wall-clock instant and monotonic time through [`Dashboard::pump`],
//! which runs every due callback from the [`Scheduler`]:
//!
//! - `Tick`: recompute every metric, retarget the animations, re-arm the tick
//! - `Midnight`: same recompute right after the local day boundary, re-armed
//!   for the following midnight unless configured as one-shot
//! - `Frame`: advance one metric's animation, requesting another frame until
//!   it settles
//!
//! Metrics are always recomputed before their animation targets change, and
//! each metric owns at most one pending frame callback: retargeting cancels
//! the old callback before requesting a new one.

pub mod render;

use chrono::{DateTime, TimeZone};
use std::time::Duration;

use crate::animation::{AnimatedValue, FrameOutcome};
use crate::calendar::{self, DayCell, MetricKind, MetricsSnapshot};
use crate::config::Config;
use crate::core::scheduler::{CancelToken, FrameScheduler, Scheduler};

/// Callbacks queued on the dashboard scheduler.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DashboardEvent {
    Tick,
    Midnight,
    Frame { metric: MetricKind, run_id: u64 },
}

/// Runtime settings resolved from the configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardSettings {
    pub tick_interval: Duration,
    pub animation_duration: Duration,
    pub day_of_year_animation_duration: Duration,
    pub frame_interval: Duration,
    pub midnight_refresh: bool,
    pub midnight_rearm: bool,
    pub midnight_settle: Duration,
    pub upcoming_days: u32,
    /// When off, values jump to new targets and no frames are requested
    pub animate: bool,
}

impl DashboardSettings {
    pub fn duration_for(&self, kind: MetricKind) -> Duration {
        match kind {
            MetricKind::DayOfYear => self.day_of_year_animation_duration,
            _ => self.animation_duration,
        }
    }
}

impl From<&Config> for DashboardSettings {
    fn from(config: &Config) -> Self {
        Self {
            tick_interval: config.tick_interval(),
            animation_duration: config.animation_duration(),
            day_of_year_animation_duration: config.day_of_year_animation_duration(),
            frame_interval: config.frame_interval(),
            midnight_refresh: config.midnight_refresh(),
            midnight_rearm: config.midnight_rearm(),
            midnight_settle: config.midnight_settle(),
            upcoming_days: config.upcoming_days(),
            animate: true,
        }
    }
}

impl Default for DashboardSettings {
    fn default() -> Self {
        Self::from(&Config::defaults())
    }
}

/// What a call to [`Dashboard::pump`] changed.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PumpOutcome {
    /// Metrics were recomputed from the clock
    pub recomputed: bool,
    /// At least one displayed value moved
    pub animated: bool,
}

impl PumpOutcome {
    pub fn needs_redraw(&self) -> bool {
        self.recomputed || self.animated
    }
}

pub struct Dashboard {
    settings: DashboardSettings,
    values: [AnimatedValue; 6],
    frame_tokens: [Option<CancelToken>; 6],
    scheduler: Scheduler<DashboardEvent>,
    tick_token: Option<CancelToken>,
    midnight_token: Option<CancelToken>,
    snapshot: MetricsSnapshot,
    upcoming: Vec<DayCell>,
    torn_down: bool,
}

impl Dashboard {
    /// Build the dashboard from the metrics at `now` and arm its timers.
    ///
    /// Every value starts out showing its target, nothing animates until the
    /// first recompute moves a target.
    pub fn new<Tz: TimeZone>(settings: DashboardSettings, now: &DateTime<Tz>, mono: Duration) -> Self
    where
        Tz::Offset: std::fmt::Display,
    {
        let snapshot = MetricsSnapshot::capture(now);
        let values = MetricKind::ALL
            .map(|kind| AnimatedValue::new(snapshot.value(kind), settings.duration_for(kind)));

        let mut dashboard = Self {
            scheduler: Scheduler::new(settings.frame_interval),
            upcoming: calendar::upcoming_days(now, settings.upcoming_days),
            settings,
            values,
            frame_tokens: [None; 6],
            tick_token: None,
            midnight_token: None,
            snapshot,
            torn_down: false,
        };

        dashboard.arm_tick(mono);
        dashboard.arm_midnight(now, mono);
        dashboard
    }

    pub fn settings(&self) -> &DashboardSettings {
        &self.settings
    }

    /// Displayed (possibly mid-transition) value of a metric.
    pub fn value(&self, kind: MetricKind) -> f64 {
        self.values[kind.index()].value()
    }

    pub fn target(&self, kind: MetricKind) -> f64 {
        self.values[kind.index()].target()
    }

    pub fn snapshot(&self) -> &MetricsSnapshot {
        &self.snapshot
    }

    pub fn upcoming(&self) -> &[DayCell] {
        &self.upcoming
    }

    pub fn is_animating(&self) -> bool {
        self.values.iter().any(AnimatedValue::is_animating)
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    pub fn is_midnight_armed(&self) -> bool {
        self.midnight_token
            .is_some_and(|token| self.scheduler.is_pending(token))
    }

    /// Callbacks still queued, timers and frames together.
    pub fn pending_callbacks(&self) -> usize {
        self.scheduler.pending_count()
    }

    /// Time the main loop may wait before the next call to [`Dashboard::pump`].
    pub fn next_wake(&self, mono: Duration) -> Option<Duration> {
        if self.torn_down {
            return None;
        }
        self.scheduler.next_wake(mono)
    }

    /// Run every callback due at `mono`.
    pub fn pump<Tz: TimeZone>(&mut self, now: &DateTime<Tz>, mono: Duration) -> PumpOutcome
    where
        Tz::Offset: std::fmt::Display,
    {
        let mut outcome = PumpOutcome::default();
        if self.torn_down {
            return outcome;
        }

        for fired in self.scheduler.due(mono) {
            match fired.event {
                DashboardEvent::Tick => {
                    self.tick_token = None;
                    self.recompute(now);
                    // Keep the cadence anchored to deadlines, not to late wake-ups
                    let next = next_tick_deadline(fired.at, self.settings.tick_interval, mono);
                    let token = self.scheduler.schedule_after(
                        mono,
                        next.saturating_sub(mono),
                        DashboardEvent::Tick,
                    );
                    self.tick_token = Some(token);
                    outcome.recomputed = true;
                }
                DashboardEvent::Midnight => {
                    self.midnight_token = None;
                    self.recompute(now);
                    if self.settings.midnight_rearm {
                        self.arm_midnight(now, mono);
                    }
                    outcome.recomputed = true;
                }
                DashboardEvent::Frame { metric, run_id } => {
                    let idx = metric.index();
                    // Only clear the slot if it still holds this callback
                    if self.frame_tokens[idx] == Some(fired.token) {
                        self.frame_tokens[idx] = None;
                    }

                    match self.values[idx].on_frame(run_id, mono) {
                        FrameOutcome::Stale => {}
                        FrameOutcome::Continue => {
                            let token = self
                                .scheduler
                                .request_frame(DashboardEvent::Frame { metric, run_id });
                            self.frame_tokens[idx] = Some(token);
                            outcome.animated = true;
                        }
                        FrameOutcome::Finished => outcome.animated = true,
                    }
                }
            }
        }

        outcome
    }

    /// Recompute immediately, outside the tick schedule.
    pub fn refresh<Tz: TimeZone>(&mut self, now: &DateTime<Tz>)
    where
        Tz::Offset: std::fmt::Display,
    {
        if !self.torn_down {
            self.recompute(now);
        }
    }

    /// Swap in new settings (config reload) and recompute.
    ///
    /// The tick and midnight timers are re-armed from `mono`. New animation
    /// durations apply from the next transition; runs in flight finish with
    /// the duration they started with.
    pub fn apply_settings<Tz: TimeZone>(
        &mut self,
        settings: DashboardSettings,
        now: &DateTime<Tz>,
        mono: Duration,
    ) where
        Tz::Offset: std::fmt::Display,
    {
        if self.torn_down {
            return;
        }

        for kind in MetricKind::ALL {
            self.values[kind.index()].set_duration(settings.duration_for(kind));
        }
        self.scheduler.set_frame_interval(settings.frame_interval);
        self.settings = settings;

        if let Some(token) = self.tick_token.take() {
            self.scheduler.cancel(token);
        }
        if let Some(token) = self.midnight_token.take() {
            self.scheduler.cancel(token);
        }
        self.arm_tick(mono);
        self.arm_midnight(now, mono);

        self.recompute(now);
    }

    /// Cancel every timer and in-flight frame. Later calls do nothing.
    pub fn teardown(&mut self) {
        if self.torn_down {
            return;
        }
        self.torn_down = true;

        self.scheduler.cancel_all();
        self.tick_token = None;
        self.midnight_token = None;
        self.frame_tokens = [None; 6];
        for value in &mut self.values {
            value.cancel();
        }
    }

    fn arm_tick(&mut self, mono: Duration) {
        let token = self
            .scheduler
            .schedule_after(mono, self.settings.tick_interval, DashboardEvent::Tick);
        self.tick_token = Some(token);
    }

    fn arm_midnight<Tz: TimeZone>(&mut self, now: &DateTime<Tz>, mono: Duration) {
        if !self.settings.midnight_refresh {
            return;
        }
        let delay = calendar::time_until_next_midnight(now) + self.settings.midnight_settle;
        let token = self
            .scheduler
            .schedule_after(mono, delay, DashboardEvent::Midnight);
        self.midnight_token = Some(token);
    }

    fn recompute<Tz: TimeZone>(&mut self, now: &DateTime<Tz>)
    where
        Tz::Offset: std::fmt::Display,
    {
        self.snapshot = MetricsSnapshot::capture(now);
        self.upcoming = calendar::upcoming_days(now, self.settings.upcoming_days);

        for kind in MetricKind::ALL {
            self.retarget(kind, self.snapshot.value(kind));
        }
    }

    fn retarget(&mut self, metric: MetricKind, target: f64) {
        let idx = metric.index();
        let value = &mut self.values[idx];

        let previous_run = value.run_id();
        let started = if self.settings.animate {
            value.set_target(target)
        } else {
            value.jump_to(target);
            None
        };

        if value.run_id() != previous_run
            && let Some(token) = self.frame_tokens[idx].take()
        {
            self.scheduler.cancel(token);
        }

        if let Some(run_id) = started {
            let token = self
                .scheduler
                .request_frame(DashboardEvent::Frame { metric, run_id });
            self.frame_tokens[idx] = Some(token);
        }
    }
}

/// First deadline on the `deadline + k * interval` grid that lies after `now`.
///
/// Ticks missed entirely (a stalled loop, a suspend) are skipped rather than
/// fired back to back.
fn next_tick_deadline(deadline: Duration, interval: Duration, now: Duration) -> Duration {
    let step = interval.as_nanos();
    if step == 0 {
        return now;
    }
    let behind = now.saturating_sub(deadline).as_nanos();
    let offset = (behind / step + 1) * step;
    deadline.saturating_add(Duration::from_nanos(u64::try_from(offset).unwrap_or(u64::MAX)))
}

impl Drop for Dashboard {
    fn drop(&mut self) {
        self.teardown();
    }
}
