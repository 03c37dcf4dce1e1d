//! Linear value transitions for the dashboard figures.
//!
//! An [`AnimatedValue`] owns the displayed number of one metric. Every new
//! target starts a fresh run from whatever is currently displayed and moves
//! linearly towards the target over a fixed duration, one step per frame.
//!
//! Runs are identified by a monotonically increasing run id. Frame callbacks
//! carry the id of the run that requested them; a callback whose id is no
//! longer current belongs to a superseded run and does nothing. Together with
//! the caller cancelling the old frame request before asking for a new one,
//! this guarantees at most one live update loop per value.

use std::time::Duration;

/// Result of delivering one frame to an [`AnimatedValue`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    /// The frame belonged to a superseded or cancelled run; nothing changed
    Stale,
    /// The value moved and another frame is needed
    Continue,
    /// The value reached its target; no further frames are needed
    Finished,
}

#[derive(Debug, Clone, Copy)]
struct Run {
    id: u64,
    start_value: f64,
    delta: f64,
    /// Length fixed when the run starts
    duration: Duration,
    /// Frame time of the first frame, set when that frame arrives
    started_at: Option<Duration>,
}

/// Displayed value of a single metric plus its in-flight transition.
#[derive(Debug, Clone)]
pub struct AnimatedValue {
    current: f64,
    target: f64,
    duration: Duration,
    run: Option<Run>,
    run_id: u64,
}

impl AnimatedValue {
    /// A fresh value displays its initial target immediately.
    pub fn new(initial: f64, duration: Duration) -> Self {
        Self {
            current: initial,
            target: initial,
            duration,
            run: None,
            run_id: 0,
        }
    }

    pub fn value(&self) -> f64 {
        self.current
    }

    pub fn target(&self) -> f64 {
        self.target
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Change the transition length. Applies from the next run onwards; a run
    /// in flight keeps the duration it started with.
    pub fn set_duration(&mut self, duration: Duration) {
        self.duration = duration;
    }

    pub fn is_animating(&self) -> bool {
        self.run.is_some()
    }

    /// Id of the current (or most recent) run.
    pub fn run_id(&self) -> u64 {
        self.run_id
    }

    /// Point the value at a new target.
    ///
    /// Returns the id of the newly started run when the caller must request a
    /// frame for it. Returns `None` when the target is unchanged (any run in
    /// flight keeps going) or when the value already sits on the new target.
    /// Either way a previous run is superseded only when a new target arrives.
    pub fn set_target(&mut self, target: f64) -> Option<u64> {
        if target == self.target {
            return None;
        }

        self.target = target;
        self.run_id += 1;

        let delta = target - self.current;
        if delta == 0.0 {
            self.run = None;
            return None;
        }

        self.run = Some(Run {
            id: self.run_id,
            start_value: self.current,
            delta,
            duration: self.duration,
            started_at: None,
        });
        Some(self.run_id)
    }

    /// Show `target` right away, superseding any run in flight.
    pub fn jump_to(&mut self, target: f64) {
        if self.run.take().is_some() || target != self.target {
            self.run_id += 1;
        }
        self.target = target;
        self.current = target;
    }

    /// Advance the run `run_id` to frame time `now`.
    pub fn on_frame(&mut self, run_id: u64, now: Duration) -> FrameOutcome {
        let Some(run) = self.run.as_mut() else {
            return FrameOutcome::Stale;
        };
        if run.id != run_id {
            return FrameOutcome::Stale;
        }

        let started_at = *run.started_at.get_or_insert(now);
        let elapsed = now.saturating_sub(started_at);
        let progress = progress(elapsed, run.duration);

        if progress >= 1.0 {
            self.current = self.target;
            self.run = None;
            return FrameOutcome::Finished;
        }

        self.current = interpolate(run.start_value, run.delta, progress);
        FrameOutcome::Continue
    }

    /// Stop any run in flight. The displayed value stays where it is.
    pub fn cancel(&mut self) {
        if self.run.take().is_some() {
            self.run_id += 1;
        }
    }
}

/// Fraction of `duration` covered by `elapsed`, clamped to `[0, 1]`.
///
/// A zero duration is complete immediately.
pub fn progress(elapsed: Duration, duration: Duration) -> f64 {
    if duration.is_zero() {
        return 1.0;
    }
    (elapsed.as_secs_f64() / duration.as_secs_f64()).min(1.0)
}

pub fn interpolate(start: f64, delta: f64, progress: f64) -> f64 {
    start + delta * progress
}
