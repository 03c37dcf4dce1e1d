//! Cooperative timer and frame queue for the dashboard main loop.
//!
//! Everything here runs on the main thread. Time is a monotonic `Duration`
//! supplied by the caller (see [`crate::time_source::monotonic`]), which
//! keeps the queue deterministic under test and under `--simulate`.
//!
//! Two kinds of callbacks are queued:
//! - one-shot timers, fired in deadline order (ties in scheduling order)
//! - frame callbacks, fired together once per frame interval
//!
//! A frame callback requested while a frame is being handled lands in the
//! next frame, never the current one.

use std::collections::{BTreeMap, HashMap};
use std::time::Duration;

/// Handle returned for every scheduled callback, used to cancel it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CancelToken(u64);

/// A callback whose time has come.
#[derive(Debug, Clone, PartialEq)]
pub struct Fired<E> {
    pub token: CancelToken,
    /// Deadline of a timer, or the frame time for frame callbacks
    pub at: Duration,
    pub event: E,
}

/// Per-frame callback scheduling as seen by animation code.
pub trait FrameScheduler<E> {
    /// Queue `event` for the next frame.
    fn request_frame(&mut self, event: E) -> CancelToken;

    /// Remove a pending callback. Returns `false` if it already fired or was cancelled.
    fn cancel(&mut self, token: CancelToken) -> bool;
}

pub struct Scheduler<E> {
    next_token: u64,
    timers: BTreeMap<(Duration, u64), E>,
    deadlines: HashMap<u64, Duration>,
    frames: Vec<(u64, E)>,
    frame_interval: Duration,
    last_frame: Option<Duration>,
}

impl<E> Scheduler<E> {
    pub fn new(frame_interval: Duration) -> Self {
        Self {
            next_token: 0,
            timers: BTreeMap::new(),
            deadlines: HashMap::new(),
            frames: Vec::new(),
            frame_interval,
            last_frame: None,
        }
    }

    pub fn frame_interval(&self) -> Duration {
        self.frame_interval
    }

    pub fn set_frame_interval(&mut self, frame_interval: Duration) {
        self.frame_interval = frame_interval;
    }

    fn issue_token(&mut self) -> u64 {
        self.next_token += 1;
        self.next_token
    }

    /// Fire `event` once, `delay` after `now`.
    pub fn schedule_after(&mut self, now: Duration, delay: Duration, event: E) -> CancelToken {
        let token = self.issue_token();
        let deadline = now.saturating_add(delay);
        self.timers.insert((deadline, token), event);
        self.deadlines.insert(token, deadline);
        CancelToken(token)
    }

    pub fn is_pending(&self, token: CancelToken) -> bool {
        self.deadlines.contains_key(&token.0) || self.frames.iter().any(|(id, _)| *id == token.0)
    }

    /// Drop every pending timer and frame callback.
    pub fn cancel_all(&mut self) {
        self.timers.clear();
        self.deadlines.clear();
        self.frames.clear();
    }

    pub fn pending_count(&self) -> usize {
        self.timers.len() + self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending_count() == 0
    }

    /// Time at which the next frame may be delivered.
    fn next_frame_at(&self) -> Duration {
        match self.last_frame {
            Some(last) => last.saturating_add(self.frame_interval),
            None => Duration::ZERO,
        }
    }

    /// How long the caller may wait from `now` before something is due.
    ///
    /// `None` means nothing is queued.
    pub fn next_wake(&self, now: Duration) -> Option<Duration> {
        let timer = self.timers.keys().next().map(|(deadline, _)| *deadline);
        let frame = (!self.frames.is_empty()).then(|| self.next_frame_at());

        let at = match (timer, frame) {
            (Some(t), Some(f)) => t.min(f),
            (Some(t), None) => t,
            (None, Some(f)) => f,
            (None, None) => return None,
        };
        Some(at.saturating_sub(now))
    }

    /// Remove and return everything due at `now`.
    ///
    /// Timers come first in deadline order, followed by the frame callbacks
    /// if a frame is due.
    pub fn due(&mut self, now: Duration) -> Vec<Fired<E>> {
        let mut fired = Vec::new();

        while let Some(entry) = self.timers.first_entry() {
            let (deadline, token) = *entry.key();
            if deadline > now {
                break;
            }
            let event = entry.remove();
            self.deadlines.remove(&token);
            fired.push(Fired {
                token: CancelToken(token),
                at: deadline,
                event,
            });
        }

        if !self.frames.is_empty() && now >= self.next_frame_at() {
            self.last_frame = Some(now);
            fired.extend(
                std::mem::take(&mut self.frames)
                    .into_iter()
                    .map(|(token, event)| Fired {
                        token: CancelToken(token),
                        at: now,
                        event,
                    }),
            );
        }

        fired
    }
}

impl<E> FrameScheduler<E> for Scheduler<E> {
    fn request_frame(&mut self, event: E) -> CancelToken {
        let token = self.issue_token();
        self.frames.push((token, event));
        CancelToken(token)
    }

    fn cancel(&mut self, token: CancelToken) -> bool {
        if let Some(deadline) = self.deadlines.remove(&token.0) {
            self.timers.remove(&(deadline, token.0));
            return true;
        }

        let before = self.frames.len();
        self.frames.retain(|(id, _)| *id != token.0);
        self.frames.len() != before
    }
}
