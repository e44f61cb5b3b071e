//! Animation records advanced by the frame tick.
//!
//! A [`Tween`] is plain data: when it started, how long it runs, and the two
//! values it moves between. Nothing schedules callbacks; whoever owns the
//! record samples it with the current frame time. Replacing the record is
//! how an animation is cancelled.

use std::time::Duration;

use crate::easing::{ease_out_cubic, lerp};

/// How raw progress is derived from elapsed time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TweenKind {
    /// Progress grows continuously with elapsed time.
    Continuous,
    /// Progress advances in `steps` equal jumps spread over the duration.
    Stepped { steps: u32 },
}

/// One running animation `{kind, start, duration, from, to}`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tween {
    pub kind: TweenKind,
    pub start: Duration,
    pub duration: Duration,
    pub from: f64,
    pub to: f64,
}

impl Tween {
    /// A continuous ease-out tween.
    pub fn new(start: Duration, duration: Duration, from: f64, to: f64) -> Self {
        Self {
            kind: TweenKind::Continuous,
            start,
            duration,
            from,
            to,
        }
    }

    /// A tween that advances in `steps` jumps of `step` each.
    pub fn stepped(start: Duration, steps: u32, step: Duration, from: f64, to: f64) -> Self {
        Self {
            kind: TweenKind::Stepped { steps: steps.max(1) },
            start,
            duration: step * steps.max(1),
            from,
            to,
        }
    }

    /// Un-eased progress in `[0, 1]` at `now`.
    pub fn linear_progress(&self, now: Duration) -> f64 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_sub(self.start);
        match self.kind {
            TweenKind::Continuous => {
                (elapsed.as_secs_f64() / self.duration.as_secs_f64()).min(1.0)
            }
            TweenKind::Stepped { steps } => {
                let step_nanos = (self.duration.as_nanos() / steps as u128).max(1);
                let done = (elapsed.as_nanos() / step_nanos).min(steps as u128);
                done as f64 / steps as f64
            }
        }
    }

    /// Ease-out cubic progress at `now`.
    pub fn eased(&self, now: Duration) -> f64 {
        ease_out_cubic(self.linear_progress(now))
    }

    /// Interpolated value at `now`.
    pub fn value(&self, now: Duration) -> f64 {
        lerp(self.from, self.to, self.eased(now))
    }

    pub fn is_finished(&self, now: Duration) -> bool {
        self.linear_progress(now) >= 1.0
    }

    /// Whether the tween moves toward a larger value.
    pub fn is_increasing(&self) -> bool {
        self.to > self.from
    }
}
