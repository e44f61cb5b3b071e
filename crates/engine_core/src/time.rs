//! Frame time for the animation loop.
//!
//! Every animation in the engine reads "now" from a [`Time`] rather than the
//! wall clock, so a manual clock can drive the whole loop deterministically.

use std::time::{Duration, Instant};

/// Where a [`Time`] gets its notion of "now" from.
#[derive(Debug, Clone, Copy)]
enum ClockSource {
    /// Wall clock, measured from the moment the time manager was created.
    System { start: Instant },
    /// Virtual clock, moved explicitly by [`Time::advance`] / [`Time::set`].
    Manual,
}

/// Tracks elapsed time and frame deltas for the display refresh loop.
#[derive(Debug, Clone)]
pub struct Time {
    source: ClockSource,
    /// Time of the current frame, relative to clock start.
    now: Duration,
    /// Duration of the last frame.
    delta: Duration,
    /// Frame count since start.
    frame_count: u64,
}

impl Default for Time {
    fn default() -> Self {
        Self::new()
    }
}

impl Time {
    /// Create a time manager backed by the system clock.
    pub fn new() -> Self {
        Self {
            source: ClockSource::System { start: Instant::now() },
            now: Duration::ZERO,
            delta: Duration::ZERO,
            frame_count: 0,
        }
    }

    /// Create a time manager whose clock only moves when told to.
    pub fn manual() -> Self {
        Self {
            source: ClockSource::Manual,
            now: Duration::ZERO,
            delta: Duration::ZERO,
            frame_count: 0,
        }
    }

    /// Whether this is a manual (virtual) clock.
    pub fn is_manual(&self) -> bool {
        matches!(self.source, ClockSource::Manual)
    }

    /// Update timing at the start of a new frame.
    ///
    /// System clocks sample the wall clock; manual clocks keep whatever was
    /// last set and only count the frame.
    pub fn update(&mut self) {
        if let ClockSource::System { start } = self.source {
            let now = start.elapsed();
            self.delta = now.saturating_sub(self.now);
            self.now = now;
        }
        self.frame_count += 1;
    }

    /// Move a manual clock forward by `dt`. Ignored for system clocks.
    pub fn advance(&mut self, dt: Duration) {
        if self.is_manual() {
            self.delta = dt;
            self.now += dt;
        }
    }

    /// Jump a manual clock to `now`. Time never runs backwards.
    pub fn set(&mut self, now: Duration) {
        if self.is_manual() && now >= self.now {
            self.delta = now - self.now;
            self.now = now;
        }
    }

    /// Current frame time relative to clock start.
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Get the delta time in seconds.
    pub fn delta_seconds(&self) -> f64 {
        self.delta.as_secs_f64()
    }

    /// Get the delta time as a Duration.
    pub fn delta(&self) -> Duration {
        self.delta
    }

    /// Get the current frame count.
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Get the current FPS (averaged over last frame).
    pub fn fps(&self) -> f64 {
        if self.delta.as_secs_f64() > 0.0 {
            1.0 / self.delta.as_secs_f64()
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manual_clock_only_moves_when_advanced() {
        let mut t = Time::manual();
        t.update();
        assert_eq!(t.now(), Duration::ZERO);
        t.advance(Duration::from_millis(16));
        t.update();
        assert_eq!(t.now(), Duration::from_millis(16));
        assert_eq!(t.delta(), Duration::from_millis(16));
        assert_eq!(t.frame_count(), 2);
    }

    #[test]
    fn manual_clock_never_runs_backwards() {
        let mut t = Time::manual();
        t.set(Duration::from_millis(100));
        t.set(Duration::from_millis(40));
        assert_eq!(t.now(), Duration::from_millis(100));
    }

    #[test]
    fn system_clock_ignores_manual_moves() {
        let mut t = Time::new();
        t.advance(Duration::from_secs(10));
        assert!(t.now() < Duration::from_secs(10));
        assert!(!t.is_manual());
    }
}
