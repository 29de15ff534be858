//! Tick clock with fixed-interval accumulator
//!
//! The host reports elapsed frame time; the clock hands back how many
//! simulation ticks are due. Once stopped it never yields another tick.

use crate::consts::{MAX_CATCH_UP_TICKS, MAX_FRAME_DELTA, TICK_INTERVAL_MS};

/// Drives simulation ticks at a fixed wall-clock interval
#[derive(Debug, Clone)]
pub struct TickClock {
    /// Seconds between ticks
    pub interval: f32,
    /// Upper bound on ticks released by one `advance`
    pub max_catch_up: u32,
    /// Accumulated time not yet consumed by a tick
    accumulator: f32,
    /// Ticks released so far
    ticks: u64,
    stopped: bool,
}

impl Default for TickClock {
    fn default() -> Self {
        Self::with_interval_ms(TICK_INTERVAL_MS)
    }
}

impl TickClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a clock ticking every `ms` milliseconds (minimum 1 ms)
    pub fn with_interval_ms(ms: u32) -> Self {
        Self {
            interval: ms.max(1) as f32 / 1000.0,
            max_catch_up: MAX_CATCH_UP_TICKS,
            accumulator: 0.0,
            ticks: 0,
            stopped: false,
        }
    }

    /// Add `dt` seconds of elapsed time and return the number of ticks now due.
    ///
    /// Frame deltas are clamped, and at most `max_catch_up` ticks are released
    /// per call; time beyond that is dropped rather than queued.
    pub fn advance(&mut self, dt: f32) -> u32 {
        if self.stopped {
            return 0;
        }

        self.accumulator += dt.clamp(0.0, MAX_FRAME_DELTA);

        let mut due = 0;
        while self.accumulator >= self.interval && due < self.max_catch_up {
            self.accumulator -= self.interval;
            due += 1;
        }
        if due == self.max_catch_up && self.accumulator >= self.interval {
            log::debug!("Tick clock behind, dropping {:.3}s", self.accumulator);
            self.accumulator %= self.interval;
        }

        self.ticks += due as u64;
        due
    }

    /// Stop the clock for good
    pub fn stop(&mut self) {
        if !self.stopped {
            log::info!("Tick clock stopped after {} ticks", self.ticks);
        }
        self.stopped = true;
        self.accumulator = 0.0;
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    /// Total ticks released
    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_interval_is_30ms() {
        let clock = TickClock::new();
        assert!((clock.interval - 0.030).abs() < 1e-6);
        assert_eq!(clock.ticks(), 0);
    }

    #[test]
    fn test_accumulates_partial_frames() {
        let mut clock = TickClock::with_interval_ms(30);
        assert_eq!(clock.advance(0.020), 0);
        assert_eq!(clock.advance(0.020), 1);
        // 10ms carried over
        assert_eq!(clock.advance(0.015), 0);
        assert_eq!(clock.advance(0.010), 1);
    }

    #[test]
    fn test_multiple_ticks_in_one_frame() {
        let mut clock = TickClock::with_interval_ms(30);
        assert_eq!(clock.advance(0.095), 3);
        assert_eq!(clock.ticks(), 3);
    }

    #[test]
    fn test_catch_up_is_bounded() {
        let mut clock = TickClock::with_interval_ms(10);
        // 250ms would be 25 ticks; only the cap is released
        assert_eq!(clock.advance(1.0), MAX_CATCH_UP_TICKS);
        // Backlog was dropped, not queued
        assert_eq!(clock.advance(0.0), 0);
    }

    #[test]
    fn test_negative_delta_ignored() {
        let mut clock = TickClock::new();
        assert_eq!(clock.advance(-5.0), 0);
        assert_eq!(clock.advance(0.025), 0);
        assert_eq!(clock.advance(0.010), 1);
    }

    #[test]
    fn test_stopped_clock_never_ticks() {
        let mut clock = TickClock::new();
        clock.advance(0.020);
        clock.stop();
        assert!(clock.is_stopped());
        assert_eq!(clock.advance(0.2), 0);
        assert_eq!(clock.ticks(), 0);
    }
}
