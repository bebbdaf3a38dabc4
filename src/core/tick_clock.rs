//=========================================================================
// Tick Clock
//=========================================================================
//
// Measures the rate the core loop actually achieves.
//
// The per-tick elapsed time handed to states is 1 / measured TPS, not
// the configured target, so a slow machine animates at the right speed.
// Until the first one-second window completes the rate is unknown and
// the fallback delta is used.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::time::{Duration, Instant};

//=== Constants ===========================================================

/// Elapsed seconds per tick while no rate has been measured.
pub const FALLBACK_DELTA: f64 = 1.0 / 60.0;

const MEASURE_WINDOW: Duration = Duration::from_secs(1);

//=== TickClock ===========================================================

#[derive(Debug, Clone)]
pub struct TickClock {
    window_start: Instant,
    ticks_in_window: u32,
    measured_tps: f64,
}

impl TickClock {
    pub fn new() -> Self {
        Self::starting_at(Instant::now())
    }

    pub fn starting_at(now: Instant) -> Self {
        Self {
            window_start: now,
            ticks_in_window: 0,
            measured_tps: 0.0,
        }
    }

    /// Records one tick now and returns the delta for it.
    pub fn tick(&mut self) -> f64 {
        self.tick_at(Instant::now())
    }

    /// Records one tick at `now` and returns the delta for it.
    pub fn tick_at(&mut self, now: Instant) -> f64 {
        self.ticks_in_window += 1;

        let window = now.saturating_duration_since(self.window_start);
        if window >= MEASURE_WINDOW {
            self.measured_tps = f64::from(self.ticks_in_window) / window.as_secs_f64();
            self.window_start = now;
            self.ticks_in_window = 0;
        }

        self.delta()
    }

    /// Ticks per second over the last completed window (0 before one).
    pub fn measured_tps(&self) -> f64 {
        self.measured_tps
    }

    pub fn delta(&self) -> f64 {
        delta_for_rate(self.measured_tps)
    }
}

impl Default for TickClock {
    fn default() -> Self {
        Self::new()
    }
}

/// Seconds per tick at `tps`, falling back when the rate is non-positive.
pub fn delta_for_rate(tps: f64) -> f64 {
    if tps > 0.0 {
        1.0 / tps
    } else {
        FALLBACK_DELTA
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_positive_rate_uses_fallback() {
        assert_eq!(delta_for_rate(0.0), FALLBACK_DELTA);
        assert_eq!(delta_for_rate(-5.0), FALLBACK_DELTA);
        assert_eq!(delta_for_rate(50.0), 0.02);
    }

    #[test]
    fn fresh_clock_reports_fallback() {
        let start = Instant::now();
        let mut clock = TickClock::starting_at(start);

        let delta = clock.tick_at(start + Duration::from_millis(16));

        assert_eq!(clock.measured_tps(), 0.0);
        assert_eq!(delta, FALLBACK_DELTA);
    }

    #[test]
    fn rate_is_measured_over_one_second() {
        let start = Instant::now();
        let mut clock = TickClock::starting_at(start);

        // 30 ticks spread across exactly one second
        let mut delta = 0.0;
        for i in 1..=30u64 {
            delta = clock.tick_at(start + Duration::from_millis(i * 1000 / 30));
        }

        assert!((clock.measured_tps() - 30.0).abs() < 1e-9);
        assert!((delta - 1.0 / 30.0).abs() < 1e-9);
    }
}
