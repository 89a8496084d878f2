/// Fixed-period tick accumulator.
///
/// Turns variable elapsed time into a whole number of fixed-length ticks so
/// that physics and energy advance at their own cadence no matter how often
/// the host calls back.
#[derive(Debug, Clone)]
pub struct IntervalTimer {
    /// Period of one tick in milliseconds.
    period_ms: f64,
    /// Elapsed time not yet consumed by a tick.
    accumulator_ms: f64,
    /// Catch-up cap per call (prevents a spiral after a stalled tab).
    max_ticks: u32,
}

impl IntervalTimer {
    pub fn new(period_ms: f64, max_ticks: u32) -> Self {
        Self {
            period_ms,
            accumulator_ms: 0.0,
            max_ticks: max_ticks.max(1),
        }
    }

    /// Add elapsed time. Returns the number of ticks now due.
    pub fn accumulate(&mut self, elapsed_ms: f64) -> u32 {
        if !(elapsed_ms > 0.0) {
            return 0;
        }
        self.accumulator_ms += elapsed_ms;
        let cap = self.period_ms * self.max_ticks as f64;
        self.accumulator_ms = self.accumulator_ms.min(cap);
        let ticks = (self.accumulator_ms / self.period_ms) as u32;
        self.accumulator_ms -= ticks as f64 * self.period_ms;
        ticks
    }
}

/// Tracks display-refresh timestamps and derives the per-frame delta.
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    last_ms: Option<f64>,
    frames: u64,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a refresh timestamp. Returns milliseconds since the previous
    /// frame (0.0 on the first frame or if the host clock went backwards).
    pub fn tick(&mut self, now_ms: f64) -> f64 {
        let delta = match self.last_ms {
            Some(last) if now_ms > last => now_ms - last,
            _ => 0.0,
        };
        self.last_ms = Some(now_ms);
        self.frames += 1;
        delta
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_tick_exact() {
        let mut timer = IntervalTimer::new(16.0, 10);
        assert_eq!(timer.accumulate(16.0), 1);
    }

    #[test]
    fn accumulates_partial() {
        let mut timer = IntervalTimer::new(100.0, 10);
        assert_eq!(timer.accumulate(40.0), 0);
        assert_eq!(timer.accumulate(70.0), 1);
        assert_eq!(timer.accumulate(89.0), 0);
        assert_eq!(timer.accumulate(1.0), 1);
    }

    #[test]
    fn caps_catch_up() {
        let mut timer = IntervalTimer::new(16.0, 10);
        assert_eq!(timer.accumulate(5000.0), 10);
    }

    #[test]
    fn ignores_non_positive_elapsed() {
        let mut timer = IntervalTimer::new(16.0, 10);
        assert_eq!(timer.accumulate(-5.0), 0);
        assert_eq!(timer.accumulate(f64::NAN), 0);
        assert_eq!(timer.accumulate(16.0), 1);
    }

    #[test]
    fn frame_clock_deltas() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.tick(1000.0), 0.0);
        assert!((clock.tick(1016.5) - 16.5).abs() < 1e-9);
        assert_eq!(clock.tick(1010.0), 0.0);
        assert_eq!(clock.frames(), 3);
    }
}
