//! Fixed-step clock
//!
//! The host reports elapsed time; the clock says how many whole ticks are due.
//! Stopping is idempotent and drops any partially accumulated tick.

use crate::consts::{MAX_SUBSTEPS, TICK_INTERVAL};

#[derive(Debug, Clone)]
pub struct FixedStepClock {
    interval: f32,
    accumulator: f32,
    running: bool,
    /// Ticks handed out since the last `accumulate`
    substeps: u32,
    max_substeps: u32,
}

impl Default for FixedStepClock {
    fn default() -> Self {
        Self::new(TICK_INTERVAL)
    }
}

impl FixedStepClock {
    pub fn new(interval: f32) -> Self {
        debug_assert!(interval > 0.0 && interval.is_finite());
        Self {
            interval,
            accumulator: 0.0,
            running: false,
            substeps: 0,
            max_substeps: MAX_SUBSTEPS,
        }
    }

    pub fn interval(&self) -> f32 {
        self.interval
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Start ticking from zero, replacing whatever schedule was active
    pub fn start(&mut self) {
        self.accumulator = 0.0;
        self.substeps = 0;
        self.running = true;
    }

    /// Stop ticking. Safe to call any number of times.
    pub fn stop(&mut self) {
        self.running = false;
        self.accumulator = 0.0;
        self.substeps = 0;
    }

    /// Add host time. Ignored while stopped or when the value is bogus.
    pub fn accumulate(&mut self, elapsed: f32) {
        self.substeps = 0;
        if !self.running || !elapsed.is_finite() || elapsed <= 0.0 {
            return;
        }
        // Clamp long stalls (tab switch, debugger) so we don't try to catch up forever
        let max_backlog = self.interval * self.max_substeps as f32;
        self.accumulator = (self.accumulator + elapsed).min(max_backlog);
    }

    /// Consume one tick if one is due
    pub fn next_tick(&mut self) -> bool {
        if !self.running || self.substeps >= self.max_substeps {
            return false;
        }
        if self.accumulator + f32::EPSILON < self.interval {
            return false;
        }
        self.accumulator = (self.accumulator - self.interval).max(0.0);
        self.substeps += 1;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain(clock: &mut FixedStepClock) -> u32 {
        let mut n = 0;
        while clock.next_tick() {
            n += 1;
        }
        n
    }

    #[test]
    fn test_stopped_clock_never_ticks() {
        let mut clock = FixedStepClock::default();
        clock.accumulate(1.0);
        assert_eq!(drain(&mut clock), 0);
    }

    #[test]
    fn test_whole_ticks_only() {
        let mut clock = FixedStepClock::new(0.03);
        clock.start();
        clock.accumulate(0.02);
        assert_eq!(drain(&mut clock), 0);
        clock.accumulate(0.02);
        assert_eq!(drain(&mut clock), 1);
        clock.accumulate(0.07);
        assert_eq!(drain(&mut clock), 2);
    }

    #[test]
    fn test_backlog_is_capped() {
        let mut clock = FixedStepClock::new(0.03);
        clock.start();
        clock.accumulate(60.0);
        assert_eq!(drain(&mut clock), MAX_SUBSTEPS);
        clock.accumulate(0.0);
        assert_eq!(drain(&mut clock), 0);
    }

    #[test]
    fn test_stop_is_idempotent_and_restart_replaces() {
        let mut clock = FixedStepClock::new(0.03);
        clock.start();
        clock.accumulate(0.05);
        clock.stop();
        clock.stop();
        assert!(!clock.is_running());
        assert_eq!(drain(&mut clock), 0);

        // A fresh start does not inherit the old partial tick
        clock.start();
        clock.start();
        clock.accumulate(0.02);
        assert_eq!(drain(&mut clock), 0);
    }

    #[test]
    fn test_bad_elapsed_ignored() {
        let mut clock = FixedStepClock::new(0.03);
        clock.start();
        clock.accumulate(f32::NAN);
        clock.accumulate(-1.0);
        clock.accumulate(f32::INFINITY);
        assert_eq!(drain(&mut clock), 0);
    }
}
