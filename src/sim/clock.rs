//! Elapsed-time bookkeeping
//!
//! Session time runs off an injected monotonic clock instead of a timer
//! callback, so start/stop happen exactly at session transitions.

use std::cell::Cell;
use std::rc::Rc;

/// Granularity of the reported session time in milliseconds
pub const TIMER_STEP_MS: u64 = 10;

/// Monotonic millisecond source
pub trait Clock {
    fn now_ms(&self) -> u64;
}

/// Hand-driven clock; clones share the same time
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<u64>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&self, ms: u64) {
        self.now.set(self.now.get() + ms);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u64 {
        self.now.get()
    }
}

/// Accumulates time only while running
#[derive(Debug, Clone, Default)]
pub struct Stopwatch {
    accumulated_ms: u64,
    started_at: Option<u64>,
}

impl Stopwatch {
    pub fn is_running(&self) -> bool {
        self.started_at.is_some()
    }

    /// Start accumulating; no-op if already running
    pub fn start(&mut self, now: u64) {
        if self.started_at.is_none() {
            self.started_at = Some(now);
        }
    }

    /// Fold the running span into the total and stop
    pub fn stop(&mut self, now: u64) {
        if let Some(start) = self.started_at.take() {
            self.accumulated_ms += now.saturating_sub(start);
        }
    }

    /// Zero the total; only valid once stopped
    pub fn reset(&mut self) {
        debug_assert!(!self.is_running());
        self.accumulated_ms = 0;
    }

    /// Total elapsed time in whole timer steps
    pub fn elapsed_ms(&self, now: u64) -> u64 {
        let running = self.started_at.map_or(0, |start| now.saturating_sub(start));
        let total = self.accumulated_ms + running;
        total - total % TIMER_STEP_MS
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stopwatch_accumulates_only_while_running() {
        let clock = ManualClock::new();
        let mut sw = Stopwatch::default();
        clock.advance(500);
        assert_eq!(sw.elapsed_ms(clock.now_ms()), 0);

        sw.start(clock.now_ms());
        clock.advance(1234);
        assert_eq!(sw.elapsed_ms(clock.now_ms()), 1230);

        sw.stop(clock.now_ms());
        clock.advance(10_000);
        assert_eq!(sw.elapsed_ms(clock.now_ms()), 1230);

        sw.start(clock.now_ms());
        clock.advance(66);
        assert_eq!(sw.elapsed_ms(clock.now_ms()), 1300);
    }

    #[test]
    fn test_double_start_does_not_double_count() {
        let clock = ManualClock::new();
        let mut sw = Stopwatch::default();
        sw.start(clock.now_ms());
        clock.advance(100);
        sw.start(clock.now_ms());
        clock.advance(100);
        assert_eq!(sw.elapsed_ms(clock.now_ms()), 200);
    }

    #[test]
    fn test_reset_after_stop() {
        let clock = ManualClock::new();
        let mut sw = Stopwatch::default();
        sw.start(clock.now_ms());
        clock.advance(900);
        sw.stop(clock.now_ms());
        sw.reset();
        assert_eq!(sw.elapsed_ms(clock.now_ms()), 0);
        assert!(!sw.is_running());
    }

    #[test]
    fn test_manual_clock_clones_share_time() {
        let a = ManualClock::new();
        let b = a.clone();
        a.advance(42);
        assert_eq!(b.now_ms(), 42);
    }
}
