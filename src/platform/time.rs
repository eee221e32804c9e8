//! Frame pacing
//!
//! One tick is poll, integrate, render, pace. The pacer sleeps away whatever
//! is left of the target period and reports the tick length that the
//! simulation should integrate over. Slow ticks are reported as they are;
//! there is no fixed-step catch-up.

use std::time::{Duration, Instant};

/// Source of monotonic-ish time, in milliseconds
pub trait Clock {
    fn now_ms(&mut self) -> f64;
    fn sleep_ms(&mut self, ms: f64);
}

/// Wall clock backed by [`Instant`]
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl Default for SystemClock {
    fn default() -> Self {
        Self { origin: Instant::now() }
    }
}

impl Clock for SystemClock {
    fn now_ms(&mut self) -> f64 {
        self.origin.elapsed().as_secs_f64() * 1000.0
    }

    fn sleep_ms(&mut self, ms: f64) {
        if ms > 0.0 {
            std::thread::sleep(Duration::from_secs_f64(ms / 1000.0));
        }
    }
}

#[derive(Debug)]
pub struct FramePacer<C: Clock = SystemClock> {
    clock: C,
    target_ms: f64,
    tick_start: f64,
}

impl FramePacer<SystemClock> {
    pub fn new(target_ms: u64) -> Self {
        Self::with_clock(target_ms, SystemClock::default())
    }
}

impl<C: Clock> FramePacer<C> {
    pub fn with_clock(target_ms: u64, mut clock: C) -> Self {
        let tick_start = clock.now_ms();
        Self {
            clock,
            target_ms: target_ms as f64,
            tick_start,
        }
    }

    /// End the current tick and return its length in milliseconds
    pub fn pace(&mut self) -> f64 {
        let elapsed = self.clock.now_ms() - self.tick_start;

        let dt = if elapsed < 0.0 {
            // Clock went backwards
            0.0
        } else if elapsed < self.target_ms {
            self.clock.sleep_ms(self.target_ms - elapsed);
            self.target_ms
        } else {
            elapsed
        };

        self.tick_start = self.clock.now_ms();
        dt
    }
}
