use std::cell::Cell;
use std::rc::Rc;
use std::thread;
use std::time::{Duration, Instant};

/// Millisecond clock abstraction for sampling and settling delays.
///
/// Timestamps are `u32` milliseconds that wrap on overflow (~49.7 days), the
/// same shape as a microcontroller tick counter. Always compare timestamps
/// through `elapsed_ms`, never by absolute ordering.
pub trait Clock {
    fn now_ms(&self) -> u32;
    fn delay_ms(&self, ms: u32);

    /// Milliseconds elapsed since `since`, correct across a single wraparound.
    #[inline]
    fn elapsed_ms(&self, since: u32) -> u32 {
        self.now_ms().wrapping_sub(since)
    }
}

/// Real-time clock backed by `std::time::Instant`, counting from construction.
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    epoch: Instant,
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl MonotonicClock {
    #[inline]
    pub fn new() -> Self {
        Self {
            epoch: Instant::now(),
        }
    }
}

impl Clock for MonotonicClock {
    #[inline]
    fn now_ms(&self) -> u32 {
        // Truncation is the wrap.
        self.epoch.elapsed().as_millis() as u32
    }

    #[inline]
    fn delay_ms(&self, ms: u32) {
        if ms == 0 {
            return;
        }
        thread::sleep(Duration::from_millis(u64::from(ms)));
    }
}

/// Deterministic clock whose time only moves when told to.
///
/// Clones share the same counter, so a test can hand one clone to a
/// scheduler and keep another to advance time. `delay_ms` advances the
/// counter instead of sleeping.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<u32>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start the clock at an arbitrary timestamp (useful for wraparound tests).
    pub fn starting_at(ms: u32) -> Self {
        Self {
            now: Rc::new(Cell::new(ms)),
        }
    }

    /// Advance the clock by `ms`, wrapping on overflow.
    pub fn advance(&self, ms: u32) {
        self.now.set(self.now.get().wrapping_add(ms));
    }

    pub fn set(&self, ms: u32) {
        self.now.set(ms);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u32 {
        self.now.get()
    }

    fn delay_ms(&self, ms: u32) {
        self.advance(ms);
    }
}
