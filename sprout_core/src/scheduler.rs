//! Interval-gated polling.
//!
//! `PollScheduler` only decides *when* a sample is due. What a sample is
//! comes from the acquisition closure passed to each tick, so one scheduler
//! type serves a single analog read as well as a powered, averaged burst.
use sprout_traits::clock::{Clock, MonotonicClock};

use crate::util::elapsed_ms;

pub struct PollScheduler<T, C: Clock = MonotonicClock> {
    clock: C,
    interval_ms: u32,
    /// `None` until the first acquisition.
    last_sample_ms: Option<u32>,
    latest: T,
}

impl<T: core::fmt::Debug, C: Clock> core::fmt::Debug for PollScheduler<T, C> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PollScheduler")
            .field("interval_ms", &self.interval_ms)
            .field("last_sample_ms", &self.last_sample_ms)
            .field("latest", &self.latest)
            .finish()
    }
}

impl<T: Clone + Default, C: Clock> PollScheduler<T, C> {
    pub fn new(interval_ms: u32, clock: C) -> Self {
        Self {
            clock,
            interval_ms,
            last_sample_ms: None,
            latest: T::default(),
        }
    }

    /// Run the acquisition if the interval has elapsed or `force` is set.
    ///
    /// Returns whether `acquire` ran. A scheduler that has never sampled is
    /// always due. The timestamp is taken before `acquire`, so time spent in
    /// the acquisition counts towards the next interval.
    pub fn tick_with<F>(&mut self, force: bool, acquire: F) -> bool
    where
        F: FnOnce() -> T,
    {
        let now = self.clock.now_ms();
        let due = force || self.due_at(now);
        if due {
            self.last_sample_ms = Some(now);
            self.latest = acquire();
        }
        due
    }

    /// Like `tick_with`, and always copies the cached reading into `out`,
    /// whether or not it was just refreshed.
    pub fn tick_into<F>(&mut self, out: &mut T, force: bool, acquire: F) -> bool
    where
        F: FnOnce() -> T,
    {
        let fresh = self.tick_with(force, acquire);
        out.clone_from(&self.latest);
        fresh
    }

    /// One-time `setup` followed by an unconditional first acquisition.
    ///
    /// Whatever `setup` returns is handed to `acquire`, so both hooks can
    /// work on the same device handle. After a successful setup the
    /// bookkeeping matches a forced tick. On a setup error `acquire` never
    /// runs and the scheduler stays "never sampled".
    pub fn init_with<U, E, S, A>(&mut self, setup: S, acquire: A) -> Result<(), E>
    where
        S: FnOnce() -> Result<U, E>,
        A: FnOnce(U) -> T,
    {
        let handle = setup()?;
        let now = self.clock.now_ms();
        self.last_sample_ms = Some(now);
        self.latest = acquire(handle);
        Ok(())
    }

    /// Whether a non-forced tick right now would acquire.
    pub fn is_due(&self) -> bool {
        self.due_at(self.clock.now_ms())
    }

    fn due_at(&self, now: u32) -> bool {
        match self.last_sample_ms {
            None => true,
            Some(last) => elapsed_ms(now, last) >= self.interval_ms,
        }
    }

    /// Milliseconds since the last acquisition; `None` before the first one.
    pub fn elapsed_ms(&self) -> Option<u32> {
        self.last_sample_ms.map(|last| elapsed_ms(self.clock.now_ms(), last))
    }

    pub fn latest(&self) -> &T {
        &self.latest
    }

    pub fn last_sample_ms(&self) -> Option<u32> {
        self.last_sample_ms
    }

    pub fn interval_ms(&self) -> u32 {
        self.interval_ms
    }

    /// Takes effect on the next tick; it does not re-judge the current gap.
    pub fn set_interval_ms(&mut self, interval_ms: u32) {
        self.interval_ms = interval_ms;
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }
}
