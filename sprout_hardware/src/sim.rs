//! Simulated I/O for running the drivers without attached hardware.
//!
//! Handles are cheap clones sharing state (`Rc`), so a test can keep one
//! clone to steer or inspect the device while the driver owns another.
use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

use sprout_traits::{AnalogInput, BoxError, PowerSwitch, Thermometer};

use crate::error::HwError;

/// Full-scale value of a 10-bit ADC.
pub const ADC_MAX: u16 = 1023;

#[derive(Debug)]
struct AnalogState {
    script: VecDeque<u16>,
    level: f32,
    drift: f32,
    noise: f32,
    rng: u32,
    reads: usize,
}

/// Analog input that follows a script, then drifts with optional noise.
#[derive(Debug, Clone)]
pub struct SimulatedAnalog {
    state: Rc<RefCell<AnalogState>>,
}

impl Default for SimulatedAnalog {
    fn default() -> Self {
        Self::new(0)
    }
}

impl SimulatedAnalog {
    /// Constant input at `level` counts.
    pub fn new(level: u16) -> Self {
        Self {
            state: Rc::new(RefCell::new(AnalogState {
                script: VecDeque::new(),
                level: f32::from(level),
                drift: 0.0,
                noise: 0.0,
                rng: 1,
                reads: 0,
            })),
        }
    }

    /// Returns `values` in order, then holds the last one (plus any drift).
    pub fn scripted(values: impl IntoIterator<Item = u16>) -> Self {
        let sim = Self::new(0);
        sim.state.borrow_mut().script = values.into_iter().collect();
        sim
    }

    /// Add `per_read` counts to the level on every unscripted read.
    pub fn with_drift(self, per_read: f32) -> Self {
        self.state.borrow_mut().drift = per_read;
        self
    }

    /// Add uniform noise in `[-amp/2, +amp/2]` from a seeded xorshift.
    pub fn with_noise(self, amp: f32, seed: u32) -> Self {
        {
            let mut s = self.state.borrow_mut();
            s.noise = amp.max(0.0);
            s.rng = seed.max(1);
        }
        self
    }

    pub fn set_level(&self, level: u16) {
        self.state.borrow_mut().level = f32::from(level);
    }

    /// Number of reads served so far.
    pub fn reads(&self) -> usize {
        self.state.borrow().reads
    }
}

impl AnalogState {
    fn next_noise(&mut self) -> f32 {
        if self.noise == 0.0 {
            return 0.0;
        }
        let mut x = self.rng;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.rng = x;
        let unit = (x as f32) / (u32::MAX as f32 + 1.0);
        (unit - 0.5) * self.noise
    }
}

impl AnalogInput for SimulatedAnalog {
    fn read(&mut self) -> u16 {
        let mut guard = self.state.borrow_mut();
        let s = &mut *guard;
        s.reads += 1;
        if let Some(v) = s.script.pop_front() {
            s.level = f32::from(v);
            return v;
        }
        s.level += s.drift;
        let raw = s.level + s.next_noise();
        raw.round().clamp(0.0, f32::from(ADC_MAX)) as u16
    }
}

/// Power pin that records its state and how often it was switched on.
#[derive(Debug, Clone, Default)]
pub struct SimulatedPower {
    on: Rc<Cell<bool>>,
    cycles: Rc<Cell<usize>>,
}

impl SimulatedPower {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_on(&self) -> bool {
        self.on.get()
    }

    /// Number of off→on transitions.
    pub fn cycles(&self) -> usize {
        self.cycles.get()
    }
}

impl PowerSwitch for SimulatedPower {
    fn set_on(&mut self) {
        if !self.on.get() {
            self.cycles.set(self.cycles.get() + 1);
        }
        self.on.set(true);
    }

    fn set_off(&mut self) {
        self.on.set(false);
    }
}

#[derive(Debug)]
struct ThermoState {
    celsius: f32,
    drift: f32,
    failures_left: usize,
    begun: bool,
}

/// Temperature probe with a drifting value and injectable read failures.
#[derive(Debug, Clone)]
pub struct SimulatedThermometer {
    state: Rc<RefCell<ThermoState>>,
}

impl SimulatedThermometer {
    pub fn new(celsius: f32) -> Self {
        Self {
            state: Rc::new(RefCell::new(ThermoState {
                celsius,
                drift: 0.0,
                failures_left: 0,
                begun: false,
            })),
        }
    }

    pub fn with_drift(self, per_read: f32) -> Self {
        self.state.borrow_mut().drift = per_read;
        self
    }

    /// Make the next `n` reads fail.
    pub fn fail_next(&self, n: usize) {
        self.state.borrow_mut().failures_left = n;
    }

    pub fn begun(&self) -> bool {
        self.state.borrow().begun
    }
}

impl Thermometer for SimulatedThermometer {
    fn begin(&mut self) -> Result<(), BoxError> {
        self.state.borrow_mut().begun = true;
        Ok(())
    }

    fn read_celsius(&mut self) -> Result<f32, BoxError> {
        let mut guard = self.state.borrow_mut();
        let s = &mut *guard;
        if !s.begun {
            return Err(Box::new(HwError::ReadFailed("probe not started".into())));
        }
        if s.failures_left > 0 {
            s.failures_left -= 1;
            return Err(Box::new(HwError::Timeout));
        }
        let c = s.celsius;
        s.celsius += s.drift;
        Ok(c)
    }
}
