//! Resistive water level strip in a cylindrical container.
use std::f32::consts::PI;

use sprout_traits::{AnalogInput, BoxError, Clock, PowerSwitch, Sensor};

use crate::error::{HwError, Result};
use crate::util::read_averaged;

/// Pause after each read in a burst.
pub const SETTLE_MS: u32 = 1;

/// Container shape and the strip's empirical calibration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WaterGeometry {
    /// Divisor in `fraction = 10^(raw / scale_factor)`. Negative for strips
    /// whose reading rises as the container drains.
    pub scale_factor: f32,
    pub fill_height_mm: f32,
    pub radius_mm: f32,
    /// Below this fill fraction the container counts as empty.
    pub min_fraction: f32,
}

impl WaterGeometry {
    pub fn validate(&self) -> Result<()> {
        if !(self.scale_factor.is_finite() && self.scale_factor != 0.0) {
            return Err(HwError::InvalidParameter("scale_factor must be non-zero"));
        }
        if !(self.fill_height_mm.is_finite() && self.fill_height_mm > 0.0) {
            return Err(HwError::InvalidParameter("fill_height_mm must be > 0"));
        }
        if !(self.radius_mm.is_finite() && self.radius_mm > 0.0) {
            return Err(HwError::InvalidParameter("radius_mm must be > 0"));
        }
        if !(0.0..=1.0).contains(&self.min_fraction) {
            return Err(HwError::InvalidParameter("min_fraction must be in [0, 1]"));
        }
        Ok(())
    }

    pub fn fill_fraction(&self, raw: u16) -> f32 {
        10f32.powf(f32::from(raw) / self.scale_factor)
    }

    /// Full container volume in millilitres (1 ml = 1000 mm³).
    pub fn capacity_ml(&self) -> f32 {
        PI * self.radius_mm * self.radius_mm * self.fill_height_mm / 1_000.0
    }
}

pub struct WaterLevelSensor<A: AnalogInput, P: PowerSwitch, C: Clock> {
    input: A,
    power: P,
    clock: C,
    geometry: WaterGeometry,
    read_count: u32,
}

impl<A: AnalogInput, P: PowerSwitch, C: Clock> WaterLevelSensor<A, P, C> {
    pub fn new(
        input: A,
        power: P,
        clock: C,
        geometry: WaterGeometry,
        read_count: u32,
    ) -> Result<Self> {
        geometry.validate()?;
        if read_count == 0 {
            return Err(HwError::InvalidParameter("read_count must be >= 1"));
        }
        Ok(Self {
            input,
            power,
            clock,
            geometry,
            read_count,
        })
    }

    pub fn geometry(&self) -> WaterGeometry {
        self.geometry
    }

    pub fn read_count(&self) -> u32 {
        self.read_count
    }

    pub fn fill_fraction(&self, raw: u16) -> f32 {
        self.geometry.fill_fraction(raw)
    }

    pub fn capacity_ml(&self) -> f32 {
        self.geometry.capacity_ml()
    }

    pub fn fill_ml(&self, raw: u16) -> f32 {
        self.fill_fraction(raw) * self.capacity_ml()
    }

    pub fn is_empty(&self, raw: u16) -> bool {
        self.fill_fraction(raw) < self.geometry.min_fraction
    }
}

impl<A: AnalogInput, P: PowerSwitch, C: Clock> Sensor for WaterLevelSensor<A, P, C> {
    type Reading = u16;

    fn name(&self) -> &'static str {
        "water"
    }

    fn init(&mut self) -> std::result::Result<(), BoxError> {
        self.power.set_off();
        Ok(())
    }

    fn take_reading(&mut self) -> u16 {
        self.power.set_on();
        let raw = read_averaged(&mut self.input, &self.clock, self.read_count, SETTLE_MS);
        self.power.set_off();
        tracing::trace!(raw, samples = self.read_count, "water strip read");
        raw
    }
}
