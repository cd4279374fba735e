//! Resistive soil moisture probe.
//!
//! The probe is only powered for the instant of a read; a permanently
//! powered probe corrodes quickly in wet soil.
use sprout_traits::{AnalogInput, BoxError, PowerSwitch, Sensor};

use crate::error::{HwError, Result};

/// Raw readings for completely dry and fully saturated soil.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SoilCalibration {
    pub dry: u16,
    pub wet: u16,
}

impl SoilCalibration {
    pub fn new(dry: u16, wet: u16) -> Result<Self> {
        if dry == wet {
            return Err(HwError::InvalidParameter(
                "soil calibration needs distinct dry and wet readings",
            ));
        }
        Ok(Self { dry, wet })
    }

    /// `(raw - dry) / (wet - dry)`. Not clamped: values outside `[0, 1]`
    /// mean the calibration no longer matches the probe.
    pub fn fraction(&self, raw: u16) -> f32 {
        let val = f32::from(raw) - f32::from(self.dry);
        let span = f32::from(self.wet) - f32::from(self.dry);
        val / span
    }
}

pub struct SoilSensor<A: AnalogInput, P: PowerSwitch> {
    input: A,
    power: P,
    calibration: SoilCalibration,
}

impl<A: AnalogInput, P: PowerSwitch> SoilSensor<A, P> {
    pub fn new(input: A, power: P, calibration: SoilCalibration) -> Self {
        Self {
            input,
            power,
            calibration,
        }
    }

    pub fn calibration(&self) -> SoilCalibration {
        self.calibration
    }

    pub fn set_calibration(&mut self, calibration: SoilCalibration) {
        self.calibration = calibration;
    }

    /// Moisture as a fraction of the calibrated range.
    pub fn moisture_fraction(&self, raw: u16) -> f32 {
        self.calibration.fraction(raw)
    }
}

impl<A: AnalogInput, P: PowerSwitch> Sensor for SoilSensor<A, P> {
    type Reading = u16;

    fn name(&self) -> &'static str {
        "soil"
    }

    fn init(&mut self) -> std::result::Result<(), BoxError> {
        self.power.set_off();
        Ok(())
    }

    fn take_reading(&mut self) -> u16 {
        self.power.set_on();
        let raw = self.input.read();
        self.power.set_off();
        tracing::trace!(raw, "soil probe read");
        raw
    }
}
