//! Raspberry Pi GPIO power pins via rppal.
use rppal::gpio::{Gpio, OutputPin};
use sprout_traits::PowerSwitch;
use tracing::debug;

use crate::error::{HwError, Result};

/// A BCM-numbered output pin used to power a probe during reads.
pub struct GpioPowerSwitch {
    pin: OutputPin,
}

impl GpioPowerSwitch {
    /// Claim `bcm_pin` as an output, starting low (probe unpowered).
    pub fn new(bcm_pin: u8) -> Result<Self> {
        let gpio = Gpio::new().map_err(|e| HwError::Gpio(format!("open gpio: {e}")))?;
        let pin = gpio
            .get(bcm_pin)
            .map_err(|e| HwError::Gpio(format!("open power pin {bcm_pin}: {e}")))?
            .into_output_low();
        debug!(pin = bcm_pin, "power pin claimed");
        Ok(Self { pin })
    }
}

impl PowerSwitch for GpioPowerSwitch {
    fn set_on(&mut self) {
        self.pin.set_high();
    }

    fn set_off(&mut self) {
        self.pin.set_low();
    }
}
