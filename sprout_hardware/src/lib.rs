//! Sensor drivers for the plant monitor, plus simulated I/O.
//!
//! Each driver implements `sprout_traits::Sensor` over the narrow I/O
//! traits (`AnalogInput`, `PowerSwitch`, `Thermometer`), so the same driver
//! runs against the simulated devices in `sim` or real pins.
#[cfg(all(feature = "hardware", target_os = "linux"))]
pub mod gpio;

pub mod error;
pub mod light;
pub mod sim;
pub mod soil;
pub mod temperature;
pub mod util;
pub mod water;

pub use light::LightSensor;
pub use sim::{ADC_MAX, SimulatedAnalog, SimulatedPower, SimulatedThermometer};
pub use soil::{SoilCalibration, SoilSensor};
pub use temperature::TempSensor;
pub use water::{WaterGeometry, WaterLevelSensor};

#[cfg(all(feature = "hardware", target_os = "linux"))]
pub use gpio::GpioPowerSwitch;
