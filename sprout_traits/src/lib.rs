pub mod clock;

pub use clock::{Clock, ManualClock, MonotonicClock};

/// Error type returned across the hardware seams.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// A single analog input channel (ADC), yielding raw counts.
pub trait AnalogInput {
    fn read(&mut self) -> u16;
}

/// A digital output used to power a probe only while it is being read.
pub trait PowerSwitch {
    fn set_on(&mut self);
    fn set_off(&mut self);
}

/// A digital temperature probe (DHT-style single-wire sensor).
pub trait Thermometer {
    /// Prepare the bus; called once before the first read.
    fn begin(&mut self) -> Result<(), BoxError> {
        Ok(())
    }
    fn read_celsius(&mut self) -> Result<f32, BoxError>;
}

/// Capability implemented by every sensor driver.
///
/// `init` performs one-time hardware setup; `take_reading` performs the
/// acquisition itself and is invoked by a scheduler whenever a sample is
/// due. Drivers that want their readings smoothed report the scalar to feed
/// into a trend window through `datapoint`.
pub trait Sensor {
    type Reading: Clone + Default;

    /// Short, stable name used in logs and output.
    fn name(&self) -> &'static str;

    fn init(&mut self) -> Result<(), BoxError> {
        Ok(())
    }

    fn take_reading(&mut self) -> Self::Reading;

    fn datapoint(&self, _reading: &Self::Reading) -> Option<f32> {
        None
    }
}
