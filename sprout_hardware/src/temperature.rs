//! DHT-style temperature probe.
use sprout_traits::{BoxError, Sensor, Thermometer};

/// Temperature in °C; `None` when the probe did not answer.
pub struct TempSensor<T: Thermometer> {
    probe: T,
    failed_reads: u32,
}

impl<T: Thermometer> TempSensor<T> {
    pub fn new(probe: T) -> Self {
        Self {
            probe,
            failed_reads: 0,
        }
    }

    /// Reads that returned no usable value since construction.
    pub fn failed_reads(&self) -> u32 {
        self.failed_reads
    }
}

impl<T: Thermometer> Sensor for TempSensor<T> {
    type Reading = Option<f32>;

    fn name(&self) -> &'static str {
        "temperature"
    }

    fn init(&mut self) -> Result<(), BoxError> {
        self.probe.begin()
    }

    fn take_reading(&mut self) -> Option<f32> {
        match self.probe.read_celsius() {
            Ok(c) if c.is_finite() => Some(c),
            Ok(c) => {
                self.failed_reads += 1;
                tracing::warn!(value = c, "temperature probe returned non-finite value");
                None
            }
            Err(e) => {
                self.failed_reads += 1;
                tracing::warn!(error = %e, "temperature read failed");
                None
            }
        }
    }

    fn datapoint(&self, reading: &Option<f32>) -> Option<f32> {
        *reading
    }
}
