//! Photoresistor on an analog input.
use sprout_traits::{AnalogInput, Sensor};

/// Raw light level in ADC counts; brighter reads higher.
pub struct LightSensor<A: AnalogInput> {
    input: A,
}

impl<A: AnalogInput> LightSensor<A> {
    pub fn new(input: A) -> Self {
        Self { input }
    }
}

impl<A: AnalogInput> Sensor for LightSensor<A> {
    type Reading = u16;

    fn name(&self) -> &'static str {
        "light"
    }

    fn take_reading(&mut self) -> u16 {
        self.input.read()
    }

    fn datapoint(&self, reading: &u16) -> Option<f32> {
        Some(f32::from(*reading))
    }
}
