//! Test and helper sensors for sprout_core

use std::collections::VecDeque;

use sprout_traits::{BoxError, Sensor};

/// Yields a fixed script of readings, then repeats the last one.
///
/// Counts acquisitions so tests can assert exactly when the scheduler ran.
#[derive(Debug, Default)]
pub struct ScriptedSensor {
    script: VecDeque<f32>,
    last: f32,
    pub acquisitions: usize,
    pub fail_init: bool,
}

impl ScriptedSensor {
    pub fn new(values: impl IntoIterator<Item = f32>) -> Self {
        Self {
            script: values.into_iter().collect(),
            ..Self::default()
        }
    }
}

impl Sensor for ScriptedSensor {
    type Reading = f32;

    fn name(&self) -> &'static str {
        "scripted"
    }

    fn init(&mut self) -> Result<(), BoxError> {
        if self.fail_init {
            return Err("scripted sensor: begin timeout".into());
        }
        Ok(())
    }

    fn take_reading(&mut self) -> f32 {
        self.acquisitions += 1;
        if let Some(v) = self.script.pop_front() {
            self.last = v;
        }
        self.last
    }

    fn datapoint(&self, reading: &f32) -> Option<f32> {
        Some(*reading)
    }
}
