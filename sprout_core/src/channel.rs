//! A sensor driver composed with its scheduler and optional trend window.
//!
//! The scheduler and the tracker never see each other: after every fresh
//! acquisition the channel asks the driver for its scalar datapoint and
//! feeds it to the tracker itself.
use sprout_traits::{BoxError, Sensor};
use sprout_traits::clock::{Clock, MonotonicClock};

use crate::config::ChannelCfg;
use crate::error::{Result, TrendError};
use crate::hw_error::map_hw_error;
use crate::scheduler::PollScheduler;
use crate::trend::TrendTracker;

pub struct SensorChannel<S: Sensor, C: Clock = MonotonicClock> {
    sensor: S,
    scheduler: PollScheduler<S::Reading, C>,
    trend: Option<TrendTracker>,
    plausible: Option<(f32, f32)>,
}

impl<S, C> core::fmt::Debug for SensorChannel<S, C>
where
    S: Sensor,
    S::Reading: core::fmt::Debug,
    C: Clock,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SensorChannel")
            .field("sensor", &self.sensor.name())
            .field("scheduler", &self.scheduler)
            .field("trend", &self.trend)
            .finish()
    }
}

impl<S: Sensor, C: Clock> SensorChannel<S, C> {
    /// Channel without a trend window.
    pub fn new(sensor: S, interval_ms: u32, clock: C) -> Self {
        Self {
            sensor,
            scheduler: PollScheduler::new(interval_ms, clock),
            trend: None,
            plausible: None,
        }
    }

    pub fn from_cfg(
        sensor: S,
        cfg: &ChannelCfg,
        clock: C,
    ) -> std::result::Result<Self, TrendError> {
        let trend = cfg.trend_window.map(TrendTracker::with_capacity).transpose()?;
        Ok(Self {
            sensor,
            scheduler: PollScheduler::new(cfg.interval_ms, clock),
            trend,
            plausible: cfg.plausible,
        })
    }

    pub fn with_trend(mut self, trend: TrendTracker) -> Self {
        self.trend = Some(trend);
        self
    }

    pub fn with_plausible(mut self, min: f32, max: f32) -> Self {
        self.plausible = Some((min, max));
        self
    }

    /// Set up the hardware and take the first reading so the cached value
    /// and trend are populated before the first scheduled tick.
    pub fn init(&mut self) -> Result<()> {
        let name = self.sensor.name();
        let sensor = &mut self.sensor;
        self.scheduler
            .init_with(
                move || {
                    sensor.init()?;
                    Ok::<_, BoxError>(sensor)
                },
                |sensor: &mut S| sensor.take_reading(),
            )
            .map_err(|e| map_hw_error(name, e.as_ref()))?;
        tracing::info!(
            sensor = name,
            interval_ms = self.scheduler.interval_ms(),
            "sensor initialised"
        );
        self.on_fresh_reading();
        Ok(())
    }

    /// Acquire if due (or forced). Returns whether a new reading was taken.
    pub fn tick(&mut self, force: bool) -> bool {
        let sensor = &mut self.sensor;
        let fresh = self.scheduler.tick_with(force, || sensor.take_reading());
        if fresh {
            self.on_fresh_reading();
        }
        fresh
    }

    /// Like `tick`, and always copies the cached reading into `out`.
    pub fn tick_into(&mut self, out: &mut S::Reading, force: bool) -> bool {
        let fresh = self.tick(force);
        out.clone_from(self.scheduler.latest());
        fresh
    }

    fn on_fresh_reading(&mut self) {
        let Some(trend) = self.trend.as_mut() else {
            tracing::debug!(sensor = self.sensor.name(), "sample");
            return;
        };
        match self.sensor.datapoint(self.scheduler.latest()) {
            Some(v) => {
                trend.add_datapoint(v);
                tracing::debug!(
                    sensor = self.sensor.name(),
                    value = v,
                    slope = ?trend.slope(),
                    window = trend.len(),
                    "sample"
                );
            }
            None => tracing::debug!(sensor = self.sensor.name(), "sample without datapoint"),
        }
    }

    /// Prediction one step past the trend window.
    pub fn predict_next(&self) -> Option<f32> {
        self.trend.as_ref().and_then(TrendTracker::predict_next)
    }

    /// Whether the next predicted value is inside the configured plausible
    /// range. `None` when either the range or a fit is missing.
    pub fn next_is_plausible(&self) -> Option<bool> {
        let (min, max) = self.plausible?;
        let trend = self.trend.as_ref().filter(|t| !t.is_empty())?;
        let x = (trend.len() + 1) as f32;
        Some(trend.validate_predicted_value(x, min, max))
    }

    pub fn name(&self) -> &'static str {
        self.sensor.name()
    }

    pub fn latest(&self) -> &S::Reading {
        self.scheduler.latest()
    }

    pub fn sensor(&self) -> &S {
        &self.sensor
    }

    pub fn sensor_mut(&mut self) -> &mut S {
        &mut self.sensor
    }

    pub fn scheduler(&self) -> &PollScheduler<S::Reading, C> {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut PollScheduler<S::Reading, C> {
        &mut self.scheduler
    }

    pub fn trend(&self) -> Option<&TrendTracker> {
        self.trend.as_ref()
    }

    pub fn trend_mut(&mut self) -> Option<&mut TrendTracker> {
        self.trend.as_mut()
    }
}
