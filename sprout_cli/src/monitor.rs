//! Sensor assembly from config and the polling loop.
//!
//! Readings always come from the simulated backends. With the `hardware`
//! feature on Linux the soil and water power pins are real rppal outputs.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use serde_json::{Map, Value, json};
use sprout_config::Config;
use sprout_core::util::clamp_ms;
use sprout_core::{ChannelCfg, SensorChannel, SensorError};
use sprout_hardware::{
    LightSensor, SimulatedAnalog, SimulatedThermometer, SoilCalibration, SoilSensor, TempSensor,
    WaterGeometry, WaterLevelSensor,
};
use sprout_traits::{Clock, Sensor};

#[cfg(all(feature = "hardware", target_os = "linux"))]
type Power = sprout_hardware::GpioPowerSwitch;
#[cfg(not(all(feature = "hardware", target_os = "linux")))]
type Power = sprout_hardware::SimulatedPower;

#[cfg(all(feature = "hardware", target_os = "linux"))]
fn make_power(sensor: &'static str, pin: u8) -> eyre::Result<Power> {
    sprout_hardware::GpioPowerSwitch::new(pin)
        .map_err(|e| sprout_core::hw_error::map_hw_error(sensor, &e).into())
}

#[cfg(not(all(feature = "hardware", target_os = "linux")))]
fn make_power(_sensor: &'static str, _pin: u8) -> eyre::Result<Power> {
    Ok(sprout_hardware::SimulatedPower::new())
}

type Light<C> = SensorChannel<LightSensor<SimulatedAnalog>, C>;
type Temperature<C> = SensorChannel<TempSensor<SimulatedThermometer>, C>;
type Soil<C> = SensorChannel<SoilSensor<SimulatedAnalog, Power>, C>;
type Water<C> = SensorChannel<WaterLevelSensor<SimulatedAnalog, Power, C>, C>;

/// Every configured sensor channel, sharing one clock.
pub struct Rig<C: Clock + Clone> {
    pub light: Option<Light<C>>,
    pub temperature: Option<Temperature<C>>,
    pub soil: Option<Soil<C>>,
    pub water: Option<Water<C>>,
}

fn midpoint(a: u16, b: u16) -> u16 {
    ((u32::from(a) + u32::from(b)) / 2) as u16
}

fn config_err(e: impl std::fmt::Display) -> SensorError {
    SensorError::Config(e.to_string())
}

impl<C: Clock + Clone> Rig<C> {
    pub fn from_config(cfg: &Config, clock: &C) -> eyre::Result<Self> {
        #[cfg(all(feature = "hardware", target_os = "linux"))]
        if cfg.soil.is_some() || cfg.water.is_some() {
            tracing::warn!("power pins drive GPIO; analog readings are simulated");
        }
        let sim = &cfg.simulation;
        let mut seed = sim.seed;
        let mut next_seed = || {
            seed = seed.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
            seed
        };

        let light = match &cfg.light {
            Some(c) => {
                let input = SimulatedAnalog::new(512)
                    .with_drift(0.5)
                    .with_noise(sim.noise, next_seed());
                let ch = SensorChannel::from_cfg(
                    LightSensor::new(input),
                    &ChannelCfg::from(c),
                    clock.clone(),
                )
                .map_err(config_err)?;
                Some(ch)
            }
            None => None,
        };

        let temperature = match &cfg.temperature {
            Some(c) => {
                let probe = SimulatedThermometer::new(21.0).with_drift(0.05);
                let ch = SensorChannel::from_cfg(
                    TempSensor::new(probe),
                    &ChannelCfg::from(c),
                    clock.clone(),
                )
                .map_err(config_err)?;
                Some(ch)
            }
            None => None,
        };

        let soil = match &cfg.soil {
            Some(c) => {
                let input = SimulatedAnalog::new(midpoint(c.sensor_min, c.sensor_max))
                    .with_noise(sim.noise, next_seed());
                let cal = SoilCalibration::new(c.sensor_min, c.sensor_max).map_err(config_err)?;
                let sensor = SoilSensor::new(input, make_power("soil", c.power_pin)?, cal);
                let ch = SensorChannel::from_cfg(sensor, &ChannelCfg::from(c), clock.clone())
                    .map_err(config_err)?;
                Some(ch)
            }
            None => None,
        };

        let water = match &cfg.water {
            Some(c) => {
                let input = SimulatedAnalog::new(300)
                    .with_drift(0.2)
                    .with_noise(sim.noise, next_seed());
                let geometry = WaterGeometry {
                    scale_factor: c.scale_factor,
                    fill_height_mm: c.fill_height_mm,
                    radius_mm: c.container_radius_mm,
                    min_fraction: c.min_fraction,
                };
                let sensor = WaterLevelSensor::new(
                    input,
                    make_power("water", c.power_pin)?,
                    clock.clone(),
                    geometry,
                    c.read_count,
                )
                .map_err(config_err)?;
                let ch = SensorChannel::from_cfg(sensor, &ChannelCfg::from(c), clock.clone())
                    .map_err(config_err)?;
                Some(ch)
            }
            None => None,
        };

        Ok(Self {
            light,
            temperature,
            soil,
            water,
        })
    }

    pub fn names(&self) -> Vec<&'static str> {
        let mut v = Vec::new();
        if let Some(ch) = &self.light {
            v.push(ch.name());
        }
        if let Some(ch) = &self.temperature {
            v.push(ch.name());
        }
        if let Some(ch) = &self.soil {
            v.push(ch.name());
        }
        if let Some(ch) = &self.water {
            v.push(ch.name());
        }
        v
    }

    /// Initialise every channel, returning a line for each first reading.
    pub fn init_all(&mut self) -> eyre::Result<Vec<Value>> {
        let mut out = Vec::new();
        if let Some(ch) = self.light.as_mut() {
            ch.init()?;
            out.push(light_line(ch));
        }
        if let Some(ch) = self.temperature.as_mut() {
            ch.init()?;
            out.push(temperature_line(ch));
        }
        if let Some(ch) = self.soil.as_mut() {
            ch.init()?;
            out.push(soil_line(ch));
        }
        if let Some(ch) = self.water.as_mut() {
            ch.init()?;
            out.push(water_line(ch));
        }
        Ok(out)
    }

    /// Tick every channel once, returning a line for each fresh reading.
    pub fn tick_all(&mut self) -> Vec<Value> {
        let mut out = Vec::new();
        if let Some(ch) = self.light.as_mut()
            && ch.tick(false)
        {
            out.push(light_line(ch));
        }
        if let Some(ch) = self.temperature.as_mut()
            && ch.tick(false)
        {
            out.push(temperature_line(ch));
        }
        if let Some(ch) = self.soil.as_mut()
            && ch.tick(false)
        {
            out.push(soil_line(ch));
        }
        if let Some(ch) = self.water.as_mut()
            && ch.tick(false)
        {
            out.push(water_line(ch));
        }
        out
    }
}

fn trend_fields<S: Sensor, C: Clock>(ch: &SensorChannel<S, C>, obj: &mut Map<String, Value>) {
    if let Some(trend) = ch.trend() {
        obj.insert("slope".into(), json!(trend.slope()));
        obj.insert("next".into(), json!(ch.predict_next()));
        obj.insert("plausible".into(), json!(ch.next_is_plausible()));
    }
}

fn line<S: Sensor, C: Clock>(
    ch: &SensorChannel<S, C>,
    reading: Value,
    extra: &[(&str, Value)],
) -> Value {
    let mut obj = Map::new();
    obj.insert("sensor".into(), json!(ch.name()));
    obj.insert("at_ms".into(), json!(ch.scheduler().last_sample_ms()));
    obj.insert("reading".into(), reading);
    trend_fields(ch, &mut obj);
    for (k, v) in extra {
        obj.insert((*k).to_string(), v.clone());
    }
    Value::Object(obj)
}

fn light_line<C: Clock>(ch: &Light<C>) -> Value {
    line(ch, json!(ch.latest()), &[])
}

fn temperature_line<C: Clock>(ch: &Temperature<C>) -> Value {
    line(ch, json!(ch.latest()), &[])
}

fn soil_line<C: Clock>(ch: &Soil<C>) -> Value {
    let raw = *ch.latest();
    line(
        ch,
        json!(raw),
        &[("moisture", json!(ch.sensor().moisture_fraction(raw)))],
    )
}

fn water_line<C: Clock>(ch: &Water<C>) -> Value {
    let raw = *ch.latest();
    let s = ch.sensor();
    line(
        ch,
        json!(raw),
        &[
            ("fill_fraction", json!(s.fill_fraction(raw))),
            ("fill_ml", json!(s.fill_ml(raw))),
            ("empty", json!(s.is_empty(raw))),
        ],
    )
}

/// Render a reading line as `sensor: key=value ...`.
pub fn format_human(v: &Value) -> String {
    let Some(obj) = v.as_object() else {
        return v.to_string();
    };
    let sensor = obj.get("sensor").and_then(Value::as_str).unwrap_or("?");
    let mut parts = Vec::new();
    for (k, val) in obj {
        if k == "sensor" {
            continue;
        }
        let rendered = match val {
            Value::Null => "-".to_string(),
            Value::Number(n) => match n.as_f64() {
                Some(f) if n.is_f64() => format!("{f:.3}"),
                _ => n.to_string(),
            },
            other => other.to_string(),
        };
        parts.push(format!("{k}={rendered}"));
    }
    format!("{sensor}: {}", parts.join(" "))
}

fn emit(lines: &[Value], json_mode: bool) {
    for l in lines {
        if json_mode {
            println!("{l}");
        } else {
            println!("{}", format_human(l));
        }
    }
}

/// Run the polling loop until `ticks` iterations have passed or `shutdown` is set.
pub fn run_monitor<C: Clock + Clone>(
    cfg: &Config,
    clock: C,
    ticks: Option<u64>,
    tick_ms: u64,
    json_mode: bool,
    shutdown: Arc<AtomicBool>,
) -> eyre::Result<u64> {
    let mut rig = Rig::from_config(cfg, &clock)?;
    let names = rig.names();
    if names.is_empty() {
        tracing::warn!("no sensors configured; nothing to monitor");
        return Ok(0);
    }
    tracing::info!(sensors = ?names, tick_ms, "monitor start");

    let mut samples = 0u64;
    let first = rig.init_all()?;
    samples += first.len() as u64;
    emit(&first, json_mode);

    let tick_ms = clamp_ms(tick_ms);
    let mut iteration = 0u64;
    while ticks.is_none_or(|n| iteration < n) {
        if shutdown.load(Ordering::Relaxed) {
            tracing::info!("shutdown requested");
            break;
        }
        clock.delay_ms(tick_ms);
        let fresh = rig.tick_all();
        samples += fresh.len() as u64;
        emit(&fresh, json_mode);
        iteration += 1;
    }
    tracing::info!(iterations = iteration, samples, "monitor stop");
    Ok(samples)
}

/// Initialise every sensor once; returns the names that came up.
pub fn self_check<C: Clock + Clone>(cfg: &Config, clock: C) -> eyre::Result<Vec<&'static str>> {
    let mut rig = Rig::from_config(cfg, &clock)?;
    rig.init_all()?;
    Ok(rig.names())
}
