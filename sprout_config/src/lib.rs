#![cfg_attr(all(not(debug_assertions), not(test)), deny(warnings))]
#![cfg_attr(
    all(not(debug_assertions), not(test)),
    deny(clippy::all, clippy::pedantic, clippy::nursery)
)]
#![allow(clippy::module_name_repetitions, clippy::missing_errors_doc)]
//! Config schema for the sensor monitor.
//!
//! - `Config` and its sections are deserialized from TOML and validated.
//! - Every sensor section is optional; an absent section disables that sensor.
use serde::Deserialize;
use std::path::Path;

/// Trend window used when a section does not set `trend_window`.
pub const DEFAULT_TREND_WINDOW: usize = 5;
/// Samples averaged per water level reading when `read_count` is absent.
pub const DEFAULT_WATER_READ_COUNT: u32 = 10;

fn default_trend_window() -> usize {
    DEFAULT_TREND_WINDOW
}

fn default_read_count() -> u32 {
    DEFAULT_WATER_READ_COUNT
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct MonitorCfg {
    /// Main loop period in milliseconds.
    pub tick_ms: u64,
}

impl Default for MonitorCfg {
    fn default() -> Self {
        Self { tick_ms: 100 }
    }
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct Logging {
    pub file: Option<String>,  // path to .log (JSON lines)
    pub level: Option<String>, // "info","debug"
    /// Log rotation policy: "never" | "daily" | "hourly" (default: never)
    pub rotation: Option<String>,
}

/// Photoresistor read through the analog input backend.
#[derive(Debug, Deserialize)]
pub struct LightCfg {
    pub interval_ms: u32,
    #[serde(default = "default_trend_window")]
    pub trend_window: usize,
    /// Optional plausible range for the next predicted reading (raw counts).
    #[serde(default)]
    pub plausible: Option<[f32; 2]>,
}

/// DHT11-style digital temperature probe.
#[derive(Debug, Deserialize)]
pub struct TemperatureCfg {
    pub interval_ms: u32,
    #[serde(default = "default_trend_window")]
    pub trend_window: usize,
    /// Optional plausible range for the next predicted reading (°C).
    #[serde(default)]
    pub plausible: Option<[f32; 2]>,
}

/// Resistive soil probe, powered from a digital pin only while reading.
#[derive(Debug, Deserialize)]
pub struct SoilCfg {
    /// BCM pin switching the probe supply (real GPIO with `--features hardware`).
    pub power_pin: u8,
    /// Raw reading for completely dry soil.
    pub sensor_min: u16,
    /// Raw reading for saturated soil.
    pub sensor_max: u16,
    pub interval_ms: u32,
}

/// Resistive water level strip in a cylindrical container.
#[derive(Debug, Deserialize)]
pub struct WaterCfg {
    /// BCM pin switching the strip supply (real GPIO with `--features hardware`).
    pub power_pin: u8,
    /// Divisor in `fraction = 10^(raw / scale_factor)`; must be non-zero.
    pub scale_factor: f32,
    pub fill_height_mm: f32,
    pub container_radius_mm: f32,
    #[serde(default = "default_read_count")]
    pub read_count: u32,
    /// Below this fill fraction the container counts as empty.
    pub min_fraction: f32,
    pub interval_ms: u32,
}

/// Parameters for the simulated analog backends used when no hardware is attached.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SimulationCfg {
    pub seed: u32,
    /// Peak-to-peak noise in raw counts.
    pub noise: f32,
}

impl Default for SimulationCfg {
    fn default() -> Self {
        Self {
            seed: 0x5eed,
            noise: 4.0,
        }
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub monitor: MonitorCfg,
    #[serde(default)]
    pub logging: Logging,
    #[serde(default)]
    pub light: Option<LightCfg>,
    #[serde(default)]
    pub temperature: Option<TemperatureCfg>,
    #[serde(default)]
    pub soil: Option<SoilCfg>,
    #[serde(default)]
    pub water: Option<WaterCfg>,
    #[serde(default)]
    pub simulation: SimulationCfg,
}

pub fn load_toml(s: &str) -> Result<Config, toml::de::Error> {
    toml::from_str::<Config>(s)
}

/// Read, parse, and validate a config file.
pub fn load_file(path: &Path) -> eyre::Result<Config> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| eyre::eyre!("read config {:?}: {}", path, e))?;
    let cfg = load_toml(&text).map_err(|e| eyre::eyre!("parse config {:?}: {}", path, e))?;
    cfg.validate()?;
    Ok(cfg)
}

fn validate_plausible(section: &str, range: Option<[f32; 2]>) -> eyre::Result<()> {
    if let Some([min, max]) = range {
        if !(min.is_finite() && max.is_finite()) {
            eyre::bail!("{section}.plausible bounds must be finite");
        }
        if min > max {
            eyre::bail!("{section}.plausible must be [min, max] with min <= max");
        }
    }
    Ok(())
}

impl Config {
    pub fn validate(&self) -> eyre::Result<()> {
        // Monitor
        if self.monitor.tick_ms == 0 {
            eyre::bail!("monitor.tick_ms must be >= 1");
        }

        // Logging
        if let Some(rot) = self.logging.rotation.as_deref()
            && !matches!(rot, "never" | "daily" | "hourly")
        {
            eyre::bail!("logging.rotation must be one of never|daily|hourly, got {rot:?}");
        }

        // Light
        if let Some(light) = &self.light {
            if light.interval_ms == 0 {
                eyre::bail!("light.interval_ms must be >= 1");
            }
            if light.trend_window == 0 {
                eyre::bail!("light.trend_window must be >= 1");
            }
            validate_plausible("light", light.plausible)?;
        }

        // Temperature
        if let Some(temp) = &self.temperature {
            if temp.interval_ms == 0 {
                eyre::bail!("temperature.interval_ms must be >= 1");
            }
            if temp.trend_window == 0 {
                eyre::bail!("temperature.trend_window must be >= 1");
            }
            validate_plausible("temperature", temp.plausible)?;
        }

        // Soil
        if let Some(soil) = &self.soil {
            if soil.interval_ms == 0 {
                eyre::bail!("soil.interval_ms must be >= 1");
            }
            if soil.sensor_min == soil.sensor_max {
                eyre::bail!("soil.sensor_min and soil.sensor_max must differ");
            }
        }

        // Water
        if let Some(water) = &self.water {
            if water.interval_ms == 0 {
                eyre::bail!("water.interval_ms must be >= 1");
            }
            if water.read_count == 0 {
                eyre::bail!("water.read_count must be >= 1");
            }
            if !(water.scale_factor.is_finite() && water.scale_factor != 0.0) {
                eyre::bail!("water.scale_factor must be non-zero");
            }
            if !(water.fill_height_mm.is_finite() && water.fill_height_mm > 0.0) {
                eyre::bail!("water.fill_height_mm must be > 0");
            }
            if !(water.container_radius_mm.is_finite() && water.container_radius_mm > 0.0) {
                eyre::bail!("water.container_radius_mm must be > 0");
            }
            if !(0.0..=1.0).contains(&water.min_fraction) {
                eyre::bail!("water.min_fraction must be in [0.0, 1.0]");
            }
        }

        if let (Some(soil), Some(water)) = (&self.soil, &self.water)
            && soil.power_pin == water.power_pin
        {
            eyre::bail!("soil.power_pin and water.power_pin must differ");
        }

        // Simulation
        if !(self.simulation.noise.is_finite() && self.simulation.noise >= 0.0) {
            eyre::bail!("simulation.noise must be >= 0");
        }

        Ok(())
    }

    /// True when no sensor section is present.
    pub fn is_empty(&self) -> bool {
        self.light.is_none()
            && self.temperature.is_none()
            && self.soil.is_none()
            && self.water.is_none()
    }
}
