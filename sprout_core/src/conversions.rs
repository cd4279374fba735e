//! `From` implementations bridging `sprout_config` sections to `ChannelCfg`.

use crate::config::ChannelCfg;

// ── Light ────────────────────────────────────────────────────────────────────

impl From<&sprout_config::LightCfg> for ChannelCfg {
    fn from(c: &sprout_config::LightCfg) -> Self {
        Self {
            interval_ms: c.interval_ms,
            trend_window: Some(c.trend_window),
            plausible: c.plausible.map(|[min, max]| (min, max)),
        }
    }
}

// ── Temperature ──────────────────────────────────────────────────────────────

impl From<&sprout_config::TemperatureCfg> for ChannelCfg {
    fn from(c: &sprout_config::TemperatureCfg) -> Self {
        Self {
            interval_ms: c.interval_ms,
            trend_window: Some(c.trend_window),
            plausible: c.plausible.map(|[min, max]| (min, max)),
        }
    }
}

// ── Soil / Water ─────────────────────────────────────────────────────────────
// Both report derived quantities; neither keeps a trend.

impl From<&sprout_config::SoilCfg> for ChannelCfg {
    fn from(c: &sprout_config::SoilCfg) -> Self {
        Self {
            interval_ms: c.interval_ms,
            trend_window: None,
            plausible: None,
        }
    }
}

impl From<&sprout_config::WaterCfg> for ChannelCfg {
    fn from(c: &sprout_config::WaterCfg) -> Self {
        Self {
            interval_ms: c.interval_ms,
            trend_window: None,
            plausible: None,
        }
    }
}
