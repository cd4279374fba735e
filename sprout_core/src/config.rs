//! Runtime configuration for sensor channels.
//!
//! Separate from the TOML-deserialized config in `sprout_config`; see
//! `conversions` for the mapping.

/// How one sensor is polled and smoothed.
#[derive(Debug, Clone, PartialEq)]
pub struct ChannelCfg {
    /// Minimum time between scheduled samples.
    pub interval_ms: u32,
    /// Trend window size; `None` disables the trend for this channel.
    pub trend_window: Option<usize>,
    /// Plausible `(min, max)` for the next predicted reading.
    pub plausible: Option<(f32, f32)>,
}

impl Default for ChannelCfg {
    fn default() -> Self {
        Self {
            interval_ms: 1_000,
            trend_window: None,
            plausible: None,
        }
    }
}
