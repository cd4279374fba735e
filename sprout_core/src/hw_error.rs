//! Maps `Box<dyn Error>` from trait boundaries to typed `SensorError`.
//!
//! The traits in `sprout_traits` use `Box<dyn Error + Send + Sync>` so any
//! backend can plug in; this module converts those to our typed error enum,
//! with an optional feature-gated path for `sprout_hardware::HwError`.

use crate::error::SensorError;

/// Map a trait-boundary error raised by `sensor` to a typed `SensorError`.
///
/// Attempts to downcast known hardware error types first, then falls back
/// to string-based heuristics.
pub fn map_hw_error(sensor: &'static str, e: &(dyn std::error::Error + 'static)) -> SensorError {
    #[cfg(feature = "hardware-errors")]
    {
        if let Some(hw) = e.downcast_ref::<sprout_hardware::error::HwError>() {
            return match hw {
                sprout_hardware::error::HwError::Timeout => SensorError::Timeout { sensor },
                sprout_hardware::error::HwError::Gpio(msg) => SensorError::Gpio {
                    sensor,
                    message: msg.clone(),
                },
                other => SensorError::Hardware {
                    sensor,
                    message: other.to_string(),
                },
            };
        }
    }

    let s = e.to_string();
    if s.to_lowercase().contains("timeout") {
        SensorError::Timeout { sensor }
    } else {
        SensorError::Hardware { sensor, message: s }
    }
}
