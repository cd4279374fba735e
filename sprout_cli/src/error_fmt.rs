//! Human-readable error descriptions and structured JSON error formatting.

use sprout_core::{SensorError, TrendError};

/// Map an eyre::Report to a human-readable explanation with likely causes and fix hints.
pub fn humanize(err: &eyre::Report) -> String {
    if let Some(se) = err.downcast_ref::<SensorError>() {
        return match se {
            SensorError::Timeout { sensor } => format!(
                "What happened: The {sensor} sensor did not answer in time.\nLikely causes: Loose data wire, missing pull-up, or no power to the probe.\nHow to fix: Check the wiring for [{sensor}] and re-run `sprout self-check`."
            ),
            SensorError::Gpio { sensor, message } => format!(
                "What happened: Could not open a GPIO line for the {sensor} sensor ({message}).\nLikely causes: Wrong pin number or insufficient GPIO permissions.\nHow to fix: Fix the pin values in [{sensor}]; ensure the process may access /dev/gpiomem."
            ),
            SensorError::Hardware { sensor, message } => format!(
                "What happened: The {sensor} sensor failed ({message}).\nLikely causes: Wiring or power issues.\nHow to fix: Re-run with --log-level=debug for details."
            ),
            SensorError::Config(msg) => format!(
                "What happened: Invalid configuration ({msg}).\nLikely causes: Missing or out-of-range values in the TOML.\nHow to fix: Edit the config file, then rerun. See etc/sprout.toml for a sample."
            ),
            SensorError::Trend(te) => trend_hint(*te),
        };
    }

    if let Some(te) = err.downcast_ref::<TrendError>() {
        return trend_hint(*te);
    }

    let msg = err.to_string();
    let mut cause = String::new();
    if let Some(src) = err.source() {
        cause = format!(" Cause: {src}");
    }
    format!(
        "Something went wrong.{cause}\nHow to fix: Re-run with --log-level=debug for details. Original: {msg}"
    )
}

fn trend_hint(te: TrendError) -> String {
    match te {
        TrendError::ZeroCapacity => "What happened: Trend window of zero.\nLikely causes: --window 0 or trend_window = 0 in the config.\nHow to fix: Use a window of at least 1 (default 5).".to_string(),
    }
}

/// Configuration problems exit with 3; everything else with 1.
pub fn exit_code_for_error(err: &eyre::Report) -> i32 {
    match err.downcast_ref::<SensorError>() {
        Some(SensorError::Config(_) | SensorError::Trend(_)) => 3,
        Some(_) => 1,
        None if err.downcast_ref::<TrendError>().is_some() => 3,
        None => 1,
    }
}

fn reason_name(err: &eyre::Report) -> &'static str {
    match err.downcast_ref::<SensorError>() {
        Some(SensorError::Timeout { .. }) => "Timeout",
        Some(SensorError::Gpio { .. }) => "Gpio",
        Some(SensorError::Hardware { .. }) => "Hardware",
        Some(SensorError::Config(_)) => "Config",
        Some(SensorError::Trend(_)) => "Trend",
        None if err.downcast_ref::<TrendError>().is_some() => "Trend",
        None => "Error",
    }
}

/// Structured JSON for errors when --json is enabled.
pub fn format_error_json(err: &eyre::Report) -> String {
    use serde_json::json;

    let mut obj = json!({ "reason": reason_name(err), "message": humanize(err) });
    if let Some(
        SensorError::Timeout { sensor }
        | SensorError::Gpio { sensor, .. }
        | SensorError::Hardware { sensor, .. },
    ) = err.downcast_ref::<SensorError>()
    {
        obj["sensor"] = json!(sensor);
    }
    obj.to_string()
}
