//! Offline trend fit over values given on the command line.

use serde_json::{Value, json};
use sprout_core::TrendTracker;

/// Feed `values` through a tracker of `window` and summarise the fit.
pub fn fit_values(window: usize, values: &[f32], range: Option<(f32, f32)>) -> eyre::Result<Value> {
    let mut tracker = TrendTracker::with_capacity(window)?;
    for &v in values {
        tracker.add_datapoint(v);
    }
    let next_x = (tracker.len() + 1) as f32;
    let plausible = range.map(|(min, max)| tracker.validate_predicted_value(next_x, min, max));
    tracing::debug!(window, used = tracker.len(), slope = ?tracker.slope(), "trend fit");
    Ok(json!({
        "window": tracker.to_vec(),
        "slope": tracker.slope(),
        "intercept": tracker.intercept(),
        "next": tracker.predict_next(),
        "plausible": plausible,
    }))
}

pub fn format_human(v: &Value) -> String {
    let num = |k: &str| v[k].as_f64().map_or_else(|| "-".to_string(), |f| format!("{f:.3}"));
    let mut out = format!(
        "slope={} intercept={} next={}",
        num("slope"),
        num("intercept"),
        num("next")
    );
    if let Some(p) = v["plausible"].as_bool() {
        out.push_str(&format!(" plausible={p}"));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ramp_predicts_next_step() {
        let v = fit_values(5, &[1.0, 2.0, 3.0, 4.0, 5.0], Some((0.0, 10.0))).unwrap();
        assert_eq!(format_human(&v), "slope=1.000 intercept=0.000 next=6.000 plausible=true");
    }

    #[test]
    fn window_keeps_newest() {
        let v = fit_values(2, &[9.0, 1.0, 2.0], None).unwrap();
        assert_eq!(v["window"], json!([1.0, 2.0]));
        assert!(v["plausible"].is_null());
    }

    #[test]
    fn zero_window_is_an_error() {
        let err = fit_values(0, &[1.0], None).unwrap_err();
        assert!(err.downcast_ref::<sprout_core::TrendError>().is_some());
    }
}
