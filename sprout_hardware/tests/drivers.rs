use rstest::rstest;
use sprout_hardware::error::HwError;
use sprout_hardware::{
    LightSensor, SimulatedAnalog, SimulatedPower, SimulatedThermometer, SoilCalibration,
    SoilSensor, TempSensor, WaterGeometry, WaterLevelSensor,
};
use sprout_traits::{Clock, ManualClock, Sensor};

fn geometry() -> WaterGeometry {
    WaterGeometry {
        scale_factor: 500.0,
        fill_height_mm: 100.0,
        radius_mm: 50.0,
        min_fraction: 0.1,
    }
}

#[test]
fn light_reads_raw_and_feeds_trend() {
    let mut light = LightSensor::new(SimulatedAnalog::scripted([300, 310]));
    light.init().unwrap();
    let r = light.take_reading();
    assert_eq!(r, 300);
    assert_eq!(light.datapoint(&r), Some(300.0));
    assert_eq!(light.take_reading(), 310);
    assert_eq!(light.name(), "light");
}

#[test]
fn temperature_reports_failures_as_none() {
    let probe = SimulatedThermometer::new(21.5).with_drift(0.5);
    let mut temp = TempSensor::new(probe.clone());
    temp.init().unwrap();
    assert!(probe.begun());

    assert_eq!(temp.take_reading(), Some(21.5));
    probe.fail_next(1);
    let failed = temp.take_reading();
    assert_eq!(failed, None);
    assert_eq!(temp.datapoint(&failed), None);
    assert_eq!(temp.take_reading(), Some(22.0));
    assert_eq!(temp.failed_reads(), 1);
}

#[test]
fn temperature_before_begin_fails_soft() {
    let mut temp = TempSensor::new(SimulatedThermometer::new(20.0));
    assert_eq!(temp.take_reading(), None);
}

#[test]
fn soil_powers_probe_only_while_reading() {
    let power = SimulatedPower::new();
    let input = SimulatedAnalog::scripted([500, 650]);
    let cal = SoilCalibration::new(200, 800).unwrap();
    let mut soil = SoilSensor::new(input.clone(), power.clone(), cal);

    soil.init().unwrap();
    assert!(!power.is_on());
    assert_eq!(power.cycles(), 0);

    let raw = soil.take_reading();
    assert_eq!(raw, 500);
    assert!(!power.is_on());
    assert_eq!(power.cycles(), 1);
    assert_eq!(input.reads(), 1);
    assert!((soil.moisture_fraction(raw) - 0.5).abs() < 1e-6);
    assert_eq!(soil.datapoint(&raw), None);
}

#[rstest]
#[case(200, 800, 200, 0.0)]
#[case(200, 800, 800, 1.0)]
#[case(200, 800, 350, 0.25)]
// Capacitive probes read lower when wet.
#[case(800, 200, 350, 0.75)]
// Out-of-range reads are reported, not clamped.
#[case(200, 800, 100, -1.0 / 6.0)]
fn soil_fraction(#[case] dry: u16, #[case] wet: u16, #[case] raw: u16, #[case] expected: f32) {
    let cal = SoilCalibration::new(dry, wet).unwrap();
    assert!((cal.fraction(raw) - expected).abs() < 1e-6, "{}", cal.fraction(raw));
}

#[test]
fn soil_rejects_degenerate_calibration() {
    match SoilCalibration::new(400, 400) {
        Err(HwError::InvalidParameter(_)) => {}
        other => panic!("unexpected: {other:?}"),
    }
}

#[test]
fn water_averages_burst_with_settle_delays() {
    let clock = ManualClock::new();
    let power = SimulatedPower::new();
    let input = SimulatedAnalog::scripted([100, 110, 120, 130]);
    let mut water =
        WaterLevelSensor::new(input.clone(), power.clone(), clock.clone(), geometry(), 4).unwrap();
    water.init().unwrap();

    let raw = water.take_reading();
    assert_eq!(raw, 115);
    assert_eq!(input.reads(), 4);
    assert_eq!(clock.now_ms(), 4);
    assert!(!power.is_on());
    assert_eq!(power.cycles(), 1);
}

#[test]
fn water_volume_math() {
    let water = WaterLevelSensor::new(
        SimulatedAnalog::new(0),
        SimulatedPower::new(),
        ManualClock::new(),
        geometry(),
        1,
    )
    .unwrap();
    // π · 50² · 100 mm³ = 785.398 ml
    assert!((water.capacity_ml() - 785.398).abs() < 0.01);
    // 10^(0/500) = 1
    assert!((water.fill_fraction(0) - 1.0).abs() < 1e-6);
    assert!((water.fill_ml(0) - water.capacity_ml()).abs() < 1e-3);
    // 10^(250/500) = √10
    assert!((water.fill_fraction(250) - 10f32.sqrt()).abs() < 1e-4);
}

#[rstest]
#[case(400, false)] // 10^-0.8 ≈ 0.158
#[case(600, true)] // 10^-1.2 ≈ 0.063
#[case(100, false)]
fn water_empty_threshold(#[case] raw: u16, #[case] empty: bool) {
    let geo = WaterGeometry {
        scale_factor: -500.0,
        ..geometry()
    };
    let water = WaterLevelSensor::new(
        SimulatedAnalog::new(0),
        SimulatedPower::new(),
        ManualClock::new(),
        geo,
        1,
    )
    .unwrap();
    assert_eq!(water.is_empty(raw), empty);
}

#[test]
fn water_rejects_bad_geometry() {
    for geo in [
        WaterGeometry { scale_factor: 0.0, ..geometry() },
        WaterGeometry { radius_mm: -1.0, ..geometry() },
        WaterGeometry { fill_height_mm: f32::NAN, ..geometry() },
        WaterGeometry { min_fraction: 1.5, ..geometry() },
    ] {
        assert!(geo.validate().is_err(), "{geo:?}");
    }
}

#[test]
fn water_rejects_zero_read_count() {
    let res = WaterLevelSensor::new(
        SimulatedAnalog::new(0),
        SimulatedPower::new(),
        ManualClock::new(),
        geometry(),
        0,
    );
    assert!(matches!(res, Err(HwError::InvalidParameter(_))));
}
