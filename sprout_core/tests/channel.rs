use sprout_core::mocks::ScriptedSensor;
use sprout_core::{ChannelCfg, SensorChannel, SensorError, TrendTracker};
use sprout_traits::ManualClock;

fn ramp_channel(clock: &ManualClock) -> SensorChannel<ScriptedSensor, ManualClock> {
    let cfg = ChannelCfg {
        interval_ms: 100,
        trend_window: Some(5),
        plausible: Some((0.0, 6.0)),
    };
    SensorChannel::from_cfg(
        ScriptedSensor::new([1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0]),
        &cfg,
        clock.clone(),
    )
    .unwrap()
}

#[test]
fn init_populates_reading_and_trend() {
    let clock = ManualClock::new();
    let mut ch = ramp_channel(&clock);
    ch.init().unwrap();
    assert_eq!(*ch.latest(), 1.0);
    assert_eq!(ch.trend().unwrap().to_vec(), vec![1.0]);
    assert_eq!(ch.sensor().acquisitions, 1);
    // init counts as a sample: the next tick waits a full interval.
    assert!(!ch.tick(false));
}

#[test]
fn fresh_readings_feed_the_trend() {
    let clock = ManualClock::new();
    let mut ch = ramp_channel(&clock);
    ch.init().unwrap();
    for _ in 0..4 {
        clock.advance(100);
        assert!(ch.tick(false));
    }
    let trend = ch.trend().unwrap();
    assert_eq!(trend.to_vec(), vec![1.0, 2.0, 3.0, 4.0, 5.0]);
    assert_eq!(trend.slope(), Some(1.0));
    assert_eq!(ch.predict_next(), Some(6.0));
    assert_eq!(ch.next_is_plausible(), Some(true));

    clock.advance(100);
    assert!(ch.tick(false));
    // Window is now 2..=6, next is 7 which is outside [0, 6].
    assert_eq!(ch.predict_next(), Some(7.0));
    assert_eq!(ch.next_is_plausible(), Some(false));
}

#[test]
fn skipped_ticks_do_not_touch_the_trend() {
    let clock = ManualClock::new();
    let mut ch = ramp_channel(&clock);
    ch.init().unwrap();
    let mut out = 0.0;
    for _ in 0..9 {
        clock.advance(10);
        assert!(!ch.tick_into(&mut out, false));
        assert_eq!(out, 1.0);
    }
    assert_eq!(ch.trend().unwrap().len(), 1);
    assert_eq!(ch.sensor().acquisitions, 1);
}

#[test]
fn forced_tick_acquires_immediately() {
    let clock = ManualClock::new();
    let mut ch = ramp_channel(&clock);
    ch.init().unwrap();
    let mut out = 0.0;
    assert!(ch.tick_into(&mut out, true));
    assert_eq!(out, 2.0);
    assert_eq!(ch.trend().unwrap().len(), 2);
}

#[test]
fn channel_without_trend_has_no_prediction() {
    let clock = ManualClock::new();
    let mut ch = SensorChannel::new(ScriptedSensor::new([3.0]), 50, clock.clone());
    ch.init().unwrap();
    assert!(ch.trend().is_none());
    assert_eq!(ch.predict_next(), None);
    assert_eq!(ch.next_is_plausible(), None);

    let mut ch = ch.with_trend(TrendTracker::new()).with_plausible(0.0, 10.0);
    clock.advance(50);
    assert!(ch.tick(false));
    assert_eq!(ch.next_is_plausible(), Some(true));
}

#[test]
fn failed_init_maps_to_typed_error() {
    let clock = ManualClock::new();
    let mut sensor = ScriptedSensor::new([1.0]);
    sensor.fail_init = true;
    let mut ch = SensorChannel::new(sensor, 100, clock);
    let err = ch.init().unwrap_err();
    match err.downcast_ref::<SensorError>() {
        Some(SensorError::Timeout { sensor }) => assert_eq!(*sensor, "scripted"),
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(ch.sensor().acquisitions, 0);
    assert_eq!(ch.scheduler().last_sample_ms(), None);
}

#[test]
fn zero_window_config_is_rejected() {
    let cfg = ChannelCfg {
        trend_window: Some(0),
        ..ChannelCfg::default()
    };
    let res = SensorChannel::from_cfg(ScriptedSensor::default(), &cfg, ManualClock::new());
    assert!(res.is_err());
}

#[test]
fn interval_can_change_at_runtime() {
    let clock = ManualClock::new();
    let mut ch = ramp_channel(&clock);
    ch.init().unwrap();
    ch.scheduler_mut().set_interval_ms(10);
    clock.advance(10);
    assert!(ch.tick(false));
    assert_eq!(ch.scheduler().interval_ms(), 10);
}
