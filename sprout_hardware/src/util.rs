use sprout_traits::{AnalogInput, Clock};

/// Read `count` samples from `input`, pausing `settle_ms` after each, and
/// return the integer mean. `count` is clamped to at least 1.
pub fn read_averaged(
    input: &mut impl AnalogInput,
    clock: &impl Clock,
    count: u32,
    settle_ms: u32,
) -> u16 {
    let count = count.max(1);
    let mut total: u64 = 0;
    for _ in 0..count {
        total += u64::from(input.read());
        clock.delay_ms(settle_ms);
    }
    // Mean of u16 values always fits in u16.
    (total / u64::from(count)) as u16
}
