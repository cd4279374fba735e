//! Wrapping millisecond helpers shared by the scheduler and channels.

/// Milliseconds from `since` to `now` on a wrapping `u32` counter.
///
/// Correct as long as the true gap is shorter than one full wrap (~49.7 days).
#[inline]
pub fn elapsed_ms(now: u32, since: u32) -> u32 {
    now.wrapping_sub(since)
}

/// Convert a `u64` millisecond setting to the scheduler's `u32`, saturating.
#[inline]
pub fn clamp_ms(ms: u64) -> u32 {
    u32::try_from(ms).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn elapsed_handles_wrap() {
        assert_eq!(elapsed_ms(10, 5), 5);
        assert_eq!(elapsed_ms(4, u32::MAX - 5), 10);
        assert_eq!(elapsed_ms(7, 7), 0);
    }

    #[test]
    fn clamp_saturates() {
        assert_eq!(clamp_ms(1_500), 1_500);
        assert_eq!(clamp_ms(u64::MAX), u32::MAX);
    }
}
