#![no_main]
use libfuzzer_sys::{arbitrary::Arbitrary, fuzz_target};
use sprout_core::TrendTracker;

#[derive(Debug, Arbitrary)]
enum Op {
    Add(f32),
    Resize(u8),
    Clear,
}

fuzz_target!(|ops: Vec<Op>| {
    let mut t = TrendTracker::new();
    for op in ops {
        match op {
            Op::Add(v) => t.add_datapoint(v),
            Op::Resize(n) => {
                let _ = t.set_capacity(usize::from(n));
            }
            Op::Clear => t.clear(),
        }
        assert!(t.len() <= t.capacity());
        assert_eq!(t.fit().is_some(), !t.is_empty());
    }
});
