#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let e = entroscan::entropy::shannon_entropy(data);
    assert!((0.0..=1.0).contains(&e));

    let window = (data.first().copied().unwrap_or(0) as usize).max(1);
    if let Ok(profile) = entroscan::entropy::block_entropy(data, window) {
        assert!(!profile.blocks.is_empty());
    }

    let report = entroscan::triage::scan_bytes(data);
    assert!((0.0..=100.0).contains(&report.verdict.confidence));
});
