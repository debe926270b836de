//! Histogram accumulation regression test
//!
//! Parallel counting with private per-worker histograms must agree with
//! a plain sequential count for every worker count.

use histeq_core::{Channel, Histogram};
use histeq_enhance::{accumulate, partition_rows};
use histeq_test::{RegParams, gradient, noise};

#[test]
fn accumulate_reg() {
    let mut rp = RegParams::new("accumulate");

    // --- Test 1: counts sum to the pixel count for every worker count ---
    eprintln!("=== Total count ===");
    let small = noise(5, 4, 1, 11).expect("noise");
    for workers in 1..=(5 * 4) {
        let hist = accumulate(&small, Channel::FIRST, workers).expect("accumulate");
        rp.compare_values(20.0, hist.total() as f64, 0.0);
    }

    // --- Test 2: agreement with a sequential count ---
    eprintln!("=== Sequential agreement ===");
    let img = noise(97, 61, 3, 42).expect("noise");
    for c in 0..3 {
        let channel = Channel::new(c);
        let sequential: Histogram = img.channel_samples(channel).expect("channel").collect();
        for workers in [1, 2, 4, 8] {
            let parallel = accumulate(&img, channel, workers).expect("accumulate");
            let same = parallel == sequential;
            rp.compare_values(1.0, if same { 1.0 } else { 0.0 }, 0.0);
        }
    }

    // --- Test 3: more workers than rows ---
    eprintln!("=== Oversubscribed ===");
    let thin = gradient(300, 3, 1).expect("gradient");
    let hist = accumulate(&thin, Channel::FIRST, 64).expect("accumulate");
    rp.compare_values(900.0, hist.total() as f64, 0.0);
    rp.compare_values(3.0, partition_rows(3, 64).len() as f64, 0.0);

    assert!(rp.cleanup());
}
