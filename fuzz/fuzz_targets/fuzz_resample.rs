#![no_main]

use libfuzzer_sys::fuzz_target;
use sampconv_sample::{Kernel, Resampler, Sample, BLOCK_SAMPLES};

fuzz_target!(|input: (Vec<i16>, u16, u16, u16, u8, bool)| {
    let (data, loop_start, loop_end, target, kernel, ping) = input;
    if data.is_empty() || data.len() > 4096 || target == 0 {
        return;
    }

    let kernel = match kernel % 4 {
        0 => Kernel::Nearest,
        1 => Kernel::Linear,
        2 => Kernel::Cubic,
        _ => Kernel::Sinc { width: 8 },
    };
    let mono: Vec<i32> = data.iter().map(|&v| v as i32).collect();
    let sample = Sample::from_mono("fuzz", &mono, 8363).with_loop(
        loop_start as usize,
        loop_end as usize,
        ping,
    );

    let out = Resampler::new(kernel)
        .resample(sample, target as f64)
        .expect("positive target");
    assert_eq!(out.len() % BLOCK_SAMPLES, 0);
    if out.has_active_loop() {
        assert_eq!(out.loop_start() % BLOCK_SAMPLES, 0);
        assert_eq!(out.loop_end(), out.len());
    }
});
