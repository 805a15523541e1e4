#![no_main]

use libfuzzer_sys::fuzz_target;

// Arbitrary bytes must load or fail with an error, never panic.
fuzz_target!(|data: &[u8]| {
    if let Ok(module) = sampconv_it::load_module(data) {
        for loaded in &module.samples {
            let sample = &loaded.sample;
            assert!(sample.loop_start() <= sample.loop_end());
            assert!(sample.loop_end() <= sample.len());
        }
    }
});
