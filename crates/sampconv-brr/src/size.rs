//! Encoded size prediction.

use sampconv_sample::{Sample, BLOCK_SAMPLES};

/// Bytes per encoded block.
pub const BLOCK_BYTES: usize = 9;

/// True when any of the first block's mono values is non-zero.
///
/// Some encoders emit an extra silent block before such samples so the
/// decoder's filter history starts clean.
pub fn needs_initial_block(sample: &Sample) -> bool {
    sample
        .points()
        .iter()
        .take(BLOCK_SAMPLES)
        .any(|point| point.mono() != 0)
}

/// Whether an initial block is expected for `sample` under the given policy.
pub fn initial_block_applies(sample: &Sample, policy: bool) -> bool {
    policy && needs_initial_block(sample)
}

/// Predicted length of the raw block stream for a block-aligned sample.
pub fn predict_size(sample: &Sample, initial_block_policy: bool) -> usize {
    let blocks = BLOCK_BYTES * sample.len() / BLOCK_SAMPLES;
    if initial_block_applies(sample, initial_block_policy) {
        blocks + BLOCK_BYTES
    } else {
        blocks
    }
}
