//! The codec finishing step.
//!
//! Takes a prepared sample to a finished BRR artifact:
//!
//! 1. trim and ping-pong expansion, then a corrective resample at the same nominal length when the
//!    length or an active loop start is off the 16-sample grid
//! 2. clipping fix and mono WAV serialization
//! 3. encoding through an [`Encoder`]
//! 4. loop-pointer header and end-flag patching


use sampconv_sample::{Resampler, Sample};

use crate::encoder::{Encoder, EncoderFlavor};
use crate::error::{BrrError, BrrResult};
use crate::patch::{finish_block_stream, loop_pointer};
use crate::size::{initial_block_applies, predict_size};
use crate::tuning::tuning_value;
use crate::wav::serialize_sample;

/// Configuration for [`finish`].
#[derive(Debug, Clone)]
pub struct FinishConfig {
    /// Expect the encoder to prepend a block before a non-silent start.
    pub initial_block: bool,
    /// Resampler used for the corrective pass.
    pub resampler: Resampler,
}

impl Default for FinishConfig {
    fn default() -> Self {
        Self::for_flavor(EncoderFlavor::default())
    }
}

impl FinishConfig {
    /// Matches the initial-block policy to an encoder flavor.
    pub fn for_flavor(flavor: EncoderFlavor) -> Self {
        Self {
            initial_block: flavor.prepends_initial_block(),
            resampler: Resampler::default(),
        }
    }

    /// Sets the initial-block policy.
    pub fn initial_block(mut self, enabled: bool) -> Self {
        self.initial_block = enabled;
        self
    }

    /// Sets the resampler for the corrective pass.
    pub fn resampler(mut self, resampler: Resampler) -> Self {
        self.resampler = resampler;
        self
    }
}

/// Output of the finishing step.
#[derive(Debug, Clone)]
pub struct FinishedSample {
    /// The block-aligned, declipped sample that was encoded.
    pub sample: Sample,
    /// Loop pointer header followed by the block stream.
    pub brr: Vec<u8>,
    /// A corrective resample was needed to reach block alignment.
    pub corrective_resample: bool,
    /// Peak before clipping was corrected, if it clipped.
    pub clipping_peak: Option<i32>,
    /// Predicted size of the raw block stream.
    pub predicted_size: usize,
    /// An initial block was expected in the encoder output.
    pub initial_block: bool,
    /// Loop pointer written to the header.
    pub loop_pointer: u16,
}

impl FinishedSample {
    /// BLAKE3 hex digest of the artifact.
    pub fn hash(&self) -> String {
        blake3::hash(&self.brr).to_hex().to_string()
    }

    /// Tuning value for the finished C-5 speed.
    pub fn tuning(&self) -> u32 {
        tuning_value(self.sample.c5_speed)
    }
}

/// Takes `sample` through alignment, encoding and patching.
///
/// # Errors
///
/// Encoder failures propagate unchanged. [`BrrError::Misaligned`] means the
/// corrective pass did not reach the block grid.
pub fn finish(
    sample: Sample,
    config: &FinishConfig,
    encoder: &dyn Encoder,
) -> BrrResult<FinishedSample> {
    let (sample, corrective_resample) = align(sample, &config.resampler)?;

    let wav = serialize_sample(sample);
    let sample = wav.sample;

    let predicted_size = predict_size(&sample, config.initial_block);
    let initial_block = initial_block_applies(&sample, config.initial_block);
    let loop_point = if sample.has_active_loop() {
        sample.loop_start()
    } else {
        0
    };

    let blocks = encoder.encode(&wav.bytes, loop_point, predicted_size)?;
    let brr = finish_block_stream(blocks, &sample, initial_block)?;

    Ok(FinishedSample {
        loop_pointer: loop_pointer(&sample, initial_block)?,
        sample,
        brr,
        corrective_resample,
        clipping_peak: wav.clipping_peak,
        predicted_size,
        initial_block,
    })
}

/// Trims and unrolls a ping-pong loop, then resamples at the current length
/// if the sample is off grid. The flag reports whether that pass ran.
pub fn align(sample: Sample, resampler: &Resampler) -> BrrResult<(Sample, bool)> {
    let sample = sample.trim().expand_ping_loop();
    if sample.is_block_aligned() {
        return Ok((sample, false));
    }

    let target = sample.len() as f64;
    let sample = resampler.resample(sample, target)?;
    if !sample.is_block_aligned() {
        return Err(BrrError::Misaligned {
            length: sample.len(),
            loop_start: sample.loop_start(),
        });
    }
    Ok((sample, true))
}
