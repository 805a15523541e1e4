//! Sample to PCM conversion.

use sampconv_sample::{Sample, PCM16_MAX};

use super::format::WavFormat;
use super::writer::write_wav_to_vec;

/// A sample ready for the encoder together with its WAV bytes.
#[derive(Debug, Clone)]
pub struct SerializedWav {
    /// The trimmed, declipped sample the WAV was written from.
    pub sample: Sample,
    /// Complete WAV file.
    pub bytes: Vec<u8>,
    /// Peak before clipping was corrected, if it exceeded the 16-bit range.
    pub clipping_peak: Option<i32>,
}

/// Converts the mono downmix of every point to 16-bit LE PCM.
pub fn sample_to_pcm16(sample: &Sample) -> Vec<u8> {
    let mut pcm = Vec::with_capacity(sample.len() * 2);
    for point in sample.points() {
        let value = point.mono().clamp(i16::MIN as i32, i16::MAX as i32) as i16;
        pcm.extend_from_slice(&value.to_le_bytes());
    }
    pcm
}

/// Trims, fixes clipping and writes the mono WAV at the sample's C-5 speed.
pub fn serialize_sample(sample: Sample) -> SerializedWav {
    let sample = sample.trim();
    let peak = sample.peak();
    let sample = sample.fix_clipping();

    let bytes = write_wav_to_vec(&WavFormat::mono(sample.c5_speed), &sample_to_pcm16(&sample));
    SerializedWav {
        sample,
        bytes,
        clipping_peak: (peak > PCM16_MAX).then_some(peak),
    }
}
