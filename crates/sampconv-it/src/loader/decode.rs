//! PCM decoding into [`SamplePoint`]s.

use byteorder::{ByteOrder, LittleEndian};
use sampconv_sample::SamplePoint;

use super::header::SampleHeader;

/// Decodes raw PCM into points scaled to the 16-bit range.
///
/// Stereo data is stored as one full block per channel, left first.
pub(crate) fn decode_pcm(raw: &[u8], header: &SampleHeader) -> Vec<SamplePoint> {
    let frames = header.length as usize;
    let width = header.bytes_per_value();
    let signed = header.is_signed();

    let value = |channel: usize, frame: usize| -> i32 {
        let at = (channel * frames + frame) * width;
        if width == 2 {
            let raw = LittleEndian::read_u16(&raw[at..at + 2]);
            if signed {
                raw as i16 as i32
            } else {
                raw as i32 - 0x8000
            }
        } else {
            let raw = raw[at];
            let centered = if signed {
                raw as i8 as i32
            } else {
                raw as i32 - 0x80
            };
            centered * 256
        }
    };

    if header.is_stereo() {
        (0..frames)
            .map(|i| SamplePoint::new(value(0, i), value(1, i)))
            .collect()
    } else {
        (0..frames).map(|i| SamplePoint::splat(value(0, i))).collect()
    }
}
