//! Loop-pointer header and end-flag patching of the raw block stream.

use sampconv_sample::{Sample, BLOCK_SAMPLES};

use crate::error::{BrrError, BrrResult};
use crate::size::BLOCK_BYTES;

/// Loop bit in a block header byte. Cleared on the last block of unlooped samples.
pub const LOOP_FLAG: u8 = 0x02;

/// Byte offset into the block stream where playback resumes.
///
/// Zero without an active loop. Shifted by one block when an initial block
/// was prepended.
pub fn loop_pointer(sample: &Sample, initial_block: bool) -> BrrResult<u16> {
    if !sample.has_active_loop() {
        return Ok(0);
    }
    let mut pointer = BLOCK_BYTES * sample.loop_start() / BLOCK_SAMPLES;
    if initial_block {
        pointer += BLOCK_BYTES;
    }
    u16::try_from(pointer).map_err(|_| BrrError::LoopPointerOverflow { pointer })
}

/// Prepends the 2-byte LE loop pointer to the encoder output.
///
/// Unlooped samples also get the loop bit cleared on the last block.
pub fn finish_block_stream(
    mut blocks: Vec<u8>,
    sample: &Sample,
    initial_block: bool,
) -> BrrResult<Vec<u8>> {
    let pointer = loop_pointer(sample, initial_block)?;

    if !sample.has_active_loop() && blocks.len() >= BLOCK_BYTES {
        let last = blocks.len() - BLOCK_BYTES;
        blocks[last] &= !LOOP_FLAG;
    }

    let mut artifact = Vec::with_capacity(2 + blocks.len());
    artifact.extend_from_slice(&pointer.to_le_bytes());
    artifact.extend_from_slice(&blocks);
    Ok(artifact)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn looped(len: usize, start: usize) -> Sample {
        Sample::from_mono("s", &vec![0; len], 8000).with_loop(start, len, false)
    }

    #[test]
    fn test_pointer_for_loop() {
        assert_eq!(loop_pointer(&looped(64, 32), false).unwrap(), 18);
        assert_eq!(loop_pointer(&looped(64, 32), true).unwrap(), 27);
        assert_eq!(loop_pointer(&looped(64, 0), false).unwrap(), 0);
    }

    #[test]
    fn test_pointer_without_loop() {
        let sample = Sample::from_mono("s", &[0; 32], 8000);
        assert_eq!(loop_pointer(&sample, true).unwrap(), 0);
    }

    #[test]
    fn test_pointer_overflow() {
        let sample = looped(16 * 8000, 16 * 7500);
        let err = loop_pointer(&sample, false).unwrap_err();
        assert!(matches!(err, BrrError::LoopPointerOverflow { pointer: 67500 }));
    }

    #[test]
    fn test_looped_stream_untouched() {
        let blocks = vec![0xFF; 27];
        let artifact = finish_block_stream(blocks.clone(), &looped(48, 16), true).unwrap();
        assert_eq!(&artifact[..2], &[18, 0]);
        assert_eq!(&artifact[2..], &blocks[..]);
    }

    #[test]
    fn test_unlooped_clears_last_block_flag() {
        let sample = Sample::from_mono("s", &[0; 32], 8000);
        let artifact = finish_block_stream(vec![0xFF; 18], &sample, false).unwrap();

        assert_eq!(artifact.len(), 20);
        assert_eq!(&artifact[..2], &[0, 0]);
        // First block header untouched, last block header loses bit 0x02
        assert_eq!(artifact[2], 0xFF);
        assert_eq!(artifact[2 + 9], 0xFD);
        assert!(artifact[2 + 10..].iter().all(|&b| b == 0xFF));
    }

    #[test]
    fn test_short_stream() {
        let sample = Sample::from_mono("s", &[], 8000);
        let artifact = finish_block_stream(vec![1, 2, 3], &sample, false).unwrap();
        assert_eq!(artifact, vec![0, 0, 1, 2, 3]);
    }

    #[test]
    fn test_pointer_round_trip() {
        for start in (0..4096).step_by(BLOCK_SAMPLES) {
            let pointer = BLOCK_BYTES * start / BLOCK_SAMPLES;
            assert_eq!(pointer / BLOCK_BYTES * BLOCK_SAMPLES, start);
        }
    }
}
