//! Reference BRR encoder for tests.
//!
//! Uses filter 0 only: every block stores 4-bit values scaled by a per-block
//! shift. Good enough to check framing, flags and loop handling without an
//! external executable.

use std::cell::RefCell;
use std::io::{self, Cursor};

use sampconv_brr::{BrrError, BrrResult, Encoder, BLOCK_BYTES};
use sampconv_sample::BLOCK_SAMPLES;

const END_FLAG: u8 = 0x01;
const LOOP_FLAG: u8 = 0x02;
const MAX_SHIFT: u8 = 12;

/// One recorded call to [`ReferenceEncoder::encode`].
#[derive(Debug, Clone, PartialEq)]
pub struct EncodeCall {
    pub loop_point: usize,
    pub expected_len: usize,
    pub sample_rate: u32,
    pub pcm: Vec<i16>,
}

/// In-memory encoder that mimics `brr_encoder` (or `snesbrr` with
/// `prepend_initial_block = false`).
#[derive(Debug, Default)]
pub struct ReferenceEncoder {
    pub prepend_initial_block: bool,
    pub calls: RefCell<Vec<EncodeCall>>,
}

impl ReferenceEncoder {
    /// Behaves like `brr_encoder`: prepends a silent block before a non-silent start.
    pub fn brr_encoder() -> Self {
        Self {
            prepend_initial_block: true,
            ..Default::default()
        }
    }

    /// Behaves like `snesbrr`: never prepends.
    pub fn snesbrr() -> Self {
        Self::default()
    }
}

impl Encoder for ReferenceEncoder {
    fn encode(&self, wav: &[u8], loop_point: usize, expected_len: usize) -> BrrResult<Vec<u8>> {
        let mut reader = hound::WavReader::new(Cursor::new(wav)).map_err(invalid_wav)?;
        let sample_rate = reader.spec().sample_rate;
        let pcm = reader
            .samples::<i16>()
            .collect::<Result<Vec<_>, _>>()
            .map_err(invalid_wav)?;

        let blocks = encode_blocks(&pcm, self.prepend_initial_block);
        self.calls.borrow_mut().push(EncodeCall {
            loop_point,
            expected_len,
            sample_rate,
            pcm,
        });
        Ok(blocks)
    }
}

fn invalid_wav(err: hound::Error) -> BrrError {
    BrrError::Io(io::Error::new(io::ErrorKind::InvalidData, err))
}

/// Encodes 16-bit PCM as filter-0 BRR blocks. A partial final block is
/// zero-padded. The last block carries the end and loop flags.
pub fn encode_blocks(pcm: &[i16], prepend_initial_block: bool) -> Vec<u8> {
    let mut out = Vec::with_capacity((pcm.len() / BLOCK_SAMPLES + 2) * BLOCK_BYTES);
    if prepend_initial_block && pcm.iter().take(BLOCK_SAMPLES).any(|&v| v != 0) {
        out.extend_from_slice(&[0; BLOCK_BYTES]);
    }

    for chunk in pcm.chunks(BLOCK_SAMPLES) {
        let mut block = [0i16; BLOCK_SAMPLES];
        block[..chunk.len()].copy_from_slice(chunk);

        let shift = (0..=MAX_SHIFT)
            .find(|&s| block.iter().all(|&v| (-8..=7).contains(&(v >> s))))
            .unwrap_or(MAX_SHIFT);
        out.push(shift << 4);
        for pair in block.chunks(2) {
            let hi = ((pair[0] >> shift).clamp(-8, 7) as u8) & 0x0F;
            let lo = ((pair[1] >> shift).clamp(-8, 7) as u8) & 0x0F;
            out.push((hi << 4) | lo);
        }
    }

    if let Some(last) = out.len().checked_sub(BLOCK_BYTES) {
        out[last] |= END_FLAG | LOOP_FLAG;
    }
    out
}

/// Decodes filter-0 BRR blocks. Trailing bytes short of a block are ignored.
pub fn decode_blocks(blocks: &[u8]) -> Vec<i16> {
    let mut pcm = Vec::with_capacity(blocks.len() / BLOCK_BYTES * BLOCK_SAMPLES);
    for block in blocks.chunks_exact(BLOCK_BYTES) {
        let shift = block[0] >> 4;
        for &byte in &block[1..] {
            for nibble in [byte >> 4, byte & 0x0F] {
                let value = ((nibble << 4) as i8 >> 4) as i16;
                pcm.push(value << shift);
            }
        }
    }
    pcm
}
