//! IT sample header parsing.

use super::reader::ByteView;
use crate::error::{ItError, ItResult};
use crate::format::{convert_flags, sample_flags, sample_header as field};
use crate::format::{IT_SAMPLE_HEADER_SIZE, IT_SAMPLE_MAGIC};

/// Decoded `IMPS` sample header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleHeader {
    /// DOS filename.
    pub filename: String,
    /// Sample name.
    pub name: String,
    /// Global volume (0-64).
    pub global_volume: u8,
    /// Raw sample flags.
    pub flags: u8,
    /// Default volume (0-64).
    pub default_volume: u8,
    /// Raw convert flags.
    pub convert: u8,
    /// Default pan (0-64), if enabled.
    pub default_pan: Option<u8>,
    /// Length in samples (frames for stereo data).
    pub length: u32,
    pub loop_begin: u32,
    pub loop_end: u32,
    /// Playback rate at C-5.
    pub c5_speed: u32,
    pub sustain_begin: u32,
    pub sustain_end: u32,
    /// Absolute file offset of the PCM data.
    pub data_pointer: u32,
    /// Vibrato speed, depth, rate and type.
    pub vibrato: [u8; 4],
}

impl SampleHeader {
    /// Parses the 80-byte header at `offset`.
    pub(crate) fn parse(view: &ByteView<'_>, index: usize, offset: usize) -> ItResult<Self> {
        let raw = view.bytes(offset, IT_SAMPLE_HEADER_SIZE, "sample header")?;
        if &raw[0..4] != IT_SAMPLE_MAGIC {
            return Err(ItError::at_offset(
                format!(
                    "sample {} has invalid magic: expected 'IMPS', got {:02X?}",
                    index,
                    &raw[0..4]
                ),
                offset,
            ));
        }

        let at = |relative: usize| offset + relative;
        let dfp = view.u8(at(field::DEFAULT_PAN), "default pan")?;
        let vibrato = view.bytes(at(field::VIBRATO), 4, "vibrato")?;

        Ok(Self {
            filename: view.string(at(field::FILENAME), 12, "sample filename")?,
            name: view.string(at(field::NAME), 26, "sample name")?,
            global_volume: view.u8(at(field::GLOBAL_VOLUME), "global volume")?,
            flags: view.u8(at(field::FLAGS), "sample flags")?,
            default_volume: view.u8(at(field::DEFAULT_VOLUME), "default volume")?,
            convert: view.u8(at(field::CONVERT), "convert flags")?,
            default_pan: (dfp & 0x80 != 0).then_some(dfp & 0x7F),
            length: view.u32(at(field::LENGTH), "sample length")?,
            loop_begin: view.u32(at(field::LOOP_BEGIN), "loop begin")?,
            loop_end: view.u32(at(field::LOOP_END), "loop end")?,
            c5_speed: view.u32(at(field::C5_SPEED), "C-5 speed")?,
            sustain_begin: view.u32(at(field::SUSTAIN_BEGIN), "sustain begin")?,
            sustain_end: view.u32(at(field::SUSTAIN_END), "sustain end")?,
            data_pointer: view.u32(at(field::DATA_POINTER), "sample data pointer")?,
            vibrato: [vibrato[0], vibrato[1], vibrato[2], vibrato[3]],
        })
    }

    fn has_flag(&self, flag: u8) -> bool {
        self.flags & flag != 0
    }

    pub fn has_data(&self) -> bool {
        self.has_flag(sample_flags::HAS_DATA)
    }

    pub fn is_16bit(&self) -> bool {
        self.has_flag(sample_flags::BITS_16)
    }

    pub fn is_stereo(&self) -> bool {
        self.has_flag(sample_flags::STEREO)
    }

    pub fn is_compressed(&self) -> bool {
        self.has_flag(sample_flags::COMPRESSED)
    }

    pub fn is_looped(&self) -> bool {
        self.has_flag(sample_flags::LOOP)
    }

    pub fn is_ping_looped(&self) -> bool {
        self.has_flag(sample_flags::LOOP_PINGPONG)
    }

    pub fn has_sustain_loop(&self) -> bool {
        self.has_flag(sample_flags::SUSTAIN_LOOP)
    }

    pub fn is_ping_sustain(&self) -> bool {
        self.has_flag(sample_flags::SUSTAIN_PINGPONG)
    }

    pub fn is_signed(&self) -> bool {
        self.convert & convert_flags::SIGNED != 0
    }

    /// Bytes per channel value.
    pub fn bytes_per_value(&self) -> usize {
        if self.is_16bit() {
            2
        } else {
            1
        }
    }

    pub fn channels(&self) -> usize {
        if self.is_stereo() {
            2
        } else {
            1
        }
    }

    /// Size of the PCM data in bytes, `None` on overflow.
    pub fn data_size(&self) -> Option<usize> {
        (self.length as usize)
            .checked_mul(self.bytes_per_value())?
            .checked_mul(self.channels())
    }
}
