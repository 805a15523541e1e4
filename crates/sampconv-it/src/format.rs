//! IT layout constants.
//!
//! Offsets follow ITTECH.TXT. Only the parts needed to locate and decode
//! sample data are described here.

/// IT file magic identifier.
pub const IT_MAGIC: &[u8; 4] = b"IMPM";

/// IT sample magic identifier.
pub const IT_SAMPLE_MAGIC: &[u8; 4] = b"IMPS";

/// Module header size, before the order list.
pub const IT_HEADER_SIZE: usize = 0xC0;

/// IT sample header size.
pub const IT_SAMPLE_HEADER_SIZE: usize = 80;

/// Module header field offsets.
pub mod header {
    /// Song name (26 bytes).
    pub const SONG_NAME: usize = 0x04;
    /// Order list length.
    pub const ORDER_COUNT: usize = 0x20;
    /// Number of instruments.
    pub const INSTRUMENT_COUNT: usize = 0x22;
    /// Number of samples.
    pub const SAMPLE_COUNT: usize = 0x24;
    /// Number of patterns.
    pub const PATTERN_COUNT: usize = 0x26;
}

/// Sample header field offsets, relative to the `IMPS` magic.
pub mod sample_header {
    /// DOS filename (12 bytes).
    pub const FILENAME: usize = 0x04;
    /// Global volume.
    pub const GLOBAL_VOLUME: usize = 0x11;
    /// Sample flags.
    pub const FLAGS: usize = 0x12;
    /// Default volume.
    pub const DEFAULT_VOLUME: usize = 0x13;
    /// Sample name (26 bytes).
    pub const NAME: usize = 0x14;
    /// Convert flags.
    pub const CONVERT: usize = 0x2E;
    /// Default pan.
    pub const DEFAULT_PAN: usize = 0x2F;
    /// Length in samples.
    pub const LENGTH: usize = 0x30;
    pub const LOOP_BEGIN: usize = 0x34;
    pub const LOOP_END: usize = 0x38;
    /// Playback rate at C-5.
    pub const C5_SPEED: usize = 0x3C;
    pub const SUSTAIN_BEGIN: usize = 0x40;
    pub const SUSTAIN_END: usize = 0x44;
    /// Absolute file offset of the PCM data.
    pub const DATA_POINTER: usize = 0x48;
    /// Vibrato speed, depth, rate and type (4 bytes).
    pub const VIBRATO: usize = 0x4C;
}

/// Sample flags.
pub mod sample_flags {
    /// Sample has data.
    pub const HAS_DATA: u8 = 0x01;
    /// 16-bit sample.
    pub const BITS_16: u8 = 0x02;
    /// Stereo sample.
    pub const STEREO: u8 = 0x04;
    /// Compressed sample.
    pub const COMPRESSED: u8 = 0x08;
    /// Loop enabled.
    pub const LOOP: u8 = 0x10;
    /// Sustain loop enabled.
    pub const SUSTAIN_LOOP: u8 = 0x20;
    /// Ping-pong loop.
    pub const LOOP_PINGPONG: u8 = 0x40;
    /// Ping-pong sustain loop.
    pub const SUSTAIN_PINGPONG: u8 = 0x80;
}

/// Convert flags.
pub mod convert_flags {
    /// Signed samples.
    pub const SIGNED: u8 = 0x01;
}
