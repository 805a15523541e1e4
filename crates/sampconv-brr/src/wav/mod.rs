//! Scratch WAV serialization for the encoder.
//!
//! The encoder reads a canonical mono 16-bit PCM WAV at the sample's C-5
//! speed. No metadata chunks are written, so equal samples produce equal
//! bytes.

mod format;
mod pcm;
mod writer;


pub use format::WavFormat;
pub use pcm::{sample_to_pcm16, serialize_sample, SerializedWav};
pub use writer::{write_wav, write_wav_to_vec, WAV_HEADER_SIZE};
