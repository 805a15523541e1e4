//! Minimal IT module writer.
//!
//! Produces a module with an order list, empty instrument slots and sample
//! headers followed by raw PCM. There are no patterns. Used to build fixtures
//! for the loader and the conversion pipeline.

use byteorder::{LittleEndian, WriteBytesExt};
use std::io::{self, Cursor, Write};

use crate::format::{convert_flags, sample_flags};
use crate::format::{IT_HEADER_SIZE, IT_MAGIC, IT_SAMPLE_HEADER_SIZE, IT_SAMPLE_MAGIC};

/// IT format version (compatible with 2.14).
const IT_CWTT: u16 = 0x0214;

/// IT minimum compatible version.
const IT_CMWT: u16 = 0x0200;

/// End of order list marker.
const ORDER_END: u8 = 255;

/// IT sample definition.
#[derive(Debug, Clone)]
pub struct ItSample {
    /// Sample name (26 characters max).
    pub name: String,
    /// DOS filename (12 characters max).
    pub filename: String,
    /// Global volume (0-64).
    pub global_volume: u8,
    /// Sample flags.
    pub flags: u8,
    /// Default volume (0-64).
    pub default_volume: u8,
    /// Convert flags.
    pub convert: u8,
    /// Length in samples (frames for stereo data).
    pub length: u32,
    pub loop_begin: u32,
    pub loop_end: u32,
    /// C-5 speed (sample rate for C-5 playback).
    pub c5_speed: u32,
    pub sustain_loop_begin: u32,
    pub sustain_loop_end: u32,
    /// Raw sample data, already in the layout the flags describe.
    pub data: Vec<u8>,
}

impl Default for ItSample {
    fn default() -> Self {
        Self {
            name: String::new(),
            filename: String::new(),
            global_volume: 64,
            flags: sample_flags::HAS_DATA | sample_flags::BITS_16,
            default_volume: 64,
            convert: convert_flags::SIGNED,
            length: 0,
            loop_begin: 0,
            loop_end: 0,
            c5_speed: 8363,
            sustain_loop_begin: 0,
            sustain_loop_end: 0,
            data: Vec::new(),
        }
    }
}

impl ItSample {
    /// Creates a signed 16-bit mono sample.
    pub fn pcm16(name: &str, samples: &[i16], c5_speed: u32) -> Self {
        let data = samples.iter().flat_map(|s| s.to_le_bytes()).collect();
        Self {
            name: name.to_string(),
            length: samples.len() as u32,
            c5_speed,
            data,
            ..Default::default()
        }
    }

    /// Creates a signed 16-bit stereo sample from two channel blocks.
    pub fn pcm16_stereo(name: &str, left: &[i16], right: &[i16], c5_speed: u32) -> Self {
        let frames = left.len().min(right.len());
        let data = left[..frames]
            .iter()
            .chain(&right[..frames])
            .flat_map(|s| s.to_le_bytes())
            .collect();
        Self {
            name: name.to_string(),
            flags: sample_flags::HAS_DATA | sample_flags::BITS_16 | sample_flags::STEREO,
            length: frames as u32,
            c5_speed,
            data,
            ..Default::default()
        }
    }

    /// Creates an 8-bit mono sample from raw bytes.
    pub fn pcm8(name: &str, samples: &[u8], signed: bool, c5_speed: u32) -> Self {
        Self {
            name: name.to_string(),
            flags: sample_flags::HAS_DATA,
            convert: if signed { convert_flags::SIGNED } else { 0 },
            length: samples.len() as u32,
            c5_speed,
            data: samples.to_vec(),
            ..Default::default()
        }
    }

    /// Set loop parameters.
    pub fn with_loop(mut self, begin: u32, end: u32, pingpong: bool) -> Self {
        self.flags |= sample_flags::LOOP;
        if pingpong {
            self.flags |= sample_flags::LOOP_PINGPONG;
        }
        self.loop_begin = begin;
        self.loop_end = end;
        self
    }

    /// Set sustain loop parameters.
    pub fn with_sustain_loop(mut self, begin: u32, end: u32) -> Self {
        self.flags |= sample_flags::SUSTAIN_LOOP;
        self.sustain_loop_begin = begin;
        self.sustain_loop_end = end;
        self
    }

    /// Sets the DOS filename.
    pub fn with_filename(mut self, filename: &str) -> Self {
        self.filename = filename.to_string();
        self
    }

    /// Write the sample header to a writer.
    pub fn write_header<W: Write>(&self, writer: &mut W, data_offset: u32) -> io::Result<()> {
        writer.write_all(IT_SAMPLE_MAGIC)?;
        write_padded(writer, &self.filename, 12)?;
        writer.write_u8(0)?;
        writer.write_u8(self.global_volume)?;
        writer.write_u8(self.flags)?;
        writer.write_u8(self.default_volume)?;
        write_padded(writer, &self.name, 26)?;
        writer.write_u8(self.convert)?;
        // Default pan disabled
        writer.write_u8(0)?;
        writer.write_u32::<LittleEndian>(self.length)?;
        writer.write_u32::<LittleEndian>(self.loop_begin)?;
        writer.write_u32::<LittleEndian>(self.loop_end)?;
        writer.write_u32::<LittleEndian>(self.c5_speed)?;
        writer.write_u32::<LittleEndian>(self.sustain_loop_begin)?;
        writer.write_u32::<LittleEndian>(self.sustain_loop_end)?;
        writer.write_u32::<LittleEndian>(data_offset)?;
        // Vibrato speed, depth, rate, type
        writer.write_all(&[0u8; 4])?;
        Ok(())
    }
}

/// Builds a pattern-less IT module around a list of samples.
#[derive(Debug, Clone, Default)]
pub struct ItModuleWriter {
    song_name: String,
    orders: Vec<u8>,
    instrument_slots: u16,
    samples: Vec<Option<ItSample>>,
}

impl ItModuleWriter {
    /// Creates an empty module.
    pub fn new(song_name: &str) -> Self {
        Self {
            song_name: song_name.to_string(),
            orders: vec![ORDER_END],
            ..Default::default()
        }
    }

    /// Sets the order list. Only its length matters to readers of samples.
    pub fn with_orders(mut self, orders: &[u8]) -> Self {
        self.orders = orders.to_vec();
        self
    }

    /// Reserves instrument table entries; all of them point nowhere.
    pub fn with_instrument_slots(mut self, count: u16) -> Self {
        self.instrument_slots = count;
        self
    }

    /// Appends a sample.
    pub fn add_sample(&mut self, sample: ItSample) -> &mut Self {
        self.samples.push(Some(sample));
        self
    }

    /// Appends an empty sample slot (offset 0 in the table).
    pub fn add_empty_slot(&mut self) -> &mut Self {
        self.samples.push(None);
        self
    }

    /// Write the complete module to a writer.
    pub fn write<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        let table_start = IT_HEADER_SIZE + self.orders.len();
        let headers_start =
            table_start + (self.instrument_slots as usize + self.samples.len()) * 4;
        let present: Vec<&ItSample> = self.samples.iter().flatten().collect();
        let data_start = headers_start + present.len() * IT_SAMPLE_HEADER_SIZE;

        self.write_header(writer)?;
        writer.write_all(&self.orders)?;
        for _ in 0..self.instrument_slots {
            writer.write_u32::<LittleEndian>(0)?;
        }

        let mut next_header = headers_start;
        for slot in &self.samples {
            match slot {
                Some(_) => {
                    writer.write_u32::<LittleEndian>(next_header as u32)?;
                    next_header += IT_SAMPLE_HEADER_SIZE;
                }
                None => writer.write_u32::<LittleEndian>(0)?,
            }
        }

        let mut next_data = data_start;
        for sample in &present {
            sample.write_header(writer, next_data as u32)?;
            next_data += sample.data.len();
        }
        for sample in &present {
            writer.write_all(&sample.data)?;
        }
        Ok(())
    }

    /// Write the module to a byte vector.
    pub fn to_bytes(&self) -> io::Result<Vec<u8>> {
        let mut buffer = Cursor::new(Vec::new());
        self.write(&mut buffer)?;
        Ok(buffer.into_inner())
    }

    fn write_header<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        writer.write_all(IT_MAGIC)?;
        write_padded(writer, &self.song_name, 26)?;
        // Pattern highlight
        writer.write_u8(4)?;
        writer.write_u8(16)?;
        writer.write_u16::<LittleEndian>(self.orders.len() as u16)?;
        writer.write_u16::<LittleEndian>(self.instrument_slots)?;
        writer.write_u16::<LittleEndian>(self.samples.len() as u16)?;
        // No patterns
        writer.write_u16::<LittleEndian>(0)?;
        writer.write_u16::<LittleEndian>(IT_CWTT)?;
        writer.write_u16::<LittleEndian>(IT_CMWT)?;
        // Flags: stereo
        writer.write_u16::<LittleEndian>(0x01)?;
        // Special
        writer.write_u16::<LittleEndian>(0)?;
        // Global volume, mix volume, speed, tempo, separation, pitch wheel depth
        writer.write_all(&[128, 48, 6, 125, 128, 0])?;
        // Message length and offset
        writer.write_u16::<LittleEndian>(0)?;
        writer.write_u32::<LittleEndian>(0)?;
        // Reserved
        writer.write_u32::<LittleEndian>(0)?;
        // Channel pan and volume
        writer.write_all(&[32u8; 64])?;
        writer.write_all(&[64u8; 64])?;
        Ok(())
    }
}

fn write_padded<W: Write>(writer: &mut W, text: &str, width: usize) -> io::Result<()> {
    let bytes = text.as_bytes();
    let mut buf = vec![0u8; width];
    let copy_len = bytes.len().min(width);
    buf[..copy_len].copy_from_slice(&bytes[..copy_len]);
    writer.write_all(&buf)
}
