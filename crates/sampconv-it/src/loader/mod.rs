//! Module loading: header, sample offset table, sample headers and PCM.
//!
//! Pattern and instrument data are never parsed; only the counts needed to
//! locate the sample offset table are read.

mod decode;
mod header;
mod reader;

#[cfg(test)]
mod tests;

use std::fmt;
use std::path::Path;

use sampconv_sample::Sample;

use crate::error::{ItError, ItResult};
use crate::format::{header as field, IT_HEADER_SIZE, IT_MAGIC};

pub use header::SampleHeader;
use reader::ByteView;

/// Non-fatal condition found while loading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItWarning {
    /// Stereo data was kept as a pair and will be downmixed to mono on encode.
    StereoDownmixed {
        /// 1-based sample index.
        index: usize,
    },
    /// The sustain loop is carried but never acted on.
    SustainLoopIgnored {
        /// 1-based sample index.
        index: usize,
    },
    /// Loop bounds in the header did not fit the data and were clamped.
    LoopClamped {
        /// 1-based sample index.
        index: usize,
        /// Loop begin as stored in the header.
        begin: u32,
        /// Loop end as stored in the header.
        end: u32,
        /// Sample length in points.
        length: u32,
    },
}

impl ItWarning {
    /// Index of the sample the warning refers to.
    pub fn index(&self) -> usize {
        match *self {
            ItWarning::StereoDownmixed { index }
            | ItWarning::SustainLoopIgnored { index }
            | ItWarning::LoopClamped { index, .. } => index,
        }
    }
}

impl fmt::Display for ItWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ItWarning::StereoDownmixed { index } => {
                write!(f, "sample {} is stereo and will be downmixed to mono", index)
            }
            ItWarning::SustainLoopIgnored { index } => {
                write!(f, "sample {} has a sustain loop, which is ignored", index)
            }
            ItWarning::LoopClamped {
                index,
                begin,
                end,
                length,
            } => write!(
                f,
                "sample {} loop {}..{} does not fit length {}, clamped",
                index, begin, end, length
            ),
        }
    }
}

/// One occupied slot of the sample table.
#[derive(Debug, Clone)]
pub struct LoadedSample {
    /// 1-based position in the sample table.
    pub index: usize,
    /// Raw header as read from the file.
    pub header: SampleHeader,
    /// Decoded sample. Empty when the header has no data flag.
    pub sample: Sample,
}

impl LoadedSample {
    /// True when the slot carries PCM data to convert.
    pub fn has_data(&self) -> bool {
        self.header.has_data() && !self.sample.is_empty()
    }
}

/// Result of loading a module.
#[derive(Debug, Clone, Default)]
pub struct LoadedModule {
    /// Song name from the module header.
    pub song_name: String,
    /// Number of entries in the sample table, including empty slots.
    pub sample_slots: usize,
    /// Occupied sample slots in table order.
    pub samples: Vec<LoadedSample>,
    /// Warnings collected while loading.
    pub warnings: Vec<ItWarning>,
}

/// Loads every sample from an IT module held in memory.
///
/// # Errors
///
/// Returns [`ItError::InvalidFile`] for any malformed offset, length or magic
/// and [`ItError::UnsupportedFeature`] for compressed sample data.
pub fn load_module(data: &[u8]) -> ItResult<LoadedModule> {
    let view = ByteView::new(data);
    if view.len() < IT_HEADER_SIZE {
        return Err(ItError::invalid(format!(
            "file too small: {} bytes (minimum {} bytes for header)",
            view.len(),
            IT_HEADER_SIZE
        )));
    }

    let magic = view.bytes(0, 4, "module magic")?;
    if magic != IT_MAGIC {
        return Err(ItError::at_offset(
            format!("invalid magic: expected 'IMPM', got {:02X?}", magic),
            0,
        ));
    }

    let song_name = view.string(field::SONG_NAME, 26, "song name")?;
    let order_count = view.u16(field::ORDER_COUNT, "order count")? as usize;
    let instrument_count = view.u16(field::INSTRUMENT_COUNT, "instrument count")? as usize;
    let sample_count = view.u16(field::SAMPLE_COUNT, "sample count")? as usize;

    let table_start = IT_HEADER_SIZE + order_count + instrument_count * 4;

    let mut module = LoadedModule {
        song_name,
        sample_slots: sample_count,
        ..Default::default()
    };

    for slot in 0..sample_count {
        let index = slot + 1;
        let offset = view.u32(table_start + slot * 4, "sample offset table")? as usize;
        if offset == 0 {
            continue;
        }

        let header = SampleHeader::parse(&view, index, offset)?;
        let sample = load_sample(&view, index, &header, &mut module.warnings)?;
        module.samples.push(LoadedSample {
            index,
            header,
            sample,
        });
    }

    Ok(module)
}

/// Reads and loads an IT module from disk.
pub fn load_module_file(path: impl AsRef<Path>) -> ItResult<LoadedModule> {
    let path = path.as_ref();
    let data = std::fs::read(path).map_err(|source| ItError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    load_module(&data)
}

fn load_sample(
    view: &ByteView<'_>,
    index: usize,
    header: &SampleHeader,
    warnings: &mut Vec<ItWarning>,
) -> ItResult<Sample> {
    let named = |points| {
        let mut sample = Sample::new(header.name.clone(), points, header.c5_speed);
        sample.filename = header.filename.clone();
        sample
    };

    if !header.has_data() {
        return Ok(named(Vec::new()));
    }
    if header.is_compressed() {
        return Err(ItError::unsupported(index, "compressed sample data"));
    }

    let size = header.data_size().ok_or_else(|| {
        ItError::invalid(format!(
            "sample {} length {} overflows",
            index, header.length
        ))
    })?;
    let raw = view.bytes(header.data_pointer as usize, size, "sample data")?;
    let mut sample = named(decode::decode_pcm(raw, header));

    if header.is_stereo() {
        warnings.push(ItWarning::StereoDownmixed { index });
    }

    if header.is_looped() {
        if header.loop_begin > header.loop_end || header.loop_end > header.length {
            warnings.push(ItWarning::LoopClamped {
                index,
                begin: header.loop_begin,
                end: header.loop_end,
                length: header.length,
            });
        }
        sample = sample.with_loop(
            header.loop_begin as usize,
            header.loop_end as usize,
            header.is_ping_looped(),
        );
    }

    if header.has_sustain_loop() {
        warnings.push(ItWarning::SustainLoopIgnored { index });
        sample = sample.with_sustain_loop(
            header.sustain_begin as usize,
            header.sustain_end as usize,
            header.is_ping_sustain(),
        );
    }

    Ok(sample)
}
