//! Tests for module loading.

use pretty_assertions::assert_eq;
use sampconv_sample::SamplePoint;

use super::*;
use crate::format::{sample_flags, IT_SAMPLE_HEADER_SIZE};
use crate::writer::{ItModuleWriter, ItSample};

fn module_bytes(samples: Vec<ItSample>) -> Vec<u8> {
    let mut writer = ItModuleWriter::new("Fixture");
    for sample in samples {
        writer.add_sample(sample);
    }
    writer.to_bytes().unwrap()
}

fn left_values(sample: &Sample) -> Vec<i32> {
    sample.points().iter().map(|p| p.left).collect()
}

// ============================================================================
// Header tests
// ============================================================================

#[test]
fn test_rejects_short_file() {
    let err = load_module(b"IMPM").unwrap_err();
    assert!(matches!(err, ItError::InvalidFile { .. }));
}

#[test]
fn test_rejects_bad_magic() {
    let mut bytes = module_bytes(vec![]);
    bytes[0..4].copy_from_slice(b"MTM\0");
    let err = load_module(&bytes).unwrap_err();
    assert!(matches!(err, ItError::InvalidFile { offset: Some(0), .. }));
}

#[test]
fn test_empty_module() {
    let module = load_module(&module_bytes(vec![])).unwrap();
    assert_eq!(module.song_name, "Fixture");
    assert_eq!(module.sample_slots, 0);
    assert!(module.samples.is_empty());
    assert!(module.warnings.is_empty());
}

#[test]
fn test_offset_table_skips_orders_and_instruments() {
    let mut writer = ItModuleWriter::new("Offsets")
        .with_orders(&[0, 0, 1, 255])
        .with_instrument_slots(3);
    writer
        .add_sample(ItSample::pcm16("first", &[1, 2], 8363))
        .add_empty_slot()
        .add_sample(ItSample::pcm16("third", &[3, 4], 8363));
    let module = load_module(&writer.to_bytes().unwrap()).unwrap();

    assert_eq!(module.sample_slots, 3);
    let indexes: Vec<usize> = module.samples.iter().map(|s| s.index).collect();
    assert_eq!(indexes, vec![1, 3]);
    assert_eq!(module.samples[1].sample.name, "third");
    assert_eq!(left_values(&module.samples[1].sample), vec![3, 4]);
}

// ============================================================================
// PCM decoding tests
// ============================================================================

#[test]
fn test_signed_16bit_mono() {
    let module = load_module(&module_bytes(vec![ItSample::pcm16(
        "Bass",
        &[0, 1000, -1000, i16::MAX, i16::MIN],
        16000,
    )
    .with_filename("BASS.WAV")]))
    .unwrap();

    let loaded = &module.samples[0];
    assert!(loaded.has_data());
    assert_eq!(loaded.sample.name, "Bass");
    assert_eq!(loaded.sample.filename, "BASS.WAV");
    assert_eq!(loaded.sample.c5_speed, 16000);
    assert_eq!(
        left_values(&loaded.sample),
        vec![0, 1000, -1000, 32767, -32768]
    );
    assert!(loaded
        .sample
        .points()
        .iter()
        .all(|p| p.left == p.right));
}

#[test]
fn test_unsigned_16bit() {
    let mut sample = ItSample::pcm16("u16", &[0, 0], 8363);
    sample.convert = 0;
    // 0x8000 and 0x0000 unsigned
    sample.data = vec![0x00, 0x80, 0x00, 0x00];
    let module = load_module(&module_bytes(vec![sample])).unwrap();
    assert_eq!(left_values(&module.samples[0].sample), vec![0, -32768]);
}

#[test]
fn test_8bit_scaling() {
    let signed = ItSample::pcm8("s8", &[0x00, 0x7F, 0x80, 0xFF], true, 8363);
    let unsigned = ItSample::pcm8("u8", &[0x80, 0xFF, 0x00], false, 8363);
    let module = load_module(&module_bytes(vec![signed, unsigned])).unwrap();

    assert_eq!(
        left_values(&module.samples[0].sample),
        vec![0, 127 * 256, -128 * 256, -256]
    );
    assert_eq!(
        left_values(&module.samples[1].sample),
        vec![0, 127 * 256, -128 * 256]
    );
}

#[test]
fn test_stereo_keeps_pairs_and_warns() {
    let module = load_module(&module_bytes(vec![ItSample::pcm16_stereo(
        "Wide",
        &[100, 200],
        &[-100, 300],
        8363,
    )]))
    .unwrap();

    assert_eq!(
        module.samples[0].sample.points(),
        &[SamplePoint::new(100, -100), SamplePoint::new(200, 300)]
    );
    assert_eq!(module.warnings, vec![ItWarning::StereoDownmixed { index: 1 }]);
}

#[test]
fn test_header_without_data_flag() {
    let mut sample = ItSample::pcm16("ghost", &[1, 2, 3], 8363);
    sample.flags &= !sample_flags::HAS_DATA;
    let module = load_module(&module_bytes(vec![sample])).unwrap();

    let loaded = &module.samples[0];
    assert!(!loaded.has_data());
    assert!(loaded.sample.is_empty());
    assert_eq!(loaded.header.length, 3);
}

// ============================================================================
// Loop tests
// ============================================================================

#[test]
fn test_loop_flags() {
    let data: Vec<i16> = (0..64).collect();
    let module = load_module(&module_bytes(vec![
        ItSample::pcm16("fwd", &data, 8363).with_loop(16, 48, false),
        ItSample::pcm16("ping", &data, 8363).with_loop(8, 40, true),
    ]))
    .unwrap();

    let fwd = &module.samples[0].sample;
    assert!(fwd.looped && !fwd.ping_looped);
    assert_eq!((fwd.loop_start(), fwd.loop_end()), (16, 48));

    let ping = &module.samples[1].sample;
    assert!(ping.looped && ping.ping_looped);
    assert_eq!((ping.loop_start(), ping.loop_end()), (8, 40));
    assert!(module.warnings.is_empty());
}

#[test]
fn test_loop_past_end_is_clamped() {
    let module = load_module(&module_bytes(vec![
        ItSample::pcm16("long", &[0; 20], 8363).with_loop(4, 30, false)
    ]))
    .unwrap();

    let sample = &module.samples[0].sample;
    assert_eq!((sample.loop_start(), sample.loop_end()), (4, 20));
    assert_eq!(
        module.warnings,
        vec![ItWarning::LoopClamped {
            index: 1,
            begin: 4,
            end: 30,
            length: 20
        }]
    );
}

#[test]
fn test_sustain_loop_warns() {
    let module = load_module(&module_bytes(vec![
        ItSample::pcm16("held", &[0; 32], 8363).with_sustain_loop(0, 16)
    ]))
    .unwrap();

    let sample = &module.samples[0].sample;
    assert!(sample.sus_looped);
    assert!(!sample.looped);
    assert_eq!((sample.sus_loop_start(), sample.sus_loop_end()), (0, 16));
    assert_eq!(module.warnings[0].index(), 1);
    assert!(matches!(
        module.warnings[0],
        ItWarning::SustainLoopIgnored { index: 1 }
    ));
}

// ============================================================================
// Error tests
// ============================================================================

#[test]
fn test_compressed_is_unsupported() {
    let mut sample = ItSample::pcm16("packed", &[0; 8], 8363);
    sample.flags |= sample_flags::COMPRESSED;
    let err = load_module(&module_bytes(vec![ItSample::pcm16("ok", &[0; 4], 8363), sample]))
        .unwrap_err();
    assert!(matches!(err, ItError::UnsupportedFeature { index: 2, .. }));
}

#[test]
fn test_truncated_data_is_invalid() {
    let mut bytes = module_bytes(vec![ItSample::pcm16("cut", &[0; 32], 8363)]);
    bytes.truncate(bytes.len() - 10);
    let err = load_module(&bytes).unwrap_err();
    assert!(matches!(err, ItError::InvalidFile { .. }));
    assert!(err.to_string().contains("sample data"));
}

#[test]
fn test_truncated_header_is_invalid() {
    let bytes = module_bytes(vec![ItSample::pcm16("cut", &[], 8363)]);
    let header_start = bytes.len() - IT_SAMPLE_HEADER_SIZE;
    let err = load_module(&bytes[..header_start + 20]).unwrap_err();
    assert!(matches!(err, ItError::InvalidFile { .. }));
}

#[test]
fn test_bad_sample_magic() {
    let mut bytes = module_bytes(vec![ItSample::pcm16("x", &[0; 2], 8363)]);
    let header_start = bytes.len() - 4 - IT_SAMPLE_HEADER_SIZE;
    bytes[header_start..header_start + 4].copy_from_slice(b"IMPI");
    let err = load_module(&bytes).unwrap_err();
    assert!(err.to_string().contains("IMPS"));
}

#[test]
fn test_huge_length_does_not_panic() {
    let mut sample = ItSample::pcm16("huge", &[0; 2], 8363);
    sample.length = u32::MAX;
    let err = load_module(&module_bytes(vec![sample])).unwrap_err();
    assert!(matches!(err, ItError::InvalidFile { .. }));
}

#[test]
fn test_load_module_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("song.it");
    std::fs::write(&path, module_bytes(vec![ItSample::pcm16("a", &[5; 16], 8363)])).unwrap();

    let module = load_module_file(&path).unwrap();
    assert_eq!(module.samples.len(), 1);

    let missing = load_module_file(dir.path().join("missing.it")).unwrap_err();
    assert!(matches!(missing, ItError::Io { .. }));
}
