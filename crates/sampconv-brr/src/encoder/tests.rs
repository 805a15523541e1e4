//! Tests for the encoder capability.

use std::path::Path;
use std::time::Duration;

use pretty_assertions::assert_eq;

use super::*;
use crate::error::BrrError;

// ============================================================================
// Flavor tests
// ============================================================================

#[test]
fn test_brr_encoder_args() {
    let args = EncoderFlavor::BrrEncoder.args(Path::new("in.wav"), Path::new("out.brr"), 32);
    let expected: Vec<OsString> = vec!["-l32".into(), "in.wav".into(), "out.brr".into()];
    assert_eq!(args, expected);
}

#[test]
fn test_snesbrr_args() {
    let args = EncoderFlavor::Snesbrr.args(Path::new("in.wav"), Path::new("out.brr"), 0);
    let expected: Vec<OsString> = vec![
        "-e".into(),
        "in.wav".into(),
        "out.brr".into(),
        "-l".into(),
        "0".into(),
    ];
    assert_eq!(args, expected);
}

#[test]
fn test_flavor_policy_and_parsing() {
    assert!(EncoderFlavor::BrrEncoder.prepends_initial_block());
    assert!(!EncoderFlavor::Snesbrr.prepends_initial_block());
    assert_eq!("snesbrr".parse::<EncoderFlavor>().unwrap(), EncoderFlavor::Snesbrr);
    assert_eq!(
        "brr_encoder".parse::<EncoderFlavor>().unwrap(),
        EncoderFlavor::BrrEncoder
    );
    assert!("samui".parse::<EncoderFlavor>().is_err());
    assert_eq!(EncoderFlavor::default().to_string(), "brr-encoder");
}

#[test]
fn test_config_defaults() {
    let config = EncoderConfig::default();
    assert_eq!(config.poll_attempts, 5);
    assert_eq!(config.poll_interval, Duration::from_millis(16));
    assert!(!config.force_loop_zero);
    assert!(config.program.is_none());

    let config = EncoderConfig::with_flavor(EncoderFlavor::Snesbrr)
        .program("/opt/snesbrr")
        .force_loop_zero(true)
        .poll(2, Duration::from_millis(1));
    assert_eq!(config.flavor, EncoderFlavor::Snesbrr);
    assert_eq!(config.poll_attempts, 2);
    assert!(config.force_loop_zero);
}

// ============================================================================
// Discovery tests
// ============================================================================

#[test]
fn test_find_encoder_prefers_explicit_path() {
    let dir = tempfile::tempdir().unwrap();
    let explicit = dir.path().join("my_encoder");
    let from_env = dir.path().join("env_encoder");
    std::fs::write(&explicit, b"").unwrap();
    std::fs::write(&from_env, b"").unwrap();

    let found = find_encoder(
        Some(&explicit),
        Some(from_env.clone().into_os_string()),
        EncoderFlavor::BrrEncoder,
    )
    .unwrap();
    assert_eq!(found, explicit);

    let found = find_encoder(
        Some(&dir.path().join("missing")),
        Some(from_env.clone().into_os_string()),
        EncoderFlavor::BrrEncoder,
    )
    .unwrap();
    assert_eq!(found, from_env);
}

#[test]
fn test_find_encoder_reports_search() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope");
    // Only meaningful when no snesbrr is installed on this machine.
    if let Err(err) = find_encoder(Some(&missing), None, EncoderFlavor::Snesbrr) {
        assert!(matches!(err, BrrError::EncoderNotFound { .. }));
        let message = err.to_string();
        assert!(message.contains("nope"));
        assert!(message.contains("snesbrr"));
    }
}

// ============================================================================
// Poll tests
// ============================================================================

#[test]
fn test_poll_returns_ready_output() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.brr");
    std::fs::write(&path, vec![7u8; 27]).unwrap();

    let bytes = poll_for_output(&path, 18, 5, Duration::from_millis(1)).unwrap();
    assert_eq!(bytes.len(), 27);
}

#[test]
fn test_poll_rejects_missing_output() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.brr");

    let err = poll_for_output(&path, 18, 3, Duration::from_millis(1)).unwrap_err();
    match err {
        BrrError::OutputNotReady {
            expected,
            found,
            attempts,
            ..
        } => {
            assert_eq!(expected, 18);
            assert_eq!(found, 0);
            assert_eq!(attempts, 3);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_poll_rejects_undersized_output() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.brr");
    std::fs::write(&path, vec![0u8; 9]).unwrap();

    let err = poll_for_output(&path, 18, 0, Duration::from_millis(1)).unwrap_err();
    assert!(matches!(
        err,
        BrrError::OutputNotReady {
            found: 9,
            attempts: 1,
            ..
        }
    ));
}

// ============================================================================
// Subprocess tests
// ============================================================================

#[cfg(unix)]
fn write_script(dir: &Path, name: &str, body: &str) -> std::path::PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join(name);
    std::fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
    let mut perms = std::fs::metadata(&path).unwrap().permissions();
    perms.set_mode(0o755);
    std::fs::set_permissions(&path, perms).unwrap();
    path
}

/// All script-backed cases live in one test so no other test thread forks
/// while a script is still open for writing.
#[cfg(unix)]
#[test]
fn test_process_encoder_with_scripts() {
    let dir = tempfile::tempdir().unwrap();
    let log = dir.path().join("args.log");

    // Writes 9 bytes per 16 PCM samples, 0xFF filled, and logs its loop argument.
    let fake = write_script(
        dir.path(),
        "fake_brr_encoder",
        &format!(
            "echo \"$1\" > '{log}'\n\
             size=$(wc -c < \"$2\")\n\
             blocks=$(( (size - 44) / 32 ))\n\
             head -c $((blocks * 9)) /dev/zero | tr '\\000' '\\377' > \"$3\"",
            log = log.display()
        ),
    );
    let fake_snesbrr = write_script(
        dir.path(),
        "fake_snesbrr",
        &format!(
            "echo \"$5\" > '{log}'\nhead -c 18 /dev/zero > \"$3\"",
            log = log.display()
        ),
    );
    let failing = write_script(dir.path(), "failing", "echo boom >&2\nexit 3");
    let silent = write_script(dir.path(), "silent", "exit 0");

    let quick = |flavor: EncoderFlavor, program: &Path| {
        let config = EncoderConfig::with_flavor(flavor)
            .program(program)
            .scratch_dir(dir.path().join("scratch"))
            .poll(2, Duration::from_millis(1));
        ProcessEncoder::new(config).unwrap()
    };

    // 32 samples of PCM
    let wav = crate::wav::write_wav_to_vec(&crate::wav::WavFormat::mono(8000), &[0u8; 64]);

    let encoder = quick(EncoderFlavor::BrrEncoder, &fake);
    assert_eq!(encoder.program(), fake.as_path());
    let blocks = encoder.encode(&wav, 16, 18).unwrap();
    assert_eq!(blocks, vec![0xFF; 18]);
    assert_eq!(std::fs::read_to_string(&log).unwrap().trim(), "-l16");

    let mut config = encoder.config().clone();
    config.force_loop_zero = true;
    let forced = ProcessEncoder::new(config).unwrap();
    forced.encode(&wav, 16, 18).unwrap();
    assert_eq!(std::fs::read_to_string(&log).unwrap().trim(), "-l0");

    let snes = quick(EncoderFlavor::Snesbrr, &fake_snesbrr);
    assert_eq!(snes.encode(&wav, 32, 18).unwrap().len(), 18);
    assert_eq!(std::fs::read_to_string(&log).unwrap().trim(), "32");

    let err = quick(EncoderFlavor::BrrEncoder, &failing)
        .encode(&wav, 0, 18)
        .unwrap_err();
    match err {
        BrrError::ProcessFailed { exit_code, stderr } => {
            assert_eq!(exit_code, 3);
            assert_eq!(stderr, "boom");
        }
        other => panic!("unexpected error: {other}"),
    }

    let err = quick(EncoderFlavor::BrrEncoder, &silent)
        .encode(&wav, 0, 18)
        .unwrap_err();
    assert!(matches!(err, BrrError::OutputNotReady { .. }));

    // Scratch directories are removed after each call
    let leftovers = std::fs::read_dir(dir.path().join("scratch")).unwrap().count();
    assert_eq!(leftovers, 0);
}
