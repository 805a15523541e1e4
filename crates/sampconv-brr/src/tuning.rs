//! Tuning records and output file naming.

/// Period constant of the consuming playback engine.
const TUNING_NUMERATOR: f64 = 768.0;
const TUNING_DENOMINATOR: f64 = 12539.0;

/// Tuning value for a C-5 speed: `round(c5_speed * 768 / 12539)`.
pub fn tuning_value(c5_speed: u32) -> u32 {
    (c5_speed as f64 * TUNING_NUMERATOR / TUNING_DENOMINATOR + 0.5).floor() as u32
}

/// One line of the tuning file: `"<file>" $XXXX`.
pub fn tuning_line(filename: &str, c5_speed: u32) -> String {
    format!("\"{}\" ${:04X}", filename, tuning_value(c5_speed))
}

/// Removes characters that cannot appear in a file name.
pub fn sanitize_name(name: &str) -> String {
    name.chars()
        .filter(|c| !c.is_control() && !matches!(c, '/' | '\\' | '<' | '>' | ':' | '"' | '|' | '?' | '*'))
        .collect()
}

/// Output file name for a sample: 2-digit 1-based index, then the name.
pub fn output_filename(index: usize, name: &str) -> String {
    format!("{:02} {}.brr", index, sanitize_name(name))
}
