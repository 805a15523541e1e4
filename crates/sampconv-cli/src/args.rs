//! Argument value parsers.

use std::collections::BTreeMap;

use clap::ValueEnum;
use sampconv_brr::EncoderFlavor;
use sampconv_sample::{Kernel, SampleResult};

/// Per-sample selection from a string of `0`/`1` characters.
///
/// Position `i` selects sample `i + 1`. Samples past the end are selected.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SampleMask(Vec<bool>);

impl SampleMask {
    /// Whether the 1-based `index` should be converted.
    pub fn selects(&self, index: usize) -> bool {
        index
            .checked_sub(1)
            .and_then(|i| self.0.get(i).copied())
            .unwrap_or(true)
    }
}

/// Parses a mask such as `1101`.
pub fn parse_mask(s: &str) -> Result<SampleMask, String> {
    s.chars()
        .map(|c| match c {
            '1' => Ok(true),
            '0' => Ok(false),
            other => Err(format!("invalid mask character '{}', expected 0 or 1", other)),
        })
        .collect::<Result<Vec<_>, _>>()
        .map(SampleMask)
}

/// Parses `INDEX=RATIO` with a 1-based index and a positive, finite ratio.
pub fn parse_index_ratio(s: &str) -> Result<(usize, f64), String> {
    let (index, ratio) = s
        .split_once('=')
        .ok_or_else(|| format!("expected INDEX=RATIO, got '{}'", s))?;
    let index: usize = index
        .trim()
        .parse()
        .map_err(|_| format!("invalid sample index '{}'", index))?;
    if index == 0 {
        return Err("sample indices start at 1".to_string());
    }
    let ratio: f64 = ratio
        .trim()
        .parse()
        .map_err(|_| format!("invalid ratio '{}'", ratio))?;
    if !ratio.is_finite() || ratio <= 0.0 {
        return Err(format!("ratio must be positive, got {}", ratio));
    }
    Ok((index, ratio))
}

/// Collects repeated `INDEX=RATIO` flags; later entries win.
pub fn ratio_map(pairs: &[(usize, f64)]) -> BTreeMap<usize, f64> {
    pairs.iter().copied().collect()
}

/// Interpolation kernel names accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum KernelArg {
    Nearest,
    Linear,
    #[default]
    Cubic,
    Sinc,
}

impl KernelArg {
    /// Builds the kernel; `sinc_width` only applies to sinc.
    pub fn to_kernel(self, sinc_width: usize) -> SampleResult<Kernel> {
        match self {
            KernelArg::Nearest => Ok(Kernel::Nearest),
            KernelArg::Linear => Ok(Kernel::Linear),
            KernelArg::Cubic => Ok(Kernel::Cubic),
            KernelArg::Sinc => Kernel::sinc(sinc_width),
        }
    }
}

/// Encoder flavor names accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum FlavorArg {
    #[default]
    BrrEncoder,
    Snesbrr,
}

impl From<FlavorArg> for EncoderFlavor {
    fn from(arg: FlavorArg) -> Self {
        match arg {
            FlavorArg::BrrEncoder => EncoderFlavor::BrrEncoder,
            FlavorArg::Snesbrr => EncoderFlavor::Snesbrr,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask() {
        let mask = parse_mask("101").unwrap();
        assert!(mask.selects(1));
        assert!(!mask.selects(2));
        assert!(mask.selects(3));
        assert!(mask.selects(4));
        assert!(mask.selects(99));
        assert!(parse_mask("10x").is_err());
        assert!(parse_mask("").unwrap().selects(1));
    }

    #[test]
    fn test_index_ratio() {
        assert_eq!(parse_index_ratio("3=0.5").unwrap(), (3, 0.5));
        assert_eq!(parse_index_ratio(" 12 = 2 ").unwrap(), (12, 2.0));
        assert!(parse_index_ratio("0=1.0").is_err());
        assert!(parse_index_ratio("1=-2").is_err());
        assert!(parse_index_ratio("1=0").is_err());
        assert!(parse_index_ratio("1=inf").is_err());
        assert!(parse_index_ratio("1").is_err());
        assert!(parse_index_ratio("a=1").is_err());
    }

    #[test]
    fn test_ratio_map_last_wins() {
        let map = ratio_map(&[(2, 0.5), (1, 2.0), (2, 0.25)]);
        assert_eq!(map.get(&2), Some(&0.25));
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn test_kernel_arg() {
        assert_eq!(KernelArg::Linear.to_kernel(16).unwrap(), Kernel::Linear);
        assert_eq!(
            KernelArg::Sinc.to_kernel(8).unwrap(),
            Kernel::Sinc { width: 8 }
        );
        assert!(KernelArg::Sinc.to_kernel(1).is_err());
        assert_eq!(KernelArg::default(), KernelArg::Cubic);
    }
}
