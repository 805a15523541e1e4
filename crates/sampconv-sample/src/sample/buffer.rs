//! Sample buffer with loop metadata and its lifecycle transforms.

use super::point::{SamplePoint, PCM16_MAX};

/// Codec block size in samples. Lengths and loop starts must be multiples of this.
pub const BLOCK_SAMPLES: usize = 16;

/// A PCM sample with loop metadata.
///
/// Loop bounds always satisfy `0 <= start <= end <= len()`. Setting one end
/// past the other snaps the other end to match.
///
/// The lifecycle transforms ([`trim`](Self::trim),
/// [`expand_ping_loop`](Self::expand_ping_loop), [`pad_left`](Self::pad_left),
/// [`amplify`](Self::amplify), [`fix_clipping`](Self::fix_clipping),
/// [`clear_sample_data`](Self::clear_sample_data)) consume the sample and
/// return the transformed one.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Sample {
    data: Vec<SamplePoint>,
    loop_start: usize,
    loop_end: usize,
    sus_loop_start: usize,
    sus_loop_end: usize,
    /// Sample name (26 characters in IT headers).
    pub name: String,
    /// DOS filename (12 characters in IT headers).
    pub filename: String,
    /// Forward loop enabled.
    pub looped: bool,
    /// Sustain loop enabled. Carried through, never acted on by the resampler.
    pub sus_looped: bool,
    /// Loop plays forward then backward.
    pub ping_looped: bool,
    /// Sustain loop plays forward then backward.
    pub ping_sus_looped: bool,
    /// Playback rate at the reference pitch, in samples per second.
    pub c5_speed: u32,
}

impl Sample {
    /// Creates an unlooped sample.
    pub fn new(name: impl Into<String>, data: Vec<SamplePoint>, c5_speed: u32) -> Self {
        Self {
            data,
            name: name.into(),
            c5_speed,
            ..Default::default()
        }
    }

    /// Creates an unlooped sample from mono values.
    pub fn from_mono(name: impl Into<String>, mono: &[i32], c5_speed: u32) -> Self {
        let data = mono.iter().copied().map(SamplePoint::splat).collect();
        Self::new(name, data, c5_speed)
    }

    /// Enables the forward loop with the given bounds.
    pub fn with_loop(mut self, start: usize, end: usize, pingpong: bool) -> Self {
        self.looped = true;
        self.ping_looped = pingpong;
        self.set_loop_end(end);
        self.set_loop_start(start);
        self
    }

    /// Enables the sustain loop with the given bounds.
    pub fn with_sustain_loop(mut self, start: usize, end: usize, pingpong: bool) -> Self {
        self.sus_looped = true;
        self.ping_sus_looped = pingpong;
        self.set_sus_loop_end(end);
        self.set_sus_loop_start(start);
        self
    }

    /// Copies all metadata but none of the PCM data. Loop bounds start at zero.
    pub fn metadata_clone(&self) -> Self {
        Self {
            data: Vec::new(),
            loop_start: 0,
            loop_end: 0,
            sus_loop_start: 0,
            sus_loop_end: 0,
            name: self.name.clone(),
            filename: self.filename.clone(),
            looped: self.looped,
            sus_looped: self.sus_looped,
            ping_looped: self.ping_looped,
            ping_sus_looped: self.ping_sus_looped,
            c5_speed: self.c5_speed,
        }
    }

    /// Number of points.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// True when the sample has no points.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// The PCM data.
    pub fn points(&self) -> &[SamplePoint] {
        &self.data
    }

    pub fn loop_start(&self) -> usize {
        self.loop_start
    }

    pub fn loop_end(&self) -> usize {
        self.loop_end
    }

    pub fn sus_loop_start(&self) -> usize {
        self.sus_loop_start
    }

    pub fn sus_loop_end(&self) -> usize {
        self.sus_loop_end
    }

    /// Length of the forward loop region.
    pub fn loop_length(&self) -> usize {
        self.loop_end - self.loop_start
    }

    /// Sets the loop start, clamped to the data; pulls the end up if needed.
    pub fn set_loop_start(&mut self, start: usize) {
        self.loop_start = start.min(self.data.len());
        if self.loop_start > self.loop_end {
            self.loop_end = self.loop_start;
        }
    }

    /// Sets the loop end, clamped to the data; pulls the start down if needed.
    pub fn set_loop_end(&mut self, end: usize) {
        self.loop_end = end.min(self.data.len());
        if self.loop_start > self.loop_end {
            self.loop_start = self.loop_end;
        }
    }

    pub fn set_sus_loop_start(&mut self, start: usize) {
        self.sus_loop_start = start.min(self.data.len());
        if self.sus_loop_start > self.sus_loop_end {
            self.sus_loop_end = self.sus_loop_start;
        }
    }

    pub fn set_sus_loop_end(&mut self, end: usize) {
        self.sus_loop_end = end.min(self.data.len());
        if self.sus_loop_start > self.sus_loop_end {
            self.sus_loop_start = self.sus_loop_end;
        }
    }

    /// True when the loop flag is set and the loop region is non-empty.
    pub fn has_active_loop(&self) -> bool {
        self.looped && self.loop_start < self.loop_end
    }

    /// Largest channel magnitude over all points.
    pub fn peak(&self) -> i32 {
        self.data.iter().map(SamplePoint::peak).max().unwrap_or(0)
    }

    /// True when both length and (if looped) loop start sit on block boundaries.
    pub fn is_block_aligned(&self) -> bool {
        self.data.len() % BLOCK_SAMPLES == 0
            && (!self.has_active_loop() || self.loop_start % BLOCK_SAMPLES == 0)
    }

    pub(crate) fn push(&mut self, point: SamplePoint) {
        self.data.push(point);
    }

    /// Appends `copies` copies of `[loop_start, len)` and moves the loop end to
    /// the new length.
    pub(crate) fn repeat_loop_region(mut self, copies: usize) -> Self {
        let region = self.data[self.loop_start..].to_vec();
        for _ in 0..copies {
            self.data.extend_from_slice(&region);
        }
        self.loop_end = self.data.len();
        self
    }

    /// Drops every point past the loop end. No-op without an active loop.
    #[must_use]
    pub fn trim(mut self) -> Self {
        if self.has_active_loop() {
            self.data.truncate(self.loop_end);
            let len = self.data.len();
            self.sus_loop_end = self.sus_loop_end.min(len);
            self.sus_loop_start = self.sus_loop_start.min(self.sus_loop_end);
        }
        self
    }

    /// Rewrites a ping-pong loop as an equivalent forward loop.
    ///
    /// Trims, then appends `loop_end - 2` down to `loop_start + 1` so that one
    /// forward pass over the new loop plays the old forward and backward legs.
    /// Clears `ping_looped`, so a second call does nothing.
    #[must_use]
    pub fn expand_ping_loop(mut self) -> Self {
        if !self.ping_looped {
            return self;
        }
        self.ping_looped = false;
        if !self.has_active_loop() {
            return self;
        }

        let mut sample = self.trim();
        let (start, end) = (sample.loop_start, sample.loop_end);
        if end >= 2 {
            for i in (start + 1..=end - 2).rev() {
                let point = sample.data[i];
                sample.data.push(point);
            }
        }
        sample.loop_end = sample.data.len();
        sample
    }

    /// Scales everything down so no channel exceeds the 16-bit range.
    ///
    /// Leaves the data untouched when nothing clips.
    #[must_use]
    pub fn fix_clipping(self) -> Self {
        let peak = self.peak();
        if peak > PCM16_MAX {
            let ratio = PCM16_MAX as f64 / peak as f64;
            self.amplify(ratio)
        } else {
            self
        }
    }

    /// Scales every point by `ratio`. Does not clamp.
    #[must_use]
    pub fn amplify(mut self, ratio: f64) -> Self {
        for point in &mut self.data {
            *point = *point * ratio;
        }
        self
    }

    /// Prepends silence until the length is a multiple of 16, shifting the
    /// loop bounds by the inserted amount.
    #[must_use]
    pub fn pad_left(mut self) -> Self {
        let rem = self.data.len() % BLOCK_SAMPLES;
        if rem == 0 {
            return self;
        }

        let pad = BLOCK_SAMPLES - rem;
        let mut data = vec![SamplePoint::SILENCE; pad];
        data.append(&mut self.data);
        self.data = data;

        self.loop_start += pad;
        self.loop_end += pad;
        self.sus_loop_start += pad;
        self.sus_loop_end += pad;
        self
    }

    /// Empties the buffer and zeroes every loop bound.
    #[must_use]
    pub fn clear_sample_data(mut self) -> Self {
        self.data.clear();
        self.loop_start = 0;
        self.loop_end = 0;
        self.sus_loop_start = 0;
        self.sus_loop_end = 0;
        self
    }
}
