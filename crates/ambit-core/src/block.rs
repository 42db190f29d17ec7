//! Audio block views and the processing spec.
//!
//! An [`AudioBlock`] borrows the caller's per-channel buffers for one
//! `process` call. Stages mutate it in place and never change its channel
//! count or length.

use core::fmt;

use crate::Effect;

/// Lowest sample rate accepted by [`ProcessSpec::validate`].
pub const MIN_SAMPLE_RATE: f32 = 8_000.0;
/// Highest sample rate accepted by [`ProcessSpec::validate`].
pub const MAX_SAMPLE_RATE: f32 = 768_000.0;
/// Largest block accepted by [`ProcessSpec::validate`].
pub const MAX_BLOCK_SIZE: usize = 1 << 16;

/// Stream format handed to `prepare`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProcessSpec {
    /// Sample rate in Hz.
    pub sample_rate: f32,
    /// Upper bound on the length of any block passed to `process`.
    pub max_block_size: usize,
    /// 1 (mono) or 2 (stereo).
    pub num_channels: usize,
}

impl ProcessSpec {
    /// Bundle the three stream parameters.
    pub const fn new(sample_rate: f32, max_block_size: usize, num_channels: usize) -> Self {
        Self {
            sample_rate,
            max_block_size,
            num_channels,
        }
    }

    /// Check that this format can be processed.
    ///
    /// ```rust
    /// use ambit_core::ProcessSpec;
    ///
    /// assert!(ProcessSpec::new(48000.0, 512, 2).validate().is_ok());
    /// assert!(ProcessSpec::new(48000.0, 512, 6).validate().is_err());
    /// ```
    pub fn validate(&self) -> Result<(), SpecProblem> {
        if !self.sample_rate.is_finite()
            || !(MIN_SAMPLE_RATE..=MAX_SAMPLE_RATE).contains(&self.sample_rate)
        {
            return Err(SpecProblem::SampleRate(self.sample_rate));
        }
        if self.max_block_size == 0 || self.max_block_size > MAX_BLOCK_SIZE {
            return Err(SpecProblem::BlockSize(self.max_block_size));
        }
        if !(1..=2).contains(&self.num_channels) {
            return Err(SpecProblem::Channels(self.num_channels));
        }
        Ok(())
    }
}

/// Why a [`ProcessSpec`] was rejected.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SpecProblem {
    /// Not finite, or outside `MIN_SAMPLE_RATE..=MAX_SAMPLE_RATE`.
    SampleRate(f32),
    /// Zero or above `MAX_BLOCK_SIZE`.
    BlockSize(usize),
    /// Anything other than 1 or 2.
    Channels(usize),
}

impl fmt::Display for SpecProblem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpecProblem::SampleRate(sr) => write!(
                f,
                "sample rate {sr} Hz outside {MIN_SAMPLE_RATE}..={MAX_SAMPLE_RATE}"
            ),
            SpecProblem::BlockSize(n) => {
                write!(f, "max block size {n} outside 1..={MAX_BLOCK_SIZE}")
            }
            SpecProblem::Channels(n) => write!(f, "{n} channels, expected 1 or 2"),
        }
    }
}

impl core::error::Error for SpecProblem {}

/// Borrowed mono or stereo block.
#[derive(Debug)]
pub enum AudioBlock<'a> {
    /// One channel.
    Mono(&'a mut [f32]),
    /// Left and right channels of equal length.
    Stereo(&'a mut [f32], &'a mut [f32]),
}

impl<'a> AudioBlock<'a> {
    /// Wrap a mono buffer.
    pub fn mono(samples: &'a mut [f32]) -> Self {
        AudioBlock::Mono(samples)
    }

    /// Wrap a stereo pair. Both channels must be the same length.
    pub fn stereo(left: &'a mut [f32], right: &'a mut [f32]) -> Self {
        debug_assert_eq!(left.len(), right.len(), "stereo channels must match");
        AudioBlock::Stereo(left, right)
    }

    /// 1 or 2.
    pub fn num_channels(&self) -> usize {
        match self {
            AudioBlock::Mono(_) => 1,
            AudioBlock::Stereo(..) => 2,
        }
    }

    /// Samples per channel.
    pub fn len(&self) -> usize {
        match self {
            AudioBlock::Mono(s) => s.len(),
            AudioBlock::Stereo(l, _) => l.len(),
        }
    }

    /// True when the block has no samples.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Run `effect` over the block in place, stereo-aware.
    #[inline]
    pub fn apply<E: Effect + ?Sized>(&mut self, effect: &mut E) {
        match self {
            AudioBlock::Mono(s) => effect.process_block_inplace(s),
            AudioBlock::Stereo(l, r) => effect.process_block_stereo_inplace(l, r),
        }
    }
}
