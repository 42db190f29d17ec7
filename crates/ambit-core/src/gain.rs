//! Gain staging.
//!
//! [`LinearGain`] is the gain sub-stage of the modulation stage: a plain
//! multiplier with no smoothing, updated once per block.
//! [`feedback_wet_compensation`] keeps feedback-heavy wet paths from running
//! hotter than the dry signal.

use crate::Effect;

/// Upper bound accepted by [`LinearGain::set_gain`].
pub const MAX_LINEAR_GAIN: f32 = 2.0;

/// Linear multiplier effect.
///
/// ```rust
/// use ambit_core::{Effect, LinearGain};
///
/// let mut g = LinearGain::new(0.5);
/// assert_eq!(g.process(1.0), 0.5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearGain {
    gain: f32,
}

impl Default for LinearGain {
    fn default() -> Self {
        Self::new(1.0)
    }
}

impl LinearGain {
    /// Create a gain stage, clamped to `0.0..=MAX_LINEAR_GAIN`.
    pub fn new(gain: f32) -> Self {
        let mut g = Self { gain: 1.0 };
        g.set_gain(gain);
        g
    }

    /// Set the multiplier, clamped to `0.0..=MAX_LINEAR_GAIN`.
    #[inline]
    pub fn set_gain(&mut self, gain: f32) {
        self.gain = gain.clamp(0.0, MAX_LINEAR_GAIN);
    }

    /// Current multiplier.
    pub fn gain(&self) -> f32 {
        self.gain
    }
}

impl Effect for LinearGain {
    #[inline]
    fn process(&mut self, input: f32) -> f32 {
        input * self.gain
    }

    fn set_sample_rate(&mut self, _sample_rate: f32) {}

    fn reset(&mut self) {}
}

/// Wet-path scale for a feedback loop: `1 - |feedback|`, floored at 0.01.
///
/// ```rust
/// use ambit_core::gain::feedback_wet_compensation;
///
/// assert_eq!(feedback_wet_compensation(0.0), 1.0);
/// assert_eq!(feedback_wet_compensation(-0.5), 0.5);
/// ```
#[inline]
pub fn feedback_wet_compensation(feedback: f32) -> f32 {
    (1.0 - feedback.abs().min(0.99)).max(0.01)
}
