//! Damped feedback comb filter (Freeverb style).
//!
//! A one-pole lowpass sits in the feedback path:
//! `store = out * (1 - damp) + store * damp`, then `input + store * feedback`
//! is written back. With `feedback = 1` and `damp = 0` the loop is lossless,
//! which is how the reverb implements freeze.

use crate::InterpolatedDelay;
use crate::flush_denormal;

/// Feedback comb with a damping lowpass.
#[derive(Debug, Clone)]
pub struct CombFilter {
    delay: InterpolatedDelay,
    feedback: f32,
    damp1: f32,
    damp2: f32,
    filterstore: f32,
}

impl CombFilter {
    /// Create a comb with a loop length of `delay_samples`.
    pub fn new(delay_samples: usize) -> Self {
        Self {
            delay: InterpolatedDelay::new(delay_samples.max(1)),
            feedback: 0.5,
            damp1: 0.5,
            damp2: 0.5,
            filterstore: 0.0,
        }
    }

    /// Loop gain, clamped to `0.0..=1.0`.
    #[inline]
    pub fn set_feedback(&mut self, feedback: f32) {
        self.feedback = feedback.clamp(0.0, 1.0);
    }

    /// Current loop gain.
    pub fn feedback(&self) -> f32 {
        self.feedback
    }

    /// Damping, clamped to `0.0..=1.0`. Higher values darken the tail faster.
    #[inline]
    pub fn set_damp(&mut self, damp: f32) {
        self.damp1 = damp.clamp(0.0, 1.0);
        self.damp2 = 1.0 - self.damp1;
    }

    /// Current damping.
    pub fn damp(&self) -> f32 {
        self.damp1
    }

    /// Process one sample.
    #[inline]
    pub fn process(&mut self, input: f32) -> f32 {
        let output = self.delay.read((self.delay.capacity() - 1) as f32);
        self.filterstore = flush_denormal(output * self.damp2 + self.filterstore * self.damp1);
        self.delay.write(input + self.filterstore * self.feedback);
        output
    }

    /// Sum of squares of the circulating samples.
    pub fn energy(&self) -> f32 {
        self.delay.as_slice().iter().map(|x| x * x).sum()
    }

    /// Zero the loop.
    pub fn clear(&mut self) {
        self.delay.clear();
        self.filterstore = 0.0;
    }

    /// Loop length in samples.
    pub fn capacity(&self) -> usize {
        self.delay.capacity()
    }
}
