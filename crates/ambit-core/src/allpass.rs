//! Schroeder allpass for reverb diffusion.

use crate::InterpolatedDelay;
use crate::flush_denormal;

/// Schroeder allpass: `out = -in + delayed`, writes `in + delayed * feedback`.
#[derive(Debug, Clone)]
pub struct AllpassFilter {
    delay: InterpolatedDelay,
    feedback: f32,
}

impl AllpassFilter {
    /// Create an allpass with a loop length of `delay_samples`.
    pub fn new(delay_samples: usize) -> Self {
        Self {
            delay: InterpolatedDelay::new(delay_samples.max(1)),
            feedback: 0.5,
        }
    }

    /// Feedback coefficient, clamped to `-0.99..=0.99`.
    pub fn set_feedback(&mut self, feedback: f32) {
        self.feedback = feedback.clamp(-0.99, 0.99);
    }

    /// Current feedback coefficient.
    pub fn feedback(&self) -> f32 {
        self.feedback
    }

    /// Process one sample.
    #[inline]
    pub fn process(&mut self, input: f32) -> f32 {
        let delayed = self.delay.read((self.delay.capacity() - 1) as f32);
        self.delay
            .write(flush_denormal(input + delayed * self.feedback));
        -input + delayed
    }

    /// Zero the loop.
    pub fn clear(&mut self) {
        self.delay.clear();
    }

    /// Loop length in samples.
    pub fn capacity(&self) -> usize {
        self.delay.capacity()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn impulse_response_starts_inverted() {
        let mut ap = AllpassFilter::new(4);
        assert_eq!(ap.process(1.0), -1.0);
        assert_eq!(ap.process(0.0), 0.0);
        assert_eq!(ap.process(0.0), 0.0);
        assert_eq!(ap.process(0.0), 0.0);
        assert_eq!(ap.process(0.0), 1.0);
    }

    #[test]
    fn energy_roughly_preserved() {
        let mut ap = AllpassFilter::new(50);
        let mut energy_in = 0.0f32;
        let mut energy_out = 0.0f32;
        for i in 0..5000 {
            let x = if i < 100 { 1.0 } else { 0.0 };
            let y = ap.process(x);
            energy_in += x * x;
            energy_out += y * y;
        }
        let ratio = energy_out / energy_in;
        assert!(ratio > 0.5 && ratio < 2.0, "energy ratio {ratio}");
    }

    #[test]
    fn clear_silences() {
        let mut ap = AllpassFilter::new(10);
        for _ in 0..20 {
            ap.process(1.0);
        }
        ap.clear();
        assert_eq!(ap.process(0.0), 0.0);
    }
}
