//! Sine low-frequency oscillator for the phaser and chorus sweeps.

use core::f32::consts::TAU;
use libm::sinf;

/// Phase-accumulating sine LFO.
///
/// Phase lives in `[0, 1)`. The frequency may be zero, which freezes the
/// sweep at its current phase.
#[derive(Debug, Clone)]
pub struct Lfo {
    phase: f32,
    initial_phase: f32,
    phase_inc: f32,
    sample_rate: f32,
}

impl Default for Lfo {
    fn default() -> Self {
        Self::new(48000.0, 1.0)
    }
}

impl Lfo {
    /// Create an LFO at `freq_hz`, phase 0.
    pub fn new(sample_rate: f32, freq_hz: f32) -> Self {
        Self {
            phase: 0.0,
            initial_phase: 0.0,
            phase_inc: freq_hz / sample_rate,
            sample_rate,
        }
    }

    /// Set frequency in Hz. Negative values are treated as zero.
    #[inline]
    pub fn set_frequency(&mut self, freq_hz: f32) {
        self.phase_inc = freq_hz.max(0.0) / self.sample_rate;
    }

    /// Current frequency in Hz.
    pub fn frequency(&self) -> f32 {
        self.phase_inc * self.sample_rate
    }

    /// Set the phase (wrapped into `[0, 1)`). [`reset`](Self::reset) returns here.
    pub fn set_phase(&mut self, phase: f32) {
        let wrapped = phase - libm::floorf(phase);
        self.phase = wrapped;
        self.initial_phase = wrapped;
    }

    /// Current phase in `[0, 1)`.
    pub fn phase(&self) -> f32 {
        self.phase
    }

    /// Return to the phase last given to [`set_phase`](Self::set_phase).
    pub fn reset(&mut self) {
        self.phase = self.initial_phase;
    }

    /// Next bipolar value in `[-1, 1]`.
    #[inline]
    pub fn next(&mut self) -> f32 {
        let out = sinf(self.phase * TAU);
        self.phase += self.phase_inc;
        if self.phase >= 1.0 {
            self.phase -= 1.0;
        }
        out
    }

    /// Next unipolar value in `[0, 1]`.
    #[inline]
    pub fn next_unipolar(&mut self) -> f32 {
        (self.next() + 1.0) * 0.5
    }

    /// Change sample rate, keeping the frequency in Hz.
    pub fn set_sample_rate(&mut self, sample_rate: f32) {
        let freq = self.frequency();
        self.sample_rate = sample_rate;
        self.set_frequency(freq);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn completes_one_cycle_per_period() {
        let mut lfo = Lfo::new(44100.0, 1.0);
        for _ in 0..44100 {
            lfo.next();
        }
        let err = lfo.phase().min((lfo.phase() - 1.0).abs());
        assert!(err < 0.01, "phase drifted to {}", lfo.phase());
    }

    #[test]
    fn quarter_phase_offset_is_cosine() {
        let mut a = Lfo::new(48000.0, 2.0);
        let mut b = Lfo::new(48000.0, 2.0);
        b.set_phase(0.25);
        assert!(a.next().abs() < 1e-6);
        assert!((b.next() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn zero_rate_holds_value() {
        let mut lfo = Lfo::new(48000.0, 0.0);
        lfo.set_phase(0.1);
        let first = lfo.next();
        for _ in 0..100 {
            assert_eq!(lfo.next(), first);
        }
    }

    #[test]
    fn reset_restores_initial_phase() {
        let mut lfo = Lfo::new(48000.0, 5.0);
        lfo.set_phase(0.25);
        for _ in 0..1234 {
            lfo.next();
        }
        lfo.reset();
        assert_eq!(lfo.phase(), 0.25);
    }

    #[test]
    fn unipolar_range() {
        let mut lfo = Lfo::new(44100.0, 5.0);
        for _ in 0..1000 {
            let v = lfo.next_unipolar();
            assert!((0.0..=1.0).contains(&v), "unipolar value {v}");
        }
    }

    #[test]
    fn sample_rate_change_keeps_frequency() {
        let mut lfo = Lfo::new(44100.0, 3.0);
        lfo.set_sample_rate(96000.0);
        assert!((lfo.frequency() - 3.0).abs() < 1e-4);
    }
}
