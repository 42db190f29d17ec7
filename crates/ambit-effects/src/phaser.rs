//! Phaser: a swept first-order allpass cascade mixed equally with the dry signal.
//!
//! The LFO moves the allpass break frequency exponentially between
//! [`Phaser::MIN_FREQ`] and [`Phaser::MAX_FREQ`]:
//! `f = min * (max / min)^(lfo * depth)`, with `lfo` unipolar. Coefficients
//! are recomputed every [`COEFF_UPDATE_INTERVAL`] samples; the LFO itself
//! advances every sample. The right channel's LFO runs a quarter cycle ahead.

use core::f32::consts::PI;

use ambit_core::{Effect, Lfo, fast_tan, flush_denormal, wet_dry_mix};

/// Allpass stages in the cascade.
pub const STAGES: usize = 6;

/// Samples between allpass coefficient updates.
const COEFF_UPDATE_INTERVAL: u32 = 32;

/// Wet share of the output. The notches come from summing wet and dry.
const MIX: f32 = 0.5;

#[derive(Debug, Clone, Copy, Default)]
struct FirstOrderAllpass {
    a: f32,
    x1: f32,
    y1: f32,
}

impl FirstOrderAllpass {
    #[inline]
    fn set_frequency(&mut self, freq: f32, sample_rate: f32) {
        let freq = freq.clamp(10.0, sample_rate * 0.4);
        let t = fast_tan(PI * freq / sample_rate);
        self.a = (t - 1.0) / (t + 1.0);
    }

    #[inline]
    fn process(&mut self, input: f32) -> f32 {
        let output = self.a * input + self.x1 - self.a * self.y1;
        self.x1 = input;
        self.y1 = flush_denormal(output);
        output
    }

    fn clear(&mut self) {
        self.x1 = 0.0;
        self.y1 = 0.0;
    }
}

#[derive(Debug, Clone)]
struct Channel {
    allpass: [FirstOrderAllpass; STAGES],
    lfo: Lfo,
}

impl Channel {
    fn new(sample_rate: f32, phase: f32) -> Self {
        let mut lfo = Lfo::new(sample_rate, 1.0);
        lfo.set_phase(phase);
        Self {
            allpass: [FirstOrderAllpass::default(); STAGES],
            lfo,
        }
    }

    fn retune(&mut self, centre: f32, sample_rate: f32) {
        for (i, ap) in self.allpass.iter_mut().enumerate() {
            ap.set_frequency(centre * (1.0 + i as f32 * 0.1), sample_rate);
        }
    }

    #[inline]
    fn run(&mut self, input: f32) -> f32 {
        self.allpass.iter_mut().fold(input, |x, ap| ap.process(x))
    }

    fn clear(&mut self) {
        for ap in &mut self.allpass {
            ap.clear();
        }
        self.lfo.reset();
    }
}

/// Stereo phaser.
///
/// ## Parameters
///
/// - `rate`: LFO rate in Hz, `0.0..=5.0` (default 1.0). Zero parks the sweep.
/// - `depth`: sweep depth, `0.0..=1.0` (default 0.5)
///
/// # Example
///
/// ```rust
/// use ambit_core::Effect;
/// use ambit_effects::Phaser;
///
/// let mut phaser = Phaser::new(48000.0);
/// phaser.set_rate(0.5);
/// phaser.set_depth(0.8);
/// let (_l, _r) = phaser.process_stereo(0.1, 0.1);
/// ```
#[derive(Debug, Clone)]
pub struct Phaser {
    left: Channel,
    right: Channel,
    rate: f32,
    depth: f32,
    sample_rate: f32,
    log2_ratio: f32,
    coeff_update_counter: u32,
}

impl Default for Phaser {
    fn default() -> Self {
        Self::new(48000.0)
    }
}

impl Phaser {
    /// Bottom of the sweep in Hz.
    pub const MIN_FREQ: f32 = 200.0;
    /// Top of the sweep in Hz.
    pub const MAX_FREQ: f32 = 4000.0;

    /// Create a phaser with default settings.
    pub fn new(sample_rate: f32) -> Self {
        Self {
            left: Channel::new(sample_rate, 0.0),
            right: Channel::new(sample_rate, 0.25),
            rate: 1.0,
            depth: 0.5,
            sample_rate,
            log2_ratio: libm::log2f(Self::MAX_FREQ / Self::MIN_FREQ),
            coeff_update_counter: 1,
        }
    }

    /// LFO rate in Hz.
    pub fn set_rate(&mut self, rate_hz: f32) {
        self.rate = rate_hz.clamp(0.0, 5.0);
        self.left.lfo.set_frequency(self.rate);
        self.right.lfo.set_frequency(self.rate);
    }

    /// Current LFO rate in Hz.
    pub fn rate(&self) -> f32 {
        self.rate
    }

    /// Sweep depth.
    pub fn set_depth(&mut self, depth: f32) {
        self.depth = depth.clamp(0.0, 1.0);
    }

    /// Current sweep depth.
    pub fn depth(&self) -> f32 {
        self.depth
    }

    #[inline]
    fn centre(&self, lfo: f32) -> f32 {
        Self::MIN_FREQ * libm::exp2f(self.log2_ratio * lfo * self.depth)
    }

    #[inline]
    fn tick_counter(&mut self) -> bool {
        self.coeff_update_counter -= 1;
        if self.coeff_update_counter == 0 {
            self.coeff_update_counter = COEFF_UPDATE_INTERVAL;
            true
        } else {
            false
        }
    }
}

impl Effect for Phaser {
    #[inline]
    fn process(&mut self, input: f32) -> f32 {
        let lfo = self.left.lfo.next_unipolar();
        if self.tick_counter() {
            let centre = self.centre(lfo);
            self.left.retune(centre, self.sample_rate);
        }
        let wet = self.left.run(input);
        wet_dry_mix(input, wet, MIX)
    }

    #[inline]
    fn process_stereo(&mut self, left: f32, right: f32) -> (f32, f32) {
        let lfo_l = self.left.lfo.next_unipolar();
        let lfo_r = self.right.lfo.next_unipolar();
        if self.tick_counter() {
            let (centre_l, centre_r) = (self.centre(lfo_l), self.centre(lfo_r));
            self.left.retune(centre_l, self.sample_rate);
            self.right.retune(centre_r, self.sample_rate);
        }
        let wet_l = self.left.run(left);
        let wet_r = self.right.run(right);
        (wet_dry_mix(left, wet_l, MIX), wet_dry_mix(right, wet_r, MIX))
    }

    fn set_sample_rate(&mut self, sample_rate: f32) {
        self.sample_rate = sample_rate;
        self.left.lfo.set_sample_rate(sample_rate);
        self.right.lfo.set_sample_rate(sample_rate);
        self.coeff_update_counter = 1;
    }

    fn reset(&mut self) {
        self.left.clear();
        self.right.clear();
        self.coeff_update_counter = 1;
    }
}
