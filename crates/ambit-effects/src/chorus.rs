//! Dual-voice chorus with feedback.
//!
//! Two modulated delay lines sweep around a centre delay, their LFOs a
//! quarter cycle apart. In stereo, voice 1 runs on the left input and voice 2
//! on the right; in mono both voices see the input and are averaged.
//!
//! Delay per voice: `centre + lfo * depth * min(centre, MAX_MOD_MS)`, so the
//! sweep never reaches below zero and never exceeds the buffer.

use ambit_core::gain::feedback_wet_compensation;
use ambit_core::{
    AudioBlock, Effect, InterpolatedDelay, Lfo, ProcessSpec, flush_denormal, ms_to_samples,
    wet_dry_mix,
};

use crate::{ChainSnapshot, ProcessStage};

/// Longest centre delay in ms.
pub const MAX_CENTRE_MS: f32 = 100.0;
/// Largest sweep excursion either side of the centre, in ms.
pub const MAX_MOD_MS: f32 = 20.0;
/// Feedback magnitude limit.
pub const MAX_FEEDBACK: f32 = 0.95;

#[derive(Debug, Clone)]
struct Voice {
    delay: InterpolatedDelay,
    lfo: Lfo,
}

impl Voice {
    fn new(sample_rate: f32, phase: f32) -> Self {
        let mut lfo = Lfo::new(sample_rate, 1.0);
        lfo.set_phase(phase);
        Self {
            delay: InterpolatedDelay::from_time(sample_rate, (MAX_CENTRE_MS + MAX_MOD_MS) / 1000.0),
            lfo,
        }
    }

    #[inline]
    fn tick(&mut self, input: f32, centre: f32, excursion: f32, feedback: f32) -> f32 {
        let wet = self.delay.read(centre + self.lfo.next() * excursion);
        self.delay.write(flush_denormal(input + wet * feedback));
        wet
    }
}

/// Dual-voice chorus.
///
/// ## Parameters
///
/// - `rate`: LFO rate in Hz, `0.0..=5.0` (default 1.0)
/// - `depth`: sweep depth, `0.0..=1.0` (default 0.5)
/// - `centre_delay`: ms, `1.0..=100.0` (default 10.0)
/// - `feedback`: `-0.95..=0.95` (default 0.0)
/// - `mix`: wet/dry, `0.0..=1.0` (default 0.5)
///
/// Changing the sample rate reallocates the delay lines.
#[derive(Debug, Clone)]
pub struct Chorus {
    voice1: Voice,
    voice2: Voice,
    rate: f32,
    depth: f32,
    centre_delay_ms: f32,
    feedback: f32,
    mix: f32,
    sample_rate: f32,
    centre_samples: f32,
    excursion_samples: f32,
}

impl Default for Chorus {
    fn default() -> Self {
        Self::new(48000.0)
    }
}

impl Chorus {
    /// Create a chorus with default settings.
    pub fn new(sample_rate: f32) -> Self {
        let mut chorus = Self {
            voice1: Voice::new(sample_rate, 0.0),
            voice2: Voice::new(sample_rate, 0.25),
            rate: 1.0,
            depth: 0.5,
            centre_delay_ms: 10.0,
            feedback: 0.0,
            mix: 0.5,
            sample_rate,
            centre_samples: 0.0,
            excursion_samples: 0.0,
        };
        chorus.update_delay_times();
        chorus
    }

    /// LFO rate in Hz.
    pub fn set_rate(&mut self, rate_hz: f32) {
        self.rate = rate_hz.clamp(0.0, 5.0);
        self.voice1.lfo.set_frequency(self.rate);
        self.voice2.lfo.set_frequency(self.rate);
    }

    /// Sweep depth.
    pub fn set_depth(&mut self, depth: f32) {
        self.depth = depth.clamp(0.0, 1.0);
        self.update_delay_times();
    }

    /// Centre delay in ms.
    pub fn set_centre_delay_ms(&mut self, ms: f32) {
        self.centre_delay_ms = ms.clamp(1.0, MAX_CENTRE_MS);
        self.update_delay_times();
    }

    /// Signed feedback.
    pub fn set_feedback(&mut self, feedback: f32) {
        self.feedback = feedback.clamp(-MAX_FEEDBACK, MAX_FEEDBACK);
    }

    /// Current feedback after clamping.
    pub fn feedback(&self) -> f32 {
        self.feedback
    }

    /// Wet/dry mix.
    pub fn set_mix(&mut self, mix: f32) {
        self.mix = mix.clamp(0.0, 1.0);
    }

    fn update_delay_times(&mut self) {
        self.centre_samples = ms_to_samples(self.centre_delay_ms, self.sample_rate);
        let excursion_ms = self.depth * self.centre_delay_ms.min(MAX_MOD_MS);
        self.excursion_samples = ms_to_samples(excursion_ms, self.sample_rate);
    }
}

impl Effect for Chorus {
    #[inline]
    fn process(&mut self, input: f32) -> f32 {
        let (c, e, fb) = (self.centre_samples, self.excursion_samples, self.feedback);
        let wet1 = self.voice1.tick(input, c, e, fb);
        let wet2 = self.voice2.tick(input, c, e, fb);
        let wet = (wet1 + wet2) * 0.5 * feedback_wet_compensation(fb);
        wet_dry_mix(input, wet, self.mix)
    }

    #[inline]
    fn process_stereo(&mut self, left: f32, right: f32) -> (f32, f32) {
        let (c, e, fb) = (self.centre_samples, self.excursion_samples, self.feedback);
        let comp = feedback_wet_compensation(fb);
        let wet_l = self.voice1.tick(left, c, e, fb) * comp;
        let wet_r = self.voice2.tick(right, c, e, fb) * comp;
        (
            wet_dry_mix(left, wet_l, self.mix),
            wet_dry_mix(right, wet_r, self.mix),
        )
    }

    fn set_sample_rate(&mut self, sample_rate: f32) {
        self.sample_rate = sample_rate;
        self.voice1 = Voice::new(sample_rate, 0.0);
        self.voice2 = Voice::new(sample_rate, 0.25);
        let rate = self.rate;
        self.set_rate(rate);
        self.update_delay_times();
    }

    fn reset(&mut self) {
        for voice in [&mut self.voice1, &mut self.voice2] {
            voice.delay.clear();
            voice.lfo.reset();
        }
    }
}

/// Chorus stage with its own bypass.
#[derive(Debug, Clone)]
pub struct ChorusStage {
    chorus: Chorus,
    bypass: bool,
}

impl Default for ChorusStage {
    fn default() -> Self {
        Self::new()
    }
}

impl ChorusStage {
    /// Bypassed chorus at default settings. Call [`ProcessStage::prepare`] before use.
    pub fn new() -> Self {
        Self {
            chorus: Chorus::default(),
            bypass: true,
        }
    }

    /// Set every chorus control for the next block.
    pub fn configure(
        &mut self,
        bypass: bool,
        rate_hz: f32,
        depth: f32,
        centre_delay_ms: f32,
        feedback: f32,
        mix: f32,
    ) {
        self.bypass = bypass;
        self.chorus.set_rate(rate_hz);
        self.chorus.set_depth(depth);
        self.chorus.set_centre_delay_ms(centre_delay_ms);
        self.chorus.set_feedback(feedback);
        self.chorus.set_mix(mix);
    }

    /// The wrapped chorus.
    pub fn chorus(&self) -> &Chorus {
        &self.chorus
    }
}

impl ProcessStage for ChorusStage {
    fn name(&self) -> &'static str {
        "chorus"
    }

    fn prepare(&mut self, spec: &ProcessSpec) {
        self.chorus.set_sample_rate(spec.sample_rate);
        self.chorus.reset();
    }

    fn reset(&mut self) {
        self.chorus.reset();
    }

    fn apply_snapshot(&mut self, snapshot: &ChainSnapshot) {
        let c = &snapshot.chorus;
        self.configure(
            c.bypass,
            c.rate_hz,
            c.depth,
            c.centre_delay_ms,
            c.feedback,
            c.mix,
        );
    }

    fn is_active(&self) -> bool {
        !self.bypass
    }

    fn process(&mut self, block: &mut AudioBlock<'_>) {
        if self.is_active() {
            block.apply(&mut self.chorus);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sine(n: usize, freq: f32) -> [f32; 1024] {
        let mut out = [0.0; 1024];
        for (i, s) in out.iter_mut().take(n).enumerate() {
            *s = libm::sinf(2.0 * core::f32::consts::PI * freq * i as f32 / 48000.0);
        }
        out
    }

    #[test]
    fn impulse_arrives_near_centre_delay() {
        let mut chorus = Chorus::new(48000.0);
        chorus.set_depth(0.0);
        chorus.set_mix(1.0);
        chorus.set_centre_delay_ms(5.0);
        let mut peak_at = 0;
        let mut peak = 0.0f32;
        for i in 0..1000 {
            let y = chorus.process(if i == 0 { 1.0 } else { 0.0 });
            if y.abs() > peak {
                peak = y.abs();
                peak_at = i;
            }
        }
        // 5 ms at 48 kHz is 240 samples; reading before writing adds one.
        assert_eq!(peak_at, 241);
    }

    #[test]
    fn feedback_is_limited() {
        let mut chorus = Chorus::new(48000.0);
        chorus.set_feedback(-3.0);
        assert_eq!(chorus.feedback(), -MAX_FEEDBACK);
    }

    #[test]
    fn strong_feedback_stays_bounded() {
        let mut chorus = Chorus::new(48000.0);
        chorus.set_feedback(1.0);
        chorus.set_depth(1.0);
        chorus.set_rate(5.0);
        chorus.set_centre_delay_ms(1.0);
        let input = sine(1024, 440.0);
        for _ in 0..50 {
            for &x in &input {
                let (l, r) = chorus.process_stereo(x, x);
                assert!(l.is_finite() && r.is_finite() && l.abs() < 10.0);
            }
        }
    }

    #[test]
    fn stage_bypass_is_bit_exact() {
        let mut stage = ChorusStage::new();
        stage.prepare(&ProcessSpec::new(48000.0, 1024, 2));
        stage.configure(true, 2.0, 1.0, 20.0, 0.5, 1.0);
        let mut l = sine(1024, 300.0);
        let mut r = sine(1024, 500.0);
        let (l0, r0) = (l, r);
        stage.process(&mut AudioBlock::stereo(&mut l, &mut r));
        assert_eq!(l, l0);
        assert_eq!(r, r0);
    }

    #[test]
    fn new_stage_starts_bypassed() {
        let mut stage = ChorusStage::new();
        assert!(!stage.is_active());
        stage.apply_snapshot(&ChainSnapshot::default());
        assert!(!stage.is_active());
    }

    #[test]
    fn active_stage_changes_signal() {
        let mut stage = ChorusStage::new();
        stage.prepare(&ProcessSpec::new(48000.0, 1024, 1));
        stage.configure(false, 1.0, 0.5, 10.0, 0.0, 0.5);
        let mut m = sine(1024, 300.0);
        let m0 = m;
        stage.process(&mut AudioBlock::mono(&mut m));
        assert_ne!(m, m0);
    }
}
