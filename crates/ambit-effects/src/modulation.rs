//! Modulation stage: gain, then phaser.
//!
//! The two sub-stages form a fixed static [`Chain`] and share one bypass flag.

use ambit_core::{AudioBlock, Chain, Effect, EffectExt, LinearGain, ProcessSpec};

use crate::{ChainSnapshot, Phaser, ProcessStage};

/// Gain followed by [`Phaser`], bypassed as a unit.
pub struct ModulationStage {
    chain: Chain<LinearGain, Phaser>,
    bypass: bool,
}

impl Default for ModulationStage {
    fn default() -> Self {
        Self::new()
    }
}

impl ModulationStage {
    /// Bypassed stage at unity gain. Call [`ProcessStage::prepare`] before use.
    pub fn new() -> Self {
        Self {
            chain: LinearGain::default().chain(Phaser::default()),
            bypass: true,
        }
    }

    /// Set bypass, linear gain and phaser rate/depth for the next block.
    pub fn configure(&mut self, bypass: bool, gain_linear: f32, rate_hz: f32, depth: f32) {
        self.bypass = bypass;
        self.chain.first_mut().set_gain(gain_linear);
        let phaser = self.chain.second_mut();
        phaser.set_rate(rate_hz);
        phaser.set_depth(depth);
    }

    /// Current linear gain.
    pub fn gain(&self) -> f32 {
        self.chain.first().gain()
    }

    /// The phaser sub-stage.
    pub fn phaser(&self) -> &Phaser {
        self.chain.second()
    }
}

impl ProcessStage for ModulationStage {
    fn name(&self) -> &'static str {
        "modulation"
    }

    fn prepare(&mut self, spec: &ProcessSpec) {
        self.chain.set_sample_rate(spec.sample_rate);
        self.chain.reset();
    }

    fn reset(&mut self) {
        self.chain.reset();
    }

    fn apply_snapshot(&mut self, snapshot: &ChainSnapshot) {
        let m = &snapshot.modulation;
        self.configure(m.bypass, m.gain, m.rate_hz, m.depth);
    }

    fn is_active(&self) -> bool {
        !self.bypass
    }

    fn process(&mut self, block: &mut AudioBlock<'_>) {
        if self.is_active() {
            block.apply(&mut self.chain);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prepared() -> ModulationStage {
        let mut stage = ModulationStage::new();
        stage.prepare(&ProcessSpec::new(48000.0, 128, 2));
        stage
    }

    #[test]
    fn bypass_is_bit_exact() {
        let mut stage = prepared();
        stage.configure(true, 2.0, 1.5, 1.0);
        let mut l: [f32; 128] = core::array::from_fn(|i| (i as f32 * 0.1).sin());
        let mut r = l;
        let copy = l;
        stage.process(&mut AudioBlock::stereo(&mut l, &mut r));
        assert_eq!(l, copy);
        assert_eq!(r, copy);
    }

    #[test]
    fn gain_applies_before_phaser() {
        let mut loud = prepared();
        let mut quiet = prepared();
        loud.configure(false, 2.0, 1.0, 0.5);
        quiet.configure(false, 1.0, 1.0, 0.5);
        let mut a: [f32; 128] = core::array::from_fn(|i| (i as f32 * 0.1).sin() * 0.25);
        let mut b = a;
        loud.process(&mut AudioBlock::mono(&mut a));
        quiet.process(&mut AudioBlock::mono(&mut b));
        // Linear chain: doubling the input doubles the output.
        for (x, y) in a.iter().zip(b.iter()) {
            assert!((x - 2.0 * y).abs() < 1e-5, "{x} vs 2 * {y}");
        }
    }

    #[test]
    fn configure_is_idempotent() {
        let mut once = prepared();
        let mut twice = prepared();
        once.configure(false, 1.2, 0.7, 0.9);
        twice.configure(false, 1.2, 0.7, 0.9);
        twice.configure(false, 1.2, 0.7, 0.9);
        let mut a: [f32; 128] = core::array::from_fn(|i| (i as f32 * 0.05).cos());
        let mut b = a;
        once.process(&mut AudioBlock::mono(&mut a));
        twice.process(&mut AudioBlock::mono(&mut b));
        assert_eq!(a, b);
    }
}
