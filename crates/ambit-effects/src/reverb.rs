//! Freeverb reverb with freeze.
//!
//! Eight parallel damped combs feed four series allpasses per channel; the
//! right channel's delay lines are [`STEREO_SPREAD`] samples longer. Tunings
//! are the classic 44.1 kHz values scaled to the running sample rate.
//!
//! Control mapping (all controls normalized to `0..=1`):
//!
//! | control | internal value |
//! |---|---|
//! | room size | comb feedback `room * 0.28 + 0.7` |
//! | damping | comb damping `damping * 0.4` |
//! | wet level | `wet * 3`, split by width into `wet1`, `wet2` |
//! | dry level | `dry * 2` |
//!
//! Freeze sets comb feedback to 1, damping to 0 and mutes the tank input, so
//! whatever is circulating keeps circulating without loss.

use alloc::vec::Vec;

use ambit_core::{AllpassFilter, AudioBlock, CombFilter, Effect, ProcessSpec};

use crate::{ChainSnapshot, ProcessStage, ReverbConfig};

const COMB_TUNINGS_44K: [usize; 8] = [1116, 1188, 1277, 1356, 1422, 1491, 1557, 1617];
const ALLPASS_TUNINGS_44K: [usize; 4] = [556, 441, 341, 225];
const REFERENCE_RATE: f32 = 44100.0;

/// Extra delay, in samples at 44.1 kHz, on every right-channel line.
pub const STEREO_SPREAD: usize = 23;

const FIXED_GAIN: f32 = 0.015;
const WET_SCALE: f32 = 3.0;
const DRY_SCALE: f32 = 2.0;
const ROOM_SCALE: f32 = 0.28;
const ROOM_OFFSET: f32 = 0.7;
const DAMP_SCALE: f32 = 0.4;
const ALLPASS_FEEDBACK: f32 = 0.5;

fn scale_to_rate(samples: usize, sample_rate: f32) -> usize {
    (libm::roundf(samples as f32 * sample_rate / REFERENCE_RATE) as usize).max(1)
}

#[derive(Debug, Clone)]
struct Tank {
    combs: Vec<CombFilter>,
    allpasses: Vec<AllpassFilter>,
}

impl Tank {
    fn new(sample_rate: f32, spread: usize) -> Self {
        let combs = COMB_TUNINGS_44K
            .iter()
            .map(|&t| CombFilter::new(scale_to_rate(t + spread, sample_rate)))
            .collect();
        let allpasses = ALLPASS_TUNINGS_44K
            .iter()
            .map(|&t| {
                let mut ap = AllpassFilter::new(scale_to_rate(t + spread, sample_rate));
                ap.set_feedback(ALLPASS_FEEDBACK);
                ap
            })
            .collect();
        Self { combs, allpasses }
    }

    fn set_comb_params(&mut self, feedback: f32, damp: f32) {
        for comb in &mut self.combs {
            comb.set_feedback(feedback);
            comb.set_damp(damp);
        }
    }

    #[inline]
    fn process(&mut self, input: f32) -> f32 {
        let mut out = 0.0;
        for comb in &mut self.combs {
            out += comb.process(input);
        }
        for ap in &mut self.allpasses {
            out = ap.process(out);
        }
        out
    }

    fn energy(&self) -> f32 {
        self.combs.iter().map(CombFilter::energy).sum()
    }

    fn clear(&mut self) {
        self.combs.iter_mut().for_each(CombFilter::clear);
        self.allpasses.iter_mut().for_each(AllpassFilter::clear);
    }
}

/// Stereo Freeverb.
///
/// # Example
///
/// ```rust
/// use ambit_core::Effect;
/// use ambit_effects::Freeverb;
///
/// let mut reverb = Freeverb::new(48000.0);
/// reverb.set_room_size(0.8);
/// reverb.set_wet_level(0.3);
/// let (_l, _r) = reverb.process_stereo(1.0, 1.0);
/// ```
#[derive(Debug, Clone)]
pub struct Freeverb {
    left: Tank,
    right: Tank,
    room_size: f32,
    damping: f32,
    width: f32,
    wet_level: f32,
    dry_level: f32,
    freeze: bool,
    gain: f32,
    wet1: f32,
    wet2: f32,
    dry: f32,
}

impl Default for Freeverb {
    fn default() -> Self {
        Self::new(48000.0)
    }
}

impl Freeverb {
    /// Create a reverb with room 0.5, damping 0.5, width 1, wet 0.5, dry 0.5.
    pub fn new(sample_rate: f32) -> Self {
        let mut reverb = Self {
            left: Tank::new(sample_rate, 0),
            right: Tank::new(sample_rate, STEREO_SPREAD),
            room_size: 0.5,
            damping: 0.5,
            width: 1.0,
            wet_level: 0.5,
            dry_level: 0.5,
            freeze: false,
            gain: FIXED_GAIN,
            wet1: 0.0,
            wet2: 0.0,
            dry: 0.0,
        };
        reverb.update();
        reverb
    }

    /// Room size, `0..=1`.
    pub fn set_room_size(&mut self, room_size: f32) {
        self.room_size = room_size.clamp(0.0, 1.0);
        self.update();
    }

    /// Damping, `0..=1`.
    pub fn set_damping(&mut self, damping: f32) {
        self.damping = damping.clamp(0.0, 1.0);
        self.update();
    }

    /// Stereo width of the wet signal, `0..=1`.
    pub fn set_width(&mut self, width: f32) {
        self.width = width.clamp(0.0, 1.0);
        self.update();
    }

    /// Wet level, `0..=1`.
    pub fn set_wet_level(&mut self, wet: f32) {
        self.wet_level = wet.clamp(0.0, 1.0);
        self.update();
    }

    /// Dry level, `0..=1`.
    pub fn set_dry_level(&mut self, dry: f32) {
        self.dry_level = dry.clamp(0.0, 1.0);
        self.update();
    }

    /// Hold the current tail.
    pub fn set_freeze(&mut self, freeze: bool) {
        self.freeze = freeze;
        self.update();
    }

    /// Apply every control at once, recomputing coefficients a single time.
    pub fn set_config(&mut self, config: &ReverbConfig) {
        self.room_size = config.room_size.clamp(0.0, 1.0);
        self.damping = config.damping.clamp(0.0, 1.0);
        self.width = config.width.clamp(0.0, 1.0);
        self.wet_level = config.wet_level.clamp(0.0, 1.0);
        self.dry_level = config.dry_level.clamp(0.0, 1.0);
        self.freeze = config.freeze;
        self.update();
    }

    /// Energy circulating in the comb banks of both channels.
    pub fn tail_energy(&self) -> f32 {
        self.left.energy() + self.right.energy()
    }

    fn update(&mut self) {
        let wet = self.wet_level * WET_SCALE;
        self.wet1 = 0.5 * wet * (1.0 + self.width);
        self.wet2 = 0.5 * wet * (1.0 - self.width);
        self.dry = self.dry_level * DRY_SCALE;

        let (feedback, damp) = if self.freeze {
            self.gain = 0.0;
            (1.0, 0.0)
        } else {
            self.gain = FIXED_GAIN;
            (
                self.room_size * ROOM_SCALE + ROOM_OFFSET,
                self.damping * DAMP_SCALE,
            )
        };
        self.left.set_comb_params(feedback, damp);
        self.right.set_comb_params(feedback, damp);
    }
}

impl Effect for Freeverb {
    #[inline]
    fn process(&mut self, input: f32) -> f32 {
        let out = self.left.process(input * self.gain);
        out * self.wet1 + input * self.dry
    }

    #[inline]
    fn process_stereo(&mut self, left: f32, right: f32) -> (f32, f32) {
        let input = (left + right) * self.gain;
        let out_l = self.left.process(input);
        let out_r = self.right.process(input);
        (
            out_l * self.wet1 + out_r * self.wet2 + left * self.dry,
            out_r * self.wet1 + out_l * self.wet2 + right * self.dry,
        )
    }

    fn set_sample_rate(&mut self, sample_rate: f32) {
        self.left = Tank::new(sample_rate, 0);
        self.right = Tank::new(sample_rate, STEREO_SPREAD);
        self.update();
    }

    fn reset(&mut self) {
        self.left.clear();
        self.right.clear();
    }
}

/// Reverb stage with independent bypass and freeze.
#[derive(Debug, Clone)]
pub struct ReverbStage {
    reverb: Freeverb,
    config: ReverbConfig,
}

impl Default for ReverbStage {
    fn default() -> Self {
        Self::new()
    }
}

impl ReverbStage {
    /// Active reverb at default settings. Call [`ProcessStage::prepare`] before use.
    pub fn new() -> Self {
        let config = ReverbConfig::default();
        let mut reverb = Freeverb::default();
        reverb.set_config(&config);
        Self { reverb, config }
    }

    /// Set every reverb control for the next block.
    pub fn configure(
        &mut self,
        bypass: bool,
        room_size: f32,
        damping: f32,
        width: f32,
        wet_level: f32,
        dry_level: f32,
        freeze: bool,
    ) {
        let config = ReverbConfig {
            bypass,
            room_size,
            damping,
            width,
            wet_level,
            dry_level,
            freeze,
        };
        if config != self.config {
            self.reverb.set_config(&config);
            self.config = config;
        }
    }

    /// The wrapped reverb.
    pub fn reverb(&self) -> &Freeverb {
        &self.reverb
    }
}

impl ProcessStage for ReverbStage {
    fn name(&self) -> &'static str {
        "reverb"
    }

    fn prepare(&mut self, spec: &ProcessSpec) {
        self.reverb.set_sample_rate(spec.sample_rate);
        self.reverb.reset();
    }

    fn reset(&mut self) {
        self.reverb.reset();
    }

    fn apply_snapshot(&mut self, snapshot: &ChainSnapshot) {
        let r = &snapshot.reverb;
        self.configure(
            r.bypass,
            r.room_size,
            r.damping,
            r.width,
            r.wet_level,
            r.dry_level,
            r.freeze,
        );
    }

    fn is_active(&self) -> bool {
        !self.config.bypass
    }

    fn process(&mut self, block: &mut AudioBlock<'_>) {
        if self.is_active() {
            block.apply(&mut self.reverb);
        }
    }
}
