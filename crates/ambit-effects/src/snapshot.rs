//! Per-block stage configurations.
//!
//! A [`ChainSnapshot`] holds everything the stages read for one block. The
//! engine builds it from the parameter store before each `process` call; the
//! stages only ever see this copy, so a control-thread write that lands
//! mid-block takes effect on the next block.
//!
//! `Default` mirrors the default parameter values.

use crate::FilterMode;

/// Filter stage settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FilterConfig {
    /// Response, or [`FilterMode::Disabled`].
    pub mode: FilterMode,
    /// Cutoff in Hz, already limited to `[20, 0.49 * sample_rate]`.
    pub cutoff_hz: f32,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            mode: FilterMode::Disabled,
            cutoff_hz: 600.0,
        }
    }
}

/// Gain + phaser settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModulationConfig {
    /// Skip both sub-stages.
    pub bypass: bool,
    /// Linear gain, `0..=2`.
    pub gain: f32,
    /// Phaser LFO rate in Hz.
    pub rate_hz: f32,
    /// Phaser sweep depth, `0..=1`.
    pub depth: f32,
}

impl Default for ModulationConfig {
    fn default() -> Self {
        Self {
            bypass: true,
            gain: 1.0,
            rate_hz: 1.0,
            depth: 0.5,
        }
    }
}

/// Chorus settings. The chorus follows the modulation bypass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChorusConfig {
    /// Skip the stage.
    pub bypass: bool,
    /// LFO rate in Hz.
    pub rate_hz: f32,
    /// Sweep depth, `0..=1`.
    pub depth: f32,
    /// Centre of the delay sweep in ms.
    pub centre_delay_ms: f32,
    /// Signed feedback, `-1..=1`.
    pub feedback: f32,
    /// Wet/dry mix, `0..=1`.
    pub mix: f32,
}

impl Default for ChorusConfig {
    fn default() -> Self {
        Self {
            bypass: true,
            rate_hz: 1.0,
            depth: 0.5,
            centre_delay_ms: 10.0,
            feedback: 0.0,
            mix: 0.5,
        }
    }
}

/// Reverb settings. Every continuous control is normalized to `0..=1`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReverbConfig {
    /// Skip the stage.
    pub bypass: bool,
    /// Room size.
    pub room_size: f32,
    /// High-frequency damping in the tank.
    pub damping: f32,
    /// Stereo width of the wet signal.
    pub width: f32,
    /// Wet level.
    pub wet_level: f32,
    /// Dry level.
    pub dry_level: f32,
    /// Hold the tail indefinitely.
    pub freeze: bool,
}

impl Default for ReverbConfig {
    fn default() -> Self {
        Self {
            bypass: false,
            room_size: 0.5,
            damping: 0.5,
            width: 1.0,
            wet_level: 0.5,
            dry_level: 0.5,
            freeze: false,
        }
    }
}

/// Everything the stages read for one block.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ChainSnapshot {
    /// Filter stage.
    pub filter: FilterConfig,
    /// Gain + phaser stage.
    pub modulation: ModulationConfig,
    /// Chorus stage.
    pub chorus: ChorusConfig,
    /// Reverb stage.
    pub reverb: ReverbConfig,
}

impl ChainSnapshot {
    /// Defaults with every stage switched off.
    pub fn all_bypassed() -> Self {
        let mut s = Self::default();
        s.filter.mode = FilterMode::Disabled;
        s.modulation.bypass = true;
        s.chorus.bypass = true;
        s.reverb.bypass = true;
        s
    }
}
