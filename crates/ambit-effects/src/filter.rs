//! Switchable filter stage.
//!
//! A single TPT state-variable filter per channel. The mode selects which SVF
//! output is used; switching modes keeps the integrator state, so a change
//! takes effect on the next block without a reset or crossfade.

use ambit_core::{AudioBlock, Effect, ProcessSpec, StateVariableFilter, SvfOutput};

use crate::{ChainSnapshot, ProcessStage};

/// Filter response selected by the filter menu.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum FilterMode {
    /// 12 dB/oct lowpass.
    Lowpass,
    /// Bandpass around the cutoff.
    Bandpass,
    /// 12 dB/oct highpass.
    Highpass,
    /// Stage is skipped.
    #[default]
    Disabled,
}

impl FilterMode {
    /// Map a 1-based menu index (1 lowpass, 2 bandpass, 3 highpass, 4 off).
    ///
    /// Anything outside `1..=3` disables the filter.
    ///
    /// ```rust
    /// use ambit_effects::FilterMode;
    ///
    /// assert_eq!(FilterMode::from_menu_index(2), FilterMode::Bandpass);
    /// assert_eq!(FilterMode::from_menu_index(4), FilterMode::Disabled);
    /// ```
    pub fn from_menu_index(index: u32) -> Self {
        match index {
            1 => FilterMode::Lowpass,
            2 => FilterMode::Bandpass,
            3 => FilterMode::Highpass,
            _ => FilterMode::Disabled,
        }
    }

    fn svf_output(self) -> Option<SvfOutput> {
        match self {
            FilterMode::Lowpass => Some(SvfOutput::Lowpass),
            FilterMode::Bandpass => Some(SvfOutput::Bandpass),
            FilterMode::Highpass => Some(SvfOutput::Highpass),
            FilterMode::Disabled => None,
        }
    }
}

/// Left/right SVF pair.
#[derive(Debug, Clone, Default)]
struct StereoSvf {
    left: StateVariableFilter,
    right: StateVariableFilter,
}

impl Effect for StereoSvf {
    #[inline]
    fn process(&mut self, input: f32) -> f32 {
        self.left.process(input)
    }

    #[inline]
    fn process_stereo(&mut self, left: f32, right: f32) -> (f32, f32) {
        (self.left.process(left), self.right.process(right))
    }

    fn set_sample_rate(&mut self, sample_rate: f32) {
        self.left.set_sample_rate(sample_rate);
        self.right.set_sample_rate(sample_rate);
    }

    fn reset(&mut self) {
        self.left.reset();
        self.right.reset();
    }
}

/// Filter stage: one switchable SVF per channel.
#[derive(Debug, Clone, Default)]
pub struct FilterStage {
    svf: StereoSvf,
    mode: FilterMode,
}

impl FilterStage {
    /// Disabled filter at 48 kHz. Call [`ProcessStage::prepare`] before use.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set mode and cutoff for the next block.
    pub fn configure(&mut self, mode: FilterMode, cutoff_hz: f32) {
        self.mode = mode;
        if let Some(output) = mode.svf_output() {
            for svf in [&mut self.svf.left, &mut self.svf.right] {
                svf.set_output_type(output);
                svf.set_cutoff(cutoff_hz);
            }
        }
    }

    /// Current mode.
    pub fn mode(&self) -> FilterMode {
        self.mode
    }

    /// Current cutoff in Hz.
    pub fn cutoff_hz(&self) -> f32 {
        self.svf.left.cutoff()
    }
}

impl ProcessStage for FilterStage {
    fn name(&self) -> &'static str {
        "filter"
    }

    fn prepare(&mut self, spec: &ProcessSpec) {
        self.svf.set_sample_rate(spec.sample_rate);
        self.svf.reset();
    }

    fn reset(&mut self) {
        self.svf.reset();
    }

    fn apply_snapshot(&mut self, snapshot: &ChainSnapshot) {
        self.configure(snapshot.filter.mode, snapshot.filter.cutoff_hz);
    }

    fn is_active(&self) -> bool {
        self.mode != FilterMode::Disabled
    }

    fn process(&mut self, block: &mut AudioBlock<'_>) {
        if self.is_active() {
            block.apply(&mut self.svf);
        }
    }
}
