//! The [`ProcessStage`] trait.
//!
//! A stage is one link of the chain: it owns its DSP state, pulls its
//! settings out of a [`ChainSnapshot`] at the top of every block and then
//! processes the block in place. Stages are stored as
//! `Vec<Box<dyn ProcessStage>>` in the graph, so the trait stays object-safe.
//!
//! Every method except [`prepare`](ProcessStage::prepare) runs on the audio
//! thread and must not allocate, lock or block.

use alloc::boxed::Box;
use alloc::vec;
use alloc::vec::Vec;

use ambit_core::{AudioBlock, ProcessSpec};

use crate::{ChainSnapshot, ChorusStage, FilterStage, ModulationStage, ReverbStage};

/// One stage of the processing chain.
pub trait ProcessStage: Send {
    /// Stable name, e.g. `"filter"`.
    fn name(&self) -> &'static str;

    /// Allocate for `spec` and clear all state. Not real-time safe.
    fn prepare(&mut self, spec: &ProcessSpec);

    /// Clear state (delay lines, filter memory, LFO phase) without reallocating.
    fn reset(&mut self);

    /// Copy this stage's settings out of `snapshot`.
    ///
    /// Applying the same snapshot twice is the same as applying it once.
    fn apply_snapshot(&mut self, snapshot: &ChainSnapshot);

    /// Whether [`process`](Self::process) would touch the block under the
    /// last applied snapshot.
    fn is_active(&self) -> bool;

    /// Process `block` in place. A no-op while inactive.
    fn process(&mut self, block: &mut AudioBlock<'_>);
}

/// Filter, modulation, chorus, reverb: the standard chain order.
pub fn default_stages() -> Vec<Box<dyn ProcessStage>> {
    vec![
        Box::new(FilterStage::new()),
        Box::new(ModulationStage::new()),
        Box::new(ChorusStage::new()),
        Box::new(ReverbStage::new()),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_order() {
        let names: Vec<_> = default_stages().iter().map(|s| s.name()).collect();
        assert_eq!(names, ["filter", "modulation", "chorus", "reverb"]);
    }

    #[test]
    fn all_bypassed_snapshot_deactivates_every_stage() {
        let mut stages = default_stages();
        let spec = ProcessSpec::new(48000.0, 128, 2);
        let snapshot = ChainSnapshot::all_bypassed();
        for stage in &mut stages {
            stage.prepare(&spec);
            stage.apply_snapshot(&snapshot);
            assert!(!stage.is_active(), "{} still active", stage.name());
        }
    }
}
