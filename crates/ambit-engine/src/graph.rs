//! The process graph: an ordered list of stages fed by one snapshot per block.
//!
//! [`ProcessGraph`] owns its stages as `Vec<Box<dyn ProcessStage>>` and reads
//! a shared [`EngineParams`] store. At the top of every block it captures the
//! store into a [`ChainSnapshot`], hands it to each stage, then threads the
//! block through the stages in order. Stages whose snapshot bypasses them
//! leave the block untouched.
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use ambit_core::AudioBlock;
//! use ambit_engine::{Param, ProcessGraph, new_store};
//!
//! let params = Arc::new(new_store());
//! let mut graph = ProcessGraph::new(Arc::clone(&params));
//! graph.prepare(48000.0, 256, 2).unwrap();
//!
//! params.set(Param::FilterMenu, 1.0);
//! let mut left = vec![0.0f32; 256];
//! let mut right = vec![0.0f32; 256];
//! graph.process(&mut AudioBlock::stereo(&mut left, &mut right));
//! ```

use std::sync::Arc;

use ambit_core::{AudioBlock, ProcessSpec};
use ambit_effects::{ProcessStage, default_stages};

use crate::{EngineParams, Result, snapshot};

/// Fixed-order chain of stages driven by a shared parameter store.
pub struct ProcessGraph {
    params: Arc<EngineParams>,
    stages: Vec<Box<dyn ProcessStage>>,
    spec: Option<ProcessSpec>,
}

impl ProcessGraph {
    /// Graph with the standard stage order: filter, modulation, chorus, reverb.
    pub fn new(params: Arc<EngineParams>) -> Self {
        Self::with_stages(params, default_stages())
    }

    /// Graph running `stages` in the given order.
    pub fn with_stages(params: Arc<EngineParams>, stages: Vec<Box<dyn ProcessStage>>) -> Self {
        tracing::debug!(
            "graph: {} stages [{}]",
            stages.len(),
            stages.iter().map(|s| s.name()).collect::<Vec<_>>().join(" → ")
        );
        Self {
            params,
            stages,
            spec: None,
        }
    }

    /// Validate the processing format and reset every stage to silence.
    ///
    /// Call before the first [`process`](Self::process) and again whenever the
    /// sample rate, maximum block size or channel count change. Allocates.
    ///
    /// # Errors
    ///
    /// [`EngineError::InvalidSpec`](crate::EngineError::InvalidSpec) if any
    /// argument is out of range. The graph keeps its previous format.
    pub fn prepare(
        &mut self,
        sample_rate: f32,
        max_block_size: usize,
        num_channels: usize,
    ) -> Result<()> {
        let spec = ProcessSpec::new(sample_rate, max_block_size, num_channels);
        spec.validate()?;
        for stage in &mut self.stages {
            stage.prepare(&spec);
        }
        self.spec = Some(spec);
        tracing::info!(
            sample_rate,
            max_block_size,
            num_channels,
            "graph prepared"
        );
        Ok(())
    }

    /// Process one block in place.
    ///
    /// Real-time safe: no allocation, locking or I/O. Parameter changes made
    /// while a block is running show up in the next block.
    ///
    /// The block must match the prepared channel count and be no longer than
    /// the prepared maximum block size. Calling this before
    /// [`prepare`](Self::prepare) is a programming error.
    pub fn process(&mut self, block: &mut AudioBlock<'_>) {
        debug_assert!(self.spec.is_some(), "process called before prepare");
        let Some(spec) = self.spec else {
            return;
        };
        debug_assert_eq!(
            block.num_channels(),
            spec.num_channels,
            "block channel count differs from prepare"
        );
        debug_assert!(
            block.len() <= spec.max_block_size,
            "block of {} samples exceeds prepared maximum {}",
            block.len(),
            spec.max_block_size
        );

        let snapshot = snapshot::capture(&self.params, &spec);
        for stage in &mut self.stages {
            stage.apply_snapshot(&snapshot);
            stage.process(block);
        }
    }

    /// Clear all stage state without changing the format.
    pub fn reset(&mut self) {
        for stage in &mut self.stages {
            stage.reset();
        }
    }

    /// Stage names in processing order.
    pub fn stage_names(&self) -> Vec<&'static str> {
        self.stages.iter().map(|s| s.name()).collect()
    }

    /// Format from the last successful [`prepare`](Self::prepare).
    pub fn spec(&self) -> Option<ProcessSpec> {
        self.spec
    }

    /// The shared parameter store.
    pub fn params(&self) -> &Arc<EngineParams> {
        &self.params
    }

    /// Reverb tail reported to a host. The chain reports none.
    pub fn tail_length_seconds(&self) -> f64 {
        0.0
    }
}

impl std::fmt::Debug for ProcessGraph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProcessGraph")
            .field("stages", &self.stage_names())
            .field("spec", &self.spec)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{EngineError, Param, new_store};
    use ambit_effects::{FilterStage, ReverbStage};

    fn graph() -> (Arc<EngineParams>, ProcessGraph) {
        let params = Arc::new(new_store());
        let graph = ProcessGraph::new(Arc::clone(&params));
        (params, graph)
    }

    #[test]
    fn standard_order() {
        let (_, g) = graph();
        assert_eq!(g.stage_names(), ["filter", "modulation", "chorus", "reverb"]);
    }

    #[test]
    fn custom_order() {
        let params = Arc::new(new_store());
        let g = ProcessGraph::with_stages(
            params,
            vec![Box::new(ReverbStage::new()), Box::new(FilterStage::new())],
        );
        assert_eq!(g.stage_names(), ["reverb", "filter"]);
    }

    #[test]
    fn prepare_rejects_bad_formats() {
        let (_, mut g) = graph();
        assert!(matches!(
            g.prepare(0.0, 512, 2),
            Err(EngineError::InvalidSpec(_))
        ));
        assert!(g.prepare(48000.0, 0, 2).is_err());
        assert!(g.prepare(48000.0, 512, 3).is_err());
        assert!(g.spec().is_none());
        g.prepare(44100.0, 64, 1).unwrap();
        assert_eq!(g.spec().map(|s| s.num_channels), Some(1));
    }

    #[test]
    fn tail_is_zero() {
        let (_, g) = graph();
        assert_eq!(g.tail_length_seconds(), 0.0);
    }

    #[test]
    fn store_change_lands_on_next_block() {
        let (params, mut g) = graph();
        params.set(Param::ReverbBypass, 1.0);
        g.prepare(48000.0, 64, 1).unwrap();

        let input: Vec<f32> = (0..64).map(|i| (i as f32 * 0.3).sin()).collect();
        let mut block = input.clone();
        g.process(&mut AudioBlock::mono(&mut block));
        assert_eq!(block, input);

        params.set(Param::PhaserMenu, 1.0);
        params.set(Param::Gain, 0.5);
        let mut block = input.clone();
        g.process(&mut AudioBlock::mono(&mut block));
        assert_ne!(block, input);
    }
}
