//! [`Engine`]: the store and the graph behind one handle.
//!
//! The control side keeps an `Arc` to the store (from [`Engine::params`]) and
//! writes through it or through [`Engine::set_by_key`]; the audio side owns
//! the `Engine` and calls [`Engine::process`].

use std::sync::Arc;

use ambit_core::AudioBlock;
use ambit_effects::ProcessStage;

use crate::{
    EngineConfig, EngineError, EngineParams, Param, ProcessGraph, Result, new_store,
    parse_param_value,
};

/// Parameter store plus process graph.
#[derive(Debug)]
pub struct Engine {
    params: Arc<EngineParams>,
    graph: ProcessGraph,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine {
    /// Engine with every parameter at its default and the standard stage order.
    ///
    /// Not prepared; call [`prepare`](Self::prepare) before processing.
    pub fn new() -> Self {
        let params = Arc::new(new_store());
        let graph = ProcessGraph::new(Arc::clone(&params));
        tracing::info!(params = Param::ALL.len(), stages = ?graph.stage_names(), "engine created");
        Self { params, graph }
    }

    /// Engine running `stages` in the given order.
    pub fn with_stages(stages: Vec<Box<dyn ProcessStage>>) -> Self {
        let params = Arc::new(new_store());
        let graph = ProcessGraph::with_stages(Arc::clone(&params), stages);
        Self { params, graph }
    }

    /// Build, apply the config's parameter overrides, and prepare.
    ///
    /// # Errors
    ///
    /// Any unknown key or unreadable value in `[params]`, or an invalid
    /// stream format. Nothing is applied when an override is bad.
    pub fn from_config(config: &EngineConfig) -> Result<Self> {
        let overrides = config.resolved_params()?;
        let mut engine = Self::new();
        for (param, value) in overrides {
            let stored = engine.params.set(param, value);
            tracing::debug!(%param, value, stored, "config override");
        }
        let sample_rate = config.sample_rate as f32;
        engine.prepare(sample_rate, config.block_size, config.channels)?;
        Ok(engine)
    }

    /// Shared handle to the parameter store.
    pub fn params(&self) -> Arc<EngineParams> {
        Arc::clone(&self.params)
    }

    /// Write a parameter by key. Returns the stored (clamped) value.
    pub fn set(&self, param: Param, value: f32) -> f32 {
        self.params.set(param, value)
    }

    /// Current value of a parameter.
    pub fn get(&self, param: Param) -> f32 {
        self.params.get(param)
    }

    /// Write a parameter by string key and textual value.
    ///
    /// `value` accepts everything [`parse_param_value`] does. Returns the
    /// stored (clamped) value.
    ///
    /// # Errors
    ///
    /// [`EngineError::UnknownParameter`] for an unknown key,
    /// [`EngineError::InvalidValue`] for an unreadable value.
    pub fn set_by_key(&self, key: &str, value: &str) -> Result<f32> {
        let param = Param::from_key(key).ok_or_else(|| {
            tracing::warn!(key, "unknown parameter");
            EngineError::UnknownParameter(key.to_owned())
        })?;
        let raw = parse_param_value(param, value)?;
        let stored = self.params.set(param, raw);
        if stored != raw {
            tracing::debug!(%param, raw, stored, "value clamped");
        }
        Ok(stored)
    }

    /// See [`ProcessGraph::prepare`].
    ///
    /// # Errors
    ///
    /// [`EngineError::InvalidSpec`] for an unusable format.
    pub fn prepare(
        &mut self,
        sample_rate: f32,
        max_block_size: usize,
        num_channels: usize,
    ) -> Result<()> {
        self.graph.prepare(sample_rate, max_block_size, num_channels)
    }

    /// See [`ProcessGraph::process`].
    #[inline]
    pub fn process(&mut self, block: &mut AudioBlock<'_>) {
        self.graph.process(block);
    }

    /// Clear all stage state.
    pub fn reset(&mut self) {
        self.graph.reset();
    }

    /// The graph.
    pub fn graph(&self) -> &ProcessGraph {
        &self.graph
    }

    /// See [`ProcessGraph::tail_length_seconds`].
    pub fn tail_length_seconds(&self) -> f64 {
        self.graph.tail_length_seconds()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ParamValue;

    #[test]
    fn set_by_key_clamps() {
        let engine = Engine::new();
        assert_eq!(engine.set_by_key("cutoff", "50kHz").unwrap(), 20000.0);
        assert_eq!(engine.get(Param::Cutoff), 20000.0);
        assert_eq!(engine.set_by_key("GAIN", "-1").unwrap(), 0.0);
    }

    #[test]
    fn set_by_key_rejects_unknown() {
        let engine = Engine::new();
        assert!(matches!(
            engine.set_by_key("VOLUME", "1"),
            Err(EngineError::UnknownParameter(_))
        ));
        assert!(matches!(
            engine.set_by_key("CUTOFF", "bright"),
            Err(EngineError::InvalidValue { key: "CUTOFF", .. })
        ));
    }

    #[test]
    fn from_config_applies_overrides() {
        let mut config = EngineConfig::default();
        config.channels = 1;
        config.set_param("FILTERMENU", ParamValue::Text("highpass".into()));
        config.set_param("FEEDBACK", ParamValue::Number(3.0));
        let engine = Engine::from_config(&config).unwrap();
        assert_eq!(engine.get(Param::FilterMenu), 3.0);
        assert_eq!(engine.get(Param::Feedback), 1.0);
        assert_eq!(engine.graph().spec().map(|s| s.num_channels), Some(1));
    }

    #[test]
    fn from_config_rejects_bad_format() {
        let config = EngineConfig {
            channels: 6,
            ..EngineConfig::default()
        };
        assert!(matches!(
            Engine::from_config(&config),
            Err(EngineError::InvalidSpec(_))
        ));
    }

    #[test]
    fn params_handle_is_shared() {
        let engine = Engine::new();
        let handle = engine.params();
        handle.set(Param::Cutoff, 1234.0);
        assert_eq!(engine.get(Param::Cutoff), 1234.0);
    }
}
