//! Parameter schema, per-block snapshot and process graph for the ambit chain.
//!
//! This crate ties the DSP stages of `ambit-effects` to a shared,
//! lock-free parameter store:
//!
//! - [`Param`]: the nineteen controls, their keys and declared ranges
//! - [`snapshot::capture`]: store values to stage configurations, once per block
//! - [`ProcessGraph`]: ordered stages, bypass resolution, `prepare`/`process`
//! - [`Engine`]: store and graph behind one handle, string-keyed writes
//! - [`EngineConfig`]: stream format and parameter overrides from TOML
//!
//! # Threading
//!
//! A control thread writes through an `Arc<EngineParams>`; the audio thread
//! owns the graph. Writes are single atomic stores, and the graph reads each
//! parameter once per block, so a change made mid-block lands on the next one.
//!
//! ```rust
//! use ambit_core::AudioBlock;
//! use ambit_engine::{Engine, Param};
//!
//! let mut engine = Engine::new();
//! engine.prepare(48000.0, 512, 2).unwrap();
//! engine.set_by_key("FILTERMENU", "lowpass").unwrap();
//! engine.set(Param::Cutoff, 1000.0);
//!
//! let mut left = vec![0.0f32; 512];
//! let mut right = vec![0.0f32; 512];
//! engine.process(&mut AudioBlock::stereo(&mut left, &mut right));
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod graph;
pub mod params;
pub mod snapshot;
pub mod value;

pub use config::{EngineConfig, ParamValue};
pub use engine::Engine;
pub use error::{EngineError, Result};
pub use graph::ProcessGraph;
pub use params::{EngineParams, FILTER_MENU_LABELS, PHASER_MENU_LABELS, Param, new_store};
pub use value::parse_param_value;

pub use ambit_effects::ChainSnapshot;
