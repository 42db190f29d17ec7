//! Ambit Effects - the processing stages of the ambit chain
//!
//! Each stage wraps one or more [`ambit_core::Effect`]s behind the
//! [`ProcessStage`] trait so the graph can run them in order over an
//! [`AudioBlock`](ambit_core::AudioBlock):
//!
//! - [`FilterStage`] - switchable lowpass / bandpass / highpass SVF
//! - [`ModulationStage`] - gain then [`Phaser`], bypassed together
//! - [`ChorusStage`] - dual-voice modulated delay ([`Chorus`])
//! - [`ReverbStage`] - Freeverb tank with freeze ([`Freeverb`])
//!
//! Stage parameters arrive once per block as a [`ChainSnapshot`], a plain
//! `Copy` value the engine captures from its parameter store.
//!
//! ## Example
//!
//! ```rust
//! use ambit_core::{AudioBlock, ProcessSpec};
//! use ambit_effects::{ChainSnapshot, FilterMode, FilterStage, ProcessStage};
//!
//! let mut stage = FilterStage::new();
//! stage.prepare(&ProcessSpec::new(48000.0, 64, 1));
//!
//! let mut snapshot = ChainSnapshot::default();
//! snapshot.filter.mode = FilterMode::Lowpass;
//! snapshot.filter.cutoff_hz = 1000.0;
//! stage.apply_snapshot(&snapshot);
//!
//! let mut samples = [0.5f32; 64];
//! stage.process(&mut AudioBlock::mono(&mut samples));
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod chorus;
pub mod filter;
pub mod modulation;
pub mod phaser;
pub mod reverb;
pub mod snapshot;
pub mod stage;

pub use chorus::{Chorus, ChorusStage};
pub use filter::{FilterMode, FilterStage};
pub use modulation::ModulationStage;
pub use phaser::Phaser;
pub use reverb::{Freeverb, ReverbStage};
pub use snapshot::{ChainSnapshot, ChorusConfig, FilterConfig, ModulationConfig, ReverbConfig};
pub use stage::{ProcessStage, default_stages};
