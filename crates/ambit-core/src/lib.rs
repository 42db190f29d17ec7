//! Ambit Core - DSP primitives for the ambit effects chain
//!
//! This crate holds the building blocks the effect stages are made of, plus the
//! lock-free parameter store shared between a control thread and the audio thread.
//! Nothing in the audio path allocates.
//!
//! # Core Abstractions
//!
//! ## Effect System
//!
//! - [`Effect`] - Object-safe trait for per-sample audio processors
//! - [`EffectExt`] - Extension trait for effect chaining
//! - [`Chain`] - Zero-cost effect chain combinator
//!
//! ## Buffers
//!
//! - [`AudioBlock`] - Mono or stereo view over caller-owned sample buffers
//! - [`ProcessSpec`] - Sample rate, block size and channel count for `prepare`
//!
//! ## Parameters
//!
//! - [`ParamDescriptor`] - Range, default, step and display metadata
//! - [`ParameterStore`] - Atomic, typed-key parameter storage
//!
//! ## Filters and Delays
//!
//! - [`StateVariableFilter`] - TPT SVF with lowpass, highpass, bandpass, notch outputs
//! - [`CombFilter`] - Damped feedback comb for reverb tanks
//! - [`AllpassFilter`] - Schroeder allpass for diffusion
//! - [`InterpolatedDelay`] - Fractional delay line
//!
//! ## Modulation
//!
//! - [`Lfo`] - Sine low-frequency oscillator
//!
//! # no_std Support
//!
//! The DSP modules are `no_std` + `alloc`. Disable the default `std` feature:
//!
//! ```toml
//! [dependencies]
//! ambit-core = { version = "0.1", default-features = false }
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod allpass;
pub mod block;
pub mod comb;
pub mod delay;
pub mod effect;
pub mod gain;
pub mod lfo;
pub mod math;
pub mod param_info;
pub mod param_store;
pub mod svf;

pub use allpass::AllpassFilter;
pub use block::{AudioBlock, ProcessSpec, SpecProblem};
pub use comb::CombFilter;
pub use delay::InterpolatedDelay;
pub use effect::{Chain, Effect, EffectExt};
pub use gain::LinearGain;
pub use lfo::Lfo;
pub use math::{fast_tan, flush_denormal, linear_to_db, ms_to_samples, wet_dry_mix};
pub use param_info::{ParamDescriptor, ParamKind, ParamUnit};
pub use param_store::{ParameterStore, StoreKey};
pub use svf::{StateVariableFilter, SvfOutput};
