//! Lock-free parameter storage shared between a control thread and the audio thread.
//!
//! Each declared parameter owns one `AtomicU32` holding its `f32` bits. The
//! control side calls [`ParameterStore::set`] (Release), the audio side calls
//! [`ParameterStore::get`] (Acquire). A reader sees either the old or the new
//! value, never a mix.
//!
//! The schema is fixed once the store is shared: [`declare`](ParameterStore::declare)
//! takes `&mut self`, so it can only run before the store goes behind an `Arc`.
//!
//! # Example
//!
//! ```rust
//! use ambit_core::{ParamDescriptor, ParamUnit, ParameterStore, StoreKey};
//!
//! #[derive(Clone, Copy, Debug)]
//! enum Key { Level }
//!
//! impl StoreKey for Key {
//!     const COUNT: usize = 1;
//!     fn index(self) -> usize { self as usize }
//! }
//!
//! let mut store = ParameterStore::<Key>::new();
//! store.declare(Key::Level, ParamDescriptor::float("Level", "Lvl", ParamUnit::None, 0.0, 2.0, 1.0));
//! assert_eq!(store.set(Key::Level, 9.0), 2.0);
//! assert_eq!(store.get(Key::Level), 2.0);
//! ```

use alloc::vec::Vec;
use core::fmt::Debug;
use core::marker::PhantomData;
use core::sync::atomic::{AtomicU32, Ordering};

use crate::ParamDescriptor;

/// A closed set of parameter keys with dense indices `0..COUNT`.
pub trait StoreKey: Copy + Debug + 'static {
    /// Number of keys.
    const COUNT: usize;

    /// Dense index in `0..COUNT`.
    fn index(self) -> usize;
}

struct Slot {
    descriptor: ParamDescriptor,
    value: AtomicU32,
}

/// Atomic per-key parameter store.
pub struct ParameterStore<K: StoreKey> {
    slots: Vec<Option<Slot>>,
    _key: PhantomData<fn() -> K>,
}

impl<K: StoreKey> Default for ParameterStore<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: StoreKey> ParameterStore<K> {
    /// Empty store with room for every key.
    pub fn new() -> Self {
        let mut slots = Vec::with_capacity(K::COUNT);
        slots.resize_with(K::COUNT, || None);
        Self {
            slots,
            _key: PhantomData,
        }
    }

    /// Register `key` with its schema; the value starts at `descriptor.default`.
    ///
    /// # Panics
    ///
    /// Panics if `key` was already declared, or its default lies outside `[min, max]`.
    pub fn declare(&mut self, key: K, descriptor: ParamDescriptor) {
        let slot = &mut self.slots[key.index()];
        assert!(slot.is_none(), "parameter {key:?} declared twice");
        assert!(
            descriptor.min <= descriptor.default && descriptor.default <= descriptor.max,
            "parameter {key:?} default {} outside [{}, {}]",
            descriptor.default,
            descriptor.min,
            descriptor.max
        );

        #[cfg(feature = "tracing")]
        tracing::trace!(?key, name = descriptor.name, default = descriptor.default, "declare");

        *slot = Some(Slot {
            descriptor,
            value: AtomicU32::new(descriptor.default.to_bits()),
        });
    }

    /// Store `value` clamped and quantized to the declared schema, returning
    /// what was stored. NaN is ignored and the current value is returned.
    ///
    /// Undeclared keys are a programming error: debug builds assert, release
    /// builds drop the write and return `0.0`.
    pub fn set(&self, key: K, value: f32) -> f32 {
        let Some(slot) = self.slot(key) else {
            return 0.0;
        };
        if value.is_nan() {
            return f32::from_bits(slot.value.load(Ordering::Acquire));
        }
        let stored = slot.descriptor.quantize(value);
        slot.value.store(stored.to_bits(), Ordering::Release);
        stored
    }

    /// Current value of `key`. Undeclared keys assert in debug builds and read `0.0`.
    #[inline]
    pub fn get(&self, key: K) -> f32 {
        self.slot(key)
            .map_or(0.0, |s| f32::from_bits(s.value.load(Ordering::Acquire)))
    }

    /// Current value of `key` read as a boolean (`>= 0.5`).
    #[inline]
    pub fn get_bool(&self, key: K) -> bool {
        self.get(key) >= 0.5
    }

    /// Number of declared keys.
    pub fn declared_count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    #[inline]
    fn slot(&self, key: K) -> Option<&Slot> {
        let slot = self.slots[key.index()].as_ref();
        debug_assert!(slot.is_some(), "parameter {key:?} used before declare");
        slot
    }
}

impl<K: StoreKey> Debug for ParameterStore<K> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let mut map = f.debug_map();
        for slot in self.slots.iter().flatten() {
            map.entry(
                &slot.descriptor.name,
                &f32::from_bits(slot.value.load(Ordering::Relaxed)),
            );
        }
        map.finish()
    }
}
