//! The [`Effect`] trait and static chaining.
//!
//! An `Effect` is a single-sample processor with sample-rate dependent state.
//! Stereo material is handled by [`Effect::process_stereo`], which by default
//! runs the same processor over both channels. Processors with cross-channel
//! state (the reverb, the stereo phaser) override it.
//!
//! Every method is allocation-free and safe to call on the audio thread.

/// Per-sample audio processor.
///
/// # Example
///
/// ```rust
/// use ambit_core::Effect;
///
/// struct Halve;
///
/// impl Effect for Halve {
///     fn process(&mut self, input: f32) -> f32 {
///         input * 0.5
///     }
///     fn set_sample_rate(&mut self, _sample_rate: f32) {}
///     fn reset(&mut self) {}
/// }
///
/// let mut h = Halve;
/// assert_eq!(h.process(1.0), 0.5);
/// ```
pub trait Effect {
    /// Process a single mono sample.
    fn process(&mut self, input: f32) -> f32;

    /// Process a stereo frame.
    ///
    /// The default feeds each channel through [`process`](Self::process) in turn,
    /// which is only correct for stateless processors. Stateful effects used on
    /// stereo material must override this.
    fn process_stereo(&mut self, left: f32, right: f32) -> (f32, f32) {
        (self.process(left), self.process(right))
    }

    /// Process a block of samples from `input` into `output`.
    ///
    /// Both buffers must have the same length.
    fn process_block(&mut self, input: &[f32], output: &mut [f32]) {
        debug_assert_eq!(
            input.len(),
            output.len(),
            "Input and output buffers must have same length"
        );
        for (inp, out) in input.iter().zip(output.iter_mut()) {
            *out = self.process(*inp);
        }
    }

    /// Process a block of samples in place.
    fn process_block_inplace(&mut self, buffer: &mut [f32]) {
        for sample in buffer.iter_mut() {
            *sample = self.process(*sample);
        }
    }

    /// Process a pair of stereo buffers in place.
    ///
    /// Both buffers must have the same length.
    fn process_block_stereo_inplace(&mut self, left: &mut [f32], right: &mut [f32]) {
        debug_assert_eq!(left.len(), right.len(), "Channel buffers must match");
        for (l, r) in left.iter_mut().zip(right.iter_mut()) {
            let (out_l, out_r) = self.process_stereo(*l, *r);
            *l = out_l;
            *r = out_r;
        }
    }

    /// Recalculate sample-rate dependent coefficients.
    fn set_sample_rate(&mut self, sample_rate: f32);

    /// Clear internal state (delay lines, filter memory) without touching parameters.
    fn reset(&mut self);
}

/// Extension trait for chaining effects with static dispatch.
pub trait EffectExt: Effect + Sized {
    /// Chain this effect with another. The output of `self` feeds `next`.
    fn chain<E: Effect>(self, next: E) -> Chain<Self, E> {
        Chain {
            first: self,
            second: next,
        }
    }
}

impl<T: Effect> EffectExt for T {}

/// Two effects in series, created by [`EffectExt::chain`].
pub struct Chain<A, B> {
    first: A,
    second: B,
}

impl<A: Effect, B: Effect> Effect for Chain<A, B> {
    #[inline]
    fn process(&mut self, input: f32) -> f32 {
        let mid = self.first.process(input);
        self.second.process(mid)
    }

    #[inline]
    fn process_stereo(&mut self, left: f32, right: f32) -> (f32, f32) {
        let (l, r) = self.first.process_stereo(left, right);
        self.second.process_stereo(l, r)
    }

    fn process_block(&mut self, input: &[f32], output: &mut [f32]) {
        self.first.process_block(input, output);
        self.second.process_block_inplace(output);
    }

    fn set_sample_rate(&mut self, sample_rate: f32) {
        self.first.set_sample_rate(sample_rate);
        self.second.set_sample_rate(sample_rate);
    }

    fn reset(&mut self) {
        self.first.reset();
        self.second.reset();
    }
}

impl<A, B> Chain<A, B> {
    /// Reference to the first effect.
    pub fn first(&self) -> &A {
        &self.first
    }

    /// Mutable reference to the first effect.
    pub fn first_mut(&mut self) -> &mut A {
        &mut self.first
    }

    /// Reference to the second effect.
    pub fn second(&self) -> &B {
        &self.second
    }

    /// Mutable reference to the second effect.
    pub fn second_mut(&mut self) -> &mut B {
        &mut self.second
    }
}
