//! Circular delay line with linear interpolation.
//!
//! A delay of 0 reads the most recently written sample; the longest readable
//! delay is `capacity - 1`. Reading `capacity - 1` returns the slot that the
//! next [`write`](InterpolatedDelay::write) overwrites, which is the shape the
//! comb and allpass filters rely on.

use alloc::vec;
use alloc::vec::Vec;

/// Heap-allocated fractional delay line.
///
/// # Example
///
/// ```rust
/// use ambit_core::InterpolatedDelay;
///
/// let mut delay = InterpolatedDelay::new(8);
/// delay.write(1.0);
/// delay.write(0.0);
/// assert_eq!(delay.read(1.0), 1.0);
/// assert_eq!(delay.read(0.5), 0.5);
/// ```
#[derive(Debug, Clone)]
pub struct InterpolatedDelay {
    buffer: Vec<f32>,
    write_pos: usize,
}

impl InterpolatedDelay {
    /// Allocate a delay line holding `capacity` samples.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "delay capacity must be > 0");
        Self {
            buffer: vec![0.0; capacity],
            write_pos: 0,
        }
    }

    /// Allocate enough room for `max_seconds` of delay at `sample_rate`.
    pub fn from_time(sample_rate: f32, max_seconds: f32) -> Self {
        Self::new((sample_rate * max_seconds) as usize + 2)
    }

    /// Read `delay_samples` behind the last write, clamped to `capacity - 1`.
    #[inline]
    pub fn read(&self, delay_samples: f32) -> f32 {
        let len = self.buffer.len();
        let delay = delay_samples.clamp(0.0, (len - 1) as f32);
        let delay_int = delay as usize;
        let frac = delay - delay_int as f32;

        let read_pos = (self.write_pos + len - delay_int - 1) % len;
        let a = self.buffer[read_pos];
        if frac == 0.0 {
            return a;
        }
        let b = self.buffer[(read_pos + len - 1) % len];
        a + (b - a) * frac
    }

    /// Push one sample.
    #[inline]
    pub fn write(&mut self, sample: f32) {
        self.buffer[self.write_pos] = sample;
        self.write_pos = (self.write_pos + 1) % self.buffer.len();
    }

    /// Zero the buffer.
    pub fn clear(&mut self) {
        self.buffer.fill(0.0);
        self.write_pos = 0;
    }

    /// Buffer length in samples.
    pub fn capacity(&self) -> usize {
        self.buffer.len()
    }

    /// Raw buffer contents, in storage order.
    pub fn as_slice(&self) -> &[f32] {
        &self.buffer
    }
}
