//! Operation counters.
//!
//! Counted operations take a `&mut impl Metrics` sink through their `_with`
//! variant. Passing `&mut ()` discards the counts; passing a [`Counters`]
//! accumulates them. Counts never influence results.

/// Kinds of work that can be counted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Counter {
    /// Pixel buffer reads or writes.
    PixelAccess,
    /// Steps of the fused prefix-sum / write-back scan in the blur filter.
    BlurIteration,
    /// Pixel comparisons and rejected anchors during subimage search.
    Comparison,
}

/// Sink for operation counts.
pub trait Metrics {
    /// Record `n` units of `counter`.
    fn add(&mut self, counter: Counter, n: u64);
}

impl Metrics for () {
    #[inline]
    fn add(&mut self, _counter: Counter, _n: u64) {}
}

/// Plain accumulating counters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Counters {
    pub pixel_accesses: u64,
    pub blur_iterations: u64,
    pub comparisons: u64,
}

impl Counters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current value of `counter`.
    pub fn get(&self, counter: Counter) -> u64 {
        match counter {
            Counter::PixelAccess => self.pixel_accesses,
            Counter::BlurIteration => self.blur_iterations,
            Counter::Comparison => self.comparisons,
        }
    }

    /// Zero every counter.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

impl Metrics for Counters {
    #[inline]
    fn add(&mut self, counter: Counter, n: u64) {
        match counter {
            Counter::PixelAccess => self.pixel_accesses += n,
            Counter::BlurIteration => self.blur_iterations += n,
            Counter::Comparison => self.comparisons += n,
        }
    }
}
