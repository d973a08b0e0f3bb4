//! Fixed-capacity circular buffer with running moments
//!
//! One slot is always left unused so that `head == tail` means empty and
//! `(head + 1) % capacity == tail` means full. A ring of capacity `C`
//! therefore holds at most `C - 1` samples.

use log::trace;

use super::{allocate_slots, bounds_of};
use crate::statistics::MomentAccumulator;
use crate::traits::{StatsError, Summary, Window};

#[cfg(feature = "std")]
use std::vec::Vec;

#[cfg(not(feature = "std"))]
extern crate alloc;
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

/// Circular buffer of `f64` samples summarized by a [`MomentAccumulator`]
///
/// # Eviction
///
/// [`put`](Self::put) on a full ring overwrites the oldest sample without
/// removing it from the accumulator, so the statistics keep describing it.
/// Use [`get`](Self::get) before `put` whenever the ring serves as a sliding
/// window; `get` is the only removal that keeps the accumulator exact.
///
/// # Example
///
/// ```
/// use rollstats::buffers::RingBuffer;
/// use rollstats::traits::Summary;
///
/// let mut ring = RingBuffer::with_capacity(3)?;
/// assert!(ring.is_empty());
///
/// ring.put(10.0);
/// ring.put(20.0);
/// assert!(ring.is_full());
///
/// // FIFO removal keeps the statistics exact
/// assert_eq!(ring.get()?, 10.0);
/// ring.put(30.0);
/// assert_eq!(ring.mean(), 25.0);
/// # Ok::<(), rollstats::traits::StatsError>(())
/// ```
#[derive(Clone, Debug)]
pub struct RingBuffer {
    /// Sample slots, `capacity` long
    buffer: Vec<f64>,
    /// Next slot to write
    head: usize,
    /// Oldest live sample
    tail: usize,
    acc: MomentAccumulator,
}

impl RingBuffer {
    /// Create a ring with `capacity` slots (holding up to `capacity - 1` samples)
    ///
    /// # Errors
    ///
    /// [`StatsError::InvalidArgument`] for a zero capacity,
    /// [`StatsError::AllocationFailure`] if the slots cannot be reserved.
    pub fn with_capacity(capacity: usize) -> Result<Self, StatsError> {
        if capacity < 1 {
            return Err(StatsError::invalid("ring capacity must be at least 1"));
        }

        Ok(Self {
            buffer: allocate_slots(capacity)?,
            head: 0,
            tail: 0,
            acc: MomentAccumulator::new(),
        })
    }

    /// Write a sample at the head
    ///
    /// If the write wraps onto the oldest sample, that sample is evicted and
    /// returned. The evicted value is **not** removed from the accumulator.
    pub fn put(&mut self, value: f64) -> Option<f64> {
        let capacity = self.capacity();

        self.buffer[self.head] = value;
        self.head = (self.head + 1) % capacity;
        self.acc.add(value);

        if self.head == self.tail {
            let evicted = self.buffer[self.tail];
            self.tail = (self.tail + 1) % capacity;
            trace!("ring put evicted {} without rebalancing moments", evicted);
            return Some(evicted);
        }
        None
    }

    /// Remove and return the oldest sample
    ///
    /// # Errors
    ///
    /// [`StatsError::EmptyContainer`] when the ring holds no samples.
    pub fn get(&mut self) -> Result<f64, StatsError> {
        if self.is_empty() {
            return Err(StatsError::EmptyContainer);
        }

        let value = self.buffer[self.tail];
        self.buffer[self.tail] = 0.0;
        self.acc.remove(value);
        self.tail = (self.tail + 1) % self.capacity();
        Ok(value)
    }

    /// Read the `index`-th oldest sample without removing it
    pub fn peek(&self, index: usize) -> Result<f64, StatsError> {
        let len = self.len();
        if index >= len {
            return Err(StatsError::IndexOutOfRange { index, len });
        }
        Ok(self.buffer[(self.tail + index) % self.capacity()])
    }

    /// Iterate over the live samples, oldest first
    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        let capacity = self.capacity();
        (0..self.len()).map(move |i| self.buffer[(self.tail + i) % capacity])
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.head == self.tail
    }

    /// Check if the next `put` would evict
    pub fn is_full(&self) -> bool {
        (self.head + 1) % self.capacity() == self.tail
    }

    /// Number of live samples
    pub fn len(&self) -> usize {
        let capacity = self.capacity();
        (self.head + capacity - self.tail) % capacity
    }

    /// Number of slots, one more than the number of samples the ring can hold
    pub fn capacity(&self) -> usize {
        self.buffer.len()
    }

    /// Drop all samples and zero the accumulator, keeping the capacity
    pub fn reset(&mut self) {
        self.buffer.fill(0.0);
        self.head = 0;
        self.tail = 0;
        self.acc.reset();
    }

    /// Recompute `min`/`max` from the live samples
    pub fn rescan_bounds(&mut self) {
        let (min, max) = bounds_of(self.iter());
        self.acc.set_bounds(min, max);
    }
}

impl Summary for RingBuffer {
    fn moments(&self) -> &MomentAccumulator {
        &self.acc
    }
}

impl Window for RingBuffer {
    /// Fails instead of overwriting when the ring is full
    fn push_newest(&mut self, value: f64) -> Result<(), StatsError> {
        if self.is_full() {
            return Err(StatsError::invalid(
                "ring is full; remove the oldest sample before pushing",
            ));
        }
        self.put(value);
        Ok(())
    }

    fn pop_oldest(&mut self) -> Result<f64, StatsError> {
        self.get()
    }

    fn len(&self) -> usize {
        RingBuffer::len(self)
    }

    fn rescan_bounds(&mut self) {
        RingBuffer::rescan_bounds(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_capacity_rejected() {
        assert!(matches!(
            RingBuffer::with_capacity(0),
            Err(StatsError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn test_empty_after_alloc() {
        let ring = RingBuffer::with_capacity(4).unwrap();
        assert!(ring.is_empty());
        assert!(!ring.is_full());
        assert_eq!(ring.len(), 0);
        assert_eq!(ring.capacity(), 4);
    }

    #[test]
    fn test_fullness() {
        let mut ring = RingBuffer::with_capacity(4).unwrap();

        for value in [1.0, 2.0, 3.0] {
            assert_eq!(ring.put(value), None);
            assert!(!ring.is_empty());
        }
        assert!(ring.is_full());
        assert_eq!(ring.len(), 3);
    }

    #[test]
    fn test_put_on_full_evicts_oldest() {
        let mut ring = RingBuffer::with_capacity(3).unwrap();
        ring.put(1.0);
        ring.put(2.0);

        assert_eq!(ring.put(3.0), Some(1.0));
        assert!(ring.is_full());
        assert_eq!(ring.iter().collect::<Vec<_>>(), vec![2.0, 3.0]);
        // the evicted sample is still represented in the moments
        assert_eq!(ring.count(), 3);
        assert_eq!(ring.sum(), 6.0);
    }

    #[test]
    fn test_get_is_fifo() {
        let mut ring = RingBuffer::with_capacity(4).unwrap();
        for value in [5.0, 6.0, 7.0] {
            ring.put(value);
        }

        assert_eq!(ring.get().unwrap(), 5.0);
        assert_eq!(ring.get().unwrap(), 6.0);
        assert_eq!(ring.count(), 1);
        assert_eq!(ring.mean(), 7.0);
        assert_eq!(ring.get().unwrap(), 7.0);
        assert!(ring.is_empty());
        assert_eq!(ring.get(), Err(StatsError::EmptyContainer));
    }

    #[test]
    fn test_wraparound() {
        let mut ring = RingBuffer::with_capacity(3).unwrap();

        for i in 0..10 {
            ring.put(i as f64);
            if ring.is_full() {
                ring.get().unwrap();
            }
        }

        assert_eq!(ring.iter().collect::<Vec<_>>(), vec![9.0]);
        assert_eq!(ring.count(), 1);
        assert_eq!(ring.sum(), 9.0);
    }

    #[test]
    fn test_peek() {
        let mut ring = RingBuffer::with_capacity(3).unwrap();
        ring.put(1.0);
        ring.put(2.0);
        ring.get().unwrap();
        ring.put(3.0);

        assert_eq!(ring.peek(0), Ok(2.0));
        assert_eq!(ring.peek(1), Ok(3.0));
        assert_eq!(
            ring.peek(2),
            Err(StatsError::IndexOutOfRange { index: 2, len: 2 })
        );
    }

    #[test]
    fn test_capacity_one_holds_nothing() {
        let mut ring = RingBuffer::with_capacity(1).unwrap();
        assert!(ring.is_empty());
        assert!(ring.is_full());

        assert_eq!(ring.put(4.0), Some(4.0));
        assert!(ring.is_empty());
    }

    #[test]
    fn test_reset() {
        let mut ring = RingBuffer::with_capacity(3).unwrap();
        ring.put(1.0);
        ring.put(2.0);
        ring.reset();

        assert!(ring.is_empty());
        assert_eq!(ring.count(), 0);
        assert_eq!(ring.sum(), 0.0);
        assert_eq!(ring.capacity(), 3);
    }

    #[test]
    fn test_rescan_bounds() {
        let mut ring = RingBuffer::with_capacity(4).unwrap();
        for value in [9.0, 2.0, 5.0] {
            ring.put(value);
        }
        ring.get().unwrap();
        assert_eq!(ring.max(), 9.0);

        ring.rescan_bounds();
        assert_eq!(ring.min(), 2.0);
        assert_eq!(ring.max(), 5.0);
    }

    #[test]
    fn test_window_push_refuses_overwrite() {
        let mut ring = RingBuffer::with_capacity(2).unwrap();
        ring.push_newest(1.0).unwrap();

        assert!(matches!(
            ring.push_newest(2.0),
            Err(StatsError::InvalidArgument { .. })
        ));
        assert_eq!(ring.pop_oldest(), Ok(1.0));
        ring.push_newest(2.0).unwrap();
        assert_eq!(Window::len(&ring), 1);
    }
}
