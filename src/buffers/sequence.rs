//! Growable sample sequence with running moments
//!
//! Storage doubles when a push would consume the last spare slot and halves
//! once the live count drops to `capacity / 2 - 1`. Both rules fire on the
//! live count alone, so a push/pop pair straddling a boundary reallocates on
//! every call (capacity 4 holding 3: push grows to 8, pop shrinks back to 4).
//!
//! Removing the oldest sample advances a front offset instead of shifting the
//! live samples; they are moved back to slot 0 only when storage is resized or
//! the newest sample reaches the last slot.

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

const GROWTH_FACTOR: usize = 2;

/// Dynamically sized array of `f64` samples summarized by a
/// [`MomentAccumulator`]
///
/// Capacity always exceeds the live count by at least one slot.
///
/// # Removal
///
/// [`pop`](Self::pop) (newest) and [`pop_front`](Self::pop_front) (oldest)
/// are the supported removal disciplines, both O(1) amortized. [`pop_at`](Self::pop_at)
/// accepts any index, but its effect on the moments is only relied upon for
/// index 0 in FIFO use; do not treat interior removal as producing validated
/// moments.
///
/// # Example
///
/// ```
/// use rollstats::buffers::GrowableSequence;
/// use rollstats::traits::Summary;
///
/// let mut seq = GrowableSequence::with_capacity(2)?;
/// for value in [1.0, 2.0, 3.0, 4.0] {
///     seq.push(value)?;
/// }
/// assert_eq!(seq.len(), 4);
/// assert!(seq.capacity() >= 5);
/// assert_eq!(seq.mean(), 2.5);
///
/// assert_eq!(seq.pop()?, 4.0);
/// assert_eq!(seq.pop_front()?, 1.0);
/// assert_eq!(seq.as_slice(), &[2.0, 3.0]);
/// # Ok::<(), rollstats::traits::StatsError>(())
/// ```
#[derive(Clone, Debug)]
pub struct GrowableSequence {
    /// Sample slots; `buffer.len()` is the capacity
    buffer: Vec<f64>,
    /// Slot of the oldest live sample
    front: usize,
    /// Live samples, stored in `buffer[front..front + count]`
    count: usize,
    acc: MomentAccumulator,
}

impl GrowableSequence {
    /// Create a sequence with `capacity` initial slots
    ///
    /// # Errors
    ///
    /// [`StatsError::InvalidArgument`] for a zero capacity,
    /// [`StatsError::AllocationFailure`] if the slots cannot be reserved.
    pub fn with_capacity(capacity: usize) -> Result<Self, StatsError> {
        if capacity < 1 {
            return Err(StatsError::invalid("sequence capacity must be at least 1"));
        }

        Ok(Self {
            buffer: allocate_slots(capacity)?,
            front: 0,
            count: 0,
            acc: MomentAccumulator::new(),
        })
    }

    /// Copy `values` into a new sequence sized to hold them
    pub fn from_slice(values: &[f64]) -> Result<Self, StatsError> {
        let mut seq = Self::with_capacity(values.len() + 1)?;
        for &value in values {
            seq.push(value)?;
        }
        Ok(seq)
    }

    /// Append a sample, doubling the capacity first if no spare slot remains
    ///
    /// # Errors
    ///
    /// [`StatsError::AllocationFailure`] if growing fails; the sequence and
    /// its statistics are left exactly as they were.
    pub fn push(&mut self, value: f64) -> Result<(), StatsError> {
        if self.count == self.capacity() - 1 {
            let grown = self
                .capacity()
                .checked_mul(GROWTH_FACTOR)
                .ok_or(StatsError::AllocationFailure {
                    requested: usize::MAX,
                })?;
            self.resize(grown)?;
        } else if self.front + self.count == self.capacity() {
            self.compact();
        }

        self.buffer[self.front + self.count] = value;
        self.count += 1;
        self.acc.add(value);
        Ok(())
    }

    /// Remove and return the newest sample
    ///
    /// # Errors
    ///
    /// [`StatsError::EmptyContainer`] when the sequence holds no samples.
    pub fn pop(&mut self) -> Result<f64, StatsError> {
        if self.count == 0 {
            return Err(StatsError::EmptyContainer);
        }

        self.count -= 1;
        let slot = self.front + self.count;
        let value = self.buffer[slot];
        self.buffer[slot] = 0.0;
        self.acc.remove(value);
        self.contract();
        Ok(value)
    }

    /// Remove and return the oldest sample
    pub fn pop_front(&mut self) -> Result<f64, StatsError> {
        self.pop_at(0)
    }

    /// Remove the sample at `index`, shifting later samples down by one
    ///
    /// Index 0 advances the front offset instead of moving any samples.
    /// The moments are updated with the inverse insertion recurrence, which
    /// is only relied upon for FIFO removal at index 0 (and for the newest
    /// sample). Removing interior samples is not a supported way to maintain
    /// validated statistics.
    ///
    /// # Errors
    ///
    /// [`StatsError::EmptyContainer`] when empty,
    /// [`StatsError::IndexOutOfRange`] when `index >= len()`.
    pub fn pop_at(&mut self, index: usize) -> Result<f64, StatsError> {
        if self.count == 0 {
            return Err(StatsError::EmptyContainer);
        }
        if index >= self.count {
            return Err(StatsError::IndexOutOfRange {
                index,
                len: self.count,
            });
        }

        let slot = self.front + index;
        let value = self.buffer[slot];
        let end = self.front + self.count;
        if index == 0 {
            self.buffer[slot] = 0.0;
            self.front += 1;
        } else {
            self.buffer.copy_within(slot + 1..end, slot);
            self.buffer[end - 1] = 0.0;
        }
        self.count -= 1;
        if self.count == 0 {
            self.front = 0;
        }
        self.acc.remove(value);
        self.contract();
        Ok(value)
    }

    /// Read the sample at `index`
    pub fn get(&self, index: usize) -> Result<f64, StatsError> {
        if index >= self.count {
            return Err(StatsError::IndexOutOfRange {
                index,
                len: self.count,
            });
        }
        Ok(self.buffer[self.front + index])
    }

    /// Live samples in insertion order
    pub fn as_slice(&self) -> &[f64] {
        &self.buffer[self.front..self.front + self.count]
    }

    /// Iterate the live samples, oldest first
    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.as_slice().iter().copied()
    }

    /// Number of live samples
    pub fn len(&self) -> usize {
        self.count
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Number of allocated slots
    pub fn capacity(&self) -> usize {
        self.buffer.len()
    }

    /// Drop all samples and zero the accumulator, keeping the capacity
    pub fn reset(&mut self) {
        self.buffer[self.front..self.front + self.count].fill(0.0);
        self.front = 0;
        self.count = 0;
        self.acc.reset();
    }

    /// Recompute `min`/`max` from the live samples
    pub fn rescan_bounds(&mut self) {
        let (min, max) = bounds_of(self.iter());
        self.acc.set_bounds(min, max);
    }

    fn contract(&mut self) {
        let capacity = self.capacity();
        if capacity >= GROWTH_FACTOR && self.count == capacity / GROWTH_FACTOR - 1 {
            self.shrink(capacity / GROWTH_FACTOR);
        }
    }

    /// Move the live samples back to slot 0, zeroing the slots they vacate
    fn compact(&mut self) {
        if self.front == 0 {
            return;
        }
        let end = self.front + self.count;
        self.buffer.copy_within(self.front..end, 0);
        self.buffer[self.count..end].fill(0.0);
        self.front = 0;
    }

    /// Grow storage to `new_capacity` slots, leaving `self` untouched on failure
    fn resize(&mut self, new_capacity: usize) -> Result<(), StatsError> {
        let additional = new_capacity.saturating_sub(self.buffer.len());
        self.buffer
            .try_reserve_exact(additional)
            .map_err(|_| StatsError::AllocationFailure {
                requested: new_capacity,
            })?;
        self.compact();
        self.buffer.resize(new_capacity, 0.0);
        trace!("sequence grew to {} slots", new_capacity);
        Ok(())
    }

    fn shrink(&mut self, new_capacity: usize) {
        self.compact();
        self.buffer.truncate(new_capacity);
        self.buffer.shrink_to(new_capacity);
        trace!("sequence shrank to {} slots", new_capacity);
    }
}

impl Summary for GrowableSequence {
    fn moments(&self) -> &MomentAccumulator {
        &self.acc
    }
}

impl Window for GrowableSequence {
    fn push_newest(&mut self, value: f64) -> Result<(), StatsError> {
        self.push(value)
    }

    fn pop_oldest(&mut self) -> Result<f64, StatsError> {
        self.pop_front()
    }

    fn len(&self) -> usize {
        self.count
    }

    fn rescan_bounds(&mut self) {
        GrowableSequence::rescan_bounds(self)
    }
}

impl AsRef<[f64]> for GrowableSequence {
    fn as_ref(&self) -> &[f64] {
        self.as_slice()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() <= 1e-9 * b.abs().max(1.0)
    }

    #[test]
    fn test_zero_capacity_rejected() {
        assert!(matches!(
            GrowableSequence::with_capacity(0),
            Err(StatsError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn test_push_doubles_capacity() {
        let mut seq = GrowableSequence::with_capacity(1).unwrap();

        seq.push(1.0).unwrap();
        assert_eq!(seq.capacity(), 2);
        seq.push(2.0).unwrap();
        assert_eq!(seq.capacity(), 4);
        seq.push(3.0).unwrap();
        assert_eq!(seq.capacity(), 4);
        seq.push(4.0).unwrap();
        assert_eq!(seq.capacity(), 8);

        assert_eq!(seq.as_slice(), &[1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_spare_slot_invariant() {
        let mut seq = GrowableSequence::with_capacity(3).unwrap();

        for i in 0..100 {
            seq.push(i as f64).unwrap();
            assert!(seq.capacity() >= seq.len() + 1);
        }
        while !seq.is_empty() {
            seq.pop().unwrap();
            assert!(seq.capacity() >= seq.len() + 1);
        }
    }

    #[test]
    fn test_pop_halves_capacity() {
        let mut seq = GrowableSequence::with_capacity(8).unwrap();
        for i in 0..5 {
            seq.push(i as f64).unwrap();
        }
        assert_eq!(seq.capacity(), 8);

        seq.pop().unwrap();
        assert_eq!(seq.capacity(), 8);
        seq.pop().unwrap();
        // count 3 == 8 / 2 - 1
        assert_eq!(seq.capacity(), 4);
        assert_eq!(seq.as_slice(), &[0.0, 1.0, 2.0]);
    }

    #[test]
    fn test_pop_is_lifo() {
        let mut seq = GrowableSequence::from_slice(&[1.0, 2.0, 3.0]).unwrap();

        assert_eq!(seq.pop(), Ok(3.0));
        assert_eq!(seq.pop(), Ok(2.0));
        assert_eq!(seq.pop(), Ok(1.0));
        assert_eq!(seq.pop(), Err(StatsError::EmptyContainer));
        assert_eq!(seq.count(), 0);
    }

    #[test]
    fn test_push_pop_round_trip() {
        let mut seq = GrowableSequence::from_slice(&[3.5, -1.0, 2.25, 8.0, 0.5]).unwrap();
        let before = seq.moments().clone();

        seq.push(42.0).unwrap();
        assert_eq!(seq.pop(), Ok(42.0));

        let after = seq.moments();
        assert_eq!(after.count(), before.count());
        assert!(close(after.sum(), before.sum()));
        assert!(close(after.mean(), before.mean()));
        assert!(close(after.m2(), before.m2()));
        assert!(close(after.m3(), before.m3()));
        assert!(close(after.m4(), before.m4()));
    }

    #[test]
    fn test_pop_front() {
        let mut seq = GrowableSequence::from_slice(&[4.0, 1.0, 7.0, 3.0]).unwrap();

        assert_eq!(seq.pop_front(), Ok(4.0));
        assert_eq!(seq.as_slice(), &[1.0, 7.0, 3.0]);

        let fresh = MomentAccumulator::from_slice(&[1.0, 7.0, 3.0]);
        assert!(close(seq.mean(), fresh.mean()));
        assert!(close(seq.variance(), fresh.variance()));
    }

    #[test]
    fn test_pop_front_advances_offset() {
        let mut seq = GrowableSequence::from_slice(&[1.0, 2.0, 3.0, 4.0]).unwrap();
        let capacity = seq.capacity();

        seq.pop_front().unwrap();
        seq.pop_front().unwrap();
        assert_eq!(seq.front, 2);
        assert_eq!(seq.capacity(), capacity);
        assert_eq!(seq.as_slice(), &[3.0, 4.0]);
        assert_eq!(seq.get(0), Ok(3.0));
        assert_eq!(seq.pop(), Ok(4.0));
        assert_eq!(seq.as_slice(), &[3.0]);
    }

    #[test]
    fn test_fifo_compacts_at_last_slot() {
        let mut seq = GrowableSequence::with_capacity(16).unwrap();
        for i in 0..5 {
            seq.push(i as f64).unwrap();
        }

        // a window of five never grows or shrinks a 16-slot buffer
        for i in 5..60 {
            assert_eq!(seq.pop_front(), Ok((i - 5) as f64));
            seq.push(i as f64).unwrap();
            assert_eq!(seq.capacity(), 16);
            assert!(seq.front + seq.len() <= seq.capacity());
            let expected: Vec<f64> = (i - 4..=i).map(|v| v as f64).collect();
            assert_eq!(seq.as_slice(), expected.as_slice());
        }

        // vacated slots are zeroed
        let live = seq.front..seq.front + seq.len();
        for (slot, &value) in seq.buffer.iter().enumerate() {
            if !live.contains(&slot) {
                assert_eq!(value, 0.0, "slot {}", slot);
            }
        }

        let fresh = MomentAccumulator::from_slice(seq.as_slice());
        assert!(close(seq.mean(), fresh.mean()));
        assert!(close(seq.variance(), fresh.variance()));
    }

    #[test]
    fn test_shrink_with_offset_keeps_order() {
        let mut seq = GrowableSequence::with_capacity(8).unwrap();
        for i in 0..5 {
            seq.push(i as f64).unwrap();
        }

        seq.pop_front().unwrap();
        seq.pop_front().unwrap();
        // count 3 == 8 / 2 - 1
        assert_eq!(seq.capacity(), 4);
        assert_eq!(seq.front, 0);
        assert_eq!(seq.as_slice(), &[2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_grow_with_offset_keeps_order() {
        let mut seq = GrowableSequence::with_capacity(4).unwrap();
        for i in 0..3 {
            seq.push(i as f64).unwrap();
        }
        seq.pop_front().unwrap();
        seq.push(3.0).unwrap();
        assert_eq!(seq.capacity(), 4);

        // count 3 == capacity - 1
        seq.push(4.0).unwrap();
        assert_eq!(seq.capacity(), 8);
        assert_eq!(seq.as_slice(), &[1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_pop_at_interior_with_offset() {
        let mut seq = GrowableSequence::from_slice(&[1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();
        seq.pop_front().unwrap();

        assert_eq!(seq.pop_at(1), Ok(3.0));
        assert_eq!(seq.as_slice(), &[2.0, 4.0, 5.0]);
    }

    #[test]
    fn test_failed_resize_leaves_sequence_untouched() {
        let mut seq = GrowableSequence::from_slice(&[1.5, -2.0, 4.0, 8.0]).unwrap();
        seq.pop_front().unwrap();
        let capacity = seq.capacity();
        let front = seq.front;
        let before = seq.moments().clone();

        assert_eq!(
            seq.resize(usize::MAX),
            Err(StatsError::AllocationFailure {
                requested: usize::MAX
            })
        );

        assert_eq!(seq.len(), 3);
        assert_eq!(seq.capacity(), capacity);
        assert_eq!(seq.front, front);
        assert_eq!(seq.as_slice(), &[-2.0, 4.0, 8.0]);
        assert_eq!(format!("{:?}", seq.moments()), format!("{:?}", before));

        seq.push(16.0).unwrap();
        assert_eq!(seq.as_slice(), &[-2.0, 4.0, 8.0, 16.0]);
    }

    #[test]
    fn test_pop_at_errors() {
        let mut seq = GrowableSequence::with_capacity(4).unwrap();
        assert_eq!(seq.pop_at(0), Err(StatsError::EmptyContainer));

        seq.push(1.0).unwrap();
        assert_eq!(
            seq.pop_at(1),
            Err(StatsError::IndexOutOfRange { index: 1, len: 1 })
        );
        assert_eq!(seq.pop_at(0), Ok(1.0));
    }

    #[test]
    fn test_pop_at_interior_updates_contents() {
        let mut seq = GrowableSequence::from_slice(&[1.0, 2.0, 3.0, 4.0]).unwrap();

        assert_eq!(seq.pop_at(2), Ok(3.0));
        assert_eq!(seq.as_slice(), &[1.0, 2.0, 4.0]);
        assert_eq!(seq.len(), 3);
        assert_eq!(seq.count(), 3);
        assert_eq!(seq.sum(), 7.0);
    }

    #[test]
    fn test_get() {
        let seq = GrowableSequence::from_slice(&[9.0, 8.0]).unwrap();

        assert_eq!(seq.get(0), Ok(9.0));
        assert_eq!(seq.get(1), Ok(8.0));
        assert_eq!(
            seq.get(2),
            Err(StatsError::IndexOutOfRange { index: 2, len: 2 })
        );
    }

    #[test]
    fn test_reset() {
        let mut seq = GrowableSequence::from_slice(&[1.0, 2.0, 3.0]).unwrap();
        let capacity = seq.capacity();
        seq.reset();

        assert!(seq.is_empty());
        assert_eq!(seq.count(), 0);
        assert_eq!(seq.sum(), 0.0);
        assert_eq!(seq.capacity(), capacity);

        seq.push(5.0).unwrap();
        assert_eq!(seq.min(), 5.0);
        assert_eq!(seq.max(), 5.0);
    }

    #[test]
    fn test_rescan_bounds() {
        let mut seq = GrowableSequence::from_slice(&[1.0, 6.0, 3.0]).unwrap();
        seq.pop_front().unwrap();
        assert_eq!(seq.min(), 1.0);

        seq.rescan_bounds();
        assert_eq!(seq.min(), 3.0);
        assert_eq!(seq.max(), 6.0);
    }

    #[test]
    fn test_as_ref() {
        let seq = GrowableSequence::from_slice(&[1.0, 2.0]).unwrap();
        let slice: &[f64] = seq.as_ref();
        assert_eq!(slice, &[1.0, 2.0]);
    }
}
