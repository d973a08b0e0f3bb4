//! Sample containers that keep a [`MomentAccumulator`] in lock-step
//!
//! Both containers own their samples and the accumulator summarizing them.
//! Every insertion and removal updates the accumulator in O(1).
//!
//! # Containers
//!
//! - [`RingBuffer`]: fixed capacity, wraparound, FIFO removal
//! - [`GrowableSequence`]: amortized doubling/halving, LIFO and FIFO removal,
//!   positional access
//!
//! # Example
//!
//! ```
//! use rollstats::buffers::{GrowableSequence, RingBuffer};
//! use rollstats::traits::Summary;
//!
//! let mut ring = RingBuffer::with_capacity(4)?;
//! for value in [1.0, 2.0, 3.0] {
//!     ring.put(value);
//! }
//! assert!(ring.is_full());
//! assert_eq!(ring.get()?, 1.0);
//! assert_eq!(ring.mean(), 2.5);
//!
//! let mut seq = GrowableSequence::with_capacity(1)?;
//! for value in [4.0, 8.0, 6.0] {
//!     seq.push(value)?;
//! }
//! assert_eq!(seq.get(1)?, 8.0);
//! assert_eq!(seq.sum(), 18.0);
//! # Ok::<(), rollstats::traits::StatsError>(())
//! ```
//!
//! [`MomentAccumulator`]: crate::statistics::MomentAccumulator

mod ring;
mod sequence;

pub use ring::RingBuffer;
pub use sequence::GrowableSequence;

use crate::traits::StatsError;

#[cfg(feature = "std")]
use std::vec::Vec;

#[cfg(not(feature = "std"))]
extern crate alloc;
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

/// Allocate `slots` zeroed samples, reporting failure instead of aborting
pub(crate) fn allocate_slots(slots: usize) -> Result<Vec<f64>, StatsError> {
    let mut buffer = Vec::new();
    buffer
        .try_reserve_exact(slots)
        .map_err(|_| StatsError::AllocationFailure { requested: slots })?;
    buffer.resize(slots, 0.0);
    Ok(buffer)
}

/// Smallest and largest of `values`, NaN for an empty iterator
pub(crate) fn bounds_of(values: impl Iterator<Item = f64>) -> (f64, f64) {
    values.fold((f64::NAN, f64::NAN), |(min, max), value| {
        if min.is_nan() {
            (value, value)
        } else {
            (min.min(value), max.max(value))
        }
    })
}
