//! Incremental descriptive statistics
//!
//! This module provides the online moment accumulator that every container
//! in the crate embeds. It maintains count, sum, bounds and the central
//! moments M2/M3/M4 in O(1) per insertion or removal.
//!
//! # Example
//!
//! ```
//! use rollstats::statistics::MomentAccumulator;
//!
//! let mut acc = MomentAccumulator::new();
//!
//! for value in [1.0, 2.0, 3.0, 4.0, 5.0] {
//!     acc.add(value);
//! }
//! acc.remove(5.0);
//!
//! assert_eq!(acc.count(), 4);
//! assert_eq!(acc.mean(), 2.5);
//! println!("Variance: {}", acc.variance());
//! println!("Skewness: {}", acc.skewness());
//! ```

mod moments;

pub use moments::MomentAccumulator;
