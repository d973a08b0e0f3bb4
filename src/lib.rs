//! # Rollstats
//!
//! Incremental descriptive statistics and O(N) rolling-window moments.
//!
//! Rollstats maintains count, sum, min, max, mean and the central moments
//! M2/M3/M4 as samples are added to and removed from a container, and uses
//! that machinery to slide a fixed-width window across a dataset without
//! recomputing each window from scratch.
//!
//! ## Features
//!
//! - **Online moments**: O(1) insert and remove for mean, variance, skewness
//!   and kurtosis
//! - **Ring buffer**: fixed-capacity circular buffer with running moments
//! - **Growable sequence**: amortized doubling/halving array with running moments
//! - **Rolling windows**: per-position statistics in a single pass, plus the
//!   semicolon-delimited text report
//!
//! ## Quick Start
//!
//! ```rust
//! use rollstats::prelude::*;
//!
//! let mut seq = GrowableSequence::with_capacity(8)?;
//! for value in [3.0, 1.0, 4.0, 1.0, 5.0, 9.0, 2.0, 6.0] {
//!     seq.push(value)?;
//! }
//! println!("mean {} variance {}", seq.mean(), seq.variance());
//!
//! let stats = roll(&seq, 4, 0)?;
//! assert_eq!(stats.len(), 5);
//! print!("{}", stats);
//! # Ok::<(), StatsError>(())
//! ```
//!
//! ## Degenerate statistics
//!
//! Variance needs two samples; skewness and kurtosis additionally need
//! non-zero spread. The plain accessors propagate NaN/Infinity in those
//! cases, the `try_` accessors on [`Summary`](traits::Summary) return
//! [`StatsError::DegenerateStatistics`](traits::StatsError::DegenerateStatistics).
//!
//! ## Feature Flags
//!
//! - `std` (default): Standard library support; without it the crate is
//!   `no_std` + `alloc` and uses libm
//! - `rolling` (default): Rolling-window engine and report
//! - `serde`: Enable serialization

#![cfg_attr(not(feature = "std"), no_std)]
#![cfg_attr(docsrs, feature(doc_cfg))]

#[cfg(not(feature = "std"))]
extern crate alloc;

mod math;

#[cfg(feature = "serde")]
mod float_serde;

// Core traits always available
pub mod traits;

pub mod buffers;
pub mod statistics;

#[cfg(feature = "rolling")]
#[cfg_attr(docsrs, doc(cfg(feature = "rolling")))]
pub mod rolling;

pub mod prelude {
    pub use crate::traits::*;

    pub use crate::buffers::{GrowableSequence, RingBuffer};
    pub use crate::statistics::MomentAccumulator;

    #[cfg(feature = "rolling")]
    pub use crate::rolling::{roll, BoundsPolicy, RollingConfig, RollingEngine, RollingStats};
}

pub use buffers::{GrowableSequence, RingBuffer};
pub use statistics::MomentAccumulator;
pub use traits::{StatsError, Summary, Window};

#[cfg(feature = "rolling")]
pub use rolling::{roll, RollingStats};
