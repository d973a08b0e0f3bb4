//! Core traits for incremental statistics containers
//!
//! Every container that owns a [`MomentAccumulator`] implements [`Summary`],
//! which exposes the eight descriptive statistics. Containers that can act as
//! a sliding window additionally implement [`Window`], the seam the rolling
//! engine is written against.

use crate::statistics::MomentAccumulator;

#[cfg(feature = "std")]
use std::borrow::Cow;

#[cfg(not(feature = "std"))]
extern crate alloc;
#[cfg(not(feature = "std"))]
use alloc::borrow::Cow;

/// Errors reported by containers, accumulators and the rolling engine
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StatsError {
    /// A size, width or index argument is out of its valid domain
    #[error("invalid argument: {reason}")]
    InvalidArgument {
        reason: Cow<'static, str>,
    },
    /// Storage for the requested number of slots could not be reserved
    #[error("allocation failure: could not reserve {requested} slots")]
    AllocationFailure {
        requested: usize,
    },
    /// Removal or read on a container holding no samples
    #[error("container is empty")]
    EmptyContainer,
    /// Positional access past the last live sample
    #[error("index {index} out of range for length {len}")]
    IndexOutOfRange {
        index: usize,
        len: usize,
    },
    /// A higher-order statistic was requested with too few samples or zero spread
    #[error("degenerate statistics: undefined for {count} sample(s) or zero spread")]
    DegenerateStatistics {
        count: u64,
    },
}

impl StatsError {
    pub(crate) fn invalid(reason: &'static str) -> Self {
        StatsError::InvalidArgument {
            reason: Cow::Borrowed(reason),
        }
    }
}

/// Read-only view of the statistics maintained by a container
///
/// Implementors only provide [`moments`](Summary::moments); every statistic
/// is derived from it. The plain accessors propagate NaN/Infinity for
/// degenerate inputs, the `try_` accessors report
/// [`StatsError::DegenerateStatistics`] instead.
///
/// `min`/`max` are not maintained on removal. After the container evicts
/// the sample that held a bound, the bound is stale until the container is
/// reset or rescanned.
pub trait Summary {
    /// The accumulator summarizing the container's live samples
    fn moments(&self) -> &MomentAccumulator;

    /// Number of samples represented by the accumulator
    fn count(&self) -> u64 {
        self.moments().count()
    }

    fn min(&self) -> f64 {
        self.moments().min()
    }

    fn max(&self) -> f64 {
        self.moments().max()
    }

    fn sum(&self) -> f64 {
        self.moments().sum()
    }

    fn mean(&self) -> f64 {
        self.moments().mean()
    }

    /// Sample variance (divisor `count - 1`)
    fn variance(&self) -> f64 {
        self.moments().variance()
    }

    fn stddev(&self) -> f64 {
        self.moments().stddev()
    }

    fn skewness(&self) -> f64 {
        self.moments().skewness()
    }

    /// Excess kurtosis
    fn kurtosis(&self) -> f64 {
        self.moments().kurtosis()
    }

    fn try_variance(&self) -> Result<f64, StatsError> {
        self.moments().try_variance()
    }

    fn try_stddev(&self) -> Result<f64, StatsError> {
        self.moments().try_stddev()
    }

    fn try_skewness(&self) -> Result<f64, StatsError> {
        self.moments().try_skewness()
    }

    fn try_kurtosis(&self) -> Result<f64, StatsError> {
        self.moments().try_kurtosis()
    }
}

/// A FIFO container usable as the sliding window of a rolling pass
///
/// The rolling engine only ever calls [`push_newest`](Window::push_newest)
/// after [`pop_oldest`](Window::pop_oldest) once the window is full, so the
/// accumulator always describes exactly the live samples.
pub trait Window: Summary {
    /// Append a sample as the newest element
    fn push_newest(&mut self, value: f64) -> Result<(), StatsError>;

    /// Remove and return the oldest element, updating the accumulator
    fn pop_oldest(&mut self) -> Result<f64, StatsError>;

    /// Number of live samples
    fn len(&self) -> usize;

    /// Recompute `min`/`max` from the live samples
    fn rescan_bounds(&mut self);

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
