//! Rolling pass configuration

use crate::traits::StatsError;

/// Container used as the sliding window
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum WindowBacking {
    /// [`RingBuffer`](crate::buffers::RingBuffer) with `width + 1` slots
    #[default]
    Ring,
    /// [`GrowableSequence`](crate::buffers::GrowableSequence) popped from the front
    Sequence,
}

/// How `min`/`max` are maintained as samples leave the window
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BoundsPolicy {
    /// O(1) per step; bounds only ever widen, so a bound held by an evicted
    /// sample goes stale
    #[default]
    Incremental,
    /// Rescan the window after every eviction; exact bounds at O(width) per step
    Rescan,
}

/// Parameters of one rolling pass
///
/// # Example
///
/// ```
/// use rollstats::rolling::{BoundsPolicy, RollingConfig, WindowBacking};
///
/// let config = RollingConfig::new(3)
///     .with_start(2)
///     .with_backing(WindowBacking::Sequence)
///     .with_bounds(BoundsPolicy::Rescan);
///
/// // 10 samples, windows start at 2..=7
/// assert_eq!(config.validate(10), Ok(6));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RollingConfig {
    /// Window width in samples
    pub window: usize,
    /// Index of the first sample of the first window
    pub start: usize,
    pub backing: WindowBacking,
    pub bounds: BoundsPolicy,
}

impl RollingConfig {
    /// Configuration for a window of `window` samples starting at index 0
    pub fn new(window: usize) -> Self {
        Self {
            window,
            start: 0,
            backing: WindowBacking::default(),
            bounds: BoundsPolicy::default(),
        }
    }

    /// Start the first window at sample `start`
    pub fn with_start(mut self, start: usize) -> Self {
        self.start = start;
        self
    }

    /// Choose the window container
    pub fn with_backing(mut self, backing: WindowBacking) -> Self {
        self.backing = backing;
        self
    }

    /// Choose how `min`/`max` are maintained
    pub fn with_bounds(mut self, bounds: BoundsPolicy) -> Self {
        self.bounds = bounds;
        self
    }

    /// Check the configuration against a source of `source_len` samples
    ///
    /// Returns the number of rows the pass will emit.
    pub fn validate(&self, source_len: usize) -> Result<usize, StatsError> {
        if self.window < 1 {
            return Err(StatsError::invalid("window width must be at least 1"));
        }

        match self.start.checked_add(self.window) {
            Some(end) if end <= source_len => Ok(source_len - end + 1),
            _ => Err(StatsError::invalid(
                "window extends past the end of the source",
            )),
        }
    }
}
