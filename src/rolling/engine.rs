//! Sliding-window driver
//!
//! One window container and its accumulator are reused for the whole pass:
//! each step is a FIFO pop followed by a push, so a source of `N` samples
//! costs O(N) accumulator work instead of O(N * width).

use log::debug;

use super::config::{BoundsPolicy, RollingConfig, WindowBacking};
use super::stats::RollingStats;
use crate::buffers::{GrowableSequence, RingBuffer};
use crate::traits::{StatsError, Window};

/// Rolling pass over a borrowed source
///
/// # Example
///
/// ```
/// use rollstats::rolling::{RollingConfig, RollingEngine, WindowBacking};
///
/// let source: Vec<f64> = (1..=6).map(f64::from).collect();
/// let config = RollingConfig::new(2).with_backing(WindowBacking::Sequence);
///
/// let stats = RollingEngine::new(&source, config)?.roll()?;
/// assert_eq!(stats.sums(), &[3.0, 5.0, 7.0, 9.0, 11.0]);
/// # Ok::<(), rollstats::traits::StatsError>(())
/// ```
#[derive(Clone, Copy, Debug)]
pub struct RollingEngine<'a> {
    source: &'a [f64],
    config: RollingConfig,
}

impl<'a> RollingEngine<'a> {
    /// Bind a configuration to a source
    ///
    /// # Errors
    ///
    /// [`StatsError::InvalidArgument`] if the window is empty or does not fit
    /// in the source from the configured start index.
    pub fn new(source: &'a [f64], config: RollingConfig) -> Result<Self, StatsError> {
        config.validate(source.len())?;
        Ok(Self { source, config })
    }

    /// Configuration this engine runs with
    pub fn config(&self) -> &RollingConfig {
        &self.config
    }

    /// Number of rows [`roll`](Self::roll) will emit
    pub fn rows(&self) -> usize {
        self.source.len() - self.config.start - self.config.window + 1
    }

    /// Run the pass with the configured window backing
    pub fn roll(&self) -> Result<RollingStats, StatsError> {
        // one spare slot on top of the width
        let slots = self
            .config
            .window
            .checked_add(1)
            .ok_or(StatsError::AllocationFailure {
                requested: usize::MAX,
            })?;
        match self.config.backing {
            WindowBacking::Ring => self.roll_with(RingBuffer::with_capacity(slots)?),
            WindowBacking::Sequence => {
                // a second `slots` of headroom lets the front offset advance
                // about `width` steps between compactions
                let headroom = slots.checked_mul(2).ok_or(StatsError::AllocationFailure {
                    requested: usize::MAX,
                })?;
                self.roll_with(GrowableSequence::with_capacity(headroom)?)
            }
        }
    }

    /// Run the pass with a caller-supplied, empty window container
    ///
    /// The container must be able to hold the configured width.
    pub fn roll_with<W: Window>(&self, mut window: W) -> Result<RollingStats, StatsError> {
        if !window.is_empty() {
            return Err(StatsError::invalid("window container must start empty"));
        }

        let RollingConfig {
            window: width,
            start,
            bounds,
            ..
        } = self.config;
        let mut stats = RollingStats::with_capacity(self.rows())?;

        debug!(
            "rolling {} samples: width {}, start {}, {} rows",
            self.source.len(),
            width,
            start,
            self.rows()
        );

        for &value in &self.source[start..start + width] {
            window.push_newest(value)?;
        }
        stats.push_row(&window);

        for &value in &self.source[start + width..] {
            window.pop_oldest()?;
            window.push_newest(value)?;
            if bounds == BoundsPolicy::Rescan {
                window.rescan_bounds();
            }
            stats.push_row(&window);
        }

        debug!("rolled {} rows", stats.len());
        Ok(stats)
    }
}

/// Roll a window of `window_width` samples across `source`, starting at
/// `start_index`, with the default configuration
///
/// Emits `source.len() - start_index - window_width + 1` rows.
///
/// # Example
///
/// ```
/// use rollstats::rolling::roll;
///
/// let source = [1.0, 2.0, 3.0, 4.0, 5.0];
/// let stats = roll(&source, 3, 0)?;
///
/// assert_eq!(stats.len(), 3);
/// assert_eq!(stats.means(), &[2.0, 3.0, 4.0]);
/// # Ok::<(), rollstats::traits::StatsError>(())
/// ```
pub fn roll<S>(source: &S, window_width: usize, start_index: usize) -> Result<RollingStats, StatsError>
where
    S: AsRef<[f64]> + ?Sized,
{
    let config = RollingConfig::new(window_width).with_start(start_index);
    RollingEngine::new(source.as_ref(), config)?.roll()
}
