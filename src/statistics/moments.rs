//! Online central moments (mean, M2, M3, M4) with O(1) insert and remove
//!
//! The insertion recurrence is the single-pass update for central moments
//! popularised by Terriberry and by John D. Cook's write-up of it; removal
//! applies the exact algebraic inverse.

use crate::math;
use crate::traits::{StatsError, Summary};

/// Running count, bounds, sum and central moments of a multiset of samples
///
/// `add` and `remove` never fail. Derived statistics are only meaningful for
/// two or more samples with non-zero spread; the plain accessors propagate
/// the resulting NaN/Infinity, the `try_` accessors report
/// [`StatsError::DegenerateStatistics`].
///
/// # Bounds after removal
///
/// `remove` does not update `min`/`max`. Removing the sample that currently
/// holds a bound leaves that bound stale until the accumulator is reset or
/// its owner rescans its samples (see [`set_bounds`](Self::set_bounds)).
///
/// # Example
///
/// ```
/// use rollstats::statistics::MomentAccumulator;
///
/// let mut acc = MomentAccumulator::new();
///
/// for value in [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0] {
///     acc.add(value);
/// }
///
/// assert!((acc.mean() - 5.0).abs() < 1e-12);
/// assert!((acc.variance() - 32.0 / 7.0).abs() < 1e-12);
/// assert_eq!(acc.min(), 2.0);
/// assert_eq!(acc.max(), 9.0);
/// ```
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MomentAccumulator {
    /// Number of samples represented
    count: u64,
    /// Smallest sample added since the last reset (NaN when empty)
    #[cfg_attr(feature = "serde", serde(with = "crate::float_serde"))]
    min: f64,
    /// Largest sample added since the last reset (NaN when empty)
    #[cfg_attr(feature = "serde", serde(with = "crate::float_serde"))]
    max: f64,
    #[cfg_attr(feature = "serde", serde(with = "crate::float_serde"))]
    sum: f64,
    #[cfg_attr(feature = "serde", serde(with = "crate::float_serde"))]
    mean: f64,
    /// Sum of squared deviations from the mean
    #[cfg_attr(feature = "serde", serde(with = "crate::float_serde"))]
    m2: f64,
    /// Sum of cubed deviations from the mean
    #[cfg_attr(feature = "serde", serde(with = "crate::float_serde"))]
    m3: f64,
    /// Sum of fourth-power deviations from the mean
    #[cfg_attr(feature = "serde", serde(with = "crate::float_serde"))]
    m4: f64,
}

impl Default for MomentAccumulator {
    fn default() -> Self {
        Self::new()
    }
}

impl MomentAccumulator {
    /// Create an empty accumulator
    pub fn new() -> Self {
        Self {
            count: 0,
            min: f64::NAN,
            max: f64::NAN,
            sum: 0.0,
            mean: 0.0,
            m2: 0.0,
            m3: 0.0,
            m4: 0.0,
        }
    }

    /// Build an accumulator by adding every value of `values` in order
    pub fn from_slice(values: &[f64]) -> Self {
        let mut acc = Self::new();
        for &value in values {
            acc.add(value);
        }
        acc
    }

    /// Add a sample
    pub fn add(&mut self, value: f64) {
        self.sum += value;

        if self.count == 0 {
            self.min = value;
            self.max = value;
        } else {
            if value < self.min {
                self.min = value;
            }
            if value > self.max {
                self.max = value;
            }
        }

        self.count += 1;
        let n = self.count as f64;
        let delta = value - self.mean;
        let delta_n = delta / n;
        let delta_nsq = delta_n * delta_n;
        let term1 = delta * delta_n * (n - 1.0);

        self.mean += delta_n;
        // M4 and M3 consume the pre-update lower moments
        self.m4 += term1 * delta_nsq * (n * n - 3.0 * n + 3.0) + 6.0 * delta_nsq * self.m2
            - 4.0 * delta_n * self.m3;
        self.m3 += term1 * delta_n * (n - 2.0) - 3.0 * delta_n * self.m2;
        self.m2 += term1;
    }

    /// Remove a sample previously passed to [`add`](Self::add)
    ///
    /// Undoes the insertion recurrence: M2 is restored first, then M3 from the
    /// restored M2, then M4 from both. Removing the last sample returns the
    /// accumulator to its empty state; removing from an empty accumulator
    /// does nothing.
    ///
    /// `min` and `max` are left untouched.
    pub fn remove(&mut self, value: f64) {
        match self.count {
            0 => return,
            1 => {
                self.reset();
                return;
            }
            _ => {}
        }

        self.sum -= value;

        let n1 = self.count as f64;
        self.count -= 1;
        let n = self.count as f64;
        let delta = value - self.mean;
        let delta_n = delta / n;
        let delta_nsq = delta_n * delta_n;
        let term1 = delta * delta_n * n1;

        self.mean -= delta_n;
        self.m2 -= term1;
        self.m3 -= term1 * delta_n * (n1 - 2.0) - 3.0 * delta_n * self.m2;
        self.m4 -= term1 * delta_nsq * (n1 * n1 - 3.0 * n1 + 3.0) + 6.0 * delta_nsq * self.m2
            - 4.0 * delta_n * self.m3;
    }

    /// Return to the empty state
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Overwrite the bounds with values recomputed by the owner
    ///
    /// Containers call this after rescanning their live samples; it does not
    /// touch the moments.
    pub fn set_bounds(&mut self, min: f64, max: f64) {
        self.min = min;
        self.max = max;
    }

    /// Number of samples represented
    pub fn count(&self) -> u64 {
        self.count
    }

    /// Alias of [`count`](Self::count)
    pub fn len(&self) -> u64 {
        self.count
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Smallest sample (NaN when empty, possibly stale after removals)
    pub fn min(&self) -> f64 {
        self.min
    }

    /// Largest sample (NaN when empty, possibly stale after removals)
    pub fn max(&self) -> f64 {
        self.max
    }

    /// Sum of the samples
    pub fn sum(&self) -> f64 {
        self.sum
    }

    /// Get the mean (average)
    pub fn mean(&self) -> f64 {
        self.mean
    }

    /// Second central moment (sum of squared deviations)
    pub fn m2(&self) -> f64 {
        self.m2
    }

    /// Third central moment
    pub fn m3(&self) -> f64 {
        self.m3
    }

    /// Fourth central moment
    pub fn m4(&self) -> f64 {
        self.m4
    }

    /// Sample variance, `M2 / (count - 1)`
    pub fn variance(&self) -> f64 {
        self.m2 / (self.count as f64 - 1.0)
    }

    /// Sample standard deviation
    pub fn stddev(&self) -> f64 {
        math::sqrt(self.variance())
    }

    /// Sample skewness, `((n-1)^1.5 / n) * M3 / M2^1.5`
    pub fn skewness(&self) -> f64 {
        let n = self.count as f64;
        let fac = math::powf(n - 1.0, 1.5) / n;
        (fac * self.m3) / math::powf(self.m2, 1.5)
    }

    /// Excess kurtosis, `((n-1)/n * (n-1)) * M4 / M2^2 - 3`
    pub fn kurtosis(&self) -> f64 {
        let n = self.count as f64;
        let fac = ((n - 1.0) / n) * (n - 1.0);
        (fac * self.m4) / (self.m2 * self.m2) - 3.0
    }

    /// Variance, or an error for fewer than two samples
    pub fn try_variance(&self) -> Result<f64, StatsError> {
        self.require_samples()?;
        Ok(self.variance())
    }

    /// Standard deviation, or an error for fewer than two samples
    pub fn try_stddev(&self) -> Result<f64, StatsError> {
        self.require_samples()?;
        Ok(self.stddev())
    }

    /// Skewness, or an error for fewer than two samples or zero spread
    pub fn try_skewness(&self) -> Result<f64, StatsError> {
        self.require_spread()?;
        Ok(self.skewness())
    }

    /// Excess kurtosis, or an error for fewer than two samples or zero spread
    pub fn try_kurtosis(&self) -> Result<f64, StatsError> {
        self.require_spread()?;
        Ok(self.kurtosis())
    }

    fn require_samples(&self) -> Result<(), StatsError> {
        if self.count < 2 {
            return Err(StatsError::DegenerateStatistics { count: self.count });
        }
        Ok(())
    }

    fn require_spread(&self) -> Result<(), StatsError> {
        self.require_samples()?;
        if self.m2 <= 0.0 {
            return Err(StatsError::DegenerateStatistics { count: self.count });
        }
        Ok(())
    }
}

impl Summary for MomentAccumulator {
    fn moments(&self) -> &MomentAccumulator {
        self
    }
}

impl Extend<f64> for MomentAccumulator {
    fn extend<I: IntoIterator<Item = f64>>(&mut self, iter: I) {
        for value in iter {
            self.add(value);
        }
    }
}

impl FromIterator<f64> for MomentAccumulator {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        let mut acc = Self::new();
        acc.extend(iter);
        acc
    }
}
