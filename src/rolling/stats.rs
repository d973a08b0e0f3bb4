//! Per-window result rows and the semicolon-delimited report

use core::fmt;

use crate::traits::{StatsError, Summary};

#[cfg(feature = "std")]
use std::{string::String, vec::Vec};

#[cfg(not(feature = "std"))]
extern crate alloc;
#[cfg(not(feature = "std"))]
use alloc::{string::String, vec::Vec};

/// Header line of the text report
pub const REPORT_HEADER: &str = "Sum;Min;Max;Mean;Variance;Stddev;Skew;Kurt";

/// Statistics of a single window position
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WindowRow {
    pub sum: f64,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub variance: f64,
    pub stddev: f64,
    pub skew: f64,
    pub kurt: f64,
}

impl WindowRow {
    /// Snapshot the current statistics of `summary`
    pub fn from_summary<S: Summary + ?Sized>(summary: &S) -> Self {
        Self {
            sum: summary.sum(),
            min: summary.min(),
            max: summary.max(),
            mean: summary.mean(),
            variance: summary.variance(),
            stddev: summary.stddev(),
            skew: summary.skewness(),
            kurt: summary.kurtosis(),
        }
    }
}

impl fmt::Display for WindowRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{};{};{};{};{};{};{};{}",
            Fixed6(self.sum),
            Fixed6(self.min),
            Fixed6(self.max),
            Fixed6(self.mean),
            Fixed6(self.variance),
            Fixed6(self.stddev),
            Fixed6(self.skew),
            Fixed6(self.kurt)
        )
    }
}

/// Output of a rolling pass: eight parallel columns, one entry per window
/// position in window start order
///
/// Degenerate windows (a single sample, or zero spread) carry NaN/Infinity
/// in the variance, stddev, skew and kurt columns.
#[derive(Clone, Debug, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "RawColumns")
)]
pub struct RollingStats {
    #[cfg_attr(feature = "serde", serde(serialize_with = "crate::float_serde::vec::serialize"))]
    sums: Vec<f64>,
    #[cfg_attr(feature = "serde", serde(serialize_with = "crate::float_serde::vec::serialize"))]
    mins: Vec<f64>,
    #[cfg_attr(feature = "serde", serde(serialize_with = "crate::float_serde::vec::serialize"))]
    maxs: Vec<f64>,
    #[cfg_attr(feature = "serde", serde(serialize_with = "crate::float_serde::vec::serialize"))]
    means: Vec<f64>,
    #[cfg_attr(feature = "serde", serde(serialize_with = "crate::float_serde::vec::serialize"))]
    variances: Vec<f64>,
    #[cfg_attr(feature = "serde", serde(serialize_with = "crate::float_serde::vec::serialize"))]
    stddevs: Vec<f64>,
    #[cfg_attr(feature = "serde", serde(serialize_with = "crate::float_serde::vec::serialize"))]
    skews: Vec<f64>,
    #[cfg_attr(feature = "serde", serde(serialize_with = "crate::float_serde::vec::serialize"))]
    kurts: Vec<f64>,
}

/// Unchecked columns as read from a serialized [`RollingStats`]
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawColumns {
    #[serde(deserialize_with = "crate::float_serde::vec::deserialize")]
    sums: Vec<f64>,
    #[serde(deserialize_with = "crate::float_serde::vec::deserialize")]
    mins: Vec<f64>,
    #[serde(deserialize_with = "crate::float_serde::vec::deserialize")]
    maxs: Vec<f64>,
    #[serde(deserialize_with = "crate::float_serde::vec::deserialize")]
    means: Vec<f64>,
    #[serde(deserialize_with = "crate::float_serde::vec::deserialize")]
    variances: Vec<f64>,
    #[serde(deserialize_with = "crate::float_serde::vec::deserialize")]
    stddevs: Vec<f64>,
    #[serde(deserialize_with = "crate::float_serde::vec::deserialize")]
    skews: Vec<f64>,
    #[serde(deserialize_with = "crate::float_serde::vec::deserialize")]
    kurts: Vec<f64>,
}

#[cfg(feature = "serde")]
impl TryFrom<RawColumns> for RollingStats {
    type Error = StatsError;

    fn try_from(raw: RawColumns) -> Result<Self, StatsError> {
        let stats = Self {
            sums: raw.sums,
            mins: raw.mins,
            maxs: raw.maxs,
            means: raw.means,
            variances: raw.variances,
            stddevs: raw.stddevs,
            skews: raw.skews,
            kurts: raw.kurts,
        };
        let rows = stats.len();
        if stats.columns().iter().any(|column| column.len() != rows) {
            return Err(StatsError::invalid("rolling statistics columns differ in length"));
        }
        Ok(stats)
    }
}

impl RollingStats {
    /// Reserve room for `rows` rows in every column
    pub(crate) fn with_capacity(rows: usize) -> Result<Self, StatsError> {
        let mut stats = Self::default();
        for column in stats.columns_mut() {
            column
                .try_reserve_exact(rows)
                .map_err(|_| StatsError::AllocationFailure { requested: rows })?;
        }
        Ok(stats)
    }

    /// Append the current statistics of `summary` as a new row
    pub(crate) fn push_row<S: Summary + ?Sized>(&mut self, summary: &S) {
        let row = WindowRow::from_summary(summary);
        self.sums.push(row.sum);
        self.mins.push(row.min);
        self.maxs.push(row.max);
        self.means.push(row.mean);
        self.variances.push(row.variance);
        self.stddevs.push(row.stddev);
        self.skews.push(row.skew);
        self.kurts.push(row.kurt);
    }

    #[cfg(feature = "serde")]
    fn columns(&self) -> [&Vec<f64>; 8] {
        [
            &self.sums,
            &self.mins,
            &self.maxs,
            &self.means,
            &self.variances,
            &self.stddevs,
            &self.skews,
            &self.kurts,
        ]
    }

    fn columns_mut(&mut self) -> [&mut Vec<f64>; 8] {
        [
            &mut self.sums,
            &mut self.mins,
            &mut self.maxs,
            &mut self.means,
            &mut self.variances,
            &mut self.stddevs,
            &mut self.skews,
            &mut self.kurts,
        ]
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.sums.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.sums.is_empty()
    }

    /// Window sums
    pub fn sums(&self) -> &[f64] {
        &self.sums
    }

    /// Window minimums (stale under `BoundsPolicy::Incremental`)
    pub fn mins(&self) -> &[f64] {
        &self.mins
    }

    /// Window maximums (stale under `BoundsPolicy::Incremental`)
    pub fn maxs(&self) -> &[f64] {
        &self.maxs
    }

    /// Window means
    pub fn means(&self) -> &[f64] {
        &self.means
    }

    /// Window sample variances
    pub fn variances(&self) -> &[f64] {
        &self.variances
    }

    /// Window standard deviations
    pub fn stddevs(&self) -> &[f64] {
        &self.stddevs
    }

    /// Window skewness
    pub fn skews(&self) -> &[f64] {
        &self.skews
    }

    /// Window excess kurtosis
    pub fn kurts(&self) -> &[f64] {
        &self.kurts
    }

    /// The `index`-th row, if any
    pub fn row(&self, index: usize) -> Option<WindowRow> {
        if index >= self.len() {
            return None;
        }
        Some(self.row_at(index))
    }

    /// Iterate over the rows in window start order
    pub fn rows(&self) -> impl ExactSizeIterator<Item = WindowRow> + '_ {
        (0..self.len()).map(move |i| self.row_at(i))
    }

    fn row_at(&self, index: usize) -> WindowRow {
        WindowRow {
            sum: self.sums[index],
            min: self.mins[index],
            max: self.maxs[index],
            mean: self.means[index],
            variance: self.variances[index],
            stddev: self.stddevs[index],
            skew: self.skews[index],
            kurt: self.kurts[index],
        }
    }

    /// Write the report: [`REPORT_HEADER`], then one line per row with each
    /// field printed to six decimals
    pub fn write_report<W: fmt::Write>(&self, out: &mut W) -> fmt::Result {
        writeln!(out, "{}", REPORT_HEADER)?;
        for row in self.rows() {
            writeln!(out, "{}", row)?;
        }
        Ok(())
    }

    /// Render the report into a new string
    pub fn to_report(&self) -> String {
        let mut out = String::new();
        // writing into a String cannot fail
        let _ = self.write_report(&mut out);
        out
    }
}

impl fmt::Display for RollingStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_report(f)
    }
}

/// Six-decimal fixed formatting that spells non-finite values like C's `%.6f`
struct Fixed6(f64);

impl fmt::Display for Fixed6 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = self.0;
        if value.is_nan() {
            f.write_str(if value.is_sign_negative() { "-nan" } else { "nan" })
        } else if value.is_infinite() {
            f.write_str(if value > 0.0 { "inf" } else { "-inf" })
        } else {
            write!(f, "{:.6}", value)
        }
    }
}
