//! Rolling-window statistics
//!
//! Slides a window of fixed width across a source sequence and emits one row
//! of statistics (sum, min, max, mean, variance, stddev, skew, kurt) per
//! window position. A single window container is reused for the whole pass,
//! so the cost is O(N) in the source length rather than O(N * width).
//!
//! # Example
//!
//! ```
//! use rollstats::rolling::roll;
//!
//! let source: Vec<f64> = (1..=10).map(f64::from).collect();
//! let stats = roll(&source, 3, 0)?;
//!
//! assert_eq!(stats.len(), 8);
//! assert_eq!(stats.sums()[0], 6.0);
//! assert_eq!(stats.means()[0], 2.0);
//!
//! // Semicolon-delimited report, six decimals per field
//! let report = stats.to_report();
//! assert!(report.starts_with("Sum;Min;Max;Mean;Variance;Stddev;Skew;Kurt\n6.000000;"));
//! # Ok::<(), rollstats::traits::StatsError>(())
//! ```
//!
//! # Bounds
//!
//! With the default [`BoundsPolicy::Incremental`] the `min`/`max` columns are
//! not corrected when a sample leaves the window. Use
//! [`BoundsPolicy::Rescan`] when exact per-window bounds are required.

mod config;
mod engine;
mod stats;

pub use config::{BoundsPolicy, RollingConfig, WindowBacking};
pub use engine::{roll, RollingEngine};
pub use stats::{RollingStats, WindowRow, REPORT_HEADER};
