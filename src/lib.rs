//! Drought Index - historical pricing for consecutive-dry-day parametric insurance
//!
//! This library provides:
//! - Season filtering of a daily precipitation series
//! - Consecutive dry-day run lengths with per-year reset
//! - Multi-threshold trigger probability, empirical return period and loss cost
//! - Plain-text reporting of the per-threshold statistics

pub mod error;
pub mod series;
pub mod config;
pub mod pricing;
pub mod analysis;
pub mod report;

// Re-export commonly used types
pub use error::{ConfigError, SeriesError};
pub use series::{DailyRecord, SeasonRecord, SeasonFilter};
pub use config::ThresholdConfig;
pub use pricing::{DryRunLengthCalculator, RunState, ThresholdActuarialEngine, ThresholdResult, YearOutcome, LossCost};
pub use analysis::{AnalysisRunner, AnalysisOutcome, AnalysisStatus};
pub use report::ReportFormatter;
