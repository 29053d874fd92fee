//! Error types for configuration and series loading

use chrono::NaiveDate;
use thiserror::Error;

/// Invalid analysis configuration. Raised before any computation starts.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("season must contain at least one month")]
    EmptySeasonMonths,

    #[error("month {0} is outside 1..=12")]
    InvalidMonth(u32),

    #[error("unrecognised month '{0}'")]
    InvalidMonthToken(String),

    #[error("at least one consecutive-day threshold is required")]
    EmptyThresholds,

    #[error("consecutive-day thresholds must be positive integers")]
    NonPositiveThreshold,

    #[error("'{0}' is not a positive integer threshold")]
    InvalidThresholdToken(String),

    #[error("sum insured must be >= 0, got {0}")]
    NegativeSumInsured(f64),

    #[error("dry-day threshold must be >= 0 mm, got {0}")]
    NegativeDryDayThreshold(f64),

    #[error("{field} must be a finite number")]
    NonFinite { field: &'static str },

    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Failure while loading a daily precipitation series.
#[derive(Debug, Error)]
pub enum SeriesError {
    #[error("failed to read series: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed series CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("line {line}: invalid date '{value}' (expected YYYY-MM-DD)")]
    InvalidDate { line: u64, value: String },

    #[error("line {line}: invalid precipitation '{value}'")]
    InvalidPrecipitation { line: u64, value: String },

    #[error("series must be strictly ascending by date: {current} follows {previous}")]
    OutOfOrder {
        previous: NaiveDate,
        current: NaiveDate,
    },
}
