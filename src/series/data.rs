//! Daily observation records

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// One day of observed precipitation at a point
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DailyRecord {
    /// Observation date
    pub date: NaiveDate,

    /// Daily precipitation in mm (None = missing observation)
    pub precipitation_mm: Option<f64>,
}

impl DailyRecord {
    pub fn new(date: NaiveDate, precipitation_mm: Option<f64>) -> Self {
        Self { date, precipitation_mm }
    }

    /// Record with a known precipitation value
    pub fn observed(date: NaiveDate, precipitation_mm: f64) -> Self {
        Self::new(date, Some(precipitation_mm))
    }

    /// Record with no observation for the day
    pub fn missing(date: NaiveDate) -> Self {
        Self::new(date, None)
    }

    pub fn is_missing(&self) -> bool {
        self.precipitation_mm.is_none()
    }
}

/// A daily record retained by season filtering, tagged with its calendar year and month
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeasonRecord {
    pub date: NaiveDate,
    pub precipitation_mm: Option<f64>,

    /// Calendar year (proleptic Gregorian)
    pub year: i32,

    /// Calendar month (1-12)
    pub month: u32,
}

impl SeasonRecord {
    pub fn from_daily(record: &DailyRecord) -> Self {
        Self {
            date: record.date,
            precipitation_mm: record.precipitation_mm,
            year: record.date.year(),
            month: record.date.month(),
        }
    }

    /// Dry iff precipitation is observed and at or below the threshold.
    /// A missing observation is never dry.
    pub fn is_dry(&self, dry_day_threshold_mm: f64) -> bool {
        matches!(self.precipitation_mm, Some(p) if p <= dry_day_threshold_mm)
    }
}

/// Basic coverage statistics for a loaded series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesCoverage {
    pub records: usize,
    pub first_date: Option<NaiveDate>,
    pub last_date: Option<NaiveDate>,
    pub missing_observations: usize,
}

impl SeriesCoverage {
    pub fn of(series: &[DailyRecord]) -> Self {
        Self {
            records: series.len(),
            first_date: series.first().map(|r| r.date),
            last_date: series.last().map(|r| r.date),
            missing_observations: series.iter().filter(|r| r.is_missing()).count(),
        }
    }
}
