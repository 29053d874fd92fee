//! Analysis configuration: dry-day definition, trigger thresholds, sum insured and season

mod parse;

pub use parse::{parse_months, parse_thresholds};

use std::collections::BTreeSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Default dry-day cutoff in mm
pub const DEFAULT_DRY_DAY_THRESHOLD_MM: f64 = 1.0;

/// Default sum insured
pub const DEFAULT_SUM_INSURED: f64 = 1000.0;

/// Configuration for a single analysis run
///
/// Thresholds and months are sets, so duplicates collapse and iteration is ascending.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThresholdConfig {
    /// A day is dry when precipitation <= this value (mm)
    pub dry_day_threshold_mm: f64,

    /// Candidate trigger thresholds X; a year pays when its longest run exceeds X
    pub consecutive_day_thresholds: BTreeSet<u32>,

    /// Indemnity paid in a triggered year
    pub sum_insured: f64,

    /// Calendar months (1-12) making up the analysis season
    pub season_months: BTreeSet<u32>,
}

impl Default for ThresholdConfig {
    fn default() -> Self {
        Self {
            dry_day_threshold_mm: DEFAULT_DRY_DAY_THRESHOLD_MM,
            consecutive_day_thresholds: [10, 15, 20].into_iter().collect(),
            sum_insured: DEFAULT_SUM_INSURED,
            // Oct-Mar rainy season
            season_months: [1, 2, 3, 10, 11, 12].into_iter().collect(),
        }
    }
}

impl ThresholdConfig {
    pub fn new(
        dry_day_threshold_mm: f64,
        thresholds: impl IntoIterator<Item = u32>,
        sum_insured: f64,
        season_months: impl IntoIterator<Item = u32>,
    ) -> Self {
        Self {
            dry_day_threshold_mm,
            consecutive_day_thresholds: thresholds.into_iter().collect(),
            sum_insured,
            season_months: season_months.into_iter().collect(),
        }
    }

    /// Load and validate a config from a JSON file
    pub fn from_json_path<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Parse and validate a config from JSON text
    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Check every field before any computation is attempted
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.dry_day_threshold_mm.is_finite() {
            return Err(ConfigError::NonFinite { field: "dry_day_threshold_mm" });
        }
        if self.dry_day_threshold_mm < 0.0 {
            return Err(ConfigError::NegativeDryDayThreshold(self.dry_day_threshold_mm));
        }
        if !self.sum_insured.is_finite() {
            return Err(ConfigError::NonFinite { field: "sum_insured" });
        }
        if self.sum_insured < 0.0 {
            return Err(ConfigError::NegativeSumInsured(self.sum_insured));
        }
        if self.season_months.is_empty() {
            return Err(ConfigError::EmptySeasonMonths);
        }
        if let Some(&month) = self.season_months.iter().find(|&&m| !(1..=12).contains(&m)) {
            return Err(ConfigError::InvalidMonth(month));
        }
        if self.consecutive_day_thresholds.is_empty() {
            return Err(ConfigError::EmptyThresholds);
        }
        if self.consecutive_day_thresholds.contains(&0) {
            return Err(ConfigError::NonPositiveThreshold);
        }
        Ok(())
    }

    /// Thresholds in evaluation order
    pub fn thresholds(&self) -> Vec<u32> {
        self.consecutive_day_thresholds.iter().copied().collect()
    }
}
