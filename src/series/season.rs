//! Restrict a daily series to the analysis season

use std::collections::BTreeSet;

use log::debug;

use super::{DailyRecord, SeasonRecord};

/// Keeps only records whose calendar month is in the season
#[derive(Debug, Clone)]
pub struct SeasonFilter {
    months: BTreeSet<u32>,
}

impl SeasonFilter {
    pub fn new(months: &BTreeSet<u32>) -> Self {
        Self { months: months.clone() }
    }

    pub fn months(&self) -> &BTreeSet<u32> {
        &self.months
    }

    /// Filter preserving input order. An empty result is valid.
    pub fn filter(&self, series: &[DailyRecord]) -> Vec<SeasonRecord> {
        let retained: Vec<SeasonRecord> = series
            .iter()
            .map(SeasonRecord::from_daily)
            .filter(|r| self.months.contains(&r.month))
            .collect();

        debug!(
            "season filter kept {} of {} records (months {:?})",
            retained.len(),
            series.len(),
            self.months
        );
        retained
    }
}
