//! Consecutive dry-day run lengths
//!
//! The accumulator restarts on the first season record of every calendar
//! year. The contract prices annual outcomes, so a spell spanning a year
//! boundary is split and each part counts only towards its own year.
//!
//! A missing observation is treated as a non-dry day: it ends any streak in
//! progress and has run length 0, and the next dry day starts a new streak
//! at 1. It has no effect on anything beyond that.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::series::SeasonRecord;

/// Run state of a single season day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunState {
    pub date: NaiveDate,
    pub year: i32,
    pub is_dry: bool,

    /// Precipitation was not observed on this day
    pub is_missing: bool,

    /// Consecutive dry days ending at this record (0 on a non-dry day)
    pub run_length: u32,
}

/// Aggregate dry-spell figures for one year of season data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearSummary {
    pub year: i32,
    pub season_days: u32,
    pub dry_days: u32,
    pub missing_days: u32,
    pub max_run_length: u32,
}

/// Scans season records left to right producing one `RunState` per record
#[derive(Debug, Clone, Copy)]
pub struct DryRunLengthCalculator {
    dry_day_threshold_mm: f64,
}

impl DryRunLengthCalculator {
    pub fn new(dry_day_threshold_mm: f64) -> Self {
        Self { dry_day_threshold_mm }
    }

    pub fn compute(&self, season_series: &[SeasonRecord]) -> Vec<RunState> {
        let mut states = Vec::with_capacity(season_series.len());
        let mut run_length: u32 = 0;
        let mut current_year: Option<i32> = None;
        let mut missing = 0usize;

        for record in season_series {
            if current_year != Some(record.year) {
                run_length = 0;
                current_year = Some(record.year);
            }

            let is_missing = record.precipitation_mm.is_none();
            let is_dry = record.is_dry(self.dry_day_threshold_mm);
            if is_missing {
                missing += 1;
            }

            run_length = if is_dry { run_length + 1 } else { 0 };

            states.push(RunState {
                date: record.date,
                year: record.year,
                is_dry,
                is_missing,
                run_length,
            });
        }

        if missing > 0 {
            warn!("{} season days have missing precipitation and were counted as not dry", missing);
        }
        debug!("computed run lengths for {} season days", states.len());

        states
    }
}

/// Longest run per year, in ascending year order
pub fn yearly_max_run(run_states: &[RunState]) -> BTreeMap<i32, u32> {
    let mut maxima = BTreeMap::new();
    for state in run_states {
        let entry = maxima.entry(state.year).or_insert(0);
        *entry = (*entry).max(state.run_length);
    }
    maxima
}

/// Per-year dry-spell summary, in ascending year order
pub fn summarize_years(run_states: &[RunState]) -> Vec<YearSummary> {
    let mut by_year: BTreeMap<i32, YearSummary> = BTreeMap::new();

    for state in run_states {
        let summary = by_year.entry(state.year).or_insert(YearSummary {
            year: state.year,
            season_days: 0,
            dry_days: 0,
            missing_days: 0,
            max_run_length: 0,
        });
        summary.season_days += 1;
        summary.dry_days += state.is_dry as u32;
        summary.missing_days += state.is_missing as u32;
        summary.max_run_length = summary.max_run_length.max(state.run_length);
    }

    by_year.into_values().collect()
}
