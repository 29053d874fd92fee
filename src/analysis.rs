//! End-to-end analysis runner
//!
//! Holds one immutable daily series and prices any number of
//! configurations against it without reloading.

use log::{info, warn};
use rayon::prelude::*;
use serde::Serialize;

use crate::config::ThresholdConfig;
use crate::error::ConfigError;
use crate::pricing::{
    summarize_years, DryRunLengthCalculator, LossCost, ThresholdActuarialEngine, ThresholdResult, YearSummary,
};
use crate::series::{DailyRecord, SeasonFilter, SeriesCoverage};

/// What an analysis was able to produce
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisStatus {
    /// At least one threshold was evaluated
    Priced,
    /// No records fell inside the season months
    NoSeasonData,
    /// Season data exists but every threshold exceeds the longest run on record
    NoThresholdBreached,
}

/// Full output of one analysis run
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisOutcome {
    pub status: AnalysisStatus,
    pub config: ThresholdConfig,
    pub coverage: SeriesCoverage,

    /// Records retained by the season filter
    pub season_days: usize,

    /// Longest dry run across all season years
    pub longest_run: u32,

    pub years: Vec<YearSummary>,
    pub results: Vec<ThresholdResult>,
    pub loss_costs: Vec<LossCost>,
}

impl AnalysisOutcome {
    pub fn year_count(&self) -> usize {
        self.years.len()
    }

    pub fn result_for(&self, threshold: u32) -> Option<&ThresholdResult> {
        self.results.iter().find(|r| r.threshold == threshold)
    }

    pub fn loss_cost_for(&self, threshold: u32) -> Option<&LossCost> {
        self.loss_costs.iter().find(|c| c.threshold == threshold)
    }

    /// Requested thresholds that were dropped for exceeding the longest run
    pub fn skipped_thresholds(&self) -> Vec<u32> {
        self.config
            .consecutive_day_thresholds
            .iter()
            .copied()
            .filter(|&x| self.result_for(x).is_none())
            .collect()
    }
}

/// Prices configurations against a pre-loaded series
#[derive(Debug, Clone)]
pub struct AnalysisRunner {
    series: Vec<DailyRecord>,
    coverage: SeriesCoverage,
}

impl AnalysisRunner {
    pub fn new(series: Vec<DailyRecord>) -> Self {
        let coverage = SeriesCoverage::of(&series);
        Self { series, coverage }
    }

    pub fn series(&self) -> &[DailyRecord] {
        &self.series
    }

    pub fn coverage(&self) -> &SeriesCoverage {
        &self.coverage
    }

    /// Validate the config, then filter, compute runs and evaluate thresholds
    pub fn run(&self, config: &ThresholdConfig) -> Result<AnalysisOutcome, ConfigError> {
        config.validate()?;

        let season = SeasonFilter::new(&config.season_months).filter(&self.series);
        let run_states = DryRunLengthCalculator::new(config.dry_day_threshold_mm).compute(&season);
        let years = summarize_years(&run_states);
        let longest_run = years.iter().map(|y| y.max_run_length).max().unwrap_or(0);

        let engine = ThresholdActuarialEngine::new(config.sum_insured);
        let results = engine.evaluate(&run_states, &config.thresholds());
        let loss_costs = engine.loss_costs(&results);

        let status = if season.is_empty() {
            warn!("no records fall inside season months {:?}", config.season_months);
            AnalysisStatus::NoSeasonData
        } else if results.is_empty() {
            warn!(
                "all thresholds {:?} exceed the longest dry run on record ({} days)",
                config.consecutive_day_thresholds, longest_run
            );
            AnalysisStatus::NoThresholdBreached
        } else {
            AnalysisStatus::Priced
        };

        info!(
            "analysis complete: {} season days over {} years, {} of {} thresholds evaluated",
            season.len(),
            years.len(),
            results.len(),
            config.consecutive_day_thresholds.len()
        );

        Ok(AnalysisOutcome {
            status,
            config: config.clone(),
            coverage: self.coverage.clone(),
            season_days: season.len(),
            longest_run,
            years,
            results,
            loss_costs,
        })
    }

    /// Run independent configurations in parallel, one outcome per config in input order
    pub fn run_batch(&self, configs: &[ThresholdConfig]) -> Vec<Result<AnalysisOutcome, ConfigError>> {
        configs.par_iter().map(|config| self.run(config)).collect()
    }
}
