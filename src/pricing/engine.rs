//! Threshold evaluation: per-year indemnities, trigger probability,
//! empirical return period and loss cost

use log::debug;
use serde::{Deserialize, Serialize};

use super::runs::{yearly_max_run, RunState};

/// Outcome of one year under one threshold
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct YearOutcome {
    pub year: i32,
    pub triggered: bool,
    pub indemnity: f64,
}

/// Historical statistics for one trigger threshold
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThresholdResult {
    /// Threshold X; a year triggers when its longest run is > X
    pub threshold: u32,

    /// One entry per distinct season year, ascending
    pub year_outcomes: Vec<YearOutcome>,

    /// Fraction of years triggered, in [0, 1]
    pub probability: f64,

    /// 1 / probability; None when no year ever triggered
    pub return_period_years: Option<f64>,
}

impl ThresholdResult {
    pub fn years(&self) -> usize {
        self.year_outcomes.len()
    }

    pub fn triggered_years(&self) -> usize {
        self.year_outcomes.iter().filter(|o| o.triggered).count()
    }

    pub fn total_indemnity(&self) -> f64 {
        self.year_outcomes.iter().map(|o| o.indemnity).sum()
    }
}

/// Historical loss cost of a threshold relative to the sum insured
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LossCost {
    pub threshold: u32,
    pub total_indemnity: f64,
    pub years: usize,

    /// 100 * total indemnity / (sum insured * years); None when the denominator is 0
    pub cost_pct: Option<f64>,
}

/// Evaluates candidate thresholds against run lengths
#[derive(Debug, Clone, Copy)]
pub struct ThresholdActuarialEngine {
    sum_insured: f64,
}

impl ThresholdActuarialEngine {
    pub fn new(sum_insured: f64) -> Self {
        Self { sum_insured }
    }

    pub fn sum_insured(&self) -> f64 {
        self.sum_insured
    }

    /// Evaluate each threshold in order.
    ///
    /// A threshold greater than the longest run observed anywhere in the
    /// data is omitted from the output rather than reported with zeros, so
    /// the result can be shorter than `thresholds`. A threshold equal to the
    /// longest run is kept and never triggers.
    pub fn evaluate(&self, run_states: &[RunState], thresholds: &[u32]) -> Vec<ThresholdResult> {
        let maxima = yearly_max_run(run_states);
        let Some(&global_max) = maxima.values().max() else {
            debug!("no season years present, nothing to evaluate");
            return Vec::new();
        };

        let year_count = maxima.len() as f64;
        let mut results = Vec::with_capacity(thresholds.len());

        for &threshold in thresholds {
            if global_max < threshold {
                debug!("threshold {} skipped: longest historical run is {} days", threshold, global_max);
                continue;
            }

            let year_outcomes: Vec<YearOutcome> = maxima
                .iter()
                .map(|(&year, &max_run)| {
                    let triggered = max_run > threshold;
                    YearOutcome {
                        year,
                        triggered,
                        indemnity: if triggered { self.sum_insured } else { 0.0 },
                    }
                })
                .collect();

            let triggered = year_outcomes.iter().filter(|o| o.triggered).count() as f64;
            let probability = triggered / year_count;
            let return_period_years = if probability > 0.0 { Some(1.0 / probability) } else { None };

            debug!(
                "threshold {}: {} of {} years triggered (p = {:.4})",
                threshold, triggered, year_count, probability
            );

            results.push(ThresholdResult {
                threshold,
                year_outcomes,
                probability,
                return_period_years,
            });
        }

        results
    }

    /// Loss cost of an evaluated threshold
    pub fn loss_cost(&self, result: &ThresholdResult) -> LossCost {
        let total_indemnity = result.total_indemnity();
        let years = result.years();
        let exposure = self.sum_insured * years as f64;

        LossCost {
            threshold: result.threshold,
            total_indemnity,
            years,
            cost_pct: if exposure > 0.0 { Some(100.0 * total_indemnity / exposure) } else { None },
        }
    }

    pub fn loss_costs(&self, results: &[ThresholdResult]) -> Vec<LossCost> {
        results.iter().map(|r| self.loss_cost(r)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricing::DryRunLengthCalculator;
    use crate::series::{DailyRecord, SeasonFilter};
    use approx::assert_relative_eq;
    use chrono::{Datelike, NaiveDate};
    use std::collections::BTreeSet;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    /// Wet daily series over whole years, with dry spells given as (start, days)
    fn series(first_year: i32, last_year: i32, dry_spells: &[(NaiveDate, i64)]) -> Vec<DailyRecord> {
        let mut out = Vec::new();
        let mut d = date(first_year, 1, 1);
        while d.year() <= last_year {
            let dry = dry_spells
                .iter()
                .any(|&(start, days)| d >= start && d < start + chrono::Duration::days(days));
            out.push(DailyRecord::observed(d, if dry { 0.0 } else { 8.0 }));
            d = d.succ_opt().unwrap();
        }
        out
    }

    fn run_states(series: &[DailyRecord], months: &[u32], dry_mm: f64) -> Vec<RunState> {
        let months: BTreeSet<u32> = months.iter().copied().collect();
        let season = SeasonFilter::new(&months).filter(series);
        DryRunLengthCalculator::new(dry_mm).compute(&season)
    }

    fn find(results: &[ThresholdResult], threshold: u32) -> Option<&ThresholdResult> {
        results.iter().find(|r| r.threshold == threshold)
    }

    #[test]
    fn test_single_dry_spell_two_years() {
        let data = series(1990, 1991, &[(date(1991, 2, 10), 6)]);
        let states = run_states(&data, &[1, 2, 3], 1.0);
        let engine = ThresholdActuarialEngine::new(1000.0);
        let results = engine.evaluate(&states, &[3, 4, 5, 6]);

        for x in [3, 4, 5] {
            let r = find(&results, x).unwrap();
            assert_eq!(r.years(), 2);
            assert!(!r.year_outcomes[0].triggered);
            assert!(r.year_outcomes[1].triggered);
            assert_eq!(r.year_outcomes[1].year, 1991);
            assert_relative_eq!(r.year_outcomes[1].indemnity, 1000.0);
            assert_relative_eq!(r.probability, 0.5);
            assert_relative_eq!(r.return_period_years.unwrap(), 2.0);
        }

        // Longest run equals the threshold: kept, never triggers
        let six = find(&results, 6).unwrap();
        assert_eq!(six.triggered_years(), 0);
        assert_eq!(six.probability, 0.0);
        assert_eq!(six.return_period_years, None);
    }

    #[test]
    fn test_threshold_above_longest_run_is_skipped() {
        let data = series(1990, 1991, &[(date(1991, 2, 10), 6)]);
        let states = run_states(&data, &[1, 2, 3], 1.0);
        let results = ThresholdActuarialEngine::new(1000.0).evaluate(&states, &[7, 3, 30]);

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].threshold, 3);
    }

    #[test]
    fn test_skip_rule_boundary() {
        // Longest run m = 9 somewhere in 2000
        let data = series(2000, 2003, &[(date(2000, 3, 1), 9), (date(2002, 1, 5), 4)]);
        let states = run_states(&data, &(1..=12).collect::<Vec<_>>(), 1.0);
        let thresholds: Vec<u32> = (1..=15).collect();
        let results = ThresholdActuarialEngine::new(1.0).evaluate(&states, &thresholds);

        let present: Vec<u32> = results.iter().map(|r| r.threshold).collect();
        assert_eq!(present, (1..=9).collect::<Vec<_>>());
    }

    #[test]
    fn test_no_dry_days_skips_everything() {
        let data = series(1995, 2004, &[]);
        let states = run_states(&data, &[6, 7, 8], 1.0);
        let results = ThresholdActuarialEngine::new(1000.0).evaluate(&states, &[1, 5, 10]);
        assert!(results.is_empty());
    }

    #[test]
    fn test_empty_run_states() {
        let results = ThresholdActuarialEngine::new(1000.0).evaluate(&[], &[1, 2]);
        assert!(results.is_empty());
    }

    #[test]
    fn test_loss_cost_two_of_ten_years() {
        let data = series(
            2001,
            2010,
            &[
                (date(2003, 1, 10), 15),
                (date(2007, 2, 1), 20),
                (date(2009, 3, 1), 5),
            ],
        );
        let states = run_states(&data, &[1, 2, 3], 1.0);
        let engine = ThresholdActuarialEngine::new(1000.0);
        let results = engine.evaluate(&states, &[10]);

        let r = &results[0];
        assert_eq!(r.years(), 10);
        assert_eq!(r.triggered_years(), 2);
        assert_relative_eq!(r.probability, 0.2);
        assert_relative_eq!(r.return_period_years.unwrap(), 5.0);

        let cost = engine.loss_cost(r);
        assert_relative_eq!(cost.total_indemnity, 2000.0);
        assert_eq!(cost.years, 10);
        assert_relative_eq!(cost.cost_pct.unwrap(), 20.0);
    }

    #[test]
    fn test_zero_sum_insured_cost_is_undefined() {
        let data = series(2001, 2002, &[(date(2001, 1, 1), 12)]);
        let states = run_states(&data, &[1], 1.0);
        let engine = ThresholdActuarialEngine::new(0.0);
        let results = engine.evaluate(&states, &[5]);

        assert_relative_eq!(results[0].probability, 0.5);
        assert_eq!(results[0].year_outcomes[0].indemnity, 0.0);
        assert_eq!(engine.loss_cost(&results[0]).cost_pct, None);
    }

    #[test]
    fn test_years_without_trigger_count_in_probability() {
        // Only 2005 ever has a dry day; the remaining wet years still count
        let data = series(2001, 2008, &[(date(2005, 12, 1), 20)]);
        let states = run_states(&data, &[12], 1.0);
        let results = ThresholdActuarialEngine::new(1.0).evaluate(&states, &[10]);
        assert_eq!(results[0].years(), 8);
        assert_relative_eq!(results[0].probability, 0.125);
        assert_relative_eq!(results[0].return_period_years.unwrap(), 8.0);
    }

    #[test]
    fn test_missing_day_splits_spell() {
        let mut data = series(2012, 2013, &[(date(2012, 4, 1), 10)]);
        let idx = data.iter().position(|r| r.date == date(2012, 4, 5)).unwrap();
        data[idx] = DailyRecord::missing(date(2012, 4, 5));

        let states = run_states(&data, &[4], 1.0);
        let engine = ThresholdActuarialEngine::new(100.0);

        // Runs are 4 and 5, so X = 7 exceeds the longest run and is skipped,
        // X = 5 is kept and never triggers, X = 4 triggers once
        let results = engine.evaluate(&states, &[4, 5, 7]);
        assert_eq!(results.iter().map(|r| r.threshold).collect::<Vec<_>>(), vec![4, 5]);
        assert_eq!(results[0].triggered_years(), 1);
        assert_eq!(results[1].triggered_years(), 0);
    }

    #[test]
    fn test_probability_bounds_and_reciprocal() {
        let data = series(
            1981,
            2000,
            &[
                (date(1983, 1, 1), 25),
                (date(1988, 2, 3), 12),
                (date(1992, 3, 10), 18),
                (date(1999, 1, 20), 30),
            ],
        );
        let states = run_states(&data, &[1, 2, 3], 1.0);
        let thresholds: Vec<u32> = (1..=30).collect();
        let results = ThresholdActuarialEngine::new(1.0).evaluate(&states, &thresholds);

        assert!(!results.is_empty());
        for r in &results {
            assert!((0.0..=1.0).contains(&r.probability));
            match r.return_period_years {
                Some(rp) => assert_relative_eq!(rp, 1.0 / r.probability),
                None => assert_eq!(r.probability, 0.0),
            }
        }
    }

    #[test]
    fn test_evaluate_is_idempotent() {
        let data = series(1990, 1999, &[(date(1993, 1, 1), 14), (date(1996, 2, 1), 9)]);
        let states = run_states(&data, &[1, 2], 1.0);
        let engine = ThresholdActuarialEngine::new(250.0);

        let first = engine.evaluate(&states, &[5, 8, 10, 13]);
        let second = engine.evaluate(&states, &[5, 8, 10, 13]);
        assert_eq!(first, second);
    }
}
