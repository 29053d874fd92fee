//! Plain-text rendering of analysis results

use std::fmt::Write;

use crate::analysis::{AnalysisOutcome, AnalysisStatus};
use crate::pricing::{LossCost, ThresholdResult};

/// Marker printed in place of an undefined return period
pub const NO_OCCURRENCE: &str = "no historical occurrence";

/// Renders threshold statistics for display
#[derive(Debug, Clone, Copy)]
pub struct ReportFormatter {
    /// Include the per-year dry-spell table
    pub year_table: bool,
}

impl Default for ReportFormatter {
    fn default() -> Self {
        Self { year_table: true }
    }
}

impl ReportFormatter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Report for a complete analysis, including the empty-data and
    /// no-breach states
    pub fn format_outcome(&self, outcome: &AnalysisOutcome) -> String {
        let mut out = String::new();
        let config = &outcome.config;

        let _ = writeln!(out, "Consecutive dry-day index pricing");
        let _ = writeln!(out, "{}", "=".repeat(40));
        let _ = writeln!(out, "Dry day:        <= {:.2} mm", config.dry_day_threshold_mm);
        let _ = writeln!(out, "Season months:  {}", join(config.season_months.iter()));
        let _ = writeln!(out, "Thresholds:     {}", join(config.consecutive_day_thresholds.iter()));
        let _ = writeln!(out, "Sum insured:    {:.2}", config.sum_insured);
        let _ = writeln!(
            out,
            "Years analysed: {} ({} season days)",
            outcome.year_count(),
            outcome.season_days
        );
        out.push('\n');

        match outcome.status {
            AnalysisStatus::NoSeasonData => {
                let _ = writeln!(out, "No data available for the selected season months.");
                return out;
            }
            AnalysisStatus::NoThresholdBreached => {
                if self.year_table {
                    out.push_str(&self.format_years(outcome));
                    out.push('\n');
                }
                let _ = writeln!(
                    out,
                    "No threshold is historically breached ({}): the longest dry run on record is {} days.",
                    NO_OCCURRENCE, outcome.longest_run
                );
                return out;
            }
            AnalysisStatus::Priced => {}
        }

        if self.year_table {
            out.push_str(&self.format_years(outcome));
            out.push('\n');
        }

        out.push_str(&self.format(&outcome.results, &outcome.loss_costs));

        let skipped = outcome.skipped_thresholds();
        if !skipped.is_empty() {
            let _ = writeln!(
                out,
                "\nOmitted (exceed the longest dry run of {} days): {}",
                outcome.longest_run,
                join(skipped.iter())
            );
        }

        out
    }

    /// Probability and return period per threshold, followed by the cost block
    pub fn format(&self, results: &[ThresholdResult], loss_costs: &[LossCost]) -> String {
        let mut out = String::new();

        if results.is_empty() {
            let _ = writeln!(out, "No threshold is historically breached ({}).", NO_OCCURRENCE);
            return out;
        }

        for result in results {
            let _ = writeln!(out, "Threshold: more than {} consecutive dry days", result.threshold);
            let _ = writeln!(out, "  Probability:   {:.2}%", result.probability * 100.0);
            match result.return_period_years {
                Some(rp) => {
                    let _ = writeln!(out, "  Return period: {:.2} years", rp);
                }
                None => {
                    let _ = writeln!(out, "  Return period: {}", NO_OCCURRENCE);
                }
            }
        }

        let _ = writeln!(out, "\nCost as % of sum insured");
        for cost in loss_costs {
            match cost.cost_pct {
                Some(pct) => {
                    let _ = writeln!(out, "  > {:>3} days: {:.2}%", cost.threshold, pct);
                }
                None => {
                    let _ = writeln!(out, "  > {:>3} days: undefined (zero exposure)", cost.threshold);
                }
            }
        }

        out
    }

    fn format_years(&self, outcome: &AnalysisOutcome) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{:>6} {:>8} {:>8} {:>8}", "Year", "MaxRun", "DryDays", "Missing");
        let _ = writeln!(out, "{}", "-".repeat(33));
        for year in &outcome.years {
            let _ = writeln!(
                out,
                "{:>6} {:>8} {:>8} {:>8}",
                year.year, year.max_run_length, year.dry_days, year.missing_days
            );
        }
        out
    }
}

fn join<'a>(values: impl Iterator<Item = &'a u32>) -> String {
    values.map(|v| v.to_string()).collect::<Vec<_>>().join(", ")
}
