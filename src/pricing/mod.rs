//! Dry-spell run lengths and threshold pricing

mod runs;
mod engine;

pub use runs::{DryRunLengthCalculator, RunState, YearSummary, summarize_years, yearly_max_run};
pub use engine::{ThresholdActuarialEngine, ThresholdResult, YearOutcome, LossCost};
