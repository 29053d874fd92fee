//! Parsing of form-style inputs (comma-separated thresholds and months)

use std::collections::BTreeSet;

use crate::error::ConfigError;

const MONTH_NAMES: [&str; 12] = [
    "january", "february", "march", "april", "may", "june",
    "july", "august", "september", "october", "november", "december",
];

/// Parse `"3, 5,10"` into an ordered set of positive integers
pub fn parse_thresholds(input: &str) -> Result<BTreeSet<u32>, ConfigError> {
    let mut thresholds = BTreeSet::new();

    for token in input.split(',').map(str::trim).filter(|t| !t.is_empty()) {
        let value: u32 = token
            .parse()
            .map_err(|_| ConfigError::InvalidThresholdToken(token.to_string()))?;
        if value == 0 {
            return Err(ConfigError::NonPositiveThreshold);
        }
        thresholds.insert(value);
    }

    if thresholds.is_empty() {
        return Err(ConfigError::EmptyThresholds);
    }
    Ok(thresholds)
}

/// Parse a comma-separated month list. Accepts numbers (`1`-`12`),
/// full names and three-letter abbreviations in any case.
pub fn parse_months(input: &str) -> Result<BTreeSet<u32>, ConfigError> {
    let mut months = BTreeSet::new();

    for token in input.split(',').map(str::trim).filter(|t| !t.is_empty()) {
        months.insert(parse_month(token)?);
    }

    if months.is_empty() {
        return Err(ConfigError::EmptySeasonMonths);
    }
    Ok(months)
}

fn parse_month(token: &str) -> Result<u32, ConfigError> {
    if let Ok(number) = token.parse::<u32>() {
        return if (1..=12).contains(&number) {
            Ok(number)
        } else {
            Err(ConfigError::InvalidMonth(number))
        };
    }

    let lower = token.to_ascii_lowercase();
    MONTH_NAMES
        .iter()
        .position(|name| *name == lower || (lower.len() == 3 && name.starts_with(&lower)))
        .map(|idx| idx as u32 + 1)
        .ok_or_else(|| ConfigError::InvalidMonthToken(token.to_string()))
}
