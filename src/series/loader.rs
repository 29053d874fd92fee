//! Load a daily precipitation series from CSV
//!
//! Expected header: `date,precipitation_mm` with ISO dates. Empty, `NA`
//! and `NaN` precipitation fields load as missing observations.

use std::path::Path;

use chrono::NaiveDate;
use csv::Reader;
use log::{debug, warn};

use super::DailyRecord;
use crate::error::SeriesError;

/// Raw CSV row
#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    #[serde(alias = "Date", alias = "time")]
    date: String,
    #[serde(alias = "precipitation", alias = "precip", alias = "pr")]
    precipitation_mm: Option<String>,
}

impl CsvRow {
    fn to_record(self, line: u64) -> Result<DailyRecord, SeriesError> {
        let date = NaiveDate::parse_from_str(self.date.trim(), "%Y-%m-%d").map_err(|_| {
            SeriesError::InvalidDate { line, value: self.date.clone() }
        })?;

        let precipitation_mm = match self.precipitation_mm.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(token) if token.eq_ignore_ascii_case("na") || token.eq_ignore_ascii_case("nan") => None,
            Some(token) => {
                let value: f64 = token.parse().map_err(|_| SeriesError::InvalidPrecipitation {
                    line,
                    value: token.to_string(),
                })?;
                if value.is_nan() {
                    None
                } else if value < 0.0 || value.is_infinite() {
                    return Err(SeriesError::InvalidPrecipitation { line, value: token.to_string() });
                } else {
                    Some(value)
                }
            }
        };

        Ok(DailyRecord { date, precipitation_mm })
    }
}

/// Inclusive date window applied while loading
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateWindow {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl DateWindow {
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start.map_or(true, |s| date >= s) && self.end.map_or(true, |e| date <= e)
    }
}

/// Load a series from a CSV file
pub fn load_series<P: AsRef<Path>>(path: P, window: DateWindow) -> Result<Vec<DailyRecord>, SeriesError> {
    let path = path.as_ref();
    debug!("loading daily series from {}", path.display());
    let reader = Reader::from_path(path)?;
    read_records(reader, window)
}

/// Load a series from any reader (e.g., string buffer, network stream)
pub fn load_series_from_reader<R: std::io::Read>(reader: R, window: DateWindow) -> Result<Vec<DailyRecord>, SeriesError> {
    read_records(Reader::from_reader(reader), window)
}

fn read_records<R: std::io::Read>(mut reader: Reader<R>, window: DateWindow) -> Result<Vec<DailyRecord>, SeriesError> {
    let headers = reader.headers()?.clone();
    let mut series: Vec<DailyRecord> = Vec::new();

    for result in reader.records() {
        let raw = result?;
        let line = raw.position().map(|p| p.line()).unwrap_or(0);
        let row: CsvRow = raw.deserialize(Some(&headers))?;
        let record = row.to_record(line)?;

        if !window.contains(record.date) {
            continue;
        }

        // Ascending with no duplicate dates
        if let Some(previous) = series.last() {
            if record.date <= previous.date {
                return Err(SeriesError::OutOfOrder {
                    previous: previous.date,
                    current: record.date,
                });
            }
        }

        series.push(record);
    }

    let missing = series.iter().filter(|r| r.is_missing()).count();
    if missing > 0 {
        warn!("{} of {} loaded days have no precipitation observation", missing, series.len());
    }
    debug!("loaded {} daily records", series.len());

    Ok(series)
}
