//! Daily precipitation series, season filtering and CSV loading

mod data;
mod season;
pub mod loader;

pub use data::{DailyRecord, SeasonRecord, SeriesCoverage};
pub use season::SeasonFilter;
pub use loader::{load_series, load_series_from_reader, DateWindow};
