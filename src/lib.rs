//! Daily lows and highs out of the CSV exports of weather stations, with a
//! few statistics on top of them.
//!
//! Every file is expected to hold one year of readings. They go through
//! [`record::parse_str`], are folded into one [`DailyTemp`] per day by the
//! [`DailyAggregator`], and end up either in [`YearStatistics`] or merged with
//! the other years in a [`SeasonalProfile`].

use std::path::Path;

use tracing::debug;

pub mod daily;
pub mod profile;
pub mod record;
pub mod stats;

pub use daily::{DailyAggregator, DailyTemp, YearSeries};
pub use profile::{Curve, ProfileError, ProfileSummary, Run, SeasonalPoint, SeasonalProfile};
pub use record::{DateError, FormatError, NumberError, ParseError, Reading};
pub use stats::YearStatistics;

/// 7°C, when it's time to change between winter and summer tires.
pub const THRESHOLD: f64 = 7.0;

/// Aggregate the readings of a file already loaded in memory.
pub fn parse_year(filename: &str, input: &str) -> Result<YearSeries, ParseError> {
    let mut aggregator = DailyAggregator::new();
    aggregator.extend(record::parse_str(filename, input)?);

    let series = aggregator.finish().ok_or_else(|| FormatError::NoData {
        filename: filename.to_string(),
    })?;
    debug!(
        filename,
        year = series.year(),
        days = series.days().len(),
        "aggregated"
    );

    Ok(series)
}

pub fn load_year(path: impl AsRef<Path>) -> Result<YearSeries, ParseError> {
    let filename = path.as_ref().display().to_string();
    let input = std::fs::read_to_string(&path).map_err(|source| ParseError::Io {
        filename: filename.clone(),
        source,
    })?;

    parse_year(&filename, &input)
}

/// Stops at the first file that can't be parsed.
pub fn load_years<P: AsRef<Path>>(
    paths: impl IntoIterator<Item = P>,
) -> Result<Vec<YearSeries>, ParseError> {
    paths.into_iter().map(load_year).collect()
}

#[cfg(test)]
mod tests {
    use time::macros::date;

    use super::*;

    #[test]
    fn parse_a_whole_year() {
        let input = "\
Year,Day,Hour,Air Temperature
2019,0,0,-4.0
2019,0,6,-9.5
2019,0,12,1.0
2019,1,0,-2.0
2019,1,12,3.5
";
        let series = parse_year("2019.csv", input).unwrap();
        assert_eq!(
            series.days(),
            &[
                DailyTemp {
                    date: date!(2019 - 01 - 01),
                    low: -9.5,
                    high: 1.0,
                },
                DailyTemp {
                    date: date!(2019 - 01 - 02),
                    low: -2.0,
                    high: 3.5,
                },
            ]
        );
    }

    #[test]
    fn missing_file() {
        let err = load_year("this/file/does/not/exist.csv").unwrap_err();
        assert!(matches!(err, ParseError::Io { .. }));
        assert_eq!(err.to_string(), "Could not open this/file/does/not/exist.csv");
    }
}
