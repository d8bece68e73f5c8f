use std::fmt;

use time::Date;

use crate::{daily::YearSeries, THRESHOLD};

/// A cold spell must last strictly longer than this to be reported.
pub const MIN_RUN_DAYS: usize = 90;

/// Extremes of one year and the onset of its long cold spells.
#[derive(Debug, Clone, PartialEq)]
pub struct YearStatistics {
    pub year: i32,
    pub yearly_low: f64,
    pub yearly_high: f64,
    /// First day of every stretch of more than [`MIN_RUN_DAYS`] days whose
    /// high stayed below [`THRESHOLD`].
    pub runs: Vec<Date>,
}

impl YearStatistics {
    pub fn compute(series: &YearSeries) -> Self {
        let mut yearly_low = f64::INFINITY;
        let mut yearly_high = f64::NEG_INFINITY;

        let mut start = series.first_date();
        let mut count = 0;
        let mut runs = Vec::new();

        for day in series.days() {
            if day.low < yearly_low {
                yearly_low = day.low;
            }
            if day.high > yearly_high {
                yearly_high = day.high;
            }

            if day.high < THRESHOLD {
                if count == 0 {
                    start = day.date;
                }
                count += 1;
            } else {
                if count > MIN_RUN_DAYS {
                    runs.push(start);
                }
                count = 0;
            }
        }
        // A spell still running on the last day is never reported.

        Self {
            year: series.year(),
            yearly_low,
            yearly_high,
            runs,
        }
    }
}

impl fmt::Display for YearStatistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{:.6},{:.6},[", self.year, self.yearly_low, self.yearly_high)?;
        for (i, start) in self.runs.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{start}")?;
        }
        write!(f, "]")
    }
}
