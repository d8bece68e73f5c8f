use time::Date;
use tracing::warn;

use crate::record::Reading;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DailyTemp {
    pub date: Date,
    pub low: f64,
    pub high: f64,
}

/// The days of one input file, in the order they appeared. Never empty.
#[derive(Debug, Clone, PartialEq)]
pub struct YearSeries {
    days: Vec<DailyTemp>,
}

impl YearSeries {
    /// `None` if `days` is empty. The days are kept in the given order.
    pub fn from_days(days: Vec<DailyTemp>) -> Option<Self> {
        if days.is_empty() {
            None
        } else {
            Some(Self { days })
        }
    }

    pub fn days(&self) -> &[DailyTemp] {
        &self.days
    }

    pub fn year(&self) -> i32 {
        self.first_date().year()
    }

    pub fn first_date(&self) -> Date {
        self.days[0].date
    }
}

/// Folds the readings of a single file into one [`DailyTemp`] per date.
///
/// Readings must come in chronological order, only the last day is ever
/// updated.
#[derive(Debug, Default)]
pub struct DailyAggregator {
    days: Vec<DailyTemp>,
}

impl DailyAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, date: Date, temperature: f64) {
        if let Some(day) = self.days.last_mut() {
            if day.date == date {
                if temperature < day.low {
                    day.low = temperature;
                } else if temperature > day.high {
                    day.high = temperature;
                }
                return;
            }
            if day.date > date {
                warn!(previous = %day.date, %date, "days are not ordered");
            }
        }

        self.days.push(DailyTemp {
            date,
            low: temperature,
            high: temperature,
        });
    }

    /// `None` if nothing was pushed.
    pub fn finish(self) -> Option<YearSeries> {
        YearSeries::from_days(self.days)
    }
}

impl Extend<Reading> for DailyAggregator {
    fn extend<T: IntoIterator<Item = Reading>>(&mut self, readings: T) {
        for reading in readings {
            self.push(reading.date, reading.temperature);
        }
    }
}
