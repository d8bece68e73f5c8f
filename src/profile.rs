use std::{fmt, ops::Range};

use miette::Diagnostic;
use thiserror::Error;
use time::Date;
use tracing::warn;

use crate::{daily::YearSeries, record::resolve_year_day, THRESHOLD};

pub const DAYS_IN_YEAR: usize = 366;

/// Slots are labelled with the dates of this year. It is not a leap year, so
/// the last slot lands on January 1st of the next one.
pub const REFERENCE_YEAR: i32 = 2019;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Curve {
    High,
    Low,
}

impl fmt::Display for Curve {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Curve::High => write!(f, "High"),
            Curve::Low => write!(f, "Low"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeasonalPoint {
    pub day_of_year: usize,
    pub high: f64,
    pub low: f64,
}

impl SeasonalPoint {
    pub fn get(&self, curve: Curve) -> f64 {
        match curve {
            Curve::High => self.high,
            Curve::Low => self.low,
        }
    }
}

/// Consecutive slots of the profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Run {
    pub start: usize,
    pub length: usize,
}

impl Run {
    pub fn start_date(&self) -> Option<Date> {
        slot_date(self.start)
    }
}

/// Date of a slot in [`REFERENCE_YEAR`].
pub fn slot_date(slot: usize) -> Option<Date> {
    let day_of_year = i32::try_from(slot).ok()?;
    resolve_year_day(REFERENCE_YEAR, day_of_year).ok()
}

#[derive(Debug, Error, Diagnostic)]
pub enum ProfileError {
    #[error("No temperature was folded into the profile")]
    #[diagnostic(code(meteo::profile::empty))]
    Empty,
    #[error("{curve} temperature never reaches {threshold}°C")]
    #[diagnostic(
        code(meteo::profile::no_run),
        help("the profile needs at least one day at or above the threshold")
    )]
    NoRunAboveThreshold { curve: Curve, threshold: f64 },
}

/// What a chart of the profile needs on top of the points themselves.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProfileSummary {
    pub threshold: f64,
    pub best_high: Run,
    pub best_low: Run,
    pub min_temp: f64,
    pub max_temp: f64,
}

impl ProfileSummary {
    /// Both extremes, with every ten degrees from -10 to 30 strictly between them.
    pub fn temperature_ticks(&self) -> Vec<f64> {
        let mut ticks = vec![self.min_temp];
        ticks.extend(
            [-10.0, 0.0, 10.0, 20.0, 30.0]
                .into_iter()
                .filter(|tick| *tick > self.min_temp && *tick < self.max_temp),
        );
        ticks.push(self.max_temp);
        ticks
    }
}

/// A composite year built by merging several years, slot by slot.
///
/// Slot `j` receives the `j`-th day of every series, whatever its actual date:
/// after February of a leap year everything is shifted by one day.
///
/// The first year written into a slot sets it, each following year is folded
/// in with `(value + new) / 2`. The last year folded weighs as much as all the
/// previous ones together.
#[derive(Debug, Clone, PartialEq)]
pub struct SeasonalProfile {
    slots: [Option<SeasonalPoint>; DAYS_IN_YEAR],
}

impl Default for SeasonalProfile {
    fn default() -> Self {
        Self {
            slots: [None; DAYS_IN_YEAR],
        }
    }
}

impl SeasonalProfile {
    pub fn new() -> Self {
        Self::default()
    }

    /// Folds the years in the order they are given.
    pub fn from_years<'a>(years: impl IntoIterator<Item = &'a YearSeries>) -> Self {
        let mut profile = Self::new();
        for year in years {
            profile.fold(year);
        }
        profile
    }

    pub fn fold(&mut self, series: &YearSeries) {
        let days = series.days();
        if days.len() > DAYS_IN_YEAR {
            warn!(
                year = series.year(),
                days = days.len(),
                "ignoring the days past the end of the profile"
            );
        }

        for (day_of_year, (slot, day)) in self.slots.iter_mut().zip(days).enumerate() {
            match slot {
                Some(point) => {
                    point.high = (point.high + day.high) / 2.0;
                    point.low = (point.low + day.low) / 2.0;
                }
                None => {
                    *slot = Some(SeasonalPoint {
                        day_of_year,
                        high: day.high,
                        low: day.low,
                    })
                }
            }
        }
    }

    pub fn get(&self, day_of_year: usize) -> Option<SeasonalPoint> {
        self.slots.get(day_of_year).copied().flatten()
    }

    /// The slots that were written at least once.
    pub fn points(&self) -> impl Iterator<Item = SeasonalPoint> + '_ {
        self.slots.iter().flatten().copied()
    }

    pub fn min_temp(&self) -> Option<f64> {
        self.points()
            .map(|point| point.low)
            .min_by(|left, right| left.total_cmp(right))
    }

    pub fn max_temp(&self) -> Option<f64> {
        self.points()
            .map(|point| point.high)
            .max_by(|left, right| left.total_cmp(right))
    }

    pub fn temperature_range(&self) -> Option<Range<f64>> {
        Some(self.min_temp()?..self.max_temp()?)
    }

    /// Every maximal run of slots at or above [`THRESHOLD`], in slot order.
    /// Unset slots end a run.
    pub fn runs(&self, curve: Curve) -> Vec<Run> {
        let mut runs = Vec::new();
        let mut current: Option<Run> = None;

        for (i, slot) in self.slots.iter().enumerate() {
            let warm = slot.is_some_and(|point| point.get(curve) >= THRESHOLD);
            if warm {
                match current.as_mut() {
                    Some(run) => run.length += 1,
                    None => {
                        current = Some(Run {
                            start: i,
                            length: 1,
                        })
                    }
                }
            } else if let Some(run) = current.take() {
                runs.push(run);
            }
        }
        // Still open on the last slot, kept unlike trailing cold spells.
        runs.extend(current);

        runs
    }

    /// The longest run of `curve`, the earliest one on ties.
    pub fn longest_run(&self, curve: Curve) -> Result<Run, ProfileError> {
        let mut best: Option<Run> = None;
        for run in self.runs(curve) {
            if best.map_or(true, |best| run.length > best.length) {
                best = Some(run);
            }
        }

        best.ok_or(ProfileError::NoRunAboveThreshold {
            curve,
            threshold: THRESHOLD,
        })
    }

    pub fn summary(&self) -> Result<ProfileSummary, ProfileError> {
        let range = self.temperature_range().ok_or(ProfileError::Empty)?;

        Ok(ProfileSummary {
            threshold: THRESHOLD,
            best_high: self.longest_run(Curve::High)?,
            best_low: self.longest_run(Curve::Low)?,
            min_temp: range.start,
            max_temp: range.end,
        })
    }
}
