use std::num::{ParseFloatError, ParseIntError};

use csv::{ReaderBuilder, StringRecord};
use miette::Diagnostic;
use thiserror::Error;
use time::{Date, Duration, Month};
use tracing::debug;

/// The column layouts of the exports we know how to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// `Year, DayOfYear, ...`
    YearYearday,
    /// `junk, Year, DayOfYear, ...`
    JunkYearYearday,
    /// `year, month, day, ...`
    YearMonthDay,
}

impl Layout {
    /// Checked in order, the first match wins.
    pub fn detect(header: &StringRecord) -> Option<Self> {
        if header.get(0) == Some("Year") {
            Some(Self::YearYearday)
        } else if header.get(1) == Some("Year") {
            Some(Self::JunkYearYearday)
        } else if header.get(0) == Some("year") {
            Some(Self::YearMonthDay)
        } else {
            None
        }
    }

    fn year_column(self) -> usize {
        match self {
            Self::YearYearday | Self::YearMonthDay => 0,
            Self::JunkYearYearday => 1,
        }
    }
}

/// One data row once its date has been resolved.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reading {
    pub date: Date,
    pub temperature: f64,
}

#[derive(Debug, Error, Diagnostic)]
pub enum FormatError {
    #[error("{filename} is empty")]
    #[diagnostic(code(meteo::format::empty))]
    Empty { filename: String },
    #[error("{filename} has a header but no data")]
    #[diagnostic(code(meteo::format::no_data))]
    NoData { filename: String },
    #[error("No temperature column in {filename}")]
    #[diagnostic(
        code(meteo::format::temperature),
        help("one header cell must contain `temperature`, in any case")
    )]
    MissingTemperatureColumn { filename: String },
    #[error("Unknown format in {filename}")]
    #[diagnostic(
        code(meteo::format::unknown),
        help("expected a header starting with `Year`, `<anything>,Year` or `year`")
    )]
    UnknownLayout { filename: String },
}

#[derive(Debug, Error)]
pub enum DateError {
    #[error("Missing column {0}")]
    MissingColumn(usize),
    #[error("Bad year `{text}`")]
    Year { text: String, source: ParseIntError },
    #[error("Bad day of year `{text}`")]
    YearDay { text: String, source: ParseIntError },
    #[error("Bad month `{text}`")]
    Month { text: String, source: ParseIntError },
    #[error("Bad day `{text}`")]
    Day { text: String, source: ParseIntError },
    #[error("Invalid date: {0}")]
    Calendar(#[from] time::error::ComponentRange),
    #[error("Day {day_of_year} of {year} is out of range")]
    OutOfRange { year: i32, day_of_year: i32 },
}

#[derive(Debug, Error)]
pub enum NumberError {
    #[error("Missing temperature column {0}")]
    MissingColumn(usize),
    #[error("Bad temperature `{text}`")]
    Invalid {
        text: String,
        source: ParseFloatError,
    },
}

#[derive(Debug, Error, Diagnostic)]
pub enum ParseError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Format(#[from] FormatError),
    #[error("Bad date in {filename} on line {row}")]
    #[diagnostic(code(meteo::date))]
    Date {
        filename: String,
        row: usize,
        source: DateError,
    },
    #[error("Bad temperature in {filename} on line {row}")]
    #[diagnostic(code(meteo::number))]
    Number {
        filename: String,
        row: usize,
        source: NumberError,
    },
    #[error("Could not read {filename} as CSV")]
    #[diagnostic(code(meteo::csv))]
    Csv {
        filename: String,
        source: csv::Error,
    },
    #[error("Could not open {filename}")]
    #[diagnostic(code(meteo::io))]
    Io {
        filename: String,
        source: std::io::Error,
    },
}

/// Everything needed to turn a row of one file into a [`Reading`].
///
/// Built once from the header and the first data row, then applied to every
/// row of that same file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileContext {
    pub filename: String,
    pub layout: Layout,
    pub year: i32,
    pub temperature_column: usize,
}

impl FileContext {
    pub fn detect(
        filename: &str,
        header: &StringRecord,
        first_row: &StringRecord,
    ) -> Result<Self, ParseError> {
        let temperature_column = header
            .iter()
            .position(|cell| cell.to_lowercase().contains("temperature"))
            .ok_or_else(|| FormatError::MissingTemperatureColumn {
                filename: filename.to_string(),
            })?;
        let layout = Layout::detect(header).ok_or_else(|| FormatError::UnknownLayout {
            filename: filename.to_string(),
        })?;

        // The year is only read once, from the first data row.
        let year: i32 = cell(first_row, layout.year_column())
            .and_then(|text| {
                text.parse().map_err(|source| DateError::Year {
                    text: text.to_string(),
                    source,
                })
            })
            .map_err(|source| ParseError::Date {
                filename: filename.to_string(),
                row: 1,
                source,
            })?;

        debug!(filename, ?layout, year, temperature_column, "detected layout");

        Ok(Self {
            filename: filename.to_string(),
            layout,
            year,
            temperature_column,
        })
    }

    /// `row` is the 1-based index of the record among the data rows.
    pub fn reading(&self, row: usize, record: &StringRecord) -> Result<Reading, ParseError> {
        let date = self.date(record).map_err(|source| ParseError::Date {
            filename: self.filename.clone(),
            row,
            source,
        })?;
        let temperature = self.temperature(record).map_err(|source| ParseError::Number {
            filename: self.filename.clone(),
            row,
            source,
        })?;

        Ok(Reading { date, temperature })
    }

    fn date(&self, record: &StringRecord) -> Result<Date, DateError> {
        match self.layout {
            Layout::YearYearday => resolve_year_day(self.year, parse_year_day(cell(record, 1)?)?),
            Layout::JunkYearYearday => {
                resolve_year_day(self.year, parse_year_day(cell(record, 2)?)?)
            }
            Layout::YearMonthDay => resolve_ymd(self.year, cell(record, 1)?, cell(record, 2)?),
        }
    }

    fn temperature(&self, record: &StringRecord) -> Result<f64, NumberError> {
        let text = record
            .get(self.temperature_column)
            .ok_or(NumberError::MissingColumn(self.temperature_column))?;
        clean(text).parse().map_err(|source| NumberError::Invalid {
            text: text.to_string(),
            source,
        })
    }
}

fn cell(record: &StringRecord, index: usize) -> Result<&str, DateError> {
    record.get(index).ok_or(DateError::MissingColumn(index))
}

fn clean(field: &str) -> &str {
    field.trim_matches(' ')
}

fn parse_year_day(text: &str) -> Result<i32, DateError> {
    text.parse().map_err(|source| DateError::YearDay {
        text: text.to_string(),
        source,
    })
}

/// January 1st of `year` plus `day_of_year` days. Day 0 is January 1st.
pub fn resolve_year_day(year: i32, day_of_year: i32) -> Result<Date, DateError> {
    let new_year = Date::from_calendar_date(year, Month::January, 1)?;
    new_year
        .checked_add(Duration::days(day_of_year.into()))
        .ok_or(DateError::OutOfRange { year, day_of_year })
}

/// Month and day may be padded with spaces, the year may not.
pub fn resolve_ymd(year: i32, month: &str, day: &str) -> Result<Date, DateError> {
    let month: u8 = clean(month).parse().map_err(|source| DateError::Month {
        text: month.to_string(),
        source,
    })?;
    let day: u8 = clean(day).parse().map_err(|source| DateError::Day {
        text: day.to_string(),
        source,
    })?;

    Ok(Date::from_calendar_date(year, Month::try_from(month)?, day)?)
}

/// Parse a whole file already loaded in memory. `filename` is only used to
/// give context to the errors.
pub fn parse_str(filename: &str, input: &str) -> Result<Vec<Reading>, ParseError> {
    let records = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(input.as_bytes())
        .into_records()
        .collect::<Result<Vec<StringRecord>, _>>()
        .map_err(|source| ParseError::Csv {
            filename: filename.to_string(),
            source,
        })?;

    let (header, rows) = records.split_first().ok_or_else(|| FormatError::Empty {
        filename: filename.to_string(),
    })?;
    let first_row = rows.first().ok_or_else(|| FormatError::NoData {
        filename: filename.to_string(),
    })?;
    let context = FileContext::detect(filename, header, first_row)?;

    rows.iter()
        .enumerate()
        .map(|(i, record)| context.reading(i + 1, record))
        .collect()
}
