//! Acquisition date handling
//!
//! Dates travel through the crate as `YYYYMMDD` strings, exactly as stored in
//! the products. This module parses them, converts them to fractional years and
//! computes the date statistics shown for time-series files.

use crate::errors::{InfoError, Result};
use chrono::{Datelike, NaiveDate};
use ndarray::Array1;
use std::fmt;

/// Two-digit years below this pivot are in the 2000s
const CENTURY_PIVOT: u32 = 50;

/// One interferometric pair of acquisition dates
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatePair {
    pub master: String,
    pub slave: String,
}

impl DatePair {
    pub fn new(master: impl Into<String>, slave: impl Into<String>) -> Self {
        Self {
            master: master.into(),
            slave: slave.into(),
        }
    }
}

impl fmt::Display for DatePair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.master, self.slave)
    }
}

/// Parses a `YYYYMMDD` or `YYMMDD` date string.
pub fn parse_date(value: &str) -> Result<NaiveDate> {
    let invalid = || InfoError::InvalidDate {
        value: value.to_string(),
    };

    let trimmed = value.trim();
    if !trimmed.chars().all(|c| c.is_ascii_digit()) {
        return Err(invalid());
    }

    let full = match trimmed.len() {
        8 => trimmed.to_string(),
        6 => {
            let yy: u32 = trimmed[..2].parse().map_err(|_| invalid())?;
            let century = if yy < CENTURY_PIVOT { "20" } else { "19" };
            format!("{}{}", century, trimmed)
        }
        _ => return Err(invalid()),
    };

    NaiveDate::parse_from_str(&full, "%Y%m%d").map_err(|_| invalid())
}

/// Formats a date as `YYYYMMDD`.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%Y%m%d").to_string()
}

/// Converts a proleptic Gregorian ordinal (day 1 is 0001-01-01) to `YYYYMMDD`.
pub fn ordinal_to_date(ordinal: i64) -> Result<String> {
    i32::try_from(ordinal)
        .ok()
        .and_then(NaiveDate::from_num_days_from_ce_opt)
        .map(format_date)
        .ok_or_else(|| InfoError::InvalidDate {
            value: format!("ordinal {}", ordinal),
        })
}

/// Fractional-year position of a date: `year + (day_of_year - 1) / days_in_year`.
pub fn date_to_year_fraction(date: NaiveDate) -> f64 {
    let leap = NaiveDate::from_ymd_opt(date.year(), 2, 29).is_some();
    let days_in_year = if leap { 366.0 } else { 365.0 };
    date.year() as f64 + (date.ordinal0() as f64) / days_in_year
}

/// Converts a list of date strings to fractional years, keeping order.
pub fn date_list_to_years(dates: &[String]) -> Result<Vec<f64>> {
    dates
        .iter()
        .map(|d| parse_date(d).map(date_to_year_fraction))
        .collect()
}

/// Date statistics of a time-series product
#[derive(Debug, Clone, PartialEq)]
pub struct DateStats {
    pub first: String,
    pub last: String,
    pub count: usize,
    /// Population standard deviation of the acquisition times, in years
    pub std_years: f64,
    pub dates: Vec<String>,
    pub years: Vec<f64>,
}

impl DateStats {
    /// Computes statistics over a non-empty date list.
    pub fn from_dates(dates: &[String]) -> Result<Self> {
        let (first, last) = match (dates.first(), dates.last()) {
            (Some(first), Some(last)) => (first.clone(), last.clone()),
            _ => return Err(InfoError::Generic("empty date list".to_string())),
        };

        let years = date_list_to_years(dates)?;
        let std_years = Array1::from(years.clone()).std(0.0);

        Ok(Self {
            first,
            last,
            count: dates.len(),
            std_years,
            dates: dates.to_vec(),
            years,
        })
    }

    pub fn render(&self) -> String {
        let dates: Vec<String> = self.dates.iter().map(|d| format!("'{}'", d)).collect();
        let years: Vec<String> = self.years.iter().map(|y| format!("{:.4}", y)).collect();

        let mut out = String::new();
        out.push_str(&format!("Start Date: {}\n", self.first));
        out.push_str(&format!("End   Date: {}\n", self.last));
        out.push_str(&format!("Number of acquisitions    : {}\n", self.count));
        out.push_str(&format!("Std. of acquisition times : {:.2} years\n", self.std_years));
        out.push_str("----------------------\n");
        out.push_str("List of dates:\n");
        out.push_str(&format!("[{}]\n", dates.join(", ")));
        out.push_str("----------------------\n");
        out.push_str("List of dates in years\n");
        out.push_str(&format!("[{}]\n", years.join(", ")));
        out
    }
}
