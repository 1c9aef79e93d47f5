// Compact MRZ dates (YYMMDD) to display strings

use chrono::{Datelike, Local, NaiveDate};
use log::debug;
use serde::{Deserialize, Serialize};

/// Returned for any compact date that cannot be turned into a calendar date.
pub const INVALID_DATE: &str = "Invalid date";

/// Field order of the rendered date.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateOrder {
    /// MM/DD/YYYY
    #[default]
    MonthFirst,
    /// DD/MM/YYYY
    DayFirst,
}

impl std::str::FromStr for DateOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "month_first" | "month-first" | "mdy" | "us" => Ok(DateOrder::MonthFirst),
            "day_first" | "day-first" | "dmy" => Ok(DateOrder::DayFirst),
            other => Err(format!("unknown date order: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct DateNormalizer {
    order: DateOrder,
    reference_year: Option<i32>,
}

impl DateNormalizer {
    pub fn new(order: DateOrder) -> Self {
        DateNormalizer {
            order,
            reference_year: None,
        }
    }

    /// Pins the "current" year used for birth-date century selection.
    pub fn with_reference_year(mut self, year: i32) -> Self {
        self.reference_year = Some(year);
        self
    }

    /// Renders a `YYMMDD` value, or [`INVALID_DATE`] when it is not a real date.
    pub fn normalize(&self, compact: &str, is_expiry: bool) -> String {
        match self.to_date(compact, is_expiry) {
            Some(date) => self.format(date),
            None => {
                debug!("Could not normalize compact date {:?}", compact);
                INVALID_DATE.to_string()
            }
        }
    }

    /// Resolves a `YYMMDD` value to a calendar date.
    ///
    /// Expiry dates always land in the 2000s. Birth dates land in the 1900s
    /// when the two-digit year is above the current year's last two digits
    /// plus ten, otherwise in the 2000s. This pivot follows the wall clock
    /// and is an approximation for people born near the boundary.
    pub fn to_date(&self, compact: &str, is_expiry: bool) -> Option<NaiveDate> {
        if compact.len() != 6 || !compact.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }

        let year2: i32 = compact[0..2].parse().ok()?;
        let month: u32 = compact[2..4].parse().ok()?;
        let day: u32 = compact[4..6].parse().ok()?;

        let century = if is_expiry || year2 <= self.pivot() {
            2000
        } else {
            1900
        };

        let date = NaiveDate::from_ymd_opt(century + year2, month, day)?;
        // Reject anything that did not survive construction unchanged.
        if date.month() != month || date.day() != day {
            return None;
        }
        Some(date)
    }

    pub fn format(&self, date: NaiveDate) -> String {
        match self.order {
            DateOrder::MonthFirst => date.format("%m/%d/%Y").to_string(),
            DateOrder::DayFirst => date.format("%d/%m/%Y").to_string(),
        }
    }

    fn pivot(&self) -> i32 {
        let year = self.reference_year.unwrap_or_else(|| Local::now().year());
        year % 100 + 10
    }
}

/// Normalizes with the default month-first order against the wall clock.
pub fn normalize(compact: &str, is_expiry: bool) -> String {
    DateNormalizer::default().normalize(compact, is_expiry)
}
