//! Calendar-month periods.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Months, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::DashboardError;

/// A calendar month, written `YYYY-MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Period {
    first_day: NaiveDate,
}

impl Period {
    /// Build a period from a year and a 1-based month.
    pub fn new(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(|first_day| Self { first_day })
    }

    pub fn year(&self) -> i32 {
        self.first_day.year()
    }

    pub fn month(&self) -> u32 {
        self.first_day.month()
    }

    /// The month immediately before this one (January steps back a year).
    pub fn previous(&self) -> Option<Self> {
        self.first_day
            .checked_sub_months(Months::new(1))
            .map(|first_day| Self { first_day })
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year(), self.month())
    }
}

impl FromStr for Period {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || DashboardError::InvalidArgument(format!("Invalid month '{}', expected YYYY-MM", s));
        let (year, month) = s.trim().split_once('-').ok_or_else(invalid)?;
        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: u32 = month.parse().map_err(|_| invalid())?;
        Period::new(year, month).ok_or_else(invalid)
    }
}

impl Serialize for Period {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Period {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn previous_steps_back_one_month() {
        let p = Period::new(2023, 6).unwrap();
        assert_eq!(p.previous().unwrap(), Period::new(2023, 5).unwrap());
    }

    #[test]
    fn previous_of_january_is_december_of_prior_year() {
        let p = Period::new(2024, 1).unwrap();
        assert_eq!(p.previous().unwrap(), Period::new(2023, 12).unwrap());
    }

    #[test]
    fn display_pads_month() {
        assert_eq!(Period::new(2023, 3).unwrap().to_string(), "2023-03");
    }

    #[test]
    fn parse_round_trips_display() {
        let p: Period = "2023-11".parse().unwrap();
        assert_eq!(p.year(), 2023);
        assert_eq!(p.month(), 11);
        assert_eq!(p.to_string(), "2023-11");
    }

    #[test]
    fn parse_rejects_bad_month() {
        assert!("2023-13".parse::<Period>().is_err());
        assert!("2023".parse::<Period>().is_err());
        assert!("march".parse::<Period>().is_err());
    }

    #[test]
    fn serde_uses_string_form() {
        let p = Period::new(2023, 2).unwrap();
        assert_eq!(serde_json::to_value(p).unwrap(), serde_json::json!("2023-02"));
        let back: Period = serde_json::from_value(serde_json::json!("2023-02")).unwrap();
        assert_eq!(back, p);
    }
}
