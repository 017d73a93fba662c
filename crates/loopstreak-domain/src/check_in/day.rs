use chrono::{DateTime, Days, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::shared::DomainError;

pub const DAY_FORMAT: &str = "%Y-%m-%d";

const NAIVE_DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// A UTC calendar date. Equality and ordering key for check-ins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Day(NaiveDate);

impl Day {
    /// Truncate a timestamp in any offset to its UTC calendar date.
    pub fn from_timestamp<Tz: TimeZone>(timestamp: &DateTime<Tz>) -> Self {
        Self(timestamp.with_timezone(&Utc).date_naive())
    }

    pub fn from_date(date: NaiveDate) -> Self {
        Self(date)
    }

    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self)
    }

    /// Parse client supplied date input.
    ///
    /// Accepts RFC 3339 timestamps with any offset, naive timestamps (read as
    /// UTC) and bare `YYYY-MM-DD` dates (UTC midnight).
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        let raw = raw.trim();

        if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
            return Ok(Self::from_timestamp(&ts));
        }

        for format in NAIVE_DATETIME_FORMATS {
            if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
                return Ok(Self::from_timestamp(&naive.and_utc()));
            }
        }

        NaiveDate::parse_from_str(raw, DAY_FORMAT)
            .map(Self)
            .map_err(|e| DomainError::Validation(format!("Invalid check-in date '{}': {}", raw, e)))
    }

    /// Resolve optional client input, defaulting to the day of `now`.
    /// Blank strings count as absent.
    pub fn resolve(raw: Option<&str>, now: DateTime<Utc>) -> Result<Self, DomainError> {
        match raw.map(str::trim).filter(|s| !s.is_empty()) {
            Some(value) => Self::parse(value),
            None => Ok(Self::from_timestamp(&now)),
        }
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }

    pub fn midnight_utc(&self) -> DateTime<Utc> {
        self.0.and_time(NaiveTime::MIN).and_utc()
    }

    /// The previous calendar day, `None` only at the calendar's lower bound.
    pub fn pred(&self) -> Option<Self> {
        self.0.checked_sub_days(Days::new(1)).map(Self)
    }

    pub fn succ(&self) -> Option<Self> {
        self.0.checked_add_days(Days::new(1)).map(Self)
    }

    /// Whole days from `earlier` to `self`; negative when `earlier` is later.
    pub fn days_since(&self, earlier: Day) -> i64 {
        (self.0 - earlier.0).num_days()
    }
}

/// Normalize a timestamp to its UTC day.
pub fn to_day<Tz: TimeZone>(timestamp: &DateTime<Tz>) -> Day {
    Day::from_timestamp(timestamp)
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(DAY_FORMAT))
    }
}

impl FromStr for Day {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<NaiveDate> for Day {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}
