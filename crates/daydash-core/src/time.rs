//! Time-of-day value type used for all window comparisons.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::error::{QueryError, ScheduleError};

/// Minutes in a full day.
pub const MINUTES_PER_DAY: u32 = 24 * 60;

/// A wall-clock time within a single day, minute precision.
///
/// Ordering is lexicographic over (hour, minute). Values are only ever
/// compared within one day; there is no rollover arithmetic.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct TimeOfDay {
    hour: u8,
    minute: u8,
}

impl TimeOfDay {
    /// Create a time of day, rejecting out-of-range fields.
    pub fn new(hour: u8, minute: u8) -> Result<Self, ScheduleError> {
        if hour > 23 || minute > 59 {
            return Err(ScheduleError::InvalidTimeOfDay { hour, minute });
        }
        Ok(Self { hour, minute })
    }

    /// Constructor for literals that are statically known to be valid.
    pub(crate) const fn at(hour: u8, minute: u8) -> Self {
        Self { hour, minute }
    }

    pub fn hour(&self) -> u8 {
        self.hour
    }

    pub fn minute(&self) -> u8 {
        self.minute
    }

    /// Minute-of-day key (0..=1439) used by window predicates and
    /// trigger deduplication.
    pub fn minute_of_day(&self) -> u32 {
        self.hour as u32 * 60 + self.minute as u32
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

impl From<NaiveTime> for TimeOfDay {
    fn from(t: NaiveTime) -> Self {
        Self {
            hour: t.hour() as u8,
            minute: t.minute() as u8,
        }
    }
}

impl FromStr for TimeOfDay {
    type Err = QueryError;

    /// Strict `HH:MM`: exactly two digits, a colon, two digits, with the
    /// hour in 00-23 and the minute in 00-59. No surrounding whitespace.
    fn from_str(s: &str) -> Result<Self, QueryError> {
        let invalid = || QueryError::InvalidFormat(s.to_string());
        let bytes = s.as_bytes();
        if bytes.len() != 5 || bytes[2] != b':' {
            return Err(invalid());
        }
        if !bytes[..2]
            .iter()
            .chain(&bytes[3..])
            .all(u8::is_ascii_digit)
        {
            return Err(invalid());
        }
        let hour: u8 = s[..2].parse().map_err(|_| invalid())?;
        let minute: u8 = s[3..].parse().map_err(|_| invalid())?;
        TimeOfDay::new(hour, minute).map_err(|_| invalid())
    }
}
