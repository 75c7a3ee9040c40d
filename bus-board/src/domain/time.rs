//! Time-of-day handling for scheduled departures.
//!
//! Timetables carry departures as minutes since midnight with no date
//! attached. Which days a departure actually runs on is decided separately,
//! by its service calendar, so the only calendar concept needed here is the
//! day of the week.

use std::fmt;

use chrono::{NaiveTime, Timelike, Weekday};
use serde::{Serialize, Serializer};

/// Minutes in one service day.
pub const MINUTES_PER_DAY: u16 = 24 * 60;

/// Error returned when parsing or constructing an invalid time.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid time: {reason}")]
pub struct TimeError {
    reason: &'static str,
}

impl TimeError {
    fn new(reason: &'static str) -> Self {
        Self { reason }
    }
}

/// A time of day, stored as minutes since midnight.
///
/// Always in `0..1440`.
///
/// # Examples
///
/// ```
/// use bus_board::domain::MinuteOfDay;
///
/// let nine = MinuteOfDay::parse_hhmm("09:00").unwrap();
/// assert_eq!(nine.minutes(), 540);
/// assert_eq!(nine.to_string(), "09:00");
///
/// assert!(MinuteOfDay::new(1440).is_err());
/// assert!(MinuteOfDay::parse_hhmm("9:00").is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MinuteOfDay(u16);

impl MinuteOfDay {
    /// Midnight.
    pub const MIDNIGHT: MinuteOfDay = MinuteOfDay(0);

    /// Create from a raw minute count, which must be below 1440.
    pub fn new(minutes: u16) -> Result<Self, TimeError> {
        if minutes >= MINUTES_PER_DAY {
            return Err(TimeError::new("minute of day must be below 1440"));
        }
        Ok(Self(minutes))
    }

    /// Create from hour and minute components.
    pub fn from_hm(hour: u32, minute: u32) -> Result<Self, TimeError> {
        if hour > 23 {
            return Err(TimeError::new("hour must be 0-23"));
        }
        if minute > 59 {
            return Err(TimeError::new("minute must be 0-59"));
        }
        Ok(Self((hour * 60 + minute) as u16))
    }

    /// Parse a time from "HH:MM" format.
    pub fn parse_hhmm(s: &str) -> Result<Self, TimeError> {
        if s.len() != 5 {
            return Err(TimeError::new("expected HH:MM format"));
        }

        let bytes = s.as_bytes();
        if bytes[2] != b':' {
            return Err(TimeError::new("expected colon at position 2"));
        }

        let hour =
            parse_two_digits(&bytes[0..2]).ok_or_else(|| TimeError::new("invalid hour digits"))?;
        let minute = parse_two_digits(&bytes[3..5])
            .ok_or_else(|| TimeError::new("invalid minute digits"))?;

        Self::from_hm(hour, minute)
    }

    /// The minute of day a wall-clock time falls in. Seconds are dropped.
    pub fn from_time(time: NaiveTime) -> Self {
        Self((time.hour() * 60 + time.minute()) as u16)
    }

    /// Minutes since midnight.
    pub fn minutes(&self) -> u16 {
        self.0
    }

    pub fn hour(&self) -> u16 {
        self.0 / 60
    }

    pub fn minute(&self) -> u16 {
        self.0 % 60
    }

    /// Signed number of minutes from `self` until `later`.
    ///
    /// Negative when `later` is actually earlier in the day.
    pub fn minutes_until(&self, later: MinuteOfDay) -> i32 {
        i32::from(later.0) - i32::from(self.0)
    }
}

impl fmt::Debug for MinuteOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MinuteOfDay({:02}:{:02})", self.hour(), self.minute())
    }
}

impl fmt::Display for MinuteOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

impl Serialize for MinuteOfDay {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Parse two ASCII digit bytes into a u32.
fn parse_two_digits(bytes: &[u8]) -> Option<u32> {
    if bytes.len() != 2 {
        return None;
    }
    let d1 = (bytes[0] as char).to_digit(10)?;
    let d2 = (bytes[1] as char).to_digit(10)?;
    Some(d1 * 10 + d2)
}

/// Day of the week as used by service calendars: 0 = Sunday .. 6 = Saturday.
///
/// # Examples
///
/// ```
/// use bus_board::domain::DayIndex;
/// use chrono::Weekday;
///
/// assert_eq!(DayIndex::from(Weekday::Sun).index(), 0);
/// assert_eq!(DayIndex::from(Weekday::Sat).index(), 6);
/// assert!(DayIndex::new(7).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DayIndex(u8);

impl DayIndex {
    pub const SUNDAY: DayIndex = DayIndex(0);
    pub const MONDAY: DayIndex = DayIndex(1);
    pub const SATURDAY: DayIndex = DayIndex(6);

    pub fn new(index: u8) -> Result<Self, TimeError> {
        if index > 6 {
            return Err(TimeError::new("day index must be 0-6"));
        }
        Ok(Self(index))
    }

    /// Position in a seven-element calendar row.
    pub fn index(&self) -> usize {
        usize::from(self.0)
    }
}

impl From<Weekday> for DayIndex {
    fn from(weekday: Weekday) -> Self {
        Self(weekday.num_days_from_sunday() as u8)
    }
}
