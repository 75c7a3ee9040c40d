//! Departure view model.

use std::fmt;

use crate::domain::MinuteOfDay;

/// One upcoming departure, ready for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Departure {
    pub trip_id: String,
    pub time: MinuteOfDay,

    /// Route label with the operator prefix removed, e.g. "205".
    pub line_label: String,
    pub route_color: String,
    pub route_text_color: String,
    pub destination: String,

    /// Minutes from now until departure.
    pub remaining_minutes: i32,
    pub shape_id: String,
}

impl Departure {
    pub fn remaining(&self) -> Remaining {
        Remaining::from_minutes(self.remaining_minutes)
    }
}

/// How long until a departure, as shown to riders.
///
/// # Examples
///
/// ```
/// use bus_board::departures::Remaining;
///
/// assert_eq!(Remaining::from_minutes(7).to_string(), "7 minutes");
/// assert_eq!(Remaining::from_minutes(0).to_string(), "now");
/// assert_eq!(Remaining::from_minutes(-2).to_string(), "departed");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Remaining {
    Minutes(u32),
    Now,
    Departed,
}

impl Remaining {
    pub fn from_minutes(minutes: i32) -> Self {
        match minutes {
            0 => Self::Now,
            m if m > 0 => Self::Minutes(m as u32),
            _ => Self::Departed,
        }
    }
}

impl fmt::Display for Remaining {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Minutes(1) => f.write_str("1 minute"),
            Self::Minutes(m) => write!(f, "{m} minutes"),
            Self::Now => f.write_str("now"),
            Self::Departed => f.write_str("departed"),
        }
    }
}
