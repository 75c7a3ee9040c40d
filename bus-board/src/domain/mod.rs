//! Domain types for the departure board.
//!
//! Reference data (stops, routes) and the time types the timetable is
//! expressed in. Constructors validate their input, so code receiving these
//! types can trust their ranges.

mod route;
mod stop;
mod time;

pub use route::{Route, natural_cmp};
pub use stop::{Stop, StopId, UNKNOWN_PLATFORM};
pub use time::{DayIndex, MINUTES_PER_DAY, MinuteOfDay, TimeError};
