//! Reference data for the departure board.
//!
//! The decoded timetable, the weekly service calendar and per-trip stop
//! sequences, together with the loader that builds them from the dataset
//! file. Everything here is read-only once loaded.

mod calendar;
mod dataset;
mod error;
mod index;
mod trip_stops;

pub use calendar::{ServiceCalendar, ServiceCalendarResolver};
pub use dataset::{DatasetFile, TransitData, TripStopRecord};
pub use error::DatasetError;
pub use index::{
    DestinationRef, RawDeparture, RouteRef, ScheduleIndex, ScheduleTables, ServiceRef, ShapeRef,
    TUPLE_WIDTH, TripRef,
};
pub use trip_stops::{TripStop, TripStopSequenceIndex, index_of_stop_at_time, is_terminus};
