//! Dataset loading error types.

use std::path::PathBuf;

/// Errors raised while loading and decoding the timetable dataset.
///
/// All of these are fatal: a dataset that fails to decode is never partially
/// served.
#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    /// The dataset file could not be read
    #[error("failed to read dataset {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The dataset is not valid JSON of the expected shape
    #[error("dataset JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// A departure tuple has the wrong number of fields
    #[error("departure {position} at stop {stop}: expected {expected} fields, found {found}")]
    MalformedDeparture {
        stop: String,
        position: usize,
        expected: usize,
        found: usize,
    },

    /// A departure tuple points past the end of a lookup table
    #[error("departure {position} at stop {stop}: {table} index {index} out of range")]
    DanglingReference {
        stop: String,
        position: usize,
        table: &'static str,
        index: i64,
    },

    /// A departure time is not a minute of the day
    #[error("departure {position} at stop {stop}: minute {minute} outside 0..1440")]
    MinuteOutOfRange {
        stop: String,
        position: usize,
        minute: i64,
    },

    /// A calendar row does not have one flag per weekday
    #[error("calendar row for service {service}: expected 7 flags, found {found}")]
    MalformedCalendar { service: String, found: usize },
}
