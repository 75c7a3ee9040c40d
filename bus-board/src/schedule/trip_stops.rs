//! Per-trip stop sequences.
//!
//! Each trip's stops are listed in the order the bus serves them. The board
//! uses them for two things: checking whether a trip goes on to reach a
//! destination after the current stop, and spotting trips that terminate at
//! the current stop.

use std::collections::HashMap;

use crate::domain::{MinuteOfDay, StopId};

/// One call of a trip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TripStop {
    pub stop: StopId,

    /// Scheduled time as given by the feed, "HH:MM:SS" or "HH:MM".
    pub scheduled: String,
}

impl TripStop {
    pub fn new(stop: impl Into<StopId>, scheduled: impl Into<String>) -> Self {
        Self {
            stop: stop.into(),
            scheduled: scheduled.into(),
        }
    }
}

/// Trip id → ordered stop sequence. Read-only once loaded.
#[derive(Debug, Clone, Default)]
pub struct TripStopSequenceIndex {
    sequences: HashMap<String, Vec<TripStop>>,
}

impl TripStopSequenceIndex {
    pub fn new(sequences: HashMap<String, Vec<TripStop>>) -> Self {
        Self { sequences }
    }

    pub fn sequence_for(&self, trip_id: &str) -> Option<&[TripStop]> {
        self.sequences.get(trip_id).map(|v| v.as_slice())
    }

    pub fn len(&self) -> usize {
        self.sequences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequences.is_empty()
    }
}

/// Position of `stop` in `sequence` for the call scheduled at `time`.
///
/// Prefers an entry whose scheduled time starts with `time` as "HH:MM", so a
/// trip that serves the stop twice resolves to the right call. When no entry
/// matches on time, falls back to the first entry for the stop regardless of
/// time; for trips that visit the stop twice this can pick the wrong call.
///
/// # Examples
///
/// ```
/// use bus_board::domain::{MinuteOfDay, StopId};
/// use bus_board::schedule::{TripStop, index_of_stop_at_time};
///
/// let loop_trip = vec![
///     TripStop::new("A", "09:00:00"),
///     TripStop::new("B", "09:10:00"),
///     TripStop::new("A", "09:20:00"),
/// ];
/// let a = StopId::new("A");
/// let at = |s| MinuteOfDay::parse_hhmm(s).unwrap();
///
/// assert_eq!(index_of_stop_at_time(&loop_trip, &a, at("09:20")), Some(2));
/// assert_eq!(index_of_stop_at_time(&loop_trip, &a, at("09:25")), Some(0));
/// assert_eq!(index_of_stop_at_time(&loop_trip, &StopId::new("C"), at("09:00")), None);
/// ```
pub fn index_of_stop_at_time(
    sequence: &[TripStop],
    stop: &StopId,
    time: MinuteOfDay,
) -> Option<usize> {
    let prefix = time.to_string();
    sequence
        .iter()
        .position(|s| s.stop == *stop && s.scheduled.starts_with(&prefix))
        .or_else(|| sequence.iter().position(|s| s.stop == *stop))
}

/// Whether `position` is the trip's final call.
pub fn is_terminus(sequence: &[TripStop], position: usize) -> bool {
    position + 1 == sequence.len()
}
