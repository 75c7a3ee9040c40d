//! Calling pattern of a single trip.

use thiserror::Error;

use crate::departures::BoardConfig;
use crate::domain::StopId;
use crate::schedule::TransitData;

/// Errors building a trip timeline.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TimelineError {
    #[error("trip stop sequences are not loaded")]
    SequencesUnavailable,

    #[error("no stop sequence for trip {trip_id}")]
    UnknownTrip { trip_id: String },
}

/// Line badge and destination shown above the timeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimelineHeader {
    pub line_label: String,
    pub route_color: String,
    pub route_text_color: String,
    pub destination: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimelineRow {
    pub stop_id: StopId,
    pub name: String,
    /// "HH:MM"
    pub time: String,
    pub is_current: bool,
}

/// A trip's stops in calling order, relative to the stop the rider is at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TripTimeline {
    pub trip_id: String,

    /// `None` when the trip has no timetable entry at the current stop.
    pub header: Option<TimelineHeader>,
    pub rows: Vec<TimelineRow>,
}

impl TripTimeline {
    /// Build the timeline of `trip_id` as seen from `current_stop`.
    ///
    /// Calls at stops missing from the stop table are left out.
    pub fn build(
        data: &TransitData,
        config: &BoardConfig,
        trip_id: &str,
        current_stop: &StopId,
    ) -> Result<Self, TimelineError> {
        let sequences = data
            .trip_stops
            .as_ref()
            .ok_or(TimelineError::SequencesUnavailable)?;
        let sequence = sequences
            .sequence_for(trip_id)
            .ok_or_else(|| TimelineError::UnknownTrip {
                trip_id: trip_id.to_string(),
            })?;

        let schedule = &data.schedule;
        let header = schedule
            .find_departure(current_stop, trip_id)
            .map(|departure| {
                let route = schedule.route(departure.route);
                TimelineHeader {
                    line_label: route.line_label(&config.operator_prefix),
                    route_color: route.color.clone(),
                    route_text_color: route.text_color.clone(),
                    destination: schedule.destination(departure.destination).to_string(),
                }
            });

        let rows = sequence
            .iter()
            .filter_map(|call| {
                let stop = data.stops.stop(&call.stop)?;
                let time = call.scheduled.get(..5).unwrap_or(call.scheduled.as_str());
                Some(TimelineRow {
                    stop_id: stop.id.clone(),
                    name: stop.name.clone(),
                    time: time.to_string(),
                    is_current: stop.id == *current_stop,
                })
            })
            .collect();

        Ok(Self {
            trip_id: trip_id.to_string(),
            header,
            rows,
        })
    }
}
