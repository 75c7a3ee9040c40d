//! Next-departure computation for one stop.
//!
//! Turns a stop's raw timetable into the handful of departures a rider
//! should see right now. Stages run in a fixed order:
//!
//! 1. service calendar for today
//! 2. line filter
//! 3. destination (via-stop) filter
//! 4. departures already gone
//! 5. one entry per trip
//! 6. one entry per (time, line, destination)
//! 7. trips that terminate here
//! 8. sort by time and truncate
//!
//! The destination filter needs each record's own trip sequence, so it runs
//! before duplicates are collapsed. Stages 4 to 7 are a single pass in feed
//! order, and a record only claims its trip and signature once it has
//! survived all of them.

use std::collections::HashSet;

use tracing::trace;

use crate::domain::{DayIndex, MinuteOfDay, Stop};
use crate::schedule::{
    RawDeparture, ScheduleIndex, ServiceCalendarResolver, TransitData, TripStop,
    TripStopSequenceIndex, index_of_stop_at_time, is_terminus,
};

use super::config::BoardConfig;
use super::departure::Departure;
use super::filter::{FilterContext, RouteFilter};

/// Duplicate-detection key: departures sharing it are the same bus as far
/// as a rider can tell.
type Signature<'a> = (MinuteOfDay, String, &'a str);

/// Computes departure lists over the loaded reference data.
///
/// Holds only shared references, so it is cheap to build per request and
/// any number can run at once.
#[derive(Debug, Clone, Copy)]
pub struct DeparturePipeline<'a> {
    schedule: &'a ScheduleIndex,
    calendar: ServiceCalendarResolver<'a>,
    trip_stops: Option<&'a TripStopSequenceIndex>,
    config: &'a BoardConfig,
}

impl<'a> DeparturePipeline<'a> {
    pub fn new(
        schedule: &'a ScheduleIndex,
        calendar: ServiceCalendarResolver<'a>,
        trip_stops: Option<&'a TripStopSequenceIndex>,
        config: &'a BoardConfig,
    ) -> Self {
        Self {
            schedule,
            calendar,
            trip_stops,
            config,
        }
    }

    /// Pipeline over every dataset in `data`.
    pub fn for_data(data: &'a TransitData, config: &'a BoardConfig) -> Self {
        Self::new(
            &data.schedule,
            data.calendar_resolver(),
            data.trip_stops.as_ref(),
            config,
        )
    }

    /// Next departures from `stop`, using its timetable from the schedule.
    pub fn departures_for_stop(
        &self,
        stop: &Stop,
        now: MinuteOfDay,
        day: DayIndex,
        filter: &FilterContext,
    ) -> Vec<Departure> {
        let raw = self.schedule.departures_at(&stop.id);
        self.compute_next_departures(stop, raw, now, day, filter)
    }

    /// Next departures from `stop` among `raw`.
    ///
    /// Returns at most `max_departures` entries, strictly after `now`,
    /// sorted by time with ties kept in feed order.
    pub fn compute_next_departures(
        &self,
        stop: &Stop,
        raw: &[RawDeparture],
        now: MinuteOfDay,
        day: DayIndex,
        filter: &FilterContext,
    ) -> Vec<Departure> {
        let candidates: Vec<&RawDeparture> = raw
            .iter()
            .filter(|r| self.runs_on(r, day))
            .filter(|r| self.matches_route(r, &filter.route))
            .filter(|r| self.reaches_destination(stop, r, filter))
            .collect();

        let mut seen_trips: HashSet<&str> = HashSet::new();
        let mut seen_signatures: HashSet<Signature<'_>> = HashSet::new();
        let mut retained: Vec<&RawDeparture> = Vec::new();

        for record in candidates.iter().copied() {
            if record.minute <= now {
                continue;
            }

            let trip_id = self.schedule.trip_id(record.trip);
            if seen_trips.contains(trip_id) {
                continue;
            }

            let signature = self.signature(record);
            if seen_signatures.contains(&signature) {
                continue;
            }

            if self.terminates_at(stop, record) {
                continue;
            }

            seen_trips.insert(trip_id);
            seen_signatures.insert(signature);
            retained.push(record);
        }

        trace!(
            stop = %stop.id,
            raw = raw.len(),
            filtered = candidates.len(),
            retained = retained.len(),
            "computed departures"
        );

        // Stable, so equal times keep feed order.
        retained.sort_by_key(|r| r.minute);
        retained.truncate(self.config.max_departures);

        retained
            .into_iter()
            .map(|r| self.to_departure(r, now))
            .collect()
    }

    fn runs_on(&self, record: &RawDeparture, day: DayIndex) -> bool {
        self.calendar
            .is_active(self.schedule.service_id(record.service), day)
    }

    fn line_label(&self, record: &RawDeparture) -> String {
        self.schedule
            .route(record.route)
            .line_label(&self.config.operator_prefix)
    }

    fn matches_route(&self, record: &RawDeparture, route: &RouteFilter) -> bool {
        match route {
            RouteFilter::All => true,
            RouteFilter::Line(label) => self.line_label(record) == *label,
        }
    }

    /// Whether the record's trip continues from `stop` to a destination stop.
    ///
    /// Passes everything when no destination search is active. Without trip
    /// sequences nothing can be shown to reach the destination, so nothing
    /// passes.
    fn reaches_destination(
        &self,
        stop: &Stop,
        record: &RawDeparture,
        filter: &FilterContext,
    ) -> bool {
        let Some(targets) = filter.via_targets() else {
            return true;
        };
        let Some(sequence) = self.sequence_for(record) else {
            return false;
        };
        let Some(position) = index_of_stop_at_time(sequence, &stop.id, record.minute) else {
            return false;
        };

        sequence[position + 1..]
            .iter()
            .any(|call| targets.contains(&call.stop))
    }

    /// Whether the record's trip ends at `stop`. Unknown when the trip has no
    /// sequence, which counts as not terminating.
    fn terminates_at(&self, stop: &Stop, record: &RawDeparture) -> bool {
        let Some(sequence) = self.sequence_for(record) else {
            return false;
        };
        index_of_stop_at_time(sequence, &stop.id, record.minute)
            .is_some_and(|position| is_terminus(sequence, position))
    }

    fn sequence_for(&self, record: &RawDeparture) -> Option<&'a [TripStop]> {
        self.trip_stops?.sequence_for(self.schedule.trip_id(record.trip))
    }

    fn signature(&self, record: &RawDeparture) -> Signature<'a> {
        (
            record.minute,
            self.line_label(record),
            self.schedule.destination(record.destination),
        )
    }

    fn to_departure(&self, record: &RawDeparture, now: MinuteOfDay) -> Departure {
        let route = self.schedule.route(record.route);
        Departure {
            trip_id: self.schedule.trip_id(record.trip).to_string(),
            time: record.minute,
            line_label: self.line_label(record),
            route_color: route.color.clone(),
            route_text_color: route.text_color.clone(),
            destination: self.schedule.destination(record.destination).to_string(),
            remaining_minutes: now.minutes_until(record.minute),
            shape_id: self.schedule.shape_id(record.shape).to_string(),
        }
    }
}
