//! Builders for small in-memory datasets used across unit tests.

use std::collections::HashMap;

use crate::domain::{MinuteOfDay, Route, Stop, StopId};
use crate::schedule::{DatasetFile, TransitData, TripStopRecord};

pub(crate) const ROUTE_COLOR: &str = "#E60012";
pub(crate) const ROUTE_TEXT_COLOR: &str = "#FFFFFF";

/// Builds a [`DatasetFile`] one departure at a time, interning table
/// entries as they are first mentioned.
#[derive(Debug, Default)]
pub(crate) struct DatasetBuilder {
    file: DatasetFile,
}

impl DatasetBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stop(mut self, id: &str, name: &str, platform: Option<&str>) -> Self {
        self.file.stops.push(Stop {
            id: StopId::new(id),
            name: name.to_string(),
            platform: platform.map(str::to_string),
            lat: 35.0,
            lon: 135.75,
        });
        self
    }

    /// Append a departure of `trip` from `stop` at `time` ("HH:MM").
    pub fn departure(
        mut self,
        stop: &str,
        trip: &str,
        time: &str,
        route: &str,
        destination: &str,
        service: &str,
    ) -> Self {
        let minute = MinuteOfDay::parse_hhmm(time).unwrap();
        let trip_index = intern(&mut self.file.trips, trip);
        let destination_index = intern(&mut self.file.destinations, destination);
        let service_index = intern(&mut self.file.services, service);
        let shape_index = intern(&mut self.file.shapes, &format!("shape-{trip}"));
        let route_index = match self.file.routes.iter().position(|r| r.label == route) {
            Some(i) => i,
            None => {
                self.file.routes.push(Route {
                    label: route.to_string(),
                    color: ROUTE_COLOR.to_string(),
                    text_color: ROUTE_TEXT_COLOR.to_string(),
                });
                self.file.routes.len() - 1
            }
        };

        self.file
            .timetable
            .entry(stop.to_string())
            .or_default()
            .push(vec![
                trip_index as i64,
                i64::from(minute.minutes()),
                destination_index as i64,
                service_index as i64,
                shape_index as i64,
                route_index as i64,
            ]);
        self
    }

    /// Add a calendar row; the first call turns the calendar on.
    pub fn calendar(mut self, service: &str, days: [u8; 7]) -> Self {
        self.file
            .calendar
            .get_or_insert_with(HashMap::new)
            .insert(service.to_string(), days.to_vec());
        self
    }

    /// An empty calendar: present, but listing no service.
    pub fn empty_calendar(mut self) -> Self {
        self.file.calendar.get_or_insert_with(HashMap::new);
        self
    }

    /// Add a trip's calls; the first call turns trip sequences on.
    pub fn trip_stops(mut self, trip: &str, calls: &[(&str, &str)]) -> Self {
        let records = calls
            .iter()
            .map(|(stop, time)| TripStopRecord {
                stop: StopId::new(*stop),
                time: time.to_string(),
            })
            .collect();
        self.file
            .trip_stops
            .get_or_insert_with(HashMap::new)
            .insert(trip.to_string(), records);
        self
    }

    /// Trip sequences present, but listing no trip.
    pub fn empty_trip_stops(mut self) -> Self {
        self.file.trip_stops.get_or_insert_with(HashMap::new);
        self
    }

    pub fn build(self) -> TransitData {
        TransitData::decode(self.file).unwrap()
    }
}

fn intern(table: &mut Vec<String>, value: &str) -> usize {
    match table.iter().position(|v| v == value) {
        Some(i) => i,
        None => {
            table.push(value.to_string());
            table.len() - 1
        }
    }
}

pub(crate) fn minute(time: &str) -> MinuteOfDay {
    MinuteOfDay::parse_hhmm(time).unwrap()
}
