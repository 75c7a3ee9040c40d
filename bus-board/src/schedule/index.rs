//! Decoded per-stop timetable.
//!
//! The dataset stores each departure as a compact positional tuple
//! `[trip, minute, destination, service, shape, route]` whose integers index
//! into parallel lookup tables. Tuples are decoded once, at load time, into
//! [`RawDeparture`] records with typed references, and every reference is
//! checked against its table then. After that the index is read-only.

use std::collections::HashMap;

use crate::domain::{MinuteOfDay, Route, StopId};

use super::error::DatasetError;

/// Number of fields in an encoded departure tuple.
pub const TUPLE_WIDTH: usize = 6;

macro_rules! table_ref {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub struct $name(u32);

        impl $name {
            fn index(self) -> usize {
                self.0 as usize
            }
        }
    };
}

table_ref!(
    /// Index into the trip identifier table.
    TripRef
);
table_ref!(
    /// Index into the destination name table.
    DestinationRef
);
table_ref!(
    /// Index into the service identifier table.
    ServiceRef
);
table_ref!(
    /// Index into the shape identifier table.
    ShapeRef
);
table_ref!(
    /// Index into the route table.
    RouteRef
);

/// One scheduled occurrence of a trip at a stop.
///
/// Carries no date: whether it runs on a given day is decided by its
/// service's calendar row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawDeparture {
    pub trip: TripRef,
    pub minute: MinuteOfDay,
    pub destination: DestinationRef,
    pub service: ServiceRef,
    pub shape: ShapeRef,
    pub route: RouteRef,
}

/// The lookup tables departure tuples index into.
#[derive(Debug, Clone, Default)]
pub struct ScheduleTables {
    pub routes: Vec<Route>,
    pub destinations: Vec<String>,
    pub trips: Vec<String>,
    pub shapes: Vec<String>,
    pub services: Vec<String>,
}

/// Read-only timetable: per-stop departures plus the tables they reference.
#[derive(Debug, Clone, Default)]
pub struct ScheduleIndex {
    tables: ScheduleTables,
    departures: HashMap<StopId, Vec<RawDeparture>>,
}

impl ScheduleIndex {
    /// Decode the encoded per-stop timetable against `tables`.
    ///
    /// Departure order within each stop is preserved; later stages rely on
    /// it for tie-breaking.
    pub fn decode(
        tables: ScheduleTables,
        timetable: HashMap<String, Vec<Vec<i64>>>,
    ) -> Result<Self, DatasetError> {
        let mut departures = HashMap::with_capacity(timetable.len());

        for (stop, tuples) in timetable {
            let decoded = tuples
                .iter()
                .enumerate()
                .map(|(position, tuple)| decode_tuple(&tables, &stop, position, tuple))
                .collect::<Result<Vec<_>, _>>()?;
            departures.insert(StopId::new(stop), decoded);
        }

        Ok(Self { tables, departures })
    }

    /// Raw departures at a stop, in feed order. Empty for unknown stops.
    pub fn departures_at(&self, stop: &StopId) -> &[RawDeparture] {
        self.departures
            .get(stop)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    /// The departure of `trip_id` at `stop`, if the trip calls there.
    pub fn find_departure(&self, stop: &StopId, trip_id: &str) -> Option<&RawDeparture> {
        self.departures_at(stop)
            .iter()
            .find(|d| self.trip_id(d.trip) == trip_id)
    }

    pub fn trip_id(&self, trip: TripRef) -> &str {
        &self.tables.trips[trip.index()]
    }

    pub fn destination(&self, destination: DestinationRef) -> &str {
        &self.tables.destinations[destination.index()]
    }

    pub fn service_id(&self, service: ServiceRef) -> &str {
        &self.tables.services[service.index()]
    }

    pub fn shape_id(&self, shape: ShapeRef) -> &str {
        &self.tables.shapes[shape.index()]
    }

    pub fn route(&self, route: RouteRef) -> &Route {
        &self.tables.routes[route.index()]
    }

    /// Number of stops with at least one timetable entry.
    pub fn stop_count(&self) -> usize {
        self.departures.len()
    }

    /// Total number of departures across all stops.
    pub fn departure_count(&self) -> usize {
        self.departures.values().map(|v| v.len()).sum()
    }
}

fn decode_tuple(
    tables: &ScheduleTables,
    stop: &str,
    position: usize,
    tuple: &[i64],
) -> Result<RawDeparture, DatasetError> {
    if tuple.len() != TUPLE_WIDTH {
        return Err(DatasetError::MalformedDeparture {
            stop: stop.to_string(),
            position,
            expected: TUPLE_WIDTH,
            found: tuple.len(),
        });
    }

    let lookup = |table: &'static str, value: i64, len: usize| -> Result<u32, DatasetError> {
        match usize::try_from(value) {
            Ok(i) if i < len => Ok(i as u32),
            _ => Err(DatasetError::DanglingReference {
                stop: stop.to_string(),
                position,
                table,
                index: value,
            }),
        }
    };

    let minute = u16::try_from(tuple[1])
        .ok()
        .and_then(|m| MinuteOfDay::new(m).ok())
        .ok_or_else(|| DatasetError::MinuteOutOfRange {
            stop: stop.to_string(),
            position,
            minute: tuple[1],
        })?;

    Ok(RawDeparture {
        trip: TripRef(lookup("trips", tuple[0], tables.trips.len())?),
        minute,
        destination: DestinationRef(lookup(
            "destinations",
            tuple[2],
            tables.destinations.len(),
        )?),
        service: ServiceRef(lookup("services", tuple[3], tables.services.len())?),
        shape: ShapeRef(lookup("shapes", tuple[4], tables.shapes.len())?),
        route: RouteRef(lookup("routes", tuple[5], tables.routes.len())?),
    })
}
