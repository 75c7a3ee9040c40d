//! Loading the compact JSON dataset.
//!
//! The dataset is produced offline from the operator's GTFS feed. Its shape
//! keeps the file small: departures are integer tuples into shared tables,
//! and the calendar and trip stop tables are optional so a trimmed dataset
//! still serves (degraded) boards.

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;
use tracing::{info, warn};

use crate::domain::{Route, Stop, StopId};
use crate::search::StopSearchIndex;

use super::calendar::{ServiceCalendar, ServiceCalendarResolver};
use super::error::DatasetError;
use super::index::{ScheduleIndex, ScheduleTables};
use super::trip_stops::{TripStop, TripStopSequenceIndex};

/// The dataset file as stored on disk.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DatasetFile {
    pub stops: Vec<Stop>,
    pub routes: Vec<Route>,
    pub destinations: Vec<String>,
    pub trips: Vec<String>,
    pub shapes: Vec<String>,
    pub services: Vec<String>,

    /// Stop id → encoded departure tuples.
    #[serde(default)]
    pub timetable: HashMap<String, Vec<Vec<i64>>>,

    /// Service id → seven 0/1 flags, Sunday first.
    pub calendar: Option<HashMap<String, Vec<u8>>>,

    /// Trip id → calls in order.
    pub trip_stops: Option<HashMap<String, Vec<TripStopRecord>>>,
}

/// One call in the dataset's trip stop table.
#[derive(Debug, Clone, Deserialize)]
pub struct TripStopRecord {
    #[serde(rename = "i")]
    pub stop: StopId,
    #[serde(rename = "t")]
    pub time: String,
}

/// Everything the board reads, decoded and indexed.
#[derive(Debug, Clone, Default)]
pub struct TransitData {
    pub schedule: ScheduleIndex,

    /// `None` when the dataset carries no calendar at all.
    pub calendar: Option<ServiceCalendar>,

    /// `None` when the dataset carries no trip stop sequences at all.
    pub trip_stops: Option<TripStopSequenceIndex>,

    pub stops: StopSearchIndex,
}

impl TransitData {
    /// Read and decode a dataset file.
    pub fn load(path: &Path) -> Result<Self, DatasetError> {
        let contents = std::fs::read_to_string(path).map_err(|source| DatasetError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&contents)
    }

    pub fn from_json_str(json: &str) -> Result<Self, DatasetError> {
        let file: DatasetFile = serde_json::from_str(json)?;
        Self::decode(file)
    }

    /// Decode and index a parsed dataset.
    pub fn decode(file: DatasetFile) -> Result<Self, DatasetError> {
        let tables = ScheduleTables {
            routes: file.routes,
            destinations: file.destinations,
            trips: file.trips,
            shapes: file.shapes,
            services: file.services,
        };
        let schedule = ScheduleIndex::decode(tables, file.timetable)?;

        let calendar = file.calendar.map(ServiceCalendar::decode).transpose()?;
        if calendar.is_none() {
            warn!("dataset has no service calendar; every service will be treated as running");
        }

        let trip_stops = file.trip_stops.map(|trips| {
            let sequences = trips
                .into_iter()
                .map(|(trip, calls)| {
                    let calls = calls
                        .into_iter()
                        .map(|c| TripStop {
                            stop: c.stop,
                            scheduled: c.time,
                        })
                        .collect();
                    (trip, calls)
                })
                .collect();
            TripStopSequenceIndex::new(sequences)
        });
        if trip_stops.is_none() {
            warn!("dataset has no trip stop sequences; destination filtering will match nothing");
        }

        let stops = StopSearchIndex::new(file.stops);

        info!(
            stops = stops.len(),
            timetabled_stops = schedule.stop_count(),
            departures = schedule.departure_count(),
            services = calendar.as_ref().map_or(0, |c| c.len()),
            trips_with_stops = trip_stops.as_ref().map_or(0, |t| t.len()),
            "decoded dataset"
        );

        Ok(Self {
            schedule,
            calendar,
            trip_stops,
            stops,
        })
    }

    pub fn calendar_resolver(&self) -> ServiceCalendarResolver<'_> {
        ServiceCalendarResolver::new(self.calendar.as_ref())
    }
}
