//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::board::{StopBoard, TimelineHeader, TimelineRow, TripTimeline};
use crate::departures::Departure;
use crate::domain::Stop;
use crate::search::{SearchResult, StopGroup};

/// Query for the stop search endpoint.
#[derive(Debug, Deserialize)]
pub struct StopSearchRequest {
    /// Part of a stop name; empty lists favourites
    #[serde(default)]
    pub q: String,
}

/// Query for the board endpoint.
#[derive(Debug, Deserialize)]
pub struct BoardRequest {
    /// Stop group name
    pub name: String,

    /// Stop id of one platform, or "ALL"
    pub platform: Option<String>,

    /// Line label, or "ALL"
    pub route: Option<String>,

    /// Destination stop name search
    pub dest: Option<String>,

    /// Time in HH:MM format (defaults to now)
    pub time: Option<String>,

    /// Day index, 0 = Sunday (defaults to today)
    pub day: Option<u8>,
}

/// Query for the trip timeline endpoint.
#[derive(Debug, Deserialize)]
pub struct TripRequest {
    /// Stop the rider is at
    pub stop: String,
}

/// Body for toggling a favourite.
#[derive(Debug, Deserialize)]
pub struct ToggleFavoriteRequest {
    /// Stop group name
    pub name: String,
}

#[derive(Debug, Serialize)]
pub struct StopResult {
    pub id: String,
    pub platform: String,
    pub lat: f64,
    pub lon: f64,
}

#[derive(Debug, Serialize)]
pub struct StopGroupResult {
    pub name: String,
    pub is_favorite: bool,
    pub stops: Vec<StopResult>,
}

/// Response for stop search.
#[derive(Debug, Serialize)]
pub struct StopSearchResponse {
    /// True when listing favourites because the query was empty
    pub is_favorite_view: bool,
    pub groups: Vec<StopGroupResult>,
}

#[derive(Debug, Serialize)]
pub struct RouteResult {
    pub label: String,
    pub color: String,
    pub text_color: String,
}

#[derive(Debug, Serialize)]
pub struct PlatformResult {
    pub stop_id: String,
    pub platform: Option<String>,
}

/// One departure on the board.
#[derive(Debug, Serialize)]
pub struct DepartureResult {
    pub trip_id: String,

    /// Departure time, HH:MM
    pub time: String,
    pub line_label: String,
    pub route_color: String,
    pub route_text_color: String,
    pub destination: String,
    pub remaining_minutes: i32,

    /// Remaining time as shown to riders, e.g. "3 minutes"
    pub remaining: String,
    pub shape_id: String,
}

#[derive(Debug, Serialize)]
pub struct SectionResult {
    pub stop_id: String,
    pub platform: String,
    pub departures: Vec<DepartureResult>,
}

/// Response for the board endpoint.
#[derive(Debug, Serialize)]
pub struct BoardResponse {
    pub name: String,

    /// Time the board was computed for, HH:MM
    pub time: String,

    /// Day index the board was computed for, 0 = Sunday
    pub day: usize,
    pub is_favorite: bool,
    pub routes: Vec<RouteResult>,
    pub platforms: Vec<PlatformResult>,

    /// Empty when no bus matches the filters
    pub sections: Vec<SectionResult>,
}

#[derive(Debug, Serialize)]
pub struct TimelineHeaderResult {
    pub line_label: String,
    pub route_color: String,
    pub route_text_color: String,
    pub destination: String,
}

#[derive(Debug, Serialize)]
pub struct TimelineRowResult {
    pub stop_id: String,
    pub name: String,
    pub time: String,
    pub is_current: bool,
}

/// Response for the trip timeline endpoint.
#[derive(Debug, Serialize)]
pub struct TimelineResponse {
    pub trip_id: String,
    pub header: Option<TimelineHeaderResult>,
    pub rows: Vec<TimelineRowResult>,
}

/// Response after toggling a favourite.
#[derive(Debug, Serialize)]
pub struct FavoritesResponse {
    /// Whether the toggled name is now a favourite
    pub is_favorite: bool,

    /// All favourites, in order
    pub names: Vec<String>,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}

// Conversion implementations

impl StopResult {
    pub fn from_stop(stop: &Stop) -> Self {
        Self {
            id: stop.id.to_string(),
            platform: stop.platform_label().to_string(),
            lat: stop.lat,
            lon: stop.lon,
        }
    }
}

impl StopGroupResult {
    pub fn from_group(group: &StopGroup, favorites: &[String]) -> Self {
        Self {
            name: group.name.clone(),
            is_favorite: favorites.contains(&group.name),
            stops: group.stops.iter().map(StopResult::from_stop).collect(),
        }
    }
}

impl StopSearchResponse {
    pub fn from_result(result: &SearchResult, favorites: &[String]) -> Self {
        Self {
            is_favorite_view: result.is_favorite_view,
            groups: result
                .groups
                .iter()
                .map(|g| StopGroupResult::from_group(g, favorites))
                .collect(),
        }
    }
}

impl DepartureResult {
    pub fn from_departure(departure: &Departure) -> Self {
        Self {
            trip_id: departure.trip_id.clone(),
            time: departure.time.to_string(),
            line_label: departure.line_label.clone(),
            route_color: departure.route_color.clone(),
            route_text_color: departure.route_text_color.clone(),
            destination: departure.destination.clone(),
            remaining_minutes: departure.remaining_minutes,
            remaining: departure.remaining().to_string(),
            shape_id: departure.shape_id.clone(),
        }
    }
}

impl BoardResponse {
    pub fn from_board(board: &StopBoard, time: String, day: usize, is_favorite: bool) -> Self {
        Self {
            name: board.name.clone(),
            time,
            day,
            is_favorite,
            routes: board
                .routes
                .iter()
                .map(|r| RouteResult {
                    label: r.label.clone(),
                    color: r.color.clone(),
                    text_color: r.text_color.clone(),
                })
                .collect(),
            platforms: board
                .platforms
                .iter()
                .map(|p| PlatformResult {
                    stop_id: p.stop_id.to_string(),
                    platform: p.platform.clone(),
                })
                .collect(),
            sections: board
                .sections
                .iter()
                .map(|s| SectionResult {
                    stop_id: s.stop_id.to_string(),
                    platform: s.platform.clone(),
                    departures: s.departures.iter().map(DepartureResult::from_departure).collect(),
                })
                .collect(),
        }
    }
}

impl TimelineResponse {
    pub fn from_timeline(timeline: &TripTimeline) -> Self {
        Self {
            trip_id: timeline.trip_id.clone(),
            header: timeline.header.as_ref().map(TimelineHeaderResult::from_header),
            rows: timeline.rows.iter().map(TimelineRowResult::from_row).collect(),
        }
    }
}

impl TimelineHeaderResult {
    fn from_header(header: &TimelineHeader) -> Self {
        Self {
            line_label: header.line_label.clone(),
            route_color: header.route_color.clone(),
            route_text_color: header.route_text_color.clone(),
            destination: header.destination.clone(),
        }
    }
}

impl TimelineRowResult {
    fn from_row(row: &TimelineRow) -> Self {
        Self {
            stop_id: row.stop_id.to_string(),
            name: row.name.clone(),
            time: row.time.clone(),
            is_current: row.is_current,
        }
    }
}
