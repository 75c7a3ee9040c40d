//! HTTP route handlers.

use askama::Template;
use axum::body::Bytes;
use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
};
use chrono::{Datelike, Local};
use tower_http::services::ServeDir;
use tracing::{error, warn};

use crate::board::{StopBoard, TimelineError, TripTimeline};
use crate::departures::{FilterContext, PlatformFilter, RouteFilter};
use crate::domain::{DayIndex, MinuteOfDay, StopId};
use crate::search::FavoritesError;

use super::dto::*;
use super::state::AppState;
use super::templates::*;

/// Create the application router.
///
/// `static_dir` is the path to the static assets directory.
pub fn create_router(state: AppState, static_dir: &str) -> Router {
    Router::new()
        .route("/", get(index_page))
        .route("/health", get(health))
        .route("/api/stops/search", get(search_stops))
        .route("/api/board", get(stop_board))
        .route("/api/trips/:trip_id", get(trip_timeline))
        .route("/api/favorites/toggle", post(toggle_favorite))
        .nest_service("/static", ServeDir::new(static_dir))
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Index page, opening on the favourite stop groups.
async fn index_page(State(state): State<AppState>) -> impl IntoResponse {
    let favorites = state.favorite_names().await;
    let result = state.data.stops.search("", &favorites);
    let template = IndexTemplate {
        is_favorite_view: true,
        groups: result
            .groups
            .iter()
            .map(|g| StopGroupView::from_group(g, &favorites))
            .collect(),
    };
    Html(
        template
            .render()
            .unwrap_or_else(|e| format!("Template error: {}", e)),
    )
}

/// Check if request accepts HTML.
fn accepts_html(headers: &HeaderMap) -> bool {
    headers
        .get(header::ACCEPT)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|accept| accept.contains("text/html"))
}

fn render<T: Template>(template: T) -> Result<Response, AppError> {
    let html = template.render().map_err(|e| AppError::Internal {
        message: format!("Template error: {}", e),
    })?;
    Ok(Html(html).into_response())
}

/// Search stop groups by name; an empty query lists favourites.
async fn search_stops(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(req): Query<StopSearchRequest>,
) -> Result<Response, AppError> {
    let favorites = state.favorite_names().await;
    let result = state.data.stops.search(req.q.trim(), &favorites);

    if accepts_html(&headers) {
        render(StopListTemplate {
            is_favorite_view: result.is_favorite_view,
            groups: result
                .groups
                .iter()
                .map(|g| StopGroupView::from_group(g, &favorites))
                .collect(),
        })
    } else {
        Ok(Json(StopSearchResponse::from_result(&result, &favorites)).into_response())
    }
}

/// The time and day a request is evaluated at: explicit overrides, or the
/// local clock.
fn resolve_moment(
    time: Option<&str>,
    day: Option<u8>,
) -> Result<(MinuteOfDay, DayIndex), AppError> {
    let now = Local::now();

    let minute = match time {
        Some(t) => MinuteOfDay::parse_hhmm(t).map_err(|e| AppError::BadRequest {
            message: format!("Invalid time {t:?}: {e}"),
        })?,
        None => MinuteOfDay::from_time(now.time()),
    };

    let day = match day {
        Some(d) => DayIndex::new(d).map_err(|e| AppError::BadRequest {
            message: format!("Invalid day {d}: {e}"),
        })?,
        None => DayIndex::from(now.weekday()),
    };

    Ok((minute, day))
}

/// Departure board for a stop group.
async fn stop_board(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(req): Query<BoardRequest>,
) -> Result<Response, AppError> {
    let (now, day) = resolve_moment(req.time.as_deref(), req.day)?;

    let mut filter = FilterContext::default();
    filter.select_platform(PlatformFilter::parse(req.platform.as_deref().unwrap_or("")));
    filter.route = RouteFilter::parse(req.route.as_deref().unwrap_or(""));
    filter.set_destination(req.dest.as_deref().unwrap_or(""), &state.data.stops);

    let board = StopBoard::build(&state.data, &state.config, &req.name, now, day, &filter);
    if board.is_unknown_group() {
        return Err(AppError::NotFound {
            message: format!("No stop named {:?}", req.name),
        });
    }

    let is_favorite = state.favorites.read().await.contains(&req.name);

    if accepts_html(&headers) {
        render(BoardTemplate {
            board: BoardView::from_board(&board, &filter, now.to_string(), is_favorite),
        })
    } else {
        Ok(Json(BoardResponse::from_board(
            &board,
            now.to_string(),
            day.index(),
            is_favorite,
        ))
        .into_response())
    }
}

/// Calling pattern of a trip, seen from the stop the rider is at.
async fn trip_timeline(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(trip_id): Path<String>,
    Query(req): Query<TripRequest>,
) -> Result<Response, AppError> {
    let timeline = TripTimeline::build(
        &state.data,
        &state.config,
        &trip_id,
        &StopId::new(req.stop),
    )?;

    if accepts_html(&headers) {
        render(TripTimelineTemplate {
            timeline: TimelineView::from_timeline(&timeline),
        })
    } else {
        Ok(Json(TimelineResponse::from_timeline(&timeline)).into_response())
    }
}

/// Add or remove a favourite stop group.
async fn toggle_favorite(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<FavoritesResponse>, AppError> {
    // Parse JSON manually so we can log the body on failure
    let req: ToggleFavoriteRequest = serde_json::from_slice(&body).map_err(|e| {
        warn!(body = %String::from_utf8_lossy(&body), "invalid favourites request: {e}");
        AppError::BadRequest {
            message: format!("Invalid JSON: {e}"),
        }
    })?;

    let name = req.name.trim();
    if name.is_empty() {
        return Err(AppError::BadRequest {
            message: "Stop name must not be empty".to_string(),
        });
    }

    let (is_favorite, names) = state.toggle_favorite(name).await?;
    Ok(Json(FavoritesResponse { is_favorite, names }))
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
    Internal { message: String },
}

impl From<TimelineError> for AppError {
    fn from(e: TimelineError) -> Self {
        AppError::NotFound {
            message: e.to_string(),
        }
    }
}

impl From<FavoritesError> for AppError {
    fn from(e: FavoritesError) -> Self {
        AppError::Internal {
            message: e.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        if status.is_server_error() {
            error!(%status, "{message}");
        } else {
            warn!(%status, "{message}");
        }

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
