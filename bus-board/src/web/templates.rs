//! Askama templates for the web frontend.

use askama::Template;

use crate::board::{StopBoard, TripTimeline};
use crate::departures::{ALL, Departure, FilterContext, PlatformFilter, Remaining, RouteFilter};
use crate::search::StopGroup;

// ============================================================================
// Page Templates (extend base.html)
// ============================================================================

/// Home page: stop search plus the favourite groups.
#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    /// Always true: the home page opens on the favourites.
    pub is_favorite_view: bool,
    pub groups: Vec<StopGroupView>,
}

// ============================================================================
// Fragment Templates (AJAX responses, no base.html)
// ============================================================================

/// Stop search results fragment.
#[derive(Template)]
#[template(path = "stop_list.html")]
pub struct StopListTemplate {
    pub is_favorite_view: bool,
    pub groups: Vec<StopGroupView>,
}

/// Departure board fragment.
#[derive(Template)]
#[template(path = "board.html")]
pub struct BoardTemplate {
    pub board: BoardView,
}

/// Trip timeline fragment.
#[derive(Template)]
#[template(path = "trip_timeline.html")]
pub struct TripTimelineTemplate {
    pub timeline: TimelineView,
}

// ============================================================================
// View Models (for templates)
// ============================================================================

#[derive(Debug, Clone)]
pub struct StopGroupView {
    pub name: String,
    pub platform_count: usize,
    pub is_favorite: bool,
}

impl StopGroupView {
    pub fn from_group(group: &StopGroup, favorites: &[String]) -> Self {
        Self {
            name: group.name.clone(),
            platform_count: group.stops.len(),
            is_favorite: favorites.contains(&group.name),
        }
    }
}

/// A coloured line badge.
#[derive(Debug, Clone)]
pub struct BadgeView {
    pub label: String,
    pub color: String,
    pub text_color: String,
}

impl BadgeView {
    pub fn style(&self) -> String {
        format!("background:{};color:{}", self.color, self.text_color)
    }
}

#[derive(Debug, Clone)]
pub struct RouteButtonView {
    pub badge: BadgeView,
    pub is_selected: bool,
}

#[derive(Debug, Clone)]
pub struct PlatformButtonView {
    pub stop_id: String,
    pub label: String,
    pub is_selected: bool,
}

#[derive(Debug, Clone)]
pub struct DepartureView {
    pub trip_id: String,
    pub stop_id: String,
    pub time: String,
    pub badge: BadgeView,
    pub destination: String,
    pub remaining: String,
    pub is_imminent: bool,
}

impl DepartureView {
    pub fn from_departure(departure: &Departure, stop_id: &str) -> Self {
        let remaining = departure.remaining();
        Self {
            trip_id: departure.trip_id.clone(),
            stop_id: stop_id.to_string(),
            time: departure.time.to_string(),
            badge: BadgeView {
                label: departure.line_label.clone(),
                color: departure.route_color.clone(),
                text_color: departure.route_text_color.clone(),
            },
            destination: departure.destination.clone(),
            remaining: remaining.to_string(),
            is_imminent: matches!(remaining, Remaining::Now | Remaining::Minutes(1..=3)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SectionView {
    pub platform: String,
    pub departures: Vec<DepartureView>,
}

#[derive(Debug, Clone)]
pub struct BoardView {
    pub name: String,
    pub time: String,
    pub is_favorite: bool,
    pub all_platforms_selected: bool,
    pub all_routes_selected: bool,
    pub dest_keyword: String,
    pub routes: Vec<RouteButtonView>,
    pub platforms: Vec<PlatformButtonView>,
    pub sections: Vec<SectionView>,
}

impl BoardView {
    pub fn from_board(
        board: &StopBoard,
        filter: &FilterContext,
        time: String,
        is_favorite: bool,
    ) -> Self {
        let routes = board
            .routes
            .iter()
            .map(|r| RouteButtonView {
                badge: BadgeView {
                    label: r.label.clone(),
                    color: r.color.clone(),
                    text_color: r.text_color.clone(),
                },
                is_selected: matches!(&filter.route, RouteFilter::Line(l) if *l == r.label),
            })
            .collect();

        let platforms = board
            .platforms
            .iter()
            .map(|p| PlatformButtonView {
                stop_id: p.stop_id.to_string(),
                label: p.label().to_string(),
                is_selected: matches!(&filter.platform, PlatformFilter::Only(id) if *id == p.stop_id),
            })
            .collect();

        let sections = board
            .sections
            .iter()
            .map(|s| SectionView {
                platform: s.platform.clone(),
                departures: s
                    .departures
                    .iter()
                    .map(|d| DepartureView::from_departure(d, s.stop_id.as_str()))
                    .collect(),
            })
            .collect();

        Self {
            name: board.name.clone(),
            time,
            is_favorite,
            all_platforms_selected: filter.platform == PlatformFilter::All,
            all_routes_selected: filter.route == RouteFilter::All,
            dest_keyword: filter.dest_keyword.clone(),
            routes,
            platforms,
            sections,
        }
    }

    /// Wire value meaning "no filter", for the reset buttons.
    pub fn all(&self) -> &'static str {
        ALL
    }

    pub fn has_departures(&self) -> bool {
        !self.sections.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct TimelineRowView {
    pub stop_id: String,
    pub name: String,
    pub time: String,
    pub is_current: bool,
}

#[derive(Debug, Clone)]
pub struct TimelineView {
    pub badge: Option<BadgeView>,
    pub destination: String,
    pub rows: Vec<TimelineRowView>,
}

impl TimelineView {
    pub fn from_timeline(timeline: &TripTimeline) -> Self {
        let badge = timeline.header.as_ref().map(|h| BadgeView {
            label: h.line_label.clone(),
            color: h.route_color.clone(),
            text_color: h.route_text_color.clone(),
        });
        let destination = timeline
            .header
            .as_ref()
            .map(|h| h.destination.clone())
            .unwrap_or_default();

        Self {
            badge,
            destination,
            rows: timeline
                .rows
                .iter()
                .map(|r| TimelineRowView {
                    stop_id: r.stop_id.to_string(),
                    name: r.name.clone(),
                    time: r.time.clone(),
                    is_current: r.is_current,
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::MinuteOfDay;

    fn departure(remaining_minutes: i32) -> Departure {
        Departure {
            trip_id: "T1".into(),
            time: MinuteOfDay::from_hm(9, 0).unwrap(),
            line_label: "5".into(),
            route_color: "#0068B7".into(),
            route_text_color: "#FFFFFF".into(),
            destination: "Ginkakuji".into(),
            remaining_minutes,
            shape_id: "SH1".into(),
        }
    }

    #[test]
    fn imminent_departures() {
        assert!(DepartureView::from_departure(&departure(0), "S1").is_imminent);
        assert!(DepartureView::from_departure(&departure(3), "S1").is_imminent);
        assert!(!DepartureView::from_departure(&departure(4), "S1").is_imminent);
    }

    #[test]
    fn badge_style() {
        let view = DepartureView::from_departure(&departure(10), "S1");
        assert_eq!(view.badge.style(), "background:#0068B7;color:#FFFFFF");
        assert_eq!(view.remaining, "10 minutes");
    }

    #[test]
    fn board_fragment_renders_empty_state() {
        let template = BoardTemplate {
            board: BoardView {
                name: "Gion".into(),
                time: "09:00".into(),
                is_favorite: false,
                all_platforms_selected: true,
                all_routes_selected: true,
                dest_keyword: String::new(),
                routes: vec![],
                platforms: vec![],
                sections: vec![],
            },
        };
        let html = template.render().unwrap();
        assert!(html.contains("Gion"));
        assert!(html.contains("No matching buses"));
    }

    #[test]
    fn timeline_fragment_marks_current_stop() {
        let template = TripTimelineTemplate {
            timeline: TimelineView {
                badge: None,
                destination: String::new(),
                rows: vec![
                    TimelineRowView {
                        stop_id: "S1".into(),
                        name: "Kyoto Station".into(),
                        time: "09:00".into(),
                        is_current: false,
                    },
                    TimelineRowView {
                        stop_id: "S2".into(),
                        name: "Gion".into(),
                        time: "09:20".into(),
                        is_current: true,
                    },
                ],
            },
        };
        let html = template.render().unwrap();
        assert!(html.contains("timeline-row current"));
        assert!(html.contains("09:20"));
    }
}
