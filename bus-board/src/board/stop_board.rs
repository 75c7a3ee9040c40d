//! Departure board for a stop group.

use std::collections::HashSet;

use tracing::debug;

use crate::departures::{BoardConfig, Departure, DeparturePipeline, FilterContext};
use crate::domain::{DayIndex, MinuteOfDay, Stop, StopId, UNKNOWN_PLATFORM, natural_cmp};
use crate::schedule::TransitData;

/// A line serving the group, as shown on the route filter buttons.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteTag {
    pub label: String,
    pub color: String,
    pub text_color: String,
}

/// One entry of the platform selector.
#[derive(Debug, Clone, PartialEq)]
pub struct PlatformOption {
    pub stop_id: StopId,
    pub platform: Option<String>,
}

impl PlatformOption {
    fn from_stop(stop: &Stop) -> Self {
        Self {
            stop_id: stop.id.clone(),
            platform: stop.platform.clone(),
        }
    }

    /// Platform description for display, falling back to a placeholder.
    pub fn label(&self) -> &str {
        self.platform
            .as_deref()
            .filter(|p| !p.is_empty())
            .unwrap_or(UNKNOWN_PLATFORM)
    }

    fn sort_key(&self) -> &str {
        self.platform.as_deref().unwrap_or("")
    }
}

/// Upcoming departures from one platform of the group.
#[derive(Debug, Clone, PartialEq)]
pub struct PlatformSection {
    pub stop_id: StopId,
    pub platform: String,
    pub departures: Vec<Departure>,
}

/// Everything shown for a stop group at one moment.
#[derive(Debug, Clone, PartialEq)]
pub struct StopBoard {
    pub name: String,

    /// Every line calling at the group, whatever the filters, in natural
    /// label order.
    pub routes: Vec<RouteTag>,

    /// The group's platforms ordered by description.
    pub platforms: Vec<PlatformOption>,

    /// Platforms with at least one departure left after filtering, in
    /// stop table order.
    pub sections: Vec<PlatformSection>,
}

impl StopBoard {
    /// Build the board for the stop group called `name`.
    ///
    /// An unknown name gives a board with no platforms.
    pub fn build(
        data: &TransitData,
        config: &BoardConfig,
        name: &str,
        now: MinuteOfDay,
        day: DayIndex,
        filter: &FilterContext,
    ) -> Self {
        let stops = data.stops.group(name);
        let pipeline = DeparturePipeline::for_data(data, config);

        let mut platforms: Vec<PlatformOption> =
            stops.iter().map(|s| PlatformOption::from_stop(s)).collect();
        platforms.sort_by(|a, b| natural_cmp(a.sort_key(), b.sort_key()));

        let sections: Vec<PlatformSection> = stops
            .iter()
            .filter(|stop| filter.platform.admits(&stop.id))
            .map(|stop| PlatformSection {
                stop_id: stop.id.clone(),
                platform: stop.platform_label().to_string(),
                departures: pipeline.departures_for_stop(stop, now, day, filter),
            })
            .filter(|section| !section.departures.is_empty())
            .collect();

        debug!(
            group = name,
            platforms = platforms.len(),
            sections = sections.len(),
            "built stop board"
        );

        Self {
            name: name.to_string(),
            routes: route_tags(data, config, &stops),
            platforms,
            sections,
        }
    }

    pub fn has_departures(&self) -> bool {
        !self.sections.is_empty()
    }

    /// Whether no stop carries this group's name.
    pub fn is_unknown_group(&self) -> bool {
        self.platforms.is_empty()
    }
}

fn route_tags(data: &TransitData, config: &BoardConfig, stops: &[&Stop]) -> Vec<RouteTag> {
    let schedule = &data.schedule;
    let mut seen = HashSet::new();
    let mut tags = Vec::new();

    for stop in stops {
        for departure in schedule.departures_at(&stop.id) {
            let route = schedule.route(departure.route);
            let label = route.line_label(&config.operator_prefix);
            if seen.insert(label.clone()) {
                tags.push(RouteTag {
                    label,
                    color: route.color.clone(),
                    text_color: route.text_color.clone(),
                });
            }
        }
    }

    tags.sort_by(|a, b| natural_cmp(&a.label, &b.label));
    tags
}
