//! Rider-selected filters for a stop board.
//!
//! A [`FilterContext`] is owned by whoever drives the board (a request
//! handler, a UI session). The pipeline only ever reads it.

use std::collections::HashSet;

use crate::domain::StopId;
use crate::search::StopSearchIndex;

/// Sentinel used on the wire for "no filter".
pub const ALL: &str = "ALL";

/// Which platform of the stop group to show.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum PlatformFilter {
    #[default]
    All,
    Only(StopId),
}

impl PlatformFilter {
    /// Parse a wire value: empty or `ALL` means every platform.
    pub fn parse(value: &str) -> Self {
        match value {
            "" | ALL => Self::All,
            id => Self::Only(StopId::new(id)),
        }
    }

    pub fn admits(&self, stop: &StopId) -> bool {
        match self {
            Self::All => true,
            Self::Only(id) => id == stop,
        }
    }
}

/// Which line to show, by prefix-stripped line label.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum RouteFilter {
    #[default]
    All,
    Line(String),
}

impl RouteFilter {
    /// Parse a wire value: empty or `ALL` means every line.
    pub fn parse(value: &str) -> Self {
        match value {
            "" | ALL => Self::All,
            label => Self::Line(label.to_string()),
        }
    }
}

/// The filters active on a board.
///
/// The default value is the reset state applied when a new stop group is
/// opened.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterContext {
    pub platform: PlatformFilter,
    pub route: RouteFilter,

    /// Destination text the rider typed.
    pub dest_keyword: String,

    /// Stops whose name matches `dest_keyword`. `None` when no destination
    /// search is active.
    pub target_stop_ids: Option<HashSet<StopId>>,
}

impl FilterContext {
    pub fn select_platform(&mut self, platform: PlatformFilter) {
        self.platform = platform;
    }

    /// Select a line, or clear the line filter if it is already selected.
    pub fn toggle_route(&mut self, label: &str) {
        self.route = match &self.route {
            RouteFilter::Line(current) if current == label => RouteFilter::All,
            _ => RouteFilter::Line(label.to_string()),
        };
    }

    /// Set the destination search and rebuild the target stop set from it.
    ///
    /// Surrounding whitespace is ignored; an empty keyword clears the
    /// destination filter.
    pub fn set_destination(&mut self, keyword: &str, stops: &StopSearchIndex) {
        let keyword = keyword.trim();
        self.dest_keyword = keyword.to_string();
        self.target_stop_ids = if keyword.is_empty() {
            None
        } else {
            Some(stops.stops_matching(keyword))
        };
    }

    /// The via-stop targets, when a destination search is active.
    ///
    /// Requires both a keyword and a target set.
    pub fn via_targets(&self) -> Option<&HashSet<StopId>> {
        if self.dest_keyword.is_empty() {
            return None;
        }
        self.target_stop_ids.as_ref()
    }
}
