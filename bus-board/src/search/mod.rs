//! Stop lookup by name.
//!
//! Stops sharing a display name form a stop group (one stop per platform).
//! Searching picks the group whose board the rider wants; an empty search
//! shows the rider's favourite groups instead.

mod favorites;

use std::collections::{HashMap, HashSet};

use serde::Serialize;

use crate::domain::{Stop, StopId};

pub use favorites::{Favorites, FavoritesError, FavoritesStore};

/// Stops sharing one display name.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StopGroup {
    pub name: String,
    pub stops: Vec<Stop>,
}

/// Result of [`StopSearchIndex::search`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResult {
    /// True when the groups are the rider's favourites rather than matches.
    pub is_favorite_view: bool,
    pub groups: Vec<StopGroup>,
}

/// Stop table with name and id lookup.
#[derive(Debug, Clone, Default)]
pub struct StopSearchIndex {
    stops: Vec<Stop>,
    by_id: HashMap<StopId, usize>,
}

impl StopSearchIndex {
    pub fn new(stops: Vec<Stop>) -> Self {
        let by_id = stops
            .iter()
            .enumerate()
            .map(|(i, s)| (s.id.clone(), i))
            .collect();
        Self { stops, by_id }
    }

    /// Find stop groups.
    ///
    /// With an empty keyword, returns one group per favourite name in
    /// favourites order, skipping names no stop carries. Otherwise returns
    /// every stop whose name contains `keyword` (case-sensitive), grouped by
    /// exact name in order of first appearance in the stop table.
    pub fn search(&self, keyword: &str, favorites: &[String]) -> SearchResult {
        if keyword.is_empty() {
            let groups = favorites
                .iter()
                .map(|name| StopGroup {
                    name: name.clone(),
                    stops: self.group(name).into_iter().cloned().collect(),
                })
                .filter(|g| !g.stops.is_empty())
                .collect();
            return SearchResult {
                is_favorite_view: true,
                groups,
            };
        }

        let mut groups: Vec<StopGroup> = Vec::new();
        let mut positions: HashMap<&str, usize> = HashMap::new();
        for stop in self.stops.iter().filter(|s| s.name.contains(keyword)) {
            match positions.get(stop.name.as_str()) {
                Some(&i) => groups[i].stops.push(stop.clone()),
                None => {
                    positions.insert(&stop.name, groups.len());
                    groups.push(StopGroup {
                        name: stop.name.clone(),
                        stops: vec![stop.clone()],
                    });
                }
            }
        }

        SearchResult {
            is_favorite_view: false,
            groups,
        }
    }

    /// Stops named exactly `name`, in stop table order.
    pub fn group(&self, name: &str) -> Vec<&Stop> {
        self.stops.iter().filter(|s| s.name == name).collect()
    }

    /// Ids of every stop whose name contains `keyword`.
    pub fn stops_matching(&self, keyword: &str) -> HashSet<StopId> {
        self.stops
            .iter()
            .filter(|s| s.name.contains(keyword))
            .map(|s| s.id.clone())
            .collect()
    }

    pub fn stop(&self, id: &StopId) -> Option<&Stop> {
        self.by_id.get(id).map(|&i| &self.stops[i])
    }

    pub fn stops(&self) -> &[Stop] {
        &self.stops
    }

    pub fn len(&self) -> usize {
        self.stops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stop(id: &str, name: &str) -> Stop {
        Stop {
            id: StopId::new(id),
            name: name.to_string(),
            platform: None,
            lat: 35.0,
            lon: 135.7,
        }
    }

    fn index() -> StopSearchIndex {
        StopSearchIndex::new(vec![
            stop("1", "Shijo Karasuma"),
            stop("2", "Kyoto Station"),
            stop("3", "Shijo Kawaramachi"),
            stop("4", "Shijo Karasuma"),
            stop("5", "Kyoto Station"),
        ])
    }

    fn ids(group: &StopGroup) -> Vec<&str> {
        group.stops.iter().map(|s| s.id.as_str()).collect()
    }

    #[test]
    fn keyword_groups_in_first_occurrence_order() {
        let result = index().search("Shijo", &[]);
        assert!(!result.is_favorite_view);
        assert_eq!(result.groups.len(), 2);
        assert_eq!(result.groups[0].name, "Shijo Karasuma");
        assert_eq!(ids(&result.groups[0]), vec!["1", "4"]);
        assert_eq!(result.groups[1].name, "Shijo Kawaramachi");
    }

    #[test]
    fn keyword_match_is_case_sensitive() {
        assert!(index().search("shijo", &[]).groups.is_empty());
        assert_eq!(index().search("Station", &[]).groups.len(), 1);
    }

    #[test]
    fn empty_keyword_lists_favorites_in_order() {
        let favorites = vec![
            "Kyoto Station".to_string(),
            "Nowhere".to_string(),
            "Shijo Karasuma".to_string(),
        ];
        let result = index().search("", &favorites);
        assert!(result.is_favorite_view);
        let names: Vec<&str> = result.groups.iter().map(|g| g.name.as_str()).collect();
        assert_eq!(names, vec!["Kyoto Station", "Shijo Karasuma"]);
        assert_eq!(ids(&result.groups[0]), vec!["2", "5"]);
    }

    #[test]
    fn empty_keyword_without_favorites() {
        let result = index().search("", &[]);
        assert!(result.is_favorite_view);
        assert!(result.groups.is_empty());
    }

    #[test]
    fn stops_matching_collects_ids() {
        let ids = index().stops_matching("Kawara");
        assert_eq!(ids, HashSet::from([StopId::new("3")]));
        assert!(index().stops_matching("Arashiyama").is_empty());
    }

    #[test]
    fn lookup_by_id() {
        let index = index();
        assert_eq!(index.stop(&StopId::new("3")).unwrap().name, "Shijo Kawaramachi");
        assert!(index.stop(&StopId::new("99")).is_none());
        assert_eq!(index.group("Kyoto Station").len(), 2);
    }
}
