//! Stop identifiers and stop reference data.

use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of a single stop (one platform or bay of a stop group).
///
/// Identifiers come straight from the feed and are opaque; the only thing
/// the board does with them is compare them.
///
/// # Examples
///
/// ```
/// use bus_board::domain::StopId;
///
/// let id = StopId::new("1001_A");
/// assert_eq!(id.as_str(), "1001_A");
/// assert_eq!(id.to_string(), "1001_A");
/// ```
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StopId(String);

impl StopId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for StopId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl Borrow<str> for StopId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for StopId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StopId({})", self.0)
    }
}

impl fmt::Display for StopId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Label shown for a stop whose feed entry has no platform description.
pub const UNKNOWN_PLATFORM: &str = "unknown";

/// A physical boarding location.
///
/// Several stops usually share one display name; each is then a separate
/// platform of the same stop group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stop {
    pub id: StopId,

    /// Display name shared by every platform of the group.
    pub name: String,

    /// Platform or bay description, e.g. "A2".
    #[serde(rename = "desc", default)]
    pub platform: Option<String>,

    pub lat: f64,
    pub lon: f64,
}

impl Stop {
    /// Platform description for display, falling back to a placeholder.
    pub fn platform_label(&self) -> &str {
        self.platform
            .as_deref()
            .filter(|p| !p.is_empty())
            .unwrap_or(UNKNOWN_PLATFORM)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn stop(platform: Option<&str>) -> Stop {
        Stop {
            id: StopId::new("S1"),
            name: "Shijo Kawaramachi".to_string(),
            platform: platform.map(str::to_string),
            lat: 35.0037,
            lon: 135.7689,
        }
    }

    #[test]
    fn debug() {
        assert_eq!(format!("{:?}", StopId::new("S1")), "StopId(S1)");
    }

    #[test]
    fn set_lookup_by_str() {
        let mut set = HashSet::new();
        set.insert(StopId::new("S1"));
        assert!(set.contains("S1"));
        assert!(!set.contains("S2"));
    }

    #[test]
    fn platform_label_falls_back() {
        assert_eq!(stop(Some("D2")).platform_label(), "D2");
        assert_eq!(stop(Some("")).platform_label(), UNKNOWN_PLATFORM);
        assert_eq!(stop(None).platform_label(), UNKNOWN_PLATFORM);
    }

    #[test]
    fn deserializes_feed_shape() {
        let json = r#"{"id": "S9", "name": "Gion", "desc": "B", "lat": 35.0, "lon": 135.7}"#;
        let stop: Stop = serde_json::from_str(json).unwrap();
        assert_eq!(stop.id, StopId::new("S9"));
        assert_eq!(stop.platform.as_deref(), Some("B"));

        let json = r#"{"id": "S9", "name": "Gion", "lat": 35.0, "lon": 135.7}"#;
        let stop: Stop = serde_json::from_str(json).unwrap();
        assert!(stop.platform.is_none());
    }
}
