//! Board configuration.

/// Default and upper bound for the number of departures shown per platform.
pub const DEFAULT_MAX_DEPARTURES: usize = 5;

/// Operator name the feed prefixes municipal route names with.
pub const DEFAULT_OPERATOR_PREFIX: &str = "市バス";

/// Configuration parameters for computing departure lists.
#[derive(Debug, Clone)]
pub struct BoardConfig {
    /// Maximum number of departures returned per stop.
    pub max_departures: usize,

    /// Prefix removed from route names to get the line label riders use.
    /// Route filtering and duplicate detection both compare stripped labels.
    pub operator_prefix: String,
}

impl BoardConfig {
    /// Create a new configuration with the given parameters.
    ///
    /// `max_departures` is capped at [`DEFAULT_MAX_DEPARTURES`].
    pub fn new(max_departures: usize, operator_prefix: impl Into<String>) -> Self {
        Self {
            max_departures: max_departures.min(DEFAULT_MAX_DEPARTURES),
            operator_prefix: operator_prefix.into(),
        }
    }
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            max_departures: DEFAULT_MAX_DEPARTURES,
            operator_prefix: DEFAULT_OPERATOR_PREFIX.to_string(),
        }
    }
}
