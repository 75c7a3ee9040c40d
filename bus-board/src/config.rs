//! Server configuration from environment variables.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

use thiserror::Error;

use crate::departures::{BoardConfig, DEFAULT_MAX_DEPARTURES, DEFAULT_OPERATOR_PREFIX};

pub const DATA_VAR: &str = "BUS_BOARD_DATA";
pub const ADDR_VAR: &str = "BUS_BOARD_ADDR";
pub const STATIC_DIR_VAR: &str = "BUS_BOARD_STATIC_DIR";
pub const FAVORITES_VAR: &str = "BUS_BOARD_FAVORITES";
pub const MAX_DEPARTURES_VAR: &str = "BUS_BOARD_MAX_DEPARTURES";
pub const OPERATOR_PREFIX_VAR: &str = "BUS_BOARD_OPERATOR_PREFIX";

const DEFAULT_DATA_PATH: &str = "data/kyoto_bus.json";
const DEFAULT_ADDR: SocketAddr = SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), 3000);
const DEFAULT_STATIC_DIR: &str = "static";
const DEFAULT_FAVORITES_PATH: &str = "favorites.json";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} is not a valid socket address: {value}")]
    InvalidAddr { var: &'static str, value: String },

    #[error("{var} must be an integer between 1 and {max}, got {value}")]
    InvalidCount {
        var: &'static str,
        value: String,
        max: usize,
    },
}

/// Everything `main` needs to start serving.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Dataset JSON file.
    pub data_path: PathBuf,

    pub addr: SocketAddr,

    /// Directory served under `/static`.
    pub static_dir: String,

    pub favorites_path: PathBuf,

    pub board: BoardConfig,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Build from an arbitrary variable lookup. Unset or empty variables
    /// take their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |var: &str| lookup(var).filter(|v| !v.trim().is_empty());

        let addr = match get(ADDR_VAR) {
            Some(value) => value.trim().parse().map_err(|_| ConfigError::InvalidAddr {
                var: ADDR_VAR,
                value,
            })?,
            None => DEFAULT_ADDR,
        };

        let max_departures = match get(MAX_DEPARTURES_VAR) {
            Some(value) => match value.trim().parse::<usize>() {
                Ok(n) if (1..=DEFAULT_MAX_DEPARTURES).contains(&n) => n,
                _ => {
                    return Err(ConfigError::InvalidCount {
                        var: MAX_DEPARTURES_VAR,
                        value,
                        max: DEFAULT_MAX_DEPARTURES,
                    });
                }
            },
            None => DEFAULT_MAX_DEPARTURES,
        };

        // An explicitly empty prefix is meaningful: labels are used as-is.
        let operator_prefix =
            lookup(OPERATOR_PREFIX_VAR).unwrap_or_else(|| DEFAULT_OPERATOR_PREFIX.to_string());

        Ok(Self {
            data_path: get(DATA_VAR)
                .unwrap_or_else(|| DEFAULT_DATA_PATH.to_string())
                .into(),
            addr,
            static_dir: get(STATIC_DIR_VAR).unwrap_or_else(|| DEFAULT_STATIC_DIR.to_string()),
            favorites_path: get(FAVORITES_VAR)
                .unwrap_or_else(|| DEFAULT_FAVORITES_PATH.to_string())
                .into(),
            board: BoardConfig::new(max_departures, operator_prefix),
        })
    }
}
