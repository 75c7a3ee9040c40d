//! Next departures for a stop, and the filters riders apply to them.

mod config;
mod departure;
mod filter;
mod pipeline;


pub use config::{BoardConfig, DEFAULT_MAX_DEPARTURES, DEFAULT_OPERATOR_PREFIX};
pub use departure::{Departure, Remaining};
pub use filter::{ALL, FilterContext, PlatformFilter, RouteFilter};
pub use pipeline::DeparturePipeline;
