//! What a rider sees for one stop group: the departure board, and the
//! calling pattern of a trip picked from it.

mod stop_board;
mod timeline;

pub use stop_board::{PlatformOption, PlatformSection, RouteTag, StopBoard};
pub use timeline::{TimelineError, TimelineHeader, TimelineRow, TripTimeline};
