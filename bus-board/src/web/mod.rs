//! Web layer for the bus departure board.
//!
//! Serves the board pages and a JSON API over the same handlers; the
//! `Accept` header picks the representation.

mod dto;
mod routes;
mod state;
pub mod templates;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
pub use templates::*;
