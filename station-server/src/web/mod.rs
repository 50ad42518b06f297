//! Web layer for the station server.
//!
//! Provides the HTTP/JSON endpoints over the station and railway layers.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
