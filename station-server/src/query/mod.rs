//! Station queries.
//!
//! Every query works on a freshly loaded, request-scoped station list.
//! Ids are layer positions throughout: listing and ranking skip stations
//! without geometry without renumbering the rest, and the pairwise query
//! indexes the same positions.

mod error;
mod export;
mod nearest;
mod pairwise;
mod params;

pub use error::QueryError;
pub use export::{export_lines, export_stations};
pub use nearest::{Located, Neighbour, located, nearest};
pub use pairwise::{StationDistance, distance_between};
pub use params::{DEFAULT_COUNT, parse_coordinate, parse_count, parse_uid};
