//! Domain types for the station server.
//!
//! Stations are rebuilt from the backing store on every request; nothing
//! here is shared between requests.

mod station;

pub use station::{Coord, NAME_FIELDS, Station, StationId, resolve_name};
