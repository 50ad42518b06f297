//! Railway station proximity server.
//!
//! Answers "which stations are near this point?" and "how far apart are
//! these two stations?" over a station point layer and a railway line
//! layer, and exports both layers as GeoJSON.

pub mod config;
pub mod dataset;
pub mod distance;
pub mod domain;
pub mod query;
pub mod store;
pub mod web;
