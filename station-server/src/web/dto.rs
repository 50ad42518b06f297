//! Data transfer objects for web requests and responses.

use serde::Serialize;

use crate::query::{Located, Neighbour, StationDistance};

/// Raw query string pairs in request order.
pub type QueryPairs = Vec<(String, String)>;

/// First value given for `key`; later repeats are ignored.
fn first_value(pairs: &[(String, String)], key: &str) -> Option<String> {
    pairs.iter().find(|(k, _)| k == key).map(|(_, v)| v.clone())
}

/// Query string for `/nearest`.
///
/// Fields are kept as raw strings so that bad values produce our own
/// JSON errors.
#[derive(Debug, Default, PartialEq)]
pub struct NearestRequest {
    /// Latitude in degrees
    pub lat: Option<String>,

    /// Longitude in degrees
    pub lon: Option<String>,

    /// Number of results (defaults to 5)
    pub n: Option<String>,
}

impl NearestRequest {
    pub fn from_pairs(pairs: &[(String, String)]) -> Self {
        Self {
            lat: first_value(pairs, "lat"),
            lon: first_value(pairs, "lon"),
            n: first_value(pairs, "n"),
        }
    }
}

/// Query string for `/distance`.
#[derive(Debug, Default, PartialEq)]
pub struct DistanceRequest {
    /// Station id to measure from
    pub from: Option<String>,

    /// Station id to measure to
    pub to: Option<String>,
}

impl DistanceRequest {
    pub fn from_pairs(pairs: &[(String, String)]) -> Self {
        Self {
            from: first_value(pairs, "from"),
            to: first_value(pairs, "to"),
        }
    }
}

/// Response for the root endpoint.
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: String,
}

/// A station in listings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StationResult {
    /// Station id (layer position)
    pub uid: usize,

    /// Resolved station name
    pub name: String,

    /// Longitude in degrees
    pub lon: f64,

    /// Latitude in degrees
    pub lat: f64,
}

impl StationResult {
    pub fn from_located(located: &Located<'_>) -> Self {
        Self {
            uid: located.station.uid.0,
            name: located.station.name.clone(),
            lon: located.position.lon,
            lat: located.position.lat,
        }
    }
}

/// A station in nearest-neighbour results.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NeighbourResult {
    pub uid: usize,
    pub name: String,
    pub lon: f64,
    pub lat: f64,

    /// Distance to the query point in kilometres, rounded to metres
    pub distance_km: f64,
}

impl NeighbourResult {
    pub fn from_neighbour(neighbour: &Neighbour<'_>) -> Self {
        let station = StationResult::from_located(&neighbour.located);
        Self {
            uid: station.uid,
            name: station.name,
            lon: station.lon,
            lat: station.lat,
            distance_km: neighbour.distance_km,
        }
    }
}

/// Response for `/distance`.
#[derive(Debug, Serialize)]
pub struct DistanceResponse {
    pub from: StationResult,
    pub to: StationResult,

    /// Unrounded great-circle distance in kilometres
    pub distance_km: f64,

    /// GeoJSON feature for the connecting line
    pub line: geojson::Feature,
}

impl DistanceResponse {
    pub fn from_distance(distance: &StationDistance<'_>) -> Self {
        Self {
            from: StationResult::from_located(&distance.from),
            to: StationResult::from_located(&distance.to),
            distance_km: distance.distance_km,
            line: distance.line(),
        }
    }
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
