//! Station types.

use std::fmt;

use geojson::JsonObject;
use serde_json::Value;

/// Property names checked, in order, when resolving a station's name.
pub const NAME_FIELDS: [&str; 2] = ["name", "nazwa"];

/// Station identifier: the station's zero-based position in its layer.
///
/// Rows without geometry still occupy a position, so ids are never
/// renumbered around them. Ids are only meaningful for the load they
/// came from.
///
/// # Examples
///
/// ```
/// use station_server::domain::StationId;
///
/// let id = StationId(3);
/// assert_eq!(id.to_string(), "3");
/// assert_eq!(id.fallback_name(), "station_3");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StationId(pub usize);

impl StationId {
    /// Synthesized name for stations without a usable name property.
    pub fn fallback_name(&self) -> String {
        format!("station_{}", self.0)
    }
}

impl fmt::Display for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A WGS84 position in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coord {
    pub lon: f64,
    pub lat: f64,
}

impl Coord {
    pub fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }
}

/// A station as loaded from the stations layer.
#[derive(Debug, Clone, PartialEq)]
pub struct Station {
    pub uid: StationId,
    pub name: String,
    /// `None` when the row's geometry is null or empty.
    pub position: Option<Coord>,
}

impl Station {
    pub fn new(uid: StationId, name: impl Into<String>, position: Option<Coord>) -> Self {
        Self {
            uid,
            name: name.into(),
            position,
        }
    }

    /// Build a station, resolving its name from the row's properties.
    pub fn from_properties(uid: StationId, properties: &JsonObject, position: Option<Coord>) -> Self {
        let name = resolve_name(properties).unwrap_or_else(|| uid.fallback_name());
        Self::new(uid, name, position)
    }
}

/// First non-empty name among [`NAME_FIELDS`].
///
/// Null, empty strings, `false` and zero count as absent. Numbers and
/// `true` are rendered as text.
pub fn resolve_name(properties: &JsonObject) -> Option<String> {
    NAME_FIELDS
        .iter()
        .find_map(|field| properties.get(*field).and_then(name_text))
}

fn name_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) if n.as_f64() != Some(0.0) => Some(n.to_string()),
        Value::Bool(true) => Some("true".to_string()),
        _ => None,
    }
}
