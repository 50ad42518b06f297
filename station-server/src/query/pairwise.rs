//! Distance between two stations.

use geojson::{Feature, Geometry, JsonObject, Value};

use super::error::QueryError;
use super::nearest::Located;
use crate::distance::haversine_km;
use crate::domain::Station;

/// Two located stations and the great-circle distance between them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StationDistance<'a> {
    pub from: Located<'a>,
    pub to: Located<'a>,
    /// Kilometres, unrounded
    pub distance_km: f64,
}

impl StationDistance<'_> {
    /// A GeoJSON feature for the straight line between the two stations.
    pub fn line(&self) -> Feature {
        let mut properties = JsonObject::new();
        properties.insert("from_uid".into(), self.from.station.uid.0.into());
        properties.insert("to_uid".into(), self.to.station.uid.0.into());
        properties.insert(
            "distance_km".into(),
            serde_json::Number::from_f64(self.distance_km)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
        );

        let coordinates = vec![
            vec![self.from.position.lon, self.from.position.lat],
            vec![self.to.position.lon, self.to.position.lat],
        ];

        Feature {
            bbox: None,
            geometry: Some(Geometry::new(Value::LineString(coordinates))),
            id: None,
            properties: Some(properties),
            foreign_members: None,
        }
    }
}

/// Distance between the stations at positions `from` and `to`.
///
/// Ids index the full layer, including rows without geometry. Both ids are
/// range-checked before either geometry is looked at.
pub fn distance_between(
    stations: &[Station],
    from: i64,
    to: i64,
) -> Result<StationDistance<'_>, QueryError> {
    let from = resolve(stations, from)?;
    let to = resolve(stations, to)?;
    let from = locate(from)?;
    let to = locate(to)?;

    let distance_km = haversine_km(
        from.position.lat,
        from.position.lon,
        to.position.lat,
        to.position.lon,
    );

    Ok(StationDistance {
        from,
        to,
        distance_km,
    })
}

fn resolve(stations: &[Station], uid: i64) -> Result<&Station, QueryError> {
    usize::try_from(uid)
        .ok()
        .and_then(|i| stations.get(i))
        .ok_or(QueryError::OutOfRange {
            uid,
            len: stations.len(),
        })
}

fn locate(station: &Station) -> Result<Located<'_>, QueryError> {
    station
        .position
        .map(|position| Located { station, position })
        .ok_or(QueryError::MissingGeometry { uid: station.uid })
}
