//! Dataset loader.
//!
//! Turns the two backing layers into request-scoped collections. Nothing
//! is cached: every call re-reads its store.

use geojson::Value;
use tracing::warn;

use crate::domain::{Coord, Station, StationId};
use crate::store::{Layer, LayerSource, LoadError, kind_name};

/// The station and railway layers served by the application.
#[derive(Debug, Clone)]
pub struct Dataset {
    stations: LayerSource,
    lines: LayerSource,
}

impl Dataset {
    pub fn new(stations: LayerSource, lines: LayerSource) -> Self {
        Self { stations, lines }
    }

    /// Where stations are read from.
    pub fn stations_source(&self) -> &LayerSource {
        &self.stations
    }

    /// Where railway lines are read from.
    pub fn lines_source(&self) -> &LayerSource {
        &self.lines
    }

    /// Read the raw stations layer.
    pub fn station_layer(&self) -> Result<Layer, LoadError> {
        self.stations.read()
    }

    /// Read the raw railway layer.
    pub fn line_layer(&self) -> Result<Layer, LoadError> {
        self.lines.read()
    }

    /// Load all stations in layer order, including ones without geometry.
    pub fn load_stations(&self) -> Result<Vec<Station>, LoadError> {
        stations_from_layer(&self.station_layer()?)
    }
}

/// Build stations from a point layer.
///
/// Each station's id is its position in the layer. Rows whose geometry is
/// missing keep their slot with no position; rows with a non-point
/// geometry fail the whole load.
pub fn stations_from_layer(layer: &Layer) -> Result<Vec<Station>, LoadError> {
    let stations: Vec<Station> = layer
        .features
        .iter()
        .enumerate()
        .map(|(index, feature)| {
            let position = match feature.geometry.as_ref().map(|g| &g.value) {
                None => None,
                Some(Value::Point(p)) => Some(Coord::new(p[0], p[1])),
                Some(other) => {
                    return Err(LoadError::NotAPoint {
                        layer: layer.name.clone(),
                        index,
                        kind: kind_name(other),
                    });
                }
            };
            Ok(Station::from_properties(
                StationId(index),
                &feature.properties,
                position,
            ))
        })
        .collect::<Result<_, _>>()?;

    let missing = stations.iter().filter(|s| s.position.is_none()).count();
    if missing > 0 {
        warn!(
            layer = %layer.name,
            missing,
            total = stations.len(),
            "stations without geometry"
        );
    }

    Ok(stations)
}
