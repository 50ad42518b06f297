//! Whole-layer GeoJSON export.

use geojson::FeatureCollection;

use super::error::QueryError;
use crate::dataset::Dataset;

/// Every station feature, unfiltered, as GeoJSON.
pub fn export_stations(dataset: &Dataset) -> Result<FeatureCollection, QueryError> {
    Ok(dataset.station_layer()?.into_feature_collection())
}

/// Every railway line feature, unfiltered, as GeoJSON.
pub fn export_lines(dataset: &Dataset) -> Result<FeatureCollection, QueryError> {
    Ok(dataset.line_layer()?.into_feature_collection())
}
