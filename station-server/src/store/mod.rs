//! Read-only access to the layered geometry stores.
//!
//! Each store is a GeoPackage file holding one named feature layer. Layers
//! are read whole into memory, in on-disk order, on every call.

mod error;
mod gpkg;
mod wkb;

#[cfg(test)]
pub(crate) mod fixture;

use std::path::PathBuf;

use geojson::{Feature, FeatureCollection, JsonObject, feature::Id};

pub use error::{GeometryError, LoadError};
pub use gpkg::read_layer;
pub use wkb::{decode_gpkg, kind_name};

/// A named layer inside a GeoPackage file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayerSource {
    /// Path to the GeoPackage file
    pub path: PathBuf,
    /// Feature table name
    pub layer: String,
}

impl LayerSource {
    pub fn new(path: impl Into<PathBuf>, layer: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            layer: layer.into(),
        }
    }

    /// Read the whole layer.
    pub fn read(&self) -> Result<Layer, LoadError> {
        read_layer(&self.path, &self.layer)
    }
}

/// A single feature as stored: attributes plus an optional geometry.
#[derive(Debug, Clone, PartialEq)]
pub struct LayerFeature {
    pub properties: JsonObject,
    /// `None` for null or empty geometries
    pub geometry: Option<geojson::Geometry>,
}

/// An ordered feature layer.
#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    pub name: String,
    pub features: Vec<LayerFeature>,
}

impl Layer {
    /// Convert to a GeoJSON feature collection.
    ///
    /// Every feature is kept, with its load position as a string `id`.
    pub fn into_feature_collection(self) -> FeatureCollection {
        let features = self
            .features
            .into_iter()
            .enumerate()
            .map(|(index, feature)| Feature {
                bbox: None,
                geometry: feature.geometry,
                id: Some(Id::String(index.to_string())),
                properties: Some(feature.properties),
                foreign_members: None,
            })
            .collect();

        FeatureCollection {
            bbox: None,
            features,
            foreign_members: None,
        }
    }
}
