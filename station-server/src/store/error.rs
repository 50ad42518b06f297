//! Backing store error types.

use std::path::PathBuf;

/// Errors raised while decoding a GeoPackage geometry blob.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GeometryError {
    /// Blob does not start with the `GP` magic bytes
    #[error("missing GeoPackage magic bytes")]
    BadMagic,

    /// Blob ended before the geometry was complete
    #[error("geometry blob is truncated")]
    Truncated,

    /// Byte order marker was neither 0 (big endian) nor 1 (little endian)
    #[error("invalid WKB byte order marker {0}")]
    InvalidByteOrder(u8),

    /// Envelope indicator outside 0..=4
    #[error("invalid envelope indicator {0}")]
    InvalidEnvelope(u8),

    /// WKB geometry type code we can't represent
    #[error("unsupported WKB geometry type {0}")]
    UnknownType(u32),

    /// A multi-geometry contained a member of the wrong kind
    #[error("expected {expected} member, found WKB type {found}")]
    UnexpectedMember { expected: &'static str, found: u32 },

    /// Geometry collections nested past the decoder's limit
    #[error("geometry collections nested more than {0} levels deep")]
    TooDeep(usize),

    /// Geometry column held something other than a blob
    #[error("geometry column is not a blob")]
    NotABlob,
}

/// Errors that can occur when loading a layer from its backing store.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The store could not be opened
    #[error("failed to open {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// The layer is not registered as a feature table
    #[error("layer {layer:?} not found in {}", .path.display())]
    MissingLayer { path: PathBuf, layer: String },

    /// Querying the layer failed
    #[error("failed to read layer {layer:?}: {source}")]
    Sqlite {
        layer: String,
        #[source]
        source: rusqlite::Error,
    },

    /// A feature's geometry blob could not be decoded
    #[error("feature {index} of layer {layer:?} has an unreadable geometry: {source}")]
    Geometry {
        layer: String,
        index: usize,
        #[source]
        source: GeometryError,
    },

    /// A station feature carried a non-point geometry
    #[error("feature {index} of layer {layer:?} is a {kind}, expected a point")]
    NotAPoint {
        layer: String,
        index: usize,
        kind: &'static str,
    },
}
