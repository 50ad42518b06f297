//! Query error types.

use crate::domain::StationId;
use crate::store::LoadError;

/// Errors returned by station queries.
#[derive(Debug, thiserror::Error)]
pub enum QueryError {
    /// A query parameter was missing or malformed
    #[error("invalid parameter {name}: {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    /// Station id outside the loaded layer
    #[error("uid {uid} out of range (0..{len})")]
    OutOfRange { uid: i64, len: usize },

    /// Station exists but has no geometry
    #[error("station {uid} has no geometry")]
    MissingGeometry { uid: StationId },

    /// Backing store could not be read
    #[error("failed to load data: {0}")]
    Load(#[from] LoadError),
}

impl QueryError {
    /// Whether the caller (rather than the server) is at fault.
    pub fn is_client_error(&self) -> bool {
        !matches!(self, QueryError::Load(_))
    }
}
