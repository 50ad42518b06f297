//! Application state for the web layer.

use std::sync::Arc;

use crate::dataset::Dataset;

/// Shared application state.
///
/// Holds where the data lives, never the data itself: every request loads
/// its own copy.
#[derive(Clone)]
pub struct AppState {
    /// Station and railway stores
    pub dataset: Arc<Dataset>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(dataset: Dataset) -> Self {
        Self {
            dataset: Arc::new(dataset),
        }
    }
}
