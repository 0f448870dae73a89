//! Park Data Library - Core Data Structures for the Garden Guide
//!
//! This library turns the bundled (or fetched) park files into typed, immutable
//! snapshots and tracks the visitor's location against the park boundary.
//!
//! # Architecture
//!
//! - **[`GeoCoordinate`]**: Latitude/longitude value type with `geo` conversions
//! - **[`CategoryCatalog`]**: Category code to display name, color and sort index
//! - **[`ParkDataset`]**: GeoJSON ingestion into a center, a boundary and exhibit markers
//! - **[`LocationTracker`]**: Authorization and in-park state machine fed by platform callbacks
//! - **[`CameraBounds`]**: Camera region limits and exhibit focusing
//! - **[`Manifest`]**: Remote manifest document describing where the park files live
//!
//! # Error model
//!
//! Load-time invariant violations (no park center, no boundary, undecodable
//! document) are returned as [`DataError`]. Problems confined to a single
//! feature never fail the load; they are recorded as [`FeatureSkip`] entries on
//! the dataset.

mod camera;
mod category;
mod coordinate;
mod dataset;
mod exhibit;
mod manifest;
mod tracker;

// Public API exports
pub use camera::{
    CENTER_REGION_METERS, CameraBounds, CameraPosition, FOCUS_DISTANCE_M, INITIAL_DISTANCE_M,
    MAX_DISTANCE_M, MIN_DISTANCE_M,
};
pub use category::{CategoryCatalog, CategoryColor, CategoryEntry};
pub use coordinate::GeoCoordinate;
pub use dataset::{ExhibitGroup, FeatureSkip, PARK_GEOMETRY_CATEGORY, ParkDataset, SkipReason};
pub use exhibit::{ExhibitMarker, ExhibitProperties};
pub use manifest::{FileReference, Manifest, ManifestEntry};
pub use tracker::{
    AuthorizationStatus, LocationFix, LocationProvider, LocationState, LocationTracker,
    SubscriptionId,
};

/// Error types for loading park data
#[derive(Debug, thiserror::Error)]
pub enum DataError {
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("GeoJSON document is not a FeatureCollection")]
    NotAFeatureCollection,

    #[error("Invalid geometry: {0}")]
    InvalidGeometry(String),

    #[error("No park center point found")]
    MissingCenter,

    #[error("No park boundary polygon found")]
    MissingBoundary,
}

pub type Result<T> = std::result::Result<T, DataError>;
