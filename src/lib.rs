//! # placemark
//!
//! A single-screen map explorer: search for places, inspect one in a detail
//! popover with a street-level preview, and overlay driving directions from a
//! fixed home coordinate.
//!
//! Search ranking, routing and imagery come from external services behind the
//! traits in [`services`]. The crate owns the screen state in [`screen`], the
//! dispatching of service calls onto an [`runtime::AsyncSpawner`], and (with the
//! `egui` feature) the widgets in `ui`.

pub mod core;
pub mod prelude;
pub mod runtime;
pub mod screen;
pub mod services;
#[cfg(feature = "egui")]
pub mod ui;

pub use crate::core::constants;

// Re-export public API
pub use core::{
    camera::Camera,
    config::ExplorerConfig,
    geo::{LatLng, LatLngBounds, Point},
    marker::{Marker, MarkerKind},
    place::{Place, PlaceId, PreviewScene, Route},
    viewport::Viewport,
};

pub use screen::{
    map_screen::{MapScreen, MapScreenBuilder, RouteState},
    popover::{DetailPopover, PopoverState, PreviewState},
};

pub use services::{ExternalMaps, MapServices, PreviewService, RoutingService, SearchService};

/// Result type used throughout the library
pub type Result<T> = std::result::Result<T, MapError>;

/// Common error types
#[derive(Debug, thiserror::Error)]
pub enum MapError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Service error: {0}")]
    Service(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Runtime error: {0}")]
    Runtime(String),
}

/// Error type alias for convenience
pub type Error = MapError;
