//! Prelude module for common placemark types and traits
//!
//! This module re-exports the most commonly used types, traits, and functions
//! for easy importing with `use placemark::prelude::*;`

pub use crate::core::{
    camera::{Camera, CameraMotion, EasingType},
    config::{CameraConfig, ExplorerConfig, HomeConfig, ServiceConfig},
    geo::{LatLng, LatLngBounds, Point},
    marker::{Marker, MarkerKind},
    place::{Place, PlaceId, PreviewScene, Route},
    viewport::Viewport,
};

pub use crate::screen::{
    DetailPopover, MapScreen, MapScreenBuilder, PopoverState, PreviewState, RouteState,
};

pub use crate::services::{
    BrowserMaps, ExternalMaps, MapServices, MapillaryPreview, NominatimSearch, OsrmRouting,
    PreviewService, RoutingService, SearchService,
};

pub use crate::runtime::{
    spawners::{DeferredSpawner, InlineSpawner},
    AsyncHandle, AsyncSpawner,
};

#[cfg(feature = "tokio-runtime")]
pub use crate::runtime::spawners::tokio_impl::TokioSpawner;

#[cfg(feature = "egui")]
pub use crate::ui::{ExplorerView, MapView, PopoverView, SearchBar};

pub use crate::{Error as MapError, Result};

pub use std::{
    sync::Arc,
    time::{Duration, Instant},
};

pub use fxhash::{FxHashMap as HashMap, FxHashSet as HashSet};
