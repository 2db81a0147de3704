//! Engine-wide defaults. Keeping them in a single place makes it easier to tweak
//! the magic numbers the screen and services share.

use crate::core::geo::LatLng;

/// World size in pixels at zoom 0 (one Web Mercator tile).
pub const TILE_SIZE: f64 = 256.0;

pub const DEFAULT_MIN_ZOOM: f64 = 1.0;
pub const DEFAULT_MAX_ZOOM: f64 = 19.0;

/// Fixed origin for directions and the always-visible home marker (Miami, FL).
pub const HOME_COORDINATE: LatLng = LatLng {
    lat: 25.7602,
    lng: -80.1959,
};

pub const HOME_TITLE: &str = "Home";

/// Zoom used for the camera at mount.
pub const DEFAULT_ZOOM: f64 = 12.0;

/// Hit radius around a marker pin, in screen pixels.
pub const MARKER_HIT_RADIUS: f64 = 14.0;

/// Extra room left around a route when the camera frames it, in pixels.
pub const ROUTE_FIT_PADDING: f64 = 48.0;

pub const CAMERA_ANIMATION_MS: u64 = 600;

pub const DEFAULT_RESULT_LIMIT: usize = 10;

pub const DEFAULT_USER_AGENT: &str = concat!("placemark/", env!("CARGO_PKG_VERSION"));
