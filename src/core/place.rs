//! Values handed back by the external services.
//!
//! The screen treats all of these as read-only handles: it stores, compares and
//! renders them but never edits their contents.

use crate::core::geo::{LatLng, LatLngBounds};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Stable identifier a search service assigns to a place
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlaceId(pub String);

impl PlaceId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A labeled geographic point returned by a search service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Place {
    pub id: PlaceId,
    /// Short display name, e.g. "Lummus Park"
    pub name: String,
    /// Longer descriptive line, usually the formatted address
    pub title: String,
    pub coordinate: LatLng,
}

impl Place {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        title: impl Into<String>,
        coordinate: LatLng,
    ) -> Self {
        Self {
            id: PlaceId::new(id),
            name: name.into(),
            title: title.into(),
            coordinate,
        }
    }
}

/// Places are the same place when the service gave them the same id
impl PartialEq for Place {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Place {}

/// A computed path between two points
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    /// Ordered coordinates from origin to destination
    pub polyline: Vec<LatLng>,
    pub bounds: LatLngBounds,
    pub distance_meters: f64,
    pub expected_travel_time: Duration,
    pub name: Option<String>,
}

impl Route {
    /// Builds a route from its polyline; `None` when the polyline is empty
    pub fn from_polyline(
        polyline: Vec<LatLng>,
        distance_meters: f64,
        expected_travel_time: Duration,
    ) -> Option<Self> {
        let bounds = LatLngBounds::from_points(&polyline)?;
        Some(Self {
            polyline,
            bounds,
            distance_meters,
            expected_travel_time,
            name: None,
        })
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        self.name = (!name.is_empty()).then_some(name);
        self
    }

    /// Human friendly "12.3 km · 18 min" summary
    pub fn summary(&self) -> String {
        let minutes = (self.expected_travel_time.as_secs_f64() / 60.0).round() as u64;
        let distance = if self.distance_meters >= 1000.0 {
            format!("{:.1} km", self.distance_meters / 1000.0)
        } else {
            format!("{:.0} m", self.distance_meters)
        };
        if minutes >= 60 {
            format!("{} · {} h {} min", distance, minutes / 60, minutes % 60)
        } else {
            format!("{} · {} min", distance, minutes)
        }
    }
}

/// A street-level image for a place
#[derive(Debug, Clone, PartialEq)]
pub struct PreviewScene {
    pub place_id: PlaceId,
    /// Where the image came from, shown as attribution
    pub source_url: String,
    /// Encoded (JPEG/PNG) image bytes
    pub image: Vec<u8>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_place_equality_is_by_id() {
        let a = Place::new("osm:1", "Lummus Park", "Ocean Dr", LatLng::new(25.78, -80.13));
        let renamed = Place::new("osm:1", "Lummus", "", LatLng::new(0.0, 0.0));
        let other = Place::new("osm:2", "Lummus Park", "Ocean Dr", LatLng::new(25.78, -80.13));

        assert_eq!(a, renamed);
        assert_ne!(a, other);
    }

    #[test]
    fn test_route_from_polyline() {
        let polyline = vec![
            LatLng::new(25.7602, -80.1959),
            LatLng::new(25.7750, -80.1500),
            LatLng::new(25.7907, -80.1300),
        ];
        let route = Route::from_polyline(polyline, 9_400.0, Duration::from_secs(1_080)).unwrap();

        assert_eq!(route.bounds.south(), 25.7602);
        assert_eq!(route.bounds.north(), 25.7907);
        assert_eq!(route.summary(), "9.4 km · 18 min");

        assert!(Route::from_polyline(Vec::new(), 0.0, Duration::ZERO).is_none());
    }

    #[test]
    fn test_route_summary_formats() {
        let route = Route::from_polyline(
            vec![LatLng::new(0.0, 0.0), LatLng::new(1.0, 1.0)],
            640.0,
            Duration::from_secs(4_500),
        )
        .unwrap()
        .with_name("");

        assert_eq!(route.name, None);
        assert_eq!(route.summary(), "640 m · 1 h 15 min");
    }
}
