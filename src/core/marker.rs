use crate::core::{
    geo::{LatLng, Point},
    place::Place,
    viewport::Viewport,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerKind {
    /// The fixed home coordinate, always drawn
    Home,
    /// A search result
    Place,
    /// The result a displayed route leads to
    Destination,
}

/// A pin to draw on the map
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub kind: MarkerKind,
    pub position: LatLng,
    pub label: String,
    /// The place behind the pin; `None` for the home marker
    pub place: Option<Place>,
}

impl Marker {
    pub fn home(position: LatLng, label: impl Into<String>) -> Self {
        Self {
            kind: MarkerKind::Home,
            position,
            label: label.into(),
            place: None,
        }
    }

    pub fn for_place(place: &Place, kind: MarkerKind) -> Self {
        Self {
            kind,
            position: place.coordinate,
            label: place.name.clone(),
            place: Some(place.clone()),
        }
    }

    pub fn screen_position(&self, viewport: &Viewport) -> Point {
        viewport.lat_lng_to_pixel(&self.position)
    }

    pub fn hit_test(&self, viewport: &Viewport, screen_point: &Point, radius: f64) -> bool {
        self.screen_position(viewport).distance_to(screen_point) <= radius
    }
}
