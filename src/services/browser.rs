use super::ExternalMaps;
use crate::{core::place::Place, MapError, Result};

/// Opens places on openstreetmap.org in the system browser
#[derive(Debug, Default, Clone, Copy)]
pub struct BrowserMaps;

impl BrowserMaps {
    pub fn url_for(place: &Place) -> String {
        let c = place.coordinate;
        format!(
            "https://www.openstreetmap.org/?mlat={lat:.6}&mlon={lng:.6}#map=17/{lat:.6}/{lng:.6}",
            lat = c.lat,
            lng = c.lng
        )
    }
}

impl ExternalMaps for BrowserMaps {
    fn open(&self, place: &Place) -> Result<()> {
        let url = Self::url_for(place);
        log::info!("opening '{}' in external maps: {}", place.name, url);
        webbrowser::open(&url).map_err(MapError::Io)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::geo::LatLng;

    #[test]
    fn test_deep_link_url() {
        let place = Place::new("p", "Lummus Park", "", LatLng::new(25.7826, -80.1341));
        assert_eq!(
            BrowserMaps::url_for(&place),
            "https://www.openstreetmap.org/?mlat=25.782600&mlon=-80.134100#map=17/25.782600/-80.134100"
        );
    }
}
