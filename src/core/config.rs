//! Configuration for the explorer screen and the services behind it
//!
//! Every section has defaults, so a configuration file only needs to name the
//! values it changes. Files are JSON:
//!
//! ```json
//! { "home": { "coordinate": { "lat": 40.7128, "lng": -74.006 } },
//!   "services": { "preview_token": "MLY|..." } }
//! ```

use crate::core::camera::{CameraMotion, EasingType};
use crate::core::constants::{
    CAMERA_ANIMATION_MS, DEFAULT_RESULT_LIMIT, DEFAULT_USER_AGENT, DEFAULT_ZOOM, HOME_COORDINATE,
    HOME_TITLE, ROUTE_FIT_PADDING,
};
use crate::core::geo::{LatLng, Point};
use crate::core::viewport::Viewport;
use crate::{MapError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ExplorerConfig {
    pub home: HomeConfig,
    pub camera: CameraConfig,
    pub services: ServiceConfig,
}

impl ExplorerConfig {
    pub fn from_json_str(text: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        log::info!("loading configuration from {}", path.display());
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.home.coordinate.is_valid() {
            return Err(MapError::Config(format!(
                "home coordinate ({}, {}) is out of range",
                self.home.coordinate.lat, self.home.coordinate.lng
            )));
        }
        if self.camera.viewport_width <= 0.0 || self.camera.viewport_height <= 0.0 {
            return Err(MapError::Config("viewport size must be positive".into()));
        }
        if !(self.camera.fit_padding.is_finite() && self.camera.fit_padding >= 0.0) {
            return Err(MapError::Config(format!(
                "fit_padding must be a non-negative number of pixels, got {}",
                self.camera.fit_padding
            )));
        }
        if self.services.result_limit == 0 {
            return Err(MapError::Config("result_limit must be at least 1".into()));
        }
        if self.services.timeout_secs == 0 {
            return Err(MapError::Config("timeout_secs must be at least 1".into()));
        }
        let radius = self.services.preview_radius_deg;
        if !(radius.is_finite() && radius > 0.0) {
            return Err(MapError::Config(format!(
                "preview_radius_deg must be positive, got {}",
                radius
            )));
        }
        Ok(())
    }

    /// Viewport the screen mounts with: centered on home
    pub fn initial_viewport(&self) -> Viewport {
        Viewport::new(
            self.home.coordinate,
            self.camera.initial_zoom,
            Point::new(self.camera.viewport_width, self.camera.viewport_height),
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HomeConfig {
    /// Origin for directions, always shown as a marker
    pub coordinate: LatLng,
    pub title: String,
}

impl Default for HomeConfig {
    fn default() -> Self {
        Self {
            coordinate: HOME_COORDINATE,
            title: HOME_TITLE.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub initial_zoom: f64,
    pub viewport_width: f64,
    pub viewport_height: f64,
    pub animation_ms: u64,
    pub easing: EasingType,
    pub fit_padding: f64,
}

impl CameraConfig {
    pub fn motion(&self) -> CameraMotion {
        CameraMotion {
            duration: Duration::from_millis(self.animation_ms),
            easing: self.easing,
            fit_padding: self.fit_padding,
        }
    }
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            initial_zoom: DEFAULT_ZOOM,
            viewport_width: 1200.0,
            viewport_height: 800.0,
            animation_ms: CAMERA_ANIMATION_MS,
            easing: EasingType::EaseInOut,
            fit_padding: ROUTE_FIT_PADDING,
        }
    }
}

/// Endpoints and HTTP settings for the external services
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Nominatim-compatible search endpoint
    pub search_url: String,
    /// OSRM-compatible routing endpoint
    pub routing_url: String,
    /// OSRM profile: `driving`, `walking`, `cycling`
    pub routing_profile: String,
    /// Mapillary graph API endpoint
    pub preview_url: String,
    /// Mapillary client token; previews are disabled without one
    pub preview_token: Option<String>,
    /// Half-size in degrees of the box searched for street-level imagery
    pub preview_radius_deg: f64,
    pub user_agent: String,
    pub timeout_secs: u64,
    pub result_limit: usize,
}

impl ServiceConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            search_url: "https://nominatim.openstreetmap.org".to_string(),
            routing_url: "https://router.project-osrm.org".to_string(),
            routing_profile: "driving".to_string(),
            preview_url: "https://graph.mapillary.com".to_string(),
            preview_token: None,
            preview_radius_deg: 0.0005,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout_secs: 15,
            result_limit: DEFAULT_RESULT_LIMIT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = ExplorerConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.home.coordinate, HOME_COORDINATE);
        assert_eq!(config.services.routing_profile, "driving");
        assert!(config.services.preview_token.is_none());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = ExplorerConfig::from_json_str(
            r#"{ "home": { "coordinate": { "lat": 40.7128, "lng": -74.006 } },
                 "camera": { "easing": "smooth" },
                 "services": { "preview_token": "MLY|abc", "timeout_secs": 5 } }"#,
        )
        .unwrap();

        assert_eq!(config.home.coordinate, LatLng::new(40.7128, -74.006));
        assert_eq!(config.home.title, HOME_TITLE);
        assert_eq!(config.camera.easing, EasingType::Smooth);
        assert_eq!(config.camera.initial_zoom, DEFAULT_ZOOM);
        assert_eq!(config.services.preview_token.as_deref(), Some("MLY|abc"));
        assert_eq!(config.services.timeout(), Duration::from_secs(5));
        assert_eq!(config.services.result_limit, DEFAULT_RESULT_LIMIT);
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let err = ExplorerConfig::from_json_str(
            r#"{ "home": { "coordinate": { "lat": 123.0, "lng": 0.0 } } }"#,
        )
        .unwrap_err();
        assert!(matches!(err, MapError::Config(_)));

        let err = ExplorerConfig::from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, MapError::Serialization(_)));
    }

    fn rejected(edit: impl FnOnce(&mut ExplorerConfig)) -> bool {
        let mut config = ExplorerConfig::default();
        edit(&mut config);
        matches!(config.validate(), Err(MapError::Config(_)))
    }

    #[test]
    fn test_zero_timeout_is_rejected() {
        assert!(rejected(|c| c.services.timeout_secs = 0));
        assert!(!rejected(|c| c.services.timeout_secs = 1));

        let err = ExplorerConfig::from_json_str(r#"{ "services": { "timeout_secs": 0 } }"#)
            .unwrap_err();
        assert!(matches!(err, MapError::Config(_)));
    }

    #[test]
    fn test_preview_radius_must_be_positive() {
        assert!(rejected(|c| c.services.preview_radius_deg = -0.001));
        assert!(rejected(|c| c.services.preview_radius_deg = 0.0));
        assert!(rejected(|c| c.services.preview_radius_deg = f64::NAN));
        assert!(!rejected(|c| c.services.preview_radius_deg = 0.002));
    }

    #[test]
    fn test_fit_padding_must_not_be_negative() {
        assert!(rejected(|c| c.camera.fit_padding = -1.0));
        assert!(rejected(|c| c.camera.fit_padding = f64::INFINITY));
        assert!(!rejected(|c| c.camera.fit_padding = 0.0));
    }

    #[test]
    fn test_initial_viewport_centers_on_home() {
        let config = ExplorerConfig::default();
        let viewport = config.initial_viewport();
        assert_eq!(viewport.center, config.home.coordinate);
        assert_eq!(viewport.zoom, config.camera.initial_zoom);
        assert_eq!(viewport.size, Point::new(1200.0, 800.0));
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join(format!("placemark-config-{}.json", std::process::id()));
        std::fs::write(&path, r#"{ "services": { "result_limit": 3 } }"#).unwrap();

        let config = ExplorerConfig::load(&path).unwrap();
        assert_eq!(config.services.result_limit, 3);

        std::fs::remove_file(&path).unwrap();
        assert!(matches!(ExplorerConfig::load(&path), Err(MapError::Io(_))));
    }
}
