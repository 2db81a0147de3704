use super::{http, RoutingService};
use crate::{
    core::{config::ServiceConfig, geo::LatLng, place::Place, place::Route},
    MapError, Result,
};
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

/// Route computation against an OSRM server
pub struct OsrmRouting {
    client: reqwest::Client,
    base_url: String,
    profile: String,
}

impl OsrmRouting {
    pub fn new(client: reqwest::Client, config: &ServiceConfig) -> Self {
        Self {
            client,
            base_url: config.routing_url.clone(),
            profile: config.routing_profile.clone(),
        }
    }

    fn route_path(&self, origin: LatLng, destination: LatLng) -> String {
        // OSRM takes lng,lat pairs
        format!(
            "route/v1/{}/{:.6},{:.6};{:.6},{:.6}",
            self.profile, origin.lng, origin.lat, destination.lng, destination.lat
        )
    }
}

#[derive(Debug, Deserialize)]
struct OsrmResponse {
    code: String,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    routes: Vec<OsrmRoute>,
}

#[derive(Debug, Deserialize)]
struct OsrmRoute {
    geometry: OsrmGeometry,
    distance: f64,
    duration: f64,
    #[serde(default)]
    legs: Vec<OsrmLeg>,
}

#[derive(Debug, Deserialize)]
struct OsrmGeometry {
    coordinates: Vec<[f64; 2]>,
}

#[derive(Debug, Deserialize)]
struct OsrmLeg {
    #[serde(default)]
    summary: String,
}

impl OsrmRoute {
    fn into_route(self) -> Option<Route> {
        let polyline = self
            .geometry
            .coordinates
            .into_iter()
            .map(|[lng, lat]| LatLng::new(lat, lng))
            .collect();
        let name = self
            .legs
            .into_iter()
            .map(|leg| leg.summary)
            .filter(|summary| !summary.is_empty())
            .collect::<Vec<_>>()
            .join(", ");
        Route::from_polyline(
            polyline,
            self.distance,
            Duration::from_secs_f64(self.duration.max(0.0)),
        )
        .map(|route| route.with_name(name))
    }
}

/// Decodes a `geometries=geojson` route response
pub(crate) fn parse_route_response(body: &str) -> Result<Vec<Route>> {
    let response: OsrmResponse = serde_json::from_str(body)?;
    match response.code.as_str() {
        "Ok" => Ok(response
            .routes
            .into_iter()
            .filter_map(OsrmRoute::into_route)
            .collect()),
        "NoRoute" | "NoSegment" => Ok(Vec::new()),
        other => Err(MapError::Service(format!(
            "routing failed: {} {}",
            other,
            response.message.unwrap_or_default()
        ))),
    }
}

#[async_trait]
impl RoutingService for OsrmRouting {
    async fn directions(&self, origin: LatLng, destination: &Place) -> Result<Vec<Route>> {
        let url = http::endpoint(
            &self.base_url,
            &self.route_path(origin, destination.coordinate),
        );
        let query = [
            ("overview", "full".to_string()),
            ("geometries", "geojson".to_string()),
            ("alternatives", "true".to_string()),
        ];
        let body = http::get_text(&self.client, &url, &query).await?;
        let routes = parse_route_response(&body)?;
        log::debug!("directions to '{}': {} candidates", destination.name, routes.len());
        Ok(routes)
    }
}
