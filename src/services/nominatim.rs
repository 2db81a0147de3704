use super::{http, SearchService};
use crate::{
    core::{
        config::ServiceConfig,
        geo::{LatLng, LatLngBounds},
        place::Place,
    },
    Result,
};
use async_trait::async_trait;
use serde::Deserialize;

/// Place search against a Nominatim server
pub struct NominatimSearch {
    client: reqwest::Client,
    base_url: String,
    limit: usize,
}

impl NominatimSearch {
    pub fn new(client: reqwest::Client, config: &ServiceConfig) -> Self {
        Self {
            client,
            base_url: config.search_url.clone(),
            limit: config.result_limit,
        }
    }

    fn query_params(&self, query: &str, region: &LatLngBounds) -> Vec<(&'static str, String)> {
        vec![
            ("format", "jsonv2".to_string()),
            ("q", query.to_string()),
            // viewbox is x1,y1,x2,y2 = left,top,right,bottom
            (
                "viewbox",
                format!(
                    "{},{},{},{}",
                    region.west(),
                    region.north(),
                    region.east(),
                    region.south()
                ),
            ),
            ("limit", self.limit.to_string()),
        ]
    }
}

#[derive(Debug, Deserialize)]
struct NominatimPlace {
    place_id: u64,
    lat: String,
    lon: String,
    display_name: String,
    #[serde(default)]
    name: Option<String>,
}

impl NominatimPlace {
    fn into_place(self) -> Option<Place> {
        let coordinate = LatLng::new(self.lat.parse().ok()?, self.lon.parse().ok()?);
        if !coordinate.is_valid() {
            return None;
        }
        let name = match self.name {
            Some(name) if !name.is_empty() => name,
            _ => self
                .display_name
                .split(',')
                .next()
                .unwrap_or_default()
                .trim()
                .to_string(),
        };
        Some(Place::new(
            format!("nominatim:{}", self.place_id),
            name,
            self.display_name,
            coordinate,
        ))
    }
}

/// Decodes a `format=jsonv2` response, skipping entries with unusable coordinates
pub(crate) fn parse_search_response(body: &str) -> Result<Vec<Place>> {
    let raw: Vec<NominatimPlace> = serde_json::from_str(body)?;
    Ok(raw.into_iter().filter_map(NominatimPlace::into_place).collect())
}

#[async_trait]
impl SearchService for NominatimSearch {
    async fn search(&self, query: &str, region: &LatLngBounds) -> Result<Vec<Place>> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(Vec::new());
        }

        let url = http::endpoint(&self.base_url, "search");
        let body = http::get_text(&self.client, &url, &self.query_params(query, region)).await?;
        let places = parse_search_response(&body)?;
        log::debug!("search '{}' returned {} places", query, places.len());
        Ok(places)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RESPONSE: &str = r#"[
        {"place_id": 297417241, "osm_type": "relation", "osm_id": 1216769,
         "lat": "25.7907", "lon": "-80.1300", "category": "boundary", "type": "administrative",
         "name": "Miami Beach",
         "display_name": "Miami Beach, Miami-Dade County, Florida, United States"},
        {"place_id": 12, "lat": "25.7826", "lon": "-80.1341", "name": "",
         "display_name": "Lummus Park, Ocean Drive, Miami Beach, Florida"},
        {"place_id": 13, "lat": "north", "lon": "-80.1",
         "display_name": "Broken entry"}
    ]"#;

    #[test]
    fn test_parse_search_response() {
        let places = parse_search_response(RESPONSE).unwrap();
        assert_eq!(places.len(), 2);

        assert_eq!(places[0].id.as_str(), "nominatim:297417241");
        assert_eq!(places[0].name, "Miami Beach");
        assert_eq!(places[0].coordinate, LatLng::new(25.7907, -80.13));

        // Falls back to the first display_name component
        assert_eq!(places[1].name, "Lummus Park");
        assert_eq!(places[1].title, "Lummus Park, Ocean Drive, Miami Beach, Florida");
    }

    #[test]
    fn test_parse_empty_and_invalid() {
        assert!(parse_search_response("[]").unwrap().is_empty());
        assert!(parse_search_response(r#"{"error": "nope"}"#).is_err());
    }

    #[test]
    fn test_query_params_viewbox_order() {
        let client = reqwest::Client::new();
        let search = NominatimSearch::new(client, &ServiceConfig::default());
        let region = LatLngBounds::from_coords(25.70, -80.30, 25.85, -80.10);

        let params = search.query_params("Miami Beach", &region);
        let viewbox = params.iter().find(|(k, _)| *k == "viewbox").unwrap();
        assert_eq!(viewbox.1, "-80.3,25.85,-80.1,25.7");
        assert!(params.contains(&("q", "Miami Beach".to_string())));
    }

    #[tokio::test]
    async fn test_search_decodes_server_response() {
        let config = ServiceConfig {
            search_url: http::test_server::serve_once("200 OK", RESPONSE).await,
            ..Default::default()
        };
        let search = NominatimSearch::new(http::test_server::client(), &config);
        let region = LatLngBounds::from_coords(25.70, -80.30, 25.85, -80.10);

        let places = search.search("Miami Beach", &region).await.unwrap();
        let names: Vec<&str> = places.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Miami Beach", "Lummus Park"]);
    }

    #[tokio::test]
    async fn test_blank_query_skips_request() {
        let config = ServiceConfig {
            search_url: "http://127.0.0.1:9".to_string(),
            ..Default::default()
        };
        let search = NominatimSearch::new(reqwest::Client::new(), &config);
        let region = LatLngBounds::from_coords(0.0, 0.0, 1.0, 1.0);
        assert!(search.search("   ", &region).await.unwrap().is_empty());
    }
}
