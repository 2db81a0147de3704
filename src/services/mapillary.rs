use super::{http, PreviewService};
use crate::{
    core::{config::ServiceConfig, place::Place, place::PreviewScene},
    Result,
};
use async_trait::async_trait;
use serde::Deserialize;

/// Street-level imagery from the Mapillary graph API
///
/// Without an access token every lookup answers "no preview".
pub struct MapillaryPreview {
    client: reqwest::Client,
    base_url: String,
    token: Option<String>,
    radius_deg: f64,
}

impl MapillaryPreview {
    pub fn new(client: reqwest::Client, config: &ServiceConfig) -> Self {
        Self {
            client,
            base_url: config.preview_url.clone(),
            token: config.preview_token.clone().filter(|token| !token.is_empty()),
            radius_deg: config.preview_radius_deg,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.token.is_some()
    }

    fn bbox(&self, place: &Place) -> String {
        let c = place.coordinate;
        let r = self.radius_deg;
        format!("{},{},{},{}", c.lng - r, c.lat - r, c.lng + r, c.lat + r)
    }
}

#[derive(Debug, Deserialize)]
struct ImageList {
    #[serde(default)]
    data: Vec<ImageEntry>,
}

#[derive(Debug, Deserialize)]
struct ImageEntry {
    #[serde(default)]
    thumb_1024_url: Option<String>,
}

/// First thumbnail url in an `/images` response, if any
pub(crate) fn parse_image_list(body: &str) -> Result<Option<String>> {
    let list: ImageList = serde_json::from_str(body)?;
    Ok(list.data.into_iter().find_map(|entry| entry.thumb_1024_url))
}

#[async_trait]
impl PreviewService for MapillaryPreview {
    async fn preview(&self, place: &Place) -> Result<Option<PreviewScene>> {
        let Some(token) = &self.token else {
            return Ok(None);
        };

        let url = http::endpoint(&self.base_url, "images");
        let query = [
            ("access_token", token.clone()),
            ("fields", "id,thumb_1024_url".to_string()),
            ("bbox", self.bbox(place)),
            ("limit", "1".to_string()),
        ];
        let body = http::get_text(&self.client, &url, &query).await?;
        let Some(thumbnail) = parse_image_list(&body)? else {
            log::debug!("no street-level imagery near '{}'", place.name);
            return Ok(None);
        };

        let image = http::get_bytes(&self.client, &thumbnail).await?;
        Ok(Some(PreviewScene {
            place_id: place.id.clone(),
            source_url: thumbnail,
            image,
        }))
    }
}
