//! Boundaries to the external mapping services
//!
//! The screen never talks HTTP itself. Each collaborator is a trait so the app
//! can plug in the public OpenStreetMap-based services while tests plug in
//! scripted fakes.

pub mod browser;
pub mod dispatch;
pub mod http;
pub mod mapillary;
pub mod nominatim;
pub mod osrm;

use crate::{
    core::{
        config::ServiceConfig,
        geo::{LatLng, LatLngBounds},
        place::{Place, PreviewScene, Route},
    },
    Result,
};
use async_trait::async_trait;
use std::sync::Arc;

pub use browser::BrowserMaps;
pub use dispatch::{Dispatcher, ServiceResponse};
pub use mapillary::MapillaryPreview;
pub use nominatim::NominatimSearch;
pub use osrm::OsrmRouting;

/// Free-text place search limited to a region
#[async_trait]
pub trait SearchService: Send + Sync {
    /// Places matching `query`, in the service's ranking order
    async fn search(&self, query: &str, region: &LatLngBounds) -> Result<Vec<Place>>;
}

/// Route computation between a coordinate and a place
#[async_trait]
pub trait RoutingService: Send + Sync {
    /// Candidate routes, best first
    async fn directions(&self, origin: LatLng, destination: &Place) -> Result<Vec<Route>>;
}

/// Street-level imagery lookup
#[async_trait]
pub trait PreviewService: Send + Sync {
    /// `Ok(None)` when no imagery exists near the place
    async fn preview(&self, place: &Place) -> Result<Option<PreviewScene>>;
}

/// Hand-off to an external map application
pub trait ExternalMaps: Send + Sync {
    fn open(&self, place: &Place) -> Result<()>;
}

/// The set of services a screen works with
#[derive(Clone)]
pub struct MapServices {
    pub search: Arc<dyn SearchService>,
    pub routing: Arc<dyn RoutingService>,
    pub preview: Arc<dyn PreviewService>,
    pub external: Arc<dyn ExternalMaps>,
}

impl MapServices {
    /// Public OpenStreetMap-based services configured from `config`
    pub fn from_config(config: &ServiceConfig) -> Result<Self> {
        let client = http::build_client(config)?;
        Ok(Self {
            search: Arc::new(NominatimSearch::new(client.clone(), config)),
            routing: Arc::new(OsrmRouting::new(client.clone(), config)),
            preview: Arc::new(MapillaryPreview::new(client, config)),
            external: Arc::new(BrowserMaps),
        })
    }
}
