use super::MapServices;
use crate::{
    core::{
        geo::{LatLng, LatLngBounds},
        place::{Place, PlaceId, PreviewScene, Route},
    },
    runtime::{self, AsyncHandle, AsyncSpawner},
};
use crossbeam_channel::{unbounded, Receiver, Sender};
use std::sync::Arc;

/// A finished service call, tagged with the sequence number it was issued under
#[derive(Debug, Clone)]
pub enum ServiceResponse {
    Search {
        seq: u64,
        places: Vec<Place>,
    },
    Directions {
        seq: u64,
        destination: Place,
        route: Option<Route>,
    },
    Preview {
        seq: u64,
        place_id: PlaceId,
        scene: Option<PreviewScene>,
    },
}

/// Runs service calls on a spawner and reports their results over a channel.
///
/// Every failure is collapsed to "no data" here: an empty result list, no
/// route, or no preview. The error itself only reaches the log.
pub struct Dispatcher {
    spawner: Arc<dyn AsyncSpawner>,
    services: MapServices,
    tx: Sender<ServiceResponse>,
    rx: Receiver<ServiceResponse>,
}

impl Dispatcher {
    pub fn new(spawner: Arc<dyn AsyncSpawner>, services: MapServices) -> Self {
        let (tx, rx) = unbounded();
        Self {
            spawner,
            services,
            tx,
            rx,
        }
    }

    pub fn services(&self) -> &MapServices {
        &self.services
    }

    /// Responses delivered since the last call, in completion order
    pub fn drain(&self) -> Vec<ServiceResponse> {
        self.rx.try_iter().collect()
    }

    pub fn search(&self, seq: u64, query: String, region: LatLngBounds) -> Box<dyn AsyncHandle> {
        log::debug!("dispatch search #{} '{}'", seq, query);
        let service = self.services.search.clone();
        let tx = self.tx.clone();
        runtime::spawn(self.spawner.as_ref(), async move {
            let places = match service.search(&query, &region).await {
                Ok(places) => places,
                Err(e) => {
                    log::warn!("search '{}' failed: {}", query, e);
                    Vec::new()
                }
            };
            let _ = tx.send(ServiceResponse::Search { seq, places });
        })
    }

    pub fn directions(&self, seq: u64, origin: LatLng, destination: Place) -> Box<dyn AsyncHandle> {
        log::debug!("dispatch directions #{} to '{}'", seq, destination.name);
        let service = self.services.routing.clone();
        let tx = self.tx.clone();
        runtime::spawn(self.spawner.as_ref(), async move {
            let route = match service.directions(origin, &destination).await {
                Ok(routes) => routes.into_iter().next(),
                Err(e) => {
                    log::warn!("directions to '{}' failed: {}", destination.name, e);
                    None
                }
            };
            let _ = tx.send(ServiceResponse::Directions {
                seq,
                destination,
                route,
            });
        })
    }

    pub fn preview(&self, seq: u64, place: Place) -> Box<dyn AsyncHandle> {
        log::debug!("dispatch preview #{} for '{}'", seq, place.name);
        let service = self.services.preview.clone();
        let tx = self.tx.clone();
        runtime::spawn(self.spawner.as_ref(), async move {
            let scene = match service.preview(&place).await {
                Ok(scene) => scene,
                Err(e) => {
                    log::warn!("preview for '{}' failed: {}", place.name, e);
                    None
                }
            };
            let _ = tx.send(ServiceResponse::Preview {
                seq,
                place_id: place.id,
                scene,
            });
        })
    }

    pub fn open_external(&self, place: &Place) {
        if let Err(e) = self.services.external.open(place) {
            log::warn!("could not open '{}' externally: {}", place.name, e);
        }
    }
}
