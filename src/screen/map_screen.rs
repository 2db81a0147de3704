use super::{
    popover::{DetailPopover, PopoverState},
    requests::RequestSlot,
};
use crate::{
    core::{
        camera::Camera,
        config::ExplorerConfig,
        constants::MARKER_HIT_RADIUS,
        geo::{LatLng, Point},
        marker::{Marker, MarkerKind},
        place::{Place, Route},
        viewport::Viewport,
    },
    runtime::{self, AsyncSpawner},
    services::{Dispatcher, MapServices, ServiceResponse},
    Result,
};
use std::sync::Arc;
use std::time::Instant;

/// Directions flow of the screen
#[derive(Debug, Clone, PartialEq, Default)]
pub enum RouteState {
    #[default]
    Idle,
    /// Directions were requested and the routing call has not answered yet
    Pending { destination: Place },
    /// The routing call answered. `route` is `None` when it failed or found
    /// nothing; the destination is still the only result pinned.
    Displaying {
        destination: Place,
        route: Option<Route>,
    },
}

/// Builder for [`MapScreen`]
pub struct MapScreenBuilder {
    services: MapServices,
    config: ExplorerConfig,
    spawner: Option<Arc<dyn AsyncSpawner>>,
}

impl MapScreenBuilder {
    pub fn new(services: MapServices) -> Self {
        Self {
            services,
            config: ExplorerConfig::default(),
            spawner: None,
        }
    }

    pub fn config(mut self, config: ExplorerConfig) -> Self {
        self.config = config;
        self
    }

    pub fn spawner(mut self, spawner: Arc<dyn AsyncSpawner>) -> Self {
        self.spawner = Some(spawner);
        self
    }

    pub fn build(self) -> Result<MapScreen> {
        self.config.validate()?;
        let spawner = match self.spawner {
            Some(spawner) => spawner,
            None => runtime::default_spawner()?,
        };
        Ok(MapScreen::new(
            self.config,
            Dispatcher::new(spawner, self.services),
        ))
    }
}

/// State and orchestration for the map screen.
///
/// All mutation happens on the caller's (UI) thread. Service calls run on the
/// spawner and come back through [`MapScreen::poll`].
pub struct MapScreen {
    config: ExplorerConfig,
    camera: Camera,
    query: String,
    results: Vec<Place>,
    popover: DetailPopover,
    route: RouteState,
    dispatcher: Dispatcher,
    search_request: RequestSlot,
    directions_request: RequestSlot,
}

impl MapScreen {
    pub fn builder(services: MapServices) -> MapScreenBuilder {
        MapScreenBuilder::new(services)
    }

    fn new(config: ExplorerConfig, dispatcher: Dispatcher) -> Self {
        let camera = Camera::new(config.initial_viewport(), config.camera.motion());
        log::info!(
            "map screen mounted at ({:.4}, {:.4})",
            config.home.coordinate.lat,
            config.home.coordinate.lng
        );
        Self {
            config,
            camera,
            query: String::new(),
            results: Vec::new(),
            popover: DetailPopover::new(),
            route: RouteState::Idle,
            dispatcher,
            search_request: RequestSlot::new(),
            directions_request: RequestSlot::new(),
        }
    }

    pub fn config(&self) -> &ExplorerConfig {
        &self.config
    }

    pub fn home(&self) -> LatLng {
        self.config.home.coordinate
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    pub fn viewport(&self) -> &Viewport {
        self.camera.viewport()
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// Search results in the order the service returned them
    pub fn results(&self) -> &[Place] {
        &self.results
    }

    pub fn popover(&self) -> &DetailPopover {
        &self.popover
    }

    pub fn selection(&self) -> Option<&Place> {
        self.popover.selection()
    }

    pub fn is_popover_visible(&self) -> bool {
        self.popover.is_visible()
    }

    pub fn route_state(&self) -> &RouteState {
        &self.route
    }

    pub fn directions_requested(&self) -> bool {
        matches!(self.route, RouteState::Pending { .. })
    }

    pub fn route_displaying(&self) -> bool {
        matches!(self.route, RouteState::Displaying { .. })
    }

    pub fn route(&self) -> Option<&Route> {
        match &self.route {
            RouteState::Displaying { route, .. } => route.as_ref(),
            _ => None,
        }
    }

    pub fn route_destination(&self) -> Option<&Place> {
        match &self.route {
            RouteState::Displaying { destination, .. } => Some(destination),
            _ => None,
        }
    }

    /// True while any service call is outstanding
    pub fn is_busy(&self) -> bool {
        self.search_request.is_pending()
            || self.directions_request.is_pending()
            || self.popover.is_preview_pending()
    }

    /// Sends `query` and the visible region to the search service.
    /// The answer replaces the results; an older search still in flight is
    /// cancelled and its answer ignored.
    pub fn submit_search(&mut self, query: impl Into<String>) {
        self.query = query.into();
        let seq = self.search_request.next_seq();
        let region = self.camera.viewport().bounds();
        let handle = self.dispatcher.search(seq, self.query.clone(), region);
        self.search_request.track(handle);
    }

    pub fn select_place(&mut self, place: Place) {
        self.popover.show(place, &self.dispatcher);
    }

    pub fn dismiss(&mut self) {
        self.popover.dismiss();
    }

    /// Routes from home to the selected place. Without a selection nothing is
    /// dispatched and false is returned.
    pub fn request_directions(&mut self) -> bool {
        let Some(destination) = self.popover.request_directions() else {
            return false;
        };

        let seq = self.directions_request.next_seq();
        self.route = RouteState::Pending {
            destination: destination.clone(),
        };
        let handle = self
            .dispatcher
            .directions(seq, self.config.home.coordinate, destination);
        self.directions_request.track(handle);
        true
    }

    /// Drops the route overlay and any outstanding routing call
    pub fn clear_route(&mut self) {
        self.directions_request.cancel();
        self.route = RouteState::Idle;
    }

    pub fn open_in_external_maps(&self) -> bool {
        self.popover.open_in_external_maps(&self.dispatcher)
    }

    /// Applies delivered responses and advances the camera.
    /// Returns true when anything changed that needs a repaint.
    pub fn poll(&mut self, now: Instant) -> bool {
        let mut changed = false;
        for response in self.dispatcher.drain() {
            changed |= self.apply(response, now);
        }
        changed | self.camera.update(now)
    }

    fn apply(&mut self, response: ServiceResponse, now: Instant) -> bool {
        match response {
            ServiceResponse::Search { seq, places } => {
                if !self.search_request.complete(seq) {
                    log::debug!("dropping stale search #{}", seq);
                    return false;
                }
                log::debug!("search #{}: {} results", seq, places.len());
                self.results = places;
                true
            }
            ServiceResponse::Directions {
                seq,
                destination,
                route,
            } => {
                if !self.directions_request.complete(seq) {
                    log::debug!("dropping stale directions #{}", seq);
                    return false;
                }
                match &route {
                    Some(route) => self.camera.animate_to_bounds(&route.bounds, now),
                    None => log::warn!("no route to '{}'", destination.name),
                }
                self.route = RouteState::Displaying { destination, route };
                true
            }
            ServiceResponse::Preview {
                seq,
                place_id,
                scene,
            } => self.popover.apply_preview(seq, &place_id, scene),
        }
    }

    /// Pins to draw: home first, then results. While a route is displayed only
    /// the result equal to its destination is drawn.
    pub fn markers(&self) -> Vec<Marker> {
        let home = &self.config.home;
        let mut markers = vec![Marker::home(home.coordinate, home.title.clone())];

        match self.route_destination() {
            Some(destination) => markers.extend(
                self.results
                    .iter()
                    .filter(|place| *place == destination)
                    .map(|place| Marker::for_place(place, MarkerKind::Destination)),
            ),
            None => markers.extend(
                self.results
                    .iter()
                    .map(|place| Marker::for_place(place, MarkerKind::Place)),
            ),
        }
        markers
    }

    /// The polyline to draw, whenever a route is held
    pub fn route_overlay(&self) -> Option<&Route> {
        self.route()
    }

    /// Topmost place marker under `screen_point`, if any
    pub fn marker_at(&self, screen_point: &Point) -> Option<Marker> {
        let viewport = self.camera.viewport();
        self.markers()
            .into_iter()
            .rev()
            .filter(|marker| marker.place.is_some())
            .find(|marker| marker.hit_test(viewport, screen_point, MARKER_HIT_RADIUS))
    }

    /// A tap on the map: selects the tapped pin, or dismisses the popover when
    /// the tap missed every pin. Returns true when a pin was hit.
    pub fn tap(&mut self, screen_point: &Point) -> bool {
        match self.marker_at(screen_point).and_then(|marker| marker.place) {
            Some(place) => {
                self.select_place(place);
                true
            }
            None => {
                if let PopoverState::Showing(_) = self.popover.state() {
                    self.dismiss();
                }
                false
            }
        }
    }
}
