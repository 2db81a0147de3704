//! Scripted services and a harness shared by the integration tests
#![allow(dead_code)]

use async_trait::async_trait;
use placemark::{
    prelude::*,
    runtime::spawners::{DeferredSpawner, InlineSpawner},
};
use std::sync::Mutex;

pub fn miami_beach_places() -> Vec<Place> {
    vec![
        Place::new(
            "nominatim:1",
            "Miami Beach",
            "Miami Beach, Miami-Dade County, Florida",
            LatLng::new(25.7907, -80.1300),
        ),
        Place::new(
            "nominatim:2",
            "Lummus Park",
            "Lummus Park, Ocean Drive, Miami Beach",
            LatLng::new(25.7780, -80.1310),
        ),
        Place::new(
            "nominatim:3",
            "South Pointe Park",
            "South Pointe Park, Miami Beach",
            LatLng::new(25.7650, -80.1340),
        ),
    ]
}

pub fn route_to(destination: &Place, home: LatLng) -> Route {
    let midpoint = LatLng::new(
        (home.lat + destination.coordinate.lat) / 2.0,
        (home.lng + destination.coordinate.lng) / 2.0 + 0.01,
    );
    Route::from_polyline(
        vec![home, midpoint, destination.coordinate],
        9_400.0,
        Duration::from_secs(1_080),
    )
    .unwrap()
}

/// True when `point` lies inside `bounds`, edges included
pub fn covers(bounds: &LatLngBounds, point: &LatLng) -> bool {
    (bounds.south()..=bounds.north()).contains(&point.lat)
        && (bounds.west()..=bounds.east()).contains(&point.lng)
}

/// Answers known queries, fails on "fail", and returns nothing otherwise
#[derive(Default)]
pub struct FakeSearch {
    answers: Mutex<HashMap<String, Vec<Place>>>,
    pub calls: Mutex<Vec<(String, LatLngBounds)>>,
}

impl FakeSearch {
    pub fn answer(&self, query: &str, places: Vec<Place>) {
        self.answers.lock().unwrap().insert(query.to_string(), places);
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl SearchService for FakeSearch {
    async fn search(&self, query: &str, region: &LatLngBounds) -> Result<Vec<Place>> {
        self.calls
            .lock()
            .unwrap()
            .push((query.to_string(), region.clone()));
        if query == "fail" {
            return Err(MapError::Service("search backend down".into()));
        }
        Ok(self
            .answers
            .lock()
            .unwrap()
            .get(query)
            .cloned()
            .unwrap_or_default())
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum RoutingMode {
    Route,
    NoRoute,
    Fail,
}

pub struct FakeRouting {
    pub mode: Mutex<RoutingMode>,
    pub calls: Mutex<Vec<(LatLng, Place)>>,
}

impl Default for FakeRouting {
    fn default() -> Self {
        Self {
            mode: Mutex::new(RoutingMode::Route),
            calls: Mutex::new(Vec::new()),
        }
    }
}

impl FakeRouting {
    pub fn set_mode(&self, mode: RoutingMode) {
        *self.mode.lock().unwrap() = mode;
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl RoutingService for FakeRouting {
    async fn directions(&self, origin: LatLng, destination: &Place) -> Result<Vec<Route>> {
        self.calls.lock().unwrap().push((origin, destination.clone()));
        match *self.mode.lock().unwrap() {
            RoutingMode::Route => Ok(vec![
                route_to(destination, origin),
                // A worse alternative that must never be picked
                route_to(destination, origin).with_name("alternative"),
            ]),
            RoutingMode::NoRoute => Ok(Vec::new()),
            RoutingMode::Fail => Err(MapError::Service("routing backend down".into())),
        }
    }
}

/// Has imagery for every place except ids listed in `missing`
#[derive(Default)]
pub struct FakePreview {
    pub missing: Mutex<Vec<PlaceId>>,
    pub calls: Mutex<Vec<PlaceId>>,
}

impl FakePreview {
    pub fn calls(&self) -> Vec<PlaceId> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl PreviewService for FakePreview {
    async fn preview(&self, place: &Place) -> Result<Option<PreviewScene>> {
        self.calls.lock().unwrap().push(place.id.clone());
        if self.missing.lock().unwrap().contains(&place.id) {
            return Err(MapError::Service("imagery lookup failed".into()));
        }
        Ok(Some(PreviewScene {
            place_id: place.id.clone(),
            source_url: format!("https://imagery.test/{}.jpg", place.id),
            image: vec![0xFF, 0xD8, 0xFF],
        }))
    }
}

#[derive(Default)]
pub struct FakeExternal {
    pub opened: Mutex<Vec<PlaceId>>,
}

impl ExternalMaps for FakeExternal {
    fn open(&self, place: &Place) -> Result<()> {
        self.opened.lock().unwrap().push(place.id.clone());
        Ok(())
    }
}

/// A screen wired to fakes; service calls wait in a deferred spawner until
/// the test runs them
pub struct Harness {
    pub screen: MapScreen,
    pub spawner: DeferredSpawner,
    pub search: Arc<FakeSearch>,
    pub routing: Arc<FakeRouting>,
    pub preview: Arc<FakePreview>,
    pub external: Arc<FakeExternal>,
}

impl Harness {
    pub fn new() -> Self {
        let spawner = DeferredSpawner::new();
        Self::with_spawner(spawner.clone(), Arc::new(spawner))
    }

    /// Service calls complete while they are dispatched
    pub fn inline() -> Self {
        Self::with_spawner(DeferredSpawner::new(), Arc::new(InlineSpawner))
    }

    fn with_spawner(spawner: DeferredSpawner, active: Arc<dyn AsyncSpawner>) -> Self {
        let search = Arc::new(FakeSearch::default());
        search.answer("Miami Beach", miami_beach_places());
        let routing = Arc::new(FakeRouting::default());
        let preview = Arc::new(FakePreview::default());
        let external = Arc::new(FakeExternal::default());

        let services = MapServices {
            search: search.clone(),
            routing: routing.clone(),
            preview: preview.clone(),
            external: external.clone(),
        };
        let screen = MapScreen::builder(services)
            .spawner(active)
            .build()
            .expect("screen builds with an explicit spawner");

        Self {
            screen,
            spawner,
            search,
            routing,
            preview,
            external,
        }
    }

    /// Another set of services backed by the same fakes
    pub fn services(&self) -> MapServices {
        MapServices {
            search: self.search.clone(),
            routing: self.routing.clone(),
            preview: self.preview.clone(),
            external: self.external.clone(),
        }
    }

    /// Runs every queued call and applies the answers
    pub fn settle(&mut self) {
        self.spawner.run_all();
        self.screen.poll(Instant::now());
    }

    /// Searches "Miami Beach" and applies the three results
    pub fn with_results(mut self) -> Self {
        self.screen.submit_search("Miami Beach");
        self.settle();
        self
    }

    pub fn place(&self, index: usize) -> Place {
        self.screen.results()[index].clone()
    }

    /// Result markers, without the home marker
    pub fn result_markers(&self) -> Vec<Place> {
        self.screen
            .markers()
            .into_iter()
            .filter_map(|marker| marker.place)
            .collect()
    }
}
