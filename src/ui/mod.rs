//! egui widgets for the explorer screen

pub mod map_view;
pub mod popover;
pub mod search_bar;
pub mod style;

pub use map_view::MapView;
pub use popover::PopoverView;
pub use search_bar::SearchBar;
pub use style::{ExplorerStyle, MarkerStyle, RouteStyle};

use crate::screen::{MapScreen, RouteState};
use std::time::{Duration, Instant};

/// How often to wake up while service calls are outstanding
const BUSY_REPAINT_INTERVAL: Duration = Duration::from_millis(100);

/// The whole screen: search bar on top, route summary at the bottom, the map
/// in the middle and the detail popover floating over it
#[derive(Default)]
pub struct ExplorerView {
    search_bar: SearchBar,
    map_view: MapView,
    popover: PopoverView,
}

impl ExplorerView {
    pub fn new(style: ExplorerStyle) -> Self {
        Self {
            map_view: MapView::new(style),
            ..Default::default()
        }
    }

    pub fn show(&mut self, ctx: &egui::Context, screen: &mut MapScreen) {
        if screen.poll(Instant::now()) {
            ctx.request_repaint();
        }

        egui::TopBottomPanel::top("search_panel").show(ctx, |ui| {
            self.search_bar.show(ui, screen);
        });

        if !matches!(screen.route_state(), RouteState::Idle) {
            egui::TopBottomPanel::bottom("route_panel").show(ctx, |ui| {
                route_panel(ui, screen);
            });
        }

        egui::CentralPanel::default()
            .frame(egui::Frame::none())
            .show(ctx, |ui| {
                self.map_view.show(ui, screen);
            });

        self.popover.show(ctx, screen);

        if screen.camera().is_animating() {
            ctx.request_repaint();
        } else if screen.is_busy() {
            ctx.request_repaint_after(BUSY_REPAINT_INTERVAL);
        }
    }
}

fn route_panel(ui: &mut egui::Ui, screen: &mut MapScreen) {
    ui.horizontal(|ui| {
        match screen.route_state() {
            RouteState::Pending { destination } => {
                ui.spinner();
                ui.label(format!("Finding directions to {}", destination.name));
            }
            RouteState::Displaying {
                destination,
                route: Some(route),
            } => {
                let via = route
                    .name
                    .as_deref()
                    .map(|name| format!(" via {}", name))
                    .unwrap_or_default();
                ui.label(format!("To {}: {}{}", destination.name, route.summary(), via));
            }
            RouteState::Displaying {
                destination,
                route: None,
            } => {
                ui.label(format!("No route found to {}", destination.name));
            }
            RouteState::Idle => {}
        }

        if ui.button("Clear").clicked() {
            screen.clear_route();
        }
    });
}
