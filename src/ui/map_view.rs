use super::style::ExplorerStyle;
use crate::{
    core::{
        geo::{LatLng, Point},
        viewport::Viewport,
    },
    screen::MapScreen,
};
use egui::{Align2, Pos2, Rect, Response, Sense, Shape, Ui, Vec2};

/// Zoom levels per scroll pixel
const SCROLL_ZOOM_RATE: f64 = 0.004;

/// The map canvas: route polyline, pins, and pan/zoom/tap handling
#[derive(Default)]
pub struct MapView {
    style: ExplorerStyle,
}

impl MapView {
    pub fn new(style: ExplorerStyle) -> Self {
        Self { style }
    }

    pub fn show(&mut self, ui: &mut Ui, screen: &mut MapScreen) -> Response {
        let (rect, response) = ui.allocate_exact_size(ui.available_size(), Sense::click_and_drag());

        let size = Point::new(rect.width() as f64, rect.height() as f64);
        if screen.viewport().size != size {
            screen.camera_mut().set_size(size);
        }

        self.handle_input(ui, &response, rect, screen);
        self.paint(ui, rect, screen);
        response
    }

    fn handle_input(&self, ui: &Ui, response: &Response, rect: Rect, screen: &mut MapScreen) {
        if response.dragged() {
            let delta = response.drag_delta();
            if delta.length_sq() > 0.0 {
                screen
                    .camera_mut()
                    .pan(Point::new(delta.x as f64, delta.y as f64));
            }
        }

        if response.hovered() {
            let scroll = ui.input(|i| i.raw_scroll_delta.y);
            if scroll.abs() > 0.1 {
                let focus = response
                    .hover_pos()
                    .map(|pos| to_local(rect, pos));
                let zoom = screen.viewport().zoom + scroll as f64 * SCROLL_ZOOM_RATE;
                screen.camera_mut().zoom_to(zoom, focus);
            }
        }

        if response.clicked() {
            if let Some(pos) = response.interact_pointer_pos() {
                screen.tap(&to_local(rect, pos));
            }
        }
    }

    fn paint(&self, ui: &Ui, rect: Rect, screen: &MapScreen) {
        let painter = ui.painter_at(rect);
        let viewport = screen.viewport();

        painter.rect_filled(rect, 0.0, self.style.background_color);
        self.paint_graticule(&painter, rect, viewport);

        if let Some(route) = screen.route_overlay() {
            let points: Vec<Pos2> = route
                .polyline
                .iter()
                .map(|coord| to_screen(rect, viewport.lat_lng_to_pixel(coord)))
                .collect();
            painter.add(Shape::line(points.clone(), self.style.route.casing));
            painter.add(Shape::line(points, self.style.route.stroke));
        }

        let selected = screen.selection();
        for marker in screen.markers() {
            let center = to_screen(rect, marker.screen_position(viewport));
            if !rect.expand(self.style.markers.radius).contains(center) {
                continue;
            }
            let is_selected = marker.place.is_some() && marker.place.as_ref() == selected;
            let color = self.style.markers.color_for(marker.kind, is_selected);

            painter.circle(
                center,
                self.style.markers.radius,
                color,
                self.style.markers.border_stroke,
            );
            painter.text(
                center + Vec2::new(0.0, self.style.markers.radius + 3.0),
                Align2::CENTER_TOP,
                &marker.label,
                self.style.label_font.clone(),
                self.style.label_color,
            );
        }

        painter.text(
            rect.left_bottom() + Vec2::new(6.0, -6.0),
            Align2::LEFT_BOTTOM,
            format!(
                "z{:.1} · {:.1} m/px · © OpenStreetMap contributors",
                viewport.zoom,
                viewport.resolution()
            ),
            egui::FontId::proportional(10.0),
            self.style.label_color,
        );
    }

    /// Parallels and meridians every power-of-two fraction of a degree
    fn paint_graticule(&self, painter: &egui::Painter, rect: Rect, viewport: &Viewport) {
        let bounds = viewport.bounds();
        let span = bounds.span().lng.max(1e-6);
        let step = 2_f64.powf((span / 8.0).log2().ceil());

        let mut lng = (bounds.west() / step).floor() * step;
        while lng <= bounds.east() {
            let x = rect.left() + viewport.lat_lng_to_pixel(&LatLng::new(0.0, lng)).x as f32;
            painter.vline(x, rect.y_range(), self.style.grid_stroke);
            lng += step;
        }

        let mut lat = (bounds.south() / step).floor() * step;
        while lat <= bounds.north() {
            let y = rect.top() + viewport.lat_lng_to_pixel(&LatLng::new(lat, 0.0)).y as f32;
            painter.hline(rect.x_range(), y, self.style.grid_stroke);
            lat += step;
        }
    }
}

fn to_local(rect: Rect, pos: Pos2) -> Point {
    Point::new((pos.x - rect.left()) as f64, (pos.y - rect.top()) as f64)
}

fn to_screen(rect: Rect, point: Point) -> Pos2 {
    Pos2::new(rect.left() + point.x as f32, rect.top() + point.y as f32)
}
