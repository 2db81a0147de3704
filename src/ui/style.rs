use crate::core::marker::MarkerKind;
use egui::{Color32, FontId, Stroke};

/// Style configuration for the explorer widgets
#[derive(Debug, Clone)]
pub struct ExplorerStyle {
    /// Canvas color under markers and the route
    pub background_color: Color32,
    /// Graticule line stroke
    pub grid_stroke: Stroke,
    pub markers: MarkerStyle,
    pub route: RouteStyle,
    pub label_font: FontId,
    pub label_color: Color32,
}

/// Style for map pins
#[derive(Debug, Clone)]
pub struct MarkerStyle {
    pub home_color: Color32,
    pub place_color: Color32,
    pub destination_color: Color32,
    pub selected_color: Color32,
    pub radius: f32,
    pub border_stroke: Stroke,
}

impl MarkerStyle {
    pub fn color_for(&self, kind: MarkerKind, selected: bool) -> Color32 {
        if selected {
            return self.selected_color;
        }
        match kind {
            MarkerKind::Home => self.home_color,
            MarkerKind::Place => self.place_color,
            MarkerKind::Destination => self.destination_color,
        }
    }
}

/// Style for the route polyline
#[derive(Debug, Clone)]
pub struct RouteStyle {
    pub stroke: Stroke,
    /// Wider stroke painted underneath for contrast
    pub casing: Stroke,
}

impl Default for ExplorerStyle {
    fn default() -> Self {
        Self {
            background_color: Color32::from_rgb(233, 229, 220),
            grid_stroke: Stroke::new(1.0, Color32::from_rgb(218, 214, 205)),
            markers: MarkerStyle::default(),
            route: RouteStyle::default(),
            label_font: FontId::proportional(12.0),
            label_color: Color32::from_rgb(40, 40, 40),
        }
    }
}

impl Default for MarkerStyle {
    fn default() -> Self {
        Self {
            home_color: Color32::from_rgb(52, 120, 246),
            place_color: Color32::from_rgb(234, 67, 53),
            destination_color: Color32::from_rgb(15, 157, 88),
            selected_color: Color32::from_rgb(251, 140, 0),
            radius: 8.0,
            border_stroke: Stroke::new(2.0, Color32::WHITE),
        }
    }
}

impl Default for RouteStyle {
    fn default() -> Self {
        Self {
            stroke: Stroke::new(5.0, Color32::from_rgb(52, 120, 246)),
            casing: Stroke::new(8.0, Color32::from_rgb(25, 70, 160)),
        }
    }
}
