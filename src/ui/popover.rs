use crate::{
    core::place::{PlaceId, PreviewScene},
    prelude::HashMap,
    screen::{MapScreen, PreviewState},
};
use egui::{Align2, Context, TextureHandle, TextureOptions, Vec2};

const PREVIEW_SIZE: Vec2 = Vec2::new(280.0, 180.0);
const MAX_CACHED_PREVIEWS: usize = 32;

/// What the user pressed in the popover this frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PopoverAction {
    Close,
    OpenInMaps,
    GetDirections,
}

/// Floating detail card for the selected place
#[derive(Default)]
pub struct PopoverView {
    /// Decoded previews, keyed by the place they belong to
    textures: HashMap<PlaceId, TextureHandle>,
}

impl PopoverView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn show(&mut self, ctx: &Context, screen: &mut MapScreen) {
        let Some(place) = screen.selection().cloned() else {
            return;
        };

        let mut action = None;
        let preview = screen.popover().preview().clone();

        egui::Window::new(place.name.as_str())
            .id(egui::Id::new("detail_popover"))
            .collapsible(false)
            .resizable(false)
            .anchor(Align2::RIGHT_TOP, [-12.0, 12.0])
            .show(ctx, |ui| {
                if !place.title.is_empty() {
                    ui.label(&place.title);
                }
                ui.separator();

                match &preview {
                    PreviewState::Ready(scene) => match self.texture_for(ctx, scene) {
                        Some(texture) => {
                            ui.add(egui::Image::new((texture.id(), PREVIEW_SIZE)))
                                .on_hover_text(&scene.source_url);
                        }
                        None => placeholder(ui, "Preview could not be decoded"),
                    },
                    PreviewState::Loading => {
                        ui.allocate_ui(PREVIEW_SIZE, |ui| {
                            ui.centered_and_justified(|ui| ui.spinner());
                        });
                    }
                    PreviewState::Unavailable => placeholder(ui, "No preview available"),
                    PreviewState::Idle => {}
                }

                ui.separator();
                ui.horizontal(|ui| {
                    if ui.button("Open in Maps").clicked() {
                        action = Some(PopoverAction::OpenInMaps);
                    }
                    if ui.button("Get Directions").clicked() {
                        action = Some(PopoverAction::GetDirections);
                    }
                    if ui.button("Close").clicked() {
                        action = Some(PopoverAction::Close);
                    }
                });
            });

        match action {
            Some(PopoverAction::Close) => screen.dismiss(),
            Some(PopoverAction::OpenInMaps) => {
                screen.open_in_external_maps();
            }
            Some(PopoverAction::GetDirections) => {
                screen.request_directions();
            }
            None => {}
        }
    }

    fn texture_for(&mut self, ctx: &Context, scene: &PreviewScene) -> Option<&TextureHandle> {
        if !self.textures.contains_key(&scene.place_id) {
            let image = decode_preview(scene)?;
            if self.textures.len() >= MAX_CACHED_PREVIEWS {
                self.textures.clear();
            }
            let texture = ctx.load_texture(
                format!("preview-{}", scene.place_id),
                image,
                TextureOptions::LINEAR,
            );
            self.textures.insert(scene.place_id.clone(), texture);
        }
        self.textures.get(&scene.place_id)
    }
}

fn placeholder(ui: &mut egui::Ui, text: &str) {
    ui.allocate_ui(PREVIEW_SIZE, |ui| {
        ui.centered_and_justified(|ui| ui.weak(text));
    });
}

fn decode_preview(scene: &PreviewScene) -> Option<egui::ColorImage> {
    match image::load_from_memory(&scene.image) {
        Ok(image) => {
            let rgba = image.to_rgba8();
            let size = [rgba.width() as usize, rgba.height() as usize];
            Some(egui::ColorImage::from_rgba_unmultiplied(size, rgba.as_raw()))
        }
        Err(e) => {
            log::warn!("could not decode preview for {}: {}", scene.place_id, e);
            None
        }
    }
}
