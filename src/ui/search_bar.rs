use crate::screen::MapScreen;
use egui::{Key, TextEdit, Ui};

/// Search field; submits on Enter or the button
#[derive(Default)]
pub struct SearchBar {
    text: String,
}

impl SearchBar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn show(&mut self, ui: &mut Ui, screen: &mut MapScreen) {
        ui.horizontal(|ui| {
            let field = ui.add(
                TextEdit::singleline(&mut self.text)
                    .hint_text("Search for a place")
                    .desired_width(320.0),
            );
            let entered = field.lost_focus() && ui.input(|i| i.key_pressed(Key::Enter));
            let clicked = ui.button("Search").clicked();

            if (entered || clicked) && !self.text.trim().is_empty() {
                screen.submit_search(self.text.trim().to_string());
            }

            if screen.is_busy() {
                ui.spinner();
            }
            ui.label(format!("{} results", screen.results().len()));
        });
    }
}
