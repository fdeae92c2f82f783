//! Folder removal confirmation

use eframe::egui;

use super::DialogResponse;
use crate::gui::constants::{ITEM_SPACING, STATUS_ERROR};

#[derive(Default)]
pub struct ConfirmDialog {
    folder: Option<String>,
}

impl ConfirmDialog {
    pub fn is_open(&self) -> bool {
        self.folder.is_some()
    }

    pub fn open(&mut self, folder: &str) {
        self.folder = Some(folder.to_string());
    }

    /// Returns the folder to remove once confirmed
    pub fn ui(&mut self, ctx: &egui::Context) -> DialogResponse<String> {
        let Some(folder) = self.folder.clone() else {
            return DialogResponse::None;
        };
        let mut response = DialogResponse::None;

        egui::Window::new("Remove the selected folder?")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
            .show(ctx, |ui| {
                ui.label(format!("Are you sure you want to remove the folder {folder}?"));
                ui.colored_label(STATUS_ERROR, "This cannot be undone!");

                ui.add_space(ITEM_SPACING);

                ui.horizontal(|ui| {
                    if ui.button("Remove").clicked() {
                        response = DialogResponse::Accepted(folder.clone());
                    }
                    // Cancel is the default answer
                    if ui.button("Cancel").clicked() || ui.input(|i| i.key_pressed(egui::Key::Escape)) {
                        response = DialogResponse::Cancelled;
                    }
                });
            });

        if response != DialogResponse::None {
            self.folder = None;
        }
        response
    }
}
