//! Create folder / folder properties dialog

use eframe::egui;

use super::DialogResponse;
use crate::config::SettingsStore;
use crate::folders::{FolderManager, NameCheck};
use crate::gui::constants::{FOLDER_DIALOG_SIZE, ITEM_SPACING, SECTION_FOLDER_DIALOG, STATUS_ERROR};
use crate::gui::geometry::TrackedGeometry;

/// Values confirmed in the dialog, both trimmed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FolderDetails {
    pub name: String,
    pub title: String,
    /// `false` when editing an existing folder
    pub is_new: bool,
}

pub struct FolderDialog {
    name: String,
    title: String,
    /// Folder being edited; its name cannot change
    editing: Option<String>,
    geometry: TrackedGeometry,
    open: bool,
}

impl FolderDialog {
    pub fn new() -> Self {
        Self {
            name: String::new(),
            title: String::new(),
            editing: None,
            geometry: TrackedGeometry::new(FOLDER_DIALOG_SIZE),
            open: false,
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn open_create(&mut self, positions: &SettingsStore) {
        self.open_with(None, String::new(), positions);
    }

    pub fn open_properties(&mut self, name: &str, title: &str, positions: &SettingsStore) {
        self.open_with(Some(name.to_string()), title.to_string(), positions);
    }

    fn open_with(&mut self, editing: Option<String>, title: String, positions: &SettingsStore) {
        self.name = editing.clone().unwrap_or_default();
        self.title = title;
        self.editing = editing;
        self.geometry = TrackedGeometry::new(FOLDER_DIALOG_SIZE);
        positions.restore_window_position(&mut self.geometry, SECTION_FOLDER_DIALOG);
        self.open = true;
    }

    fn close(&mut self, positions: &mut SettingsStore) {
        positions.save_window_position(&self.geometry, SECTION_FOLDER_DIALOG);
        self.open = false;
    }

    pub fn ui(
        &mut self,
        ctx: &egui::Context,
        manager: &FolderManager,
        positions: &mut SettingsStore,
    ) -> DialogResponse<FolderDetails> {
        if !self.open {
            return DialogResponse::None;
        }

        let check = manager.check_folder_name(&self.name, self.editing.as_deref());
        let title = if self.editing.is_some() {
            "Folder properties"
        } else {
            "Create folder"
        };
        let mut response = DialogResponse::None;

        let mut window = egui::Window::new(title)
            .id(egui::Id::new("folder_dialog"))
            .collapsible(false)
            .resizable(true)
            .default_size(self.geometry.default_size());
        if let Some(position) = self.geometry.restored_position() {
            window = window.default_pos(position);
        }

        let shown = window.show(ctx, |ui| {
            let mut submitted = false;

            egui::Grid::new("folder_dialog_fields")
                .num_columns(2)
                .spacing([ITEM_SPACING, ITEM_SPACING])
                .show(ui, |ui| {
                    ui.label("Name:");
                    let name = ui.add_enabled(
                        self.editing.is_none(),
                        egui::TextEdit::singleline(&mut self.name).hint_text("Folder identifier"),
                    );
                    submitted |= name.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
                    ui.end_row();

                    ui.label("Title:");
                    let title = ui.text_edit_singleline(&mut self.title);
                    submitted |= title.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
                    ui.end_row();
                });

            match check {
                NameCheck::Exists => {
                    ui.colored_label(STATUS_ERROR, "A folder with that name already exists");
                }
                NameCheck::Invalid => {
                    ui.colored_label(STATUS_ERROR, "Folder names cannot contain /");
                }
                NameCheck::Empty | NameCheck::Available => {}
            }

            ui.add_space(ITEM_SPACING);

            let accept_label = if self.editing.is_some() { "Save" } else { "Create" };
            ui.horizontal(|ui| {
                let accept = ui.add_enabled(check == NameCheck::Available, egui::Button::new(accept_label));
                if accept.clicked() || (submitted && check == NameCheck::Available) {
                    response = DialogResponse::Accepted(FolderDetails {
                        name: self.name.trim().to_string(),
                        title: self.title.trim().to_string(),
                        is_new: self.editing.is_none(),
                    });
                }
                if ui.button("Cancel").clicked() || ui.input(|i| i.key_pressed(egui::Key::Escape)) {
                    response = DialogResponse::Cancelled;
                }
            });
        });

        if let Some(shown) = shown {
            self.geometry.track_rect(shown.response.rect);
        }
        if response != DialogResponse::None {
            self.close(positions);
        }
        response
    }
}
