//! Dialog listing installed applications to add to a folder

use std::collections::HashSet;

use eframe::egui;

use super::DialogResponse;
use crate::config::SettingsStore;
use crate::gui::constants::{ITEM_SPACING, PICKER_SIZE, SECTION_APP_PICKER};
use crate::gui::geometry::TrackedGeometry;
use crate::model::{ApplicationInfo, ApplicationRow, KeyedModel, ModelRow};

pub struct ApplicationPicker {
    model: KeyedModel<ApplicationRow>,
    filter: String,
    selected: HashSet<String>,
    geometry: TrackedGeometry,
    open: bool,
}

impl ApplicationPicker {
    pub fn new() -> Self {
        Self {
            model: KeyedModel::new(),
            filter: String::new(),
            selected: HashSet::new(),
            geometry: TrackedGeometry::new(PICKER_SIZE),
            open: false,
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Show `applications` sorted by name. Entries hidden from menus are
    /// listed only with `show_hidden`.
    pub fn open(&mut self, applications: Vec<ApplicationInfo>, show_hidden: bool, positions: &SettingsStore) {
        self.model.clear();
        for app in applications {
            self.model.add_data(ApplicationRow::from(app));
        }
        self.model
            .sort_by(|a, b| a.title().to_lowercase().cmp(&b.title().to_lowercase()));
        self.set_show_hidden(show_hidden);

        self.filter.clear();
        self.selected.clear();
        self.geometry = TrackedGeometry::new(PICKER_SIZE);
        positions.restore_window_position(&mut self.geometry, SECTION_APP_PICKER);
        self.open = true;
    }

    pub fn set_show_hidden(&mut self, show_hidden: bool) {
        self.model
            .set_all_rows_visibility(|row| show_hidden || row.default_visible());
    }

    fn close(&mut self, positions: &mut SettingsStore) {
        positions.save_window_position(&self.geometry, SECTION_APP_PICKER);
        self.model.clear();
        self.open = false;
    }

    pub fn ui(&mut self, ctx: &egui::Context, positions: &mut SettingsStore) -> DialogResponse<Vec<ApplicationInfo>> {
        if !self.open {
            return DialogResponse::None;
        }
        let mut response = DialogResponse::None;

        let mut window = egui::Window::new("Add applications")
            .id(egui::Id::new("application_picker"))
            .collapsible(false)
            .resizable(true)
            .default_size(self.geometry.default_size());
        if let Some(position) = self.geometry.restored_position() {
            window = window.default_pos(position);
        }

        let shown = window.show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label("Search:");
                ui.text_edit_singleline(&mut self.filter);
            });
            ui.add_space(ITEM_SPACING);

            let mut activated = false;
            let filter = self.filter.trim().to_lowercase();
            let rows: Vec<(String, String, String)> = self
                .model
                .iter_visible()
                .filter(|(_, row)| row.matches(&filter))
                .map(|(_, row)| (row.key().to_string(), row.title().to_string(), row.formatted.clone()))
                .collect();

            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .max_height(ui.available_height() - 40.0)
                .show(ui, |ui| {
                    for (key, title, formatted) in &rows {
                        let is_selected = self.selected.contains(key);
                        let label = ui
                            .selectable_label(is_selected, title.as_str())
                            .on_hover_text(formatted.as_str());
                        if label.double_clicked() {
                            self.selected.insert(key.clone());
                            activated = true;
                        } else if label.clicked() {
                            if ui.input(|i| i.modifiers.command) {
                                if !self.selected.remove(key) {
                                    self.selected.insert(key.clone());
                                }
                            } else {
                                self.selected.clear();
                                self.selected.insert(key.clone());
                            }
                        }
                    }
                    if rows.is_empty() {
                        ui.label(egui::RichText::new("(No applications found)").italics().weak());
                    }
                });

            ui.add_space(ITEM_SPACING);
            ui.horizontal(|ui| {
                let add = ui.add_enabled(!self.selected.is_empty(), egui::Button::new("Add"));
                if add.clicked() || activated {
                    response = DialogResponse::Accepted(selection(&self.model, &self.selected));
                }
                if ui.button("Close").clicked() || ui.input(|i| i.key_pressed(egui::Key::Escape)) {
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

/// Case-insensitive match on name, description and file name.
/// `filter` must already be lower-cased.
/// Selected applications in list order
fn selection(model: &KeyedModel<ApplicationRow>, selected: &HashSet<String>) -> Vec<ApplicationInfo> {
    model
        .iter_visible()
        .filter(|(_, row)| selected.contains(row.key()))
        .map(|(_, row)| row.info.clone())
        .collect()
}
