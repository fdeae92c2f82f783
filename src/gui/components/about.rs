//! About window with the keyboard shortcuts

use eframe::egui;

use crate::constants::app;
use crate::gui::constants::{ITEM_SPACING, SECTION_SPACING};

pub const SHORTCUTS: &[(&str, &str)] = &[
    ("Ctrl+N", "Create a new folder"),
    ("Ctrl+Delete", "Remove the selected folder"),
    ("Ctrl+Return", "Folder properties"),
    ("Ctrl+O", "Add applications to the folder"),
    ("Delete", "Remove the selected application"),
    ("Ctrl+F", "Search applications in the folder"),
    ("Ctrl+S", "Save the folder applications"),
    ("F1", "About"),
    ("Ctrl+Q", "Quit"),
];

#[derive(Default)]
pub struct AboutWindow {
    open: bool,
}

impl AboutWindow {
    pub fn show(&mut self) {
        self.open = true;
    }

    pub fn ui(&mut self, ctx: &egui::Context) {
        egui::Window::new("About")
            .open(&mut self.open)
            .collapsible(false)
            .resizable(false)
            .show(ctx, |ui| {
                ui.heading(app::NAME);
                ui.label(format!("Version {}", app::VERSION));
                ui.label(app::DESCRIPTION);
                ui.hyperlink_to(app::URL, app::URL);

                ui.add_space(SECTION_SPACING);
                ui.label(egui::RichText::new("Shortcuts").strong());
                ui.add_space(ITEM_SPACING);

                egui::Grid::new("shortcuts")
                    .num_columns(2)
                    .striped(true)
                    .show(ui, |ui| {
                        for (keys, action) in SHORTCUTS {
                            ui.monospace(*keys);
                            ui.label(*action);
                            ui.end_row();
                        }
                    });
            });
    }
}
