//! Main window implemented with egui/eframe

use anyhow::{anyhow, Context, Result};
use eframe::{egui, CreationContext, NativeOptions};
use tracing::{debug, error, info};

use super::actions::Actions;
use super::components::about::AboutWindow;
use super::components::application_picker::ApplicationPicker;
use super::components::confirm_dialog::ConfirmDialog;
use super::components::folder_dialog::{FolderDetails, FolderDialog};
use super::components::DialogResponse;
use super::constants::*;
use super::geometry::TrackedGeometry;
use crate::config::preferences::{APP_PICKER_SHOW_HIDDEN, PREFERENCES_SHOW_MISSING};
use crate::config::AppContext;
use crate::constants::app;
use crate::folders::{FolderManager, SchemaStore};
use crate::model::{ModelRow, RowHandle};

struct StatusMessage {
    text: String,
    color: egui::Color32,
}

/// Everything a toolbar button or shortcut can trigger
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    NewFolder,
    RemoveFolder,
    FolderProperties,
    AddFiles,
    RemoveFile,
    SearchFiles,
    Save,
    About,
    Quit,
}

impl Command {
    fn enabled(self, actions: &Actions) -> bool {
        match self {
            Command::RemoveFolder => actions.folder_remove,
            Command::FolderProperties => actions.folder_properties,
            Command::AddFiles => actions.files_add,
            Command::RemoveFile => actions.files_remove,
            Command::SearchFiles => actions.files_search,
            Command::Save => actions.files_save,
            Command::NewFolder | Command::About | Command::Quit => true,
        }
    }
}

const SHORTCUT_COMMANDS: &[(egui::Modifiers, egui::Key, Command)] = &[
    (egui::Modifiers::COMMAND, egui::Key::N, Command::NewFolder),
    (egui::Modifiers::COMMAND, egui::Key::Delete, Command::RemoveFolder),
    (egui::Modifiers::COMMAND, egui::Key::Enter, Command::FolderProperties),
    (egui::Modifiers::COMMAND, egui::Key::O, Command::AddFiles),
    (egui::Modifiers::NONE, egui::Key::Delete, Command::RemoveFile),
    (egui::Modifiers::COMMAND, egui::Key::F, Command::SearchFiles),
    (egui::Modifiers::COMMAND, egui::Key::S, Command::Save),
    (egui::Modifiers::NONE, egui::Key::F1, Command::About),
    (egui::Modifiers::COMMAND, egui::Key::Q, Command::Quit),
];

struct ManagerApp {
    context: AppContext,
    manager: FolderManager,
    selected_folder: Option<String>,
    selected_application: Option<RowHandle>,
    unsaved_changes: bool,
    /// Search text over the folder applications
    files_filter: String,
    focus_filter: bool,
    actions: Actions,
    geometry: TrackedGeometry,
    folder_dialog: FolderDialog,
    picker: ApplicationPicker,
    confirm: ConfirmDialog,
    about: AboutWindow,
    status_message: Option<StatusMessage>,
}

impl ManagerApp {
    fn new(_cc: &CreationContext<'_>, context: AppContext, manager: FolderManager, geometry: TrackedGeometry) -> Self {
        info!("Initializing main window");

        let mut app = Self {
            context,
            manager,
            selected_folder: None,
            selected_application: None,
            unsaved_changes: false,
            files_filter: String::new(),
            focus_filter: false,
            actions: Actions::default(),
            geometry,
            folder_dialog: FolderDialog::new(),
            picker: ApplicationPicker::new(),
            confirm: ConfirmDialog::default(),
            about: AboutWindow::default(),
            status_message: None,
        };

        app.manager.reload_folders();
        let first = app.manager.folders_model.keys().next().map(str::to_string);
        app.select_folder(first);
        app
    }

    fn refresh_actions(&mut self) {
        self.actions = Actions::new(
            self.selected_folder.is_some(),
            self.selected_application.is_some(),
            self.unsaved_changes,
        );
    }

    fn select_folder(&mut self, folder: Option<String>) {
        self.selected_application = None;
        self.unsaved_changes = false;
        self.files_filter.clear();
        match &folder {
            Some(id) => {
                let show_missing = self.context.preference(PREFERENCES_SHOW_MISSING);
                self.manager.select_folder(id, show_missing);
            }
            None => self.manager.applications_model.clear(),
        }
        self.selected_folder = folder;
        self.refresh_actions();
    }

    fn select_application(&mut self, handle: Option<RowHandle>) {
        self.selected_application = handle;
        self.refresh_actions();
    }

    fn set_status(&mut self, text: impl Into<String>) {
        self.status_message = Some(StatusMessage {
            text: text.into(),
            color: STATUS_OK,
        });
    }

    fn set_error(&mut self, err: &anyhow::Error) {
        error!(error = ?err, "Action failed");
        self.status_message = Some(StatusMessage {
            text: format!("{err:#}"),
            color: STATUS_ERROR,
        });
    }

    fn any_dialog_open(&self) -> bool {
        self.folder_dialog.is_open() || self.picker.is_open() || self.confirm.is_open()
    }

    fn run_command(&mut self, ctx: &egui::Context, command: Command) {
        if !command.enabled(&self.actions) {
            return;
        }
        debug!(command = ?command, "Running command");
        if let Err(err) = self.try_run_command(ctx, command) {
            self.set_error(&err);
        }
    }

    fn try_run_command(&mut self, ctx: &egui::Context, command: Command) -> Result<()> {
        match command {
            Command::NewFolder => self.folder_dialog.open_create(&self.context.positions),
            Command::FolderProperties => {
                let id = self.selected_folder.as_deref().context("No folder selected")?;
                let row = self
                    .manager
                    .folders_model
                    .get_iter(id)
                    .and_then(|handle| self.manager.folders_model.get(handle))
                    .with_context(|| format!("Folder {id} is not listed"))?;
                let title = if row.title().is_empty() {
                    row.filename()
                } else {
                    row.title()
                };
                self.folder_dialog
                    .open_properties(id, title, &self.context.positions);
            }
            Command::RemoveFolder => {
                if let Some(id) = &self.selected_folder {
                    self.confirm.open(id);
                }
            }
            Command::AddFiles => {
                let applications = self.manager.available_applications();
                let show_hidden = self.context.preference(APP_PICKER_SHOW_HIDDEN);
                self.picker
                    .open(applications, show_hidden, &self.context.positions);
            }
            Command::RemoveFile => {
                if let Some(handle) = self.selected_application {
                    self.manager
                        .remove_application(handle)
                        .context("Failed to remove the application")?;
                    self.unsaved_changes = true;
                    self.select_application(None);
                }
            }
            Command::SearchFiles => self.focus_filter = true,
            Command::Save => {
                let id = self.selected_folder.clone().context("No folder selected")?;
                self.manager
                    .save_applications(&id)
                    .with_context(|| format!("Failed to save folder {id}"))?;
                self.unsaved_changes = false;
                self.refresh_actions();
                self.set_status(format!("Folder {id} saved"));
            }
            Command::About => self.about.show(),
            Command::Quit => {
                info!("Quit requested");
                ctx.send_viewport_cmd(egui::ViewportCommand::Close);
            }
        }
        Ok(())
    }

    fn apply_folder_details(&mut self, details: FolderDetails) -> Result<()> {
        if details.is_new {
            self.manager
                .create_folder(&details.name, &details.title)
                .with_context(|| format!("Failed to create folder {}", details.name))?;
            self.set_status(format!("Folder {} created", details.name));
        } else {
            self.manager
                .update_folder_title(&details.name, &details.title)
                .with_context(|| format!("Failed to update folder {}", details.name))?;
        }
        self.select_folder(Some(details.name));
        Ok(())
    }

    fn remove_folder(&mut self, folder: String) -> Result<()> {
        self.manager
            .remove_folder(&folder)
            .with_context(|| format!("Failed to remove folder {folder}"))?;
        self.select_folder(None);
        self.set_status(format!("Folder {folder} removed"));
        Ok(())
    }

    fn set_option(&mut self, option: &str, value: bool) {
        if let Err(err) = self.context.set_preference(option, value) {
            self.set_error(&anyhow::Error::new(err).context("Failed to change option"));
            return;
        }
        // Reload unless there are edits to keep
        if option == PREFERENCES_SHOW_MISSING && !self.unsaved_changes {
            let folder = self.selected_folder.clone();
            self.select_folder(folder);
        }
    }

    fn handle_shortcuts(&mut self, ctx: &egui::Context) {
        if self.any_dialog_open() {
            return;
        }
        // Plain keys belong to the search field while it has focus
        let typing = ctx.wants_keyboard_input();
        let pressed: Vec<Command> = ctx.input_mut(|i| {
            SHORTCUT_COMMANDS
                .iter()
                .filter(|(modifiers, _, _)| !(typing && modifiers.is_none()))
                .filter(|(modifiers, key, _)| i.consume_key(*modifiers, *key))
                .map(|(_, _, command)| *command)
                .collect()
        });
        for command in pressed {
            self.run_command(ctx, command);
        }
    }

    fn handle_dialogs(&mut self, ctx: &egui::Context) {
        if let DialogResponse::Accepted(details) = self.folder_dialog.ui(ctx, &self.manager, &mut self.context.positions) {
            if let Err(err) = self.apply_folder_details(details) {
                self.set_error(&err);
            }
        }

        if let DialogResponse::Accepted(folder) = self.confirm.ui(ctx) {
            if let Err(err) = self.remove_folder(folder) {
                self.set_error(&err);
            }
        }

        if let DialogResponse::Accepted(applications) = self.picker.ui(ctx, &mut self.context.positions) {
            if !applications.is_empty() {
                let last = self.manager.add_applications(applications);
                self.unsaved_changes = true;
                self.select_application(last);
            }
        }

        self.about.ui(ctx);
    }

    fn toolbar_ui(&mut self, ui: &mut egui::Ui) -> Option<Command> {
        let mut command = None;
        let actions = self.actions;
        let mut button = |ui: &mut egui::Ui, label: &str, tooltip: &str, cmd: Command| {
            if ui
                .add_enabled(cmd.enabled(&actions), egui::Button::new(label))
                .on_hover_text(tooltip)
                .clicked()
            {
                command = Some(cmd);
            }
        };

        ui.horizontal(|ui| {
            button(ui, "➕ New folder", "Create a new folder (Ctrl+N)", Command::NewFolder);
            button(ui, "🗑 Remove folder", "Remove the selected folder (Ctrl+Delete)", Command::RemoveFolder);
            button(ui, "✏ Properties", "Folder properties (Ctrl+Return)", Command::FolderProperties);
            ui.separator();
            button(ui, "➕ Add", "Add applications (Ctrl+O)", Command::AddFiles);
            button(ui, "➖ Remove", "Remove the selected application (Delete)", Command::RemoveFile);
            button(ui, "🔍 Search", "Search applications in the folder (Ctrl+F)", Command::SearchFiles);
            button(ui, "💾 Save", "Save the folder applications (Ctrl+S)", Command::Save);
            ui.separator();
            button(ui, "ℹ About", "About (F1)", Command::About);
        });

        let mut show_missing = self.context.preference(PREFERENCES_SHOW_MISSING);
        let mut show_hidden = self.context.preference(APP_PICKER_SHOW_HIDDEN);
        ui.horizontal(|ui| {
            ui.menu_button("⚙ Options", |ui| {
                if ui.checkbox(&mut show_missing, "Show missing files").changed() {
                    self.set_option(PREFERENCES_SHOW_MISSING, show_missing);
                }
                if ui.checkbox(&mut show_hidden, "Show hidden applications").changed() {
                    self.set_option(APP_PICKER_SHOW_HIDDEN, show_hidden);
                }
            });
        });

        command
    }

    fn folders_ui(&mut self, ui: &mut egui::Ui) {
        let mut clicked = None;
        let mut activated = false;
        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                for (_, row) in self.manager.folders_model.iter() {
                    let selected = self.selected_folder.as_deref() == Some(row.key());
                    let label = if row.title().is_empty() { row.key() } else { row.title() };
                    let response = ui.selectable_label(selected, label).on_hover_text(row.tooltip());
                    if response.double_clicked() {
                        activated = true;
                        clicked = Some(row.key().to_string());
                    } else if response.clicked() && !selected {
                        clicked = Some(row.key().to_string());
                    }
                }
                if self.manager.folders_model.is_empty() {
                    ui.label(egui::RichText::new("(No folders)").italics().weak());
                }
            });

        if let Some(folder) = clicked {
            if self.selected_folder.as_deref() != Some(folder.as_str()) {
                self.select_folder(Some(folder));
            }
        }
        if activated {
            let ctx = ui.ctx().clone();
            self.run_command(&ctx, Command::FolderProperties);
        }
    }

    fn search_ui(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.label("Search:");
            let response = ui.add_enabled(
                self.actions.files_search,
                egui::TextEdit::singleline(&mut self.files_filter).hint_text("Name, description or file"),
            );
            if std::mem::take(&mut self.focus_filter) {
                response.request_focus();
            }
            if response.changed() {
                self.deselect_filtered_application();
            }
        });
    }

    /// Drop the selection when the search hides the selected row
    fn deselect_filtered_application(&mut self) {
        let filter = self.files_filter.trim().to_lowercase();
        let hidden = self
            .selected_application
            .and_then(|handle| self.manager.applications_model.get(handle))
            .is_some_and(|row| !row.matches(&filter));
        if hidden {
            self.select_application(None);
        }
    }

    fn applications_ui(&mut self, ui: &mut egui::Ui) {
        let mut clicked = None;
        let filter = self.files_filter.trim().to_lowercase();
        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                let rows = self
                    .manager
                    .applications_model
                    .iter()
                    .filter(|(_, row)| row.matches(&filter));
                for (handle, row) in rows {
                    let selected = self.selected_application == Some(handle);
                    let response = ui
                        .selectable_label(selected, egui::RichText::new(row.title()).strong())
                        .on_hover_text(row.formatted.as_str());
                    ui.label(egui::RichText::new(row.comment()).small().weak());
                    if response.clicked() {
                        clicked = Some(handle);
                    }
                    ui.add_space(ITEM_SPACING / 2.0);
                }
            });

        if clicked.is_some() {
            self.select_application(clicked);
        }
    }
}

impl eframe::App for ManagerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.geometry.track_viewport(ctx);
        self.handle_shortcuts(ctx);

        let command = egui::TopBottomPanel::top("toolbar")
            .show(ctx, |ui| {
                ui.add_space(PADDING / 2.0);
                let command = self.toolbar_ui(ui);
                ui.add_space(PADDING / 2.0);
                command
            })
            .inner;
        if let Some(command) = command {
            self.run_command(ctx, command);
        }

        egui::TopBottomPanel::bottom("status").show(ctx, |ui| match &self.status_message {
            Some(message) => {
                ui.colored_label(message.color, message.text.as_str());
            }
            None => {
                ui.label(format!("{} folders", self.manager.folders_model.len()));
            }
        });

        egui::SidePanel::left("folders")
            .resizable(true)
            .default_width(FOLDER_PANEL_WIDTH)
            .show(ctx, |ui| {
                ui.label(egui::RichText::new("Folders").strong());
                ui.add_space(ITEM_SPACING);
                self.folders_ui(ui);
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.label(egui::RichText::new("Applications").strong());
            ui.add_space(ITEM_SPACING);
            self.search_ui(ui);
            ui.add_space(ITEM_SPACING);
            self.applications_ui(ui);
        });

        self.handle_dialogs(ctx);
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        self.context
            .positions
            .save_window_position(&self.geometry, SECTION_MAIN_WINDOW);
        if let Err(err) = self.context.save() {
            error!(error = %err, "Failed to save settings during shutdown");
        }
        info!("Manager exiting");
    }
}

pub fn run_gui(context: AppContext, schema: Box<dyn SchemaStore>) -> Result<()> {
    let mut geometry = TrackedGeometry::new([WINDOW_WIDTH, WINDOW_HEIGHT]);
    context
        .positions
        .restore_window_position(&mut geometry, SECTION_MAIN_WINDOW);

    let viewport = egui::ViewportBuilder::default()
        .with_inner_size([WINDOW_WIDTH, WINDOW_HEIGHT])
        .with_min_inner_size([WINDOW_MIN_WIDTH, WINDOW_MIN_HEIGHT])
        .with_title(app::NAME);
    let options = NativeOptions {
        viewport: geometry.apply_to_viewport(viewport),
        ..Default::default()
    };
    let manager = FolderManager::with_xdg(schema);

    eframe::run_native(
        app::NAME,
        options,
        Box::new(move |cc| Ok(Box::new(ManagerApp::new(cc, context, manager, geometry)))),
    )
    .map_err(|err| anyhow!("Failed to launch egui manager: {err}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gui::components::about::SHORTCUTS;

    #[test]
    fn test_every_shortcut_is_documented() {
        assert_eq!(SHORTCUT_COMMANDS.len(), SHORTCUTS.len());
        assert!(SHORTCUTS.iter().any(|(keys, _)| *keys == "Ctrl+F"));
    }

    #[test]
    fn test_search_needs_a_folder() {
        let search = SHORTCUT_COMMANDS
            .iter()
            .find(|(_, key, _)| *key == egui::Key::F)
            .map(|(modifiers, _, command)| (*modifiers, *command));
        assert_eq!(search, Some((egui::Modifiers::COMMAND, Command::SearchFiles)));

        assert!(!Command::SearchFiles.enabled(&Actions::new(false, false, false)));
        assert!(Command::SearchFiles.enabled(&Actions::new(true, false, false)));
    }
}
