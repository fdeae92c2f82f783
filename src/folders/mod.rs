//! GNOME Shell application folders
//!
//! [`FolderManager`] keeps the folder list and the applications of the
//! selected folder in two keyed models, and writes every change back to the
//! settings schema.

pub mod catalog;
pub mod desktop_entry;
pub mod folder_info;
pub mod schema;

use std::collections::HashMap;

use tracing::{debug, info};

pub use catalog::scan_applications;
pub use desktop_entry::{DesktopEntry, SearchPath};
pub use folder_info::FolderInfo;
pub use schema::{is_valid_folder_id, GioSchemaStore, SchemaError, SchemaPath, SchemaStore};

use crate::constants::desktop::{APPLICATIONS_DIR, DIRECTORIES_DIR, MISSING_TITLE};
use crate::constants::schema::KEY_FOLDER_CHILDREN;
use crate::model::{
    AppFolderInfo, AppFolderRow, ApplicationInfo, ApplicationRow, KeyedModel, ModelError, RowHandle,
};

/// Result of validating a folder identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameCheck {
    Empty,
    Invalid,
    Exists,
    Available,
}

pub struct FolderManager {
    schema: Box<dyn SchemaStore>,
    applications_path: SearchPath,
    directories_path: SearchPath,
    folders: HashMap<String, FolderInfo>,
    pub folders_model: KeyedModel<AppFolderRow>,
    pub applications_model: KeyedModel<ApplicationRow>,
}

impl FolderManager {
    pub fn new(schema: Box<dyn SchemaStore>, applications_path: SearchPath, directories_path: SearchPath) -> Self {
        Self {
            schema,
            applications_path,
            directories_path,
            folders: HashMap::new(),
            folders_model: KeyedModel::new(),
            applications_model: KeyedModel::new(),
        }
    }

    /// Manager using the XDG data directories
    pub fn with_xdg(schema: Box<dyn SchemaStore>) -> Self {
        let applications_path = SearchPath::xdg(APPLICATIONS_DIR);
        let directories_path = SearchPath::xdg(DIRECTORIES_DIR);
        debug!(dirs = ?applications_path.dirs(), "Applications search path");
        debug!(dirs = ?directories_path.dirs(), "Directories search path");
        Self::new(schema, applications_path, directories_path)
    }

    pub fn folder(&self, id: &str) -> Option<&FolderInfo> {
        self.folders.get(id)
    }

    fn folder_children(&self) -> Vec<String> {
        self.schema.get_strv(&SchemaPath::Folders, KEY_FOLDER_CHILDREN)
    }

    fn set_folder_children(&mut self, children: &[String]) -> Result<(), SchemaError> {
        self.schema
            .set_strv(&SchemaPath::Folders, KEY_FOLDER_CHILDREN, children)?;
        self.schema.sync();
        Ok(())
    }

    /// Rebuild the folder cache and model from `folder-children`
    pub fn reload_folders(&mut self) {
        self.folders.clear();
        self.folders_model.clear();

        for id in self.folder_children() {
            let folder = FolderInfo::load(self.schema.as_ref(), &id, &self.directories_path);
            self.folders_model
                .add_data(AppFolderRow::from(AppFolderInfo::from(&folder)));
            self.folders.insert(id, folder);
        }
        info!(count = self.folders_model.len(), "Loaded application folders");
    }

    /// Fill the application model with the members of folder `id`.
    ///
    /// Returns `false` when the folder is not known.
    pub fn select_folder(&mut self, id: &str, show_missing: bool) -> bool {
        self.applications_model.clear();
        let Some(folder) = self.folders.get(id) else {
            return false;
        };

        for (app, entry) in folder.applications(&self.applications_path) {
            let info = match entry {
                Some(entry) => {
                    // Members are always listed, even if hidden from menus
                    let mut info = ApplicationInfo::from_entry(&app, &entry);
                    info.visible = true;
                    info
                }
                None if show_missing => ApplicationInfo::missing(&app, MISSING_TITLE),
                None => continue,
            };
            self.applications_model.add_data(ApplicationRow::from(info));
        }
        debug!(folder = %id, count = self.applications_model.len(), "Selected folder");
        true
    }

    pub fn create_folder(&mut self, name: &str, title: &str) -> Result<(), SchemaError> {
        if !is_valid_folder_id(name) {
            return Err(SchemaError::InvalidFolder(name.to_string()));
        }
        let mut folder = FolderInfo::load(self.schema.as_ref(), name, &self.directories_path);
        folder.set_title(self.schema.as_mut(), title)?;

        let mut children = self.folder_children();
        children.push(name.to_string());
        self.set_folder_children(&children)?;

        info!(folder = %name, title = %title, "Created folder");
        self.reload_folders();
        Ok(())
    }

    pub fn update_folder_title(&mut self, name: &str, title: &str) -> Result<(), SchemaError> {
        let folder = self
            .folders
            .get_mut(name)
            .ok_or_else(|| SchemaError::UnknownFolder(name.to_string()))?;
        folder.set_title(self.schema.as_mut(), title)?;
        self.schema.sync();

        info!(folder = %name, title = %title, "Updated folder title");
        self.reload_folders();
        Ok(())
    }

    /// Drop folder `id` from `folder-children`, then reset its keys.
    ///
    /// Nothing else changes when the `folder-children` write fails.
    pub fn remove_folder(&mut self, id: &str) -> Result<(), SchemaError> {
        if !self.folders.contains_key(id) {
            return Err(SchemaError::UnknownFolder(id.to_string()));
        }

        let children: Vec<String> = self
            .folder_children()
            .into_iter()
            .filter(|child| child != id)
            .collect();
        self.set_folder_children(&children)?;

        if let Some(folder) = self.folders.remove(id) {
            folder.remove(self.schema.as_mut());
        }
        if let Some(handle) = self.folders_model.get_iter(id) {
            // The handle was just looked up, it cannot be stale
            let _ = self.folders_model.remove(handle);
        }
        self.applications_model.clear();
        info!(folder = %id, "Removed folder");
        Ok(())
    }

    /// Append `apps` to the application model, skipping members already
    /// listed. Returns the handle of the last row added.
    pub fn add_applications(&mut self, apps: impl IntoIterator<Item = ApplicationInfo>) -> Option<RowHandle> {
        let mut last = None;
        for mut app in apps {
            app.visible = true;
            if let Some(handle) = self.applications_model.add_data(ApplicationRow::from(app)) {
                last = Some(handle);
            }
        }
        last
    }

    pub fn remove_application(&mut self, handle: RowHandle) -> Result<ApplicationRow, ModelError> {
        let row = self.applications_model.remove(handle)?;
        debug!(application = %row.info.filename, "Removed application from folder");
        Ok(row)
    }

    /// Write the application model back as the members of folder `id`
    pub fn save_applications(&mut self, id: &str) -> Result<(), SchemaError> {
        let apps: Vec<String> = self.applications_model.keys().map(str::to_string).collect();
        let folder = self
            .folders
            .get_mut(id)
            .ok_or_else(|| SchemaError::UnknownFolder(id.to_string()))?;
        folder.set_applications(self.schema.as_mut(), apps)?;
        self.schema.sync();
        info!(folder = %id, "Saved folder");
        Ok(())
    }

    /// Validate a folder identifier typed in the folder dialog.
    ///
    /// `current` is the identifier being edited, which is not a clash.
    pub fn check_folder_name(&self, name: &str, current: Option<&str>) -> NameCheck {
        let name = name.trim();
        if name.is_empty() {
            NameCheck::Empty
        } else if !is_valid_folder_id(name) {
            NameCheck::Invalid
        } else if self.folders_model.contains_key(name) && current != Some(name) {
            NameCheck::Exists
        } else {
            NameCheck::Available
        }
    }

    /// Installed applications not yet in the selected folder
    pub fn available_applications(&self) -> Vec<ApplicationInfo> {
        scan_applications(&self.applications_path)
            .into_iter()
            .filter(|app| !self.applications_model.contains_key(&app.filename))
            .collect()
    }
}
