//! A single application folder as stored in the settings schema

use tracing::{debug, warn};

use super::desktop_entry::{DesktopEntry, SearchPath};
use super::schema::{SchemaError, SchemaPath, SchemaStore};
use crate::constants::desktop::DIRECTORY_SUFFIX;
use crate::constants::schema::{KEY_APPS, KEY_CATEGORIES, KEY_NAME, KEY_TRANSLATE};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FolderInfo {
    /// Identifier listed in `folder-children`
    pub folder: String,
    /// Plain title or the name of a `.directory` file
    pub name: String,
    pub translate: bool,
    pub apps: Vec<String>,
    pub categories: Vec<String>,
    /// Resolved `.directory` entry, if `name` refers to one
    pub desktop_entry: Option<DesktopEntry>,
}

impl FolderInfo {
    pub fn load(schema: &dyn SchemaStore, folder: &str, directories: &SearchPath) -> Self {
        let path = SchemaPath::folder(folder);
        let name = schema.get_string(&path, KEY_NAME);
        let desktop_entry = if name.ends_with(DIRECTORY_SUFFIX) {
            load_entry(directories, &name)
        } else {
            None
        };

        FolderInfo {
            folder: folder.to_string(),
            translate: schema.get_boolean(&path, KEY_TRANSLATE),
            apps: schema.get_strv(&path, KEY_APPS),
            categories: schema.get_strv(&path, KEY_CATEGORIES),
            name,
            desktop_entry,
        }
    }

    fn path(&self) -> SchemaPath {
        SchemaPath::folder(self.folder.as_str())
    }

    /// Every member application in order, `None` where the desktop file
    /// cannot be found
    pub fn applications(&self, search: &SearchPath) -> Vec<(String, Option<DesktopEntry>)> {
        self.apps
            .iter()
            .map(|app| (app.clone(), load_entry(search, app)))
            .collect()
    }

    pub fn title(&self) -> &str {
        self.desktop_entry.as_ref().map_or("", |entry| entry.name.as_str())
    }

    pub fn comment(&self) -> &str {
        self.desktop_entry.as_ref().map_or("", |entry| entry.comment.as_str())
    }

    pub fn icon_name(&self) -> &str {
        self.desktop_entry
            .as_ref()
            .and_then(|entry| entry.icon.as_deref())
            .unwrap_or("")
    }

    pub fn set_title(&mut self, schema: &mut dyn SchemaStore, title: &str) -> Result<(), SchemaError> {
        schema.set_string(&self.path(), KEY_NAME, title)?;
        self.name = title.to_string();
        self.desktop_entry = None;
        Ok(())
    }

    pub fn set_applications(&mut self, schema: &mut dyn SchemaStore, apps: Vec<String>) -> Result<(), SchemaError> {
        schema.set_strv(&self.path(), KEY_APPS, &apps)?;
        debug!(folder = %self.folder, count = apps.len(), "Saved folder applications");
        self.apps = apps;
        Ok(())
    }

    /// Reset every folder key to the schema default
    pub fn remove(&self, schema: &mut dyn SchemaStore) {
        let path = self.path();
        for key in [KEY_NAME, KEY_TRANSLATE, KEY_APPS, KEY_CATEGORIES] {
            schema.reset(&path, key);
        }
    }
}

fn load_entry(search: &SearchPath, file: &str) -> Option<DesktopEntry> {
    let path = search.find(file)?;
    match DesktopEntry::load(&path) {
        Ok(entry) => Some(entry),
        Err(e) => {
            warn!(error = %e, "Ignoring unreadable desktop entry");
            None
        }
    }
}
