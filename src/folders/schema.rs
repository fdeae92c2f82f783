//! Access to the GNOME app-folders settings schema
//!
//! [`GioSchemaStore`] talks to the real dconf-backed settings through gio.
//! Everything above it only sees the [`SchemaStore`] trait, so folder logic
//! can run against the in-memory store in tests.

use gio::prelude::*;
use thiserror::Error;
use tracing::{debug, error, warn};

use crate::constants::schema;

/// Settings object addressed by a schema operation
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SchemaPath {
    /// `org.gnome.desktop.app-folders`
    Folders,
    /// `org.gnome.desktop.app-folders.folder` relocated under the folder id
    Folder(String),
}

impl SchemaPath {
    pub fn folder(id: impl Into<String>) -> Self {
        SchemaPath::Folder(id.into())
    }

    /// Whether the path maps to a valid dconf path
    pub fn is_valid(&self) -> bool {
        match self {
            SchemaPath::Folders => true,
            SchemaPath::Folder(id) => is_valid_folder_id(id),
        }
    }

    fn check(&self) -> Result<(), SchemaError> {
        match self {
            SchemaPath::Folder(id) if !self.is_valid() => Err(SchemaError::InvalidFolder(id.clone())),
            _ => Ok(()),
        }
    }
}

/// Folder ids become one dconf path component
pub fn is_valid_folder_id(id: &str) -> bool {
    !id.is_empty() && !id.contains('/')
}

#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("settings schema {0} is not installed")]
    NotInstalled(&'static str),

    #[error("failed to write key {key}: {message}")]
    Write { key: String, message: String },

    #[error("unknown folder {0}")]
    UnknownFolder(String),

    #[error("invalid folder name {0:?}")]
    InvalidFolder(String),
}

/// Typed access to the app-folders keys
pub trait SchemaStore {
    fn get_string(&self, path: &SchemaPath, key: &str) -> String;
    fn get_boolean(&self, path: &SchemaPath, key: &str) -> bool;
    fn get_strv(&self, path: &SchemaPath, key: &str) -> Vec<String>;

    fn set_string(&mut self, path: &SchemaPath, key: &str, value: &str) -> Result<(), SchemaError>;
    fn set_boolean(&mut self, path: &SchemaPath, key: &str, value: bool) -> Result<(), SchemaError>;
    fn set_strv(&mut self, path: &SchemaPath, key: &str, values: &[String]) -> Result<(), SchemaError>;

    /// Restore the schema default of `key`
    fn reset(&mut self, path: &SchemaPath, key: &str);

    /// Flush pending writes to the backend
    fn sync(&self) {}
}

/// Schema store backed by `gio::Settings`
pub struct GioSchemaStore {
    folders: gio::Settings,
    folder_schema: gio::SettingsSchema,
}

impl GioSchemaStore {
    /// Open the app-folders schemas from the default schema source.
    ///
    /// Fails instead of aborting when either schema is missing.
    pub fn new() -> Result<Self, SchemaError> {
        let source = gio::SettingsSchemaSource::default().ok_or(SchemaError::NotInstalled(schema::FOLDERS))?;
        let folders_schema = source
            .lookup(schema::FOLDERS, true)
            .ok_or(SchemaError::NotInstalled(schema::FOLDERS))?;
        let folder_schema = source
            .lookup(schema::FOLDER, true)
            .ok_or(SchemaError::NotInstalled(schema::FOLDER))?;

        debug!(schema = schema::FOLDERS, "Opened settings schema");
        Ok(Self {
            folders: gio::Settings::new_full(&folders_schema, None::<&gio::SettingsBackend>, None),
            folder_schema,
        })
    }

    fn settings(&self, path: &SchemaPath) -> Result<gio::Settings, SchemaError> {
        path.check()?;
        Ok(match path {
            SchemaPath::Folders => self.folders.clone(),
            SchemaPath::Folder(id) => gio::Settings::new_full(
                &self.folder_schema,
                None::<&gio::SettingsBackend>,
                Some(schema::folder_path(id).as_str()),
            ),
        })
    }

    /// Reads from an invalid folder path see the schema defaults
    fn read<T: Default>(&self, path: &SchemaPath, key: &str, read: impl FnOnce(&gio::Settings) -> T) -> T {
        match self.settings(path) {
            Ok(settings) => read(&settings),
            Err(err) => {
                warn!(error = %err, key, "Settings read skipped");
                T::default()
            }
        }
    }
}

fn write_error(key: &str, err: impl std::fmt::Display) -> SchemaError {
    let err = SchemaError::Write {
        key: key.to_string(),
        message: err.to_string(),
    };
    error!(error = %err, "Settings write rejected");
    err
}

impl SchemaStore for GioSchemaStore {
    fn get_string(&self, path: &SchemaPath, key: &str) -> String {
        self.read(path, key, |settings| settings.string(key).to_string())
    }

    fn get_boolean(&self, path: &SchemaPath, key: &str) -> bool {
        self.read(path, key, |settings| settings.boolean(key))
    }

    fn get_strv(&self, path: &SchemaPath, key: &str) -> Vec<String> {
        self.read(path, key, |settings| {
            settings
                .strv(key)
                .iter()
                .map(|value| value.as_str().to_owned())
                .collect()
        })
    }

    fn set_string(&mut self, path: &SchemaPath, key: &str, value: &str) -> Result<(), SchemaError> {
        self.settings(path)?
            .set_string(key, value)
            .map_err(|e| write_error(key, e))
    }

    fn set_boolean(&mut self, path: &SchemaPath, key: &str, value: bool) -> Result<(), SchemaError> {
        self.settings(path)?
            .set_boolean(key, value)
            .map_err(|e| write_error(key, e))
    }

    fn set_strv(&mut self, path: &SchemaPath, key: &str, values: &[String]) -> Result<(), SchemaError> {
        self.settings(path)?
            .set_strv(key, values)
            .map_err(|e| write_error(key, e))
    }

    fn reset(&mut self, path: &SchemaPath, key: &str) {
        match self.settings(path) {
            Ok(settings) => settings.reset(key),
            Err(err) => warn!(error = %err, key, "Settings reset skipped"),
        }
    }

    fn sync(&self) {
        gio::Settings::sync();
    }
}

#[cfg(test)]
pub(crate) use memory::MemorySchemaStore;


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_defaults_and_reset() {
        let mut store = MemorySchemaStore::new();
        let path = SchemaPath::folder("work");

        assert_eq!(store.get_string(&path, schema::KEY_NAME), "");
        assert!(!store.get_boolean(&path, schema::KEY_TRANSLATE));
        assert!(store.get_strv(&path, schema::KEY_APPS).is_empty());

        store.set_string(&path, schema::KEY_NAME, "Work").unwrap();
        store
            .set_strv(&path, schema::KEY_APPS, &["a.desktop".to_string()])
            .unwrap();
        assert_eq!(store.get_string(&path, schema::KEY_NAME), "Work");
        assert_eq!(store.get_strv(&path, schema::KEY_APPS), vec!["a.desktop"]);

        store.reset(&path, schema::KEY_NAME);
        assert!(!store.is_set(&path, schema::KEY_NAME));
        assert_eq!(store.get_string(&path, schema::KEY_NAME), "");
    }

    #[test]
    fn test_folder_paths_are_independent() {
        let mut store = MemorySchemaStore::new();
        store
            .set_string(&SchemaPath::folder("work"), schema::KEY_NAME, "Work")
            .unwrap();

        assert_eq!(store.get_string(&SchemaPath::folder("games"), schema::KEY_NAME), "");
        assert_eq!(store.get_string(&SchemaPath::Folders, schema::KEY_NAME), "");
    }

    #[test]
    fn test_folder_ids_must_be_one_path_component() {
        assert!(is_valid_folder_id("work"));
        assert!(is_valid_folder_id("Office.Tools"));
        assert!(!is_valid_folder_id(""));
        assert!(!is_valid_folder_id("a/"));
        assert!(!is_valid_folder_id("/"));
        assert!(!is_valid_folder_id("a//b"));
        assert!(SchemaPath::Folders.is_valid());
        assert!(!SchemaPath::folder("a/").is_valid());

        let mut store = MemorySchemaStore::new();
        let err = store
            .set_string(&SchemaPath::folder("a/"), schema::KEY_NAME, "A")
            .unwrap_err();
        assert!(matches!(err, SchemaError::InvalidFolder(id) if id == "a/"));
        assert!(!store.is_set(&SchemaPath::folder("a/"), schema::KEY_NAME));
    }
}
