//! Section/option settings file
//!
//! Values are kept as strings in an INI-like file (`[section]` headers and
//! `option = value` lines). Typed accessors convert on the way in and out:
//! booleans as `1`/`0`, integers as decimal text and lists as a
//! separator-joined string.

use std::borrow::Cow;
use std::fmt::Write as _;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use ini::{Ini, ParseOption};
use thiserror::Error;
use tracing::{debug, warn};

use super::window::WindowGeometry;
use crate::constants::config::{POSITION_LEFT, POSITION_TOP, SIZE_HEIGHT, SIZE_WIDTH};

/// A stored value could not be converted to the requested type
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid value '{value}' for option '{option}' in section [{section}]")]
pub struct ConfigValueError {
    pub section: String,
    pub option: String,
    pub value: String,
}

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings from {}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse settings file {}: {message}", .path.display())]
    Parse { path: PathBuf, message: String },

    #[error("failed to write settings to {}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("unknown preference '{0}'")]
    UnknownPreference(String),

    #[error(transparent)]
    Value(#[from] ConfigValueError),
}

/// In-memory settings file, flushed explicitly with [`SettingsStore::save`]
#[derive(Debug)]
pub struct SettingsStore {
    path: PathBuf,
    ini: Ini,
    case_sensitive: bool,
    dirty: bool,
}

impl SettingsStore {
    /// Empty store that will be written to `path`
    pub fn new(path: impl Into<PathBuf>, case_sensitive: bool) -> Self {
        Self {
            path: path.into(),
            ini: Ini::new(),
            case_sensitive,
            dirty: false,
        }
    }

    /// Load the store from `path`. A missing file yields an empty store.
    pub fn load(path: impl Into<PathBuf>, case_sensitive: bool) -> Result<Self, SettingsError> {
        let path = path.into();
        debug!(path = %path.display(), "Loading settings");

        let contents = match fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "Settings file not found, starting empty");
                return Ok(Self::new(path, case_sensitive));
            }
            Err(source) => return Err(SettingsError::Read { path, source }),
        };

        // Values are raw text: no quote stripping, no backslash escapes
        let options = ParseOption {
            enabled_quote: false,
            enabled_escape: false,
            ..ParseOption::default()
        };
        let ini = Ini::load_from_str_opt(&contents, options).map_err(|e| SettingsError::Parse {
            path: path.clone(),
            message: e.to_string(),
        })?;

        Ok(Self {
            path,
            ini,
            case_sensitive,
            dirty: false,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// True when the store changed since the last load or save
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    fn option_key<'a>(&self, option: &'a str) -> Cow<'a, str> {
        if self.case_sensitive {
            Cow::Borrowed(option)
        } else {
            Cow::Owned(option.to_lowercase())
        }
    }

    /// Raw value of an option, `None` if the section or option is absent
    pub fn get_opt(&self, section: &str, option: &str) -> Option<&str> {
        self.ini.get_from(Some(section), &self.option_key(option))
    }

    /// Raw value of an option or `default` if absent
    pub fn get<'a>(&'a self, section: &str, option: &str, default: &'a str) -> &'a str {
        self.get_opt(section, option).unwrap_or(default)
    }

    /// Store a value, creating the section if needed
    pub fn set(&mut self, section: &str, option: &str, value: impl Into<String>) {
        let key = self.option_key(option).into_owned();
        self.ini.with_section(Some(section)).set(key, value);
        self.dirty = true;
    }

    pub fn get_boolean(&self, section: &str, option: &str, default: bool) -> bool {
        match self.get_opt(section, option) {
            Some(value) => value.trim() == "1",
            None => default,
        }
    }

    pub fn set_boolean(&mut self, section: &str, option: &str, value: bool) {
        self.set(section, option, if value { "1" } else { "0" });
    }

    /// Integer value of an option or `default` if absent
    pub fn get_int(&self, section: &str, option: &str, default: i64) -> Result<i64, ConfigValueError> {
        match self.get_opt(section, option) {
            Some(value) => value.trim().parse().map_err(|_| ConfigValueError {
                section: section.to_string(),
                option: option.to_string(),
                value: value.to_string(),
            }),
            None => Ok(default),
        }
    }

    pub fn set_int(&mut self, section: &str, option: &str, value: i64) {
        self.set(section, option, value.to_string());
    }

    /// List value split on `separator` with every element trimmed.
    /// An absent or empty option is an empty list.
    pub fn get_list(&self, section: &str, option: &str, separator: char) -> Vec<String> {
        match self.get_opt(section, option) {
            Some(value) if !value.trim().is_empty() => {
                value.split(separator).map(|v| v.trim().to_string()).collect()
            }
            _ => Vec::new(),
        }
    }

    pub fn set_list<S: AsRef<str>>(&mut self, section: &str, option: &str, values: &[S], separator: char) {
        let joined = values
            .iter()
            .map(|v| v.as_ref().trim())
            .collect::<Vec<_>>()
            .join(&separator.to_string());
        self.set(section, option, joined);
    }

    /// Remove an option, returning whether it existed
    pub fn unset_option(&mut self, section: &str, option: &str) -> bool {
        let key = self.option_key(option).into_owned();
        let removed = self.ini.delete_from(Some(section), &key).is_some();
        if removed {
            self.dirty = true;
        }
        removed
    }

    pub fn sections(&self) -> Vec<String> {
        self.ini.sections().flatten().map(str::to_string).collect()
    }

    pub fn options(&self, section: &str) -> Vec<String> {
        self.ini
            .section(Some(section))
            .map(|props| props.iter().map(|(k, _)| k.to_string()).collect())
            .unwrap_or_default()
    }

    /// Remove every section
    pub fn clear(&mut self) {
        self.ini = Ini::new();
        self.dirty = true;
    }

    /// Render the whole store in file form
    pub fn to_file_contents(&self) -> String {
        let mut out = String::new();
        for (section, props) in self.ini.iter() {
            let Some(section) = section else {
                continue;
            };
            let _ = writeln!(out, "[{section}]");
            for (option, value) in props.iter() {
                let _ = writeln!(out, "{option} = {value}");
            }
            out.push('\n');
        }
        out
    }

    /// Overwrite the settings file with the whole store.
    ///
    /// The file is rewritten in place; a crash mid-write can leave it
    /// truncated.
    pub fn save(&mut self) -> Result<(), SettingsError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| SettingsError::Write {
                path: self.path.clone(),
                source,
            })?;
        }
        debug!(path = %self.path.display(), "Saving settings");
        fs::write(&self.path, self.to_file_contents()).map_err(|source| SettingsError::Write {
            path: self.path.clone(),
            source,
        })?;
        self.dirty = false;
        Ok(())
    }

    /// Integer used for window geometry; invalid values count as unset
    fn geometry_value(&self, section: &str, option: &str) -> i32 {
        match self.get_int(section, option, 0) {
            Ok(value) => i32::try_from(value).unwrap_or(0),
            Err(e) => {
                warn!(error = %e, "Ignoring invalid window geometry value");
                0
            }
        }
    }

    /// Apply the saved size and position of a window.
    ///
    /// The size is applied only when both width and height are stored and
    /// non-zero, the position only when both left and top are.
    pub fn restore_window_position<W: WindowGeometry + ?Sized>(&self, window: &mut W, section: &str) {
        let width = self.geometry_value(section, SIZE_WIDTH);
        let height = self.geometry_value(section, SIZE_HEIGHT);
        if width != 0 && height != 0 {
            window.set_default_size(width, height);
        }

        let left = self.geometry_value(section, POSITION_LEFT);
        let top = self.geometry_value(section, POSITION_TOP);
        if left != 0 && top != 0 {
            window.move_to(left, top);
        }
    }

    /// Store the current size and position of a window
    pub fn save_window_position<W: WindowGeometry + ?Sized>(&mut self, window: &W, section: &str) {
        let (left, top) = window.position();
        let (width, height) = window.size();
        self.set_int(section, POSITION_LEFT, left.into());
        self.set_int(section, POSITION_TOP, top.into());
        self.set_int(section, SIZE_WIDTH, width.into());
        self.set_int(section, SIZE_HEIGHT, height.into());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::window::test_support::FakeWindow;
    use tempfile::TempDir;

    fn store_in(dir: &TempDir) -> SettingsStore {
        SettingsStore::new(dir.path().join("settings.conf"), false)
    }

    #[test]
    fn test_get_missing_returns_default() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        assert_eq!(store.get("main", "missing", "fallback"), "fallback");
        assert_eq!(store.get_opt("main", "missing"), None);
        assert_eq!(store.get_int("main", "missing", 42), Ok(42));
        assert!(store.get_boolean("main", "missing", true));
        assert!(store.get_list("main", "missing", ',').is_empty());
    }

    #[test]
    fn test_set_creates_section_and_marks_dirty() {
        let dir = TempDir::new().unwrap();
        let mut store = store_in(&dir);
        assert!(!store.is_dirty());

        store.set("new section", "key", "value");

        assert!(store.is_dirty());
        assert_eq!(store.sections(), vec!["new section".to_string()]);
        assert_eq!(store.get("new section", "key", ""), "value");
        // Nothing is written until save()
        assert!(!store.path().exists());
    }

    #[test]
    fn test_typed_values_roundtrip_through_file() {
        let dir = TempDir::new().unwrap();
        let mut store = store_in(&dir);

        store.set_boolean("preferences", "enabled", true);
        store.set_boolean("preferences", "disabled", false);
        store.set_int("preferences", "count", -17);
        store.set_list("preferences", "names", &["alpha", " beta ", "gamma"], ',');
        store.save().unwrap();
        assert!(!store.is_dirty());

        let reloaded = SettingsStore::load(store.path(), false).unwrap();
        assert!(reloaded.get_boolean("preferences", "enabled", false));
        assert!(!reloaded.get_boolean("preferences", "disabled", true));
        assert_eq!(reloaded.get_int("preferences", "count", 0), Ok(-17));
        assert_eq!(
            reloaded.get_list("preferences", "names", ','),
            vec!["alpha", "beta", "gamma"]
        );
    }

    #[test]
    fn test_boolean_encoding_is_single_flag() {
        let dir = TempDir::new().unwrap();
        let mut store = store_in(&dir);

        store.set_boolean("s", "on", true);
        store.set_boolean("s", "off", false);

        assert_eq!(store.get("s", "on", ""), "1");
        assert_eq!(store.get("s", "off", ""), "0");
    }

    #[test]
    fn test_get_int_invalid_value_is_conversion_error() {
        let dir = TempDir::new().unwrap();
        let mut store = store_in(&dir);
        store.set("main", "width", "wide");

        let err = store.get_int("main", "width", 0).unwrap_err();
        assert_eq!(err.section, "main");
        assert_eq!(err.option, "width");
        assert_eq!(err.value, "wide");
    }

    #[test]
    fn test_list_elements_are_trimmed() {
        let dir = TempDir::new().unwrap();
        let mut store = store_in(&dir);
        store.set("s", "list", " a ;b;  c  ");

        assert_eq!(store.get_list("s", "list", ';'), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_option_names_are_case_insensitive_by_default() {
        let dir = TempDir::new().unwrap();
        let mut store = store_in(&dir);
        store.set("s", "Show Hidden", "1");

        assert_eq!(store.get_opt("s", "show hidden"), Some("1"));
        assert_eq!(store.options("s"), vec!["show hidden".to_string()]);

        let mut sensitive = SettingsStore::new(dir.path().join("other.conf"), true);
        sensitive.set("s", "Show Hidden", "1");
        assert_eq!(sensitive.get_opt("s", "show hidden"), None);
        assert_eq!(sensitive.get_opt("s", "Show Hidden"), Some("1"));
    }

    #[test]
    fn test_unset_option_and_clear() {
        let dir = TempDir::new().unwrap();
        let mut store = store_in(&dir);
        store.set("s", "a", "1");
        store.set("s", "b", "2");

        assert!(store.unset_option("s", "a"));
        assert!(!store.unset_option("s", "a"));
        assert_eq!(store.options("s"), vec!["b".to_string()]);

        store.clear();
        assert!(store.sections().is_empty());
    }

    #[test]
    fn test_file_format_is_hand_editable() {
        let dir = TempDir::new().unwrap();
        let mut store = store_in(&dir);
        store.set("main", "left", "10");
        store.set("application picker", "show hidden", "1");
        store.save().unwrap();

        let contents = fs::read_to_string(store.path()).unwrap();
        assert_eq!(
            contents,
            "[main]\nleft = 10\n\n[application picker]\nshow hidden = 1\n\n"
        );
    }

    #[test]
    fn test_values_are_raw_text() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("raw.conf");
        fs::write(&path, "[s]\nquoted = \"a b\"\npath = C:\\temp\n").unwrap();

        let store = SettingsStore::load(&path, false).unwrap();
        assert_eq!(store.get("s", "quoted", ""), "\"a b\"");
        assert_eq!(store.get("s", "path", ""), "C:\\temp");
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let store = SettingsStore::load(dir.path().join("absent.conf"), false).unwrap();
        assert!(store.sections().is_empty());
        assert!(!store.is_dirty());
    }

    #[test]
    fn test_save_creates_parent_directory() {
        let dir = TempDir::new().unwrap();
        let mut store = SettingsStore::new(dir.path().join("nested/deeper/settings.conf"), false);
        store.set("s", "k", "v");

        store.save().unwrap();
        assert!(store.path().exists());
    }

    #[test]
    fn test_save_failure_keeps_memory_state() {
        let dir = TempDir::new().unwrap();
        // A regular file where the parent directory should be
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "").unwrap();
        let mut store = SettingsStore::new(blocker.join("settings.conf"), false);
        store.set("s", "k", "v");

        let err = store.save().unwrap_err();
        assert!(matches!(err, SettingsError::Write { .. }));
        assert!(store.is_dirty());
        assert_eq!(store.get("s", "k", ""), "v");
    }

    #[test]
    fn test_restore_window_position_without_saved_section() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        let mut window = FakeWindow::new((5, 6), (640, 480));

        store.restore_window_position(&mut window, "main");

        assert_eq!(window.position, (5, 6));
        assert_eq!(window.size, (640, 480));
        assert_eq!(window.resized, 0);
        assert_eq!(window.moved, 0);
    }

    #[test]
    fn test_save_then_restore_window_position() {
        let dir = TempDir::new().unwrap();
        let mut store = store_in(&dir);
        let window = FakeWindow::new((120, 80), (800, 600));
        store.save_window_position(&window, "main");
        store.save().unwrap();

        let reloaded = SettingsStore::load(store.path(), false).unwrap();
        let mut restored = FakeWindow::new((1, 1), (100, 100));
        reloaded.restore_window_position(&mut restored, "main");

        assert_eq!(restored.position, (120, 80));
        assert_eq!(restored.size, (800, 600));
    }

    #[test]
    fn test_restore_window_position_partial_section() {
        let dir = TempDir::new().unwrap();
        let mut store = store_in(&dir);
        // Width without height, left with a zero top
        store.set_int("dialog", "width", 300);
        store.set_int("dialog", "left", 40);
        store.set_int("dialog", "top", 0);

        let mut window = FakeWindow::new((7, 8), (200, 100));
        store.restore_window_position(&mut window, "dialog");

        assert_eq!(window.resized, 0);
        assert_eq!(window.moved, 0);
    }

    #[test]
    fn test_restore_window_position_ignores_invalid_values() {
        let dir = TempDir::new().unwrap();
        let mut store = store_in(&dir);
        store.set("main", "width", "garbage");
        store.set_int("main", "height", 400);
        store.set_int("main", "left", 10);
        store.set_int("main", "top", 20);

        let mut window = FakeWindow::new((0, 0), (50, 50));
        store.restore_window_position(&mut window, "main");

        assert_eq!(window.size, (50, 50));
        assert_eq!(window.position, (10, 20));
    }
}
