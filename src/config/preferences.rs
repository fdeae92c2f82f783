//! User preferences built on top of the settings store
//!
//! Every recognized preference is declared once in [`DEFAULT_VALUES`] with its
//! section and default. Preferences are addressed by option name alone.

use std::borrow::Cow;
use std::collections::HashMap;

use tracing::{debug, warn};

use super::store::{SettingsError, SettingsStore};

pub const SECTION_PREFERENCES: &str = "preferences";
pub const SECTION_APP_PICKER: &str = "application picker";

pub const PREFERENCES_SHOW_MISSING: &str = "show missing files";
pub const APP_PICKER_SHOW_HIDDEN: &str = "show hidden";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrefValue {
    Bool(bool),
    Int(i64),
    Text(Cow<'static, str>),
}

impl PrefValue {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            PrefValue::Bool(value) => Some(*value),
            _ => None,
        }
    }
}

impl From<bool> for PrefValue {
    fn from(value: bool) -> Self {
        PrefValue::Bool(value)
    }
}

impl From<i64> for PrefValue {
    fn from(value: i64) -> Self {
        PrefValue::Int(value)
    }
}

impl From<String> for PrefValue {
    fn from(value: String) -> Self {
        PrefValue::Text(Cow::Owned(value))
    }
}

/// Declaration of a single preference
#[derive(Debug)]
pub struct PreferenceDefault {
    pub option: &'static str,
    pub section: &'static str,
    pub default: PrefValue,
}

pub static DEFAULT_VALUES: &[PreferenceDefault] = &[
    PreferenceDefault {
        option: PREFERENCES_SHOW_MISSING,
        section: SECTION_PREFERENCES,
        default: PrefValue::Bool(false),
    },
    PreferenceDefault {
        option: APP_PICKER_SHOW_HIDDEN,
        section: SECTION_APP_PICKER,
        default: PrefValue::Bool(false),
    },
];

fn declaration(option: &str) -> Option<&'static PreferenceDefault> {
    DEFAULT_VALUES.iter().find(|decl| decl.option == option)
}

/// Current preference values
#[derive(Debug)]
pub struct Preferences {
    options: HashMap<&'static str, PrefValue>,
    save_default_values: bool,
}

impl Preferences {
    /// Read every declared preference from `settings`.
    ///
    /// With `save_default_values` set, defaults are written back too so the
    /// file lists every option.
    pub fn load(settings: &mut SettingsStore, save_default_values: bool) -> Self {
        let mut preferences = Self {
            options: HashMap::new(),
            save_default_values,
        };

        for decl in DEFAULT_VALUES {
            let value = read_value(settings, decl);
            debug!(option = decl.option, value = ?value, "Loaded preference");
            preferences.options.insert(decl.option, value);
            if save_default_values {
                write_value(settings, decl, &decl.default);
            }
        }

        preferences
    }

    pub fn get(&self, option: &str) -> Option<&PrefValue> {
        self.options.get(option)
    }

    /// Boolean preference, `false` when unknown or not a boolean
    pub fn get_bool(&self, option: &str) -> bool {
        self.get(option).and_then(PrefValue::as_bool).unwrap_or(false)
    }

    /// Change a preference and mirror it into `settings`.
    ///
    /// A value equal to the declared default removes the persisted option
    /// unless defaults are always saved.
    pub fn set(
        &mut self,
        settings: &mut SettingsStore,
        option: &str,
        value: impl Into<PrefValue>,
    ) -> Result<(), SettingsError> {
        let decl = declaration(option).ok_or_else(|| SettingsError::UnknownPreference(option.to_string()))?;
        let value = value.into();

        if value != decl.default || self.save_default_values {
            write_value(settings, decl, &value);
        } else {
            settings.unset_option(decl.section, decl.option);
        }
        self.options.insert(decl.option, value);
        Ok(())
    }
}

fn read_value(settings: &SettingsStore, decl: &PreferenceDefault) -> PrefValue {
    match &decl.default {
        PrefValue::Bool(default) => PrefValue::Bool(settings.get_boolean(decl.section, decl.option, *default)),
        PrefValue::Int(default) => match settings.get_int(decl.section, decl.option, *default) {
            Ok(value) => PrefValue::Int(value),
            Err(e) => {
                warn!(error = %e, "Invalid preference value, using default");
                PrefValue::Int(*default)
            }
        },
        PrefValue::Text(default) => match settings.get_opt(decl.section, decl.option) {
            Some(value) => PrefValue::Text(Cow::Owned(value.to_string())),
            None => PrefValue::Text(default.clone()),
        },
    }
}

fn write_value(settings: &mut SettingsStore, decl: &PreferenceDefault, value: &PrefValue) {
    match value {
        PrefValue::Bool(value) => settings.set_boolean(decl.section, decl.option, *value),
        PrefValue::Int(value) => settings.set_int(decl.section, decl.option, *value),
        PrefValue::Text(value) => settings.set(decl.section, decl.option, value.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_when_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let mut settings = SettingsStore::new(dir.path().join("settings.conf"), false);

        let prefs = Preferences::load(&mut settings, false);

        assert!(!prefs.get_bool(PREFERENCES_SHOW_MISSING));
        assert!(!prefs.get_bool(APP_PICKER_SHOW_HIDDEN));
        assert!(settings.sections().is_empty());
    }

    #[test]
    fn test_show_missing_files_roundtrip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.conf");

        let mut settings = SettingsStore::new(&path, false);
        let mut prefs = Preferences::load(&mut settings, false);
        prefs.set(&mut settings, PREFERENCES_SHOW_MISSING, true).unwrap();
        settings.save().unwrap();

        let mut settings = SettingsStore::load(&path, false).unwrap();
        let mut prefs = Preferences::load(&mut settings, false);
        assert!(prefs.get_bool(PREFERENCES_SHOW_MISSING));

        // Back to the default: the key disappears from the file
        prefs.set(&mut settings, PREFERENCES_SHOW_MISSING, false).unwrap();
        settings.save().unwrap();
        let contents = fs::read_to_string(&path).unwrap();
        assert!(!contents.contains(PREFERENCES_SHOW_MISSING));

        let mut settings = SettingsStore::load(&path, false).unwrap();
        let prefs = Preferences::load(&mut settings, false);
        assert!(!prefs.get_bool(PREFERENCES_SHOW_MISSING));
        assert_eq!(settings.get_opt(SECTION_PREFERENCES, PREFERENCES_SHOW_MISSING), None);
    }

    #[test]
    fn test_preferences_are_stored_in_declared_section() {
        let dir = TempDir::new().unwrap();
        let mut settings = SettingsStore::new(dir.path().join("settings.conf"), false);
        let mut prefs = Preferences::load(&mut settings, false);

        prefs.set(&mut settings, APP_PICKER_SHOW_HIDDEN, true).unwrap();

        assert_eq!(settings.get_opt(SECTION_APP_PICKER, APP_PICKER_SHOW_HIDDEN), Some("1"));
        assert_eq!(settings.get_opt(SECTION_PREFERENCES, APP_PICKER_SHOW_HIDDEN), None);
    }

    #[test]
    fn test_save_default_values_mode_persists_defaults() {
        let dir = TempDir::new().unwrap();
        let mut settings = SettingsStore::new(dir.path().join("settings.conf"), false);

        let mut prefs = Preferences::load(&mut settings, true);
        assert_eq!(settings.get_opt(SECTION_PREFERENCES, PREFERENCES_SHOW_MISSING), Some("0"));

        prefs.set(&mut settings, PREFERENCES_SHOW_MISSING, false).unwrap();
        assert_eq!(settings.get_opt(SECTION_PREFERENCES, PREFERENCES_SHOW_MISSING), Some("0"));
    }

    #[test]
    fn test_unknown_preference_is_rejected() {
        let dir = TempDir::new().unwrap();
        let mut settings = SettingsStore::new(dir.path().join("settings.conf"), false);
        let mut prefs = Preferences::load(&mut settings, false);

        let err = prefs.set(&mut settings, "no such option", true).unwrap_err();
        assert!(matches!(err, SettingsError::UnknownPreference(name) if name == "no such option"));
        assert!(prefs.get("no such option").is_none());
    }

    #[test]
    fn test_invalid_int_preference_falls_back_to_default() {
        let dir = TempDir::new().unwrap();
        let mut settings = SettingsStore::new(dir.path().join("settings.conf"), false);
        settings.set("limits", "count", "many");
        let decl = PreferenceDefault {
            option: "count",
            section: "limits",
            default: PrefValue::Int(3),
        };

        assert_eq!(read_value(&settings, &decl), PrefValue::Int(3));
    }
}
