//! Settings bundle constructed once at startup

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{debug, error, info};

use super::preferences::{PrefValue, Preferences};
use super::store::{SettingsError, SettingsStore};
use crate::constants::{app, config};

/// Preferences and window positions shared by the main window and dialogs
#[derive(Debug)]
pub struct AppContext {
    /// `settings.conf`
    pub settings: SettingsStore,
    /// `windows.conf`
    pub positions: SettingsStore,
    pub preferences: Preferences,
}

impl AppContext {
    /// `$XDG_CONFIG_HOME/gnome-appfolders-manager`
    pub fn config_dir() -> PathBuf {
        let mut path = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push(app::DOMAIN_NAME);
        path
    }

    /// Load both settings files from the user config directory
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_dir())
    }

    pub fn load_from(dir: &Path) -> Result<Self> {
        debug!(dir = %dir.display(), "Loading settings directory");
        let mut settings = SettingsStore::load(dir.join(config::SETTINGS_FILENAME), false)
            .context("Failed to load preferences")?;
        let positions = SettingsStore::load(dir.join(config::WINDOWS_FILENAME), false)
            .context("Failed to load window positions")?;
        let preferences = Preferences::load(&mut settings, false);

        Ok(Self {
            settings,
            positions,
            preferences,
        })
    }

    pub fn preference(&self, option: &str) -> bool {
        self.preferences.get_bool(option)
    }

    pub fn set_preference(&mut self, option: &str, value: impl Into<PrefValue>) -> Result<(), SettingsError> {
        self.preferences.set(&mut self.settings, option, value)
    }

    /// Flush both files. Both are attempted; the first failure is returned.
    pub fn save(&mut self) -> Result<(), SettingsError> {
        let positions = self.positions.save();
        let settings = self.settings.save();

        for result in [&positions, &settings] {
            if let Err(e) = result {
                error!(error = %e, "Failed to save settings");
            }
        }
        positions?;
        settings?;
        info!("Settings saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::preferences::PREFERENCES_SHOW_MISSING;
    use crate::config::window::test_support::FakeWindow;
    use tempfile::TempDir;

    #[test]
    fn test_fresh_directory_loads_defaults() {
        let dir = TempDir::new().unwrap();
        let ctx = AppContext::load_from(dir.path()).unwrap();

        assert!(!ctx.preference(PREFERENCES_SHOW_MISSING));
        assert!(ctx.settings.sections().is_empty());
        assert!(ctx.positions.sections().is_empty());
    }

    #[test]
    fn test_save_writes_both_files() {
        let dir = TempDir::new().unwrap();
        let mut ctx = AppContext::load_from(dir.path()).unwrap();
        ctx.set_preference(PREFERENCES_SHOW_MISSING, true).unwrap();
        ctx.positions
            .save_window_position(&FakeWindow::new((10, 20), (300, 200)), "main");

        ctx.save().unwrap();

        let reloaded = AppContext::load_from(dir.path()).unwrap();
        assert!(reloaded.preference(PREFERENCES_SHOW_MISSING));
        assert_eq!(reloaded.positions.get_int("main", "width", 0).unwrap(), 300);
        assert!(dir.path().join(config::SETTINGS_FILENAME).exists());
        assert!(dir.path().join(config::WINDOWS_FILENAME).exists());
    }

    #[test]
    fn test_contexts_are_isolated() {
        let first = TempDir::new().unwrap();
        let second = TempDir::new().unwrap();
        let mut a = AppContext::load_from(first.path()).unwrap();
        let b = AppContext::load_from(second.path()).unwrap();

        a.set_preference(PREFERENCES_SHOW_MISSING, true).unwrap();

        assert!(a.preference(PREFERENCES_SHOW_MISSING));
        assert!(!b.preference(PREFERENCES_SHOW_MISSING));
    }

    #[test]
    fn test_unparsable_settings_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join(config::SETTINGS_FILENAME), "[unterminated\n").unwrap();

        assert!(AppContext::load_from(dir.path()).is_err());
    }
}
