//! Application-wide constants
//!
//! Names, schema identifiers and file locations shared by the settings,
//! folder and GUI modules.

/// Application identity
pub mod app {
    pub const NAME: &str = "GNOME App Folders Manager";
    pub const VERSION: &str = env!("CARGO_PKG_VERSION");
    pub const DESCRIPTION: &str = "Manage GNOME Shell applications folders";
    pub const URL: &str = "https://www.muflone.com/gnome-appfolders-manager/";

    /// Directory name under the user config dir
    pub const DOMAIN_NAME: &str = "gnome-appfolders-manager";
}

/// Settings file names and well-known sections
pub mod config {
    /// Preferences file
    pub const SETTINGS_FILENAME: &str = "settings.conf";

    /// Window size and position file
    pub const WINDOWS_FILENAME: &str = "windows.conf";

    /// Window position keys
    pub const POSITION_LEFT: &str = "left";
    pub const POSITION_TOP: &str = "top";
    pub const SIZE_WIDTH: &str = "width";
    pub const SIZE_HEIGHT: &str = "height";
}

/// GNOME settings schema identifiers
pub mod schema {
    /// Root schema holding the list of folders
    pub const FOLDERS: &str = "org.gnome.desktop.app-folders";

    /// Relocatable schema of a single folder
    pub const FOLDER: &str = "org.gnome.desktop.app-folders.folder";

    /// Path of the root schema
    pub const FOLDERS_PATH: &str = "/org/gnome/desktop/app-folders/";

    pub const KEY_FOLDER_CHILDREN: &str = "folder-children";
    pub const KEY_NAME: &str = "name";
    pub const KEY_TRANSLATE: &str = "translate";
    pub const KEY_APPS: &str = "apps";
    pub const KEY_CATEGORIES: &str = "categories";

    /// Settings path of a single folder
    pub fn folder_path(folder: &str) -> String {
        format!("{FOLDERS_PATH}folders/{folder}/")
    }
}

/// Desktop entry lookup
pub mod desktop {
    /// Data subdirectory holding application launchers
    pub const APPLICATIONS_DIR: &str = "applications";

    /// Data subdirectory holding folder `.directory` files
    pub const DIRECTORIES_DIR: &str = "desktop-directories";

    pub const DESKTOP_EXTENSION: &str = "desktop";
    pub const DIRECTORY_SUFFIX: &str = ".directory";

    /// Group holding the entry keys
    pub const GROUP: &str = "Desktop Entry";

    /// Icon used when a launcher has none
    pub const MISSING_ICON_NAME: &str = "application-x-executable";

    /// Title shown for applications whose desktop file cannot be found
    pub const MISSING_TITLE: &str = "Missing desktop file";

    /// Used when `XDG_DATA_DIRS` is unset or empty
    pub const DEFAULT_DATA_DIRS: &str = "/usr/local/share:/usr/share";
}
