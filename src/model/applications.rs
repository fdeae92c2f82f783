//! Application rows shown inside a folder and in the application picker

use super::ModelRow;
use crate::constants::desktop::MISSING_ICON_NAME;
use crate::folders::DesktopEntry;

/// Read-only projection of an application desktop entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplicationInfo {
    /// Desktop entry id, e.g. `org.gnome.Nautilus.desktop`
    pub filename: String,
    pub name: String,
    pub description: String,
    pub icon_name: Option<String>,
    /// Shown in menus (not `NoDisplay` nor `Hidden`)
    pub visible: bool,
}

impl ApplicationInfo {
    pub fn new(
        filename: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
        icon_name: Option<String>,
        visible: bool,
    ) -> Self {
        Self {
            filename: filename.into(),
            name: name.into(),
            description: description.into(),
            icon_name,
            visible,
        }
    }

    pub fn from_entry(filename: &str, entry: &DesktopEntry) -> Self {
        Self::new(
            filename,
            entry.name.clone(),
            entry.comment.clone(),
            entry.icon.clone(),
            entry.should_show(),
        )
    }

    /// Placeholder for an application listed in a folder whose desktop
    /// file cannot be found
    pub fn missing(filename: &str, title: &str) -> Self {
        Self::new(filename, title, filename, None, true)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplicationRow {
    pub info: ApplicationInfo,
    /// Name, description and file name, one per line
    pub formatted: String,
    /// Icon name, falling back to the generic executable icon
    pub icon: String,
}

impl ApplicationRow {
    pub fn title(&self) -> &str {
        &self.info.name
    }

    pub fn comment(&self) -> &str {
        &self.info.description
    }

    /// Whether the formatted text contains `filter`, which must already be
    /// lowercase. An empty filter matches every row.
    pub fn matches(&self, filter: &str) -> bool {
        filter.is_empty() || self.formatted.to_lowercase().contains(filter)
    }
}

impl From<ApplicationInfo> for ApplicationRow {
    fn from(info: ApplicationInfo) -> Self {
        let formatted = format!("{}\n{}\n{}", info.name, info.description, info.filename);
        let icon = info
            .icon_name
            .clone()
            .filter(|icon| !icon.is_empty())
            .unwrap_or_else(|| MISSING_ICON_NAME.to_string());
        Self { info, formatted, icon }
    }
}

impl ModelRow for ApplicationRow {
    fn key(&self) -> &str {
        &self.info.filename
    }

    fn default_visible(&self) -> bool {
        self.info.visible
    }
}
