//! Folder rows of the main window

use super::ModelRow;
use crate::folders::FolderInfo;

/// Display data of an application folder
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppFolderInfo {
    /// Folder identifier under `folder-children`
    pub name: String,
    /// Value of the folder `name` key (title or `.directory` file)
    pub filename: String,
    pub title: String,
    pub description: String,
    pub icon_name: Option<String>,
}

impl From<&FolderInfo> for AppFolderInfo {
    fn from(folder: &FolderInfo) -> Self {
        Self {
            name: folder.folder.clone(),
            filename: folder.name.clone(),
            title: folder.title().to_string(),
            description: folder.comment().to_string(),
            icon_name: Some(folder.icon_name().to_string()).filter(|icon| !icon.is_empty()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppFolderRow {
    pub info: AppFolderInfo,
    /// Title, identifier and file name, one per line
    pub formatted: String,
}

impl AppFolderRow {
    pub fn title(&self) -> &str {
        &self.info.title
    }

    pub fn filename(&self) -> &str {
        &self.info.filename
    }

    pub fn icon(&self) -> Option<&str> {
        self.info.icon_name.as_deref()
    }

    /// Hover text of the folder list
    pub fn tooltip(&self) -> String {
        match self.icon() {
            Some(icon) => format!("{}\nIcon: {icon}", self.formatted),
            None => self.formatted.clone(),
        }
    }
}

impl From<AppFolderInfo> for AppFolderRow {
    fn from(info: AppFolderInfo) -> Self {
        let formatted = format!("{}\n{}\n{}", info.title, info.name, info.filename);
        Self { info, formatted }
    }
}

impl ModelRow for AppFolderRow {
    fn key(&self) -> &str {
        &self.info.name
    }
}
