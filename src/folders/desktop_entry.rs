//! Desktop entry files and their XDG search paths

use std::env;
use std::path::{Path, PathBuf};

use ini::Ini;
use thiserror::Error;

use crate::constants::desktop::{DEFAULT_DATA_DIRS, GROUP};

#[derive(Debug, Error)]
pub enum DesktopEntryError {
    #[error("failed to read desktop entry {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: ini::Error,
    },

    #[error("{} has no [Desktop Entry] group", path.display())]
    MissingGroup { path: PathBuf },
}

/// The keys of a `.desktop` or `.directory` file the manager shows
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DesktopEntry {
    pub path: PathBuf,
    pub name: String,
    pub comment: String,
    pub icon: Option<String>,
    pub no_display: bool,
    pub hidden: bool,
}

impl DesktopEntry {
    pub fn load(path: &Path) -> Result<Self, DesktopEntryError> {
        let conf = Ini::load_from_file_noescape(path).map_err(|source| DesktopEntryError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let section = conf
            .section(Some(GROUP))
            .ok_or_else(|| DesktopEntryError::MissingGroup {
                path: path.to_path_buf(),
            })?;

        Ok(DesktopEntry {
            path: path.to_path_buf(),
            name: section.get("Name").unwrap_or("").to_string(),
            comment: section.get("Comment").unwrap_or("").to_string(),
            icon: section
                .get("Icon")
                .map(str::trim)
                .filter(|icon| !icon.is_empty())
                .map(str::to_string),
            no_display: section.get("NoDisplay").is_some_and(is_true),
            hidden: section.get("Hidden").is_some_and(is_true),
        })
    }

    /// Whether menus should list this entry
    pub fn should_show(&self) -> bool {
        !self.no_display && !self.hidden
    }
}

fn is_true(value: &str) -> bool {
    value.trim() == "true"
}

/// Ordered list of directories searched for a file name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchPath {
    dirs: Vec<PathBuf>,
}

impl SearchPath {
    pub fn new(dirs: Vec<PathBuf>) -> Self {
        Self { dirs }
    }

    /// `subdir` under the user data directory, then under every
    /// `$XDG_DATA_DIRS` entry
    pub fn xdg(subdir: &str) -> Self {
        Self::from_data_dirs(dirs::data_dir(), env::var("XDG_DATA_DIRS").ok().as_deref(), subdir)
    }

    fn from_data_dirs(data_home: Option<PathBuf>, data_dirs: Option<&str>, subdir: &str) -> Self {
        let data_dirs = data_dirs
            .filter(|value| !value.trim().is_empty())
            .unwrap_or(DEFAULT_DATA_DIRS);

        let dirs = data_home
            .into_iter()
            .chain(
                data_dirs
                    .split(':')
                    .filter(|dir| !dir.is_empty())
                    .map(PathBuf::from),
            )
            .map(|dir| dir.join(subdir))
            .collect();
        Self { dirs }
    }

    pub fn dirs(&self) -> &[PathBuf] {
        &self.dirs
    }

    /// First existing `dir/file` in search order
    pub fn find(&self, file: &str) -> Option<PathBuf> {
        self.dirs
            .iter()
            .map(|dir| dir.join(file))
            .find(|candidate| candidate.is_file())
    }
}
