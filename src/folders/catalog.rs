//! Enumeration of installed applications

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use super::desktop_entry::{DesktopEntry, SearchPath};
use crate::constants::desktop::DESKTOP_EXTENSION;
use crate::model::ApplicationInfo;

/// Every application found on `search`.
///
/// The desktop id is the path relative to its applications directory with
/// `/` replaced by `-`. When the same id appears in several directories the
/// first one in search order wins, so user entries shadow system ones.
pub fn scan_applications(search: &SearchPath) -> Vec<ApplicationInfo> {
    let mut seen = HashSet::new();
    let mut applications = Vec::new();

    for dir in search.dirs() {
        let mut files = Vec::new();
        collect_desktop_files(dir, dir, &mut files);
        files.sort();

        for (desktop_id, path) in files {
            if seen.contains(&desktop_id) {
                continue;
            }
            match DesktopEntry::load(&path) {
                Ok(entry) => {
                    applications.push(ApplicationInfo::from_entry(&desktop_id, &entry));
                    seen.insert(desktop_id);
                }
                Err(e) => warn!(error = %e, "Skipping desktop file"),
            }
        }
    }

    debug!(count = applications.len(), "Scanned installed applications");
    applications
}

fn collect_desktop_files(root: &Path, dir: &Path, files: &mut Vec<(String, PathBuf)>) {
    // Directories that don't exist are skipped silently
    let Ok(read_dir) = fs::read_dir(dir) else {
        return;
    };

    for entry in read_dir.flatten() {
        // Symlinked directories are not followed
        let Ok(file_type) = entry.file_type() else {
            continue;
        };
        let path = entry.path();
        if file_type.is_dir() {
            collect_desktop_files(root, &path, files);
        } else if path.extension().and_then(|ext| ext.to_str()) == Some(DESKTOP_EXTENSION) {
            if let Ok(relative) = path.strip_prefix(root) {
                let desktop_id = relative.to_string_lossy().replace('/', "-");
                files.push((desktop_id, path));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_desktop_ids_from_subdirectories() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("kde4")).unwrap();
        fs::write(dir.path().join("kde4/kate.desktop"), "[Desktop Entry]\nName=Kate\n").unwrap();
        fs::write(dir.path().join("gedit.desktop"), "[Desktop Entry]\nName=Gedit\n").unwrap();
        fs::write(dir.path().join("notes.txt"), "not a launcher").unwrap();

        let apps = scan_applications(&SearchPath::new(vec![dir.path().to_path_buf()]));

        let ids: Vec<_> = apps.iter().map(|app| app.filename.as_str()).collect();
        assert_eq!(ids, vec!["gedit.desktop", "kde4-kate.desktop"]);
    }

    #[test]
    fn test_first_directory_shadows_later_ones() {
        let user = TempDir::new().unwrap();
        let system = TempDir::new().unwrap();
        fs::write(
            user.path().join("editor.desktop"),
            "[Desktop Entry]\nName=Editor\nHidden=true\n",
        )
        .unwrap();
        fs::write(system.path().join("editor.desktop"), "[Desktop Entry]\nName=Editor\n").unwrap();
        fs::write(system.path().join("viewer.desktop"), "[Desktop Entry]\nName=Viewer\n").unwrap();

        let apps = scan_applications(&SearchPath::new(vec![
            user.path().to_path_buf(),
            system.path().to_path_buf(),
        ]));

        assert_eq!(apps.len(), 2);
        assert_eq!(apps[0].filename, "editor.desktop");
        assert!(!apps[0].visible);
        assert_eq!(apps[1].filename, "viewer.desktop");
    }

    #[test]
    fn test_unreadable_entries_are_skipped() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("broken.desktop"), "Name=No group\n").unwrap();

        let apps = scan_applications(&SearchPath::new(vec![dir.path().to_path_buf()]));

        assert!(apps.is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn test_directory_symlink_loops_are_not_followed() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("gedit.desktop"), "[Desktop Entry]\nName=Gedit\n").unwrap();
        std::os::unix::fs::symlink(dir.path(), dir.path().join("loop")).unwrap();
        std::os::unix::fs::symlink(dir.path().join("gedit.desktop"), dir.path().join("editor.desktop")).unwrap();

        let apps = scan_applications(&SearchPath::new(vec![dir.path().to_path_buf()]));

        let ids: Vec<_> = apps.iter().map(|app| app.filename.as_str()).collect();
        assert_eq!(ids, vec!["editor.desktop", "gedit.desktop"]);
    }
}
