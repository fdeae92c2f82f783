//! Enabled state of the main window actions

/// Which toolbar actions can run, derived from the current selection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Actions {
    pub folder_remove: bool,
    pub folder_properties: bool,
    pub files_add: bool,
    pub files_remove: bool,
    pub files_search: bool,
    pub files_save: bool,
}

impl Actions {
    pub fn new(folder_selected: bool, application_selected: bool, unsaved_changes: bool) -> Self {
        Self {
            folder_remove: folder_selected,
            folder_properties: folder_selected,
            files_add: folder_selected,
            files_remove: folder_selected && application_selected,
            files_search: folder_selected,
            files_save: folder_selected && unsaved_changes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_folder_disables_everything() {
        assert_eq!(Actions::new(false, true, true), Actions::default());
    }

    #[test]
    fn test_folder_selection_enables_folder_actions() {
        let actions = Actions::new(true, false, false);

        assert!(actions.folder_remove);
        assert!(actions.folder_properties);
        assert!(actions.files_add);
        assert!(!actions.files_remove);
        assert!(actions.files_search);
        assert!(!actions.files_save);
    }

    #[test]
    fn test_save_follows_unsaved_changes() {
        assert!(Actions::new(true, false, true).files_save);
        assert!(Actions::new(true, true, false).files_remove);
    }
}
