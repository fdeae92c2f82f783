//! GUI-specific constants for layout, status colors and window sections

/// Main window dimensions
pub const WINDOW_WIDTH: f32 = 760.0;
pub const WINDOW_HEIGHT: f32 = 520.0;
pub const WINDOW_MIN_WIDTH: f32 = 480.0;
pub const WINDOW_MIN_HEIGHT: f32 = 320.0;

/// Folder list panel
pub const FOLDER_PANEL_WIDTH: f32 = 260.0;

/// Default dialog sizes
pub const FOLDER_DIALOG_SIZE: [f32; 2] = [360.0, 140.0];
pub const PICKER_SIZE: [f32; 2] = [420.0, 480.0];

/// Layout spacing
pub const PADDING: f32 = 10.0;
pub const SECTION_SPACING: f32 = 15.0;
pub const ITEM_SPACING: f32 = 8.0;

/// Status colors
pub const STATUS_OK: egui::Color32 = egui::Color32::from_rgb(0, 160, 0);
pub const STATUS_ERROR: egui::Color32 = egui::Color32::from_rgb(200, 0, 0);

/// Window position sections in `windows.conf`
pub const SECTION_MAIN_WINDOW: &str = "main";
pub const SECTION_FOLDER_DIALOG: &str = "create folder";
pub const SECTION_APP_PICKER: &str = "application picker";
