//! Window geometry tracking for the viewport and dialog windows
//!
//! egui does not expose window handles, so geometry is mirrored into a
//! [`TrackedGeometry`] every frame and restored into builder hints when a
//! window is opened.

use eframe::egui;

use crate::config::WindowGeometry;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrackedGeometry {
    position: (i32, i32),
    size: (i32, i32),
    restored_position: bool,
    restored_size: bool,
}

impl TrackedGeometry {
    pub fn new(size: [f32; 2]) -> Self {
        Self {
            size: (size[0].round() as i32, size[1].round() as i32),
            ..Self::default()
        }
    }

    /// Position to open at, if one was restored
    pub fn restored_position(&self) -> Option<egui::Pos2> {
        self.restored_position
            .then(|| egui::pos2(self.position.0 as f32, self.position.1 as f32))
    }

    /// Size to open with, if one was restored
    pub fn restored_size(&self) -> Option<egui::Vec2> {
        self.restored_size
            .then(|| egui::vec2(self.size.0 as f32, self.size.1 as f32))
    }

    pub fn default_size(&self) -> egui::Vec2 {
        egui::vec2(self.size.0 as f32, self.size.1 as f32)
    }

    /// Record the rectangle of a dialog window
    pub fn track_rect(&mut self, rect: egui::Rect) {
        self.position = (rect.min.x.round() as i32, rect.min.y.round() as i32);
        self.size = (rect.width().round() as i32, rect.height().round() as i32);
    }

    /// Record the outer position and inner size of the current viewport
    pub fn track_viewport(&mut self, ctx: &egui::Context) {
        let (outer, inner) = ctx.input(|i| (i.viewport().outer_rect, i.viewport().inner_rect));
        if let Some(outer) = outer {
            self.position = (outer.min.x.round() as i32, outer.min.y.round() as i32);
        }
        if let Some(inner) = inner {
            self.size = (inner.width().round() as i32, inner.height().round() as i32);
        }
    }

    pub fn apply_to_viewport(&self, mut builder: egui::ViewportBuilder) -> egui::ViewportBuilder {
        if let Some(size) = self.restored_size() {
            builder = builder.with_inner_size(size);
        }
        if let Some(position) = self.restored_position() {
            builder = builder.with_position(position);
        }
        builder
    }
}

impl WindowGeometry for TrackedGeometry {
    fn position(&self) -> (i32, i32) {
        self.position
    }

    fn size(&self) -> (i32, i32) {
        self.size
    }

    fn set_default_size(&mut self, width: i32, height: i32) {
        self.size = (width, height);
        self.restored_size = true;
    }

    fn move_to(&mut self, left: i32, top: i32) {
        self.position = (left, top);
        self.restored_position = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SettingsStore;
    use tempfile::TempDir;

    #[test]
    fn test_nothing_restored_from_empty_section() {
        let dir = TempDir::new().unwrap();
        let positions = SettingsStore::new(dir.path().join("windows.conf"), false);
        let mut geometry = TrackedGeometry::new([400.0, 300.0]);

        positions.restore_window_position(&mut geometry, "main");

        assert_eq!(geometry.restored_position(), None);
        assert_eq!(geometry.restored_size(), None);
        assert_eq!(geometry.size(), (400, 300));
    }

    #[test]
    fn test_tracked_rect_survives_save_and_restore() {
        let dir = TempDir::new().unwrap();
        let mut positions = SettingsStore::new(dir.path().join("windows.conf"), false);
        let mut geometry = TrackedGeometry::new([400.0, 300.0]);
        geometry.track_rect(egui::Rect::from_min_size(egui::pos2(40.4, 60.6), egui::vec2(500.0, 350.0)));

        positions.save_window_position(&geometry, "create folder");
        let mut restored = TrackedGeometry::new([400.0, 300.0]);
        positions.restore_window_position(&mut restored, "create folder");

        assert_eq!(restored.restored_position(), Some(egui::pos2(40.0, 61.0)));
        assert_eq!(restored.restored_size(), Some(egui::vec2(500.0, 350.0)));
    }
}
