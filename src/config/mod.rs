//! Configuration management for GNOME App Folders Manager
//!
//! - **store**: section/option settings files with typed accessors
//! - **preferences**: declared user preferences on top of the store
//! - **window**: the geometry seam used to save and restore windows
//! - **context**: the settings bundle passed to every component

pub mod context;
pub mod preferences;
pub mod store;
pub mod window;

pub use context::AppContext;
pub use store::SettingsStore;
pub use window::WindowGeometry;
