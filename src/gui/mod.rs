pub mod actions;
pub mod components;
pub mod constants;
pub mod geometry;
pub mod manager;

pub use manager::run_gui;
