pub mod about;
pub mod application_picker;
pub mod confirm_dialog;
pub mod folder_dialog;

/// Outcome of a dialog for the current frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogResponse<T> {
    /// Still open, or not shown at all
    None,
    Cancelled,
    Accepted(T),
}
