//! UI components for Inkpanel
//!
//! This module contains the widgets the app composes around an
//! `EditorPanel`: header fields, control bar, document surface and dialogs.

mod control_bar;
mod dialogs;
mod header;
mod icons;
mod surface;

pub use control_bar::{ControlAction, ControlBar, ToolbarState};
pub use dialogs::{show_link_dialog, show_url_prompt, LinkDialogResult};
pub use header::{preface_panel, title_field};
pub use icons::{get_app_icon, ButtonIcons};
pub use surface::DocumentSurface;
