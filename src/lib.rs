//! # Shelf Menu - main menu core
//!
//! Engine-independent logic behind a bookshelf-themed main menu: panels that
//! fade in and out, a camera that eases between viewpoints, button feedback,
//! hover outlines and the settings panel bindings. The host engine supplies
//! rendering, input and platform access through small traits.

pub mod animation;
pub mod config;
pub mod host;
pub mod ui;

pub use config::MenuConfig;
pub use ui::{FadeController, MainMenu, MenuAction};

/// Common imports for internal use
pub mod prelude {
    pub use crate::animation::CameraRig;
    pub use crate::ui::{FadeConfig, FadeController, MainMenu, MenuAction, MenuFlow, PanelHandle};
    pub use glam::Vec3;
}
