//! Menu UI - panel fades, buttons, hover outlines, settings

pub mod button;
pub mod fade;
pub mod hover;
pub mod menu;
pub mod settings;

pub use button::{ButtonConfig, ButtonFeedback, MenuAction};
pub use fade::{FadeConfig, FadeController, PanelHandle};
pub use hover::{BookHover, MaterialSlots};
pub use menu::{MainMenu, MenuFlow, BOOKSHELF_MENU, MAIN_MENU, OPTIONS_MENU};
pub use settings::{
    build_resolution_options, linear_to_decibels, AudioMixer, DisplayBackend, RefreshRate,
    Resolution, ResolutionOptions, SettingsConfig, SettingsError, SettingsMenu,
};
