//! Menu configuration with layered loading
//!
//! Configuration is loaded from multiple sources (lowest to highest priority):
//! 1. Compiled defaults
//! 2. `menu.ron` file, or the file passed to [`MenuConfig::load_from`]
//! 3. Environment variables prefixed with `SHELF_MENU_`
//!
//! Example environment variable: `SHELF_MENU_FADE__FADE_DURATION=0.25`

use std::path::Path;

use anyhow::{Context, Result};
use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::ui::{ButtonConfig, FadeConfig, SettingsConfig};

/// Main menu configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct MenuConfig {
    #[serde(default)]
    pub fade: FadeConfig,

    #[serde(default)]
    pub camera: CameraConfig,

    #[serde(default)]
    pub button: ButtonConfig,

    #[serde(default)]
    pub settings: SettingsConfig,
}

/// Camera rig settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Time constant of the camera approach in seconds
    pub smooth_time: f32,
    /// Viewpoint used while the bookshelf menu is open
    pub bookshelf_position: Vec3,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            smooth_time: 1.0,
            bookshelf_position: Vec3::new(0.0, 0.9, 2.7),
        }
    }
}

impl MenuConfig {
    /// Load configuration from defaults, an optional `menu.ron` in the
    /// working directory, and `SHELF_MENU_` environment variables.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Like [`MenuConfig::load`], but reads `path` instead of `menu.ron`.
    /// An explicit path must exist.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from(path: Option<&Path>) -> Result<Self> {
        use config::{Config, Environment, File, FileFormat};

        let defaults = Self::default();
        let builder = Config::builder()
            // Layer 1: Compiled defaults
            .set_default("fade.fade_duration", defaults.fade.fade_duration as f64)?
            .set_default(
                "fade.transition_threshold",
                defaults.fade.transition_threshold as f64,
            )?
            .set_default("fade.disable_when_idle", defaults.fade.disable_when_idle)?
            .set_default("camera.smooth_time", defaults.camera.smooth_time as f64)?
            .set_default(
                "camera.bookshelf_position",
                defaults
                    .camera
                    .bookshelf_position
                    .to_array()
                    .map(|c| c as f64)
                    .to_vec(),
            )?
            .set_default("button.press_depth", defaults.button.press_depth as f64)?
            .set_default(
                "settings.volume_parameter",
                defaults.settings.volume_parameter.clone(),
            )?
            .set_default(
                "settings.min_linear_volume",
                defaults.settings.min_linear_volume as f64,
            )?;

        // Layer 2: Config file (optional unless given explicitly)
        let builder = match path {
            Some(path) => builder.add_source(File::from(path).format(FileFormat::Ron).required(true)),
            None => builder.add_source(
                File::with_name("menu")
                    .format(FileFormat::Ron)
                    .required(false),
            ),
        };

        // Layer 3: Environment variables (SHELF_MENU_FADE__FADE_DURATION, etc.)
        let builder = builder.add_source(
            Environment::with_prefix("SHELF_MENU")
                .prefix_separator("_")
                .separator("__"),
        );

        let config = builder.build().context("Failed to build configuration")?;

        config
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }

    /// Serialize to pretty RON, e.g. to seed a `menu.ron`.
    pub fn to_ron(&self) -> Result<String> {
        ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
            .context("Failed to serialize configuration")
    }
}
