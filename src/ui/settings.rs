//! Settings panel bindings: resolution, volume, quality, fullscreen
//!
//! The panel talks to the platform through [`DisplayBackend`] and
//! [`AudioMixer`]; it only builds the option lists and converts values.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Refresh rate as a rational number of frames per second.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefreshRate {
    pub numerator: u32,
    pub denominator: u32,
}

impl RefreshRate {
    pub const fn hz(hz: u32) -> Self {
        Self {
            numerator: hz,
            denominator: 1,
        }
    }

    /// Rate in Hz, 0 for a zero denominator.
    pub fn value(&self) -> f64 {
        if self.denominator == 0 {
            0.0
        } else {
            self.numerator as f64 / self.denominator as f64
        }
    }
}

/// A display mode reported by the platform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolution {
    pub width: u32,
    pub height: u32,
    pub refresh_rate: RefreshRate,
}

impl Resolution {
    pub const fn new(width: u32, height: u32, hz: u32) -> Self {
        Self {
            width,
            height,
            refresh_rate: RefreshRate::hz(hz),
        }
    }

    /// Dropdown label, e.g. `1920 x 1080 @ 144hz`
    pub fn label(&self) -> String {
        format!(
            "{} x {} @ {}hz",
            self.width,
            self.height,
            self.refresh_rate.value().round() as i64
        )
    }
}

/// Resolution dropdown contents
#[derive(Debug, Clone, PartialEq)]
pub struct ResolutionOptions {
    /// One entry per size, sorted by width then height
    pub entries: Vec<Resolution>,
    pub labels: Vec<String>,
    /// Entry matching the current screen size (0 if none does)
    pub current_index: usize,
}

/// Collapse a platform mode list into one entry per screen size.
///
/// Each size keeps its highest refresh rate; on a tie the first mode
/// reported wins.
pub fn build_resolution_options(resolutions: &[Resolution], current_size: (u32, u32)) -> ResolutionOptions {
    let mut by_size: HashMap<(u32, u32), Resolution> = HashMap::new();
    for resolution in resolutions {
        let key = (resolution.width, resolution.height);
        let faster = by_size
            .get(&key)
            .map_or(true, |existing| resolution.refresh_rate.value() > existing.refresh_rate.value());
        if faster {
            by_size.insert(key, *resolution);
        }
    }

    let mut entries: Vec<Resolution> = by_size.into_values().collect();
    entries.sort_by_key(|r| (r.width, r.height));

    let labels = entries.iter().map(Resolution::label).collect();
    let current_index = entries
        .iter()
        .position(|r| (r.width, r.height) == current_size)
        .unwrap_or(0);

    ResolutionOptions {
        entries,
        labels,
        current_index,
    }
}

/// Platform display and graphics settings
pub trait DisplayBackend {
    /// Every mode the display supports (may contain duplicates per size).
    fn resolutions(&self) -> Vec<Resolution>;
    /// Current render size in pixels.
    fn current_size(&self) -> (u32, u32);
    fn is_fullscreen(&self) -> bool;
    fn set_resolution(&mut self, width: u32, height: u32, fullscreen: bool);
    fn set_fullscreen(&mut self, fullscreen: bool);
    fn quality_level_count(&self) -> usize;
    fn set_quality_level(&mut self, index: usize);
}

/// Audio mixer with named exposed parameters
pub trait AudioMixer {
    /// Returns false if the mixer has no parameter called `name`.
    fn set_float(&mut self, name: &str, value: f32) -> bool;
}

/// Settings panel tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SettingsConfig {
    /// Exposed mixer parameter that receives the volume in dB
    pub volume_parameter: String,
    /// Lowest linear volume accepted (log10(0) is -inf)
    pub min_linear_volume: f32,
}

impl Default for SettingsConfig {
    fn default() -> Self {
        Self {
            volume_parameter: "volume".to_string(),
            min_linear_volume: 0.0001,
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum SettingsError {
    #[error("resolution index {index} out of range ({count} resolutions)")]
    ResolutionIndexOutOfRange { index: usize, count: usize },

    #[error("quality index {index} out of range ({count} quality levels)")]
    QualityIndexOutOfRange { index: usize, count: usize },

    #[error("audio mixer has no exposed parameter '{0}'")]
    UnknownMixerParameter(String),
}

/// Convert a linear 0..1 slider value to decibels.
///
/// NaN counts as silence (the floor).
pub fn linear_to_decibels(volume: f32, min_linear: f32) -> f32 {
    let floor = min_linear.max(f32::MIN_POSITIVE);
    let volume = if volume.is_nan() { floor } else { volume };
    volume.clamp(floor, 1.0_f32.max(floor)).log10() * 20.0
}

/// Settings panel state bound to the platform backends
#[derive(Debug)]
pub struct SettingsMenu<D: DisplayBackend, A: AudioMixer> {
    display: D,
    mixer: A,
    config: SettingsConfig,
    options: ResolutionOptions,
}

impl<D: DisplayBackend, A: AudioMixer> SettingsMenu<D, A> {
    pub fn new(display: D, mixer: A, config: SettingsConfig) -> Self {
        let options = build_resolution_options(&display.resolutions(), display.current_size());
        log::debug!(
            "Settings: {} distinct resolutions, current index {}",
            options.entries.len(),
            options.current_index
        );

        Self {
            display,
            mixer,
            config,
            options,
        }
    }

    pub fn resolution_options(&self) -> &ResolutionOptions {
        &self.options
    }

    /// Apply a dropdown entry, keeping the current fullscreen mode.
    pub fn set_resolution(&mut self, index: usize) -> Result<Resolution, SettingsError> {
        let resolution = *self.options.entries.get(index).ok_or(
            SettingsError::ResolutionIndexOutOfRange {
                index,
                count: self.options.entries.len(),
            },
        )?;

        let fullscreen = self.display.is_fullscreen();
        self.display
            .set_resolution(resolution.width, resolution.height, fullscreen);
        self.options.current_index = index;
        log::info!("Resolution set to {}", resolution.label());
        Ok(resolution)
    }

    /// Set the volume from a linear slider value. Returns the dB value sent
    /// to the mixer.
    pub fn set_volume(&mut self, volume: f32) -> Result<f32, SettingsError> {
        let db = linear_to_decibels(volume, self.config.min_linear_volume);
        if !self.mixer.set_float(&self.config.volume_parameter, db) {
            return Err(SettingsError::UnknownMixerParameter(
                self.config.volume_parameter.clone(),
            ));
        }
        log::debug!("Volume {:.4} -> {:.1} dB", volume, db);
        Ok(db)
    }

    pub fn set_quality(&mut self, index: usize) -> Result<(), SettingsError> {
        let count = self.display.quality_level_count();
        if index >= count {
            return Err(SettingsError::QualityIndexOutOfRange { index, count });
        }
        self.display.set_quality_level(index);
        log::info!("Quality level set to {}", index);
        Ok(())
    }

    pub fn set_fullscreen(&mut self, fullscreen: bool) {
        self.display.set_fullscreen(fullscreen);
        log::info!("Fullscreen {}", if fullscreen { "on" } else { "off" });
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    pub fn mixer(&self) -> &A {
        &self.mixer
    }
}
