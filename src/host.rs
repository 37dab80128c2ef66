//! In-memory host objects
//!
//! Stand-ins for the engine side of the menu: a canvas group per panel, a
//! display with a fixed mode list, an audio mixer with exposed parameters
//! and a mesh with a material list. Used by the CLI and by tests.

use std::collections::HashMap;

use crate::ui::{AudioMixer, DisplayBackend, MaterialSlots, PanelHandle, Resolution};

/// Panel state as a UI toolkit would hold it
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CanvasGroup {
    /// Free-form tag for identifying the group in logs
    pub label: String,
    pub alpha: f32,
    pub interactable: bool,
    pub blocks_raycasts: bool,
    pub active: bool,
}

impl PanelHandle for CanvasGroup {
    fn set_opacity(&mut self, opacity: f32) {
        self.alpha = opacity;
    }

    fn opacity(&self) -> f32 {
        self.alpha
    }

    fn set_interactive(&mut self, interactive: bool) {
        self.interactable = interactive;
    }

    fn set_blocks_input(&mut self, blocks_input: bool) {
        self.blocks_raycasts = blocks_input;
    }

    fn set_active(&mut self, active: bool) {
        if self.active != active {
            log::trace!(
                "Canvas group '{}' {}",
                self.label,
                if active { "activated" } else { "deactivated" }
            );
        }
        self.active = active;
    }
}

/// Number of quality presets a default headless display offers
pub const DEFAULT_QUALITY_LEVELS: usize = 6;

/// Display with a fixed list of modes
#[derive(Debug, Clone)]
pub struct HeadlessDisplay {
    modes: Vec<Resolution>,
    size: (u32, u32),
    fullscreen: bool,
    quality_levels: usize,
    quality_level: usize,
}

impl HeadlessDisplay {
    pub fn new(modes: Vec<Resolution>, size: (u32, u32)) -> Self {
        Self {
            modes,
            size,
            fullscreen: false,
            quality_levels: DEFAULT_QUALITY_LEVELS,
            quality_level: DEFAULT_QUALITY_LEVELS - 1,
        }
    }

    /// A typical desktop monitor: common 16:9 and 4:3 sizes at 60/144 Hz.
    pub fn desktop() -> Self {
        let mut modes = Vec::new();
        for (w, h) in [(800, 600), (1280, 720), (1600, 900), (1920, 1080), (2560, 1440)] {
            modes.push(Resolution::new(w, h, 60));
            modes.push(Resolution::new(w, h, 144));
        }
        Self::new(modes, (1920, 1080))
    }

    pub fn quality_level(&self) -> usize {
        self.quality_level
    }
}

impl DisplayBackend for HeadlessDisplay {
    fn resolutions(&self) -> Vec<Resolution> {
        self.modes.clone()
    }

    fn current_size(&self) -> (u32, u32) {
        self.size
    }

    fn is_fullscreen(&self) -> bool {
        self.fullscreen
    }

    fn set_resolution(&mut self, width: u32, height: u32, fullscreen: bool) {
        self.size = (width, height);
        self.fullscreen = fullscreen;
    }

    fn set_fullscreen(&mut self, fullscreen: bool) {
        self.fullscreen = fullscreen;
    }

    fn quality_level_count(&self) -> usize {
        self.quality_levels
    }

    fn set_quality_level(&mut self, index: usize) {
        self.quality_level = index;
    }
}

/// Mixer holding named float parameters
#[derive(Debug, Clone, Default)]
pub struct HeadlessMixer {
    parameters: HashMap<String, f32>,
}

impl HeadlessMixer {
    /// Mixer exposing a single parameter, initially 0 dB.
    pub fn with_parameter(name: &str) -> Self {
        let mut parameters = HashMap::new();
        parameters.insert(name.to_string(), 0.0);
        Self { parameters }
    }

    pub fn get(&self, name: &str) -> Option<f32> {
        self.parameters.get(name).copied()
    }
}

impl AudioMixer for HeadlessMixer {
    fn set_float(&mut self, name: &str, value: f32) -> bool {
        match self.parameters.get_mut(name) {
            Some(slot) => {
                *slot = value;
                true
            }
            None => false,
        }
    }
}

/// Mesh with a list of material names
#[derive(Debug, Clone, Default)]
pub struct MeshSlots {
    materials: Vec<String>,
}

impl MeshSlots {
    pub fn new(materials: Vec<String>) -> Self {
        Self { materials }
    }
}

impl MaterialSlots for MeshSlots {
    type Material = String;

    fn materials(&self) -> Vec<String> {
        self.materials.clone()
    }

    fn set_materials(&mut self, materials: Vec<String>) {
        self.materials = materials;
    }
}
