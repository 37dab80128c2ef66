//! Menu button press feedback and actions

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Action bound to a menu button
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MenuAction {
    /// Leave the title screen for the bookshelf
    Play,
    /// Return from the bookshelf to the title screen
    Back,
    OpenOptions,
    CloseOptions,
    /// Quit the application
    Exit,
}

impl MenuAction {
    pub const ALL: [MenuAction; 5] = [
        MenuAction::Play,
        MenuAction::Back,
        MenuAction::OpenOptions,
        MenuAction::CloseOptions,
        MenuAction::Exit,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MenuAction::Play => "play",
            MenuAction::Back => "back",
            MenuAction::OpenOptions => "open-options",
            MenuAction::CloseOptions => "close-options",
            MenuAction::Exit => "exit",
        }
    }
}

impl std::fmt::Display for MenuAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MenuAction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_lowercase();
        MenuAction::ALL
            .into_iter()
            .find(|a| a.as_str() == s)
            .ok_or_else(|| {
                let valid: Vec<&str> = MenuAction::ALL.iter().map(|a| a.as_str()).collect();
                format!("Unknown menu action '{}' (expected one of: {})", s, valid.join(", "))
            })
    }
}

/// Button press settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ButtonConfig {
    /// How far the label sinks while pressed, before vertical scaling
    pub press_depth: f32,
}

impl Default for ButtonConfig {
    fn default() -> Self {
        Self { press_depth: 20.0 }
    }
}

/// Pointer state of a single button and the resulting label offset.
///
/// The label sits `press_depth * scale_y` lower while the button is both
/// pressed and hovered. Every event returns the vertical delta the host
/// applies to the label, so the label always ends up where the state says
/// it should be, no matter how events interleave.
#[derive(Debug, Clone)]
pub struct ButtonFeedback {
    press_depth: f32,
    scale_y: f32,
    hovering: bool,
    pressed: bool,
    applied_offset: f32,
}

impl ButtonFeedback {
    pub fn new(config: ButtonConfig, scale_y: f32) -> Self {
        Self {
            press_depth: config.press_depth,
            scale_y,
            hovering: false,
            pressed: false,
            applied_offset: 0.0,
        }
    }

    /// Label offset for the current state (negative = down).
    pub fn label_offset(&self) -> f32 {
        if self.pressed && self.hovering {
            -self.press_depth * self.scale_y
        } else {
            0.0
        }
    }

    fn sync(&mut self) -> f32 {
        let offset = self.label_offset();
        let delta = offset - self.applied_offset;
        self.applied_offset = offset;
        delta
    }

    /// A press always starts over the button.
    pub fn pointer_down(&mut self) -> f32 {
        self.pressed = true;
        self.hovering = true;
        self.sync()
    }

    pub fn pointer_up(&mut self) -> f32 {
        self.pressed = false;
        self.sync()
    }

    /// `pressed_here` is true when the pointer re-enters while still holding
    /// a press that started on this button.
    pub fn pointer_enter(&mut self, pressed_here: bool) -> f32 {
        self.hovering = true;
        self.pressed = pressed_here;
        self.sync()
    }

    pub fn pointer_exit(&mut self) -> f32 {
        self.hovering = false;
        self.sync()
    }

    /// Button got disabled (e.g. its panel faded out): release everything.
    pub fn disable(&mut self) -> f32 {
        self.pressed = false;
        self.hovering = false;
        self.sync()
    }

    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    pub fn is_hovering(&self) -> bool {
        self.hovering
    }
}
