//! Panel fade controller
//!
//! Drives named menu panels between hidden and shown with a smooth opacity
//! approach. Interaction flags follow the requested target immediately,
//! while deactivation waits until the panel has faded out.
//!
//! Panels are addressed by name only. Requests for names that were never
//! registered are ignored without error: input handlers may fire for menus
//! that a particular scene does not contain.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::animation::smooth_damp;

/// Host-side object whose opacity and interactivity the controller drives
/// (a canvas group, a widget layer, ...).
pub trait PanelHandle {
    fn set_opacity(&mut self, opacity: f32);
    fn opacity(&self) -> f32;
    fn set_interactive(&mut self, interactive: bool);
    fn set_blocks_input(&mut self, blocks_input: bool);
    fn set_active(&mut self, active: bool);
}

impl<T: PanelHandle + ?Sized> PanelHandle for Box<T> {
    fn set_opacity(&mut self, opacity: f32) {
        (**self).set_opacity(opacity)
    }

    fn opacity(&self) -> f32 {
        (**self).opacity()
    }

    fn set_interactive(&mut self, interactive: bool) {
        (**self).set_interactive(interactive)
    }

    fn set_blocks_input(&mut self, blocks_input: bool) {
        (**self).set_blocks_input(blocks_input)
    }

    fn set_active(&mut self, active: bool) {
        (**self).set_active(active)
    }
}

/// Fade timing settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FadeConfig {
    /// Time constant of the opacity filter in seconds
    pub fade_duration: f32,
    /// Opacity distance below which a panel snaps to its target.
    /// Absolute, independent of `fade_duration`.
    pub transition_threshold: f32,
    /// Skip ticks entirely while no panel is fading
    pub disable_when_idle: bool,
}

impl FadeConfig {
    /// Used in place of a non-positive `fade_duration`.
    pub const MIN_FADE_DURATION: f32 = 0.01;

    /// Fade duration actually fed to the filter.
    pub fn smooth_time(&self) -> f32 {
        if self.fade_duration > 0.0 {
            self.fade_duration
        } else {
            Self::MIN_FADE_DURATION
        }
    }
}

impl Default for FadeConfig {
    fn default() -> Self {
        Self {
            fade_duration: 0.1,
            transition_threshold: 0.01,
            disable_when_idle: true,
        }
    }
}

/// Fade state of one panel
#[derive(Debug)]
struct Panel<H> {
    name: String,
    handle: H,
    current_opacity: f32,
    target_opacity: f32,
    velocity: f32,
}

impl<H: PanelHandle> Panel<H> {
    fn is_visible(&self) -> bool {
        self.current_opacity > 0.0 || self.target_opacity > 0.0
    }

    fn is_interactive(&self) -> bool {
        self.target_opacity > 0.0
    }

    /// Point the panel at a new target. The velocity only resets when the
    /// target actually changes, so a reversal starts from rest.
    /// Returns whether the target changed.
    fn retarget(&mut self, target: f32) -> bool {
        let changed = self.target_opacity != target;
        if changed {
            self.velocity = 0.0;
        }
        self.target_opacity = target;
        changed
    }

    /// Advance one tick. Returns true while the panel is still fading.
    fn step(&mut self, smooth_time: f32, threshold: f32, dt: f32) -> bool {
        // Threshold is checked on the pre-step distance so a panel that is
        // already close snaps on this tick instead of the next one.
        let distance = (self.current_opacity - self.target_opacity).abs();
        let transitioning = distance > threshold;

        let new_opacity = if transitioning {
            smooth_damp(
                self.current_opacity,
                self.target_opacity,
                &mut self.velocity,
                smooth_time,
                dt,
            )
        } else {
            self.velocity = 0.0;
            self.target_opacity
        };
        self.current_opacity = new_opacity.clamp(0.0, 1.0);
        self.handle.set_opacity(self.current_opacity);

        if self.target_opacity > 0.0 {
            self.handle.set_active(true);
            self.handle.set_interactive(true);
            self.handle.set_blocks_input(true);
        } else if self.current_opacity <= threshold {
            // Masks residual filter error before the panel goes away
            self.current_opacity = 0.0;
            self.handle.set_opacity(0.0);
            self.handle.set_interactive(false);
            self.handle.set_blocks_input(false);
            self.handle.set_active(false);
        }

        transitioning
    }
}

/// Owns a fixed set of named panels and fades them in and out.
///
/// The host calls [`FadeController::tick`] once per frame and routes input
/// events to [`FadeController::show`] / [`FadeController::hide`]. With
/// `disable_when_idle`, ticks are skipped while nothing is fading and the
/// next show/hide re-arms them.
#[derive(Debug)]
pub struct FadeController<H: PanelHandle> {
    config: FadeConfig,
    panels: Vec<Panel<H>>,
    index: HashMap<String, usize>,
    /// False while suspended by `disable_when_idle`
    ticking: bool,
    transitioning: bool,
}

impl<H: PanelHandle> FadeController<H> {
    /// Register panels from `(name, handle)` pairs.
    ///
    /// Every panel starts hidden: opacity 0, not interactive, inactive.
    /// A duplicate name keeps the first registration.
    pub fn new<N: Into<String>>(config: FadeConfig, panels: impl IntoIterator<Item = (N, H)>) -> Self {
        let mut registered = Vec::new();
        let mut index = HashMap::new();

        for (name, mut handle) in panels {
            let name = name.into();
            if index.contains_key(&name) {
                log::warn!("Duplicate menu panel '{}' ignored", name);
                continue;
            }

            handle.set_opacity(0.0);
            handle.set_interactive(false);
            handle.set_blocks_input(false);
            handle.set_active(false);

            index.insert(name.clone(), registered.len());
            registered.push(Panel {
                name,
                handle,
                current_opacity: 0.0,
                target_opacity: 0.0,
                velocity: 0.0,
            });
        }

        log::debug!("Fade controller registered {} panels", registered.len());

        Self {
            config,
            panels: registered,
            index,
            ticking: true,
            transitioning: false,
        }
    }

    pub fn config(&self) -> &FadeConfig {
        &self.config
    }

    fn find_mut(&mut self, name: &str) -> Option<&mut Panel<H>> {
        match self.index.get(name) {
            Some(&i) => Some(&mut self.panels[i]),
            None => {
                log::trace!("Ignoring request for unknown panel '{}'", name);
                None
            }
        }
    }

    fn find(&self, name: &str) -> Option<&Panel<H>> {
        self.index.get(name).map(|&i| &self.panels[i])
    }

    /// Fade a panel in. It becomes active and interactive right away.
    /// Unknown names are ignored.
    pub fn show(&mut self, name: &str) {
        let Some(panel) = self.find_mut(name) else {
            return;
        };

        let changed = panel.retarget(1.0);
        panel.handle.set_active(true);
        panel.handle.set_interactive(true);
        panel.handle.set_blocks_input(true);
        log::debug!("Show panel '{}'", name);

        self.ticking = true;
        self.transitioning |= changed;
    }

    /// Fade a panel out. It stops accepting input right away and is
    /// deactivated once fully transparent. Unknown names are ignored.
    pub fn hide(&mut self, name: &str) {
        let Some(panel) = self.find_mut(name) else {
            return;
        };

        let changed = panel.retarget(0.0);
        panel.handle.set_interactive(false);
        panel.handle.set_blocks_input(false);
        log::debug!("Hide panel '{}'", name);

        self.ticking = true;
        self.transitioning |= changed;
    }

    /// Advance all panels by `dt` seconds (negative values count as zero).
    ///
    /// Returns whether the controller wants further ticks.
    pub fn tick(&mut self, dt: f32) -> bool {
        if self.config.disable_when_idle && !self.ticking {
            return false;
        }

        let dt = dt.max(0.0);
        let smooth_time = self.config.smooth_time();
        let threshold = self.config.transition_threshold;

        let mut any_transitioning = false;
        for panel in &mut self.panels {
            any_transitioning |= panel.step(smooth_time, threshold, dt);
        }
        self.transitioning = any_transitioning;

        if self.config.disable_when_idle && !any_transitioning {
            log::trace!("All panels settled, suspending fade ticks");
            self.ticking = false;
        }

        !self.is_idle()
    }

    /// True while ticks are suspended.
    pub fn is_idle(&self) -> bool {
        self.config.disable_when_idle && !self.ticking
    }

    /// Whether any panel is fading: set by a show/hide that changes a
    /// target, recomputed on every tick.
    pub fn is_transitioning(&self) -> bool {
        self.transitioning
    }

    pub fn opacity(&self, name: &str) -> Option<f32> {
        self.find(name).map(|p| p.current_opacity)
    }

    pub fn target_opacity(&self, name: &str) -> Option<f32> {
        self.find(name).map(|p| p.target_opacity)
    }

    /// `false` for unknown names.
    pub fn is_interactive(&self, name: &str) -> bool {
        self.find(name).is_some_and(|p| p.is_interactive())
    }

    /// `false` for unknown names.
    pub fn is_visible(&self, name: &str) -> bool {
        self.find(name).is_some_and(|p| p.is_visible())
    }

    pub fn panel(&self, name: &str) -> Option<&H> {
        self.find(name).map(|p| &p.handle)
    }

    /// Panel names in registration order.
    pub fn panel_names(&self) -> impl Iterator<Item = &str> {
        self.panels.iter().map(|p| p.name.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::CanvasGroup;

    const FRAME: f32 = 1.0 / 60.0;

    fn controller(names: &[&str]) -> FadeController<CanvasGroup> {
        FadeController::new(
            FadeConfig::default(),
            names.iter().map(|n| (*n, CanvasGroup::default())),
        )
    }

    fn run<H: PanelHandle>(fade: &mut FadeController<H>, seconds: f32) {
        let frames = (seconds / FRAME).ceil() as usize;
        for _ in 0..frames {
            fade.tick(FRAME);
        }
    }

    #[test]
    fn test_panels_start_hidden() {
        let mut group = CanvasGroup::default();
        group.alpha = 0.7;
        group.active = true;
        group.interactable = true;

        let fade = FadeController::new(FadeConfig::default(), [("Main", group)]);

        let panel = fade.panel("Main").unwrap();
        assert_eq!(panel.alpha, 0.0);
        assert!(!panel.active);
        assert!(!panel.interactable);
        assert!(!panel.blocks_raycasts);
        assert!(!fade.is_visible("Main"));
    }

    #[test]
    fn test_show_is_interactive_immediately() {
        let config = FadeConfig {
            fade_duration: 10.0,
            ..FadeConfig::default()
        };
        let mut fade = FadeController::new(config, [("Main", CanvasGroup::default())]);

        fade.show("Main");
        assert!(fade.is_interactive("Main"));
        assert!(fade.is_visible("Main"));
        let panel = fade.panel("Main").unwrap();
        assert!(panel.active);
        assert!(panel.interactable);
        assert!(panel.blocks_raycasts);

        fade.tick(FRAME);
        assert!(fade.opacity("Main").unwrap() < 0.01);
        assert!(fade.is_interactive("Main"));
    }

    #[test]
    fn test_hide_stops_interaction_immediately() {
        let mut fade = controller(&["Main"]);
        fade.show("Main");
        run(&mut fade, 1.0);

        fade.hide("Main");
        assert!(!fade.is_interactive("Main"));
        assert!(fade.is_visible("Main"));
        let panel = fade.panel("Main").unwrap();
        assert!(!panel.interactable);
        assert!(!panel.blocks_raycasts);
        // Still shown until the fade completes
        assert!(panel.active);
    }

    #[test]
    fn test_converges_exactly() {
        let mut fade = controller(&["Main"]);
        fade.show("Main");
        run(&mut fade, 1.0);
        assert_eq!(fade.opacity("Main"), Some(1.0));

        fade.hide("Main");
        run(&mut fade, 1.0);
        assert_eq!(fade.opacity("Main"), Some(0.0));
        assert!(!fade.is_visible("Main"));
        assert!(!fade.panel("Main").unwrap().active);
    }

    #[test]
    fn test_close_panel_snaps_on_first_tick() {
        let config = FadeConfig {
            transition_threshold: 0.5,
            ..FadeConfig::default()
        };
        let mut fade = FadeController::new(config, [("Main", CanvasGroup::default())]);
        fade.show("Main");

        // Distance 1.0 > 0.5: filter step
        fade.tick(FRAME);
        let first = fade.opacity("Main").unwrap();
        assert!(first > 0.0 && first < 1.0);

        // Keep stepping until within threshold, then one tick must snap
        while 1.0 - fade.opacity("Main").unwrap() > 0.5 {
            fade.tick(FRAME);
        }
        fade.tick(FRAME);
        assert_eq!(fade.opacity("Main"), Some(1.0));
    }

    #[test]
    fn test_show_twice_is_idempotent() {
        let mut once = controller(&["Main"]);
        let mut twice = controller(&["Main"]);

        once.show("Main");
        twice.show("Main");
        for _ in 0..3 {
            once.tick(FRAME);
            twice.tick(FRAME);
        }

        once.show("Main");
        twice.show("Main");
        twice.show("Main");
        once.tick(FRAME);
        twice.tick(FRAME);

        assert_eq!(once.opacity("Main"), twice.opacity("Main"));
        assert_eq!(once.is_interactive("Main"), twice.is_interactive("Main"));
    }

    #[test]
    fn test_show_on_visible_panel_does_not_jump() {
        let mut fade = controller(&["Main"]);
        fade.show("Main");
        for _ in 0..3 {
            fade.tick(FRAME);
        }
        let before = fade.opacity("Main").unwrap();

        fade.show("Main");
        assert_eq!(fade.opacity("Main"), Some(before));
    }

    #[test]
    fn test_reversal_is_monotonic() {
        let mut fade = controller(&["A"]);
        fade.show("A");
        while fade.opacity("A").unwrap() < 0.5 {
            fade.tick(FRAME);
        }

        fade.hide("A");
        let mut previous = fade.opacity("A").unwrap();
        for _ in 0..120 {
            fade.tick(FRAME);
            let current = fade.opacity("A").unwrap();
            assert!(current <= previous, "{current} > {previous}");
            assert!((0.0..=1.0).contains(&current));
            previous = current;
        }
        assert_eq!(previous, 0.0);
    }

    #[test]
    fn test_unknown_names_are_ignored() {
        let mut fade = controller(&["Main"]);
        run(&mut fade, 0.1);
        assert!(fade.is_idle());

        fade.show("nonexistent");
        fade.hide("nonexistent");

        assert!(fade.is_idle());
        assert_eq!(fade.opacity("Main"), Some(0.0));
        assert_eq!(fade.opacity("nonexistent"), None);
        assert!(!fade.is_interactive("nonexistent"));
        assert!(!fade.is_visible("nonexistent"));
    }

    #[test]
    fn test_idle_ticks_are_noops() {
        let mut fade = controller(&["Main"]);
        fade.show("Main");
        run(&mut fade, 1.0);
        assert!(fade.is_idle());

        // Host changes the alpha behind our back; an idle tick must not touch it
        fade.panels[0].handle.alpha = 0.5;
        assert!(!fade.tick(FRAME));
        assert_eq!(fade.panel("Main").unwrap().alpha, 0.5);
        assert_eq!(fade.opacity("Main"), Some(1.0));

        fade.hide("Main");
        assert!(!fade.is_idle());
        assert!(fade.tick(FRAME));
    }

    #[test]
    fn test_without_idle_suspension_always_ticks() {
        let config = FadeConfig {
            disable_when_idle: false,
            ..FadeConfig::default()
        };
        let mut fade = FadeController::new(config, [("Main", CanvasGroup::default())]);
        run(&mut fade, 1.0);
        assert!(!fade.is_idle());
        assert!(fade.tick(FRAME));
        assert!(!fade.is_transitioning());
    }

    #[test]
    fn test_non_positive_duration_uses_floor() {
        let config = FadeConfig {
            fade_duration: 0.0,
            ..FadeConfig::default()
        };
        assert_eq!(config.smooth_time(), FadeConfig::MIN_FADE_DURATION);

        let mut fade = FadeController::new(config, [("Main", CanvasGroup::default())]);
        fade.show("Main");
        for _ in 0..10 {
            fade.tick(FRAME);
            assert!(fade.opacity("Main").unwrap().is_finite());
        }
        assert_eq!(fade.opacity("Main"), Some(1.0));
    }

    #[test]
    fn test_infinite_dt_keeps_opacity_in_range() {
        let mut fade = controller(&["Main"]);
        fade.show("Main");
        fade.tick(f32::INFINITY);

        let opacity = fade.opacity("Main").unwrap();
        assert!((0.0..=1.0).contains(&opacity), "opacity {opacity}");
        assert_eq!(fade.panel("Main").unwrap().alpha, opacity);

        fade.hide("Main");
        fade.tick(f32::INFINITY);
        fade.tick(f32::NAN);
        assert_eq!(fade.opacity("Main"), Some(0.0));
        assert!(!fade.panel("Main").unwrap().active);
    }

    #[test]
    fn test_request_marks_transitioning_before_tick() {
        let mut fade = controller(&["Main"]);
        fade.show("Main");
        run(&mut fade, 1.0);
        assert!(!fade.is_transitioning());

        // Same target again: nothing to fade
        fade.show("Main");
        assert!(!fade.is_transitioning());

        fade.hide("Main");
        assert!(fade.is_transitioning());

        // Unknown names leave it alone
        run(&mut fade, 1.0);
        fade.hide("nonexistent");
        assert!(!fade.is_transitioning());
    }

    #[test]
    fn test_negative_dt_clamped() {
        let mut fade = controller(&["Main"]);
        fade.show("Main");
        fade.tick(FRAME);
        let before = fade.opacity("Main").unwrap();

        fade.tick(-1.0);
        assert_eq!(fade.opacity("Main"), Some(before));
    }

    #[test]
    fn test_duplicate_name_keeps_first() {
        let mut first = CanvasGroup::default();
        first.label = "first".into();
        let mut second = CanvasGroup::default();
        second.label = "second".into();

        let fade = FadeController::new(FadeConfig::default(), [("Main", first), ("Main", second)]);
        assert_eq!(fade.panel_names().count(), 1);
        assert_eq!(fade.panel("Main").unwrap().label, "first");
    }

    #[test]
    fn test_boxed_handles() {
        let panels: Vec<(&str, Box<dyn PanelHandle>)> = vec![
            ("Main", Box::new(CanvasGroup::default())),
            ("Shop", Box::new(CanvasGroup::default())),
        ];
        let mut fade = FadeController::new(FadeConfig::default(), panels);
        fade.show("Shop");
        run(&mut fade, 1.0);
        assert_eq!(fade.panel("Shop").map(|p| p.opacity()), Some(1.0));
        assert_eq!(fade.panel("Main").map(|p| p.opacity()), Some(0.0));
    }
}
