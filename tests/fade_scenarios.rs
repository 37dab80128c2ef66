//! End-to-end fade scenarios driven the way a host frame loop would.

use shelf_menu::host::CanvasGroup;
use shelf_menu::ui::{FadeConfig, FadeController, PanelHandle};

// ============================================================================
// Helpers
// ============================================================================

fn shop_controller(config: FadeConfig) -> FadeController<CanvasGroup> {
    FadeController::new(
        config,
        [("Main", CanvasGroup::default()), ("Shop", CanvasGroup::default())],
    )
}

/// Tick in 60 equal frames covering `seconds`.
fn tick_for(fade: &mut FadeController<CanvasGroup>, seconds: f32) {
    let dt = seconds / 60.0;
    for _ in 0..60 {
        fade.tick(dt);
    }
}

fn tick_until_idle(fade: &mut FadeController<CanvasGroup>) -> usize {
    let mut frames = 0;
    while fade.tick(1.0 / 60.0) {
        frames += 1;
        assert!(frames < 10_000, "fade never settled");
    }
    frames
}

// ============================================================================
// Scenarios
// ============================================================================

#[test]
fn test_main_to_shop_swap() {
    let config = FadeConfig::default();
    let mut fade = shop_controller(config);

    fade.show("Main");
    tick_for(&mut fade, 10.0 * config.fade_duration);

    assert_eq!(fade.opacity("Main"), Some(1.0));
    assert!(fade.is_interactive("Main"));
    assert_eq!(fade.opacity("Shop"), Some(0.0));

    fade.show("Shop");
    fade.hide("Main");
    tick_until_idle(&mut fade);

    let main = fade.panel("Main").unwrap();
    assert_eq!(main.alpha, 0.0);
    assert!(!main.active);
    assert!(!main.interactable);

    let shop = fade.panel("Shop").unwrap();
    assert_eq!(shop.alpha, 1.0);
    assert!(shop.active);
    assert!(shop.interactable);
    assert!(shop.blocks_raycasts);
}

#[test]
fn test_arbitrary_sequences_converge() {
    let mut fade = shop_controller(FadeConfig::default());
    let script: &[(&str, bool)] = &[
        ("Main", true),
        ("Shop", true),
        ("Main", false),
        ("Shop", false),
        ("Shop", true),
        ("Main", true),
        ("Main", false),
    ];

    for (i, (name, show)) in script.iter().enumerate() {
        if *show {
            fade.show(name);
        } else {
            fade.hide(name);
        }
        // Interrupt mid-fade on every other step
        let frames = if i % 2 == 0 { 3 } else { 1 };
        for _ in 0..frames {
            fade.tick(1.0 / 60.0);
        }
    }
    tick_until_idle(&mut fade);

    for name in ["Main", "Shop"] {
        let target = fade.target_opacity(name).unwrap();
        assert_eq!(fade.opacity(name), Some(target));
        let group = fade.panel(name).unwrap();
        assert_eq!(group.active, target > 0.0);
        assert_eq!(group.interactable, target > 0.0);
        assert_eq!(group.blocks_raycasts, target > 0.0);
    }
}

#[test]
fn test_hidden_panels_have_no_residual_alpha() {
    let mut fade = shop_controller(FadeConfig::default());
    fade.show("Shop");
    for _ in 0..5 {
        fade.tick(1.0 / 60.0);
    }
    fade.hide("Shop");
    tick_until_idle(&mut fade);

    assert!(!fade.is_visible("Shop"));
    assert_eq!(fade.panel("Shop").unwrap().opacity(), 0.0);
}

#[test]
fn test_opacity_always_in_range() {
    let config = FadeConfig {
        fade_duration: 0.05,
        ..FadeConfig::default()
    };
    let mut fade = shop_controller(config);

    for step in 0..400 {
        match step % 37 {
            0 => fade.show("Main"),
            11 => fade.hide("Main"),
            19 => fade.show("Shop"),
            29 => fade.hide("Shop"),
            _ => {}
        }
        // Uneven frame times, including a long hitch
        let dt = if step % 50 == 0 { 0.5 } else { 1.0 / 144.0 };
        fade.tick(dt);

        for name in ["Main", "Shop"] {
            let opacity = fade.opacity(name).unwrap();
            assert!((0.0..=1.0).contains(&opacity), "{name} at {opacity}");
            if !fade.is_visible(name) {
                assert_eq!(opacity, 0.0);
            }
        }
    }
}

#[test]
fn test_idle_controller_ignores_ticks_until_rearmed() {
    let mut fade = shop_controller(FadeConfig::default());
    fade.show("Main");
    tick_until_idle(&mut fade);
    assert!(fade.is_idle());

    let snapshot: Vec<CanvasGroup> = ["Main", "Shop"]
        .iter()
        .map(|n| fade.panel(n).unwrap().clone())
        .collect();
    for _ in 0..100 {
        assert!(!fade.tick(1.0 / 60.0));
    }
    let after: Vec<CanvasGroup> = ["Main", "Shop"]
        .iter()
        .map(|n| fade.panel(n).unwrap().clone())
        .collect();
    assert_eq!(snapshot, after);

    // Re-showing a fully shown panel only re-arms ticking
    fade.show("Main");
    assert!(!fade.is_idle());
    assert_eq!(fade.opacity("Main"), Some(1.0));
    assert_eq!(tick_until_idle(&mut fade), 0);
    assert_eq!(fade.opacity("Main"), Some(1.0));
}
