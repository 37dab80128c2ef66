use clap::Parser;
use std::path::PathBuf;

use shelf_menu::host::{CanvasGroup, HeadlessDisplay, HeadlessMixer};
use shelf_menu::prelude::*;
use shelf_menu::ui::{SettingsMenu, BOOKSHELF_MENU, MAIN_MENU, OPTIONS_MENU};
use shelf_menu::MenuConfig;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// RON config file (defaults to ./menu.ron if present)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Comma-separated menu actions to replay: play, back, open-options, close-options, exit
    #[arg(long, value_delimiter = ',', default_value = "play,back,open-options,close-options")]
    actions: Vec<MenuAction>,

    /// Simulated frames per second
    #[arg(long, default_value = "60")]
    fps: u32,

    /// Simulated seconds after each action
    #[arg(long, default_value = "1.0")]
    seconds: f32,

    /// Log panel opacities every frame
    #[arg(long)]
    trace: bool,

    /// Apply this linear volume (0..1) through the settings panel
    #[arg(long)]
    volume: Option<f32>,

    /// Apply this resolution dropdown index through the settings panel
    #[arg(long)]
    resolution: Option<usize>,

    /// Print the effective configuration as RON and exit
    #[arg(long)]
    print_config: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    // Parse command-line arguments
    let args = Args::parse();

    let config = MenuConfig::load_from(args.config.as_deref())?;

    if args.print_config {
        println!("{}", config.to_ron()?);
        return Ok(());
    }

    if args.fps == 0 {
        eprintln!("Error: --fps must be at least 1");
        std::process::exit(1);
    }

    log::info!("Starting Shelf Menu replay");

    if args.volume.is_some() || args.resolution.is_some() {
        run_settings(&config, &args)?;
    }

    run_menu(&config, &args);
    Ok(())
}

fn run_settings(config: &MenuConfig, args: &Args) -> anyhow::Result<()> {
    let mut settings = SettingsMenu::new(
        HeadlessDisplay::desktop(),
        HeadlessMixer::with_parameter(&config.settings.volume_parameter),
        config.settings.clone(),
    );

    let options = settings.resolution_options();
    for (i, label) in options.labels.iter().enumerate() {
        let marker = if i == options.current_index { "*" } else { " " };
        println!("{} [{}] {}", marker, i, label);
    }

    if let Some(index) = args.resolution {
        let applied = settings.set_resolution(index)?;
        println!("Resolution: {}", applied.label());
    }

    if let Some(volume) = args.volume {
        let db = settings.set_volume(volume)?;
        println!("Volume: {:.3} -> {:.1} dB", volume, db);
    }

    Ok(())
}

fn run_menu(config: &MenuConfig, args: &Args) {
    let panels = [MAIN_MENU, BOOKSHELF_MENU, OPTIONS_MENU].map(|name| {
        let group = CanvasGroup {
            label: name.to_string(),
            ..CanvasGroup::default()
        };
        (name, group)
    });

    let mut menu = MainMenu::new(config, panels, Vec3::new(0.0, 1.5, 5.0));
    menu.start();

    let dt = 1.0 / args.fps as f32;
    let frames = (args.seconds.max(0.0) * args.fps as f32).ceil() as usize;

    simulate(&mut menu, dt, frames, args.trace);
    for action in &args.actions {
        if menu.apply(*action) == MenuFlow::Quit {
            log::info!("Exit requested, stopping replay");
            break;
        }
        simulate(&mut menu, dt, frames, args.trace);
    }

    print_summary(&menu);
}

fn simulate(menu: &mut MainMenu<CanvasGroup>, dt: f32, frames: usize, trace: bool) {
    for frame in 0..frames {
        menu.tick(dt);
        if trace {
            let opacities: Vec<String> = menu
                .fade()
                .panel_names()
                .map(|name| format!("{}={:.3}", name, menu.fade().opacity(name).unwrap_or(0.0)))
                .collect();
            log::info!("Frame {}: {}", frame, opacities.join(" "));
        }
    }
}

fn print_summary(menu: &MainMenu<CanvasGroup>) {
    let fade = menu.fade();
    for name in fade.panel_names() {
        if let Some(group) = fade.panel(name) {
            println!(
                "{:<14} alpha={:.3} active={} interactable={}",
                name, group.alpha, group.active, group.interactable
            );
        }
    }
    let pos = menu.camera().position();
    println!("Camera         ({:.3}, {:.3}, {:.3})", pos.x, pos.y, pos.z);
    println!("Settled        {}", menu.is_settled());
}
