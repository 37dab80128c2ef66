//! Main menu flow: panel fades plus camera viewpoints

use glam::Vec3;

use super::button::MenuAction;
use super::fade::{FadeController, PanelHandle};
use crate::animation::CameraRig;
use crate::config::MenuConfig;

/// Title screen panel, shown on start
pub const MAIN_MENU: &str = "MainMenu";
/// Panel shown while the camera looks at the bookshelf
pub const BOOKSHELF_MENU: &str = "BookshelfMenu";
pub const OPTIONS_MENU: &str = "OptionsMenu";

/// Whether the host should keep running after an action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuFlow {
    Continue,
    Quit,
}

/// Main menu state: which panels are shown and where the camera looks.
#[derive(Debug)]
pub struct MainMenu<H: PanelHandle> {
    fade: FadeController<H>,
    camera: CameraRig,
    start_position: Vec3,
    bookshelf_position: Vec3,
}

impl<H: PanelHandle> MainMenu<H> {
    /// `camera_position` is where the camera sits when the menu loads; the
    /// Back action returns there.
    pub fn new<N: Into<String>>(
        config: &MenuConfig,
        panels: impl IntoIterator<Item = (N, H)>,
        camera_position: Vec3,
    ) -> Self {
        let mut camera = CameraRig::new(camera_position);
        camera.set_smooth_time(config.camera.smooth_time);

        Self {
            fade: FadeController::new(config.fade, panels),
            camera,
            start_position: camera_position,
            bookshelf_position: config.camera.bookshelf_position,
        }
    }

    /// Bring up the title screen.
    pub fn start(&mut self) {
        self.fade.show(MAIN_MENU);
    }

    pub fn apply(&mut self, action: MenuAction) -> MenuFlow {
        log::info!("Menu action: {}", action);

        match action {
            MenuAction::Play => {
                self.fade.hide(MAIN_MENU);
                self.fade.show(BOOKSHELF_MENU);
                self.camera.move_to(self.bookshelf_position);
            }
            MenuAction::Back => {
                self.fade.hide(BOOKSHELF_MENU);
                self.fade.show(MAIN_MENU);
                self.camera.move_to(self.start_position);
            }
            MenuAction::OpenOptions => self.fade.show(OPTIONS_MENU),
            MenuAction::CloseOptions => self.fade.hide(OPTIONS_MENU),
            MenuAction::Exit => return MenuFlow::Quit,
        }

        MenuFlow::Continue
    }

    /// Advance fades and camera by one frame.
    pub fn tick(&mut self, dt: f32) {
        self.fade.tick(dt);
        self.camera.update(dt);
    }

    pub fn fade(&self) -> &FadeController<H> {
        &self.fade
    }

    pub fn fade_mut(&mut self) -> &mut FadeController<H> {
        &mut self.fade
    }

    pub fn camera(&self) -> &CameraRig {
        &self.camera
    }

    /// True once no panel is fading and the camera has arrived.
    pub fn is_settled(&self) -> bool {
        !self.fade.is_transitioning() && self.camera.is_settled(1e-3)
    }
}
