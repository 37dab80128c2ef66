//! Camera rig that eases between fixed viewpoints.

use glam::Vec3;

use super::smooth_damp::smooth_damp_vec3;

/// Camera position eased toward a target viewpoint.
///
/// The rig does not own a camera; the host copies [`CameraRig::position`]
/// onto its camera transform after each [`CameraRig::update`].
#[derive(Debug, Clone)]
pub struct CameraRig {
    /// Current position (world coordinates)
    position: Vec3,
    /// Viewpoint the rig is easing toward
    target: Vec3,
    /// Filter velocity carried between frames
    velocity: Vec3,
    /// Time constant of the approach in seconds.
    /// Roughly the time it takes to cover most of the remaining distance.
    smooth_time: f32,
}

impl CameraRig {
    /// Create a rig resting at `initial_pos`.
    pub fn new(initial_pos: Vec3) -> Self {
        Self {
            position: initial_pos,
            target: initial_pos,
            velocity: Vec3::ZERO,
            smooth_time: 1.0,
        }
    }

    /// Set the smoothing time constant.
    ///
    /// Lower values = snappier camera, higher values = floatier camera.
    pub fn set_smooth_time(&mut self, smooth_time: f32) {
        self.smooth_time = smooth_time.max(0.001);
    }

    pub fn smooth_time(&self) -> f32 {
        self.smooth_time
    }

    /// Start easing toward a new viewpoint.
    ///
    /// Retargeting mid-flight keeps the current velocity, so the camera
    /// bends toward the new viewpoint instead of stopping.
    pub fn move_to(&mut self, target: Vec3) {
        log::debug!("Camera target {:?} -> {:?}", self.target, target);
        self.target = target;
    }

    /// Set position immediately without easing.
    pub fn set_position_immediate(&mut self, pos: Vec3) {
        self.position = pos;
        self.target = pos;
        self.velocity = Vec3::ZERO;
    }

    /// Advance the easing by `dt` seconds (negative values count as zero).
    pub fn update(&mut self, dt: f32) {
        let dt = dt.max(0.0);
        self.position = smooth_damp_vec3(
            self.position,
            self.target,
            &mut self.velocity,
            self.smooth_time,
            dt,
        );
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn target(&self) -> Vec3 {
        self.target
    }

    /// Whether the camera is within `epsilon` of its target.
    pub fn is_settled(&self, epsilon: f32) -> bool {
        self.position.distance(self.target) <= epsilon
    }
}
