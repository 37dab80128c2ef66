//! Smoothing primitives for menu transitions.
//!
//! Provides the critically damped `smooth_damp` step and `CameraRig`,
//! which eases the camera between menu viewpoints.

mod camera;
mod smooth_damp;

pub use camera::CameraRig;
pub use smooth_damp::{smooth_damp, smooth_damp_vec3, MIN_SMOOTH_TIME};
