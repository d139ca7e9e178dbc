//! 2D camera: world window placement, view/projection matrices and their
//! inverses.
//!
//! The camera is the only place that knows how world space maps to clip
//! space. Screen input goes the other way through [`Camera2D::ndc_to_world`].

mod camera2d;
mod motion;

pub use camera2d::{Camera2D, InvalidExtent};
pub use motion::{CameraMotion, CameraParams, Stationary};
