use std::fmt;

use crate::coords::Vec2;
use crate::math::{Mat4, Vec4};

use super::motion::{CameraMotion, CameraParams, Stationary};

/// Rejected camera placement (non-positive or non-finite extent).
#[derive(Debug, Clone, PartialEq)]
pub struct InvalidExtent {
    pub extent: Vec2,
}

impl fmt::Display for InvalidExtent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "camera extent must be positive and finite, got ({}, {})",
            self.extent.x, self.extent.y
        )
    }
}

impl std::error::Error for InvalidExtent {}

/// Orthographic 2D camera.
///
/// Holds the current [`CameraParams`] and the motion policy that recomputes
/// them in [`animate`](Self::animate). Matrices are derived on demand; they
/// are cheap and always consistent with the current parameters.
pub struct Camera2D {
    params: CameraParams,
    motion: Box<dyn CameraMotion>,
}

impl Camera2D {
    /// Creates a stationary camera at `params`.
    pub fn new(params: CameraParams) -> Result<Self, InvalidExtent> {
        if !params.is_valid() {
            return Err(InvalidExtent { extent: params.extent });
        }
        Ok(Self {
            params,
            motion: Box::new(Stationary(params)),
        })
    }

    /// Creates a camera driven by `motion`, placed at its `t = 0` parameters.
    pub fn with_motion(motion: impl CameraMotion + 'static) -> Result<Self, InvalidExtent> {
        let params = motion.params_at(0.0);
        let mut camera = Self::new(params)?;
        camera.motion = Box::new(motion);
        Ok(camera)
    }

    /// Replaces the motion policy. Takes effect on the next `animate`.
    pub fn set_motion(&mut self, motion: impl CameraMotion + 'static) {
        self.motion = Box::new(motion);
    }

    /// Recomputes the placement for elapsed time `t` (seconds).
    ///
    /// Invalid placements produced by the motion are ignored; the camera keeps
    /// its previous parameters.
    pub fn animate(&mut self, t: f32) {
        let next = self.motion.params_at(t);
        if next.is_valid() {
            self.params = next;
        } else {
            log::warn!(
                "camera motion produced invalid extent ({}, {}) at t={t}; keeping previous placement",
                next.extent.x,
                next.extent.y
            );
        }
    }

    #[inline]
    pub fn params(&self) -> CameraParams {
        self.params
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.params.center
    }

    #[inline]
    pub fn extent(&self) -> Vec2 {
        self.params.extent
    }

    /// Moves the camera center to the origin.
    pub fn view(&self) -> Mat4 {
        let c = self.params.center;
        Mat4::translation(-c.x, -c.y)
    }

    /// Scales the world window onto `[-1, 1]`.
    pub fn projection(&self) -> Mat4 {
        let e = self.params.extent;
        Mat4::scale(2.0 / e.x, 2.0 / e.y)
    }

    pub fn inverse_view(&self) -> Mat4 {
        let c = self.params.center;
        Mat4::translation(c.x, c.y)
    }

    pub fn inverse_projection(&self) -> Mat4 {
        let e = self.params.extent;
        Mat4::scale(e.x / 2.0, e.y / 2.0)
    }

    /// `view * projection`, the transform for geometry already in world space.
    #[inline]
    pub fn view_projection(&self) -> Mat4 {
        self.view() * self.projection()
    }

    /// Maps normalized device coordinates back into world space.
    pub fn ndc_to_world(&self, x: f32, y: f32) -> Vec2 {
        let w = Vec4::point(x, y) * self.inverse_projection() * self.inverse_view();
        Vec2::new(w.x, w.y)
    }

    /// Maps a world-space point into normalized device coordinates.
    pub fn world_to_ndc(&self, p: Vec2) -> Vec2 {
        let n = Vec4::point(p.x, p.y) * self.view_projection();
        Vec2::new(n.x, n.y)
    }
}

impl Default for Camera2D {
    fn default() -> Self {
        let params = CameraParams::default();
        Self {
            params,
            motion: Box::new(Stationary(params)),
        }
    }
}

impl fmt::Debug for Camera2D {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Camera2D")
            .field("params", &self.params)
            .finish_non_exhaustive()
    }
}
