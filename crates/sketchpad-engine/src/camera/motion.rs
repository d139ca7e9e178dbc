use crate::coords::Vec2;

/// Camera placement in world units.
///
/// `extent` is the full width/height of the visible world window; the
/// projection maps `center ± extent / 2` onto the clip range `[-1, 1]`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct CameraParams {
    pub center: Vec2,
    pub extent: Vec2,
}

impl CameraParams {
    #[inline]
    pub const fn new(center: Vec2, extent: Vec2) -> Self {
        Self { center, extent }
    }

    /// Extents must be strictly positive and finite.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.center.is_finite()
            && self.extent.is_finite()
            && self.extent.x > 0.0
            && self.extent.y > 0.0
    }
}

impl Default for CameraParams {
    /// Origin-centered 20 x 20 world window.
    fn default() -> Self {
        Self::new(Vec2::zero(), Vec2::new(20.0, 20.0))
    }
}

/// Time-driven camera placement.
///
/// `t` is the elapsed time in seconds since the runtime started.
pub trait CameraMotion {
    fn params_at(&self, t: f32) -> CameraParams;
}

/// Keeps the camera fixed at one placement.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Stationary(pub CameraParams);

impl CameraMotion for Stationary {
    fn params_at(&self, _t: f32) -> CameraParams {
        self.0
    }
}

impl<F> CameraMotion for F
where
    F: Fn(f32) -> CameraParams,
{
    fn params_at(&self, t: f32) -> CameraParams {
        self(t)
    }
}
