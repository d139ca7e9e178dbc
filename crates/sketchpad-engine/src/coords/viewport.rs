use super::Vec2;

/// Window size in logical pixels.
///
/// Pointer positions reported by the runtime are in the same space, so the
/// pixel -> NDC mapping is independent of the display scale factor.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    #[inline]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn is_valid(self) -> bool {
        self.width > 0.0 && self.height > 0.0 && self.width.is_finite() && self.height.is_finite()
    }

    /// Maps a window position to normalized device coordinates.
    ///
    /// `(0, 0)` (top-left) maps to `(-1, 1)`, `(width, height)` to `(1, -1)`.
    /// Returns `None` for a degenerate viewport (minimized window).
    pub fn pixel_to_ndc(self, px: f32, py: f32) -> Option<Vec2> {
        if !self.is_valid() {
            return None;
        }
        Some(Vec2::new(
            2.0 * px / self.width - 1.0,
            1.0 - 2.0 * py / self.height,
        ))
    }
}
