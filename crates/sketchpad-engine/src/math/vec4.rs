use std::ops::Mul;

use super::Mat4;

/// Homogeneous 4-component vector.
///
/// Treated as a row vector when multiplied by a [`Mat4`]. `w` defaults to 1,
/// so a default-constructed vector is the point at the origin.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Vec4 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

impl Vec4 {
    #[inline]
    pub const fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }

    /// Point in the z = 0 plane (`w = 1`).
    #[inline]
    pub const fn point(x: f32, y: f32) -> Self {
        Self::new(x, y, 0.0, 1.0)
    }

    #[inline]
    pub fn dot(self, rhs: Vec4) -> f32 {
        dot(self, rhs)
    }

    #[inline]
    pub fn to_array(self) -> [f32; 4] {
        [self.x, self.y, self.z, self.w]
    }

    pub fn approx_eq(self, other: Vec4, eps: f32) -> bool {
        self.to_array()
            .iter()
            .zip(other.to_array().iter())
            .all(|(a, b)| (a - b).abs() <= eps)
    }
}

impl Default for Vec4 {
    fn default() -> Self {
        Self::point(0.0, 0.0)
    }
}

/// Four-component dot product.
#[inline]
pub fn dot(a: Vec4, b: Vec4) -> f32 {
    a.x * b.x + a.y * b.y + a.z * b.z + a.w * b.w
}

impl Mul<Mat4> for Vec4 {
    type Output = Vec4;

    /// Row vector times matrix: component `j` is `self · column j`.
    fn mul(self, m: Mat4) -> Vec4 {
        let col = |j: usize| {
            let [a, b, c, d] = m.col(j);
            dot(self, Vec4::new(a, b, c, d))
        };
        Vec4::new(col(0), col(1), col(2), col(3))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_origin_point() {
        assert_eq!(Vec4::default(), Vec4::new(0.0, 0.0, 0.0, 1.0));
    }

    #[test]
    fn dot_sums_all_four_components() {
        let a = Vec4::new(1.0, 2.0, 3.0, 4.0);
        let b = Vec4::new(-1.0, 0.5, 2.0, 0.25);
        assert_eq!(dot(a, b), -1.0 + 1.0 + 6.0 + 1.0);
        assert_eq!(a.dot(b), b.dot(a));
    }

    #[test]
    fn translation_moves_points_but_not_directions() {
        let t = Mat4::translation(5.0, -3.0);
        assert_eq!(Vec4::point(1.0, 1.0) * t, Vec4::point(6.0, -2.0));

        let dir = Vec4::new(1.0, 1.0, 0.0, 0.0);
        assert_eq!(dir * t, dir);
    }

    #[test]
    fn scale_then_translate_applies_left_to_right() {
        let m = Mat4::scale(2.0, 3.0) * Mat4::translation(1.0, 1.0);
        assert_eq!(Vec4::point(1.0, 1.0) * m, Vec4::point(3.0, 4.0));

        let m = Mat4::translation(1.0, 1.0) * Mat4::scale(2.0, 3.0);
        assert_eq!(Vec4::point(1.0, 1.0) * m, Vec4::point(4.0, 6.0));
    }

    #[test]
    fn product_is_associative_over_points() {
        let a = Mat4::translation(-2.0, 7.0);
        let b = Mat4::scale(0.1, 0.25);
        for &(x, y) in &[(0.0, 0.0), (1.0, -1.0), (-8.0, 10.0), (3.5, 2.25)] {
            let p = Vec4::point(x, y);
            let sequential = (p * a) * b;
            let composed = p * (a * b);
            assert!(sequential.approx_eq(composed, 1e-5), "{sequential:?} vs {composed:?}");
        }
    }
}
