use std::ops::Mul;

use bytemuck::{Pod, Zeroable};

/// 4x4 matrix, row-major, row-vector convention.
///
/// A row vector `v` is transformed as `v * M`, so the translation lives in the
/// last row. Composition reads left to right: `v * (A * B)` applies `A` first,
/// then `B`.
///
/// GPU layout: the sixteen floats are uploaded as-is. WGSL reads them as
/// column-major, i.e. each CPU row becomes a WGSL column, so the shader-side
/// `mvp * v` computes the same row-vector product as [`Vec4`](super::Vec4)`* Mat4`.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct Mat4 {
    pub m: [[f32; 4]; 4],
}

impl Mat4 {
    pub const IDENTITY: Mat4 = Mat4::from_rows([
        [1.0, 0.0, 0.0, 0.0],
        [0.0, 1.0, 0.0, 0.0],
        [0.0, 0.0, 1.0, 0.0],
        [0.0, 0.0, 0.0, 1.0],
    ]);

    #[inline]
    pub const fn from_rows(m: [[f32; 4]; 4]) -> Self {
        Self { m }
    }

    /// Translation in the xy plane.
    #[inline]
    pub const fn translation(tx: f32, ty: f32) -> Self {
        Self::from_rows([
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [tx,  ty,  0.0, 1.0],
        ])
    }

    /// Non-uniform scale in the xy plane; z and w pass through.
    #[inline]
    pub const fn scale(sx: f32, sy: f32) -> Self {
        Self::from_rows([
            [sx,  0.0, 0.0, 0.0],
            [0.0, sy,  0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    #[inline]
    pub fn row(&self, i: usize) -> [f32; 4] {
        self.m[i]
    }

    #[inline]
    pub fn col(&self, j: usize) -> [f32; 4] {
        [self.m[0][j], self.m[1][j], self.m[2][j], self.m[3][j]]
    }

    pub fn transpose(&self) -> Self {
        let mut out = Mat4::zeroed();
        for i in 0..4 {
            for j in 0..4 {
                out.m[i][j] = self.m[j][i];
            }
        }
        out
    }

    /// Element-wise comparison with an absolute tolerance.
    pub fn approx_eq(&self, other: &Mat4, eps: f32) -> bool {
        self.m
            .iter()
            .flatten()
            .zip(other.m.iter().flatten())
            .all(|(a, b)| (a - b).abs() <= eps)
    }

    #[inline]
    pub fn is_finite(&self) -> bool {
        self.m.iter().flatten().all(|v| v.is_finite())
    }
}

impl Default for Mat4 {
    fn default() -> Self {
        Mat4::IDENTITY
    }
}

impl Mul for Mat4 {
    type Output = Mat4;

    fn mul(self, rhs: Mat4) -> Mat4 {
        let mut out = Mat4::zeroed();
        for i in 0..4 {
            for j in 0..4 {
                out.m[i][j] = (0..4).map(|k| self.m[i][k] * rhs.m[k][j]).sum();
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Mat4 {
        Mat4::from_rows([
            [1.0, 2.0, 3.0, 4.0],
            [5.0, 6.0, 7.0, 8.0],
            [9.0, 10.0, 11.0, 12.0],
            [13.0, 14.0, 15.0, 16.0],
        ])
    }

    // ── product ───────────────────────────────────────────────────────────

    #[test]
    fn identity_is_neutral_on_both_sides() {
        let a = sample();
        assert_eq!(Mat4::IDENTITY * a, a);
        assert_eq!(a * Mat4::IDENTITY, a);
    }

    #[test]
    fn product_matches_hand_computed_entries() {
        let a = sample();
        let b = a.transpose();
        let c = a * b;
        // Row 0 dotted with itself: 1 + 4 + 9 + 16.
        assert_eq!(c.m[0][0], 30.0);
        // Row 0 dotted with row 3: 13 + 28 + 45 + 64.
        assert_eq!(c.m[0][3], 150.0);
        assert_eq!(c.m[3][0], 150.0);
    }

    #[test]
    fn product_is_not_commutative() {
        let t = Mat4::translation(3.0, -2.0);
        let s = Mat4::scale(2.0, 4.0);
        assert_ne!(t * s, s * t);
    }

    #[test]
    fn translations_compose_additively() {
        let t = Mat4::translation(1.0, 2.0) * Mat4::translation(-4.0, 0.5);
        assert_eq!(t, Mat4::translation(-3.0, 2.5));
    }

    #[test]
    fn scale_of_one_is_identity() {
        assert_eq!(Mat4::scale(1.0, 1.0), Mat4::IDENTITY);
    }

    // ── helpers ───────────────────────────────────────────────────────────

    #[test]
    fn transpose_swaps_rows_and_columns() {
        let a = sample();
        for i in 0..4 {
            assert_eq!(a.transpose().row(i), a.col(i));
        }
        assert_eq!(a.transpose().transpose(), a);
    }

    #[test]
    fn approx_eq_respects_tolerance() {
        let mut a = Mat4::IDENTITY;
        a.m[2][1] = 1e-6;
        assert!(a.approx_eq(&Mat4::IDENTITY, 1e-5));
        assert!(!a.approx_eq(&Mat4::IDENTITY, 1e-7));
    }

    #[test]
    fn gpu_bytes_are_row_major() {
        let a = sample();
        let floats: &[f32; 16] = bytemuck::cast_ref(&a);
        assert_eq!(&floats[0..4], &[1.0, 2.0, 3.0, 4.0]);
        assert_eq!(&floats[12..16], &[13.0, 14.0, 15.0, 16.0]);
    }
}
