use core::ops::Mul;

use serde::{Deserialize, Serialize};

use super::Vec2;

/// 2D affine transform.
///
/// Stored column-major as `[a, b, c, d, e, f]` for the matrix
///
/// ```text
/// | a c e |
/// | b d f |
/// | 0 0 1 |
/// ```
///
/// This is the planar restriction of the 4×4 matrices renderers upload; the
/// z row/column is always identity for scene primitives.
///
/// `A * B` applies `B` first, so an accumulated transform is built as
/// `parent * local`.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 6]", into = "[f64; 6]")]
pub struct Matrix {
    pub m: [f64; 6],
}

impl Matrix {
    pub const IDENTITY: Matrix = Matrix { m: [1.0, 0.0, 0.0, 1.0, 0.0, 0.0] };

    #[inline]
    pub const fn new(a: f64, b: f64, c: f64, d: f64, e: f64, f: f64) -> Self {
        Self { m: [a, b, c, d, e, f] }
    }

    #[inline]
    pub const fn translate(v: Vec2) -> Self {
        Self::new(1.0, 0.0, 0.0, 1.0, v.x, v.y)
    }

    #[inline]
    pub const fn scale(v: Vec2) -> Self {
        Self::new(v.x, 0.0, 0.0, v.y, 0.0, 0.0)
    }

    /// Rotation by `theta` radians. Positive angles turn +X towards +Y.
    #[inline]
    pub fn rotate(theta: f64) -> Self {
        let (s, c) = theta.sin_cos();
        Self::new(c, s, -s, c, 0.0, 0.0)
    }

    #[inline]
    pub fn determinant(self) -> f64 {
        let [a, b, c, d, _, _] = self.m;
        a * d - b * c
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.m.iter().all(|v| v.is_finite())
    }

    /// Inverse transform, or `None` when the matrix is singular or non-finite.
    pub fn inverse(self) -> Option<Self> {
        let det = self.determinant();
        if det == 0.0 || !det.is_finite() {
            return None;
        }
        let [a, b, c, d, e, f] = self.m;
        let inv = 1.0 / det;
        Some(Self::new(
            d * inv,
            -b * inv,
            -c * inv,
            a * inv,
            (c * f - d * e) * inv,
            (b * e - a * f) * inv,
        ))
    }

    /// Maps a point through the transform (translation included).
    #[inline]
    pub fn apply(self, p: Vec2) -> Vec2 {
        let [a, b, c, d, e, f] = self.m;
        Vec2::new(a * p.x + c * p.y + e, b * p.x + d * p.y + f)
    }
}

impl Default for Matrix {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mul for Matrix {
    type Output = Matrix;

    fn mul(self, rhs: Matrix) -> Matrix {
        let [a0, b0, c0, d0, e0, f0] = self.m;
        let [a1, b1, c1, d1, e1, f1] = rhs.m;
        Matrix::new(
            a0 * a1 + c0 * b1,
            b0 * a1 + d0 * b1,
            a0 * c1 + c0 * d1,
            b0 * c1 + d0 * d1,
            a0 * e1 + c0 * f1 + e0,
            b0 * e1 + d0 * f1 + f0,
        )
    }
}

impl From<[f64; 6]> for Matrix {
    #[inline]
    fn from(m: [f64; 6]) -> Self {
        Self { m }
    }
}

impl From<Matrix> for [f64; 6] {
    #[inline]
    fn from(m: Matrix) -> Self {
        m.m
    }
}

#[cfg(test)]
mod tests {
    use core::f64::consts::FRAC_PI_2;

    use super::*;

    fn close(a: Vec2, b: Vec2) -> bool {
        (a - b).length() < 1e-4
    }

    #[test]
    fn identity_maps_point_to_itself() {
        let p = Vec2::new(3.0, -4.0);
        assert_eq!(Matrix::IDENTITY.apply(p), p);
    }

    #[test]
    fn rotate_quarter_turn() {
        let p = Matrix::rotate(FRAC_PI_2).apply(Vec2::new(1.0, 0.0));
        assert!(close(p, Vec2::new(0.0, 1.0)));
    }

    #[test]
    fn product_applies_right_hand_side_first() {
        let t = Matrix::translate(Vec2::new(10.0, 0.0));
        let s = Matrix::scale(Vec2::new(2.0, 2.0));
        // scale then translate
        assert_eq!((t * s).apply(Vec2::new(1.0, 1.0)), Vec2::new(12.0, 2.0));
        // translate then scale
        assert_eq!((s * t).apply(Vec2::new(1.0, 1.0)), Vec2::new(22.0, 2.0));
    }

    #[test]
    fn inverse_round_trips() {
        let m = Matrix::translate(Vec2::new(5.0, -3.0)) * Matrix::rotate(0.7) * Matrix::scale(Vec2::new(2.0, 0.5));
        let inv = m.inverse().unwrap();
        let p = Vec2::new(1.5, 2.5);
        assert!(close(inv.apply(m.apply(p)), p));
        assert!(close((m * inv).apply(p), p));
    }

    #[test]
    fn singular_has_no_inverse() {
        assert!(Matrix::scale(Vec2::new(0.0, 1.0)).inverse().is_none());
    }
}
