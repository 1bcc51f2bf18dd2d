//! 2D affine transforms
//!
//! Row-major 3×3 matrices for converting between map block coordinates and
//! tileset or screen pixel coordinates. Each builder method applies its
//! transform after the ones already in the matrix.

use std::ops::Mul;

/// Row-major 3×3 matrix
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Matrix3(pub [f32; 9]);

impl Matrix3 {
    /// The identity transform
    pub const IDENTITY: Matrix3 = Matrix3([1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0]);

    /// Translation by `(tx, ty)`
    pub fn translation(tx: f32, ty: f32) -> Self {
        Matrix3([1.0, 0.0, tx, 0.0, 1.0, ty, 0.0, 0.0, 1.0])
    }

    /// Scaling by `(sx, sy)`
    pub fn scaling(sx: f32, sy: f32) -> Self {
        Matrix3([sx, 0.0, 0.0, 0.0, sy, 0.0, 0.0, 0.0, 1.0])
    }

    /// This transform followed by a translation
    pub fn translate(self, tx: f32, ty: f32) -> Self {
        Self::translation(tx, ty) * self
    }

    /// This transform followed by a scaling
    pub fn scale(self, sx: f32, sy: f32) -> Self {
        Self::scaling(sx, sy) * self
    }

    /// Apply the transform to a point
    pub fn transform_point(&self, x: f32, y: f32) -> (f32, f32) {
        let m = &self.0;
        (m[0] * x + m[1] * y + m[2], m[3] * x + m[4] * y + m[5])
    }

    /// Matrix entries, row-major
    pub fn as_array(&self) -> &[f32; 9] {
        &self.0
    }
}

impl Default for Matrix3 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mul for Matrix3 {
    type Output = Matrix3;

    fn mul(self, rhs: Matrix3) -> Matrix3 {
        let (a, b) = (&self.0, &rhs.0);
        let mut out = [0.0f32; 9];
        for row in 0..3 {
            for col in 0..3 {
                out[row * 3 + col] = (0..3).map(|k| a[row * 3 + k] * b[k * 3 + col]).sum();
            }
        }
        Matrix3(out)
    }
}
