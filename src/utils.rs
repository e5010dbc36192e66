//! Miscellaneous math utilities shared by the constraint solver.

use crate::math::{Real, Vector};
use na::Matrix2;

const INV_EPSILON: Real = 1.0e-20;

/// Guarded scalar inverse: returns `1.0 / val`, or `0.0` when `val` is too
/// close to zero for the inverse to be meaningful.
pub(crate) fn inv(val: Real) -> Real {
    if (-INV_EPSILON..=INV_EPSILON).contains(&val) {
        0.0
    } else {
        1.0 / val
    }
}

/// Closed-form inverse of a 2×2 matrix.
///
/// Returns the zero matrix when `m` is (near-)singular, so a degenerate
/// effective-mass matrix yields a zero impulse instead of non-finite state.
pub(crate) fn inv22(m: &Matrix2<Real>) -> Matrix2<Real> {
    let inv_det = inv(m.m11 * m.m22 - m.m12 * m.m21);
    Matrix2::new(
        m.m22 * inv_det,
        -m.m12 * inv_det,
        -m.m21 * inv_det,
        m.m11 * inv_det,
    )
}

/// 2D generalization of the cross product.
pub(crate) trait WCross<Rhs>: Sized {
    /// The result of the generalized cross product.
    type Result;
    /// Computes the generalized cross product of `self` with `rhs`.
    fn gcross(&self, rhs: Rhs) -> Self::Result;
}

impl WCross<Vector<Real>> for Vector<Real> {
    type Result = Real;

    fn gcross(&self, rhs: Vector<Real>) -> Self::Result {
        self.x * rhs.y - self.y * rhs.x
    }
}

impl WCross<Vector<Real>> for Real {
    type Result = Vector<Real>;

    fn gcross(&self, rhs: Vector<Real>) -> Self::Result {
        Vector::new(-rhs.y * *self, rhs.x * *self)
    }
}
