// Copyright 2026 the Playfield Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! 2-D affine transform value type.
//!
//! [`Transform2d`] is the transform every layer carries. It is a plain `Copy`
//! value: callers that need scratch space own their own copy, so no transform
//! instance is ever shared and mutated behind another caller's back.
//!
//! # Conventions
//!
//! Coefficients are stored as `[a, b, c, d, e, f]` and map a point as
//!
//! ```text
//! x' = a·x + c·y + e
//! y' = b·x + d·y + f
//! ```
//!
//! Multiplication composes right-to-left: `(A * B)(p) == A(B(p))`. A layer's
//! world transform is `parent.concatenate(local, origin)`, which is
//! `parent * local * translate(-origin)`.

use core::ops::Mul;

use kurbo::{Affine, Point, Vec2};

use crate::Error;

/// A 2-D affine transform stored as six coefficients.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform2d {
    /// Coefficients `[a, b, c, d, e, f]`.
    pub coeffs: [f64; 6],
}

impl Transform2d {
    /// The identity transform.
    pub const IDENTITY: Self = Self {
        coeffs: [1.0, 0.0, 0.0, 1.0, 0.0, 0.0],
    };

    /// Creates a transform from its six coefficients.
    #[inline]
    #[must_use]
    pub const fn new(coeffs: [f64; 6]) -> Self {
        Self { coeffs }
    }

    /// Creates a transform from the linear part `m11, m12, m21, m22` and the
    /// translation `dx, dy`.
    ///
    /// The argument order matches the canvas `transform`/`set_transform`
    /// calls: `(m11, m12)` is the image of the x axis.
    #[inline]
    #[must_use]
    pub const fn from_matrix(m11: f64, m12: f64, m21: f64, m22: f64, dx: f64, dy: f64) -> Self {
        Self {
            coeffs: [m11, m12, m21, m22, dx, dy],
        }
    }

    /// Creates a pure translation.
    #[inline]
    #[must_use]
    pub const fn from_translation(x: f64, y: f64) -> Self {
        Self {
            coeffs: [1.0, 0.0, 0.0, 1.0, x, y],
        }
    }

    /// Creates a non-uniform scale.
    #[inline]
    #[must_use]
    pub const fn from_scale(sx: f64, sy: f64) -> Self {
        Self {
            coeffs: [sx, 0.0, 0.0, sy, 0.0, 0.0],
        }
    }

    /// Creates a rotation (radians, positive turns +x toward +y).
    #[inline]
    #[must_use]
    pub fn from_rotation(radians: f64) -> Self {
        let (s, c) = radians.sin_cos();
        Self {
            coeffs: [c, s, -s, c, 0.0, 0.0],
        }
    }

    /// Returns the translation component.
    #[inline]
    #[must_use]
    pub const fn translation(self) -> Vec2 {
        Vec2::new(self.coeffs[4], self.coeffs[5])
    }

    /// Returns `self * translate(x, y)`: the translation applies first.
    #[inline]
    #[must_use]
    pub fn pre_translate(self, x: f64, y: f64) -> Self {
        self * Self::from_translation(x, y)
    }

    /// Returns `self * scale(sx, sy)`.
    #[inline]
    #[must_use]
    pub fn pre_scale(self, sx: f64, sy: f64) -> Self {
        self * Self::from_scale(sx, sy)
    }

    /// Returns `self * rotate(radians)`.
    #[inline]
    #[must_use]
    pub fn pre_rotate(self, radians: f64) -> Self {
        self * Self::from_rotation(radians)
    }

    /// Combines a parent transform with a child's local transform and origin.
    ///
    /// The result maps a point in the child's content space (where the origin
    /// sits at `origin`) into the parent's output space:
    /// `self * local * translate(-origin)`.
    #[inline]
    #[must_use]
    pub fn concatenate(self, local: Self, origin: Point) -> Self {
        self * local * Self::from_translation(-origin.x, -origin.y)
    }

    /// Returns the determinant of the linear part.
    #[inline]
    #[must_use]
    pub const fn determinant(self) -> f64 {
        let [a, b, c, d, _, _] = self.coeffs;
        a * d - b * c
    }

    /// Returns the inverse transform, or `None` if this transform is singular
    /// or not finite.
    ///
    /// Only an exactly zero determinant counts as singular, so very small
    /// scales still invert. An inverse that would overflow is `None`.
    #[must_use]
    pub fn inverse(self) -> Option<Self> {
        if !self.is_finite() {
            return None;
        }
        let det = self.determinant();
        if det == 0.0 || !det.is_finite() {
            return None;
        }
        let [a, b, c, d, e, f] = self.coeffs;
        let inv = det.recip();
        let inverse = Self {
            coeffs: [
                d * inv,
                -b * inv,
                -c * inv,
                a * inv,
                (c * f - d * e) * inv,
                (b * e - a * f) * inv,
            ],
        };
        inverse.is_finite().then_some(inverse)
    }

    /// Maps a point from input space to output space.
    #[inline]
    #[must_use]
    pub fn transform_point(self, p: Point) -> Point {
        let [a, b, c, d, e, f] = self.coeffs;
        Point::new(a * p.x + c * p.y + e, b * p.x + d * p.y + f)
    }

    /// Maps a point from output space back to input space.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SingularTransform`] if the transform has no inverse.
    pub fn inverse_transform_point(self, p: Point) -> Result<Point, Error> {
        self.inverse()
            .map(|inv| inv.transform_point(p))
            .ok_or(Error::SingularTransform)
    }

    /// Is this transform [finite]?
    ///
    /// [finite]: f64::is_finite
    #[inline]
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.coeffs.iter().all(|v| v.is_finite())
    }

    /// Is this transform [NaN]?
    ///
    /// [NaN]: f64::is_nan
    #[inline]
    #[must_use]
    pub fn is_nan(&self) -> bool {
        self.coeffs.iter().any(|v| v.is_nan())
    }
}

impl Default for Transform2d {
    #[inline]
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mul for Transform2d {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: Self) -> Self {
        let [a0, b0, c0, d0, e0, f0] = self.coeffs;
        let [a1, b1, c1, d1, e1, f1] = rhs.coeffs;
        Self {
            coeffs: [
                a0 * a1 + c0 * b1,
                b0 * a1 + d0 * b1,
                a0 * c1 + c0 * d1,
                b0 * c1 + d0 * d1,
                a0 * e1 + c0 * f1 + e0,
                b0 * e1 + d0 * f1 + f0,
            ],
        }
    }
}

impl From<Affine> for Transform2d {
    #[inline]
    fn from(affine: Affine) -> Self {
        Self {
            coeffs: affine.as_coeffs(),
        }
    }
}

impl From<Transform2d> for Affine {
    #[inline]
    fn from(t: Transform2d) -> Self {
        Self::new(t.coeffs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn assert_point_near(a: Point, b: Point) {
        assert!(
            (a.x - b.x).abs() < EPS && (a.y - b.y).abs() < EPS,
            "{a:?} != {b:?}"
        );
    }

    #[test]
    fn default_is_identity() {
        assert_eq!(Transform2d::default(), Transform2d::IDENTITY);
    }

    #[test]
    fn identity_multiply() {
        let t = Transform2d::from_translation(1.0, 2.0);
        assert_eq!(Transform2d::IDENTITY * t, t);
        assert_eq!(t * Transform2d::IDENTITY, t);
    }

    #[test]
    fn right_operand_applies_first() {
        let s = Transform2d::from_scale(2.0, 2.0);
        let t = Transform2d::from_translation(3.0, 4.0);
        // Scale first, then translate.
        let p = (t * s).transform_point(Point::new(1.0, 1.0));
        assert_point_near(p, Point::new(5.0, 6.0));
        // Translate first, then scale.
        let p = (s * t).transform_point(Point::new(1.0, 1.0));
        assert_point_near(p, Point::new(8.0, 10.0));
    }

    #[test]
    fn matches_kurbo_composition() {
        let a = Affine::rotate(0.7) * Affine::translate((3.0, -2.0));
        let b = Affine::scale_non_uniform(2.0, 0.5) * Affine::rotate(-1.1);
        let ours = Transform2d::from(a) * Transform2d::from(b);
        let theirs = Transform2d::from(a * b);
        for (x, y) in ours.coeffs.iter().zip(theirs.coeffs.iter()) {
            assert!((x - y).abs() < EPS, "{ours:?} != {theirs:?}");
        }
    }

    #[test]
    fn concatenate_subtracts_origin_before_local() {
        let parent = Transform2d::from_translation(100.0, 0.0);
        let local = Transform2d::from_scale(2.0, 2.0);
        let world = parent.concatenate(local, Point::new(10.0, 10.0));
        // The origin maps to the local translation (zero) in parent space.
        assert_point_near(
            world.transform_point(Point::new(10.0, 10.0)),
            Point::new(100.0, 0.0),
        );
        assert_point_near(
            world.transform_point(Point::new(11.0, 10.0)),
            Point::new(102.0, 0.0),
        );
    }

    #[test]
    fn inverse_round_trips_points() {
        let transforms = [
            Transform2d::from_translation(5.0, -7.0),
            Transform2d::from_scale(3.0, 0.25),
            Transform2d::from_rotation(1.234),
            Transform2d::from_matrix(1.0, 0.5, -0.3, 2.0, 10.0, 20.0),
        ];
        let points = [
            Point::ORIGIN,
            Point::new(1.0, 2.0),
            Point::new(-50.5, 3.25),
        ];
        for t in transforms {
            for p in points {
                let back = t.inverse_transform_point(t.transform_point(p)).unwrap();
                assert_point_near(back, p);
            }
        }
    }

    #[test]
    fn singular_transform_has_no_inverse() {
        let t = Transform2d::from_scale(0.0, 1.0);
        assert_eq!(t.inverse(), None);
        assert_eq!(
            t.inverse_transform_point(Point::new(1.0, 1.0)),
            Err(Error::SingularTransform)
        );
    }

    #[test]
    fn tiny_scales_still_invert() {
        let t = Transform2d::from_scale(1e-7, 1e-7);
        assert!(t.determinant().abs() < 1e-12);
        let inv = t.inverse().unwrap();
        assert_point_near(inv.transform_point(Point::new(1e-7, 2e-7)), Point::new(1.0, 2.0));
        assert_point_near(
            t.inverse_transform_point(Point::new(3e-7, 0.0)).unwrap(),
            Point::new(3.0, 0.0),
        );
    }

    #[test]
    fn overflowing_inverse_is_rejected() {
        let t = Transform2d::from_scale(1e-200, 1e-200);
        assert_eq!(t.inverse(), None);
    }

    #[test]
    fn non_finite_transform_has_no_inverse() {
        let mut t = Transform2d::IDENTITY;
        t.coeffs[4] = f64::INFINITY;
        assert!(!t.is_finite());
        assert!(!t.is_nan());
        assert_eq!(t.inverse(), None);
    }

    #[test]
    fn nan_detected() {
        let mut t = Transform2d::IDENTITY;
        t.coeffs[2] = f64::NAN;
        assert!(!t.is_finite());
        assert!(t.is_nan());
    }

    #[test]
    fn rotation_quarter_turn() {
        let r = Transform2d::from_rotation(core::f64::consts::FRAC_PI_2);
        assert_point_near(r.transform_point(Point::new(1.0, 0.0)), Point::new(0.0, 1.0));
    }

    #[test]
    fn pre_ops_compose_on_the_right() {
        let t = Transform2d::from_translation(10.0, 0.0).pre_scale(2.0, 2.0);
        assert_point_near(t.transform_point(Point::new(1.0, 1.0)), Point::new(12.0, 2.0));
        assert_eq!(t.translation(), Vec2::new(10.0, 0.0));
    }
}
