// Copyright 2026 the Playfield Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Paths built with canvas-style commands.

use kurbo::{BezPath, Rect, Shape};

/// A path for [`Canvas::fill_path`](crate::Canvas::fill_path),
/// [`Canvas::stroke_path`](crate::Canvas::stroke_path) and
/// [`Canvas::clip`](crate::Canvas::clip).
///
/// A thin builder over [`kurbo::BezPath`]; any kurbo shape converts into one.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Path {
    inner: BezPath,
}

impl Path {
    /// Creates an empty path.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a path from any kurbo shape, flattened with `tolerance`
    /// where the shape has curves.
    #[must_use]
    pub fn from_shape(shape: &impl Shape, tolerance: f64) -> Self {
        Self {
            inner: shape.to_path(tolerance),
        }
    }

    /// Starts a new subpath at `(x, y)`.
    pub fn move_to(&mut self, x: f64, y: f64) -> &mut Self {
        self.inner.move_to((x, y));
        self
    }

    /// Adds a straight segment to `(x, y)`.
    pub fn line_to(&mut self, x: f64, y: f64) -> &mut Self {
        self.inner.line_to((x, y));
        self
    }

    /// Adds a quadratic curve through control point `(cpx, cpy)` to `(x, y)`.
    pub fn quadratic_curve_to(&mut self, cpx: f64, cpy: f64, x: f64, y: f64) -> &mut Self {
        self.inner.quad_to((cpx, cpy), (x, y));
        self
    }

    /// Adds a cubic curve to `(x, y)`.
    pub fn bezier_curve_to(
        &mut self,
        c1x: f64,
        c1y: f64,
        c2x: f64,
        c2y: f64,
        x: f64,
        y: f64,
    ) -> &mut Self {
        self.inner.curve_to((c1x, c1y), (c2x, c2y), (x, y));
        self
    }

    /// Closes the current subpath.
    pub fn close(&mut self) -> &mut Self {
        self.inner.close_path();
        self
    }

    /// Removes every segment.
    pub fn reset(&mut self) -> &mut Self {
        self.inner.truncate(0);
        self
    }

    /// Returns whether the path has no segments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.elements().is_empty()
    }

    /// Returns the bounding box of the path.
    #[must_use]
    pub fn bounds(&self) -> Rect {
        self.inner.bounding_box()
    }

    /// Returns the underlying kurbo path.
    #[must_use]
    pub fn as_bez_path(&self) -> &BezPath {
        &self.inner
    }
}

impl From<BezPath> for Path {
    fn from(inner: BezPath) -> Self {
        Self { inner }
    }
}

impl From<Path> for BezPath {
    fn from(path: Path) -> Self {
        path.inner
    }
}
