// Copyright 2026 the Playfield Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Hit shapes: the bounds a layer reports to hit testing.

use kurbo::{BezPath, Circle, Point, Rect, RoundedRect, Shape};

/// The region of a layer's content space that accepts touches.
///
/// Image and canvas layers use a rectangle covering their pixels; custom
/// shapes supply a path and are tested with the non-zero winding rule.
#[derive(Clone, Debug, PartialEq)]
pub enum HitShape {
    /// An axis-aligned rectangle. Contains its top/left edges but not its
    /// bottom/right edges.
    Rect(Rect),
    /// A rectangle with rounded corners.
    RoundedRect(RoundedRect),
    /// A circle.
    Circle(Circle),
    /// An arbitrary closed path.
    Path(BezPath),
}

impl HitShape {
    /// A rectangle of the given size anchored at the content origin.
    #[must_use]
    pub fn sized(width: f64, height: f64) -> Self {
        Self::Rect(Rect::new(0.0, 0.0, width, height))
    }

    /// Returns whether `point` (in content space) is inside the shape.
    #[must_use]
    pub fn contains(&self, point: Point) -> bool {
        match self {
            Self::Rect(r) => r.contains(point),
            Self::RoundedRect(r) => r.contains(point),
            Self::Circle(c) => c.contains(point),
            Self::Path(p) => p.contains(point),
        }
    }

    /// Returns the smallest rectangle enclosing the shape.
    #[must_use]
    pub fn bounding_box(&self) -> Rect {
        match self {
            Self::Rect(r) => *r,
            Self::RoundedRect(r) => r.rect(),
            Self::Circle(c) => c.bounding_box(),
            Self::Path(p) => p.bounding_box(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rect_is_half_open() {
        let shape = HitShape::sized(100.0, 100.0);
        assert!(shape.contains(Point::new(0.0, 0.0)));
        assert!(shape.contains(Point::new(99.5, 99.5)));
        assert!(!shape.contains(Point::new(100.0, 50.0)));
        assert!(!shape.contains(Point::new(-0.1, 50.0)));
    }

    #[test]
    fn circle_excludes_corners() {
        let shape = HitShape::Circle(Circle::new((50.0, 50.0), 50.0));
        assert!(shape.contains(Point::new(50.0, 50.0)));
        assert!(!shape.contains(Point::new(2.0, 2.0)));
    }

    #[test]
    fn path_uses_winding() {
        let mut tri = BezPath::new();
        tri.move_to((0.0, 0.0));
        tri.line_to((100.0, 0.0));
        tri.line_to((0.0, 100.0));
        tri.close_path();
        let shape = HitShape::Path(tri);
        assert!(shape.contains(Point::new(10.0, 10.0)));
        assert!(!shape.contains(Point::new(90.0, 90.0)));
        assert_eq!(shape.bounding_box(), Rect::new(0.0, 0.0, 100.0, 100.0));
    }
}
