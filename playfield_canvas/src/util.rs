// Copyright 2026 the Playfield Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Conversions between kurbo/playfield geometry and tiny-skia.

use kurbo::{BezPath, PathEl};
use playfield_core::transform::Transform2d;
use tiny_skia::PathBuilder;

use crate::CanvasError;

/// Narrows a coordinate to the precision tiny-skia rasterizes at.
#[expect(
    clippy::cast_possible_truncation,
    reason = "tiny-skia rasterizes in f32 and canvas coordinates fit its range"
)]
pub(crate) fn f32_of(v: f64) -> f32 {
    v as f32
}

/// Rejects non-finite coordinates.
pub(crate) fn finite(values: &[f64]) -> Result<(), CanvasError> {
    if values.iter().all(|v| v.is_finite()) {
        Ok(())
    } else {
        Err(CanvasError::InvalidArgument("non-finite coordinate"))
    }
}

pub(crate) fn skia_transform(t: Transform2d) -> tiny_skia::Transform {
    let [a, b, c, d, e, f] = t.coeffs;
    tiny_skia::Transform::from_row(f32_of(a), f32_of(b), f32_of(c), f32_of(d), f32_of(e), f32_of(f))
}

/// Converts a kurbo path for rasterization.
///
/// # Errors
///
/// Returns [`CanvasError::InvalidArgument`] if the path is empty or has
/// non-finite points.
pub(crate) fn skia_path(path: &BezPath) -> Result<tiny_skia::Path, CanvasError> {
    let mut pb = PathBuilder::new();
    for el in path.elements() {
        match *el {
            PathEl::MoveTo(p) => {
                finite(&[p.x, p.y])?;
                pb.move_to(f32_of(p.x), f32_of(p.y));
            }
            PathEl::LineTo(p) => {
                finite(&[p.x, p.y])?;
                pb.line_to(f32_of(p.x), f32_of(p.y));
            }
            PathEl::QuadTo(p1, p2) => {
                finite(&[p1.x, p1.y, p2.x, p2.y])?;
                pb.quad_to(f32_of(p1.x), f32_of(p1.y), f32_of(p2.x), f32_of(p2.y));
            }
            PathEl::CurveTo(p1, p2, p3) => {
                finite(&[p1.x, p1.y, p2.x, p2.y, p3.x, p3.y])?;
                pb.cubic_to(
                    f32_of(p1.x),
                    f32_of(p1.y),
                    f32_of(p2.x),
                    f32_of(p2.y),
                    f32_of(p3.x),
                    f32_of(p3.y),
                );
            }
            PathEl::ClosePath => pb.close(),
        }
    }
    pb.finish().ok_or(CanvasError::InvalidArgument("empty path"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transform_coefficients_line_up() {
        let t = Transform2d::from_matrix(1.0, 2.0, 3.0, 4.0, 5.0, 6.0);
        let s = skia_transform(t);
        assert_eq!((s.sx, s.ky, s.kx, s.sy, s.tx, s.ty), (1.0, 2.0, 3.0, 4.0, 5.0, 6.0));
    }

    #[test]
    fn empty_and_non_finite_paths_are_rejected() {
        assert_eq!(
            skia_path(&BezPath::new()).err(),
            Some(CanvasError::InvalidArgument("empty path"))
        );

        let mut bad = BezPath::new();
        bad.move_to((0.0, 0.0));
        bad.line_to((f64::INFINITY, 1.0));
        assert!(skia_path(&bad).is_err());
    }

    #[test]
    fn curves_convert() {
        let mut path = BezPath::new();
        path.move_to((0.0, 0.0));
        path.quad_to((5.0, 10.0), (10.0, 0.0));
        path.curve_to((12.0, 2.0), (14.0, 2.0), (16.0, 0.0));
        path.close_path();
        let converted = skia_path(&path).unwrap();
        let bounds = converted.bounds();
        assert_eq!(bounds.left(), 0.0);
        assert_eq!(bounds.right(), 16.0);
    }
}
