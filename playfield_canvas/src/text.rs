// Copyright 2026 the Playfield Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Text layout capability consumed by the canvas.
//!
//! Shaping and glyph rasterization belong to the platform. The canvas only
//! needs the laid-out glyph outlines, which it fills like any other path.

use kurbo::{BezPath, Rect, Shape};

/// A block of text that has already been shaped and laid out.
pub trait TextLayout {
    /// Width of the laid-out text.
    fn width(&self) -> f64;

    /// Height of the laid-out text.
    fn height(&self) -> f64;

    /// Glyph outlines, with the top-left of the layout at the origin.
    fn outline(&self) -> &BezPath;
}

/// A [`TextLayout`] made directly from glyph outlines.
#[derive(Clone, Debug)]
pub struct OutlineText {
    outline: BezPath,
    bounds: Rect,
}

impl OutlineText {
    /// Wraps outlines produced by a shaper. The layout size is taken from
    /// the outline's extent from the origin.
    #[must_use]
    pub fn new(outline: BezPath) -> Self {
        let bounds = outline.bounding_box();
        Self { outline, bounds }
    }
}

impl TextLayout for OutlineText {
    fn width(&self) -> f64 {
        self.bounds.x1.max(0.0)
    }

    fn height(&self) -> f64 {
        self.bounds.y1.max(0.0)
    }

    fn outline(&self) -> &BezPath {
        &self.outline
    }
}
