// Copyright 2026 the Playfield Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Clip shape types for layer clipping.

use kurbo::{BezPath, Shape};

/// A shape, in the layer's content space, that clips the layer and its
/// descendants when painted.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ClipShape {
    /// An axis-aligned rectangle.
    Rect(kurbo::Rect),
    /// A rectangle with rounded corners.
    RoundedRect(kurbo::RoundedRect),
}

impl ClipShape {
    /// Returns the clip outline as a path.
    #[must_use]
    pub fn to_path(&self) -> BezPath {
        match self {
            Self::Rect(r) => r.to_path(0.1),
            Self::RoundedRect(r) => r.to_path(0.1),
        }
    }
}
