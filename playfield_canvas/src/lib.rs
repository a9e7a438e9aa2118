// Copyright 2026 the Playfield Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Playfield Canvas: immediate-mode 2D drawing with a save/restore stack.
//!
//! A [`Canvas`] draws into a [`tiny_skia::Pixmap`]. Drawing attributes (fill,
//! stroke, alpha, composite, clip) live in a [`PaintState`]; the canvas keeps
//! a [`PaintStack`] of them plus a parallel stack of transforms, both pushed
//! by [`Canvas::save`] and popped by [`Canvas::restore`].
//!
//! ```
//! use playfield_canvas::{Canvas, Color};
//!
//! let mut canvas = Canvas::new(64, 64)?;
//! canvas.save().translate(8.0, 8.0).set_alpha(0.5);
//! canvas.set_fill_color(Color::from_rgba8(200, 40, 40, 255));
//! canvas.fill_rect(0.0, 0.0, 16.0, 16.0)?;
//! canvas.restore()?;
//! assert_eq!(canvas.depth(), 0);
//! # Ok::<(), playfield_canvas::CanvasError>(())
//! ```
//!
//! Images and text come from the platform through the [`Image`] and
//! [`TextLayout`] traits; the canvas only needs pixels and glyph outlines.
//!
//! Coordinates are `f64` at the API and narrowed to `f32` for rasterization.

#![cfg_attr(docsrs, feature(doc_cfg))]

mod canvas;
mod error;
mod image;
mod paint;
mod path;
mod stack;
mod text;
mod util;

pub use canvas::Canvas;
pub use error::CanvasError;
pub use image::{Image, PendingImage};
pub use paint::{
    Composite, Fill, Gradient, GradientStop, LineCap, LineJoin, PaintState, Pattern,
};
pub use path::Path;
pub use stack::PaintStack;
pub use text::{OutlineText, TextLayout};
pub use tiny_skia::{Color, Pixmap};
