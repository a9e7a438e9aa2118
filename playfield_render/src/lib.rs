// Copyright 2026 the Playfield Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Painting a playfield layer tree onto a canvas.
//!
//! This crate is the bridge between [`playfield_core`]'s layer tree and
//! [`playfield_canvas`]. It defines:
//!
//! - [`RenderItem`]: one visible layer with its evaluated properties
//! - [`RenderPlan`]: the visible layers of a tree in paint order
//! - [`LayerPainter`]: the application hook that draws a layer's content
//!
//! A frame is built and painted in two steps:
//!
//! ```
//! use playfield_canvas::Canvas;
//! use playfield_core::layer::{LayerStore, SurfaceId};
//! use playfield_render::{RenderItem, RenderPlan};
//!
//! let mut store = LayerStore::new();
//! let root = store.create_layer();
//! store.set_content(root, Some(SurfaceId(7)));
//!
//! let plan = RenderPlan::build(&mut store, root);
//! let mut canvas = Canvas::new(32, 32)?;
//! let mut painter = |canvas: &mut Canvas, _item: &RenderItem| {
//!     canvas.fill_rect(0.0, 0.0, 8.0, 8.0)
//! };
//! let painted = plan.paint(&mut canvas, &mut painter)?;
//! assert_eq!(painted, 1);
//! # Ok::<(), playfield_canvas::CanvasError>(())
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]

mod plan;

pub use plan::{LayerPainter, RenderItem, RenderPlan};
