// Copyright 2026 the Playfield Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Render plan: the visible layers of one tree in paint order.

use playfield_canvas::{Canvas, CanvasError, Path};
use playfield_core::layer::{ClipShape, LayerId, LayerStore, SurfaceId};
use playfield_core::trace::{PaintSummary, Tracer};
use playfield_core::transform::Transform2d;

/// One visible layer, with the properties evaluation computed for it.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderItem {
    /// The layer this item originates from.
    pub layer: LayerId,
    /// Nesting depth below the plan's root (the root is 0).
    pub depth: usize,
    /// Content-to-screen transform.
    pub world_transform: Transform2d,
    /// Alpha accumulated from ancestors, in `[0, 1]`.
    pub effective_alpha: f32,
    /// Clip in the layer's content space, applied to the layer and its
    /// descendants.
    pub clip: Option<ClipShape>,
    /// What to paint. `None` for a pure grouping node.
    pub content: Option<SurfaceId>,
}

/// Draws the content of a layer.
///
/// The canvas arrives with the layer's world transform, clip, and effective
/// alpha already applied, inside its own save frame; the painter draws in
/// the layer's content space and does not need to restore anything.
pub trait LayerPainter {
    /// Paints `item`'s content.
    ///
    /// # Errors
    ///
    /// Canvas errors are propagated out of [`RenderPlan::paint`].
    fn paint(&mut self, canvas: &mut Canvas, item: &RenderItem) -> Result<(), CanvasError>;
}

impl<F> LayerPainter for F
where
    F: FnMut(&mut Canvas, &RenderItem) -> Result<(), CanvasError>,
{
    fn paint(&mut self, canvas: &mut Canvas, item: &RenderItem) -> Result<(), CanvasError> {
        self(canvas, item)
    }
}

/// The visible layers of a tree, in back-to-front paint order.
///
/// Items are in depth-first pre-order, so every layer precedes its
/// descendants and later siblings paint over earlier ones. Effectively
/// hidden subtrees are left out entirely.
#[derive(Clone, Debug, Default)]
pub struct RenderPlan {
    /// Items in paint order.
    pub items: Vec<RenderItem>,
    /// Whether the tree topology changed since the previous evaluation.
    pub topology_changed: bool,
}

impl RenderPlan {
    /// Evaluates `store` and collects the visible layers below `root`.
    #[must_use]
    pub fn build(store: &mut LayerStore, root: LayerId) -> Self {
        let mut plan = Self::default();
        plan.build_into(store, root);
        plan
    }

    /// Like [`build`](Self::build), reusing this plan's allocation.
    pub fn build_into(&mut self, store: &mut LayerStore, root: LayerId) {
        self.clear();
        let changes = store.evaluate();
        self.topology_changed = changes.topology_changed;
        if !store.effective_hidden(root) {
            self.collect(store, root, 0);
        }
        log::trace!(
            "render plan for {root:?}: {} visible layers, {} transforms recomputed",
            self.items.len(),
            changes.transforms
        );
    }

    fn collect(&mut self, store: &LayerStore, id: LayerId, depth: usize) {
        self.items.push(RenderItem {
            layer: id,
            depth,
            world_transform: store.world_transform(id),
            effective_alpha: store.effective_alpha(id),
            clip: store.clip(id),
            content: store.content(id),
        });
        for child in store.children(id) {
            if !store.effective_hidden(child) {
                self.collect(store, child, depth + 1);
            }
        }
    }

    /// Clears the plan for reuse.
    pub fn clear(&mut self) {
        self.items.clear();
        self.topology_changed = false;
    }

    /// Returns the deepest nesting level in the plan.
    #[must_use]
    pub fn max_depth(&self) -> usize {
        self.items.iter().map(|item| item.depth).max().unwrap_or(0)
    }

    /// Paints every item onto `canvas` and returns how many layers the
    /// painter drew.
    ///
    /// Each item gets its own save frame with its world transform, clip,
    /// and effective alpha, composed with the transform and alpha the canvas
    /// already has: a plan drawn into a translated or faded canvas is
    /// translated or faded as a whole. Frames nest: a layer's frame stays
    /// open while its descendants paint, so its clip applies to them too.
    /// The painter is only called for items with content. The canvas is
    /// returned to its incoming save depth whether or not painting succeeds.
    ///
    /// # Errors
    ///
    /// Returns the first error from a clip or from the painter. Items after
    /// it are not painted.
    pub fn paint(
        &self,
        canvas: &mut Canvas,
        painter: &mut dyn LayerPainter,
    ) -> Result<usize, CanvasError> {
        self.paint_traced(canvas, painter, &mut Tracer::none())
    }

    /// Like [`paint`](Self::paint), emitting a [`PaintSummary`] to `tracer`
    /// on success.
    ///
    /// # Errors
    ///
    /// See [`paint`](Self::paint).
    pub fn paint_traced(
        &self,
        canvas: &mut Canvas,
        painter: &mut dyn LayerPainter,
        tracer: &mut Tracer<'_>,
    ) -> Result<usize, CanvasError> {
        let base = Frame {
            depth: canvas.depth(),
            transform: canvas.current_transform(),
            alpha: canvas.paint_state().alpha(),
        };
        let result = self.paint_items(canvas, painter, &base);
        while canvas.depth() > base.depth {
            canvas.restore()?;
        }
        let painted = result?;
        tracer.paint_summary(&PaintSummary {
            painted,
            max_depth: self.max_depth(),
            topology_changed: self.topology_changed,
        });
        Ok(painted)
    }

    fn paint_items(
        &self,
        canvas: &mut Canvas,
        painter: &mut dyn LayerPainter,
        base: &Frame,
    ) -> Result<usize, CanvasError> {
        let mut painted = 0;
        for item in &self.items {
            // Close the frames of layers that are not ancestors of this one.
            while canvas.depth() > base.depth + item.depth {
                canvas.restore()?;
            }
            canvas
                .save()
                .set_transform(base.transform * item.world_transform);
            if let Some(clip) = item.clip {
                canvas.clip(&Path::from(clip.to_path()))?;
            }
            canvas.set_alpha(base.alpha * item.effective_alpha);
            if item.content.is_some() {
                painter.paint(canvas, item)?;
                painted += 1;
            }
        }
        Ok(painted)
    }
}

/// Canvas state at the start of a paint pass.
struct Frame {
    depth: usize,
    transform: Transform2d,
    alpha: f32,
}
