// Copyright 2026 the Playfield Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The drawing surface.

use std::sync::Arc;

use kurbo::{BezPath, Rect, RoundedRect, Shape};
use playfield_core::transform::Transform2d;
use tiny_skia::{
    BlendMode, Color, FillRule, FilterQuality, Mask, Paint, PathBuilder, Pixmap, PixmapRef,
    Shader, SpreadMode,
};

use crate::error::CanvasError;
use crate::image::Image;
use crate::paint::{Composite, Fill, Gradient, LineCap, LineJoin, PaintState, Pattern};
use crate::path::Path;
use crate::stack::PaintStack;
use crate::text::TextLayout;
use crate::util::{f32_of, finite, skia_path, skia_transform};

/// Flattening tolerance for curved shapes, in device pixels.
const TOLERANCE: f64 = 0.1;

/// An immediate-mode 2D drawing surface backed by a [`Pixmap`].
///
/// Drawing attributes live on a save/restore stack of [`PaintState`] frames;
/// the current transform lives on a parallel matrix stack. [`save`](Self::save)
/// pushes both and [`restore`](Self::restore) pops both, so they never drift
/// apart.
///
/// Every drawing call validates its arguments first. An `Err` leaves the
/// pixels and the dirty flag untouched.
pub struct Canvas {
    pixmap: Pixmap,
    stack: PaintStack,
    matrix: Transform2d,
    matrix_stack: Vec<Transform2d>,
    dirty: bool,
}

impl core::fmt::Debug for Canvas {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Canvas")
            .field("width", &self.pixmap.width())
            .field("height", &self.pixmap.height())
            .field("depth", &self.depth())
            .field("matrix", &self.matrix)
            .field("dirty", &self.dirty)
            .finish_non_exhaustive()
    }
}

impl Canvas {
    /// Creates a transparent canvas of `width` by `height` pixels.
    ///
    /// # Errors
    ///
    /// Returns [`CanvasError::InvalidSize`] if either dimension is zero or the
    /// surface is too large to allocate.
    pub fn new(width: u32, height: u32) -> Result<Self, CanvasError> {
        let pixmap = Pixmap::new(width, height).ok_or(CanvasError::InvalidSize { width, height })?;
        Ok(Self::from_pixmap(pixmap))
    }

    /// Wraps an existing pixmap, keeping its contents.
    #[must_use]
    pub fn from_pixmap(pixmap: Pixmap) -> Self {
        Self {
            pixmap,
            stack: PaintStack::new(),
            matrix: Transform2d::IDENTITY,
            matrix_stack: Vec::new(),
            dirty: false,
        }
    }

    /// Surface width in pixels.
    #[must_use]
    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    /// Surface height in pixels.
    #[must_use]
    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    /// Whether anything has been drawn since the last [`clear_dirty`](Self::clear_dirty).
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Resets the dirty flag, typically after uploading the pixels.
    pub fn clear_dirty(&mut self) {
        self.dirty = false;
    }

    /// The pixels drawn so far.
    #[must_use]
    pub fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }

    /// Consumes the canvas, returning its pixels.
    #[must_use]
    pub fn into_pixmap(self) -> Pixmap {
        self.pixmap
    }

    /// Number of outstanding [`save`](Self::save) calls.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.stack.depth()
    }

    /// The current drawing attributes.
    #[must_use]
    pub fn paint_state(&self) -> &PaintState {
        self.stack.top()
    }

    /// The current transform.
    #[must_use]
    pub fn current_transform(&self) -> Transform2d {
        self.matrix
    }

    // -----------------------------------------------------------------------
    // State stack
    // -----------------------------------------------------------------------

    /// Pushes a copy of the drawing attributes and the transform.
    pub fn save(&mut self) -> &mut Self {
        self.stack.save();
        self.matrix_stack.push(self.matrix);
        self
    }

    /// Pops the drawing attributes and transform pushed by the matching
    /// [`save`](Self::save).
    ///
    /// # Errors
    ///
    /// Returns [`CanvasError::UnbalancedRestore`] if there is no matching
    /// `save`. The state is left unchanged.
    pub fn restore(&mut self) -> Result<&mut Self, CanvasError> {
        self.stack.restore()?;
        if let Some(matrix) = self.matrix_stack.pop() {
            self.matrix = matrix;
        }
        Ok(self)
    }

    // -----------------------------------------------------------------------
    // Transform
    // -----------------------------------------------------------------------

    /// Translates subsequent drawing by `(x, y)`.
    pub fn translate(&mut self, x: f64, y: f64) -> &mut Self {
        self.matrix = self.matrix.pre_translate(x, y);
        self
    }

    /// Scales subsequent drawing.
    pub fn scale(&mut self, sx: f64, sy: f64) -> &mut Self {
        self.matrix = self.matrix.pre_scale(sx, sy);
        self
    }

    /// Rotates subsequent drawing clockwise by `radians` (y points down).
    pub fn rotate(&mut self, radians: f64) -> &mut Self {
        self.matrix = self.matrix.pre_rotate(radians);
        self
    }

    /// Composes `transform` onto the current transform; it applies first.
    pub fn transform(&mut self, transform: Transform2d) -> &mut Self {
        self.matrix = self.matrix * transform;
        self
    }

    /// Replaces the current transform.
    pub fn set_transform(&mut self, transform: Transform2d) -> &mut Self {
        self.matrix = transform;
        self
    }

    // -----------------------------------------------------------------------
    // Attributes
    // -----------------------------------------------------------------------

    /// Fills with a solid color.
    pub fn set_fill_color(&mut self, color: Color) -> &mut Self {
        self.stack.top_mut().set_fill(Fill::Color(color));
        self
    }

    /// Fills with a gradient, in the coordinate space of each drawing call.
    pub fn set_fill_gradient(&mut self, gradient: impl Into<Arc<Gradient>>) -> &mut Self {
        self.stack.top_mut().set_fill(Fill::Gradient(gradient.into()));
        self
    }

    /// Fills with an image pattern, in the coordinate space of each drawing call.
    pub fn set_fill_pattern(&mut self, pattern: impl Into<Arc<Pattern>>) -> &mut Self {
        self.stack.top_mut().set_fill(Fill::Pattern(pattern.into()));
        self
    }

    /// Sets the stroke color.
    pub fn set_stroke_color(&mut self, color: Color) -> &mut Self {
        self.stack.top_mut().set_stroke_color(color);
        self
    }

    /// Sets the stroke width.
    pub fn set_stroke_width(&mut self, width: f32) -> &mut Self {
        self.stack.top_mut().set_stroke_width(width);
        self
    }

    /// Sets how open stroke ends are drawn.
    pub fn set_line_cap(&mut self, cap: LineCap) -> &mut Self {
        self.stack.top_mut().set_line_cap(cap);
        self
    }

    /// Sets how stroke corners are drawn.
    pub fn set_line_join(&mut self, join: LineJoin) -> &mut Self {
        self.stack.top_mut().set_line_join(join);
        self
    }

    /// Sets the miter limit for [`LineJoin::Miter`].
    pub fn set_miter_limit(&mut self, limit: f32) -> &mut Self {
        self.stack.top_mut().set_miter_limit(limit);
        self
    }

    /// Sets the global alpha, clamped to `[0, 1]`.
    pub fn set_alpha(&mut self, alpha: f32) -> &mut Self {
        self.stack.top_mut().set_alpha(alpha);
        self
    }

    /// Sets the composite operation.
    pub fn set_composite(&mut self, composite: Composite) -> &mut Self {
        self.stack.top_mut().set_composite(composite);
        self
    }

    // -----------------------------------------------------------------------
    // Clearing and clipping
    // -----------------------------------------------------------------------

    /// Makes every pixel transparent. Ignores the transform and clip.
    pub fn clear(&mut self) -> &mut Self {
        self.pixmap.fill(Color::TRANSPARENT);
        self.dirty = true;
        self
    }

    /// Makes the pixels of a rectangle transparent, honoring the transform
    /// and clip.
    ///
    /// # Errors
    ///
    /// Returns [`CanvasError::InvalidArgument`] for non-finite input.
    pub fn clear_rect(&mut self, x: f64, y: f64, w: f64, h: f64) -> Result<(), CanvasError> {
        let Some(rect) = self.device_rect(x, y, w, h)? else {
            return Ok(());
        };
        let paint = Paint {
            shader: Shader::SolidColor(Color::TRANSPARENT),
            blend_mode: BlendMode::Source,
            anti_alias: true,
            force_hq_pipeline: false,
        };
        let transform = skia_transform(self.matrix);
        self.pixmap
            .fill_rect(rect, &paint, transform, self.stack.top().clip());
        self.dirty = true;
        Ok(())
    }

    /// Intersects the clip with `path` under the current transform.
    ///
    /// # Errors
    ///
    /// Returns [`CanvasError::InvalidArgument`] if the path is empty or not
    /// finite.
    pub fn clip(&mut self, path: &Path) -> Result<(), CanvasError> {
        self.check_matrix()?;
        let path = skia_path(path.as_bez_path())?;
        self.clip_skia_path(&path);
        Ok(())
    }

    /// Intersects the clip with a rectangle under the current transform.
    ///
    /// # Errors
    ///
    /// Returns [`CanvasError::InvalidArgument`] for non-finite input.
    pub fn clip_rect(&mut self, x: f64, y: f64, w: f64, h: f64) -> Result<(), CanvasError> {
        self.check_matrix()?;
        finite(&[x, y, w, h])?;
        match skia_rect(x, y, w, h) {
            Some(r) => self.clip_skia_path(&PathBuilder::from_rect(r)),
            None => self.clip_to_nothing(),
        }
        Ok(())
    }

    fn clip_skia_path(&mut self, path: &tiny_skia::Path) {
        let transform = skia_transform(self.matrix);
        let state = self.stack.top_mut();
        let mask = match state.clip() {
            Some(current) => {
                let mut mask = current.clone();
                mask.intersect_path(path, FillRule::Winding, true, transform);
                mask
            }
            None => {
                let Some(mut mask) = Mask::new(self.pixmap.width(), self.pixmap.height()) else {
                    return;
                };
                mask.fill_path(path, FillRule::Winding, true, transform);
                mask
            }
        };
        state.set_clip(mask);
    }

    fn clip_to_nothing(&mut self) {
        if let Some(mask) = Mask::new(self.pixmap.width(), self.pixmap.height()) {
            self.stack.top_mut().set_clip(mask);
        }
    }

    // -----------------------------------------------------------------------
    // Shapes
    // -----------------------------------------------------------------------

    /// Strokes a line segment.
    ///
    /// # Errors
    ///
    /// Returns [`CanvasError::InvalidArgument`] for non-finite input.
    pub fn draw_line(&mut self, x0: f64, y0: f64, x1: f64, y1: f64) -> Result<(), CanvasError> {
        finite(&[x0, y0, x1, y1])?;
        let mut path = BezPath::new();
        path.move_to((x0, y0));
        path.line_to((x1, y1));
        let path = skia_path(&path)?;
        self.stroke_skia_path(&path)
    }

    /// Draws a square dot of the stroke width (at least one unit) centered on
    /// `(x, y)`, in the stroke color.
    ///
    /// # Errors
    ///
    /// Returns [`CanvasError::InvalidArgument`] for non-finite input.
    pub fn draw_point(&mut self, x: f64, y: f64) -> Result<(), CanvasError> {
        finite(&[x, y])?;
        self.check_matrix()?;
        let size = f64::from(self.stack.top().stroke_width().max(1.0));
        let half = size / 2.0;
        let Some(rect) = tiny_skia::Rect::from_xywh(
            f32_of(x - half),
            f32_of(y - half),
            f32_of(size),
            f32_of(size),
        ) else {
            return Ok(());
        };
        let state = self.stack.top();
        let paint = state.stroke_paint();
        self.pixmap
            .fill_rect(rect, &paint, skia_transform(self.matrix), state.clip());
        self.dirty = true;
        Ok(())
    }

    /// Fills a rectangle. Negative sizes extend left or up.
    ///
    /// # Errors
    ///
    /// Returns [`CanvasError::InvalidArgument`] for non-finite input.
    pub fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64) -> Result<(), CanvasError> {
        let Some(rect) = self.device_rect(x, y, w, h)? else {
            return Ok(());
        };
        let state = self.stack.top();
        let paint = state.fill_paint()?;
        self.pixmap
            .fill_rect(rect, &paint, skia_transform(self.matrix), state.clip());
        self.dirty = true;
        Ok(())
    }

    /// Strokes the outline of a rectangle.
    ///
    /// # Errors
    ///
    /// Returns [`CanvasError::InvalidArgument`] for non-finite input.
    pub fn stroke_rect(&mut self, x: f64, y: f64, w: f64, h: f64) -> Result<(), CanvasError> {
        let Some(rect) = self.device_rect(x, y, w, h)? else {
            return Ok(());
        };
        self.stroke_skia_path(&PathBuilder::from_rect(rect))
    }

    /// Fills a rectangle with rounded corners.
    ///
    /// # Errors
    ///
    /// Returns [`CanvasError::InvalidArgument`] for non-finite input or a
    /// negative radius.
    pub fn fill_round_rect(
        &mut self,
        x: f64,
        y: f64,
        w: f64,
        h: f64,
        radius: f64,
    ) -> Result<(), CanvasError> {
        let Some(path) = round_rect_path(x, y, w, h, radius)? else {
            return Ok(());
        };
        self.fill_skia_path(&path, self.matrix)
    }

    /// Strokes a rectangle with rounded corners.
    ///
    /// # Errors
    ///
    /// Returns [`CanvasError::InvalidArgument`] for non-finite input or a
    /// negative radius.
    pub fn stroke_round_rect(
        &mut self,
        x: f64,
        y: f64,
        w: f64,
        h: f64,
        radius: f64,
    ) -> Result<(), CanvasError> {
        let Some(path) = round_rect_path(x, y, w, h, radius)? else {
            return Ok(());
        };
        self.stroke_skia_path(&path)
    }

    /// Fills a circle.
    ///
    /// # Errors
    ///
    /// Returns [`CanvasError::InvalidArgument`] for non-finite input or a
    /// negative radius.
    pub fn fill_circle(&mut self, x: f64, y: f64, radius: f64) -> Result<(), CanvasError> {
        let Some(path) = circle_path(x, y, radius)? else {
            return Ok(());
        };
        self.fill_skia_path(&path, self.matrix)
    }

    /// Strokes a circle.
    ///
    /// # Errors
    ///
    /// Returns [`CanvasError::InvalidArgument`] for non-finite input or a
    /// negative radius.
    pub fn stroke_circle(&mut self, x: f64, y: f64, radius: f64) -> Result<(), CanvasError> {
        let Some(path) = circle_path(x, y, radius)? else {
            return Ok(());
        };
        self.stroke_skia_path(&path)
    }

    /// Fills a path with the nonzero winding rule.
    ///
    /// # Errors
    ///
    /// Returns [`CanvasError::InvalidArgument`] if the path is empty or not
    /// finite.
    pub fn fill_path(&mut self, path: &Path) -> Result<(), CanvasError> {
        let path = skia_path(path.as_bez_path())?;
        self.fill_skia_path(&path, self.matrix)
    }

    /// Strokes a path.
    ///
    /// # Errors
    ///
    /// Returns [`CanvasError::InvalidArgument`] if the path is empty or not
    /// finite.
    pub fn stroke_path(&mut self, path: &Path) -> Result<(), CanvasError> {
        let path = skia_path(path.as_bez_path())?;
        self.stroke_skia_path(&path)
    }

    // -----------------------------------------------------------------------
    // Images and text
    // -----------------------------------------------------------------------

    /// Draws an image at its logical size with its top-left at `(x, y)`.
    ///
    /// # Errors
    ///
    /// Returns [`CanvasError::InvalidArgument`] for non-finite input.
    pub fn draw_image(&mut self, image: &dyn Image, x: f64, y: f64) -> Result<(), CanvasError> {
        self.draw_image_scaled(image, x, y, image.width(), image.height())
    }

    /// Draws an image centered on `(x, y)`.
    ///
    /// # Errors
    ///
    /// Returns [`CanvasError::InvalidArgument`] for non-finite input.
    pub fn draw_image_centered(
        &mut self,
        image: &dyn Image,
        x: f64,
        y: f64,
    ) -> Result<(), CanvasError> {
        let (w, h) = (image.width(), image.height());
        self.draw_image(image, x - w / 2.0, y - h / 2.0)
    }

    /// Draws a whole image stretched into the rectangle `(x, y, w, h)`.
    ///
    /// # Errors
    ///
    /// Returns [`CanvasError::InvalidArgument`] for non-finite input.
    pub fn draw_image_scaled(
        &mut self,
        image: &dyn Image,
        x: f64,
        y: f64,
        w: f64,
        h: f64,
    ) -> Result<(), CanvasError> {
        let (iw, ih) = (image.width(), image.height());
        self.draw_image_region(image, x, y, w, h, 0.0, 0.0, iw, ih)
    }

    /// Draws the source rectangle `(sx, sy, sw, sh)` of an image, in logical
    /// image units, stretched into the destination rectangle `(dx, dy, dw, dh)`.
    ///
    /// An image without pixels yet draws nothing but still marks the canvas
    /// dirty, so the frame is re-uploaded once it loads.
    ///
    /// # Errors
    ///
    /// Returns [`CanvasError::InvalidArgument`] for non-finite input or a
    /// source rectangle that is empty or extends outside the image.
    #[expect(clippy::too_many_arguments, reason = "mirrors the canvas drawImage call")]
    pub fn draw_image_region(
        &mut self,
        image: &dyn Image,
        dx: f64,
        dy: f64,
        dw: f64,
        dh: f64,
        sx: f64,
        sy: f64,
        sw: f64,
        sh: f64,
    ) -> Result<(), CanvasError> {
        finite(&[dx, dy, dw, dh, sx, sy, sw, sh])?;
        self.check_matrix()?;
        let (iw, ih) = (image.width(), image.height());
        if sw <= 0.0 || sh <= 0.0 || sx < 0.0 || sy < 0.0 || sx + sw > iw || sy + sh > ih {
            return Err(CanvasError::InvalidArgument("source rectangle outside image"));
        }
        let Some(pixels) = image.pixels() else {
            log::debug!("image of {iw}x{ih} not ready, skipping draw");
            self.dirty = true;
            return Ok(());
        };
        let Some(dest) = skia_rect(dx, dy, dw, dh) else {
            return Ok(());
        };
        let (pw, ph) = (f64::from(pixels.width()), f64::from(pixels.height()));
        let placement = Transform2d::from_translation(dx, dy)
            * Transform2d::from_scale(dw / sw, dh / sh)
            * Transform2d::from_translation(-sx, -sy)
            * Transform2d::from_scale(iw / pw, ih / ph);
        self.fill_with_pixels(dest, pixels, placement);
        Ok(())
    }

    fn fill_with_pixels(
        &mut self,
        dest: tiny_skia::Rect,
        pixels: PixmapRef<'_>,
        placement: Transform2d,
    ) {
        let state = self.stack.top();
        let shader = tiny_skia::Pattern::new(
            pixels,
            SpreadMode::Pad,
            FilterQuality::Bilinear,
            state.alpha(),
            skia_transform(placement),
        );
        let paint = state.paint(shader);
        self.pixmap
            .fill_rect(dest, &paint, skia_transform(self.matrix), state.clip());
        self.dirty = true;
    }

    /// Fills laid-out text with its top-left at `(x, y)`.
    ///
    /// # Errors
    ///
    /// Returns [`CanvasError::InvalidArgument`] for non-finite input.
    pub fn draw_text(
        &mut self,
        layout: &dyn TextLayout,
        x: f64,
        y: f64,
    ) -> Result<(), CanvasError> {
        finite(&[x, y])?;
        let outline = layout.outline();
        if outline.elements().is_empty() {
            return Ok(());
        }
        let path = skia_path(outline)?;
        self.fill_skia_path(&path, self.matrix.pre_translate(x, y))
    }

    // -----------------------------------------------------------------------
    // Helpers
    // -----------------------------------------------------------------------

    fn check_matrix(&self) -> Result<(), CanvasError> {
        if self.matrix.is_finite() {
            Ok(())
        } else {
            Err(CanvasError::InvalidArgument("non-finite transform"))
        }
    }

    /// Validates a rectangle, returning `None` when it has no area.
    fn device_rect(
        &self,
        x: f64,
        y: f64,
        w: f64,
        h: f64,
    ) -> Result<Option<tiny_skia::Rect>, CanvasError> {
        finite(&[x, y, w, h])?;
        self.check_matrix()?;
        Ok(skia_rect(x, y, w, h))
    }

    fn fill_skia_path(
        &mut self,
        path: &tiny_skia::Path,
        transform: Transform2d,
    ) -> Result<(), CanvasError> {
        self.check_matrix()?;
        let state = self.stack.top();
        let paint = state.fill_paint()?;
        self.pixmap.fill_path(
            path,
            &paint,
            FillRule::Winding,
            skia_transform(transform),
            state.clip(),
        );
        self.dirty = true;
        Ok(())
    }

    fn stroke_skia_path(&mut self, path: &tiny_skia::Path) -> Result<(), CanvasError> {
        self.check_matrix()?;
        let state = self.stack.top();
        let paint = state.stroke_paint();
        self.pixmap.stroke_path(
            path,
            &paint,
            &state.stroke(),
            skia_transform(self.matrix),
            state.clip(),
        );
        self.dirty = true;
        Ok(())
    }
}

impl Image for Canvas {
    fn width(&self) -> f64 {
        f64::from(self.pixmap.width())
    }

    fn height(&self) -> f64 {
        f64::from(self.pixmap.height())
    }

    fn pixels(&self) -> Option<PixmapRef<'_>> {
        Some(self.pixmap.as_ref())
    }
}

fn skia_rect(x: f64, y: f64, w: f64, h: f64) -> Option<tiny_skia::Rect> {
    let rect = Rect::new(x, y, x + w, y + h).abs();
    tiny_skia::Rect::from_ltrb(
        f32_of(rect.x0),
        f32_of(rect.y0),
        f32_of(rect.x1),
        f32_of(rect.y1),
    )
}

fn round_rect_path(
    x: f64,
    y: f64,
    w: f64,
    h: f64,
    radius: f64,
) -> Result<Option<tiny_skia::Path>, CanvasError> {
    finite(&[x, y, w, h, radius])?;
    if radius < 0.0 {
        return Err(CanvasError::InvalidArgument("negative corner radius"));
    }
    let rect = Rect::new(x, y, x + w, y + h).abs();
    if rect.area() == 0.0 {
        return Ok(None);
    }
    let shape = RoundedRect::from_rect(rect, radius);
    skia_path(&shape.to_path(TOLERANCE)).map(Some)
}

fn circle_path(x: f64, y: f64, radius: f64) -> Result<Option<tiny_skia::Path>, CanvasError> {
    finite(&[x, y, radius])?;
    if radius < 0.0 {
        return Err(CanvasError::InvalidArgument("negative radius"));
    }
    Ok(PathBuilder::from_circle(f32_of(x), f32_of(y), f32_of(radius)))
}
