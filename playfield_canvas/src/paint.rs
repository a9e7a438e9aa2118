// Copyright 2026 the Playfield Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drawing attributes: fills, strokes, alpha, composite, clip.
//!
//! A [`PaintState`] is one frame of a canvas's save/restore stack. Drawing
//! calls resolve it into a [`tiny_skia::Paint`] with alpha and composite baked
//! in; nothing is cached between calls.

use std::sync::Arc;

use kurbo::Point;
use tiny_skia::{
    BlendMode, Color, FilterQuality, GradientStop as SkiaStop, LinearGradient, Mask, Paint,
    Pixmap, RadialGradient, Shader, SpreadMode, Stroke, Transform,
};

use crate::CanvasError;
use crate::util::{f32_of, finite};

/// How new pixels combine with what is already on the surface.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Composite {
    /// Replace the destination.
    Src,
    /// Destination over source, clipped to the source.
    DstAtop,
    /// Source over destination.
    #[default]
    SrcOver,
    /// Destination over source.
    DstOver,
    /// Source where the destination is opaque.
    SrcIn,
    /// Destination where the source is opaque.
    DstIn,
    /// Source where the destination is transparent.
    SrcOut,
    /// Destination where the source is transparent.
    DstOut,
    /// Source over destination, clipped to the destination.
    SrcAtop,
    /// Source and destination where they do not overlap.
    Xor,
    /// Multiply source and destination.
    Multiply,
}

impl Composite {
    /// Returns the matching tiny-skia blend mode.
    #[must_use]
    pub const fn blend_mode(self) -> BlendMode {
        match self {
            Self::Src => BlendMode::Source,
            Self::DstAtop => BlendMode::DestinationAtop,
            Self::SrcOver => BlendMode::SourceOver,
            Self::DstOver => BlendMode::DestinationOver,
            Self::SrcIn => BlendMode::SourceIn,
            Self::DstIn => BlendMode::DestinationIn,
            Self::SrcOut => BlendMode::SourceOut,
            Self::DstOut => BlendMode::DestinationOut,
            Self::SrcAtop => BlendMode::SourceAtop,
            Self::Xor => BlendMode::Xor,
            Self::Multiply => BlendMode::Multiply,
        }
    }
}

/// Shape at the ends of stroked lines.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum LineCap {
    /// Flat, ending exactly at the endpoint.
    #[default]
    Butt,
    /// Half-circle beyond the endpoint.
    Round,
    /// Half-square beyond the endpoint.
    Square,
}

/// Shape at the corners of stroked paths.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum LineJoin {
    /// Cut off corner.
    Bevel,
    /// Sharp corner, limited by the miter limit.
    #[default]
    Miter,
    /// Rounded corner.
    Round,
}

/// One color stop of a [`Gradient`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GradientStop {
    /// Position along the gradient in `[0, 1]`.
    pub offset: f32,
    /// Color at that position.
    pub color: Color,
}

impl GradientStop {
    /// Creates a stop.
    #[must_use]
    pub const fn new(offset: f32, color: Color) -> Self {
        Self { offset, color }
    }
}

/// A linear or radial color ramp in user space.
#[derive(Clone, Debug, PartialEq)]
pub enum Gradient {
    /// Colors vary along the segment from `start` to `end`.
    Linear {
        /// Where offset 0 lies.
        start: Point,
        /// Where offset 1 lies.
        end: Point,
        /// Color stops in ascending offset order.
        stops: Vec<GradientStop>,
    },
    /// Colors vary with distance from `center`.
    Radial {
        /// Where offset 0 lies.
        center: Point,
        /// Distance at which offset 1 lies.
        radius: f64,
        /// Color stops in ascending offset order.
        stops: Vec<GradientStop>,
    },
}

impl Gradient {
    /// Creates a linear gradient.
    ///
    /// # Errors
    ///
    /// Returns [`CanvasError::InvalidArgument`] if the points coincide or are
    /// not finite, or the stops are empty or out of order.
    pub fn linear(
        start: Point,
        end: Point,
        stops: impl Into<Vec<GradientStop>>,
    ) -> Result<Self, CanvasError> {
        finite(&[start.x, start.y, end.x, end.y])?;
        if start == end {
            return Err(CanvasError::InvalidArgument("gradient start equals end"));
        }
        let stops = stops.into();
        check_stops(&stops)?;
        Ok(Self::Linear { start, end, stops })
    }

    /// Creates a radial gradient.
    ///
    /// # Errors
    ///
    /// Returns [`CanvasError::InvalidArgument`] if the radius is not positive,
    /// a coordinate is not finite, or the stops are empty or out of order.
    pub fn radial(
        center: Point,
        radius: f64,
        stops: impl Into<Vec<GradientStop>>,
    ) -> Result<Self, CanvasError> {
        finite(&[center.x, center.y, radius])?;
        if radius <= 0.0 {
            return Err(CanvasError::InvalidArgument("gradient radius must be positive"));
        }
        let stops = stops.into();
        check_stops(&stops)?;
        Ok(Self::Radial {
            center,
            radius,
            stops,
        })
    }

    fn shader(&self, alpha: f32) -> Result<Shader<'static>, CanvasError> {
        let stops = |stops: &[GradientStop]| -> Vec<SkiaStop> {
            stops
                .iter()
                .map(|stop| SkiaStop::new(stop.offset, with_alpha(stop.color, alpha)))
                .collect()
        };
        let shader = match self {
            Self::Linear {
                start,
                end,
                stops: s,
            } => LinearGradient::new(
                skia_point(*start),
                skia_point(*end),
                stops(s),
                SpreadMode::Pad,
                Transform::identity(),
            ),
            Self::Radial {
                center,
                radius,
                stops: s,
            } => RadialGradient::new(
                skia_point(*center),
                skia_point(*center),
                f32_of(*radius),
                stops(s),
                SpreadMode::Pad,
                Transform::identity(),
            ),
        };
        shader.ok_or(CanvasError::InvalidArgument("degenerate gradient"))
    }
}

fn check_stops(stops: &[GradientStop]) -> Result<(), CanvasError> {
    if stops.is_empty() {
        return Err(CanvasError::InvalidArgument("gradient has no stops"));
    }
    let mut last = 0.0_f32;
    for stop in stops {
        if !(0.0..=1.0).contains(&stop.offset) || stop.offset < last {
            return Err(CanvasError::InvalidArgument("gradient stops out of order"));
        }
        last = stop.offset;
    }
    Ok(())
}

/// An image used as a fill.
#[derive(Clone, Debug)]
pub struct Pattern {
    image: Arc<Pixmap>,
    repeat: bool,
}

impl Pattern {
    /// Creates a pattern from an image. With `repeat` the image tiles in both
    /// directions; without it the edge pixels extend outward.
    #[must_use]
    pub fn new(image: Pixmap, repeat: bool) -> Self {
        Self::from_shared(Arc::new(image), repeat)
    }

    /// Creates a pattern that shares an already reference-counted image.
    #[must_use]
    pub fn from_shared(image: Arc<Pixmap>, repeat: bool) -> Self {
        Self { image, repeat }
    }

    /// Returns the pattern image.
    #[must_use]
    pub fn image(&self) -> &Pixmap {
        &self.image
    }

    /// Returns whether the image tiles.
    #[must_use]
    pub fn repeats(&self) -> bool {
        self.repeat
    }

    fn shader(&self, alpha: f32) -> Shader<'_> {
        let spread = if self.repeat {
            SpreadMode::Repeat
        } else {
            SpreadMode::Pad
        };
        tiny_skia::Pattern::new(
            Pixmap::as_ref(&self.image),
            spread,
            FilterQuality::Bilinear,
            alpha,
            Transform::identity(),
        )
    }
}

/// The source of fill color. Setting one kind replaces the others.
#[derive(Clone, Debug)]
pub enum Fill {
    /// A single color.
    Color(Color),
    /// A color ramp.
    Gradient(Arc<Gradient>),
    /// A tiled or padded image.
    Pattern(Arc<Pattern>),
}

impl PartialEq for Fill {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Color(a), Self::Color(b)) => a == b,
            (Self::Gradient(a), Self::Gradient(b)) => Arc::ptr_eq(a, b),
            (Self::Pattern(a), Self::Pattern(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

/// One frame of drawing attributes.
///
/// Fills, gradients, patterns, and clip masks are reference counted, so
/// duplicating a frame on `save` is cheap. Two states compare equal when
/// they hold the same values and share the same gradient, pattern, and clip
/// objects.
#[derive(Clone, Debug)]
pub struct PaintState {
    fill: Fill,
    stroke_color: Color,
    stroke_width: f32,
    line_cap: LineCap,
    line_join: LineJoin,
    miter_limit: f32,
    alpha: f32,
    composite: Composite,
    clip: Option<Arc<Mask>>,
}

impl Default for PaintState {
    fn default() -> Self {
        Self {
            fill: Fill::Color(Color::BLACK),
            stroke_color: Color::BLACK,
            stroke_width: 1.0,
            line_cap: LineCap::Butt,
            line_join: LineJoin::Miter,
            miter_limit: 10.0,
            alpha: 1.0,
            composite: Composite::SrcOver,
            clip: None,
        }
    }
}

impl PartialEq for PaintState {
    fn eq(&self, other: &Self) -> bool {
        let clip_eq = match (&self.clip, &other.clip) {
            (None, None) => true,
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            _ => false,
        };
        clip_eq
            && self.fill == other.fill
            && self.stroke_color == other.stroke_color
            && self.stroke_width == other.stroke_width
            && self.line_cap == other.line_cap
            && self.line_join == other.line_join
            && self.miter_limit == other.miter_limit
            && self.alpha == other.alpha
            && self.composite == other.composite
    }
}

impl PaintState {
    /// Returns the fill source.
    #[must_use]
    pub fn fill(&self) -> &Fill {
        &self.fill
    }

    /// Sets the fill source.
    pub fn set_fill(&mut self, fill: Fill) {
        self.fill = fill;
    }

    /// Returns the stroke color.
    #[must_use]
    pub fn stroke_color(&self) -> Color {
        self.stroke_color
    }

    /// Sets the stroke color.
    pub fn set_stroke_color(&mut self, color: Color) {
        self.stroke_color = color;
    }

    /// Returns the stroke width.
    #[must_use]
    pub fn stroke_width(&self) -> f32 {
        self.stroke_width
    }

    /// Sets the stroke width. Negative and non-finite widths become zero
    /// (hairline).
    pub fn set_stroke_width(&mut self, width: f32) {
        self.stroke_width = if width.is_finite() { width.max(0.0) } else { 0.0 };
    }

    /// Returns the line cap.
    #[must_use]
    pub fn line_cap(&self) -> LineCap {
        self.line_cap
    }

    /// Sets the line cap.
    pub fn set_line_cap(&mut self, cap: LineCap) {
        self.line_cap = cap;
    }

    /// Returns the line join.
    #[must_use]
    pub fn line_join(&self) -> LineJoin {
        self.line_join
    }

    /// Sets the line join.
    pub fn set_line_join(&mut self, join: LineJoin) {
        self.line_join = join;
    }

    /// Returns the miter limit.
    #[must_use]
    pub fn miter_limit(&self) -> f32 {
        self.miter_limit
    }

    /// Sets the miter limit. Values below one (or non-finite) become one.
    pub fn set_miter_limit(&mut self, limit: f32) {
        self.miter_limit = if limit.is_finite() { limit.max(1.0) } else { 1.0 };
    }

    /// Returns the global alpha.
    #[must_use]
    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    /// Sets the global alpha, clamped to `[0, 1]`. NaN becomes zero.
    pub fn set_alpha(&mut self, alpha: f32) {
        self.alpha = if alpha.is_nan() { 0.0 } else { alpha.clamp(0.0, 1.0) };
    }

    /// Returns the composite operation.
    #[must_use]
    pub fn composite(&self) -> Composite {
        self.composite
    }

    /// Sets the composite operation.
    pub fn set_composite(&mut self, composite: Composite) {
        self.composite = composite;
    }

    /// Returns the clip mask in device space, if any.
    #[must_use]
    pub fn clip(&self) -> Option<&Mask> {
        self.clip.as_deref()
    }

    pub(crate) fn set_clip(&mut self, mask: Mask) {
        self.clip = Some(Arc::new(mask));
    }

    /// Resolves the fill into a paint.
    pub(crate) fn fill_paint(&self) -> Result<Paint<'_>, CanvasError> {
        let shader = match &self.fill {
            Fill::Color(color) => Shader::SolidColor(with_alpha(*color, self.alpha)),
            Fill::Gradient(gradient) => gradient.shader(self.alpha)?,
            Fill::Pattern(pattern) => pattern.shader(self.alpha),
        };
        Ok(self.paint(shader))
    }

    /// Resolves the stroke color into a paint.
    pub(crate) fn stroke_paint(&self) -> Paint<'static> {
        self.paint(Shader::SolidColor(with_alpha(self.stroke_color, self.alpha)))
    }

    /// Wraps `shader` with the composite operation.
    pub(crate) fn paint<'a>(&self, shader: Shader<'a>) -> Paint<'a> {
        Paint {
            shader,
            blend_mode: self.composite.blend_mode(),
            anti_alias: true,
            force_hq_pipeline: false,
        }
    }

    /// Returns the stroke geometry.
    pub(crate) fn stroke(&self) -> Stroke {
        Stroke {
            width: self.stroke_width,
            miter_limit: self.miter_limit,
            line_cap: match self.line_cap {
                LineCap::Butt => tiny_skia::LineCap::Butt,
                LineCap::Round => tiny_skia::LineCap::Round,
                LineCap::Square => tiny_skia::LineCap::Square,
            },
            line_join: match self.line_join {
                LineJoin::Bevel => tiny_skia::LineJoin::Bevel,
                LineJoin::Miter => tiny_skia::LineJoin::Miter,
                LineJoin::Round => tiny_skia::LineJoin::Round,
            },
            dash: None,
        }
    }
}

fn with_alpha(mut color: Color, alpha: f32) -> Color {
    color.apply_opacity(alpha);
    color
}

fn skia_point(p: Point) -> tiny_skia::Point {
    tiny_skia::Point::from_xy(f32_of(p.x), f32_of(p.y))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn red() -> Color {
        Color::from_rgba8(255, 0, 0, 255)
    }

    #[test]
    fn alpha_is_clamped() {
        let mut state = PaintState::default();
        state.set_alpha(1.5);
        assert_eq!(state.alpha(), 1.0);
        state.set_alpha(-1.0);
        assert_eq!(state.alpha(), 0.0);
        state.set_alpha(f32::NAN);
        assert_eq!(state.alpha(), 0.0);
    }

    #[test]
    fn fill_kinds_replace_each_other() {
        let mut state = PaintState::default();
        let gradient = Arc::new(
            Gradient::linear(
                Point::ORIGIN,
                Point::new(10.0, 0.0),
                [GradientStop::new(0.0, red()), GradientStop::new(1.0, Color::WHITE)],
            )
            .unwrap(),
        );
        state.set_fill(Fill::Gradient(gradient.clone()));
        assert_eq!(state.fill(), &Fill::Gradient(gradient));

        state.set_fill(Fill::Color(red()));
        assert_eq!(state.fill(), &Fill::Color(red()));
    }

    #[test]
    fn equality_tracks_shared_objects() {
        let gradient = Arc::new(
            Gradient::radial(Point::ORIGIN, 5.0, [GradientStop::new(0.0, red())]).unwrap(),
        );
        let mut a = PaintState::default();
        a.set_fill(Fill::Gradient(gradient.clone()));
        let b = a.clone();
        assert_eq!(a, b);

        let mut c = PaintState::default();
        c.set_fill(Fill::Gradient(Arc::new((*gradient).clone())));
        assert_ne!(a, c);
    }

    #[test]
    fn degenerate_gradients_are_rejected() {
        let stops = [GradientStop::new(0.0, red())];
        assert!(matches!(
            Gradient::linear(Point::ORIGIN, Point::ORIGIN, stops),
            Err(CanvasError::InvalidArgument(_))
        ));
        assert!(Gradient::radial(Point::ORIGIN, 0.0, stops).is_err());
        assert!(Gradient::radial(Point::new(f64::NAN, 0.0), 1.0, stops).is_err());
        assert!(Gradient::linear(Point::ORIGIN, Point::new(1.0, 0.0), Vec::new()).is_err());
        assert!(
            Gradient::linear(
                Point::ORIGIN,
                Point::new(1.0, 0.0),
                [GradientStop::new(0.8, red()), GradientStop::new(0.2, red())]
            )
            .is_err()
        );
    }

    #[test]
    fn paint_bakes_in_alpha_and_composite() {
        let mut state = PaintState::default();
        state.set_fill(Fill::Color(red()));
        state.set_alpha(0.5);
        state.set_composite(Composite::Xor);

        let paint = state.fill_paint().unwrap();
        assert_eq!(paint.blend_mode, BlendMode::Xor);
        match paint.shader {
            Shader::SolidColor(color) => assert!((color.alpha() - 0.5).abs() < 1e-6),
            _ => panic!("expected a solid color shader"),
        }
    }

    #[test]
    fn stroke_geometry_follows_state() {
        let mut state = PaintState::default();
        state.set_stroke_width(4.0);
        state.set_line_cap(LineCap::Round);
        state.set_line_join(LineJoin::Bevel);
        state.set_miter_limit(0.5);

        let stroke = state.stroke();
        assert_eq!(stroke.width, 4.0);
        assert_eq!(stroke.line_cap, tiny_skia::LineCap::Round);
        assert_eq!(stroke.line_join, tiny_skia::LineJoin::Bevel);
        assert_eq!(stroke.miter_limit, 1.0);
    }
}
