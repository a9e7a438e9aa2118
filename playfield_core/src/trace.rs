// Copyright 2026 the Playfield Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tracing and diagnostics for touch routing and painting.
//!
//! This module provides a [`TraceSink`] trait with per-event methods that the
//! [`TouchDispatcher`](crate::touch::TouchDispatcher) and renderers call at
//! each decision point. All method bodies default to no-ops, so implementing
//! only the events you care about is fine.
//!
//! [`Tracer`] wraps an optional `&mut dyn TraceSink`. When the `trace` feature
//! is **off**, every `Tracer` method compiles to nothing (zero overhead). When
//! **on**, each method performs a single `Option` branch before dispatching.
//!
//! # Crate features
//!
//! - `trace`: enables the `Tracer` method bodies (one branch per call).

use kurbo::Point;

use crate::layer::LayerId;
use crate::touch::{DispatchReport, DropReason, TouchPhase};

// ---------------------------------------------------------------------------
// Event structs
// ---------------------------------------------------------------------------

/// Emitted when a touch is delivered to a layer.
#[derive(Clone, Copy, Debug)]
pub struct TouchDispatchEvent {
    /// Which phase the batch belongs to.
    pub phase: TouchPhase,
    /// Touch identifier.
    pub touch_id: u32,
    /// The layer that received the touch.
    pub layer: LayerId,
    /// Position in screen space.
    pub position: Point,
    /// Position in the layer's content space.
    pub local: Point,
    /// Prevent-default flag after the layer listener ran.
    pub prevent_default: bool,
}

/// Emitted when a touch reaches no layer.
///
/// Starts miss when hit testing finds nothing; moves and ends miss when no
/// layer is active for the identifier.
#[derive(Clone, Copy, Debug)]
pub struct TouchMissEvent {
    /// Which phase the batch belongs to.
    pub phase: TouchPhase,
    /// Touch identifier.
    pub touch_id: u32,
    /// Position in screen space.
    pub position: Point,
}

/// Emitted when a touch is refused or cannot be localized.
#[derive(Clone, Copy, Debug)]
pub struct TouchDropEvent {
    /// Which phase the batch belongs to.
    pub phase: TouchPhase,
    /// Touch identifier.
    pub touch_id: u32,
    /// Why the touch was dropped.
    pub reason: DropReason,
}

/// Per-batch outcome emitted once at the end of every dispatch call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BatchSummary {
    /// Which phase the batch belongs to.
    pub phase: TouchPhase,
    /// Number of events in the batch.
    pub events: usize,
    /// Events delivered to a layer.
    pub delivered: usize,
    /// Events that reached no layer.
    pub misses: usize,
    /// Events that were dropped.
    pub dropped: usize,
}

impl BatchSummary {
    /// Summarizes a dispatch report for a batch of `events` touches.
    #[must_use]
    pub fn new(phase: TouchPhase, events: usize, report: &DispatchReport) -> Self {
        Self {
            phase,
            events,
            delivered: report.delivered,
            misses: report.misses,
            dropped: report.dropped.len(),
        }
    }
}

/// Emitted after a render plan has been painted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PaintSummary {
    /// Layers handed to the painter.
    pub painted: usize,
    /// Deepest nesting level reached.
    pub max_depth: usize,
    /// Whether the layer tree topology changed since the previous plan.
    pub topology_changed: bool,
}

// ---------------------------------------------------------------------------
// TraceSink trait
// ---------------------------------------------------------------------------

/// Receives trace events from touch routing and painting.
///
/// All methods have default no-op implementations, so you only need to
/// override the events you care about.
pub trait TraceSink {
    /// Called when a touch is delivered to a layer.
    fn on_touch_dispatched(&mut self, e: &TouchDispatchEvent) {
        _ = e;
    }

    /// Called when a touch reaches no layer.
    fn on_touch_miss(&mut self, e: &TouchMissEvent) {
        _ = e;
    }

    /// Called when a touch is dropped.
    fn on_touch_dropped(&mut self, e: &TouchDropEvent) {
        _ = e;
    }

    /// Called once per dispatched batch.
    fn on_batch_summary(&mut self, s: &BatchSummary) {
        _ = s;
    }

    /// Called after a render plan is painted.
    fn on_paint_summary(&mut self, s: &PaintSummary) {
        _ = s;
    }
}

// ---------------------------------------------------------------------------
// NoopSink
// ---------------------------------------------------------------------------

/// A [`TraceSink`] that discards all events.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSink;

impl TraceSink for NoopSink {}

// ---------------------------------------------------------------------------
// Tracer wrapper
// ---------------------------------------------------------------------------

/// Thin wrapper around an optional [`TraceSink`].
///
/// When the `trace` feature is **off**, every method compiles to nothing. When
/// **on**, each method checks the inner `Option` (one branch) before
/// dispatching to the sink.
pub struct Tracer<'a> {
    #[cfg(feature = "trace")]
    sink: Option<&'a mut dyn TraceSink>,
    #[cfg(not(feature = "trace"))]
    _marker: core::marker::PhantomData<&'a mut dyn TraceSink>,
}

impl core::fmt::Debug for Tracer<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Tracer").finish_non_exhaustive()
    }
}

impl<'a> Tracer<'a> {
    /// Creates a tracer that dispatches to the given sink.
    #[inline]
    #[must_use]
    pub fn new(sink: &'a mut dyn TraceSink) -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: Some(sink) }
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = sink;
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Creates a tracer that discards all events.
    #[inline]
    #[must_use]
    pub fn none() -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: None }
        }
        #[cfg(not(feature = "trace"))]
        {
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Emits a [`TouchDispatchEvent`].
    #[inline]
    pub fn touch_dispatched(&mut self, e: &TouchDispatchEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_touch_dispatched(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`TouchMissEvent`].
    #[inline]
    pub fn touch_miss(&mut self, e: &TouchMissEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_touch_miss(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`TouchDropEvent`].
    #[inline]
    pub fn touch_dropped(&mut self, e: &TouchDropEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_touch_dropped(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`BatchSummary`].
    #[inline]
    pub fn batch_summary(&mut self, s: &BatchSummary) {
        #[cfg(feature = "trace")]
        if let Some(sink) = &mut self.sink {
            sink.on_batch_summary(s);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = s;
        }
    }

    /// Emits a [`PaintSummary`].
    #[inline]
    pub fn paint_summary(&mut self, s: &PaintSummary) {
        #[cfg(feature = "trace")]
        if let Some(sink) = &mut self.sink {
            sink.on_paint_summary(s);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = s;
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
