// Copyright 2026 the Playfield Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! In-memory event recording.
//!
//! [`RecorderSink`] implements [`TraceSink`] and appends every event to a
//! list of [`RecordedEvent`]s, in arrival order. Feed the list to
//! [`export`](crate::export::export) or inspect it directly in tests.

use playfield_core::trace::{
    BatchSummary, PaintSummary, TouchDispatchEvent, TouchDropEvent, TouchMissEvent, TraceSink,
};

/// A recorded trace event.
#[derive(Clone, Copy, Debug)]
pub enum RecordedEvent {
    /// A touch was delivered to a layer.
    Dispatched(TouchDispatchEvent),
    /// A touch reached no layer.
    Miss(TouchMissEvent),
    /// A touch was dropped.
    Dropped(TouchDropEvent),
    /// End of a dispatched batch.
    Batch(BatchSummary),
    /// End of a paint pass.
    Paint(PaintSummary),
}

/// A [`TraceSink`] that keeps every event in memory.
#[derive(Debug, Default)]
pub struct RecorderSink {
    events: Vec<RecordedEvent>,
}

impl RecorderSink {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the recorded events.
    #[must_use]
    pub fn events(&self) -> &[RecordedEvent] {
        &self.events
    }

    /// Consumes the recorder and returns the recorded events.
    #[must_use]
    pub fn into_events(self) -> Vec<RecordedEvent> {
        self.events
    }

    /// Forgets everything recorded so far.
    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl TraceSink for RecorderSink {
    fn on_touch_dispatched(&mut self, e: &TouchDispatchEvent) {
        self.events.push(RecordedEvent::Dispatched(*e));
    }

    fn on_touch_miss(&mut self, e: &TouchMissEvent) {
        self.events.push(RecordedEvent::Miss(*e));
    }

    fn on_touch_dropped(&mut self, e: &TouchDropEvent) {
        self.events.push(RecordedEvent::Dropped(*e));
    }

    fn on_batch_summary(&mut self, s: &BatchSummary) {
        self.events.push(RecordedEvent::Batch(*s));
    }

    fn on_paint_summary(&mut self, s: &PaintSummary) {
        self.events.push(RecordedEvent::Paint(*s));
    }
}
