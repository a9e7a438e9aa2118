// Copyright 2026 the Playfield Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Human-readable trace output.
//!
//! [`PrettyPrintSink`] implements [`TraceSink`] and writes one line per event
//! to a [`Write`](std::io::Write) destination (default: stderr).

use std::io::Write;

use playfield_core::trace::{
    BatchSummary, PaintSummary, TouchDispatchEvent, TouchDropEvent, TouchMissEvent, TraceSink,
};

/// Writes human-readable trace lines to a [`Write`](std::io::Write) destination.
pub struct PrettyPrintSink<W: Write = Box<dyn Write>> {
    writer: W,
}

impl<W: Write> std::fmt::Debug for PrettyPrintSink<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrettyPrintSink").finish_non_exhaustive()
    }
}

impl PrettyPrintSink {
    /// Creates a sink that writes to stderr.
    #[must_use]
    pub fn stderr() -> Self {
        Self {
            writer: Box::new(std::io::stderr()),
        }
    }

    /// Creates a sink that writes to a boxed writer.
    #[must_use]
    pub fn new(writer: Box<dyn Write>) -> Self {
        Self { writer }
    }
}

impl<W: Write> PrettyPrintSink<W> {
    /// Creates a sink that writes to the given destination.
    #[must_use]
    pub fn with_writer(writer: W) -> Self {
        Self { writer }
    }

    /// Consumes the sink and returns the destination.
    #[must_use]
    pub fn into_writer(self) -> W {
        self.writer
    }
}

impl<W: Write> TraceSink for PrettyPrintSink<W> {
    fn on_touch_dispatched(&mut self, e: &TouchDispatchEvent) {
        let prevented = if e.prevent_default { " prevented" } else { "" };
        let _ = writeln!(
            self.writer,
            "[touch:{}] id={} -> {:?} at ({:.1}, {:.1}) local ({:.1}, {:.1}){prevented}",
            e.phase.as_str(),
            e.touch_id,
            e.layer,
            e.position.x,
            e.position.y,
            e.local.x,
            e.local.y,
        );
    }

    fn on_touch_miss(&mut self, e: &TouchMissEvent) {
        let _ = writeln!(
            self.writer,
            "[touch:{}] id={} miss at ({:.1}, {:.1})",
            e.phase.as_str(),
            e.touch_id,
            e.position.x,
            e.position.y,
        );
    }

    fn on_touch_dropped(&mut self, e: &TouchDropEvent) {
        let _ = writeln!(
            self.writer,
            "[touch:{}] id={} DROPPED: {}",
            e.phase.as_str(),
            e.touch_id,
            e.reason.as_str(),
        );
    }

    fn on_batch_summary(&mut self, s: &BatchSummary) {
        let _ = writeln!(
            self.writer,
            "[batch:{}] events={} delivered={} misses={} dropped={}",
            s.phase.as_str(),
            s.events,
            s.delivered,
            s.misses,
            s.dropped,
        );
    }

    fn on_paint_summary(&mut self, s: &PaintSummary) {
        let topology = if s.topology_changed { " topology" } else { "" };
        let _ = writeln!(
            self.writer,
            "[paint] layers={} depth={}{topology}",
            s.painted, s.max_depth,
        );
    }
}
