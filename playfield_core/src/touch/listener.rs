// Copyright 2026 the Playfield Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Listener capabilities for touch delivery.

use super::event::TouchEvent;

/// Receives every touch batch before any hit testing happens.
///
/// The global listener sees screen positions only. It may set
/// `prevent_default` on individual events; the flag is carried into the
/// per-layer dispatch that follows. It cannot stop hit testing.
pub trait TouchListener {
    /// Called with a batch of new touches.
    fn on_touch_start(&mut self, events: &mut [TouchEvent]) {
        _ = events;
    }

    /// Called with a batch of moved touches.
    fn on_touch_move(&mut self, events: &mut [TouchEvent]) {
        _ = events;
    }

    /// Called with a batch of lifted touches.
    fn on_touch_end(&mut self, events: &mut [TouchEvent]) {
        _ = events;
    }
}

/// Receives the touches routed to one layer.
///
/// Attached with [`LayerStore::set_listener`](crate::layer::LayerStore::set_listener).
/// Each call receives a localized copy of the event; changes to
/// `prevent_default` are copied back to the caller's event after the call
/// returns.
///
/// Listeners get no access to the layer tree, so a batch is always routed
/// against one consistent tree.
pub trait LayerListener {
    /// Called when a touch starts on the layer.
    fn on_touch_start(&mut self, event: &mut TouchEvent) {
        _ = event;
    }

    /// Called when a touch that started on the layer moves.
    fn on_touch_move(&mut self, event: &mut TouchEvent) {
        _ = event;
    }

    /// Called when a touch that started on the layer ends.
    fn on_touch_end(&mut self, event: &mut TouchEvent) {
        _ = event;
    }
}
