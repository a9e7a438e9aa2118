// Copyright 2026 the Playfield Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Routing of touch batches to layers.

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;

use super::event::{TouchEvent, TouchPhase};
use super::listener::TouchListener;
use crate::layer::{LayerId, LayerStore};
use crate::trace::{BatchSummary, TouchDispatchEvent, TouchDropEvent, TouchMissEvent, Tracer};

/// Touch routing configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TouchConfig {
    /// Highest touch identifier that gets an active-layer entry. Touches with
    /// a larger identifier are dropped with a warning.
    pub max_touch_id: u32,
    /// Number of batches a [`TouchQueue`](super::TouchQueue) holds before it
    /// starts dropping the oldest.
    pub queue_capacity: usize,
}

impl Default for TouchConfig {
    fn default() -> Self {
        Self {
            max_touch_id: 32,
            queue_capacity: 256,
        }
    }
}

/// Why a touch was not delivered.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DropReason {
    /// The identifier is above [`TouchConfig::max_touch_id`].
    IdOutOfRange,
    /// The screen point could not be mapped into layer space because a
    /// transform on the way is not invertible.
    SingularTransform,
    /// The layer that owned the touch was destroyed before the touch ended.
    /// The active-layer entry is cleared.
    StaleLayer,
}

impl DropReason {
    /// A short name, for diagnostics.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::IdOutOfRange => "id out of range",
            Self::SingularTransform => "singular transform",
            Self::StaleLayer => "stale layer",
        }
    }
}

/// A touch that was refused during dispatch.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DroppedTouch {
    /// Touch identifier.
    pub id: u32,
    /// Why it was dropped.
    pub reason: DropReason,
}

/// What happened to a batch of touches.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DispatchReport {
    /// Events delivered to a layer.
    pub delivered: usize,
    /// Events that reached no layer: starts that hit nothing, and moves or
    /// ends with no active layer.
    pub misses: usize,
    /// Events that were refused.
    pub dropped: Vec<DroppedTouch>,
}

impl DispatchReport {
    /// Folds another report into this one.
    pub fn merge(&mut self, other: Self) {
        self.delivered += other.delivered;
        self.misses += other.misses;
        self.dropped.extend(other.dropped);
    }

    fn drop_touch(
        &mut self,
        phase: TouchPhase,
        id: u32,
        reason: DropReason,
        tracer: &mut Tracer<'_>,
    ) {
        self.dropped.push(DroppedTouch { id, reason });
        tracer.touch_dropped(&TouchDropEvent {
            phase,
            touch_id: id,
            reason,
        });
    }

    fn miss(&mut self, phase: TouchPhase, event: &TouchEvent, tracer: &mut Tracer<'_>) {
        self.misses += 1;
        tracer.touch_miss(&TouchMissEvent {
            phase,
            touch_id: event.id,
            position: event.position,
        });
    }
}

/// Routes touch batches to layers and remembers which layer owns each touch.
///
/// A touch start is hit-tested against the tree under `root`; the layer that
/// is hit becomes the *active layer* for the touch identifier. Moves and ends
/// for that identifier go to the same layer without a new hit test, localized
/// against the layer's transform at that moment. An end clears the entry, so
/// the next start with the same identifier is hit-tested afresh.
///
/// Entries are never timed out: a sequence that never ends keeps its entry
/// until the identifier is reused and ended.
pub struct TouchDispatcher {
    enabled: bool,
    listener: Option<Box<dyn TouchListener>>,
    active: Vec<Option<LayerId>>,
    config: TouchConfig,
}

impl fmt::Debug for TouchDispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TouchDispatcher")
            .field("enabled", &self.enabled)
            .field("has_listener", &self.listener.is_some())
            .field("active", &self.active)
            .field("config", &self.config)
            .finish()
    }
}

impl Default for TouchDispatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl TouchDispatcher {
    /// Creates an enabled dispatcher with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(TouchConfig::default())
    }

    /// Creates an enabled dispatcher with the given configuration.
    #[must_use]
    pub fn with_config(config: TouchConfig) -> Self {
        Self {
            enabled: true,
            listener: None,
            active: Vec::new(),
            config,
        }
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &TouchConfig {
        &self.config
    }

    /// Returns whether touches are being dispatched.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Enables or disables dispatch. A disabled dispatcher ignores every
    /// batch, including the global listener, and keeps its active entries.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Installs (or with `None`, removes) the global listener. Returns the
    /// previous listener.
    pub fn set_listener(
        &mut self,
        listener: Option<Box<dyn TouchListener>>,
    ) -> Option<Box<dyn TouchListener>> {
        core::mem::replace(&mut self.listener, listener)
    }

    /// Returns the layer that owns touch `id`, if any.
    #[must_use]
    pub fn active_layer(&self, id: u32) -> Option<LayerId> {
        self.active.get(id as usize).copied().flatten()
    }

    /// Returns the number of touches that currently have an active layer.
    #[must_use]
    pub fn active_count(&self) -> usize {
        self.active.iter().filter(|entry| entry.is_some()).count()
    }

    /// Dispatches a batch of new touches.
    pub fn on_touch_start(
        &mut self,
        store: &mut LayerStore,
        root: LayerId,
        events: &mut [TouchEvent],
    ) -> DispatchReport {
        self.dispatch_traced(store, root, TouchPhase::Start, events, &mut Tracer::none())
    }

    /// Dispatches a batch of moved touches.
    pub fn on_touch_move(
        &mut self,
        store: &mut LayerStore,
        root: LayerId,
        events: &mut [TouchEvent],
    ) -> DispatchReport {
        self.dispatch_traced(store, root, TouchPhase::Move, events, &mut Tracer::none())
    }

    /// Dispatches a batch of lifted touches.
    pub fn on_touch_end(
        &mut self,
        store: &mut LayerStore,
        root: LayerId,
        events: &mut [TouchEvent],
    ) -> DispatchReport {
        self.dispatch_traced(store, root, TouchPhase::End, events, &mut Tracer::none())
    }

    /// Dispatches a batch of touches in the given phase.
    ///
    /// Event positions are in the parent space of `root`, which is screen
    /// space because `root` has no parent.
    ///
    /// # Panics
    ///
    /// Panics if `root` is stale or has a parent.
    pub fn dispatch(
        &mut self,
        store: &mut LayerStore,
        root: LayerId,
        phase: TouchPhase,
        events: &mut [TouchEvent],
    ) -> DispatchReport {
        self.dispatch_traced(store, root, phase, events, &mut Tracer::none())
    }

    /// Like [`dispatch`](Self::dispatch), reporting each routing decision to
    /// `tracer`.
    ///
    /// Events are processed in array order. The global listener runs first
    /// for the whole batch.
    ///
    /// # Panics
    ///
    /// Panics if `root` is stale or has a parent.
    pub fn dispatch_traced(
        &mut self,
        store: &mut LayerStore,
        root: LayerId,
        phase: TouchPhase,
        events: &mut [TouchEvent],
        tracer: &mut Tracer<'_>,
    ) -> DispatchReport {
        assert!(
            store.parent(root).is_none(),
            "touch root must not have a parent"
        );
        let mut report = DispatchReport::default();
        if !self.enabled {
            return report;
        }

        if let Some(listener) = &mut self.listener {
            match phase {
                TouchPhase::Start => listener.on_touch_start(events),
                TouchPhase::Move => listener.on_touch_move(events),
                TouchPhase::End => listener.on_touch_end(events),
            }
        }

        match phase {
            TouchPhase::Start => self.start(store, root, events, &mut report, tracer),
            TouchPhase::Move | TouchPhase::End => {
                self.follow(store, phase, events, &mut report, tracer);
            }
        }

        tracer.batch_summary(&BatchSummary::new(phase, events.len(), &report));
        report
    }

    fn start(
        &mut self,
        store: &mut LayerStore,
        root: LayerId,
        events: &mut [TouchEvent],
        report: &mut DispatchReport,
        tracer: &mut Tracer<'_>,
    ) {
        let phase = TouchPhase::Start;
        if !store.has_interactive_subtree(root) {
            for event in events.iter() {
                report.miss(phase, event, tracer);
            }
            return;
        }

        for event in events.iter_mut() {
            let Ok(point) = store.parent_to_layer(root, event.position) else {
                log::debug!("touch {} dropped: root transform is singular", event.id);
                report.drop_touch(phase, event.id, DropReason::SingularTransform, tracer);
                continue;
            };
            let Some(layer) = store.hit_test(root, point) else {
                report.miss(phase, event, tracer);
                continue;
            };
            if !self.set_active(event.id, Some(layer)) {
                report.drop_touch(phase, event.id, DropReason::IdOutOfRange, tracer);
                continue;
            }
            deliver(store, layer, phase, event, report, tracer);
        }
    }

    fn follow(
        &mut self,
        store: &mut LayerStore,
        phase: TouchPhase,
        events: &mut [TouchEvent],
        report: &mut DispatchReport,
        tracer: &mut Tracer<'_>,
    ) {
        for event in events.iter_mut() {
            if event.id > self.config.max_touch_id {
                log::warn!(
                    "touch {} dropped: id above max {}",
                    event.id,
                    self.config.max_touch_id
                );
                report.drop_touch(phase, event.id, DropReason::IdOutOfRange, tracer);
                continue;
            }
            let Some(layer) = self.active_layer(event.id) else {
                report.miss(phase, event, tracer);
                continue;
            };
            if !store.is_alive(layer) {
                log::debug!("touch {} dropped: {layer:?} was destroyed", event.id);
                self.set_active(event.id, None);
                report.drop_touch(phase, event.id, DropReason::StaleLayer, tracer);
                continue;
            }
            deliver(store, layer, phase, event, report, tracer);
            if phase == TouchPhase::End {
                self.set_active(event.id, None);
            }
        }
    }

    /// Records (or clears) the active layer for `id`, growing the table as
    /// needed. Returns `false` if `id` is above the configured maximum.
    fn set_active(&mut self, id: u32, layer: Option<LayerId>) -> bool {
        if id > self.config.max_touch_id {
            log::warn!(
                "refusing to track active layer for touch id {id} (max {})",
                self.config.max_touch_id
            );
            return false;
        }
        let idx = id as usize;
        if self.active.len() <= idx {
            if layer.is_none() {
                return true;
            }
            self.active.resize(idx + 1, None);
        }
        self.active[idx] = layer;
        true
    }
}

/// Localizes `event` into `layer`'s content space and calls its listener.
///
/// The listener works on a localized copy; its `prevent_default` is copied
/// back to `event` afterwards.
fn deliver(
    store: &mut LayerStore,
    layer: LayerId,
    phase: TouchPhase,
    event: &mut TouchEvent,
    report: &mut DispatchReport,
    tracer: &mut Tracer<'_>,
) {
    let local = match store.screen_to_layer(layer, event.position) {
        Ok(local) => local,
        Err(err) => {
            log::debug!("touch {} dropped: {err}", event.id);
            report.drop_touch(phase, event.id, DropReason::SingularTransform, tracer);
            return;
        }
    };

    let mut local_event = event.localize(local);
    if let Some(listener) = store.listener_mut(layer) {
        match phase {
            TouchPhase::Start => listener.on_touch_start(&mut local_event),
            TouchPhase::Move => listener.on_touch_move(&mut local_event),
            TouchPhase::End => listener.on_touch_end(&mut local_event),
        }
    }
    event.prevent_default = local_event.prevent_default;

    report.delivered += 1;
    tracer.touch_dispatched(&TouchDispatchEvent {
        phase,
        touch_id: event.id,
        layer,
        position: event.position,
        local,
        prevent_default: event.prevent_default,
    });
}

#[cfg(test)]
mod tests {
    use alloc::rc::Rc;
    use alloc::vec;
    use core::cell::RefCell;

    use kurbo::Point;

    use super::*;
    use crate::layer::HitShape;
    use crate::touch::LayerListener;
    use crate::transform::Transform2d;

    type Log = Rc<RefCell<Vec<(TouchPhase, u32, Point)>>>;

    struct Recorder {
        log: Log,
        prevent_on_start: bool,
    }

    impl LayerListener for Recorder {
        fn on_touch_start(&mut self, event: &mut TouchEvent) {
            self.log.borrow_mut().push((TouchPhase::Start, event.id, event.local));
            if self.prevent_on_start {
                event.prevent_default = true;
            }
        }

        fn on_touch_move(&mut self, event: &mut TouchEvent) {
            self.log.borrow_mut().push((TouchPhase::Move, event.id, event.local));
        }

        fn on_touch_end(&mut self, event: &mut TouchEvent) {
            self.log.borrow_mut().push((TouchPhase::End, event.id, event.local));
        }
    }

    fn recorded(store: &mut LayerStore, parent: LayerId, x: f64, y: f64) -> (LayerId, Log) {
        let log = Log::default();
        let id = store.create_layer();
        store.set_transform(id, Transform2d::from_translation(x, y));
        store.set_hit_shape(id, Some(HitShape::sized(100.0, 100.0)));
        store.set_listener(
            id,
            Some(Box::new(Recorder {
                log: log.clone(),
                prevent_on_start: false,
            })),
        );
        store.add_child(parent, id);
        (id, log)
    }

    fn touch(id: u32, x: f64, y: f64) -> TouchEvent {
        TouchEvent::new(id, 0.0, Point::new(x, y))
    }

    #[test]
    fn start_records_active_layer_and_localizes() {
        let mut store = LayerStore::new();
        let root = store.create_layer();
        let (layer, log) = recorded(&mut store, root, 10.0, 20.0);
        let mut dispatcher = TouchDispatcher::new();

        let report = dispatcher.on_touch_start(&mut store, root, &mut [touch(2, 15.0, 25.0)]);
        assert_eq!(report.delivered, 1);
        assert_eq!(dispatcher.active_layer(2), Some(layer));
        assert_eq!(*log.borrow(), vec![(TouchPhase::Start, 2, Point::new(5.0, 5.0))]);
    }

    #[test]
    fn miss_creates_no_entry() {
        let mut store = LayerStore::new();
        let root = store.create_layer();
        let (_, log) = recorded(&mut store, root, 0.0, 0.0);
        let mut dispatcher = TouchDispatcher::new();

        let report = dispatcher.on_touch_start(&mut store, root, &mut [touch(0, 500.0, 500.0)]);
        assert_eq!(report.misses, 1);
        assert_eq!(report.delivered, 0);
        assert_eq!(dispatcher.active_count(), 0);
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn root_without_interactive_layers_misses_everything() {
        let mut store = LayerStore::new();
        let root = store.create_layer();
        let child = store.create_layer();
        store.set_hit_shape(child, Some(HitShape::sized(100.0, 100.0)));
        store.add_child(root, child);
        let mut dispatcher = TouchDispatcher::new();

        let mut batch = [touch(0, 1.0, 1.0), touch(1, 2.0, 2.0)];
        let report = dispatcher.on_touch_start(&mut store, root, &mut batch);
        assert_eq!(report.misses, 2);
        assert_eq!(dispatcher.active_count(), 0);
    }

    #[test]
    fn root_transform_and_origin_map_screen_points() {
        let mut store = LayerStore::new();
        let root = store.create_layer();
        store.set_transform(root, Transform2d::from_scale(2.0, 2.0));
        store.set_origin(root, Point::new(10.0, 10.0));
        let (_, log) = recorded(&mut store, root, 0.0, 0.0);
        let mut dispatcher = TouchDispatcher::new();

        // Screen (20, 20) -> root (10, 10) + origin (10, 10) = (20, 20).
        dispatcher.on_touch_start(&mut store, root, &mut [touch(0, 20.0, 20.0)]);
        assert_eq!(*log.borrow(), vec![(TouchPhase::Start, 0, Point::new(20.0, 20.0))]);
    }

    #[test]
    fn move_follows_current_transform() {
        let mut store = LayerStore::new();
        let root = store.create_layer();
        let (layer, log) = recorded(&mut store, root, 0.0, 0.0);
        let mut dispatcher = TouchDispatcher::new();

        dispatcher.on_touch_start(&mut store, root, &mut [touch(1, 50.0, 50.0)]);
        store.set_transform(layer, Transform2d::from_translation(300.0, 0.0));

        // Outside the layer's new bounds, still routed to it.
        let report = dispatcher.on_touch_move(&mut store, root, &mut [touch(1, 60.0, 50.0)]);
        assert_eq!(report.delivered, 1);
        assert_eq!(log.borrow()[1], (TouchPhase::Move, 1, Point::new(-240.0, 50.0)));
    }

    #[test]
    fn end_clears_entry() {
        let mut store = LayerStore::new();
        let root = store.create_layer();
        let (_, log) = recorded(&mut store, root, 0.0, 0.0);
        let mut dispatcher = TouchDispatcher::new();

        dispatcher.on_touch_start(&mut store, root, &mut [touch(3, 5.0, 5.0)]);
        dispatcher.on_touch_end(&mut store, root, &mut [touch(3, 5.0, 5.0)]);
        assert_eq!(dispatcher.active_layer(3), None);

        // A late move for the ended touch is inert.
        let report = dispatcher.on_touch_move(&mut store, root, &mut [touch(3, 5.0, 5.0)]);
        assert_eq!(report.misses, 1);
        assert_eq!(log.borrow().len(), 2);
    }

    #[test]
    fn untracked_move_and_end_are_inert() {
        let mut store = LayerStore::new();
        let root = store.create_layer();
        let (_, log) = recorded(&mut store, root, 0.0, 0.0);
        let mut dispatcher = TouchDispatcher::new();

        let report = dispatcher.on_touch_move(&mut store, root, &mut [touch(7, 5.0, 5.0)]);
        assert_eq!(report.misses, 1);
        let report = dispatcher.on_touch_end(&mut store, root, &mut [touch(7, 5.0, 5.0)]);
        assert_eq!(report.misses, 1);
        assert!(log.borrow().is_empty());
        assert_eq!(dispatcher.active_count(), 0);
    }

    #[test]
    fn ids_above_maximum_are_dropped_and_batch_continues() {
        let mut store = LayerStore::new();
        let root = store.create_layer();
        let (layer, log) = recorded(&mut store, root, 0.0, 0.0);
        let mut dispatcher = TouchDispatcher::new();

        let report = dispatcher.on_touch_start(
            &mut store,
            root,
            &mut [touch(33, 5.0, 5.0), touch(32, 6.0, 6.0)],
        );
        assert_eq!(
            report.dropped,
            vec![DroppedTouch {
                id: 33,
                reason: DropReason::IdOutOfRange,
            }]
        );
        assert_eq!(report.delivered, 1);
        assert_eq!(dispatcher.active_layer(32), Some(layer));
        assert_eq!(dispatcher.active_layer(33), None);
        assert_eq!(log.borrow().len(), 1);
    }

    #[test]
    fn moves_and_ends_above_maximum_are_dropped_not_missed() {
        let mut store = LayerStore::new();
        let root = store.create_layer();
        let (_, log) = recorded(&mut store, root, 0.0, 0.0);
        let mut dispatcher = TouchDispatcher::new();

        for phase in [TouchPhase::Move, TouchPhase::End] {
            let report =
                dispatcher.dispatch(&mut store, root, phase, &mut [touch(40, 5.0, 5.0)]);
            assert_eq!(report.misses, 0);
            assert_eq!(
                report.dropped,
                vec![DroppedTouch {
                    id: 40,
                    reason: DropReason::IdOutOfRange,
                }]
            );
        }
        assert!(log.borrow().is_empty());
    }

    #[test]
    #[should_panic(expected = "touch root must not have a parent")]
    fn nested_root_is_rejected() {
        let mut store = LayerStore::new();
        let outer = store.create_layer();
        let inner = store.create_layer();
        store.add_child(outer, inner);
        store.set_transform(outer, Transform2d::from_translation(50.0, 0.0));
        let (_, _log) = recorded(&mut store, inner, 0.0, 0.0);
        let mut dispatcher = TouchDispatcher::new();

        dispatcher.on_touch_start(&mut store, inner, &mut [touch(0, 55.0, 5.0)]);
    }

    #[test]
    fn prevent_default_propagates_both_ways() {
        let mut store = LayerStore::new();
        let root = store.create_layer();
        let log = Log::default();
        let layer = store.create_layer();
        store.set_hit_shape(layer, Some(HitShape::sized(10.0, 10.0)));
        store.set_listener(
            layer,
            Some(Box::new(Recorder {
                log,
                prevent_on_start: true,
            })),
        );
        store.add_child(root, layer);

        struct Global;
        impl TouchListener for Global {
            fn on_touch_move(&mut self, events: &mut [TouchEvent]) {
                for event in events {
                    event.prevent_default = true;
                }
            }
        }

        let mut dispatcher = TouchDispatcher::new();
        dispatcher.set_listener(Some(Box::new(Global)));

        let mut events = [touch(0, 1.0, 1.0)];
        dispatcher.on_touch_start(&mut store, root, &mut events);
        assert!(events[0].prevent_default, "set by layer listener");

        let mut events = [touch(0, 1.0, 1.0)];
        dispatcher.on_touch_move(&mut store, root, &mut events);
        assert!(events[0].prevent_default, "set by global listener, kept by layer");
    }

    #[test]
    fn disabled_dispatcher_ignores_batches() {
        let mut store = LayerStore::new();
        let root = store.create_layer();
        let (_, log) = recorded(&mut store, root, 0.0, 0.0);
        let mut dispatcher = TouchDispatcher::new();
        dispatcher.set_enabled(false);

        let report = dispatcher.on_touch_start(&mut store, root, &mut [touch(0, 5.0, 5.0)]);
        assert_eq!(report, DispatchReport::default());
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn destroyed_active_layer_is_dropped() {
        let mut store = LayerStore::new();
        let root = store.create_layer();
        let (layer, _) = recorded(&mut store, root, 0.0, 0.0);
        let mut dispatcher = TouchDispatcher::new();

        dispatcher.on_touch_start(&mut store, root, &mut [touch(0, 5.0, 5.0)]);
        store.destroy_layer(layer);
        // Reuse the slot so only the generation tells the layers apart.
        let _reused = store.create_layer();

        let report = dispatcher.on_touch_move(&mut store, root, &mut [touch(0, 5.0, 5.0)]);
        assert_eq!(
            report.dropped,
            vec![DroppedTouch {
                id: 0,
                reason: DropReason::StaleLayer,
            }]
        );
        assert_eq!(dispatcher.active_layer(0), None);
    }

    #[test]
    fn singular_active_layer_is_dropped_without_nan() {
        let mut store = LayerStore::new();
        let root = store.create_layer();
        let (layer, log) = recorded(&mut store, root, 0.0, 0.0);
        let mut dispatcher = TouchDispatcher::new();

        dispatcher.on_touch_start(&mut store, root, &mut [touch(0, 5.0, 5.0)]);
        store.set_transform(layer, Transform2d::from_scale(0.0, 0.0));

        let report = dispatcher.on_touch_end(&mut store, root, &mut [touch(0, 5.0, 5.0)]);
        assert_eq!(report.dropped[0].reason, DropReason::SingularTransform);
        assert_eq!(log.borrow().len(), 1);
        // The entry is still cleared by the end.
        assert_eq!(dispatcher.active_layer(0), None);
    }
}
