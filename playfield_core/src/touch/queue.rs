// Copyright 2026 the Playfield Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Hand-off of touch batches from an input thread to the render thread.

use alloc::collections::VecDeque;
use alloc::sync::Arc;
use alloc::vec::Vec;

use parking_lot::Mutex;

use super::dispatcher::{DispatchReport, TouchConfig, TouchDispatcher};
use super::event::{TouchEvent, TouchPhase};
use crate::layer::{LayerId, LayerStore};
use crate::trace::Tracer;

/// Bounded FIFO queue with a `drop_oldest` overflow policy.
///
/// Once full, new pushes remove the oldest item before inserting the newest.
#[derive(Debug, Clone)]
struct BoundedQueue<T> {
    items: VecDeque<T>,
    capacity: usize,
    dropped_count: u64,
}

impl<T> BoundedQueue<T> {
    fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            items: VecDeque::with_capacity(capacity),
            capacity,
            dropped_count: 0,
        }
    }

    /// Appends `item`, returning the evicted oldest item if the queue was full.
    fn push(&mut self, item: T) -> Option<T> {
        let evicted = if self.items.len() == self.capacity {
            self.dropped_count += 1;
            self.items.pop_front()
        } else {
            None
        };
        self.items.push_back(item);
        evicted
    }

    fn take_all(&mut self) -> VecDeque<T> {
        core::mem::take(&mut self.items)
    }

    fn len(&self) -> usize {
        self.items.len()
    }

    fn dropped_count(&self) -> u64 {
        self.dropped_count
    }
}

/// A batch of touches sharing one phase, as delivered by the platform.
#[derive(Clone, Debug, PartialEq)]
pub struct TouchBatch {
    /// Phase of every event in the batch.
    pub phase: TouchPhase,
    /// The events, in platform order.
    pub events: Vec<TouchEvent>,
}

type Shared = Arc<Mutex<BoundedQueue<TouchBatch>>>;

/// Render-thread end of the touch hand-off.
///
/// Platforms usually report touches on an input thread while the layer tree
/// lives on the render thread. The input thread pushes batches through a
/// [`TouchSender`]; the render thread calls
/// [`dispatch_pending`](Self::dispatch_pending) once per frame to route them
/// in arrival order.
///
/// The queue holds at most [`TouchConfig::queue_capacity`] batches. When it is
/// full the oldest batch is dropped, so a stalled render thread loses the
/// stalest input first.
#[derive(Debug)]
pub struct TouchQueue {
    shared: Shared,
}

/// Input-thread end of the touch hand-off. Cheap to clone.
#[derive(Clone, Debug)]
pub struct TouchSender {
    shared: Shared,
}

impl TouchQueue {
    /// Creates a queue holding at most `capacity` batches (at least one).
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            shared: Arc::new(Mutex::new(BoundedQueue::with_capacity(capacity))),
        }
    }

    /// Creates a queue sized by `config`.
    #[must_use]
    pub fn with_config(config: &TouchConfig) -> Self {
        Self::new(config.queue_capacity)
    }

    /// Returns a sender for the input thread.
    #[must_use]
    pub fn sender(&self) -> TouchSender {
        TouchSender {
            shared: Arc::clone(&self.shared),
        }
    }

    /// Returns the number of batches waiting.
    #[must_use]
    pub fn len(&self) -> usize {
        self.shared.lock().len()
    }

    /// Returns whether no batch is waiting.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns how many batches have been dropped because the queue was full.
    #[must_use]
    pub fn dropped_count(&self) -> u64 {
        self.shared.lock().dropped_count()
    }

    /// Removes and returns every waiting batch in arrival order.
    #[must_use]
    pub fn drain(&self) -> Vec<TouchBatch> {
        // Release the lock before handing the batches out.
        let items = self.shared.lock().take_all();
        items.into()
    }

    /// Routes every waiting batch through `dispatcher` in arrival order and
    /// returns the combined report.
    pub fn dispatch_pending(
        &self,
        dispatcher: &mut TouchDispatcher,
        store: &mut LayerStore,
        root: LayerId,
    ) -> DispatchReport {
        self.dispatch_pending_traced(dispatcher, store, root, &mut Tracer::none())
    }

    /// Like [`dispatch_pending`](Self::dispatch_pending), reporting each
    /// routing decision to `tracer`.
    pub fn dispatch_pending_traced(
        &self,
        dispatcher: &mut TouchDispatcher,
        store: &mut LayerStore,
        root: LayerId,
        tracer: &mut Tracer<'_>,
    ) -> DispatchReport {
        let mut report = DispatchReport::default();
        for mut batch in self.drain() {
            report.merge(dispatcher.dispatch_traced(
                store,
                root,
                batch.phase,
                &mut batch.events,
                tracer,
            ));
        }
        report
    }
}

impl TouchSender {
    /// Queues a batch of touches.
    ///
    /// Never blocks for longer than it takes to push onto the queue. If the
    /// queue is full, the oldest batch is dropped with a warning.
    pub fn send(&self, phase: TouchPhase, events: impl Into<Vec<TouchEvent>>) {
        let batch = TouchBatch {
            phase,
            events: events.into(),
        };
        let evicted = self.shared.lock().push(batch);
        if let Some(old) = evicted {
            log::warn!(
                "touch queue full, dropped oldest {} batch of {} events",
                old.phase.as_str(),
                old.events.len()
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use kurbo::Point;

    use super::*;
    use crate::layer::HitShape;

    fn touch(id: u32) -> TouchEvent {
        TouchEvent::new(id, 0.0, Point::new(5.0, 5.0))
    }

    #[test]
    fn zero_capacity_is_promoted_to_one() {
        let mut queue = BoundedQueue::with_capacity(0);
        assert_eq!(queue.push(10_u32), None);
        assert_eq!(queue.push(11_u32), Some(10));

        assert_eq!(queue.len(), 1);
        assert_eq!(queue.dropped_count(), 1);
    }

    #[test]
    fn overflow_drops_oldest_batch() {
        let queue = TouchQueue::new(2);
        let sender = queue.sender();
        sender.send(TouchPhase::Start, vec![touch(0)]);
        sender.send(TouchPhase::Move, vec![touch(0)]);
        sender.send(TouchPhase::End, vec![touch(0)]);

        assert_eq!(queue.dropped_count(), 1);
        let phases: Vec<_> = queue.drain().into_iter().map(|b| b.phase).collect();
        assert_eq!(phases, vec![TouchPhase::Move, TouchPhase::End]);
        assert!(queue.is_empty());
    }

    #[test]
    fn batches_cross_threads_in_order() {
        let queue = TouchQueue::with_config(&TouchConfig::default());
        let sender = queue.sender();

        let handle = std::thread::spawn(move || {
            sender.send(TouchPhase::Start, [touch(1)]);
            sender.send(TouchPhase::Move, [touch(1)]);
            sender.send(TouchPhase::End, [touch(1)]);
        });
        handle.join().unwrap();

        let batches = queue.drain();
        let phases: Vec<_> = batches.iter().map(|b| b.phase).collect();
        assert_eq!(
            phases,
            vec![TouchPhase::Start, TouchPhase::Move, TouchPhase::End]
        );
    }

    #[test]
    fn dispatch_pending_routes_everything() {
        let mut store = LayerStore::new();
        let root = store.create_layer();
        let layer = store.create_layer();
        store.set_hit_shape(layer, Some(HitShape::sized(10.0, 10.0)));
        store.set_interactive(layer, true);
        store.add_child(root, layer);

        let queue = TouchQueue::new(8);
        let sender = queue.sender();
        sender.send(TouchPhase::Start, vec![touch(0), touch(1)]);
        sender.send(TouchPhase::End, vec![touch(0)]);

        let mut dispatcher = TouchDispatcher::new();
        let report = queue.dispatch_pending(&mut dispatcher, &mut store, root);
        assert_eq!(report.delivered, 3);
        assert_eq!(dispatcher.active_layer(0), None);
        assert_eq!(dispatcher.active_layer(1), Some(layer));
        assert!(queue.is_empty());
    }
}
