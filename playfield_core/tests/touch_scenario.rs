// Copyright 2026 the Playfield Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! End-to-end touch routing through a small scene.

use std::cell::RefCell;
use std::rc::Rc;

use kurbo::Point;
use playfield_core::layer::{HitShape, LayerId, LayerStore};
use playfield_core::touch::{LayerListener, TouchDispatcher, TouchEvent, TouchPhase};
use playfield_core::transform::Transform2d;

type Deliveries = Rc<RefCell<Vec<(&'static str, TouchPhase, Point)>>>;

struct Named {
    name: &'static str,
    log: Deliveries,
}

impl LayerListener for Named {
    fn on_touch_start(&mut self, event: &mut TouchEvent) {
        self.log.borrow_mut().push((self.name, TouchPhase::Start, event.local));
    }

    fn on_touch_move(&mut self, event: &mut TouchEvent) {
        self.log.borrow_mut().push((self.name, TouchPhase::Move, event.local));
    }

    fn on_touch_end(&mut self, event: &mut TouchEvent) {
        self.log.borrow_mut().push((self.name, TouchPhase::End, event.local));
    }
}

struct Scene {
    store: LayerStore,
    root: LayerId,
    a: LayerId,
    b: LayerId,
    log: Deliveries,
}

/// Root holding group G, which holds A at (0, 0, 100, 100) and B at
/// (50, 50, 100, 100), B added after A.
fn scene() -> Scene {
    let mut store = LayerStore::new();
    let log = Deliveries::default();
    let root = store.create_layer();
    let group = store.create_layer();
    store.add_child(root, group);

    let mut square = |name, x, y| {
        let id = store.create_layer();
        store.set_transform(id, Transform2d::from_translation(x, y));
        store.set_hit_shape(id, Some(HitShape::sized(100.0, 100.0)));
        store.set_listener(
            id,
            Some(Box::new(Named {
                name,
                log: log.clone(),
            })),
        );
        store.add_child(group, id);
        id
    };
    let a = square("a", 0.0, 0.0);
    let b = square("b", 50.0, 50.0);

    Scene {
        store,
        root,
        a,
        b,
        log,
    }
}

fn at(id: u32, x: f64, y: f64) -> TouchEvent {
    TouchEvent::new(id, 0.0, Point::new(x, y))
}

#[test]
fn press_move_release_goes_to_topmost_layer() {
    let Scene {
        mut store,
        root,
        b,
        log,
        ..
    } = scene();
    let mut dispatcher = TouchDispatcher::new();

    dispatcher.on_touch_start(&mut store, root, &mut [at(0, 75.0, 75.0)]);
    assert_eq!(dispatcher.active_layer(0), Some(b));
    dispatcher.on_touch_move(&mut store, root, &mut [at(0, 75.0, 75.0)]);
    dispatcher.on_touch_end(&mut store, root, &mut [at(0, 75.0, 75.0)]);
    assert_eq!(dispatcher.active_layer(0), None);

    let local = Point::new(25.0, 25.0);
    assert_eq!(
        *log.borrow(),
        vec![
            ("b", TouchPhase::Start, local),
            ("b", TouchPhase::Move, local),
            ("b", TouchPhase::End, local),
        ]
    );

    // A fresh start re-hit-tests and again resolves to B.
    dispatcher.on_touch_start(&mut store, root, &mut [at(0, 75.0, 75.0)]);
    assert_eq!(dispatcher.active_layer(0), Some(b));
    assert_eq!(log.borrow().len(), 4);
}

#[test]
fn fresh_start_sees_tree_changes() {
    let Scene {
        mut store,
        root,
        a,
        b,
        log,
    } = scene();
    let mut dispatcher = TouchDispatcher::new();

    dispatcher.on_touch_start(&mut store, root, &mut [at(0, 75.0, 75.0)]);
    dispatcher.on_touch_end(&mut store, root, &mut [at(0, 75.0, 75.0)]);

    store.set_visible(b, false);
    dispatcher.on_touch_start(&mut store, root, &mut [at(0, 75.0, 75.0)]);
    assert_eq!(dispatcher.active_layer(0), Some(a));
    assert_eq!(log.borrow().last().map(|entry| entry.0), Some("a"));
}

#[test]
fn sequence_stays_with_layer_while_it_moves() {
    let Scene {
        mut store,
        root,
        a,
        log,
        ..
    } = scene();
    let mut dispatcher = TouchDispatcher::new();

    dispatcher.on_touch_start(&mut store, root, &mut [at(1, 10.0, 10.0)]);
    assert_eq!(dispatcher.active_layer(1), Some(a));

    // Slide A under B's area; the touch stays with A.
    store.set_transform(a, Transform2d::from_translation(60.0, 60.0));
    dispatcher.on_touch_move(&mut store, root, &mut [at(1, 80.0, 80.0)]);
    dispatcher.on_touch_end(&mut store, root, &mut [at(1, 80.0, 80.0)]);

    let log = log.borrow();
    assert!(log.iter().all(|entry| entry.0 == "a"));
    assert_eq!(log[1], ("a", TouchPhase::Move, Point::new(20.0, 20.0)));
}

#[test]
fn simultaneous_touches_route_independently() {
    let Scene {
        mut store,
        root,
        a,
        b,
        log,
    } = scene();
    let mut dispatcher = TouchDispatcher::new();

    let report = dispatcher.on_touch_start(
        &mut store,
        root,
        &mut [at(0, 10.0, 10.0), at(1, 140.0, 140.0), at(2, 400.0, 0.0)],
    );
    assert_eq!(report.delivered, 2);
    assert_eq!(report.misses, 1);
    assert_eq!(dispatcher.active_layer(0), Some(a));
    assert_eq!(dispatcher.active_layer(1), Some(b));
    assert_eq!(dispatcher.active_layer(2), None);

    dispatcher.on_touch_end(&mut store, root, &mut [at(1, 0.0, 0.0)]);
    assert_eq!(dispatcher.active_layer(0), Some(a));
    assert_eq!(dispatcher.active_count(), 1);
    assert_eq!(log.borrow().len(), 3);
}
