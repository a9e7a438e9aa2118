// Copyright 2026 the Playfield Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Point hit testing over the layer tree.
//!
//! Hit testing works on local transforms directly, so it reflects every
//! mutation immediately and never waits for
//! [`evaluate`](LayerStore::evaluate).

use kurbo::Point;

use super::id::{INVALID, LayerId};
use super::store::LayerStore;

impl LayerStore {
    /// Finds the deepest interactive layer under `point`.
    ///
    /// `point` is expressed in the content space of `layer`. Children are
    /// searched topmost first; each child receives the point mapped through
    /// its inverse local transform and shifted by its origin. The first child
    /// subtree that reports a hit wins. If no child is hit, `layer` itself is
    /// returned when it is interactive and its hit shape contains the point.
    ///
    /// Hidden layers and layers with no interactive descendants are skipped.
    /// A child with a singular transform covers no area and is never hit.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    #[must_use]
    pub fn hit_test(&self, layer: LayerId, point: Point) -> Option<LayerId> {
        self.validate(layer);
        self.hit_test_at(layer.idx, point).map(|idx| self.handle(idx))
    }

    fn hit_test_at(&self, idx: u32, point: Point) -> Option<u32> {
        let i = idx as usize;
        if !self.flags[i].visible || !self.subtree_interactive[i] {
            return None;
        }

        // Topmost child first.
        let mut child = self.last_child(idx);
        while child != INVALID {
            if let Some(local) = self.parent_to_layer_at(child, point)
                && let Some(hit) = self.hit_test_at(child, local)
            {
                return Some(hit);
            }
            child = self.prev_sibling[child as usize];
        }

        let hit_self = self.flags[i].interactive
            && self.hit_shape[i]
                .as_ref()
                .is_some_and(|shape| shape.contains(point));
        hit_self.then_some(idx)
    }

    fn last_child(&self, idx: u32) -> u32 {
        let mut last = self.first_child[idx as usize];
        if last == INVALID {
            return INVALID;
        }
        while self.next_sibling[last as usize] != INVALID {
            last = self.next_sibling[last as usize];
        }
        last
    }
}
