// Copyright 2026 the Playfield Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tree traversal utilities.

use super::id::{INVALID, LayerId};
use super::store::LayerStore;

/// An iterator over the direct children of a layer, in paint order
/// (bottom-most first).
///
/// Created by [`LayerStore::children`].
#[derive(Debug)]
pub struct Children<'a> {
    store: &'a LayerStore,
    front: u32,
    back: u32,
}

impl<'a> Children<'a> {
    pub(crate) fn new(store: &'a LayerStore, first: u32) -> Self {
        let mut last = first;
        if last != INVALID {
            while store.next_sibling[last as usize] != INVALID {
                last = store.next_sibling[last as usize];
            }
        }
        Self {
            store,
            front: first,
            back: last,
        }
    }

    fn handle(&self, idx: u32) -> LayerId {
        LayerId {
            idx,
            generation: self.store.generation[idx as usize],
        }
    }
}

impl Iterator for Children<'_> {
    type Item = LayerId;

    fn next(&mut self) -> Option<LayerId> {
        if self.front == INVALID {
            return None;
        }
        let idx = self.front;
        if idx == self.back {
            self.front = INVALID;
            self.back = INVALID;
        } else {
            self.front = self.store.next_sibling[idx as usize];
        }
        Some(self.handle(idx))
    }
}

impl DoubleEndedIterator for Children<'_> {
    fn next_back(&mut self) -> Option<LayerId> {
        if self.back == INVALID {
            return None;
        }
        let idx = self.back;
        if idx == self.front {
            self.front = INVALID;
            self.back = INVALID;
        } else {
            self.back = self.store.prev_sibling[idx as usize];
        }
        Some(self.handle(idx))
    }
}
