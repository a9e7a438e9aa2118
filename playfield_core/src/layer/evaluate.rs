// Copyright 2026 the Playfield Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Recomputing inherited layer state before a frame is painted.
//!
//! Setters only record what changed. [`LayerStore::evaluate`] then brings
//! the three inherited properties up to date, visiting parents before their
//! children:
//!
//! - `world_transform = parent_world * local * translate(-origin)`
//! - `effective_hidden = parent_hidden || !visible`
//! - `effective_alpha = parent_alpha * alpha`
//!
//! Clip and content are not inherited, so painters read them straight from
//! the store. Hit testing and touch localization walk local transforms and
//! never wait for an evaluation.

use alloc::vec::Vec;

use super::id::INVALID;
use super::store::LayerStore;
use crate::dirty;
use crate::transform::Transform2d;

/// Summary of one [`LayerStore::evaluate`] call.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameChanges {
    /// Number of layers whose world transform and hidden state were
    /// recomputed.
    pub transforms: usize,
    /// Number of layers whose effective alpha was recomputed.
    pub alphas: usize,
    /// Whether layers were created, destroyed, attached, or detached since
    /// the previous evaluation.
    pub topology_changed: bool,
}

impl FrameChanges {
    /// Returns `true` if the evaluation found nothing to do.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.transforms == 0 && self.alphas == 0 && !self.topology_changed
    }
}

impl LayerStore {
    /// Brings world transforms, effective alpha, and effective hidden state
    /// up to date and reports how much work that took.
    pub fn evaluate(&mut self) -> FrameChanges {
        let topology_changed = core::mem::take(&mut self.topology_dirty);
        let transforms = self.refresh_world_transforms();
        let alphas = self.refresh_effective_alphas();
        if transforms > 0 || alphas > 0 || topology_changed {
            log::trace!(
                "evaluated {transforms} transforms, {alphas} alphas \
                 (topology changed: {topology_changed})"
            );
        }
        FrameChanges {
            transforms,
            alphas,
            topology_changed,
        }
    }

    fn refresh_world_transforms(&mut self) -> usize {
        let order: Vec<u32> = self
            .dirty
            .drain(dirty::TRANSFORM)
            .affected()
            .deterministic()
            .run()
            .collect();
        for &idx in &order {
            let i = idx as usize;
            let (parent_world, parent_hidden) = match self.parent[i] {
                INVALID => (Transform2d::IDENTITY, false),
                p => (
                    self.world_transform[p as usize],
                    self.effective_hidden[p as usize],
                ),
            };
            self.world_transform[i] =
                parent_world.concatenate(self.local_transform[i], self.origin[i]);
            self.effective_hidden[i] = parent_hidden || !self.flags[i].visible;
        }
        order.len()
    }

    fn refresh_effective_alphas(&mut self) -> usize {
        let order: Vec<u32> = self
            .dirty
            .drain(dirty::ALPHA)
            .affected()
            .deterministic()
            .run()
            .collect();
        for &idx in &order {
            let i = idx as usize;
            let parent_alpha = match self.parent[i] {
                INVALID => 1.0,
                p => self.effective_alpha[p as usize],
            };
            self.effective_alpha[i] = parent_alpha * self.local_alpha[i];
        }
        order.len()
    }
}
