// Copyright 2026 the Playfield Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Struct-of-arrays layer storage with allocation, topology, and property management.

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;

use kurbo::Point;
use understory_dirty::{CycleHandling, DirtyTracker, EagerPolicy};

use super::clip::ClipShape;
use super::id::{INVALID, LayerId, SurfaceId};
use super::shape::HitShape;
use super::traverse::Children;
use crate::Error;
use crate::dirty;
use crate::touch::LayerListener;
use crate::transform::Transform2d;

/// Per-layer boolean flags.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct LayerFlags {
    /// Whether the layer (and its subtree) is painted and hit-testable.
    pub visible: bool,
    /// Whether the layer itself accepts touches.
    ///
    /// Groups do not need this flag to route touches to their children: a
    /// layer takes part in hit testing whenever any layer in its subtree is
    /// interactive.
    pub interactive: bool,
}

impl Default for LayerFlags {
    fn default() -> Self {
        Self {
            visible: true,
            interactive: false,
        }
    }
}

/// Struct-of-arrays storage for all layers.
///
/// Layers are addressed by [`LayerId`] handles. Internally, each layer occupies
/// a slot in parallel arrays. Destroyed layers are recycled via a free list,
/// and generation counters prevent stale handle access.
///
/// Children are kept in paint order: the first child is painted first and the
/// last child is topmost for hit testing.
pub struct LayerStore {
    // -- Topology --
    pub(crate) parent: Vec<u32>,
    pub(crate) first_child: Vec<u32>,
    pub(crate) next_sibling: Vec<u32>,
    pub(crate) prev_sibling: Vec<u32>,

    // -- Local properties (set by callers) --
    pub(crate) local_transform: Vec<Transform2d>,
    pub(crate) origin: Vec<Point>,
    pub(crate) local_alpha: Vec<f32>,
    pub(crate) flags: Vec<LayerFlags>,
    pub(crate) hit_shape: Vec<Option<HitShape>>,
    pub(crate) clip: Vec<Option<ClipShape>>,
    pub(crate) content: Vec<Option<SurfaceId>>,
    pub(crate) listener: Vec<Option<Box<dyn LayerListener>>>,

    // -- Maintained eagerly --
    pub(crate) subtree_interactive: Vec<bool>,

    // -- Computed properties (written by evaluate) --
    pub(crate) world_transform: Vec<Transform2d>,
    pub(crate) effective_alpha: Vec<f32>,
    pub(crate) effective_hidden: Vec<bool>,

    // -- Allocation --
    pub(crate) generation: Vec<u32>,
    pub(crate) free_list: Vec<u32>,
    pub(crate) len: u32,

    // -- Dirty tracking --
    pub(crate) dirty: DirtyTracker<u32>,

    /// Set by any structural edit, cleared by the next evaluation.
    pub(crate) topology_dirty: bool,
}

impl fmt::Debug for LayerStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LayerStore")
            .field("len", &self.len)
            .field("free", &self.free_list.len())
            .field("topology_dirty", &self.topology_dirty)
            .finish_non_exhaustive()
    }
}

impl Default for LayerStore {
    fn default() -> Self {
        Self::new()
    }
}

impl LayerStore {
    /// Creates an empty layer store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            parent: Vec::new(),
            first_child: Vec::new(),
            next_sibling: Vec::new(),
            prev_sibling: Vec::new(),
            local_transform: Vec::new(),
            origin: Vec::new(),
            local_alpha: Vec::new(),
            flags: Vec::new(),
            hit_shape: Vec::new(),
            clip: Vec::new(),
            content: Vec::new(),
            listener: Vec::new(),
            subtree_interactive: Vec::new(),
            world_transform: Vec::new(),
            effective_alpha: Vec::new(),
            effective_hidden: Vec::new(),
            generation: Vec::new(),
            free_list: Vec::new(),
            len: 0,
            dirty: DirtyTracker::with_cycle_handling(CycleHandling::Error),
            topology_dirty: false,
        }
    }

    // -- Allocation API --

    /// Creates a new layer and returns its handle.
    ///
    /// The layer starts visible and non-interactive, with an identity
    /// transform, origin at `(0, 0)`, full alpha, no hit shape, no clip, no
    /// content, no listener, and no parent.
    pub fn create_layer(&mut self) -> LayerId {
        let idx = if let Some(idx) = self.free_list.pop() {
            // Reuse a freed slot.
            let i = idx as usize;
            self.generation[i] += 1;
            self.parent[i] = INVALID;
            self.first_child[i] = INVALID;
            self.next_sibling[i] = INVALID;
            self.prev_sibling[i] = INVALID;
            self.local_transform[i] = Transform2d::IDENTITY;
            self.origin[i] = Point::ORIGIN;
            self.local_alpha[i] = 1.0;
            self.flags[i] = LayerFlags::default();
            self.hit_shape[i] = None;
            self.clip[i] = None;
            self.content[i] = None;
            self.listener[i] = None;
            self.subtree_interactive[i] = false;
            self.world_transform[i] = Transform2d::IDENTITY;
            self.effective_alpha[i] = 1.0;
            self.effective_hidden[i] = false;
            idx
        } else {
            // Allocate a new slot.
            let idx = self.len;
            self.len += 1;
            self.parent.push(INVALID);
            self.first_child.push(INVALID);
            self.next_sibling.push(INVALID);
            self.prev_sibling.push(INVALID);
            self.local_transform.push(Transform2d::IDENTITY);
            self.origin.push(Point::ORIGIN);
            self.local_alpha.push(1.0);
            self.flags.push(LayerFlags::default());
            self.hit_shape.push(None);
            self.clip.push(None);
            self.content.push(None);
            self.listener.push(None);
            self.subtree_interactive.push(false);
            self.world_transform.push(Transform2d::IDENTITY);
            self.effective_alpha.push(1.0);
            self.effective_hidden.push(false);
            self.generation.push(0);
            idx
        };

        self.topology_dirty = true;

        self.handle(idx)
    }

    /// Destroys a layer, freeing its slot for reuse.
    ///
    /// The layer's listener (if any) is dropped immediately.
    ///
    /// # Panics
    ///
    /// Panics if the layer has children (remove them first, or use
    /// [`destroy_subtree`](Self::destroy_subtree)) or if the handle is stale.
    pub fn destroy_layer(&mut self, id: LayerId) {
        self.validate(id);
        let idx = id.idx;
        assert!(
            self.first_child[idx as usize] == INVALID,
            "cannot destroy layer with children"
        );

        // Remove from parent's child list if attached.
        let p = self.parent[idx as usize];
        if p != INVALID {
            self.unlink_from_parent(idx);
            self.refresh_interactive_from(p);
        }

        self.listener[idx as usize] = None;
        self.hit_shape[idx as usize] = None;

        // Remove dirty tracking dependencies.
        self.dirty.remove_key(idx);

        // Bump generation so old handles immediately fail validation.
        self.generation[idx as usize] += 1;

        self.free_list.push(idx);
        self.topology_dirty = true;
    }

    /// Detaches a layer from its parent and destroys it together with every
    /// descendant.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    pub fn destroy_subtree(&mut self, id: LayerId) {
        self.validate(id);
        let mut order = Vec::new();
        self.collect_subtree(id.idx, &mut order);
        // Reverse pre-order visits every layer after all of its descendants.
        for &idx in order.iter().rev() {
            let handle = self.handle(idx);
            self.destroy_layer(handle);
        }
    }

    /// Returns whether the given handle refers to a live layer.
    #[must_use]
    pub fn is_alive(&self, id: LayerId) -> bool {
        (id.idx < self.len)
            && self.generation[id.idx as usize] == id.generation
            && !self.free_list.contains(&id.idx)
    }

    // -- Topology API --

    /// Adds `child` as the last (topmost) child of `parent`.
    ///
    /// Marks inherited channels for `child`'s subtree so world transform,
    /// effective alpha, and effective hidden state are recomputed under the
    /// new ancestry, and refreshes the interactive cache of `parent` and its
    /// ancestors.
    ///
    /// # Panics
    ///
    /// Panics if either handle is stale, if `child` already has a parent, or
    /// if `child` is `parent` or one of its ancestors.
    pub fn add_child(&mut self, parent: LayerId, child: LayerId) {
        self.validate(parent);
        self.validate(child);
        let p = parent.idx;
        let c = child.idx;
        assert!(
            self.parent[c as usize] == INVALID,
            "child already has a parent"
        );
        assert!(
            !self.is_ancestor_or_self(c, p),
            "cannot add a layer beneath itself"
        );

        self.link_last(p, c);
        self.attach_dependencies(c, p);
    }

    /// Removes `child` from its current parent.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale or the layer has no parent.
    pub fn remove_from_parent(&mut self, child: LayerId) {
        self.validate(child);
        let c = child.idx;
        assert!(self.parent[c as usize] != INVALID, "layer has no parent");
        self.detach(c);
    }

    /// Moves `child` to be the last child of `new_parent`.
    ///
    /// If `child` already has a parent, it is removed first.
    ///
    /// # Panics
    ///
    /// Panics if either handle is stale, or if `new_parent` lies inside
    /// `child`'s subtree.
    pub fn reparent(&mut self, child: LayerId, new_parent: LayerId) {
        self.validate(child);
        self.validate(new_parent);
        assert!(
            !self.is_ancestor_or_self(child.idx, new_parent.idx),
            "cannot add a layer beneath itself"
        );

        if self.parent[child.idx as usize] != INVALID {
            self.detach(child.idx);
        }

        self.link_last(new_parent.idx, child.idx);
        self.attach_dependencies(child.idx, new_parent.idx);
    }

    /// Inserts `child` before `sibling` in the sibling list, so that it is
    /// painted before (and hit-tested after) `sibling`.
    ///
    /// # Panics
    ///
    /// Panics if handles are stale, `child` already has a parent, or `sibling`
    /// has no parent.
    pub fn insert_before(&mut self, child: LayerId, sibling: LayerId) {
        self.validate(child);
        self.validate(sibling);
        let c = child.idx;
        let s = sibling.idx;
        assert!(
            self.parent[c as usize] == INVALID,
            "child already has a parent"
        );
        let p = self.parent[s as usize];
        assert!(p != INVALID, "sibling has no parent");
        assert!(
            !self.is_ancestor_or_self(c, p),
            "cannot add a layer beneath itself"
        );

        self.parent[c as usize] = p;
        self.next_sibling[c as usize] = s;
        self.prev_sibling[c as usize] = self.prev_sibling[s as usize];

        if self.prev_sibling[s as usize] != INVALID {
            self.next_sibling[self.prev_sibling[s as usize] as usize] = c;
        } else {
            // `sibling` was the first child.
            self.first_child[p as usize] = c;
        }
        self.prev_sibling[s as usize] = c;

        self.attach_dependencies(c, p);
    }

    /// Returns the parent of a layer, if any.
    #[must_use]
    pub fn parent(&self, id: LayerId) -> Option<LayerId> {
        self.validate(id);
        let p = self.parent[id.idx as usize];
        (p != INVALID).then(|| self.handle(p))
    }

    /// Returns an iterator over the direct children of a layer in paint order.
    #[must_use]
    pub fn children(&self, id: LayerId) -> Children<'_> {
        self.validate(id);
        Children::new(self, self.first_child[id.idx as usize])
    }

    /// Returns the live layers that have no parent.
    #[must_use]
    pub fn roots(&self) -> Vec<LayerId> {
        let mut roots = Vec::new();
        for idx in 0..self.len {
            if self.parent[idx as usize] == INVALID && !self.free_list.contains(&idx) {
                roots.push(self.handle(idx));
            }
        }
        roots
    }

    // -- Property getters (read-only, no dirty marking) --

    /// Returns the local transform of a layer.
    #[must_use]
    pub fn local_transform(&self, id: LayerId) -> Transform2d {
        self.validate(id);
        self.local_transform[id.idx as usize]
    }

    /// Returns the origin of a layer: the content-space point placed at the
    /// layer's translation.
    #[must_use]
    pub fn origin(&self, id: LayerId) -> Point {
        self.validate(id);
        self.origin[id.idx as usize]
    }

    /// Returns the local alpha of a layer.
    #[must_use]
    pub fn alpha(&self, id: LayerId) -> f32 {
        self.validate(id);
        self.local_alpha[id.idx as usize]
    }

    /// Returns the flags of a layer.
    #[must_use]
    pub fn flags(&self, id: LayerId) -> LayerFlags {
        self.validate(id);
        self.flags[id.idx as usize]
    }

    /// Returns the hit shape of a layer.
    #[must_use]
    pub fn hit_shape(&self, id: LayerId) -> Option<&HitShape> {
        self.validate(id);
        self.hit_shape[id.idx as usize].as_ref()
    }

    /// Returns the clip shape of a layer.
    #[must_use]
    pub fn clip(&self, id: LayerId) -> Option<ClipShape> {
        self.validate(id);
        self.clip[id.idx as usize]
    }

    /// Returns the content of a layer.
    #[must_use]
    pub fn content(&self, id: LayerId) -> Option<SurfaceId> {
        self.validate(id);
        self.content[id.idx as usize]
    }

    /// Returns whether a layer has a listener attached.
    #[must_use]
    pub fn has_listener(&self, id: LayerId) -> bool {
        self.validate(id);
        self.listener[id.idx as usize].is_some()
    }

    /// Returns whether this layer or any of its descendants is interactive.
    ///
    /// Always current; does not require [`evaluate`](Self::evaluate).
    #[must_use]
    pub fn has_interactive_subtree(&self, id: LayerId) -> bool {
        self.validate(id);
        self.subtree_interactive[id.idx as usize]
    }

    /// Returns the computed world transform of a layer.
    ///
    /// Only valid after [`evaluate`](Self::evaluate) has been called. Use
    /// [`world_transform_now`](Self::world_transform_now) for a value that
    /// reflects pending changes.
    #[must_use]
    pub fn world_transform(&self, id: LayerId) -> Transform2d {
        self.validate(id);
        self.world_transform[id.idx as usize]
    }

    /// Returns the computed effective alpha of a layer.
    ///
    /// Only valid after [`evaluate`](Self::evaluate) has been called.
    #[must_use]
    pub fn effective_alpha(&self, id: LayerId) -> f32 {
        self.validate(id);
        self.effective_alpha[id.idx as usize]
    }

    /// Returns whether the layer is effectively hidden (including by an
    /// ancestor's visibility flag).
    ///
    /// Only valid after [`evaluate`](Self::evaluate) has been called.
    #[must_use]
    pub fn effective_hidden(&self, id: LayerId) -> bool {
        self.validate(id);
        self.effective_hidden[id.idx as usize]
    }

    // -- Mutation API (auto-marks dirty) --

    /// Sets the local transform of a layer.
    ///
    /// Marks the TRANSFORM channel dirty with eager propagation to descendants.
    pub fn set_transform(&mut self, id: LayerId, transform: Transform2d) {
        self.validate(id);
        self.local_transform[id.idx as usize] = transform;
        self.dirty.mark_with(id.idx, dirty::TRANSFORM, &EagerPolicy);
    }

    /// Sets the origin of a layer.
    pub fn set_origin(&mut self, id: LayerId, origin: Point) {
        self.validate(id);
        self.origin[id.idx as usize] = origin;
        self.dirty.mark_with(id.idx, dirty::TRANSFORM, &EagerPolicy);
    }

    /// Sets the local alpha of a layer, clamped to `[0, 1]`.
    ///
    /// Marks the ALPHA channel dirty with eager propagation to descendants.
    pub fn set_alpha(&mut self, id: LayerId, alpha: f32) {
        self.validate(id);
        self.local_alpha[id.idx as usize] = alpha.clamp(0.0, 1.0);
        self.dirty.mark_with(id.idx, dirty::ALPHA, &EagerPolicy);
    }

    /// Sets the flags of a layer.
    ///
    /// Visibility changes mark the TRANSFORM channel (effective hidden is
    /// recomputed in the same pass); interactivity changes refresh the
    /// interactive cache up to the root immediately.
    pub fn set_flags(&mut self, id: LayerId, flags: LayerFlags) {
        self.validate(id);
        let old = self.flags[id.idx as usize];
        self.flags[id.idx as usize] = flags;
        if old.visible != flags.visible {
            self.dirty.mark_with(id.idx, dirty::TRANSFORM, &EagerPolicy);
        }
        if old.interactive != flags.interactive {
            self.refresh_interactive_from(id.idx);
        }
    }

    /// Shows or hides a layer and its subtree.
    pub fn set_visible(&mut self, id: LayerId, visible: bool) {
        let flags = LayerFlags {
            visible,
            ..self.flags(id)
        };
        self.set_flags(id, flags);
    }

    /// Marks whether a layer itself accepts touches.
    pub fn set_interactive(&mut self, id: LayerId, interactive: bool) {
        let flags = LayerFlags {
            interactive,
            ..self.flags(id)
        };
        self.set_flags(id, flags);
    }

    /// Sets the hit shape of a layer.
    pub fn set_hit_shape(&mut self, id: LayerId, shape: Option<HitShape>) {
        self.validate(id);
        self.hit_shape[id.idx as usize] = shape;
    }

    /// Sets the clip shape of a layer.
    pub fn set_clip(&mut self, id: LayerId, clip: Option<ClipShape>) {
        self.validate(id);
        self.clip[id.idx as usize] = clip;
    }

    /// Sets the content of a layer.
    pub fn set_content(&mut self, id: LayerId, content: Option<SurfaceId>) {
        self.validate(id);
        self.content[id.idx as usize] = content;
    }

    /// Attaches (or with `None`, detaches) the touch listener of a layer.
    ///
    /// Attaching a listener also marks the layer interactive. Detaching
    /// leaves the interactive flag as it is. Returns the previous listener.
    pub fn set_listener(
        &mut self,
        id: LayerId,
        listener: Option<Box<dyn LayerListener>>,
    ) -> Option<Box<dyn LayerListener>> {
        self.validate(id);
        let attach = listener.is_some();
        let previous = core::mem::replace(&mut self.listener[id.idx as usize], listener);
        if attach {
            self.set_interactive(id, true);
        }
        previous
    }

    /// Returns the listener of a layer for invocation.
    pub(crate) fn listener_mut(
        &mut self,
        id: LayerId,
    ) -> Option<&mut (dyn LayerListener + 'static)> {
        self.validate(id);
        self.listener[id.idx as usize].as_deref_mut()
    }

    // -- Coordinate mapping (always current, independent of evaluate) --

    /// Computes a layer's world transform from its current ancestor chain.
    ///
    /// Unlike [`world_transform`](Self::world_transform), this reflects
    /// changes made since the last [`evaluate`](Self::evaluate).
    #[must_use]
    pub fn world_transform_now(&self, id: LayerId) -> Transform2d {
        self.validate(id);
        let mut idx = id.idx;
        let mut world = self.layer_to_parent(idx);
        loop {
            idx = self.parent[idx as usize];
            if idx == INVALID {
                return world;
            }
            world = self.layer_to_parent(idx) * world;
        }
    }

    /// Maps a point from screen (root parent) space into a layer's content
    /// space.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SingularTransform`] if the layer or any ancestor has
    /// a non-invertible transform.
    pub fn screen_to_layer(&self, id: LayerId, point: Point) -> Result<Point, Error> {
        self.world_transform_now(id).inverse_transform_point(point)
    }

    /// Maps a point from a layer's content space to screen space.
    #[must_use]
    pub fn layer_to_screen(&self, id: LayerId, point: Point) -> Point {
        self.world_transform_now(id).transform_point(point)
    }

    /// Maps a point from a layer's parent space into the layer's content
    /// space: the inverse local transform followed by the origin offset.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SingularTransform`] if the local transform is not
    /// invertible.
    pub fn parent_to_layer(&self, id: LayerId, point: Point) -> Result<Point, Error> {
        self.validate(id);
        self.parent_to_layer_at(id.idx, point)
            .ok_or(Error::SingularTransform)
    }

    // -- Internal helpers --

    pub(crate) fn handle(&self, idx: u32) -> LayerId {
        LayerId {
            idx,
            generation: self.generation[idx as usize],
        }
    }

    /// Panics if the handle is stale.
    pub(crate) fn validate(&self, id: LayerId) {
        assert!(
            id.idx < self.len && self.generation[id.idx as usize] == id.generation,
            "stale LayerId: {id:?} (current gen: {})",
            if id.idx < self.len {
                self.generation[id.idx as usize]
            } else {
                u32::MAX
            }
        );
    }

    /// The transform from a layer's content space to its parent's space.
    pub(crate) fn layer_to_parent(&self, idx: u32) -> Transform2d {
        Transform2d::IDENTITY.concatenate(
            self.local_transform[idx as usize],
            self.origin[idx as usize],
        )
    }

    pub(crate) fn parent_to_layer_at(&self, idx: u32, point: Point) -> Option<Point> {
        let inv = self.local_transform[idx as usize].inverse()?;
        Some(inv.transform_point(point) + self.origin[idx as usize].to_vec2())
    }

    /// Returns whether `candidate` is `idx` or one of its ancestors.
    fn is_ancestor_or_self(&self, candidate: u32, mut idx: u32) -> bool {
        while idx != INVALID {
            if idx == candidate {
                return true;
            }
            idx = self.parent[idx as usize];
        }
        false
    }

    /// Appends `c` to the end of `p`'s child list.
    fn link_last(&mut self, p: u32, c: u32) {
        self.parent[c as usize] = p;
        self.prev_sibling[c as usize] = INVALID;
        self.next_sibling[c as usize] = INVALID;

        if self.first_child[p as usize] == INVALID {
            self.first_child[p as usize] = c;
        } else {
            // Walk to last child.
            let mut last = self.first_child[p as usize];
            while self.next_sibling[last as usize] != INVALID {
                last = self.next_sibling[last as usize];
            }
            self.next_sibling[last as usize] = c;
            self.prev_sibling[c as usize] = last;
        }
    }

    /// Wires up dirty edges and caches after `c` was linked under `p`.
    fn attach_dependencies(&mut self, c: u32, p: u32) {
        // Child depends on parent for TRANSFORM and ALPHA.
        let _ = self.dirty.add_dependency(c, p, dirty::TRANSFORM);
        let _ = self.dirty.add_dependency(c, p, dirty::ALPHA);

        self.mark_subtree_inherited_dirty(c);
        self.refresh_interactive_from(p);
        self.topology_dirty = true;
    }

    /// Unlinks `c` from its parent and undoes [`attach_dependencies`](Self::attach_dependencies).
    fn detach(&mut self, c: u32) {
        let p = self.parent[c as usize];
        self.unlink_from_parent(c);

        self.dirty.remove_dependency(c, p, dirty::TRANSFORM);
        self.dirty.remove_dependency(c, p, dirty::ALPHA);

        self.mark_subtree_inherited_dirty(c);
        self.refresh_interactive_from(p);
        self.topology_dirty = true;
    }

    /// Removes `idx` from its parent's child list without touching dirty state.
    fn unlink_from_parent(&mut self, idx: u32) {
        let p = self.parent[idx as usize];
        let prev = self.prev_sibling[idx as usize];
        let next = self.next_sibling[idx as usize];

        if prev != INVALID {
            self.next_sibling[prev as usize] = next;
        } else {
            // Was first child.
            self.first_child[p as usize] = next;
        }

        if next != INVALID {
            self.prev_sibling[next as usize] = prev;
        }

        self.parent[idx as usize] = INVALID;
        self.prev_sibling[idx as usize] = INVALID;
        self.next_sibling[idx as usize] = INVALID;
    }

    /// Marks the subtree rooted at `idx` dirty for inherited channels.
    fn mark_subtree_inherited_dirty(&mut self, idx: u32) {
        self.dirty.mark_with(idx, dirty::TRANSFORM, &EagerPolicy);
        self.dirty.mark_with(idx, dirty::ALPHA, &EagerPolicy);
    }

    /// Recomputes the subtree-interactive cache from `idx` upward, stopping
    /// at the first layer whose cached value does not change.
    fn refresh_interactive_from(&mut self, mut idx: u32) {
        while idx != INVALID {
            let i = idx as usize;
            let mut value = self.flags[i].interactive;
            let mut child = self.first_child[i];
            while !value && child != INVALID {
                value = self.subtree_interactive[child as usize];
                child = self.next_sibling[child as usize];
            }
            if value == self.subtree_interactive[i] {
                break;
            }
            self.subtree_interactive[i] = value;
            idx = self.parent[i];
        }
    }

    /// Pre-order collection of the subtree rooted at `idx`.
    fn collect_subtree(&self, idx: u32, out: &mut Vec<u32>) {
        out.push(idx);
        let mut child = self.first_child[idx as usize];
        while child != INVALID {
            self.collect_subtree(child, out);
            child = self.next_sibling[child as usize];
        }
    }
}
