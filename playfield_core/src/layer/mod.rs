// Copyright 2026 the Playfield Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Layer tree data model.
//!
//! A *layer* is a node in the scene tree. Each layer has:
//!
//! - An identity ([`LayerId`]): a generational handle that becomes stale when
//!   the layer is destroyed, preventing use-after-free bugs at the API level.
//! - Topology: parent, first-child, and sibling links forming an ordered tree.
//!   Children are kept in paint order, so the last child is topmost.
//! - **Local properties** set by the caller: [`transform`](LayerStore::set_transform),
//!   [`origin`](LayerStore::set_origin), [`alpha`](LayerStore::set_alpha),
//!   [`flags`](LayerStore::set_flags), [`hit shape`](LayerStore::set_hit_shape),
//!   [`clip`](LayerStore::set_clip), [`content`](LayerStore::set_content), and
//!   a touch [`listener`](LayerStore::set_listener).
//! - **Computed properties** produced by [`evaluate`](LayerStore::evaluate):
//!   `world_transform`, `effective_alpha`, and `effective_hidden`.
//!
//! Layers are stored in struct-of-arrays layout with index-based handles
//! for cache-friendly traversal.
//!
//! # Coordinate spaces
//!
//! A layer's content space is mapped into its parent's space by
//! `local * translate(-origin)`: the origin is the content point placed at
//! the layer's translation. [`hit_test`](LayerStore::hit_test) and
//! [`screen_to_layer`](LayerStore::screen_to_layer) walk this mapping
//! backwards using the current local transforms.
//!
//! # Dirty tracking
//!
//! Transform, origin, visibility, and alpha mutations mark a
//! [`dirty`](crate::dirty) channel that propagates to every descendant.
//! Clip and content are not inherited and are read as set. Structural
//! edits are reported through [`FrameChanges::topology_changed`].

mod clip;
mod evaluate;
mod hit;
mod id;
mod shape;
mod store;
mod traverse;

pub use clip::ClipShape;
pub use evaluate::FrameChanges;
pub use id::{INVALID, LayerId, SurfaceId};
pub use shape::HitShape;
pub use store::{LayerFlags, LayerStore};
pub use traverse::Children;
