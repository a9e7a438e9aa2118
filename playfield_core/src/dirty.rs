// Copyright 2026 the Playfield Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dirty-tracking channel constants.
//!
//! Layer mutations mark channels in an [`understory_dirty`] tracker so that
//! [`LayerStore::evaluate`](crate::layer::LayerStore::evaluate) only
//! recomputes what changed.
//!
//! # Propagation
//!
//! Both channels use [`EagerPolicy`](understory_dirty::EagerPolicy) with
//! dependency edges from child to parent. World transforms, effective
//! alpha, and effective hidden state are inherited, so marking a parent
//! marks every descendant. Origin and visibility changes are routed through
//! [`TRANSFORM`].
//!
//! Clip and content are read directly by painters and need no channel.
//! Structural edits only raise a flag on the store. Interactivity is not
//! tracked here either: hit testing keeps its own subtree-interactive
//! cache, updated eagerly on every change so that touch routing never
//! depends on a pending evaluation.

use understory_dirty::Channel;

/// Transform, origin, or visibility changed.
pub const TRANSFORM: Channel = Channel::new(0);

/// Alpha changed.
pub const ALPHA: Channel = Channel::new(1);
