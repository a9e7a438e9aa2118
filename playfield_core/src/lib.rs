// Copyright 2026 the Playfield Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Layer scene graph, hit testing, and touch routing for portable 2D games.
//!
//! `playfield_core` holds the retained part of a Playfield scene: a tree of
//! layers stored in struct-of-arrays form and addressed by generational
//! handles, plus the machinery that turns raw platform touches into calls on
//! the layer that owns each touch.
//!
//! # Architecture
//!
//! ```text
//!   platform touches ──► TouchDispatcher ──► LayerStore::hit_test
//!                                │                   │
//!                                ▼                   ▼
//!                         LayerListener      (local transforms)
//!
//!   LayerStore::evaluate() ──► world transforms / effective alpha ──► renderer
//! ```
//!
//! **[`layer`]**: Struct-of-arrays layer tree with generational handles.
//! Properties (transform, origin, alpha, flags, hit shape, clip, content,
//! listener) are set by the caller; world transforms and effective alphas are
//! computed by evaluation. Hit testing always works on current values.
//!
//! **[`touch`]**: [`TouchDispatcher`](touch::TouchDispatcher) with its
//! active-layer table, listener traits, and the
//! [`TouchQueue`](touch::TouchQueue) hand-off between threads.
//!
//! **[`dirty`]**: Multi-channel dirty tracking via `understory_dirty`.
//!
//! **[`transform`]**: 2D affine transform value type.
//!
//! **[`trace`]**: [`TraceSink`](trace::TraceSink) trait and event types for
//! routing instrumentation, with zero-overhead [`Tracer`](trace::Tracer)
//! wrapper.
//!
//! # Logging
//!
//! Diagnostics go through the [`log`] facade: refused touch identifiers and
//! queue overflow at `warn`, dropped touches at `debug`.
//!
//! # Crate features
//!
//! - `trace` (disabled by default): Enables `Tracer` method bodies (one branch
//!   per call site).

#![cfg_attr(docsrs, feature(doc_auto_cfg))]

extern crate alloc;

pub mod dirty;
mod error;
pub mod layer;
pub mod touch;
pub mod trace;
pub mod transform;

pub use error::Error;
