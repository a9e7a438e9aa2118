// Copyright 2026 the Playfield Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Touch input routing.
//!
//! Platforms deliver touches in batches that share one [`TouchPhase`]. The
//! [`TouchDispatcher`] maps each touch from screen space into the layer tree,
//! finds the layer that owns it, and calls that layer's [`LayerListener`]:
//!
//! ```text
//!   input thread                 render thread
//!   TouchSender::send ──► TouchQueue::dispatch_pending
//!                                     │
//!                                     ▼
//!                         TouchDispatcher::dispatch
//!                           │ global TouchListener
//!                           │ hit_test (start) / active layer (move, end)
//!                           ▼
//!                         LayerListener on the owning layer
//! ```
//!
//! Every dispatch returns a [`DispatchReport`] describing what was delivered,
//! missed, or dropped.

mod dispatcher;
mod event;
mod listener;
mod queue;

pub use dispatcher::{DispatchReport, DropReason, DroppedTouch, TouchConfig, TouchDispatcher};
pub use event::{TouchEvent, TouchPhase};
pub use listener::{LayerListener, TouchListener};
pub use queue::{TouchBatch, TouchQueue, TouchSender};
