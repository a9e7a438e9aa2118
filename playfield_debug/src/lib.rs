// Copyright 2026 the Playfield Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Recording, pretty-printing, and JSON export for playfield diagnostics.
//!
//! This crate provides [`TraceSink`](playfield_core::trace::TraceSink)
//! implementations for development and post-mortem analysis:
//!
//! - [`pretty::PrettyPrintSink`]: human-readable one-line-per-event output.
//! - [`recorder::RecorderSink`]: keeps every event in memory for inspection.
//! - [`export::export`]: writes recorded events as a JSON array.
//!
//! [`snapshot::layer_tree`] dumps a layer tree as JSON, which is handy when a
//! touch lands somewhere unexpected.

pub mod export;
pub mod pretty;
pub mod recorder;
pub mod snapshot;
