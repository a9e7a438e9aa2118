// Copyright 2026 the Playfield Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Canvas error type.

/// Errors reported by [`Canvas`](crate::Canvas) operations.
///
/// Every drawing call validates its arguments before touching a pixel, so an
/// `Err` always means the surface is unchanged.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CanvasError {
    /// `restore` was called with no matching `save`.
    #[error("restore without a matching save")]
    UnbalancedRestore,
    /// A surface of this size cannot be allocated.
    #[error("invalid canvas size {width}x{height}")]
    InvalidSize {
        /// Requested width in pixels.
        width: u32,
        /// Requested height in pixels.
        height: u32,
    },
    /// An argument cannot be drawn: a non-finite coordinate, an empty path, a
    /// source rectangle outside its image, or a degenerate gradient.
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),
}
