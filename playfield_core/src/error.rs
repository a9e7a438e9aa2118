// Copyright 2026 the Playfield Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error type for coordinate mapping.

/// Errors reported by coordinate-space operations.
///
/// Contract violations on layer handles (stale ids, cycles, destroying a layer
/// that still has children) panic instead; see [`LayerStore`](crate::layer::LayerStore).
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// A transform with a zero (or non-finite) determinant had to be inverted.
    #[error("transform is not invertible")]
    SingularTransform,
}
