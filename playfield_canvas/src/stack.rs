// Copyright 2026 the Playfield Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The save/restore stack of paint states.

use crate::CanvasError;
use crate::paint::PaintState;

/// A stack of [`PaintState`] frames that never drops below its base frame.
///
/// `save` pushes a copy of the top frame; attribute setters only touch the
/// top frame; `restore` pops it. After a balanced sequence of saves and
/// restores the top frame is equal to what it was before the first save.
#[derive(Clone, Debug, PartialEq)]
pub struct PaintStack {
    current: PaintState,
    saved: Vec<PaintState>,
}

impl Default for PaintStack {
    fn default() -> Self {
        Self::new()
    }
}

impl PaintStack {
    /// Creates a stack holding one default frame.
    #[must_use]
    pub fn new() -> Self {
        Self::with_base(PaintState::default())
    }

    /// Creates a stack holding `base` as its only frame.
    #[must_use]
    pub fn with_base(base: PaintState) -> Self {
        Self {
            current: base,
            saved: Vec::new(),
        }
    }

    /// Returns the current frame.
    #[must_use]
    pub fn top(&self) -> &PaintState {
        &self.current
    }

    /// Returns the current frame for mutation.
    pub fn top_mut(&mut self) -> &mut PaintState {
        &mut self.current
    }

    /// Pushes a copy of the current frame.
    pub fn save(&mut self) {
        self.saved.push(self.current.clone());
    }

    /// Pops the current frame.
    ///
    /// # Errors
    ///
    /// Returns [`CanvasError::UnbalancedRestore`] and leaves the stack as it
    /// was if only the base frame remains.
    pub fn restore(&mut self) -> Result<(), CanvasError> {
        let previous = self.saved.pop().ok_or(CanvasError::UnbalancedRestore)?;
        self.current = previous;
        Ok(())
    }

    /// Returns the number of saves not yet restored.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.saved.len()
    }
}
