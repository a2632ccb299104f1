// SPDX-License-Identifier: MPL-2.0
//! Linear undo/redo of transform snapshots.

use super::transform::HatTransform;

#[derive(Debug, Clone, Default)]
pub struct History {
    undo: Vec<HatTransform>,
    redo: Vec<HatTransform>,
}

impl History {
    /// Saves `current` before a new action. Clears the redo sequence.
    pub fn record(&mut self, current: HatTransform) {
        self.undo.push(current);
        self.redo.clear();
    }

    /// Returns the state to restore, moving `current` onto the redo sequence.
    pub fn undo(&mut self, current: HatTransform) -> Option<HatTransform> {
        let previous = self.undo.pop()?;
        self.redo.push(current);
        Some(previous)
    }

    pub fn redo(&mut self, current: HatTransform) -> Option<HatTransform> {
        let next = self.redo.pop()?;
        self.undo.push(current);
        Some(next)
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    #[must_use]
    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    #[must_use]
    pub fn undo_len(&self) -> usize {
        self.undo.len()
    }

    #[must_use]
    pub fn redo_len(&self) -> usize {
        self.redo.len()
    }

    pub fn clear(&mut self) {
        self.undo.clear();
        self.redo.clear();
    }
}
