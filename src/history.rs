// This file is part of bracket-editor.
//
// bracket-editor is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// bracket-editor is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! Snapshot based linear undo/redo.
//!
//! ```text
//! commit(s3)        [s0, s1, s2, s3]   index = 3
//! undo() x2         [s0, s1, s2, s3]   index = 1
//! commit(s4)        [s0, s1, s4]       index = 2
//! ```
//!
//! Committing after an undo drops everything past the cursor, there is no
//! branching.

use std::fmt;

#[derive(Clone)]
pub struct History<T> {
    snapshots: Vec<T>,
    index: usize,
}

impl<T> History<T> {
    /// Starts a history whose only snapshot is `initial`.
    #[must_use]
    pub fn new(initial: T) -> Self {
        Self {
            snapshots: vec![initial],
            index: 0,
        }
    }

    /// Truncates any redo states and makes `state` the current snapshot.
    pub fn commit(&mut self, state: T) {
        self.snapshots.truncate(self.index + 1);
        self.snapshots.push(state);
        self.index = self.snapshots.len() - 1;
    }

    /// Steps back one snapshot. Past the oldest snapshot this does nothing.
    pub fn undo(&mut self) -> &T {
        if self.can_undo() {
            self.index -= 1;
        }

        self.current()
    }

    /// Steps forward one snapshot. At the newest snapshot this does nothing.
    pub fn redo(&mut self) -> &T {
        if self.can_redo() {
            self.index += 1;
        }

        self.current()
    }

    #[must_use]
    pub fn current(&self) -> &T {
        &self.snapshots[self.index]
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.index > 0
    }

    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.index + 1 < self.snapshots.len()
    }

    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    /// The number of snapshots, including the ones reachable through redo.
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }
}

impl<T: Default> Default for History<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T> fmt::Debug for History<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("History")
            .field("index", &self.index)
            .field("len", &self.snapshots.len())
            .finish()
    }
}

impl<T> fmt::Display for History<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.index, self.snapshots.len())
    }
}
