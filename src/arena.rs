//! Arena storage for chambers.
//!
//! Provides `ChamberId` (a dense, total-orderable handle) and `Arena`
//! (contiguous, append-only storage). Chambers are never removed one at a
//! time; a word tree drops all of them at once through [`Arena::clear`].
//!
//! # Determinism
//! - `ChamberId` ordering is by its inner `u32`, which is creation order.
//! - Iteration order is by index, so replaying the same sequence of
//!   allocations yields identical handles.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Dense chamber handle.
///
/// The inner value indexes the arena's slot vector. A handle is only
/// meaningful for the arena (and generation, see [`Arena::clear`]) that
/// issued it.
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ChamberId(u32);

impl ChamberId {
    /// The first allocation of every arena; word trees keep their root here.
    pub const ROOT: ChamberId = ChamberId(0);

    #[inline]
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    #[inline]
    pub const fn as_u32(&self) -> u32 {
        self.0
    }

    #[inline]
    pub const fn index(&self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for ChamberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ChamberId({})", self.0)
    }
}

/// Append-only storage addressed by [`ChamberId`].
#[derive(Debug, Clone, PartialEq)]
pub struct Arena<T> {
    slots: Vec<T>,
}

impl<T> Arena<T> {
    pub fn new() -> Self {
        Self { slots: Vec::new() }
    }

    /// Stores `data` and returns its handle.
    ///
    /// `make` receives the handle the value will live under, so values can
    /// record their own id.
    pub fn allocate_with(&mut self, make: impl FnOnce(ChamberId) -> T) -> ChamberId {
        let id = ChamberId(self.slots.len() as u32);
        self.slots.push(make(id));
        id
    }

    pub fn allocate(&mut self, data: T) -> ChamberId {
        self.allocate_with(|_| data)
    }

    pub fn get(&self, id: ChamberId) -> Option<&T> {
        self.slots.get(id.index())
    }

    pub fn get_mut(&mut self, id: ChamberId) -> Option<&mut T> {
        self.slots.get_mut(id.index())
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Drops every value. Previously issued handles become dangling.
    pub fn clear(&mut self) {
        self.slots.clear();
    }

    /// Iterates in creation order.
    pub fn iter(&self) -> impl Iterator<Item = (ChamberId, &T)> {
        self.slots
            .iter()
            .enumerate()
            .map(|(idx, data)| (ChamberId(idx as u32), data))
    }

    pub fn values(&self) -> std::slice::Iter<'_, T> {
        self.slots.iter()
    }
}

impl<T> Default for Arena<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> std::ops::Index<ChamberId> for Arena<T> {
    type Output = T;
    fn index(&self, id: ChamberId) -> &T {
        &self.slots[id.index()]
    }
}

impl<T> std::ops::IndexMut<ChamberId> for Arena<T> {
    fn index_mut(&mut self, id: ChamberId) -> &mut T {
        &mut self.slots[id.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arena_basic() {
        let mut arena: Arena<&'static str> = Arena::new();
        assert!(arena.is_empty());

        let root = arena.allocate("root");
        assert_eq!(root, ChamberId::ROOT);
        let id = arena.allocate("next");
        assert_eq!(id.as_u32(), 1);
        assert_eq!(arena.len(), 2);
        assert_eq!(arena.get(id), Some(&"next"));
        assert_eq!(arena[root], "root");
        assert_eq!(arena.get(ChamberId::new(7)), None);

        arena[id] = "changed";
        assert_eq!(arena.get(id), Some(&"changed"));
    }

    #[test]
    fn allocate_with_sees_own_id() {
        let mut arena: Arena<ChamberId> = Arena::new();
        for _ in 0..4 {
            let id = arena.allocate_with(|id| id);
            assert_eq!(arena[id], id);
        }
    }

    #[test]
    fn deterministic_iteration_and_clear() {
        let mut arena: Arena<i32> = Arena::new();
        for i in 0..5 {
            arena.allocate(i * 10);
        }
        let collected: Vec<_> = arena.iter().map(|(id, &v)| (id.as_u32(), v)).collect();
        assert_eq!(collected, vec![(0, 0), (1, 10), (2, 20), (3, 30), (4, 40)]);

        arena.clear();
        assert!(arena.is_empty());
        assert_eq!(arena.allocate(99), ChamberId::ROOT);
    }
}
