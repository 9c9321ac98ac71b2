//! Append-only storage for blocks and connections.
//!
//! A [`System`](crate::system::System) keeps one [`Arena`] per entity kind.
//! Ports and connections name each other through the arena's copyable IDs,
//! never through references, so the graph has no ownership cycles.

use std::marker::PhantomData;
use std::ops::{Index, IndexMut};

/// An ID type that addresses an [`Arena`] slot.
pub trait ArenaId: Copy {
    /// Wraps a slot index.
    fn from_index(index: usize) -> Self;

    /// The slot index this ID addresses.
    fn index(self) -> usize;
}

/// Slots addressed by `I`. Entries are never removed or moved, so an ID
/// stays valid for the arena's lifetime.
#[derive(Debug, Clone)]
pub struct Arena<I, T> {
    slots: Vec<T>,
    _id: PhantomData<fn() -> I>,
}

impl<I: ArenaId, T> Default for Arena<I, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I: ArenaId, T> Arena<I, T> {
    /// Creates an empty arena.
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            _id: PhantomData,
        }
    }

    /// The ID the next [`alloc`](Self::alloc) hands out. Blocks need it to
    /// know their own ID while being built.
    pub fn next_id(&self) -> I {
        I::from_index(self.slots.len())
    }

    /// Stores `item` and returns its ID.
    pub fn alloc(&mut self, item: T) -> I {
        let id = self.next_id();
        self.slots.push(item);
        id
    }

    /// Looks up `id`, returning `None` for IDs from another arena.
    pub fn get(&self, id: I) -> Option<&T> {
        self.slots.get(id.index())
    }

    /// Mutable form of [`get`](Self::get).
    pub fn get_mut(&mut self, id: I) -> Option<&mut T> {
        self.slots.get_mut(id.index())
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether nothing has been stored yet.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Entries with their IDs, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = (I, &T)> {
        self.slots
            .iter()
            .enumerate()
            .map(|(i, item)| (I::from_index(i), item))
    }
}

/// Indexing panics on a foreign ID; callers check IDs from outside the
/// system with [`Arena::get`] first.
impl<I: ArenaId, T> Index<I> for Arena<I, T> {
    type Output = T;

    fn index(&self, id: I) -> &T {
        &self.slots[id.index()]
    }
}

impl<I: ArenaId, T> IndexMut<I> for Arena<I, T> {
    fn index_mut(&mut self, id: I) -> &mut T {
        &mut self.slots[id.index()]
    }
}
