//! Cache Entry Module
//!
//! Defines the arena handle and the linked entry stored behind it.

// == Handle ==
/// Stable, non-owning reference to an entry slot in the recency order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Handle(usize);

impl Handle {
    pub(crate) fn new(slot: usize) -> Self {
        Self(slot)
    }

    /// Slot index inside the arena.
    pub fn slot(self) -> usize {
        self.0
    }
}

// == Entry ==
/// A key-value pair plus its links in the recency order.
#[derive(Debug, Clone)]
pub struct Entry<K, V> {
    /// The cached key
    pub key: K,
    /// The cached value
    pub value: V,
    /// Neighbour toward the MRU end
    pub(crate) prev: Option<Handle>,
    /// Neighbour toward the LRU end
    pub(crate) next: Option<Handle>,
}

impl<K, V> Entry<K, V> {
    // == Constructor ==
    /// Creates a detached entry.
    pub fn new(key: K, value: V) -> Self {
        Self {
            key,
            value,
            prev: None,
            next: None,
        }
    }

    // == Is Detached ==
    /// Returns true if the entry has no neighbours.
    ///
    /// Only the links are checked: the sole entry of a one-element order
    /// has no neighbours either, yet is still the front and back.
    pub fn is_detached(&self) -> bool {
        self.prev.is_none() && self.next.is_none()
    }

    pub(crate) fn unlink(&mut self) {
        self.prev = None;
        self.next = None;
    }

    pub(crate) fn into_pair(self) -> (K, V) {
        (self.key, self.value)
    }
}
