//! Recency Order Module
//!
//! Doubly-linked recency list stored in a slot arena for O(1) eviction.

use crate::cache::entry::{Entry, Handle};
use crate::error::{CacheError, Result};

// == Recency Order ==
/// Entries ordered by access time, linked through arena handles.
///
/// - Front = Most recently used
/// - Back = Least recently used
///
/// Freed slots are recycled, so the arena never holds more slots than the
/// peak number of live entries.
#[derive(Debug, Clone)]
pub struct RecencyOrder<K, V> {
    /// Entry storage; `None` marks a free slot
    slots: Vec<Option<Entry<K, V>>>,
    /// Free slot indices available for reuse
    free: Vec<usize>,
    /// Most recently used entry
    front: Option<Handle>,
    /// Least recently used entry
    back: Option<Handle>,
    /// Number of live entries
    len: usize,
}

impl<K, V> Default for RecencyOrder<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> RecencyOrder<K, V> {
    // == Constructor ==
    /// Creates an empty recency order.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates an empty recency order with room for `capacity` entries.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free: Vec::new(),
            front: None,
            back: None,
            len: 0,
        }
    }

    // == Insert Front ==
    /// Stores a fresh entry and makes it the most recently used.
    pub fn insert_front(&mut self, key: K, value: V) -> Handle {
        let handle = self.alloc(Entry::new(key, value));
        self.attach_front(handle);
        self.len += 1;
        handle
    }

    // == Remove ==
    /// Detaches an entry from wherever it sits and frees its slot.
    ///
    /// Returns None if the handle does not name a live entry.
    pub fn remove(&mut self, handle: Handle) -> Option<(K, V)> {
        if !self.detach(handle) {
            return None;
        }
        let entry = self.slots[handle.slot()].take()?;
        self.free.push(handle.slot());
        self.len -= 1;
        Some(entry.into_pair())
    }

    // == Move To Front ==
    /// Marks an entry as most recently used.
    ///
    /// Returns false if the handle does not name a live entry.
    pub fn move_to_front(&mut self, handle: Handle) -> bool {
        if self.front == Some(handle) {
            return true;
        }
        if !self.detach(handle) {
            return false;
        }
        self.attach_front(handle);
        true
    }

    // == Evict Back ==
    /// Removes and returns the least recently used entry.
    pub fn evict_back(&mut self) -> Result<(K, V)> {
        let back = self.back.ok_or(CacheError::EmptyStructure)?;
        self.remove(back).ok_or_else(|| {
            CacheError::Corrupted(format!("back anchor points at free slot {}", back.slot()))
        })
    }

    // == Accessors ==
    /// Returns the entry behind a handle.
    pub fn get(&self, handle: Handle) -> Option<&Entry<K, V>> {
        self.slots.get(handle.slot()).and_then(Option::as_ref)
    }

    /// Returns the entry behind a handle mutably.
    pub fn get_mut(&mut self, handle: Handle) -> Option<&mut Entry<K, V>> {
        self.slots.get_mut(handle.slot()).and_then(Option::as_mut)
    }

    /// Handle of the most recently used entry.
    pub fn front(&self) -> Option<Handle> {
        self.front
    }

    /// Handle of the least recently used entry.
    pub fn back(&self) -> Option<Handle> {
        self.back
    }

    /// Returns the number of live entries.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of arena slots allocated, live or free.
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    // == Clear ==
    /// Drops every entry and releases the arena.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.free.clear();
        self.front = None;
        self.back = None;
        self.len = 0;
    }

    // == Iter ==
    /// Walks entries from most to least recently used.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            order: self,
            cursor: self.front,
            remaining: self.len,
        }
    }

    // == Validate ==
    /// Checks anchors, back links and length against a full traversal.
    pub fn validate(&self) -> Result<()> {
        let mut expected_prev = None;
        let mut visited = 0;
        let mut cursor = self.front;

        while let Some(handle) = cursor {
            let entry = self.get(handle).ok_or_else(|| {
                CacheError::Corrupted(format!("link points at free slot {}", handle.slot()))
            })?;
            if entry.prev != expected_prev {
                return Err(CacheError::Corrupted(format!(
                    "slot {} has a stale prev link",
                    handle.slot()
                )));
            }
            visited += 1;
            if visited > self.len {
                return Err(CacheError::Corrupted(format!(
                    "traversal exceeds length {}",
                    self.len
                )));
            }
            expected_prev = Some(handle);
            cursor = entry.next;
        }

        if expected_prev != self.back {
            return Err(CacheError::Corrupted(
                "back anchor is not the last entry".to_string(),
            ));
        }
        if visited != self.len {
            return Err(CacheError::Corrupted(format!(
                "traversal visited {} entries, length is {}",
                visited, self.len
            )));
        }
        Ok(())
    }

    fn alloc(&mut self, entry: Entry<K, V>) -> Handle {
        match self.free.pop() {
            Some(slot) => {
                self.slots[slot] = Some(entry);
                Handle::new(slot)
            }
            None => {
                self.slots.push(Some(entry));
                Handle::new(self.slots.len() - 1)
            }
        }
    }

    /// Links a detached entry in at the front.
    fn attach_front(&mut self, handle: Handle) {
        let old_front = self.front;
        {
            let entry = self.link_mut(handle);
            entry.prev = None;
            entry.next = old_front;
        }
        match old_front {
            Some(old) => self.link_mut(old).prev = Some(handle),
            None => self.back = Some(handle),
        }
        self.front = Some(handle);
    }

    /// Relinks an entry's neighbours to each other and clears its own links.
    fn detach(&mut self, handle: Handle) -> bool {
        let (prev, next) = match self.get(handle) {
            Some(entry) => (entry.prev, entry.next),
            None => return false,
        };

        match prev {
            Some(prev) => self.link_mut(prev).next = next,
            None => self.front = next,
        }
        match next {
            Some(next) => self.link_mut(next).prev = prev,
            None => self.back = prev,
        }

        self.link_mut(handle).unlink();
        true
    }

    /// Follows a link that must point at a live entry.
    fn link_mut(&mut self, handle: Handle) -> &mut Entry<K, V> {
        match self.slots.get_mut(handle.slot()) {
            Some(Some(entry)) => entry,
            _ => panic!("recency order link points at free slot {}", handle.slot()),
        }
    }
}

// == Iterator ==
/// Front-to-back iterator over `(handle, entry)` pairs.
pub struct Iter<'a, K, V> {
    order: &'a RecencyOrder<K, V>,
    cursor: Option<Handle>,
    remaining: usize,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (Handle, &'a Entry<K, V>);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let handle = self.cursor?;
        let entry = self.order.get(handle)?;
        self.cursor = entry.next;
        self.remaining -= 1;
        Some((handle, entry))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}
