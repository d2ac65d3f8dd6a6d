//! Cache Module
//!
//! Provides a fixed-capacity in-memory cache with O(1) LRU eviction.

mod entry;
mod index;
mod order;
mod shared;
mod stats;
mod store;

#[cfg(test)]
mod property_tests;

// Re-export public types
pub use entry::{Entry, Handle};
pub use index::Index;
pub use order::{Iter, RecencyOrder};
pub use shared::SharedCache;
pub use stats::CacheStats;
pub use store::LruCache;
