//! Recency Cache - A fixed-capacity in-memory cache with LRU eviction
//!
//! Combines a hash index with an arena-backed recency list so that `get`
//! and `put` run in O(1) expected time.

pub mod cache;
pub mod config;
pub mod console;
pub mod error;
pub mod models;

pub use cache::{LruCache, SharedCache};
pub use config::Config;
pub use error::{CacheError, Result};
