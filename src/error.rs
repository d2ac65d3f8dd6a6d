//! Error types for the cache
//!
//! Provides unified error handling using thiserror.

use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for the cache and its console.
///
/// A cache miss is not an error; lookups return `None` instead.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CacheError {
    /// Cache constructed with a capacity below 1
    #[error("Invalid capacity: {0} (must be at least 1)")]
    InvalidCapacity(usize),

    /// Key already present in the index
    #[error("Duplicate key in index")]
    DuplicateKey,

    /// Eviction requested from an empty recency order
    #[error("Recency order is empty")]
    EmptyStructure,

    /// Index and recency order disagree
    #[error("Cache corrupted: {0}")]
    Corrupted(String),

    /// Console line that does not parse as a command
    #[error("Invalid command: {0}")]
    InvalidCommand(String),
}

// == Result Type Alias ==
/// Convenience Result type for the cache.
pub type Result<T> = std::result::Result<T, CacheError>;
