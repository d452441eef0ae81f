//! Error types for lrukit.
//!
//! ## Key Components
//!
//! - [`ConfigError`]: returned when a cache is constructed with parameters it
//!   cannot honor (a negative capacity, zero shards).
//! - [`InvariantError`]: returned by `check_invariants` when the recency list
//!   and the key index disagree. Seeing one means a bug in this crate, not a
//!   caller mistake; debug builds turn it into a panic on the spot.
//!
//! Missing keys are never errors: lookups return `Option`.
//!
//! ## Example Usage
//!
//! ```
//! use lrukit::error::ConfigError;
//! use lrukit::policy::lru::LruCache;
//!
//! let cache: Result<LruCache<u64, u64>, ConfigError> = LruCache::try_with_capacity(8);
//! assert!(cache.is_ok());
//!
//! let bad = LruCache::<u64, u64>::try_with_capacity(-1);
//! assert!(bad.unwrap_err().to_string().contains("capacity"));
//! ```

use std::fmt;

// ---------------------------------------------------------------------------
// InvariantError
// ---------------------------------------------------------------------------

/// Internal consistency violation detected by `check_invariants`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantError(String);

impl InvariantError {
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InvariantError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for InvariantError {}

// ---------------------------------------------------------------------------
// ConfigError
// ---------------------------------------------------------------------------

/// Rejected cache configuration, reported synchronously at construction.
///
/// # Example
///
/// ```
/// use lrukit::builder::CacheBuilder;
///
/// let err = CacheBuilder::new(16).shards(0).try_build_sharded::<u32, u32>().unwrap_err();
/// assert!(err.message().contains("shard"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError(String);

impl ConfigError {
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Capacity that is negative or does not fit in `usize`.
    pub fn invalid_capacity(requested: i64) -> Self {
        Self(format!(
            "invalid capacity {requested}: capacity must be zero or a positive integer"
        ))
    }

    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for ConfigError {}

/// Converts a signed capacity into `usize`, rejecting negatives.
pub(crate) fn capacity_from_signed(requested: i64) -> Result<usize, ConfigError> {
    usize::try_from(requested).map_err(|_| ConfigError::invalid_capacity(requested))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
