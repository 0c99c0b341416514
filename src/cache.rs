//! Parse caching for history URLs.
//!
//! Back/forward traversal tends to revisit the same handful of URLs, so the
//! engine keeps the most recently parsed ones in a [`ParseCache`]. It is gated
//! behind the `cache` feature and uses the [`lru`] crate internally.
//!
//! Only successful parses are cached. [`CacheStats`] tracks hits, misses, and
//! invalidations.
//!
//! # Examples
//!
//! ```
//! use query_navigator::cache::ParseCache;
//!
//! let mut cache = ParseCache::new();
//! let state = cache.parse("?a=1").unwrap();
//! assert_eq!(state.get("a"), Some("1"));
//!
//! cache.parse("?a=1").unwrap();
//! assert_eq!(cache.stats().hits, 1);
//! assert_eq!(cache.stats().misses, 1);
//! ```

use crate::error::ParseError;
use crate::{debug_log, trace_log, QueryState};
use lru::LruCache;
use std::num::NonZeroUsize;

/// Counters tracking cache effectiveness.
#[derive(Debug, Clone, Default)]
pub struct CacheStats {
    /// Number of lookups answered from the cache.
    pub hits: usize,
    /// Number of lookups that had to parse.
    pub misses: usize,
    /// Number of full invalidations (via [`ParseCache::clear`]).
    pub invalidations: usize,
}

impl CacheStats {
    /// Return the hit rate as a value in `0.0..=1.0`.
    ///
    /// Returns `0.0` if no lookups have been performed.
    #[allow(clippy::cast_precision_loss)]
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

/// LRU cache from URL text to its parsed [`QueryState`].
#[derive(Debug)]
pub struct ParseCache {
    entries: LruCache<String, QueryState>,
    stats: CacheStats,
}

impl ParseCache {
    /// Default number of cached URLs.
    pub const DEFAULT_CAPACITY: usize = 64;

    /// Create a cache with the default capacity.
    pub fn new() -> Self {
        Self::with_capacity(Self::DEFAULT_CAPACITY)
    }

    /// Create a cache with a custom capacity. Zero is treated as one.
    pub fn with_capacity(capacity: usize) -> Self {
        let cap = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            entries: LruCache::new(cap),
            stats: CacheStats::default(),
        }
    }

    /// Parse `url`, answering from the cache when possible.
    pub fn parse(&mut self, url: &str) -> Result<QueryState, ParseError> {
        if let Some(state) = self.entries.get(url) {
            self.stats.hits += 1;
            trace_log!("Parse cache hit for '{}'", url);
            return Ok(state.clone());
        }

        self.stats.misses += 1;
        trace_log!("Parse cache miss for '{}'", url);
        let state = QueryState::parse(url)?;
        self.entries.push(url.to_string(), state.clone());
        Ok(state)
    }

    /// Drop every entry and count an invalidation.
    pub fn clear(&mut self) {
        let removed = self.entries.len();
        self.entries.clear();
        self.stats.invalidations += 1;
        debug_log!(
            "Parse cache cleared: {} entries removed ({} total invalidations, hit rate: {:.1}%)",
            removed,
            self.stats.invalidations,
            self.stats.hit_rate() * 100.0
        );
    }

    /// Current statistics.
    pub const fn stats(&self) -> &CacheStats {
        &self.stats
    }

    /// Reset all counters to zero.
    pub fn reset_stats(&mut self) {
        self.stats = CacheStats::default();
    }

    /// Number of cached URLs.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Return `true` if nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for ParseCache {
    fn default() -> Self {
        Self::new()
    }
}
