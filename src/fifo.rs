//! Bounded most-recently-used lists stored in a single query value.
//!
//! A list is kept under one key as delimiter-joined tokens, oldest first and
//! most recent last. Tokens are unique, the list never grows past its
//! capacity, and inserting into a full list evicts the oldest token.
//!
//! An absent key is the empty list. A present key always holds at least one
//! token, so the value `""` is the one-element list `[""]`.
//!
//! ```
//! use query_navigator::{FifoCodec, FifoOutcome, QueryState};
//!
//! let codec = FifoCodec::default();
//! let mut state = QueryState::new();
//!
//! assert_eq!(codec.push(&mut state, "_open", "a"), FifoOutcome::Added);
//! assert_eq!(codec.push(&mut state, "_open", "b"), FifoOutcome::Added);
//! assert_eq!(codec.push(&mut state, "_open", "a"), FifoOutcome::Reordered);
//! assert_eq!(codec.push(&mut state, "_open", "a"), FifoOutcome::Unchanged);
//! assert_eq!(state.get("_open"), Some("b,a"));
//! ```

use crate::config::EngineConfig;
use crate::QueryState;
use std::collections::HashSet;

/// What a [`FifoCodec::push`] did to the list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FifoOutcome {
    /// The token was not in the list and has been appended.
    Added,
    /// The token was already listed and has been moved to the end.
    Reordered,
    /// The token was already the most recent one.
    Unchanged,
}

impl FifoOutcome {
    /// Check if the list content or order changed.
    pub fn is_change(self) -> bool {
        !matches!(self, Self::Unchanged)
    }
}

/// Reads and writes bounded token lists inside a [`QueryState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FifoCodec {
    capacity: usize,
    delimiter: char,
}

impl FifoCodec {
    /// Default number of tokens a list keeps.
    pub const DEFAULT_CAPACITY: usize = 5;
    /// Default token separator.
    pub const DEFAULT_DELIMITER: char = ',';

    /// Create a codec with an explicit capacity and delimiter.
    ///
    /// A capacity of zero is treated as one.
    pub fn new(capacity: usize, delimiter: char) -> Self {
        Self {
            capacity: capacity.max(1),
            delimiter,
        }
    }

    /// Create a codec from engine settings.
    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(config.fifo_capacity, config.fifo_delimiter)
    }

    /// Maximum number of tokens kept per list.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Token separator.
    pub fn delimiter(&self) -> char {
        self.delimiter
    }

    /// Decode the list stored under `key`, oldest token first.
    pub fn list(&self, state: &QueryState, key: &str) -> Vec<String> {
        state.get(key).map_or_else(Vec::new, |value| {
            value.split(self.delimiter).map(str::to_string).collect()
        })
    }

    /// Record `token` as the most recent entry of the list under `key`.
    ///
    /// A stored list that arrived through a URL may hold duplicates or more
    /// tokens than the capacity. Duplicates collapse onto their most recent
    /// position and the oldest tokens are evicted, whatever the outcome.
    ///
    /// The token must not contain the delimiter; that is not checked.
    pub fn push(&self, state: &mut QueryState, key: &str, token: &str) -> FifoOutcome {
        let mut tokens = dedup_keep_last(self.list(state, key));

        let outcome = if tokens.last().is_some_and(|last| last == token) {
            FifoOutcome::Unchanged
        } else if let Some(pos) = tokens.iter().position(|t| t == token) {
            let moved = tokens.remove(pos);
            tokens.push(moved);
            FifoOutcome::Reordered
        } else {
            tokens.push(token.to_string());
            FifoOutcome::Added
        };

        if tokens.len() > self.capacity {
            let evict = tokens.len() - self.capacity;
            tokens.drain(..evict);
        }

        let delimiter = self.delimiter.to_string();
        state.set(key, tokens.join(delimiter.as_str()));
        outcome
    }
}

fn dedup_keep_last(tokens: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::with_capacity(tokens.len());
    let mut unique: Vec<String> = tokens
        .into_iter()
        .rev()
        .filter(|token| seen.insert(token.clone()))
        .collect();
    unique.reverse();
    unique
}

impl Default for FifoCodec {
    fn default() -> Self {
        Self::new(Self::DEFAULT_CAPACITY, Self::DEFAULT_DELIMITER)
    }
}
