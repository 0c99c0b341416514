//! Engine configuration.
//!
//! [`EngineConfig`] controls how underscore-style history keys are encoded and
//! how many parsed URLs the engine remembers. The defaults reproduce the
//! classic behaviour: `_` prefix, `,` delimiter, five remembered tokens.
//!
//! ```
//! use query_navigator::EngineConfig;
//!
//! let config = EngineConfig::new().fifo_capacity(3).fifo_delimiter('|');
//! assert_eq!(config.fifo_capacity, 3);
//! assert!(config.validate().is_ok());
//! ```

use crate::error::NavigationError;

/// Settings for a [`NavigationEngine`](crate::NavigationEngine).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EngineConfig {
    /// Key prefix that marks a bounded history list.
    pub fifo_prefix: String,
    /// Separator between tokens of a history list.
    pub fifo_delimiter: char,
    /// Maximum number of tokens a history list keeps.
    pub fifo_capacity: usize,
    /// Number of parsed URLs kept by the parse cache.
    pub parse_cache_capacity: usize,
}

impl EngineConfig {
    /// Default list capacity.
    pub const DEFAULT_FIFO_CAPACITY: usize = 5;
    /// Default parse cache capacity.
    pub const DEFAULT_PARSE_CACHE_CAPACITY: usize = 64;

    /// Create a configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the list key prefix.
    pub fn fifo_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.fifo_prefix = prefix.into();
        self
    }

    /// Set the list token separator.
    pub fn fifo_delimiter(mut self, delimiter: char) -> Self {
        self.fifo_delimiter = delimiter;
        self
    }

    /// Set the list capacity.
    pub fn fifo_capacity(mut self, capacity: usize) -> Self {
        self.fifo_capacity = capacity;
        self
    }

    /// Set the parse cache capacity.
    pub fn parse_cache_capacity(mut self, capacity: usize) -> Self {
        self.parse_cache_capacity = capacity;
        self
    }

    /// Check that the configuration can drive an engine.
    ///
    /// The prefix must be non-empty, the capacities non-zero, and the
    /// delimiter must not be one of the query separators `&`, `=` or `#`.
    pub fn validate(&self) -> Result<(), NavigationError> {
        if self.fifo_prefix.is_empty() {
            return Err(NavigationError::Config(
                "fifo_prefix must not be empty".to_string(),
            ));
        }
        if self.fifo_capacity == 0 {
            return Err(NavigationError::Config(
                "fifo_capacity must be greater than zero".to_string(),
            ));
        }
        if self.parse_cache_capacity == 0 {
            return Err(NavigationError::Config(
                "parse_cache_capacity must be greater than zero".to_string(),
            ));
        }
        if matches!(self.fifo_delimiter, '&' | '=' | '#') {
            return Err(NavigationError::Config(format!(
                "fifo_delimiter '{}' collides with query syntax",
                self.fifo_delimiter
            )));
        }
        Ok(())
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            fifo_prefix: "_".to_string(),
            fifo_delimiter: ',',
            fifo_capacity: Self::DEFAULT_FIFO_CAPACITY,
            parse_cache_capacity: Self::DEFAULT_PARSE_CACHE_CAPACITY,
        }
    }
}
