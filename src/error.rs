//! Error types for state parsing and navigation.
//!
//! Three failure sources exist, and none of them is retried or swallowed:
//!
//! - [`ParseError`] — a URL handed to the engine could not be parsed.
//! - [`ProviderError`] — the navigation provider refused a push or replace.
//! - [`SubscriberError`] — a subscriber failed while handling a change.
//!
//! Every public engine operation returns [`NavigationError`], which wraps all
//! three.
//!
//! # Examples
//!
//! ```
//! use query_navigator::error::{NavigationError, ProviderError};
//!
//! let err: NavigationError = ProviderError::rejected("?a=1", "quota exceeded").into();
//! assert!(err.is_provider());
//! assert_eq!(
//!     err.to_string(),
//!     "provider error: history entry '?a=1' rejected: quota exceeded"
//! );
//! ```

use thiserror::Error;

/// Boxed error returned by subscribers.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// A URL could not be parsed into a [`QueryState`](crate::QueryState).
///
/// Malformed percent escapes and invalid UTF-8 are tolerated by the parser,
/// so this only reports text that cannot be a URL.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The text contains a raw ASCII control character.
    #[error("control character at byte {position} in '{escaped}'", escaped = .input.escape_debug())]
    ControlCharacter {
        /// Byte offset of the offending character.
        position: usize,
        /// The text being parsed.
        input: String,
    },
}

/// The navigation provider refused to record a history entry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProviderError {
    /// The provider rejected this particular URL (security policy, quota, ...).
    #[error("history entry '{url}' rejected: {reason}")]
    Rejected {
        /// URL the engine tried to record.
        url: String,
        /// Provider supplied reason.
        reason: String,
    },

    /// The provider cannot accept entries at all right now.
    #[error("navigation provider unavailable: {0}")]
    Unavailable(String),
}

impl ProviderError {
    /// Shorthand for [`ProviderError::Rejected`].
    pub fn rejected(url: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Rejected {
            url: url.into(),
            reason: reason.into(),
        }
    }
}

/// A subscriber returned an error while handling a [`ChangeView`](crate::ChangeView).
#[derive(Debug, Error)]
#[error("subscriber '{subscriber}' failed: {source}")]
pub struct SubscriberError {
    /// [`Subscriber::name`](crate::Subscriber::name) of the failing subscriber.
    pub subscriber: String,
    /// The error the subscriber returned.
    #[source]
    pub source: BoxError,
}

impl SubscriberError {
    /// Wrap an error raised by the named subscriber.
    pub fn new(subscriber: impl Into<String>, source: impl Into<BoxError>) -> Self {
        Self {
            subscriber: subscriber.into(),
            source: source.into(),
        }
    }
}

/// Any failure surfaced by [`NavigationEngine`](crate::NavigationEngine).
#[derive(Debug, Error)]
pub enum NavigationError {
    /// Parsing the initial or target URL failed.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// The provider rejected a push or replace.
    #[error("provider error: {0}")]
    Provider(#[from] ProviderError),

    /// A subscriber failed during fan-out.
    #[error(transparent)]
    Subscriber(#[from] SubscriberError),

    /// The engine configuration is unusable.
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl NavigationError {
    /// Check if this is a [`ParseError`].
    pub fn is_parse(&self) -> bool {
        matches!(self, Self::Parse(_))
    }

    /// Check if this is a [`ProviderError`].
    pub fn is_provider(&self) -> bool {
        matches!(self, Self::Provider(_))
    }

    /// Check if this is a [`SubscriberError`].
    pub fn is_subscriber(&self) -> bool {
        matches!(self, Self::Subscriber(_))
    }
}
