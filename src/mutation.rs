//! Mutation instructions applied to the current state.
//!
//! A push carries an ordered batch of [`Mutation`]s. Each instruction names
//! one key and says exactly what happens to it: overwrite, delete, or record a
//! token in a bounded history list.
//!
//! Untyped partials (`key → Option<value>`) are still supported through
//! [`Mutation::infer`] and [`Mutations::from_pairs`], which pick the
//! instruction from the key's prefix:
//!
//! | Value       | Key                | Instruction            |
//! |-------------|--------------------|------------------------|
//! | `None`      | any                | [`Mutation::DeleteKey`] |
//! | `Some(v)`   | starts with prefix | [`Mutation::PushFifo`]  |
//! | `Some(v)`   | otherwise          | [`Mutation::SetScalar`] |
//!
//! # Example
//!
//! ```
//! use query_navigator::{Mutation, Mutations};
//!
//! let batch = Mutations::new()
//!     .set("page", "2")
//!     .delete("filter")
//!     .push_fifo("_recent", "doc-7");
//! assert_eq!(batch.len(), 3);
//!
//! let inferred = Mutations::from_pairs([("_recent", Some("doc-7")), ("page", None)], "_");
//! assert_eq!(inferred.iter().next(), Some(&Mutation::push_fifo("_recent", "doc-7")));
//! ```

use std::fmt;

/// A single change to one key of the state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mutation {
    /// Overwrite (or insert) a plain value.
    SetScalar {
        /// Key to write.
        key: String,
        /// New value.
        value: String,
    },

    /// Remove a key.
    DeleteKey {
        /// Key to remove.
        key: String,
    },

    /// Record `token` as the most recent entry of the history list under `key`.
    PushFifo {
        /// Key holding the list.
        key: String,
        /// Token to record.
        token: String,
    },
}

impl Mutation {
    /// Create a [`SetScalar`](Self::SetScalar) instruction.
    pub fn set(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self::SetScalar {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Create a [`DeleteKey`](Self::DeleteKey) instruction.
    pub fn delete(key: impl Into<String>) -> Self {
        Self::DeleteKey { key: key.into() }
    }

    /// Create a [`PushFifo`](Self::PushFifo) instruction.
    pub fn push_fifo(key: impl Into<String>, token: impl Into<String>) -> Self {
        Self::PushFifo {
            key: key.into(),
            token: token.into(),
        }
    }

    /// Pick the instruction for an untyped `(key, value)` pair.
    pub fn infer(
        key: impl Into<String>,
        value: Option<impl Into<String>>,
        fifo_prefix: &str,
    ) -> Self {
        let key = key.into();
        match value {
            None => Self::DeleteKey { key },
            Some(token) if key.starts_with(fifo_prefix) => Self::PushFifo {
                key,
                token: token.into(),
            },
            Some(value) => Self::SetScalar {
                key,
                value: value.into(),
            },
        }
    }

    /// The key this instruction touches.
    pub fn key(&self) -> &str {
        match self {
            Self::SetScalar { key, .. } | Self::DeleteKey { key } | Self::PushFifo { key, .. } => {
                key
            }
        }
    }
}

impl fmt::Display for Mutation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SetScalar { key, value } => write!(f, "set '{}' = '{}'", key, value),
            Self::DeleteKey { key } => write!(f, "delete '{}'", key),
            Self::PushFifo { key, token } => write!(f, "push '{}' onto '{}'", token, key),
        }
    }
}

/// An ordered batch of [`Mutation`]s, applied front to back.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Mutations {
    items: Vec<Mutation>,
}

impl Mutations {
    /// Create an empty batch.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a batch from untyped pairs, inferring each instruction with
    /// [`Mutation::infer`].
    pub fn from_pairs<K, V, I>(pairs: I, fifo_prefix: &str) -> Self
    where
        I: IntoIterator<Item = (K, Option<V>)>,
        K: Into<String>,
        V: Into<String>,
    {
        pairs
            .into_iter()
            .map(|(key, value)| Mutation::infer(key, value, fifo_prefix))
            .collect()
    }

    /// Append a [`SetScalar`](Mutation::SetScalar) instruction.
    pub fn set(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.items.push(Mutation::set(key, value));
        self
    }

    /// Append a [`DeleteKey`](Mutation::DeleteKey) instruction.
    pub fn delete(mut self, key: impl Into<String>) -> Self {
        self.items.push(Mutation::delete(key));
        self
    }

    /// Append a [`PushFifo`](Mutation::PushFifo) instruction.
    pub fn push_fifo(mut self, key: impl Into<String>, token: impl Into<String>) -> Self {
        self.items.push(Mutation::push_fifo(key, token));
        self
    }

    /// Append an arbitrary instruction.
    pub fn with(mut self, mutation: Mutation) -> Self {
        self.items.push(mutation);
        self
    }

    /// Iterate over instructions in application order.
    pub fn iter(&self) -> std::slice::Iter<'_, Mutation> {
        self.items.iter()
    }

    /// Number of instructions.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Return `true` if the batch has no instructions.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl FromIterator<Mutation> for Mutations {
    fn from_iter<I: IntoIterator<Item = Mutation>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

impl From<Mutation> for Mutations {
    fn from(mutation: Mutation) -> Self {
        Self {
            items: vec![mutation],
        }
    }
}

impl From<Vec<Mutation>> for Mutations {
    fn from(items: Vec<Mutation>) -> Self {
        Self { items }
    }
}

impl IntoIterator for Mutations {
    type Item = Mutation;
    type IntoIter = std::vec::IntoIter<Mutation>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a> IntoIterator for &'a Mutations {
    type Item = &'a Mutation;
    type IntoIter = std::slice::Iter<'a, Mutation>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
