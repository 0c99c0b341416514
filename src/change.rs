//! Per-transition change views.
//!
//! Every notified transition produces one [`ChangeView`]: an immutable pair of
//! the state before and after the transition. Subscribers ask it questions
//! about the keys they depend on instead of comparing values themselves.
//!
//! "Defined" means present with a non-empty value. The text `"false"` or `"0"`
//! is an ordinary non-empty value and therefore defined.
//!
//! ```
//! use query_navigator::{ChangeView, QueryState};
//!
//! let previous: QueryState = [("a", "1")].into_iter().collect();
//! let current: QueryState = [("a", "2"), ("b", "3")].into_iter().collect();
//! let view = ChangeView::new(previous, current);
//!
//! assert!(view.todo(["a"]));
//! assert!(view.todo(["b"]));
//! assert!(!view.todo(["c"]));
//! ```

use crate::QueryState;
use std::fmt;
use std::sync::Arc;

/// Immutable `(previous, current)` snapshot pair with diff predicates.
///
/// Cloning is cheap: both snapshots are shared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeView {
    previous: Arc<QueryState>,
    current: Arc<QueryState>,
}

impl ChangeView {
    /// Build a view over two owned states.
    pub fn new(previous: QueryState, current: QueryState) -> Self {
        Self::from_shared(Arc::new(previous), Arc::new(current))
    }

    /// Build a view over shared snapshots.
    pub fn from_shared(previous: Arc<QueryState>, current: Arc<QueryState>) -> Self {
        Self { previous, current }
    }

    /// State before the transition.
    pub fn previous(&self) -> &QueryState {
        &self.previous
    }

    /// State after the transition.
    pub fn current(&self) -> &QueryState {
        &self.current
    }

    /// `true` if every key has a non-empty value in the current state.
    pub fn all_defined<I, K>(&self, keys: I) -> bool
    where
        I: IntoIterator<Item = K>,
        K: AsRef<str>,
    {
        keys.into_iter()
            .all(|key| self.current.get(key.as_ref()).is_some_and(|v| !v.is_empty()))
    }

    /// `true` if at least one key differs between previous and current.
    ///
    /// Appearing or disappearing counts as a difference.
    pub fn one_modified<I, K>(&self, keys: I) -> bool
    where
        I: IntoIterator<Item = K>,
        K: AsRef<str>,
    {
        keys.into_iter().any(|key| self.is_modified(key.as_ref()))
    }

    /// `true` if all keys are defined and at least one of them changed.
    ///
    /// This is the usual guard at the top of a subscriber: its inputs are
    /// ready and something about them just moved.
    pub fn todo<I, K>(&self, keys: I) -> bool
    where
        I: IntoIterator<Item = K>,
        K: AsRef<str>,
    {
        let owned: Vec<K> = keys.into_iter().collect();
        let keys: Vec<&str> = owned.iter().map(|key| key.as_ref()).collect();
        self.all_defined(&keys) && self.one_modified(&keys)
    }

    /// Keys whose value differs, current keys first then removed ones.
    pub fn changed_keys(&self) -> Vec<&str> {
        self.current
            .keys()
            .filter(|key| self.is_modified(key))
            .chain(self.removed_keys())
            .collect()
    }

    /// `true` if nothing differs between the two snapshots.
    pub fn is_empty(&self) -> bool {
        self.changed_keys().is_empty()
    }

    /// Multi-line diff summary, one line per key.
    ///
    /// | Marker | Meaning                  | Line                 |
    /// |--------|--------------------------|----------------------|
    /// | `=`    | unchanged                | `= key: value`       |
    /// | `*`    | changed                  | `* key: old > new`   |
    /// | `+`    | added                    | `+ key: value`       |
    /// | `-`    | removed                  | `- key: old`         |
    pub fn debug(&self) -> String {
        let mut lines = Vec::with_capacity(self.current.len());

        for (key, value) in self.current.iter() {
            let line = match self.previous.get(key) {
                Some(old) if old == value => format!("= {}: {}", key, value),
                Some(old) => format!("* {}: {} > {}", key, old, value),
                None => format!("+ {}: {}", key, value),
            };
            lines.push(line);
        }
        for key in self.removed_keys() {
            let old = self.previous.get(key).unwrap_or_default();
            lines.push(format!("- {}: {}", key, old));
        }

        lines.join("\n")
    }

    fn is_modified(&self, key: &str) -> bool {
        self.previous.get(key) != self.current.get(key)
    }

    fn removed_keys(&self) -> impl Iterator<Item = &str> {
        self.previous.keys().filter(|key| !self.current.has(key))
    }
}

impl fmt::Display for ChangeView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.debug())
    }
}
