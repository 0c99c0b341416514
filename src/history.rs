//! Navigation providers: the host's session-history stack.
//!
//! The engine only needs three things from its host: the URL it starts at,
//! a way to add a history entry, and a way to overwrite the current one.
//! That is [`NavigationProvider`]. Back/forward traversal is driven by the
//! host; when the user moves through history, the host hands the target URL
//! to [`NavigationEngine::pop`](crate::NavigationEngine::pop).
//!
//! Providers that can traverse on request implement [`SessionHistory`] as
//! well, which lets the engine perform the traversal and the re-sync in one
//! call. [`MemoryHistory`] is such a provider, kept entirely in memory.

use crate::error::ProviderError;
use crate::trace_log;

/// Session-history operations the engine drives.
pub trait NavigationProvider {
    /// URL of the current history entry.
    fn location(&self) -> String;

    /// Add a new entry after the current one and make it current.
    fn push_entry(&mut self, url: &str) -> Result<(), ProviderError>;

    /// Overwrite the current entry's URL.
    fn replace_entry(&mut self, url: &str) -> Result<(), ProviderError>;
}

/// A provider that can move through its own history.
pub trait SessionHistory: NavigationProvider {
    /// Move one entry back, returning the new current URL.
    fn go_back(&mut self) -> Option<String>;

    /// Move one entry forward, returning the new current URL.
    fn go_forward(&mut self) -> Option<String>;
}

/// In-memory session history.
///
/// Behaves like a browser tab: pushing drops any forward entries, replacing
/// overwrites the current entry, and query-relative URLs (`?a=1`) are
/// resolved against the current entry.
///
/// ```
/// use query_navigator::{MemoryHistory, NavigationProvider, SessionHistory};
///
/// let mut history = MemoryHistory::new("https://app.test/view?a=1");
/// history.push_entry("?a=2").unwrap();
/// assert_eq!(history.location(), "https://app.test/view?a=2");
///
/// assert_eq!(history.go_back().as_deref(), Some("https://app.test/view?a=1"));
/// assert!(history.can_go_forward());
/// ```
#[derive(Debug, Clone)]
pub struct MemoryHistory {
    entries: Vec<String>,
    current: usize,
}

impl MemoryHistory {
    /// Create a history with a single entry.
    pub fn new(initial_url: impl Into<String>) -> Self {
        Self {
            entries: vec![initial_url.into()],
            current: 0,
        }
    }

    /// All entries, oldest first.
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// Index of the current entry.
    pub fn position(&self) -> usize {
        self.current
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always `false`: a history has at least its initial entry.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Check if there is an entry before the current one.
    pub fn can_go_back(&self) -> bool {
        self.current > 0
    }

    /// Check if there is an entry after the current one.
    pub fn can_go_forward(&self) -> bool {
        self.current + 1 < self.entries.len()
    }

    fn resolve(&self, url: &str) -> String {
        if url.starts_with('?') {
            let base = &self.entries[self.current];
            let end = base.find(['?', '#']).unwrap_or(base.len());
            format!("{}{}", &base[..end], url)
        } else {
            url.to_string()
        }
    }
}

impl NavigationProvider for MemoryHistory {
    fn location(&self) -> String {
        self.entries[self.current].clone()
    }

    fn push_entry(&mut self, url: &str) -> Result<(), ProviderError> {
        let resolved = self.resolve(url);
        trace_log!("history push '{}' at {}", resolved, self.current + 1);
        self.entries.truncate(self.current + 1);
        self.entries.push(resolved);
        self.current += 1;
        Ok(())
    }

    fn replace_entry(&mut self, url: &str) -> Result<(), ProviderError> {
        let resolved = self.resolve(url);
        trace_log!("history replace '{}' at {}", resolved, self.current);
        self.entries[self.current] = resolved;
        Ok(())
    }
}

impl SessionHistory for MemoryHistory {
    fn go_back(&mut self) -> Option<String> {
        if self.can_go_back() {
            self.current -= 1;
            Some(self.location())
        } else {
            None
        }
    }

    fn go_forward(&mut self) -> Option<String> {
        if self.can_go_forward() {
            self.current += 1;
            Some(self.location())
        } else {
            None
        }
    }
}

impl Default for MemoryHistory {
    fn default() -> Self {
        Self::new("/")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_navigation() {
        let mut history = MemoryHistory::new("/app");
        history.push_entry("?a=1").unwrap();
        history.push_entry("?a=2").unwrap();
        assert_eq!(history.location(), "/app?a=2");

        assert_eq!(history.go_back().as_deref(), Some("/app?a=1"));
        assert_eq!(history.go_back().as_deref(), Some("/app"));
        assert_eq!(history.go_back(), None);

        assert_eq!(history.go_forward().as_deref(), Some("/app?a=1"));
    }

    #[test]
    fn test_push_truncates_forward_entries() {
        let mut history = MemoryHistory::new("/app");
        history.push_entry("?a=1").unwrap();
        history.push_entry("?a=2").unwrap();
        history.go_back();
        history.push_entry("?b=1").unwrap();

        assert_eq!(history.entries(), ["/app", "/app?a=1", "/app?b=1"]);
        assert!(!history.can_go_forward());
    }

    #[test]
    fn test_replace() {
        let mut history = MemoryHistory::new("/app?x=1#frag");
        history.replace_entry("?x=2").unwrap();

        assert_eq!(history.location(), "/app?x=2");
        assert_eq!(history.len(), 1);
        assert!(!history.can_go_back());
    }

    #[test]
    fn test_absolute_url_is_kept() {
        let mut history = MemoryHistory::default();
        history.push_entry("https://other.test/?q=1").unwrap();
        assert_eq!(history.location(), "https://other.test/?q=1");
    }
}
