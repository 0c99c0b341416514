//! The navigation engine.
//!
//! [`NavigationEngine`] owns the current and previous [`QueryState`], keeps
//! them in step with a [`NavigationProvider`], and tells subscribers about
//! every visible transition.
//!
//! | Operation | State | Provider | Subscribers |
//! |-----------|-------|----------|-------------|
//! | [`push`](NavigationEngine::push) | previous ← current, then mutate | new entry | notified |
//! | [`push_silent`](NavigationEngine::push_silent) | mutate | replace entry | not notified |
//! | [`pop`](NavigationEngine::pop) | previous ← current, current ← parsed URL | untouched | notified |
//! | [`clear`](NavigationEngine::clear) | both emptied | replace entry with `?` | not notified |
//!
//! Snapshots are shared, never edited in place: a mutation clones the current
//! state if anything else (the previous snapshot, a retained [`ChangeView`])
//! still refers to it.
//!
//! # Example
//!
//! ```
//! use query_navigator::{subscriber_fn, MemoryHistory, Mutations, NavigationEngine};
//!
//! let mut engine = NavigationEngine::new(MemoryHistory::new("/app?folder=inbox")).unwrap();
//! engine.subscribe(subscriber_fn(|view| {
//!     assert!(view.todo(["folder"]));
//!     Ok(())
//! }));
//!
//! engine.push(Mutations::new().set("folder", "sent")).unwrap();
//! assert_eq!(engine.url(), "?folder=sent");
//!
//! engine.back().unwrap();
//! assert_eq!(engine.current().get("folder"), Some("inbox"));
//! ```

#[cfg(feature = "cache")]
use crate::cache::{CacheStats, ParseCache};
use crate::history::{NavigationProvider, SessionHistory};
use crate::{
    debug_log, error_log, info_log, trace_log, warn_log, ChangeView, EngineConfig, FifoCodec,
    FifoOutcome, Mutation, Mutations, NavigationError, QueryState, Subscriber, SubscriberError,
};
use std::sync::Arc;

/// Navigation operation, for logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NavigateOp {
    Push,
    PushSilent,
    Pop,
}

/// Query-state navigation engine bound to one provider.
pub struct NavigationEngine<P: NavigationProvider> {
    provider: P,
    config: EngineConfig,
    codec: FifoCodec,
    current: Arc<QueryState>,
    previous: Arc<QueryState>,
    subscribers: Vec<Box<dyn Subscriber>>,
    /// Result of every list push in the last mutation batch.
    last_fifo_outcomes: Vec<(String, FifoOutcome)>,
    #[cfg(feature = "cache")]
    parse_cache: ParseCache,
}

impl<P: NavigationProvider> NavigationEngine<P> {
    /// Create an engine with the default configuration.
    ///
    /// The current state is parsed from the provider's location; the
    /// previous state starts empty. Nobody is notified.
    pub fn new(provider: P) -> Result<Self, NavigationError> {
        Self::with_config(provider, EngineConfig::default())
    }

    /// Create an engine with an explicit configuration.
    pub fn with_config(provider: P, config: EngineConfig) -> Result<Self, NavigationError> {
        config.validate()?;

        #[cfg(feature = "cache")]
        let mut parse_cache = ParseCache::with_capacity(config.parse_cache_capacity);

        let location = provider.location();
        #[cfg(feature = "cache")]
        let initial = parse_cache.parse(&location);
        #[cfg(not(feature = "cache"))]
        let initial = QueryState::parse(&location);

        let current = initial.map_err(|err| {
            error_log!("Cannot parse initial location '{}': {}", location, err);
            err
        })?;
        info_log!("Navigation engine started at '{}'", location);

        Ok(Self {
            provider,
            codec: FifoCodec::from_config(&config),
            config,
            current: Arc::new(current),
            previous: Arc::new(QueryState::new()),
            subscribers: Vec::new(),
            last_fifo_outcomes: Vec::new(),
            #[cfg(feature = "cache")]
            parse_cache,
        })
    }

    // ========================================================================
    // Transitions
    // ========================================================================

    /// Apply `mutations`, record a new history entry, and notify subscribers.
    ///
    /// Provider and subscriber failures propagate. The state change is not
    /// rolled back when the provider refuses the entry.
    pub fn push(&mut self, mutations: impl Into<Mutations>) -> Result<(), NavigationError> {
        let from = self.current.to_url();
        self.previous = Arc::clone(&self.current);
        self.apply(mutations.into());

        let url = self.current.to_url();
        info_log!("Navigation {:?}: '{}' -> '{}'", NavigateOp::Push, from, url);
        self.provider.push_entry(&url).map_err(|err| {
            warn_log!("Provider rejected push of '{}': {}", url, err);
            err
        })?;

        self.notify()
    }

    /// Apply `mutations` and overwrite the current history entry.
    ///
    /// No back-navigable step is created, the previous snapshot is left
    /// alone, and subscribers are not notified.
    pub fn push_silent(&mut self, mutations: impl Into<Mutations>) -> Result<(), NavigationError> {
        let from = self.current.to_url();
        self.apply(mutations.into());

        let url = self.current.to_url();
        info_log!(
            "Navigation {:?}: '{}' -> '{}'",
            NavigateOp::PushSilent,
            from,
            url
        );
        self.provider.replace_entry(&url).map_err(|err| {
            warn_log!("Provider rejected replace with '{}': {}", url, err);
            err
        })?;
        Ok(())
    }

    /// Re-synchronize with a URL the provider has already moved to.
    ///
    /// This is the binding target for the host's navigate event (a browser
    /// `popstate`, a shell's back button) and nothing else. Application code
    /// changes state through [`push`](Self::push) and
    /// [`push_silent`](Self::push_silent); calling `pop` with a URL the
    /// provider is not at desynchronizes the engine from its history.
    /// Providers implementing [`SessionHistory`] get [`back`](Self::back)
    /// and [`forward`](Self::forward), which perform the binding themselves.
    ///
    /// The provider is not told anything. If `target_url` does not parse,
    /// the engine state is left untouched.
    ///
    /// ```
    /// use query_navigator::{MemoryHistory, Mutation, NavigationEngine, NavigationProvider, SessionHistory};
    ///
    /// let mut engine = NavigationEngine::new(MemoryHistory::new("/app?tab=1")).unwrap();
    /// engine.push(Mutation::set("tab", "2")).unwrap();
    ///
    /// // the host's history moved on its own and fired its navigate event
    /// engine.provider_mut().go_back();
    /// let location = engine.provider().location();
    /// engine.pop(&location).unwrap();
    ///
    /// assert_eq!(engine.current().get("tab"), Some("1"));
    /// assert_eq!(engine.previous().get("tab"), Some("2"));
    /// ```
    pub fn pop(&mut self, target_url: &str) -> Result<(), NavigationError> {
        let target = self.parse_url(target_url).map_err(|err| {
            warn_log!("Cannot parse history target '{}': {}", target_url, err);
            err
        })?;

        info_log!(
            "Navigation {:?}: '{}' -> '{}'",
            NavigateOp::Pop,
            self.current.to_url(),
            target.to_url()
        );
        self.previous = std::mem::replace(&mut self.current, Arc::new(target));
        self.last_fifo_outcomes.clear();

        self.notify()
    }

    /// Reset both snapshots to empty and replace the current history entry
    /// with an empty query. Nobody is notified.
    pub fn clear(&mut self) -> Result<(), NavigationError> {
        self.current = Arc::new(QueryState::new());
        self.previous = Arc::new(QueryState::new());
        self.last_fifo_outcomes.clear();
        #[cfg(feature = "cache")]
        self.parse_cache.clear();

        info_log!("Navigation state cleared");
        let url = self.current.to_url();
        self.provider.replace_entry(&url).map_err(|err| {
            warn_log!("Provider rejected clear: {}", err);
            err
        })?;
        Ok(())
    }

    /// Register a subscriber. Subscribers are notified in registration order.
    pub fn subscribe(&mut self, subscriber: impl Subscriber) {
        debug_log!(
            "Subscribed '{}' ({} total)",
            subscriber.name(),
            self.subscribers.len() + 1
        );
        self.subscribers.push(Box::new(subscriber));
    }

    /// Turn an untyped partial into instructions, using the configured
    /// list prefix to pick between scalar writes and list pushes.
    pub fn infer_mutations<K, V, I>(&self, pairs: I) -> Mutations
    where
        I: IntoIterator<Item = (K, Option<V>)>,
        K: Into<String>,
        V: Into<String>,
    {
        Mutations::from_pairs(pairs, &self.config.fifo_prefix)
    }

    fn apply(&mut self, mutations: Mutations) {
        self.last_fifo_outcomes.clear();
        let state = Arc::make_mut(&mut self.current);

        for mutation in mutations {
            trace_log!("Applying {}", mutation);
            match mutation {
                Mutation::SetScalar { key, value } => state.set(key, value),
                Mutation::DeleteKey { key } => {
                    state.delete(&key);
                }
                Mutation::PushFifo { key, token } => {
                    let outcome = self.codec.push(state, &key, &token);
                    trace_log!("List '{}' push '{}' -> {:?}", key, token, outcome);
                    self.last_fifo_outcomes.push((key, outcome));
                }
            }
        }
    }

    fn notify(&self) -> Result<(), NavigationError> {
        let view = ChangeView::from_shared(Arc::clone(&self.previous), Arc::clone(&self.current));
        debug_log!(
            "Notifying {} subscribers of {} changed keys",
            self.subscribers.len(),
            view.changed_keys().len()
        );

        for subscriber in &self.subscribers {
            subscriber.on_change(&view).map_err(|source| {
                error_log!("Subscriber '{}' failed: {}", subscriber.name(), source);
                SubscriberError::new(subscriber.name(), source)
            })?;
        }
        Ok(())
    }

    #[cfg(feature = "cache")]
    fn parse_url(&mut self, url: &str) -> Result<QueryState, crate::ParseError> {
        self.parse_cache.parse(url)
    }

    #[cfg(not(feature = "cache"))]
    fn parse_url(&mut self, url: &str) -> Result<QueryState, crate::ParseError> {
        QueryState::parse(url)
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Current state (read-only).
    pub fn current(&self) -> &QueryState {
        &self.current
    }

    /// State before the last notified transition (read-only).
    pub fn previous(&self) -> &QueryState {
        &self.previous
    }

    /// Current state as a query-relative URL.
    pub fn url(&self) -> String {
        self.current.to_url()
    }

    /// Outcome of each list push in the last mutation batch, in order.
    pub fn last_fifo_outcomes(&self) -> &[(String, FifoOutcome)] {
        &self.last_fifo_outcomes
    }

    /// Tokens of the list under `key` in the current state.
    pub fn fifo_list(&self, key: &str) -> Vec<String> {
        self.codec.list(&self.current, key)
    }

    /// Engine configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Number of registered subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    /// The bound provider.
    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Mutable access to the bound provider.
    ///
    /// Moving the provider through history here does not re-sync the
    /// engine; call [`pop`](Self::pop) with the new location afterwards.
    pub fn provider_mut(&mut self) -> &mut P {
        &mut self.provider
    }

    /// Parse cache statistics.
    #[cfg(feature = "cache")]
    pub fn parse_cache_stats(&self) -> &CacheStats {
        self.parse_cache.stats()
    }
}

impl<P: SessionHistory> NavigationEngine<P> {
    /// Move the provider one entry back and re-sync with it.
    ///
    /// Returns `Ok(false)` without notifying anyone when there is no earlier
    /// entry.
    pub fn back(&mut self) -> Result<bool, NavigationError> {
        match self.provider.go_back() {
            Some(url) => self.pop(&url).map(|()| true),
            None => {
                debug_log!("Back requested at the start of history");
                Ok(false)
            }
        }
    }

    /// Move the provider one entry forward and re-sync with it.
    pub fn forward(&mut self) -> Result<bool, NavigationError> {
        match self.provider.go_forward() {
            Some(url) => self.pop(&url).map(|()| true),
            None => {
                debug_log!("Forward requested at the end of history");
                Ok(false)
            }
        }
    }
}

impl<P: NavigationProvider + std::fmt::Debug> std::fmt::Debug for NavigationEngine<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NavigationEngine")
            .field("provider", &self.provider)
            .field("current", &self.current)
            .field("previous", &self.previous)
            .field("subscribers", &self.subscribers.len())
            .finish_non_exhaustive()
    }
}
