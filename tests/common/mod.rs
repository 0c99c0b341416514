//! Test utilities for engine integration tests
//!
//! Provides a call-recording provider and recording subscribers.

#![allow(dead_code)]

use query_navigator::*;
use std::cell::RefCell;
use std::rc::Rc;

/// A provider call, as seen by [`RecordingProvider`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderCall {
    Push(String),
    Replace(String),
}

/// Provider that records every call and can be told to refuse them
#[derive(Debug, Default)]
pub struct RecordingProvider {
    pub location: String,
    pub calls: Vec<ProviderCall>,
    pub reject: bool,
}

impl RecordingProvider {
    pub fn at(location: &str) -> Self {
        Self {
            location: location.to_string(),
            ..Self::default()
        }
    }
}

impl NavigationProvider for RecordingProvider {
    fn location(&self) -> String {
        self.location.clone()
    }

    fn push_entry(&mut self, url: &str) -> Result<(), ProviderError> {
        if self.reject {
            return Err(ProviderError::rejected(url, "blocked by test"));
        }
        self.calls.push(ProviderCall::Push(url.to_string()));
        Ok(())
    }

    fn replace_entry(&mut self, url: &str) -> Result<(), ProviderError> {
        if self.reject {
            return Err(ProviderError::Unavailable("blocked by test".to_string()));
        }
        self.calls.push(ProviderCall::Replace(url.to_string()));
        Ok(())
    }
}

/// Shared log written by recording subscribers
pub type CallLog = Rc<RefCell<Vec<String>>>;

pub fn call_log() -> CallLog {
    Rc::new(RefCell::new(Vec::new()))
}

/// Subscriber that appends `"<label>:<current query>"` to `log`
pub fn recording_subscriber(label: &'static str, log: &CallLog) -> impl Subscriber {
    let log = log.clone();
    subscriber_fn(move |view| {
        log.borrow_mut()
            .push(format!("{}:{}", label, view.current().to_query_string()));
        Ok(())
    })
}

/// Subscriber that records its label and then fails
pub fn failing_subscriber(label: &'static str, log: &CallLog) -> impl Subscriber {
    let log = log.clone();
    subscriber_fn(move |_| {
        log.borrow_mut().push(format!("{}:failed", label));
        Err(format!("{} exploded", label).into())
    })
}

/// Subscriber that keeps every view it receives
pub fn retaining_subscriber(views: &Rc<RefCell<Vec<ChangeView>>>) -> impl Subscriber {
    let views = views.clone();
    subscriber_fn(move |view| {
        views.borrow_mut().push(view.clone());
        Ok(())
    })
}

/// Build a state from literal pairs
pub fn state(pairs: &[(&str, &str)]) -> QueryState {
    pairs.iter().copied().collect()
}

/// Engine over an in-memory history
pub fn memory_engine(url: &str) -> NavigationEngine<MemoryHistory> {
    NavigationEngine::new(MemoryHistory::new(url)).expect("valid test location")
}
