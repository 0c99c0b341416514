//! # query-navigator
//!
//! Treat a URL query string as application state, and let independent parts
//! of an application react to state *transitions* instead of state values.
//!
//! - [`QueryState`] — ordered `key → value` mapping that round-trips through a
//!   query string.
//! - [`FifoCodec`] — bounded, duplicate-free most-recently-used lists stored in
//!   a single value.
//! - [`Mutation`] / [`Mutations`] — explicit instructions: set, delete, or push
//!   onto a list.
//! - [`ChangeView`] — immutable previous/current pair with diff predicates.
//! - [`NavigationEngine`] — applies mutations, keeps a [`NavigationProvider`]
//!   (the host's session history) in step, and notifies [`Subscriber`]s.
//!
//! ## Quick start
//!
//! ```
//! use query_navigator::{subscriber_fn, MemoryHistory, Mutations, NavigationEngine};
//!
//! let mut engine = NavigationEngine::new(MemoryHistory::new("/mail?folder=inbox")).unwrap();
//!
//! engine.subscribe(subscriber_fn(|view| {
//!     if view.todo(["folder"]) {
//!         println!("reload folder list");
//!     }
//!     if view.one_modified(["_open"]) {
//!         println!("refresh tab strip");
//!     }
//!     Ok(())
//! }));
//!
//! engine
//!     .push(Mutations::new().set("folder", "sent").push_fifo("_open", "msg-42"))
//!     .unwrap();
//! assert_eq!(engine.url(), "?folder=sent&_open=msg-42");
//!
//! // Correct the state without creating a back-navigable step.
//! engine.push_silent(Mutations::new().delete("folder")).unwrap();
//! assert_eq!(engine.url(), "?_open=msg-42");
//! ```
//!
//! ## Features
//!
//! | Feature   | Default | Effect |
//! |-----------|---------|--------|
//! | `log`     | yes     | log through the `log` crate |
//! | `tracing` | no      | log through the `tracing` crate |
//! | `cache`   | yes     | LRU cache of parsed history URLs |
//! | `serde`   | no      | `Serialize`/`Deserialize` for [`QueryState`] and [`EngineConfig`] |

#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod logging;

#[cfg(feature = "cache")]
pub mod cache;
pub mod change;
pub mod config;
pub mod engine;
pub mod error;
pub mod fifo;
pub mod history;
pub mod mutation;
pub mod query;
pub mod subscriber;

pub use change::ChangeView;
pub use config::EngineConfig;
pub use engine::NavigationEngine;
pub use error::{BoxError, NavigationError, ParseError, ProviderError, SubscriberError};
pub use fifo::{FifoCodec, FifoOutcome};
pub use history::{MemoryHistory, NavigationProvider, SessionHistory};
pub use mutation::{Mutation, Mutations};
pub use query::QueryState;
pub use subscriber::{subscriber_fn, FnSubscriber, Subscriber, SubscriberResult};
