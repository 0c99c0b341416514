//! Change subscribers.
//!
//! Subscribers are notified after every `push` and `pop`, in registration
//! order, synchronously, each with the same [`ChangeView`]. They only get a
//! shared borrow of the view, so none of them can alter what the others see.
//!
//! A subscriber that returns an error stops the fan-out: the error is
//! propagated to whoever triggered the transition and later subscribers are
//! not called for that transition.
//!
//! | Approach | When to use |
//! |----------|-------------|
//! | Implement [`Subscriber`] | Named, stateful subscribers |
//! | [`subscriber_fn`] | Quick one-off from a closure |
//!
//! # Example
//!
//! ```
//! use query_navigator::{ChangeView, Subscriber, SubscriberResult};
//!
//! struct Sidebar;
//!
//! impl Subscriber for Sidebar {
//!     fn on_change(&self, view: &ChangeView) -> SubscriberResult {
//!         if view.todo(["folder"]) {
//!             println!("reloading folder {:?}", view.current().get("folder"));
//!         }
//!         Ok(())
//!     }
//!
//!     fn name(&self) -> &'static str {
//!         "Sidebar"
//!     }
//! }
//! ```

use crate::error::BoxError;
use crate::ChangeView;

/// Return type of [`Subscriber::on_change`].
pub type SubscriberResult = Result<(), BoxError>;

/// Reacts to state transitions.
pub trait Subscriber: 'static {
    /// Called once per notified transition.
    fn on_change(&self, view: &ChangeView) -> SubscriberResult;

    /// Subscriber name for logs and errors.
    fn name(&self) -> &'static str {
        "Subscriber"
    }
}

/// Create a subscriber from a closure.
///
/// ```
/// use query_navigator::subscriber_fn;
///
/// let subscriber = subscriber_fn(|view| {
///     println!("{}", view.debug());
///     Ok(())
/// });
/// ```
pub const fn subscriber_fn<F>(f: F) -> FnSubscriber<F>
where
    F: Fn(&ChangeView) -> SubscriberResult + 'static,
{
    FnSubscriber { f }
}

/// Subscriber created from a closure via [`subscriber_fn`].
pub struct FnSubscriber<F> {
    f: F,
}

impl<F> Subscriber for FnSubscriber<F>
where
    F: Fn(&ChangeView) -> SubscriberResult + 'static,
{
    fn on_change(&self, view: &ChangeView) -> SubscriberResult {
        (self.f)(view)
    }

    fn name(&self) -> &'static str {
        "FnSubscriber"
    }
}
