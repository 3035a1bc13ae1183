//! PathHandler trait - Dispatcher output interface
//!
//! Defines the abstract interface for path handlers.

use std::fmt;

use crate::HandlerId;

/// Status returned by a handler.
///
/// The dispatcher never interprets it, it is passed straight back to the caller.
pub type HandlerStatus = i32;

/// Path handler trait
///
/// All handlers registered in a dispatch tree implement this trait. `C` is the
/// caller's opaque context, handed through untouched on every invocation.
///
/// Handlers must not try to reach the tree they are registered in; they are
/// shared between readers once the tree is built.
pub trait PathHandler<C: ?Sized = ()>: Send + Sync {
    /// Handler identity (used for diagnostics and config binding)
    fn id(&self) -> &HandlerId;

    /// Handle a query
    ///
    /// `path` is the original query path, before keyed segments were
    /// canonicalized (`/b/interface=eth0`, not `/b/interface=`).
    fn handle(&self, path: &str, ctx: &mut C) -> HandlerStatus;
}

/// A named closure usable as a [`PathHandler`].
///
/// # Example
///
/// ```
/// use contracts::{FnHandler, PathHandler};
///
/// let handler = FnHandler::new("handler_a", |path, hits: &mut Vec<String>| {
///     hits.push(path.to_string());
///     0
/// });
///
/// let mut hits = Vec::new();
/// assert_eq!(handler.handle("/a", &mut hits), 0);
/// assert_eq!(handler.id().as_str(), "handler_a");
/// assert_eq!(hits, vec!["/a".to_string()]);
/// ```
pub struct FnHandler<F> {
    id: HandlerId,
    f: F,
}

impl<F> FnHandler<F> {
    /// Wrap a closure under the given identity
    pub fn new<C>(id: impl Into<HandlerId>, f: F) -> Self
    where
        C: ?Sized,
        F: Fn(&str, &mut C) -> HandlerStatus + Send + Sync,
    {
        Self { id: id.into(), f }
    }

    /// Handler identity
    pub fn id(&self) -> &HandlerId {
        &self.id
    }
}

impl<F> fmt::Debug for FnHandler<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnHandler")
            .field("id", &self.id)
            .finish_non_exhaustive()
    }
}

impl<C, F> PathHandler<C> for FnHandler<F>
where
    C: ?Sized,
    F: Fn(&str, &mut C) -> HandlerStatus + Send + Sync,
{
    fn id(&self) -> &HandlerId {
        &self.id
    }

    fn handle(&self, path: &str, ctx: &mut C) -> HandlerStatus {
        (self.f)(path, ctx)
    }
}
