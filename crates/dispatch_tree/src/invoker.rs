//! Invoker - resolve then call

use contracts::HandlerStatus;
use observability::record_invocation;
use tracing::{debug, instrument};

use crate::error::DispatchError;
use crate::tree::DispatchTree;

impl<C> DispatchTree<C> {
    /// Resolve `path` and call its handler with `(path, ctx)`.
    ///
    /// The handler receives the original query path, key values included.
    /// Whatever status it returns (failures included) comes back as `Ok`.
    ///
    /// # Errors
    /// [`DispatchError::NoHandlerFound`] when nothing along the path, not even
    /// the root, has a handler.
    #[instrument(name = "dispatch_tree_invoke", skip(self, ctx))]
    pub fn invoke(&self, path: &str, ctx: &mut C) -> Result<HandlerStatus, DispatchError> {
        let handler = self
            .resolve(path)
            .ok_or_else(|| DispatchError::no_handler(path))?;

        let status = handler.handle(path, ctx);
        record_invocation(handler.id().as_str(), status);
        debug!(handler = %handler.id(), status, "handler invoked");

        Ok(status)
    }
}
