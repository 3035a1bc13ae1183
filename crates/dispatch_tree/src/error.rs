//! Dispatch error types

use contracts::ContractError;
use thiserror::Error;

/// Dispatch-tree errors
///
/// Replacing a handler is not an error; see
/// [`RegisterOutcome::Replaced`](crate::RegisterOutcome::Replaced).
#[derive(Debug, Error)]
pub enum DispatchError {
    /// Path rejected (registration skipped, tree unchanged)
    #[error("invalid path '{path}': {reason}")]
    InvalidPath { path: String, reason: String },

    /// Nothing along the path, not even the root, has a handler
    #[error("no handler found for '{path}'")]
    NoHandlerFound { path: String },

    /// Route table names a handler the registry does not know
    #[error("unknown handler '{handler}' referenced by route '{path}'")]
    UnknownHandler { handler: String, path: String },

    /// Configuration / IO error (from contract)
    #[error("contract error: {0}")]
    Contract(#[from] ContractError),
}

impl DispatchError {
    /// Create an invalid path error
    pub fn invalid_path(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidPath {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a no-handler error
    pub fn no_handler(path: impl Into<String>) -> Self {
        Self::NoHandlerFound { path: path.into() }
    }

    /// Create an unknown handler error
    pub fn unknown_handler(handler: impl Into<String>, path: impl Into<String>) -> Self {
        Self::UnknownHandler {
            handler: handler.into(),
            path: path.into(),
        }
    }

    /// True for the "nothing registered to handle this" condition
    pub fn is_no_handler(&self) -> bool {
        matches!(self, Self::NoHandlerFound { .. })
    }
}
