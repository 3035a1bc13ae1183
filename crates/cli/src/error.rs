//! Error types for CLI operations.

use contracts::ContractError;
use dispatch_tree::DispatchError;
use thiserror::Error;

/// CLI-specific error types
#[derive(Error, Debug)]
pub enum CliError {
    /// Route table file not found
    #[error("Route table not found: {path}")]
    ConfigNotFound { path: String },

    /// Route table could not be loaded
    #[error("Failed to load route table {path}: {source}")]
    ConfigLoad {
        path: String,
        #[source]
        source: ContractError,
    },

    /// Route table failed validation or dry-run registration
    #[error("Route table is invalid: {message}")]
    ConfigValidation { message: String },

    /// Some invoked paths had no handler at all
    #[error("{unresolved} of {total} path(s) found no handler")]
    Unresolved { unresolved: usize, total: usize },

    /// Tree build or dispatch error
    #[error(transparent)]
    Dispatch(#[from] DispatchError),
}

impl CliError {
    pub fn config_not_found(path: impl Into<String>) -> Self {
        Self::ConfigNotFound { path: path.into() }
    }

    pub fn config_load(path: impl Into<String>, source: ContractError) -> Self {
        Self::ConfigLoad {
            path: path.into(),
            source,
        }
    }

    pub fn config_validation(message: impl Into<String>) -> Self {
        Self::ConfigValidation {
            message: message.into(),
        }
    }

    pub fn unresolved(unresolved: usize, total: usize) -> Self {
        Self::Unresolved { unresolved, total }
    }
}

/// Result type alias for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unresolved_message() {
        assert_eq!(
            CliError::unresolved(2, 5).to_string(),
            "2 of 5 path(s) found no handler"
        );
    }

    #[test]
    fn test_dispatch_error_is_transparent() {
        let err: CliError = DispatchError::no_handler("/z").into();
        assert_eq!(err.to_string(), DispatchError::no_handler("/z").to_string());
    }
}
