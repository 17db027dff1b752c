//! Error types for the todo server
//!
//! Every failure that can reach a caller is a [`TodoError`]. Handlers convert it
//! into a public MCP error with [`TodoError::into_mcp`], so the calling agent
//! always sees which kind of failure happened and which field or id caused it.

use mcp_attr::ErrorCode;
use thiserror::Error;

/// Result alias used throughout the service and repository layers
pub type TodoResult<T> = Result<T, TodoError>;

#[derive(Debug, Error)]
pub enum TodoError {
    /// Malformed or missing argument, empty title, order out of range
    #[error("ValidationError: {field}: {message}")]
    Validation { field: String, message: String },

    /// Referenced todo id does not exist
    #[error("NotFound: Todo with ID {0} not found")]
    NotFound(String),

    /// Disallowed status transition
    #[error("InvalidState: Todo {id} {message}")]
    InvalidState { id: String, message: String },

    #[error("StorageError: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("StorageError: {0}")]
    Io(#[from] std::io::Error),

    /// Existing database has a layout that cannot be upgraded
    #[error("MigrationError: {0}")]
    Migration(String),
}

impl TodoError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        TodoError::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn invalid_state(id: impl Into<String>, message: impl Into<String>) -> Self {
        TodoError::InvalidState {
            id: id.into(),
            message: message.into(),
        }
    }

    /// Convert into a public MCP error so the message reaches the client
    pub fn into_mcp(self) -> mcp_attr::Error {
        let code = match &self {
            TodoError::Storage(_) | TodoError::Io(_) | TodoError::Migration(_) => ErrorCode::INTERNAL_ERROR,
            _ => ErrorCode::INVALID_PARAMS,
        };
        mcp_attr::Error::new(code).with_message(self.to_string(), true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_kind_and_subject() {
        let err = TodoError::validation("title", "Title must not be empty");
        assert_eq!(
            err.to_string(),
            "ValidationError: title: Title must not be empty"
        );

        let err = TodoError::NotFound("abc".to_string());
        assert!(err.to_string().starts_with("NotFound:"));
        assert!(err.to_string().contains("abc"));

        let err = TodoError::invalid_state("abc", "is already completed");
        assert_eq!(err.to_string(), "InvalidState: Todo abc is already completed");
    }
}
