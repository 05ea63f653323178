//! Error types for the workspace settings SDK.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WorkspaceSettingsError {
    #[error("Workspace not found")]
    NotFound,

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Insufficient privilege")]
    Forbidden,

    #[error("Internal error")]
    Internal,
}

impl WorkspaceSettingsError {
    #[must_use]
    pub fn not_found() -> Self {
        Self::NotFound
    }

    #[must_use]
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn forbidden() -> Self {
        Self::Forbidden
    }

    #[must_use]
    pub fn internal() -> Self {
        Self::Internal
    }
}
