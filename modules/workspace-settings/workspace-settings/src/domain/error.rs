use workspace_settings_sdk::{ResultCode, WorkspaceId, WorkspaceSettingsError};

#[derive(Debug, thiserror::Error)]
pub enum DomainError {
    #[error("Validation error on field '{field}': {message}")]
    Validation { field: String, message: String },

    #[error("Workspace {0} not found")]
    WorkspaceNotFound(WorkspaceId),

    #[error("Insufficient privilege: {0}")]
    InsufficientPrivilege(String),

    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),
}

impl DomainError {
    #[must_use]
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    #[must_use]
    pub fn insufficient_privilege(message: impl Into<String>) -> Self {
        Self::InsufficientPrivilege(message.into())
    }
}

impl From<&DomainError> for ResultCode {
    fn from(e: &DomainError) -> Self {
        match e {
            DomainError::InsufficientPrivilege(_) => Self::InsufficientPrivilege,
            // A missing workspace is reported like any other system failure.
            DomainError::Validation { .. }
            | DomainError::WorkspaceNotFound(_)
            | DomainError::Database(_) => Self::SystemError,
        }
    }
}

impl From<DomainError> for WorkspaceSettingsError {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::Validation { field, message } => {
                Self::validation(format!("{field}: {message}"))
            }
            DomainError::WorkspaceNotFound(_) => Self::not_found(),
            DomainError::InsufficientPrivilege(_) => Self::forbidden(),
            DomainError::Database(_) => Self::internal(),
        }
    }
}
