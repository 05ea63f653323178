//! Outbound ports the domain consumes but does not own.

use async_trait::async_trait;
use workspace_settings_sdk::{Requester, Workspace};

use crate::domain::error::DomainError;

/// Global feature switches, queried on every invocation.
#[async_trait]
pub trait FeatureFlags: Send + Sync {
    async fn is_enabled(&self, flag: &str) -> Result<bool, DomainError>;
}

/// Authorization on the package a workspace is bound to.
///
/// Decides whether the requester may read the workspace at all, before any
/// workspace role is considered.
#[async_trait]
pub trait PackageAccessCheck: Send + Sync {
    async fn can_read(
        &self,
        workspace: &Workspace,
        requester: &Requester,
    ) -> Result<bool, DomainError>;
}
