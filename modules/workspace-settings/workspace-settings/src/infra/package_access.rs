use async_trait::async_trait;
use workspace_settings_sdk::{Requester, Workspace};

use crate::domain::error::DomainError;
use crate::domain::ports::PackageAccessCheck;

/// Package check for deployments without package-level authorization:
/// every requester may read every workspace, and workspace roles decide.
#[derive(Debug, Clone, Copy, Default)]
pub struct OpenPackageAccess;

#[async_trait]
impl PackageAccessCheck for OpenPackageAccess {
    async fn can_read(
        &self,
        _workspace: &Workspace,
        _requester: &Requester,
    ) -> Result<bool, DomainError> {
        Ok(true)
    }
}
