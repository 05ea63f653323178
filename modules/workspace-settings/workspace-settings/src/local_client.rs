use std::sync::Arc;

use async_trait::async_trait;
use workspace_settings_sdk::{
    Requester, SaveWorkspaceUserSettingsRequest, SaveWorkspaceUserSettingsResult, UserId,
    WorkspaceId, WorkspaceSettingsApi, WorkspaceSettingsError, WorkspaceUserSettings,
};

use crate::domain::repo::{
    MembershipRepository, NotificationSettingsRepository, WorkspaceRepository,
};
use crate::domain::service::Service;

/// In-process `WorkspaceSettingsApi` backed by the domain service.
pub struct LocalClient<W, M, S>
where
    W: WorkspaceRepository,
    M: MembershipRepository,
    S: NotificationSettingsRepository,
{
    service: Arc<Service<W, M, S>>,
}

impl<W, M, S> LocalClient<W, M, S>
where
    W: WorkspaceRepository,
    M: MembershipRepository,
    S: NotificationSettingsRepository,
{
    #[must_use]
    pub fn new(service: Arc<Service<W, M, S>>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl<W, M, S> WorkspaceSettingsApi for LocalClient<W, M, S>
where
    W: WorkspaceRepository + 'static,
    M: MembershipRepository + 'static,
    S: NotificationSettingsRepository + 'static,
{
    async fn save_workspace_user_settings(
        &self,
        request: SaveWorkspaceUserSettingsRequest,
    ) -> SaveWorkspaceUserSettingsResult {
        self.service.save_workspace_user_settings(request).await
    }

    async fn get_workspace_user_settings(
        &self,
        requester: &Requester,
        workspace_id: WorkspaceId,
        user_id: UserId,
    ) -> Result<WorkspaceUserSettings, WorkspaceSettingsError> {
        self.service
            .get_workspace_user_settings(requester, workspace_id, user_id)
            .await
            .map_err(Into::into)
    }
}
