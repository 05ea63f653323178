use async_trait::async_trait;
use sea_orm::ConnectionTrait;
use workspace_settings_sdk::{
    NotificationEvent, NotificationSettingsMap, Requester, UserId, Workspace, WorkspaceId,
};

use crate::domain::access::WorkspaceRole;
use crate::domain::error::DomainError;

/// Row key of one notification setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SettingKey {
    pub workspace_id: WorkspaceId,
    pub user_id: UserId,
    pub event: NotificationEvent,
}

/// Repository trait for workspace lookups.
#[async_trait]
pub trait WorkspaceRepository: Send + Sync {
    /// Find a workspace by id.
    ///
    /// With `for_update` the row stays exclusively locked until the
    /// transaction behind `runner` commits or rolls back.
    async fn find_by_id<C: ConnectionTrait>(
        &self,
        runner: &C,
        id: WorkspaceId,
        for_update: bool,
    ) -> Result<Option<Workspace>, DomainError>;
}

/// Repository trait for workspace membership records.
#[async_trait]
pub trait MembershipRepository: Send + Sync {
    /// Whether the requester holds `role` in the workspace.
    async fn has_role<C: ConnectionTrait>(
        &self,
        runner: &C,
        workspace: &Workspace,
        requester: &Requester,
        role: WorkspaceRole,
    ) -> Result<bool, DomainError>;

    async fn is_viewer<C: ConnectionTrait>(
        &self,
        runner: &C,
        workspace: &Workspace,
        requester: &Requester,
    ) -> Result<bool, DomainError> {
        self.has_role(runner, workspace, requester, WorkspaceRole::Viewer)
            .await
    }

    async fn is_collaborator<C: ConnectionTrait>(
        &self,
        runner: &C,
        workspace: &Workspace,
        requester: &Requester,
    ) -> Result<bool, DomainError> {
        self.has_role(runner, workspace, requester, WorkspaceRole::Collaborator)
            .await
    }

    async fn is_manager<C: ConnectionTrait>(
        &self,
        runner: &C,
        workspace: &Workspace,
        requester: &Requester,
    ) -> Result<bool, DomainError> {
        self.has_role(runner, workspace, requester, WorkspaceRole::Manager)
            .await
    }
}

/// Repository trait for per-user notification settings.
#[async_trait]
pub trait NotificationSettingsRepository: Send + Sync {
    /// Set `enabled` on an existing row. Returns the number of rows matched;
    /// zero means the row does not exist yet.
    async fn update_enabled<C: ConnectionTrait>(
        &self,
        runner: &C,
        key: SettingKey,
        enabled: bool,
    ) -> Result<u64, DomainError>;

    /// Insert the row for `key`.
    async fn insert<C: ConnectionTrait>(
        &self,
        runner: &C,
        key: SettingKey,
        enabled: bool,
    ) -> Result<(), DomainError>;

    /// Stored rows of one user in one workspace. Events without a row are absent.
    async fn find_for_user<C: ConnectionTrait>(
        &self,
        runner: &C,
        workspace_id: WorkspaceId,
        user_id: UserId,
    ) -> Result<NotificationSettingsMap, DomainError>;
}
