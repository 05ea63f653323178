//! `WorkspaceSettingsApi` trait definition.
//!
//! Every operation takes the acting `Requester`; access is decided by the
//! module, never by the caller.

use async_trait::async_trait;

use crate::errors::WorkspaceSettingsError;
use crate::models::{Requester, UserId, WorkspaceId, WorkspaceUserSettings};
use crate::requests::{SaveWorkspaceUserSettingsRequest, SaveWorkspaceUserSettingsResult};

/// Public API trait for the workspace settings module.
#[async_trait]
pub trait WorkspaceSettingsApi: Send + Sync {
    /// Save the notification settings of `request.user_id` in a workspace.
    ///
    /// Keys missing from the request are stored as enabled. The call never
    /// fails: every outcome is reported through the result code.
    async fn save_workspace_user_settings(
        &self,
        request: SaveWorkspaceUserSettingsRequest,
    ) -> SaveWorkspaceUserSettingsResult;

    /// Effective notification settings of a user in a workspace.
    ///
    /// Keys without a stored row are reported as enabled.
    async fn get_workspace_user_settings(
        &self,
        requester: &Requester,
        workspace_id: WorkspaceId,
        user_id: UserId,
    ) -> Result<WorkspaceUserSettings, WorkspaceSettingsError>;
}
