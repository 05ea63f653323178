//! Workspace Settings Module Implementation
//!
//! Per-user notification settings inside secure workspaces. The public API is
//! defined in `workspace-settings-sdk` and re-exported here.

pub use workspace_settings_sdk::{
    FunctionalRole, NotificationEvent, NotificationSettingsMap, Requester, ResultCode,
    SaveWorkspaceUserSettingsRequest, SaveWorkspaceUserSettingsResult, UserId, WorkspaceId,
    WorkspaceSettingsApi, WorkspaceSettingsError, WorkspaceUserSettings,
};

pub mod module;
pub use module::WorkspaceSettingsModule;

pub mod config;
pub use config::WorkspaceSettingsConfig;

pub mod local_client;

#[doc(hidden)]
pub mod domain;
#[doc(hidden)]
pub mod infra;
