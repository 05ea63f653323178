//! Workspace settings SDK
//!
//! Contract types and the `WorkspaceSettingsApi` trait for the
//! workspace-settings module. Consumers depend on this crate only.

pub mod api;
pub mod errors;
pub mod models;
pub mod requests;

pub use api::WorkspaceSettingsApi;
pub use errors::WorkspaceSettingsError;
pub use models::{
    AuditTrail, AutoDeletionSchedule, FunctionalRole, NotificationEvent, NotificationSettingsMap,
    ParseKeyError, Requester, UserId, Workspace, WorkspaceId, WorkspaceUserSettings,
};
pub use requests::{ResultCode, SaveWorkspaceUserSettingsRequest, SaveWorkspaceUserSettingsResult};
