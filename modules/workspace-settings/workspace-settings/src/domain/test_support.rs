use time::OffsetDateTime;
use workspace_settings_sdk::{AuditTrail, AutoDeletionSchedule, UserId, Workspace, WorkspaceId};

/// Plain active workspace created by user 1.
pub fn sample_workspace(id: i64) -> Workspace {
    Workspace {
        id: WorkspaceId(id),
        name: format!("workspace-{id}"),
        description: None,
        label: None,
        hide_activity: false,
        status: "ACTIVE".to_owned(),
        latest_version: 1,
        latest_published_version: 1,
        auto_deletion: AutoDeletionSchedule::default(),
        audit: AuditTrail {
            created_by: UserId(1),
            created_at: OffsetDateTime::UNIX_EPOCH,
            last_updated_by: None,
            last_updated_at: None,
            last_activity_at: None,
        },
        valid_primary_owner_count: 1,
        is_workspace: true,
        is_locked: false,
        locked_by: None,
    }
}
