use workspace_settings_sdk::{AuditTrail, AutoDeletionSchedule, UserId, Workspace, WorkspaceId};

use crate::infra::storage::entity::Model as WorkspaceEntity;

/// Convert a workspace row to the contract model
impl From<WorkspaceEntity> for Workspace {
    fn from(e: WorkspaceEntity) -> Self {
        Self {
            id: WorkspaceId(e.package_id),
            name: e.name,
            description: e.description,
            label: e.label,
            hide_activity: e.hide_workspace_activity,
            status: e.status,
            latest_version: e.latest_version,
            latest_published_version: e.latest_published_version,
            auto_deletion: AutoDeletionSchedule {
                delete_on: e.auto_del_date,
                reminder_on: e.auto_del_reminder_date,
                reminder_sent_on: e.auto_del_reminder_sent_date,
            },
            audit: AuditTrail {
                created_by: UserId(e.created_by),
                created_at: e.date_created,
                last_updated_by: e.last_updated_by.map(UserId),
                last_updated_at: e.date_last_updated,
                last_activity_at: e.last_activity_date,
            },
            valid_primary_owner_count: e.valid_po_count,
            is_workspace: e.is_workspace,
            is_locked: e.is_locked,
            locked_by: e.locked_by.map(UserId),
        }
    }
}
