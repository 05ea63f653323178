use async_trait::async_trait;
use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QuerySelect, Select};
use workspace_settings_sdk::{Workspace, WorkspaceId};

use crate::domain::error::DomainError;
use crate::domain::repo::WorkspaceRepository;
use crate::infra::storage::entity::{Column as WorkspaceColumn, Entity as WorkspaceEntity};

/// ORM-based implementation of the `WorkspaceRepository` trait.
#[derive(Clone, Default)]
pub struct OrmWorkspaceRepository;

impl OrmWorkspaceRepository {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

/// Workspace lookup by id; `for_update` appends `FOR UPDATE`.
///
/// Backends without row locks (SQLite) drop the clause when rendering.
pub(crate) fn select_workspace(id: WorkspaceId, for_update: bool) -> Select<WorkspaceEntity> {
    let query = WorkspaceEntity::find_by_id(id.0).filter(WorkspaceColumn::IsWorkspace.eq(true));
    if for_update {
        query.lock_exclusive()
    } else {
        query
    }
}

#[async_trait]
impl WorkspaceRepository for OrmWorkspaceRepository {
    async fn find_by_id<C: ConnectionTrait>(
        &self,
        runner: &C,
        id: WorkspaceId,
        for_update: bool,
    ) -> Result<Option<Workspace>, DomainError> {
        let found = select_workspace(id, for_update).one(runner).await?;
        Ok(found.map(Into::into))
    }
}
