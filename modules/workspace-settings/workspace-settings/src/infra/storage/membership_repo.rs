use async_trait::async_trait;
use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter};
use workspace_settings_sdk::{Requester, Workspace};

use crate::domain::access::WorkspaceRole;
use crate::domain::error::DomainError;
use crate::domain::repo::MembershipRepository;
use crate::infra::storage::entity::member::{Column as MemberColumn, Entity as MemberEntity};

/// ORM-based implementation of the `MembershipRepository` trait.
#[derive(Clone, Default)]
pub struct OrmMembershipRepository;

impl OrmMembershipRepository {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl MembershipRepository for OrmMembershipRepository {
    async fn has_role<C: ConnectionTrait>(
        &self,
        runner: &C,
        workspace: &Workspace,
        requester: &Requester,
        role: WorkspaceRole,
    ) -> Result<bool, DomainError> {
        let count = MemberEntity::find()
            .filter(MemberColumn::PackageId.eq(workspace.id.0))
            .filter(MemberColumn::UserId.eq(requester.user_id().0))
            .filter(MemberColumn::Role.eq(role.as_str()))
            .count(runner)
            .await?;
        Ok(count > 0)
    }
}
