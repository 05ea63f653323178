use std::sync::Arc;

use sea_orm::{ConnectionTrait, DatabaseConnection, DatabaseTransaction, TransactionTrait};
use tracing::{debug, info, instrument};
use workspace_settings_sdk::{Requester, Workspace, WorkspaceId};

use crate::domain::error::DomainError;
use crate::domain::ports::PackageAccessCheck;
use crate::domain::repo::WorkspaceRepository;

/// Loads workspaces, optionally locking their row for the unit of work.
pub struct WorkspaceLoader<W: WorkspaceRepository> {
    repo: Arc<W>,
    package_access: Arc<dyn PackageAccessCheck>,
}

impl<W: WorkspaceRepository> WorkspaceLoader<W> {
    pub fn new(repo: Arc<W>, package_access: Arc<dyn PackageAccessCheck>) -> Self {
        Self {
            repo,
            package_access,
        }
    }

    /// Fresh snapshot of a workspace, read through `runner`.
    ///
    /// With `lock_row` the workspace row stays exclusively locked until the
    /// transaction behind `runner` ends.
    ///
    /// # Errors
    /// - `WorkspaceNotFound` if no workspace has this id
    /// - `InsufficientPrivilege` if the requester may not read the owning package
    /// - `Database` on storage faults
    #[instrument(skip(self, runner, requester), fields(workspace_id = %id))]
    pub async fn load<C: ConnectionTrait>(
        &self,
        runner: &C,
        id: WorkspaceId,
        lock_row: bool,
        requester: &Requester,
    ) -> Result<Workspace, DomainError> {
        let workspace = self
            .repo
            .find_by_id(runner, id, lock_row)
            .await?
            .ok_or(DomainError::WorkspaceNotFound(id))?;

        if !self.package_access.can_read(&workspace, requester).await? {
            let reason = format!("{requester} may not read workspace {id}");
            info!(%reason, "Workspace package access denied");
            return Err(DomainError::insufficient_privilege(reason));
        }

        debug!(lock_row, "Loaded workspace");
        Ok(workspace)
    }

    /// Open a unit of work holding the exclusive lock on the workspace row.
    ///
    /// Every other writer of the same workspace waits until the returned
    /// guard is committed or dropped.
    ///
    /// # Errors
    /// Same as [`Self::load`]; the unit of work is rolled back before returning.
    pub async fn acquire(
        &self,
        db: &DatabaseConnection,
        id: WorkspaceId,
        requester: &Requester,
    ) -> Result<LockedWorkspace, DomainError> {
        let tx = db.begin().await?;
        let workspace = self.load(&tx, id, true, requester).await?;
        Ok(LockedWorkspace { tx, workspace })
    }
}

/// A workspace together with the unit of work that holds its row lock.
///
/// Dropping the guard without [`LockedWorkspace::commit`] rolls the unit of
/// work back, which also releases the lock.
pub struct LockedWorkspace {
    tx: DatabaseTransaction,
    workspace: Workspace,
}

impl LockedWorkspace {
    #[must_use]
    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    /// Runner for statements that belong to this unit of work.
    #[must_use]
    pub fn tx(&self) -> &DatabaseTransaction {
        &self.tx
    }

    /// # Errors
    /// Returns `Database` if the commit fails.
    pub async fn commit(self) -> Result<(), DomainError> {
        self.tx.commit().await?;
        Ok(())
    }

    /// # Errors
    /// Returns `Database` if the rollback fails.
    pub async fn rollback(self) -> Result<(), DomainError> {
        self.tx.rollback().await?;
        Ok(())
    }
}
