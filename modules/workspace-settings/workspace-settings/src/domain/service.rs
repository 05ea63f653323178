use std::sync::Arc;

use sea_orm::{ConnectionTrait, DatabaseConnection, DatabaseTransaction, TransactionTrait};
use tracing::{debug, error, info, instrument, warn};
use workspace_settings_sdk::{
    NotificationSettingsMap, Requester, ResultCode, SaveWorkspaceUserSettingsRequest,
    SaveWorkspaceUserSettingsResult, UserId, Workspace, WorkspaceId, WorkspaceUserSettings,
};

use super::access::WorkspaceAccessResolver;
use super::error::DomainError;
use super::fields::RequestFields;
use super::loader::WorkspaceLoader;
use super::repo::{
    MembershipRepository, NotificationSettingsRepository, SettingKey, WorkspaceRepository,
};

/// A save request that passed validation.
struct ValidSave {
    workspace_id: WorkspaceId,
    user_id: UserId,
    requester: Requester,
    settings: NotificationSettingsMap,
}

pub struct Service<W, M, S>
where
    W: WorkspaceRepository,
    M: MembershipRepository,
    S: NotificationSettingsRepository,
{
    db: DatabaseConnection,
    loader: WorkspaceLoader<W>,
    resolver: WorkspaceAccessResolver<M>,
    settings: Arc<S>,
}

impl<W, M, S> Service<W, M, S>
where
    W: WorkspaceRepository,
    M: MembershipRepository,
    S: NotificationSettingsRepository,
{
    pub fn new(
        db: DatabaseConnection,
        loader: WorkspaceLoader<W>,
        resolver: WorkspaceAccessResolver<M>,
        settings: Arc<S>,
    ) -> Self {
        Self {
            db,
            loader,
            resolver,
            settings,
        }
    }

    /// Validate, lock the workspace, authorize, then upsert every setting.
    ///
    /// Never fails: each outcome maps to exactly one result code.
    #[instrument(
        skip_all,
        fields(workspace_id = %request.workspace_id, user_id = %request.user_id)
    )]
    pub async fn save_workspace_user_settings(
        &self,
        request: SaveWorkspaceUserSettingsRequest,
    ) -> SaveWorkspaceUserSettingsResult {
        match self.try_save(request).await {
            Ok(()) => {
                info!("Saved workspace user settings");
                SaveWorkspaceUserSettingsResult::success()
            }
            Err(e) => {
                log_failure(&e);
                SaveWorkspaceUserSettingsResult::new(ResultCode::from(&e))
            }
        }
    }

    /// Effective settings of a user; keys without a stored row read as enabled.
    ///
    /// # Errors
    /// Validation, missing workspace, access denial, or storage faults.
    #[instrument(skip_all, fields(workspace_id = %workspace_id, user_id = %user_id))]
    pub async fn get_workspace_user_settings(
        &self,
        requester: &Requester,
        workspace_id: WorkspaceId,
        user_id: UserId,
    ) -> Result<WorkspaceUserSettings, DomainError> {
        validate_ids(workspace_id, user_id).inspect_err(log_failure)?;

        let workspace = self
            .loader
            .load(&self.db, workspace_id, false, requester)
            .await?;
        self.authorize(&self.db, &workspace, requester).await?;

        let stored = self
            .settings
            .find_for_user(&self.db, workspace_id, user_id)
            .await?;
        debug!(stored = stored.len(), "Loaded workspace user settings");

        Ok(WorkspaceUserSettings {
            workspace_id,
            user_id,
            settings: stored.resolved().collect(),
        })
    }

    async fn try_save(&self, request: SaveWorkspaceUserSettingsRequest) -> Result<(), DomainError> {
        let save = validate(request)?;

        let locked = self
            .loader
            .acquire(&self.db, save.workspace_id, &save.requester)
            .await?;

        let authorized = self
            .authorize(locked.tx(), locked.workspace(), &save.requester)
            .await;
        if let Err(e) = authorized {
            if let Err(rollback) = locked.rollback().await {
                warn!(error = %rollback, "Failed to roll back after access denial");
            }
            return Err(e);
        }

        let upserted = self.upsert_all(locked.tx(), &save).await;
        // Keys written before a failure stay persisted; a retried save repairs the rest.
        let committed = locked.commit().await;
        upserted?;
        committed
    }

    /// Applies the root override to the resolver's decision.
    async fn authorize<C: ConnectionTrait>(
        &self,
        runner: &C,
        workspace: &Workspace,
        requester: &Requester,
    ) -> Result<(), DomainError> {
        let denial = self
            .resolver
            .check_access(runner, workspace, requester)
            .await?;
        if denial.is_empty() {
            return Ok(());
        }

        let message = denial.message(requester);
        if requester.is_root() {
            info!(%message, "Root requester overrides workspace access denial");
            return Ok(());
        }
        info!(%message, "Workspace access denied");
        Err(DomainError::insufficient_privilege(message))
    }

    async fn upsert_all(
        &self,
        tx: &DatabaseTransaction,
        save: &ValidSave,
    ) -> Result<(), DomainError> {
        for (event, enabled) in save.settings.resolved() {
            let key = SettingKey {
                workspace_id: save.workspace_id,
                user_id: save.user_id,
                event,
            };
            // Each key gets its own savepoint so a failing key never undoes the previous ones.
            let step = tx.begin().await?;
            if let Err(e) = self.upsert_one(&step, key, enabled).await {
                error!(%event, error = %e, "Failed to save notification setting");
                step.rollback().await?;
                return Err(e);
            }
            step.commit().await?;
        }
        Ok(())
    }

    async fn upsert_one<C: ConnectionTrait>(
        &self,
        runner: &C,
        key: SettingKey,
        enabled: bool,
    ) -> Result<(), DomainError> {
        let matched = self.settings.update_enabled(runner, key, enabled).await?;
        if matched == 0 {
            self.settings.insert(runner, key, enabled).await?;
        }
        Ok(())
    }
}

fn validate(request: SaveWorkspaceUserSettingsRequest) -> Result<ValidSave, DomainError> {
    let Some(requester) = request.requester else {
        return Err(DomainError::validation(
            RequestFields::REQUESTER,
            "requester is missing",
        ));
    };
    validate_ids(request.workspace_id, request.user_id)?;
    let Some(settings) = request.settings else {
        return Err(DomainError::validation(
            RequestFields::SETTINGS,
            "notification settings map is missing",
        ));
    };

    Ok(ValidSave {
        workspace_id: request.workspace_id,
        user_id: request.user_id,
        requester,
        settings,
    })
}

fn validate_ids(workspace_id: WorkspaceId, user_id: UserId) -> Result<(), DomainError> {
    if !workspace_id.is_valid() {
        return Err(DomainError::validation(
            RequestFields::WORKSPACE_ID,
            "workspace id is not set",
        ));
    }
    if !user_id.is_valid() {
        return Err(DomainError::validation(
            RequestFields::USER_ID,
            "user id is not set",
        ));
    }
    Ok(())
}

fn log_failure(e: &DomainError) {
    match e {
        DomainError::Validation { .. } => {
            error!(error = %e, "Rejected workspace settings request");
        }
        DomainError::WorkspaceNotFound(_) => warn!(error = %e, "Workspace not found"),
        // Denials are logged where they are decided.
        DomainError::InsufficientPrivilege(_) => debug!(error = %e, "Request denied"),
        DomainError::Database(_) => {
            error!(error = %e, "Workspace settings storage failure");
        }
    }
}
