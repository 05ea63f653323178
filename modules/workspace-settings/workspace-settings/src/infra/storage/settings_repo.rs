use async_trait::async_trait;
use sea_orm::sea_query::{Expr, OnConflict};
use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, Set};
use tracing::warn;
use workspace_settings_sdk::{NotificationEvent, NotificationSettingsMap, UserId, WorkspaceId};

use crate::domain::error::DomainError;
use crate::domain::repo::{NotificationSettingsRepository, SettingKey};
use crate::infra::storage::entity::user_setting::{
    ActiveModel as SettingAM, Column as SettingColumn, Entity as SettingEntity,
};

/// ORM-based implementation of the `NotificationSettingsRepository` trait.
#[derive(Clone, Default)]
pub struct OrmNotificationSettingsRepository;

impl OrmNotificationSettingsRepository {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl NotificationSettingsRepository for OrmNotificationSettingsRepository {
    async fn update_enabled<C: ConnectionTrait>(
        &self,
        runner: &C,
        key: SettingKey,
        enabled: bool,
    ) -> Result<u64, DomainError> {
        let result = SettingEntity::update_many()
            .col_expr(SettingColumn::Enabled, Expr::value(enabled))
            .filter(SettingColumn::PackageId.eq(key.workspace_id.0))
            .filter(SettingColumn::UserId.eq(key.user_id.0))
            .filter(SettingColumn::NotificationType.eq(key.event.as_str()))
            .exec(runner)
            .await?;
        Ok(result.rows_affected)
    }

    async fn insert<C: ConnectionTrait>(
        &self,
        runner: &C,
        key: SettingKey,
        enabled: bool,
    ) -> Result<(), DomainError> {
        let model = SettingAM {
            package_id: Set(key.workspace_id.0),
            user_id: Set(key.user_id.0),
            notification_type: Set(key.event.as_str().to_owned()),
            enabled: Set(enabled),
        };

        // MySQL reports zero affected rows for an update that changes nothing,
        // so the insert must tolerate an existing row.
        SettingEntity::insert(model)
            .on_conflict(
                OnConflict::columns([
                    SettingColumn::PackageId,
                    SettingColumn::UserId,
                    SettingColumn::NotificationType,
                ])
                .update_column(SettingColumn::Enabled)
                .to_owned(),
            )
            .exec_without_returning(runner)
            .await?;
        Ok(())
    }

    async fn find_for_user<C: ConnectionTrait>(
        &self,
        runner: &C,
        workspace_id: WorkspaceId,
        user_id: UserId,
    ) -> Result<NotificationSettingsMap, DomainError> {
        let rows = SettingEntity::find()
            .filter(SettingColumn::PackageId.eq(workspace_id.0))
            .filter(SettingColumn::UserId.eq(user_id.0))
            .all(runner)
            .await?;

        let mut settings = NotificationSettingsMap::new();
        for row in rows {
            match row.notification_type.parse::<NotificationEvent>() {
                Ok(event) => settings.set(event, row.enabled),
                Err(e) => warn!(error = %e, "Skipping stored notification setting"),
            }
        }
        Ok(settings)
    }
}
