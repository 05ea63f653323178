#![allow(clippy::unwrap_used, clippy::expect_used)]

//! Test support utilities for `workspace_settings` integration tests.
//!
//! Provides an in-memory database with migrations applied, seed helpers and a
//! settings repository wrapper for counting and fault injection.

#![allow(dead_code)] // Support module provides utilities that may not all be used

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectOptions, ConnectionTrait, Database, DatabaseConnection,
    DbErr, EntityTrait, QueryFilter, Set,
};
use sea_orm_migration::MigratorTrait;
use time::OffsetDateTime;

use workspace_settings::domain::access::WorkspaceAccessResolver;
use workspace_settings::domain::error::DomainError;
use workspace_settings::domain::loader::WorkspaceLoader;
use workspace_settings::domain::repo::{NotificationSettingsRepository, SettingKey};
use workspace_settings::domain::service::Service;
use workspace_settings::infra::feature_flags::ConfigFeatureFlags;
use workspace_settings::infra::package_access::OpenPackageAccess;
use workspace_settings::infra::storage::entity;
use workspace_settings::infra::storage::{
    OrmMembershipRepository, OrmNotificationSettingsRepository, OrmWorkspaceRepository,
};
use workspace_settings::{
    FunctionalRole, NotificationEvent, NotificationSettingsMap, Requester,
    SaveWorkspaceUserSettingsRequest, UserId, WorkspaceId, WorkspaceSettingsConfig,
};

/// Create a fresh in-memory `SQLite` database with migrations applied.
///
/// The pool holds a single connection, so a unit of work in flight blocks
/// every other one, like a row lock would.
///
/// # Panics
/// Panics if the database connection or migrations fail.
pub async fn inmem_db() -> DatabaseConnection {
    let mut options = ConnectOptions::new("sqlite::memory:");
    options.max_connections(1).min_connections(1);
    let db = Database::connect(options)
        .await
        .expect("Failed to connect to in-memory database");

    workspace_settings::infra::storage::migrations::Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");

    db
}

/// Seed a package row; `is_workspace = false` makes it a plain package.
pub async fn seed_package(db: &DatabaseConnection, id: i64, is_workspace: bool) {
    let now = OffsetDateTime::now_utc();
    let am = entity::ActiveModel {
        package_id: Set(id),
        name: Set(format!("workspace-{id}")),
        description: Set(None),
        label: Set(None),
        hide_workspace_activity: Set(false),
        status: Set("ACTIVE".to_owned()),
        latest_version: Set(1),
        latest_published_version: Set(1),
        created_by: Set(1),
        auto_del_date: Set(None),
        auto_del_reminder_date: Set(None),
        auto_del_reminder_sent_date: Set(None),
        date_created: Set(now),
        last_updated_by: Set(None),
        date_last_updated: Set(None),
        last_activity_date: Set(None),
        valid_po_count: Set(1),
        is_workspace: Set(is_workspace),
        is_locked: Set(false),
        locked_by: Set(None),
    };
    am.insert(db).await.expect("Failed to seed workspace");
}

pub async fn seed_workspace(db: &DatabaseConnection, id: i64) {
    seed_package(db, id, true).await;
}

pub async fn seed_member(db: &DatabaseConnection, workspace_id: i64, user_id: i64, role: &str) {
    let am = entity::member::ActiveModel {
        package_id: Set(workspace_id),
        user_id: Set(user_id),
        role: Set(role.to_owned()),
    };
    am.insert(db).await.expect("Failed to seed member");
}

/// Raw stored rows of one user, keyed by notification type.
pub async fn stored_settings(
    db: &DatabaseConnection,
    workspace_id: i64,
    user_id: i64,
) -> BTreeMap<String, bool> {
    use entity::user_setting::{Column, Entity};

    Entity::find()
        .filter(Column::PackageId.eq(workspace_id))
        .filter(Column::UserId.eq(user_id))
        .all(db)
        .await
        .expect("Failed to read settings")
        .into_iter()
        .map(|row| (row.notification_type, row.enabled))
        .collect()
}

pub fn sender(user_id: i64) -> Requester {
    Requester::new(UserId(user_id)).with_role(FunctionalRole::Sender)
}

pub fn save_request(
    workspace_id: i64,
    user_id: i64,
    requester: Requester,
    settings: NotificationSettingsMap,
) -> SaveWorkspaceUserSettingsRequest {
    SaveWorkspaceUserSettingsRequest::new(
        WorkspaceId(workspace_id),
        UserId(user_id),
        requester,
        settings,
    )
}

pub type TestService<S> = Service<OrmWorkspaceRepository, OrmMembershipRepository, S>;

/// Service wired on `db` with the ORM repositories and the given settings repository.
pub fn build_service<S: NotificationSettingsRepository>(
    db: &DatabaseConnection,
    flags: Arc<ConfigFeatureFlags>,
    settings: Arc<S>,
) -> TestService<S> {
    let loader = WorkspaceLoader::new(
        Arc::new(OrmWorkspaceRepository::new()),
        Arc::new(OpenPackageAccess),
    );
    let resolver = WorkspaceAccessResolver::new(Arc::new(OrmMembershipRepository::new()), flags);
    Service::new(db.clone(), loader, resolver, settings)
}

pub fn orm_settings() -> Arc<OrmNotificationSettingsRepository> {
    Arc::new(OrmNotificationSettingsRepository::new())
}

pub fn flags(workspace_enabled: bool) -> Arc<ConfigFeatureFlags> {
    Arc::new(ConfigFeatureFlags::from_config(&WorkspaceSettingsConfig {
        workspace_enabled,
    }))
}

/// ORM settings repository that counts calls and can fail on one event.
#[derive(Default)]
pub struct InstrumentedSettings {
    inner: OrmNotificationSettingsRepository,
    pub updates: AtomicUsize,
    pub inserts: AtomicUsize,
    fail_on: Mutex<Option<NotificationEvent>>,
}

impl InstrumentedSettings {
    pub fn fail_on(&self, event: Option<NotificationEvent>) {
        *self.fail_on.lock().unwrap() = event;
    }

    pub fn inserts(&self) -> usize {
        self.inserts.load(Ordering::SeqCst)
    }

    pub fn updates(&self) -> usize {
        self.updates.load(Ordering::SeqCst)
    }

    fn check(&self, key: SettingKey) -> Result<(), DomainError> {
        if *self.fail_on.lock().unwrap() == Some(key.event) {
            return Err(DomainError::Database(DbErr::Custom(format!(
                "injected failure on {}",
                key.event
            ))));
        }
        Ok(())
    }
}

#[async_trait]
impl NotificationSettingsRepository for InstrumentedSettings {
    async fn update_enabled<C: ConnectionTrait>(
        &self,
        runner: &C,
        key: SettingKey,
        enabled: bool,
    ) -> Result<u64, DomainError> {
        self.check(key)?;
        self.updates.fetch_add(1, Ordering::SeqCst);
        self.inner.update_enabled(runner, key, enabled).await
    }

    async fn insert<C: ConnectionTrait>(
        &self,
        runner: &C,
        key: SettingKey,
        enabled: bool,
    ) -> Result<(), DomainError> {
        self.inserts.fetch_add(1, Ordering::SeqCst);
        self.inner.insert(runner, key, enabled).await
    }

    async fn find_for_user<C: ConnectionTrait>(
        &self,
        runner: &C,
        workspace_id: WorkspaceId,
        user_id: UserId,
    ) -> Result<NotificationSettingsMap, DomainError> {
        self.inner.find_for_user(runner, workspace_id, user_id).await
    }
}
