use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection};
use tracing_test::traced_test;
use workspace_settings_sdk::{
    FunctionalRole, NotificationEvent, NotificationSettingsMap, Requester, ResultCode,
    SaveWorkspaceUserSettingsRequest, UserId, Workspace, WorkspaceId,
};

use super::access::{WorkspaceAccessResolver, WorkspaceRole};
use super::error::DomainError;
use super::loader::WorkspaceLoader;
use super::ports::{FeatureFlags, PackageAccessCheck};
use super::repo::{
    MembershipRepository, NotificationSettingsRepository, SettingKey, WorkspaceRepository,
};
use super::service::Service;
use super::test_support::sample_workspace;

struct MockWorkspaces {
    workspace: Option<Workspace>,
    lookups: AtomicUsize,
    row_locks: Mutex<Vec<bool>>,
}

impl MockWorkspaces {
    fn row_locks(&self) -> Vec<bool> {
        self.row_locks.lock().unwrap().clone()
    }
}

#[async_trait]
impl WorkspaceRepository for MockWorkspaces {
    async fn find_by_id<C: ConnectionTrait>(
        &self,
        _runner: &C,
        id: WorkspaceId,
        for_update: bool,
    ) -> Result<Option<Workspace>, DomainError> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        self.row_locks.lock().unwrap().push(for_update);
        Ok(self.workspace.clone().filter(|w| w.id == id))
    }
}

struct MockMemberships(Vec<WorkspaceRole>);

#[async_trait]
impl MembershipRepository for MockMemberships {
    async fn has_role<C: ConnectionTrait>(
        &self,
        _runner: &C,
        _workspace: &Workspace,
        _requester: &Requester,
        role: WorkspaceRole,
    ) -> Result<bool, DomainError> {
        Ok(self.0.contains(&role))
    }
}

struct MockSettings {
    stored: NotificationSettingsMap,
    writes: AtomicUsize,
}

#[async_trait]
impl NotificationSettingsRepository for MockSettings {
    async fn update_enabled<C: ConnectionTrait>(
        &self,
        _runner: &C,
        _key: SettingKey,
        _enabled: bool,
    ) -> Result<u64, DomainError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(1)
    }

    async fn insert<C: ConnectionTrait>(
        &self,
        _runner: &C,
        _key: SettingKey,
        _enabled: bool,
    ) -> Result<(), DomainError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn find_for_user<C: ConnectionTrait>(
        &self,
        _runner: &C,
        _workspace_id: WorkspaceId,
        _user_id: UserId,
    ) -> Result<NotificationSettingsMap, DomainError> {
        Ok(self.stored.clone())
    }
}

struct FixedFlags(bool);

#[async_trait]
impl FeatureFlags for FixedFlags {
    async fn is_enabled(&self, _flag: &str) -> Result<bool, DomainError> {
        Ok(self.0)
    }
}

struct FixedPackageAccess(bool);

#[async_trait]
impl PackageAccessCheck for FixedPackageAccess {
    async fn can_read(
        &self,
        _workspace: &Workspace,
        _requester: &Requester,
    ) -> Result<bool, DomainError> {
        Ok(self.0)
    }
}

struct Fixture {
    workspaces: Arc<MockWorkspaces>,
    settings: Arc<MockSettings>,
    service: Service<MockWorkspaces, MockMemberships, MockSettings>,
}

struct FixtureBuilder {
    roles: Vec<WorkspaceRole>,
    feature_enabled: bool,
    package_readable: bool,
    stored: NotificationSettingsMap,
}

impl FixtureBuilder {
    fn new() -> Self {
        Self {
            roles: vec![WorkspaceRole::Collaborator],
            feature_enabled: true,
            package_readable: true,
            stored: NotificationSettingsMap::new(),
        }
    }

    fn build(self) -> Fixture {
        self.build_on(DatabaseConnection::Disconnected)
    }

    fn build_on(self, db: DatabaseConnection) -> Fixture {
        let workspaces = Arc::new(MockWorkspaces {
            workspace: Some(sample_workspace(42)),
            lookups: AtomicUsize::new(0),
            row_locks: Mutex::new(Vec::new()),
        });
        let settings = Arc::new(MockSettings {
            stored: self.stored,
            writes: AtomicUsize::new(0),
        });
        let loader = WorkspaceLoader::new(
            workspaces.clone(),
            Arc::new(FixedPackageAccess(self.package_readable)),
        );
        let resolver = WorkspaceAccessResolver::new(
            Arc::new(MockMemberships(self.roles)),
            Arc::new(FixedFlags(self.feature_enabled)),
        );
        let service = Service::new(
            db,
            loader,
            resolver,
            settings.clone(),
        );
        Fixture {
            workspaces,
            settings,
            service,
        }
    }
}

/// Save path needs a connection that can open transactions; the mocks ignore it otherwise.
async fn sqlite() -> DatabaseConnection {
    Database::connect("sqlite::memory:").await.unwrap()
}

fn sender(id: i64) -> Requester {
    Requester::new(UserId(id)).with_role(FunctionalRole::Sender)
}

fn request(workspace_id: i64, user_id: i64) -> SaveWorkspaceUserSettingsRequest {
    SaveWorkspaceUserSettingsRequest::new(
        WorkspaceId(workspace_id),
        UserId(user_id),
        sender(user_id),
        NotificationSettingsMap::new().with(NotificationEvent::FileUploaded, false),
    )
}

#[tokio::test]
async fn test_unset_workspace_id_fails_before_any_load() {
    let fixture = FixtureBuilder::new().build();

    let result = fixture
        .service
        .save_workspace_user_settings(request(-1, 7))
        .await;

    assert_eq!(result.code(), ResultCode::SystemError);
    assert_eq!(fixture.workspaces.lookups.load(Ordering::SeqCst), 0);
    assert_eq!(fixture.settings.writes.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_unset_user_id_fails_before_any_load() {
    let fixture = FixtureBuilder::new().build();

    let result = fixture
        .service
        .save_workspace_user_settings(request(42, -1))
        .await;

    assert_eq!(result.code(), ResultCode::SystemError);
    assert_eq!(fixture.workspaces.lookups.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_missing_requester_or_settings_is_a_system_error() {
    let fixture = FixtureBuilder::new().build();

    let mut no_requester = request(42, 7);
    no_requester.requester = None;
    let mut no_settings = request(42, 7);
    no_settings.settings = None;

    for request in [no_requester, no_settings] {
        let result = fixture.service.save_workspace_user_settings(request).await;
        assert_eq!(result.code(), ResultCode::SystemError);
    }
    assert_eq!(fixture.workspaces.lookups.load(Ordering::SeqCst), 0);
    assert_eq!(fixture.settings.writes.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_save_locks_the_workspace_row() {
    let fixture = FixtureBuilder::new().build_on(sqlite().await);

    let result = fixture
        .service
        .save_workspace_user_settings(request(42, 7))
        .await;

    assert_eq!(result.code(), ResultCode::Success);
    assert_eq!(fixture.workspaces.row_locks(), vec![true]);
    assert_eq!(
        fixture.settings.writes.load(Ordering::SeqCst),
        NotificationEvent::ALL.len()
    );
}

#[tokio::test]
async fn test_get_reads_without_row_lock() {
    let fixture = FixtureBuilder::new().build();

    fixture
        .service
        .get_workspace_user_settings(&sender(7), WorkspaceId(42), UserId(7))
        .await
        .unwrap();

    assert_eq!(fixture.workspaces.row_locks(), vec![false]);
}

#[tokio::test]
async fn test_save_denial_keeps_privilege_code_and_writes_nothing() {
    let fixture = FixtureBuilder {
        roles: vec![],
        ..FixtureBuilder::new()
    }
    .build_on(sqlite().await);

    let result = fixture
        .service
        .save_workspace_user_settings(request(42, 7))
        .await;

    assert_eq!(result.code(), ResultCode::InsufficientPrivilege);
    assert_eq!(fixture.workspaces.row_locks(), vec![true]);
    assert_eq!(fixture.settings.writes.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_get_overlays_stored_rows_on_defaults() {
    let fixture = FixtureBuilder {
        stored: NotificationSettingsMap::new()
            .with(NotificationEvent::FileUploaded, false)
            .with(NotificationEvent::CommentAdded, true),
        ..FixtureBuilder::new()
    }
    .build();

    let settings = fixture
        .service
        .get_workspace_user_settings(&sender(7), WorkspaceId(42), UserId(7))
        .await
        .unwrap();

    assert_eq!(settings.workspace_id, WorkspaceId(42));
    assert_eq!(settings.settings.len(), NotificationEvent::ALL.len());
    assert_eq!(settings.settings.get(NotificationEvent::FileUploaded), Some(false));
    assert_eq!(settings.settings.get(NotificationEvent::UserSelfRemoved), Some(true));
    assert_eq!(fixture.settings.writes.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_get_denies_non_member() {
    let fixture = FixtureBuilder {
        roles: vec![],
        ..FixtureBuilder::new()
    }
    .build();

    let result = fixture
        .service
        .get_workspace_user_settings(&sender(7), WorkspaceId(42), UserId(7))
        .await;

    let Err(DomainError::InsufficientPrivilege(message)) = result else {
        panic!("expected insufficient privilege");
    };
    assert!(message.contains("not a member"));
    assert!(message.contains("user_id=7"));
}

#[tokio::test]
async fn test_get_lets_root_through_without_membership() {
    let fixture = FixtureBuilder {
        roles: vec![],
        ..FixtureBuilder::new()
    }
    .build();

    let result = fixture
        .service
        .get_workspace_user_settings(&Requester::root(UserId(1)), WorkspaceId(42), UserId(7))
        .await;

    assert!(result.is_ok());
}

#[tokio::test]
async fn test_get_denies_root_while_feature_is_off() {
    let fixture = FixtureBuilder {
        feature_enabled: false,
        ..FixtureBuilder::new()
    }
    .build();

    let result = fixture
        .service
        .get_workspace_user_settings(&Requester::root(UserId(1)), WorkspaceId(42), UserId(7))
        .await;

    assert!(matches!(result, Err(DomainError::InsufficientPrivilege(_))));
}

#[tokio::test]
async fn test_get_reports_missing_workspace() {
    let fixture = FixtureBuilder::new().build();

    let result = fixture
        .service
        .get_workspace_user_settings(&sender(7), WorkspaceId(43), UserId(7))
        .await;

    assert!(matches!(
        result,
        Err(DomainError::WorkspaceNotFound(WorkspaceId(43)))
    ));
}

#[tokio::test]
async fn test_get_respects_package_access() {
    let fixture = FixtureBuilder {
        package_readable: false,
        ..FixtureBuilder::new()
    }
    .build();

    let result = fixture
        .service
        .get_workspace_user_settings(&Requester::root(UserId(1)), WorkspaceId(42), UserId(7))
        .await;

    assert!(matches!(result, Err(DomainError::InsufficientPrivilege(_))));
}

#[tokio::test]
#[traced_test]
async fn test_validation_failure_is_logged_as_error() {
    let fixture = FixtureBuilder::new().build();

    let _ = fixture
        .service
        .save_workspace_user_settings(request(-1, 7))
        .await;

    assert!(logs_contain("ERROR"));
    assert!(logs_contain("Rejected workspace settings request"));
    assert!(logs_contain("workspace_id"));
}

#[tokio::test]
#[traced_test]
async fn test_denial_and_root_override_are_logged() {
    let fixture = FixtureBuilder {
        roles: vec![],
        ..FixtureBuilder::new()
    }
    .build();

    let _ = fixture
        .service
        .get_workspace_user_settings(&sender(7), WorkspaceId(42), UserId(7))
        .await;
    assert!(logs_contain("Workspace access denied"));

    let _ = fixture
        .service
        .get_workspace_user_settings(&Requester::root(UserId(1)), WorkspaceId(42), UserId(7))
        .await;
    assert!(logs_contain("Root requester overrides workspace access denial"));
}

#[tokio::test]
#[traced_test]
async fn test_package_access_denial_is_logged_at_info() {
    let fixture = FixtureBuilder {
        package_readable: false,
        ..FixtureBuilder::new()
    }
    .build();

    let _ = fixture
        .service
        .get_workspace_user_settings(&sender(7), WorkspaceId(42), UserId(7))
        .await;

    assert!(logs_contain("INFO"));
    assert!(logs_contain("Workspace package access denied"));
}
