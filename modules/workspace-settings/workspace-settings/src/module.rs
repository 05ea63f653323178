use std::sync::Arc;

use sea_orm::DatabaseConnection;
use sea_orm_migration::MigratorTrait;
use tracing::info;
use workspace_settings_sdk::WorkspaceSettingsApi;

use crate::config::WorkspaceSettingsConfig;
use crate::domain::access::WorkspaceAccessResolver;
use crate::domain::loader::WorkspaceLoader;
use crate::domain::ports::PackageAccessCheck;
use crate::domain::service::Service;
use crate::infra::feature_flags::ConfigFeatureFlags;
use crate::infra::package_access::OpenPackageAccess;
use crate::infra::storage::migrations::Migrator;
use crate::infra::storage::{
    OrmMembershipRepository, OrmNotificationSettingsRepository, OrmWorkspaceRepository,
};
use crate::local_client::LocalClient;

/// The service as wired against the `SeaORM` repositories.
pub type ConcreteService =
    Service<OrmWorkspaceRepository, OrmMembershipRepository, OrmNotificationSettingsRepository>;

/// Workspace settings module: owns the service and the runtime feature flags.
pub struct WorkspaceSettingsModule {
    service: Arc<ConcreteService>,
    feature_flags: Arc<ConfigFeatureFlags>,
}

impl WorkspaceSettingsModule {
    /// Wire the module on `db` without package-level authorization.
    #[must_use]
    pub fn new(db: DatabaseConnection, config: &WorkspaceSettingsConfig) -> Self {
        Self::with_package_access(db, config, Arc::new(OpenPackageAccess))
    }

    #[must_use]
    pub fn with_package_access(
        db: DatabaseConnection,
        config: &WorkspaceSettingsConfig,
        package_access: Arc<dyn PackageAccessCheck>,
    ) -> Self {
        let feature_flags = Arc::new(ConfigFeatureFlags::from_config(config));

        let loader = WorkspaceLoader::new(Arc::new(OrmWorkspaceRepository::new()), package_access);
        let resolver = WorkspaceAccessResolver::new(
            Arc::new(OrmMembershipRepository::new()),
            feature_flags.clone(),
        );
        let service = Service::new(
            db,
            loader,
            resolver,
            Arc::new(OrmNotificationSettingsRepository::new()),
        );

        Self {
            service: Arc::new(service),
            feature_flags,
        }
    }

    /// Run migrations, then wire the module.
    ///
    /// # Errors
    /// Returns an error if a migration fails.
    pub async fn init(
        db: DatabaseConnection,
        config: &WorkspaceSettingsConfig,
    ) -> anyhow::Result<Self> {
        info!("Initializing workspace settings module");
        Self::migrate(&db).await?;
        let module = Self::new(db, config);
        info!(
            workspace_enabled = config.workspace_enabled,
            "Workspace settings module initialized"
        );
        Ok(module)
    }

    /// # Errors
    /// Returns an error if a migration fails.
    pub async fn migrate(db: &DatabaseConnection) -> anyhow::Result<()> {
        info!("Running workspace settings database migrations");
        Migrator::up(db, None).await?;
        info!("Workspace settings database migrations completed successfully");
        Ok(())
    }

    #[must_use]
    pub fn client(&self) -> Arc<dyn WorkspaceSettingsApi> {
        Arc::new(LocalClient::new(self.service.clone()))
    }

    #[must_use]
    pub fn service(&self) -> Arc<ConcreteService> {
        self.service.clone()
    }

    #[must_use]
    pub fn feature_flags(&self) -> Arc<ConfigFeatureFlags> {
        self.feature_flags.clone()
    }
}
