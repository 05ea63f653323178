//! Infrastructure storage layer: `SeaORM` entities, repositories and migrations.
//!
//! Every repository method takes the runner to execute on, so the service
//! decides whether a statement runs inside the locked unit of work or on
//! the plain connection.

pub mod entity;
pub mod mapper;
pub mod migrations;

mod membership_repo;
mod settings_repo;
mod workspace_repo;


pub use membership_repo::OrmMembershipRepository;
pub use settings_repo::OrmNotificationSettingsRepository;
pub use workspace_repo::OrmWorkspaceRepository;
