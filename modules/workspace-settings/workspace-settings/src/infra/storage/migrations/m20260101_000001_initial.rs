use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Workspaces::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Workspaces::PackageId)
                            .big_integer()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Workspaces::Name).string().not_null())
                    .col(ColumnDef::new(Workspaces::Description).string())
                    .col(ColumnDef::new(Workspaces::Label).string())
                    .col(
                        ColumnDef::new(Workspaces::HideWorkspaceActivity)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Workspaces::Status).string().not_null())
                    .col(
                        ColumnDef::new(Workspaces::LatestVersion)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Workspaces::LatestPublishedVersion)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(Workspaces::CreatedBy).big_integer().not_null())
                    .col(ColumnDef::new(Workspaces::AutoDelDate).date())
                    .col(ColumnDef::new(Workspaces::AutoDelReminderDate).date())
                    .col(ColumnDef::new(Workspaces::AutoDelReminderSentDate).date())
                    .col(
                        ColumnDef::new(Workspaces::DateCreated)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Workspaces::LastUpdatedBy).big_integer())
                    .col(ColumnDef::new(Workspaces::DateLastUpdated).timestamp_with_time_zone())
                    .col(ColumnDef::new(Workspaces::LastActivityDate).timestamp_with_time_zone())
                    .col(
                        ColumnDef::new(Workspaces::ValidPoCount)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Workspaces::IsWorkspace)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(Workspaces::IsLocked)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Workspaces::LockedBy).big_integer())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(WorkspaceMembers::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(WorkspaceMembers::PackageId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(WorkspaceMembers::UserId).big_integer().not_null())
                    .col(ColumnDef::new(WorkspaceMembers::Role).string_len(32).not_null())
                    .primary_key(
                        Index::create()
                            .col(WorkspaceMembers::PackageId)
                            .col(WorkspaceMembers::UserId)
                            .col(WorkspaceMembers::Role),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_workspace_members_workspace")
                            .from(WorkspaceMembers::Table, WorkspaceMembers::PackageId)
                            .to(Workspaces::Table, Workspaces::PackageId)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(WorkspaceUserSettings::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(WorkspaceUserSettings::PackageId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(WorkspaceUserSettings::UserId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(WorkspaceUserSettings::NotificationType)
                            .string_len(64)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(WorkspaceUserSettings::Enabled)
                            .boolean()
                            .not_null(),
                    )
                    .primary_key(
                        Index::create()
                            .col(WorkspaceUserSettings::PackageId)
                            .col(WorkspaceUserSettings::UserId)
                            .col(WorkspaceUserSettings::NotificationType),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_workspace_user_settings_workspace")
                            .from(WorkspaceUserSettings::Table, WorkspaceUserSettings::PackageId)
                            .to(Workspaces::Table, Workspaces::PackageId)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(WorkspaceUserSettings::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(WorkspaceMembers::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Workspaces::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Workspaces {
    Table,
    PackageId,
    Name,
    Description,
    Label,
    HideWorkspaceActivity,
    Status,
    LatestVersion,
    LatestPublishedVersion,
    CreatedBy,
    AutoDelDate,
    AutoDelReminderDate,
    AutoDelReminderSentDate,
    DateCreated,
    LastUpdatedBy,
    DateLastUpdated,
    LastActivityDate,
    ValidPoCount,
    IsWorkspace,
    IsLocked,
    LockedBy,
}

#[derive(DeriveIden)]
enum WorkspaceMembers {
    Table,
    PackageId,
    UserId,
    Role,
}

#[derive(DeriveIden)]
enum WorkspaceUserSettings {
    Table,
    PackageId,
    UserId,
    NotificationType,
    Enabled,
}
