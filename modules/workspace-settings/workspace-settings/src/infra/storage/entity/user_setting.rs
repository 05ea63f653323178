use sea_orm::entity::prelude::*;

/// One notification switch of one user in one workspace.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "workspace_user_settings")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub package_id: i64,
    #[sea_orm(primary_key, auto_increment = false)]
    pub user_id: i64,
    /// Wire name of the notification event, e.g. `FILE_UPLOADED`.
    #[sea_orm(primary_key, auto_increment = false)]
    pub notification_type: String,
    pub enabled: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::workspace::Entity",
        from = "Column::PackageId",
        to = "super::workspace::Column::PackageId",
        on_delete = "Cascade"
    )]
    Workspace,
}

impl ActiveModelBehavior for ActiveModel {}

impl Related<super::workspace::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Workspace.def()
    }
}
