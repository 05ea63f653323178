use sea_orm::entity::prelude::*;
use time::{Date, OffsetDateTime};

/// Package row backing a workspace. Only rows with `is_workspace` set are workspaces.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "workspaces")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub package_id: i64,
    pub name: String,
    pub description: Option<String>,
    pub label: Option<String>,
    pub hide_workspace_activity: bool,
    pub status: String,
    pub latest_version: i32,
    pub latest_published_version: i32,
    pub created_by: i64,
    pub auto_del_date: Option<Date>,
    pub auto_del_reminder_date: Option<Date>,
    pub auto_del_reminder_sent_date: Option<Date>,
    pub date_created: OffsetDateTime,
    pub last_updated_by: Option<i64>,
    pub date_last_updated: Option<OffsetDateTime>,
    pub last_activity_date: Option<OffsetDateTime>,
    pub valid_po_count: i32,
    pub is_workspace: bool,
    pub is_locked: bool,
    pub locked_by: Option<i64>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::member::Entity")]
    Members,
    #[sea_orm(has_many = "super::user_setting::Entity")]
    UserSettings,
}

impl ActiveModelBehavior for ActiveModel {}

impl Related<super::member::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Members.def()
    }
}

impl Related<super::user_setting::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::UserSettings.def()
    }
}
