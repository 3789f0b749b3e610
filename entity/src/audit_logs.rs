//! `SeaORM` Entity for audit_logs: an append-only record of what changed, by
//! whom and why. Rows are never updated or deleted.

use crate::Id;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize, ToSchema)]
#[schema(as = entity::audit_logs::Model)]
#[sea_orm(schema_name = "swim_school", table_name = "audit_logs")]
pub struct Model {
    #[serde(skip_deserializing)]
    #[sea_orm(primary_key)]
    pub id: Id,
    #[schema(value_type = Uuid)]
    pub staff_id: Id,
    /// Dotted action name, e.g. `enrollment.transfer`
    pub action: String,
    pub entity_type: String,
    #[schema(value_type = Uuid)]
    pub entity_id: Id,
    /// Field level before/after values
    #[sea_orm(column_type = "JsonBinary")]
    #[schema(value_type = Object)]
    pub changes: Json,
    #[sea_orm(column_type = "JsonBinary")]
    #[schema(value_type = Object)]
    pub metadata: Json,
    #[serde(skip_deserializing)]
    #[schema(value_type = String, format = DateTime)]
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::staff_users::Entity",
        from = "Column::StaffId",
        to = "super::staff_users::Column::Id",
        on_update = "NoAction",
        on_delete = "Restrict"
    )]
    StaffUsers,
}

impl Related<super::staff_users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::StaffUsers.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
