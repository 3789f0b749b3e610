//! `SeaORM` Entity for class_sessions: one concrete meeting of an offering.
//! Sessions of an offering are always consumed ordered by date ascending.

use crate::Id;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize, ToSchema)]
#[schema(as = entity::class_sessions::Model)]
#[sea_orm(schema_name = "swim_school", table_name = "class_sessions")]
pub struct Model {
    #[serde(skip_deserializing)]
    #[sea_orm(primary_key)]
    pub id: Id,
    #[schema(value_type = Uuid)]
    pub offering_id: Id,
    #[schema(value_type = String, format = Date)]
    pub date: Date,
    #[serde(skip_deserializing)]
    #[schema(value_type = String, format = DateTime)]
    pub created_at: DateTimeWithTimeZone,
    #[serde(skip_deserializing)]
    #[schema(value_type = String, format = DateTime)]
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::offerings::Entity",
        from = "Column::OfferingId",
        to = "super::offerings::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Offerings,
}

impl Related<super::offerings::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Offerings.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
