//! `SeaORM` Entity for offerings: a recurring weekly class slot within a term.

use crate::Id;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize, ToSchema)]
#[schema(as = entity::offerings::Model)]
#[sea_orm(schema_name = "swim_school", table_name = "offerings")]
pub struct Model {
    #[serde(skip_deserializing)]
    #[sea_orm(primary_key)]
    pub id: Id,
    #[schema(value_type = Uuid)]
    pub term_id: Id,
    /// Physical pool the class runs at. Locations are managed elsewhere.
    #[schema(value_type = Option<Uuid>)]
    pub location_id: Option<Id>,
    pub title: String,
    /// Day of week, 0 = Sunday through 6 = Saturday
    pub weekday: i16,
    #[schema(value_type = String, format = "time", example = "09:00:00")]
    pub start_time: Time,
    pub duration_minutes: i32,
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
        belongs_to = "super::terms::Entity",
        from = "Column::TermId",
        to = "super::terms::Column::Id",
        on_update = "NoAction",
        on_delete = "Restrict"
    )]
    Terms,
}

impl Related<super::terms::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Terms.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
