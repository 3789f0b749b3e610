//! `SeaORM` Entity for enrollment_skips: a declared non-attendance for one
//! (enrollment, class session) pair. Never coexists with an attendance row for
//! the same pair.

use crate::Id;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize, ToSchema)]
#[schema(as = entity::enrollment_skips::Model)]
#[sea_orm(schema_name = "swim_school", table_name = "enrollment_skips")]
pub struct Model {
    #[serde(skip_deserializing)]
    #[sea_orm(primary_key)]
    pub id: Id,
    #[schema(value_type = Uuid)]
    pub enrollment_id: Id,
    #[schema(value_type = Uuid)]
    pub class_session_id: Id,
    pub reason: Option<String>,
    #[serde(skip_deserializing)]
    #[schema(value_type = Option<Uuid>)]
    pub created_by: Option<Id>,
    #[serde(skip_deserializing)]
    #[schema(value_type = String, format = DateTime)]
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::enrollments::Entity",
        from = "Column::EnrollmentId",
        to = "super::enrollments::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Enrollments,
    #[sea_orm(
        belongs_to = "super::class_sessions::Entity",
        from = "Column::ClassSessionId",
        to = "super::class_sessions::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    ClassSessions,
}

impl Related<super::enrollments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Enrollments.def()
    }
}

impl Related<super::class_sessions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ClassSessions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
