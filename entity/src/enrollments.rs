//! `SeaORM` Entity for enrollments: a student's binding to one offering.
//!
//! `transferred_from_id` and `transferred_to_id` link exactly two enrollments
//! when a student moves between offerings of the same term.

use crate::enrollment_status::EnrollmentStatus;
use crate::Id;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize, ToSchema)]
#[schema(as = entity::enrollments::Model)]
#[sea_orm(schema_name = "swim_school", table_name = "enrollments")]
pub struct Model {
    #[serde(skip_deserializing)]
    #[sea_orm(primary_key)]
    pub id: Id,
    #[schema(value_type = Uuid)]
    pub student_id: Id,
    #[schema(value_type = Uuid)]
    pub offering_id: Id,
    #[serde(default)]
    pub status: EnrollmentStatus,
    #[schema(value_type = String, format = Date)]
    pub enroll_date: Date,
    /// Billing/staffing category label, e.g. "1:4"
    pub class_ratio: Option<String>,
    #[serde(skip_deserializing)]
    #[schema(value_type = Option<Uuid>)]
    pub transferred_from_id: Option<Id>,
    #[serde(skip_deserializing)]
    #[schema(value_type = Option<Uuid>)]
    pub transferred_to_id: Option<Id>,
    #[serde(skip_deserializing)]
    #[schema(value_type = Option<String>, format = DateTime)]
    pub transferred_at: Option<DateTimeWithTimeZone>,
    #[serde(skip_deserializing)]
    pub transfer_notes: Option<String>,
    pub remarks: Option<String>,
    #[serde(skip_deserializing)]
    #[schema(value_type = Option<Uuid>)]
    pub created_by: Option<Id>,
    #[serde(skip_deserializing)]
    #[schema(value_type = String, format = DateTime)]
    pub created_at: DateTimeWithTimeZone,
    #[serde(skip_deserializing)]
    #[schema(value_type = String, format = DateTime)]
    pub updated_at: DateTimeWithTimeZone,
}

impl Model {
    pub fn is_active(&self) -> bool {
        self.status == EnrollmentStatus::Active
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::offerings::Entity",
        from = "Column::OfferingId",
        to = "super::offerings::Column::Id",
        on_update = "NoAction",
        on_delete = "Restrict"
    )]
    Offerings,
    #[sea_orm(
        belongs_to = "super::students::Entity",
        from = "Column::StudentId",
        to = "super::students::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Students,
}

impl Related<super::offerings::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Offerings.def()
    }
}

impl Related<super::students::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Students.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
