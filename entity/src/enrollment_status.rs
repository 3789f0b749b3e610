use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Where an enrollment stands in its lifecycle.
#[derive(
    Debug,
    Clone,
    Copy,
    Eq,
    PartialEq,
    EnumIter,
    Deserialize,
    Default,
    Serialize,
    DeriveActiveEnum,
    ToSchema,
)]
#[serde(rename_all = "lowercase")]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "enrollment_status")]
pub enum EnrollmentStatus {
    #[sea_orm(string_value = "active")]
    #[default]
    Active,
    /// Superseded by a newer enrollment via a transfer. Never reactivated.
    #[sea_orm(string_value = "transferred")]
    Transferred,
    #[sea_orm(string_value = "dropped")]
    Dropped,
    #[sea_orm(string_value = "waitlisted")]
    Waitlisted,
}

impl std::fmt::Display for EnrollmentStatus {
    fn fmt(&self, fmt: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EnrollmentStatus::Active => write!(fmt, "active"),
            EnrollmentStatus::Transferred => write!(fmt, "transferred"),
            EnrollmentStatus::Dropped => write!(fmt, "dropped"),
            EnrollmentStatus::Waitlisted => write!(fmt, "waitlisted"),
        }
    }
}
