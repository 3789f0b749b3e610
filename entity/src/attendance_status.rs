use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

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
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "attendance_status")]
pub enum AttendanceStatus {
    #[sea_orm(string_value = "present")]
    #[default]
    Present,
    #[sea_orm(string_value = "absent")]
    Absent,
    #[sea_orm(string_value = "excused")]
    Excused,
}

impl std::fmt::Display for AttendanceStatus {
    fn fmt(&self, fmt: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AttendanceStatus::Present => write!(fmt, "present"),
            AttendanceStatus::Absent => write!(fmt, "absent"),
            AttendanceStatus::Excused => write!(fmt, "excused"),
        }
    }
}
