use domain::attendance_status::AttendanceStatus;
use domain::Id;
use serde::Deserialize;
use utoipa::ToSchema;

#[derive(Debug, Deserialize, ToSchema)]
pub(crate) struct MarkParams {
    #[schema(value_type = Uuid)]
    pub(crate) enrollment_id: Id,
    #[schema(value_type = Uuid)]
    pub(crate) class_session_id: Id,
    pub(crate) status: AttendanceStatus,
    pub(crate) notes: Option<String>,
}
