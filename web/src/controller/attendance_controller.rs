use crate::controller::ApiResponse;
use crate::extractors::{acting_staff::ActingStaff, compare_api_version::CompareApiVersion};
use crate::params::attendance::MarkParams;
use crate::{AppState, Error};
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use domain::{attendance as AttendanceApi, attendances};
use service::config::ApiVersion;

use log::*;

/// PUT mark attendance for one class session of an active Enrollment
#[utoipa::path(
    put,
    path = "/attendance",
    params(
        ApiVersion,
        ("x-staff-id" = Uuid, Header, description = "Id of the acting staff member")
    ),
    request_body = MarkParams,
    responses(
        (status = 200, description = "Successfully marked Attendance", body = attendances::Model),
        (status = 400, description = "Enrollment not active or session of another offering"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Enrollment or class session not found")
    )
)]
pub async fn mark(
    CompareApiVersion(_v): CompareApiVersion,
    ActingStaff(staff_id): ActingStaff,
    State(app_state): State<AppState>,
    Json(params): Json<MarkParams>,
) -> Result<impl IntoResponse, Error> {
    debug!("PUT Mark Attendance with: {params:?}");

    let attendance = AttendanceApi::mark(
        app_state.db_conn_ref(),
        params.enrollment_id,
        params.class_session_id,
        params.status,
        params.notes,
        staff_id,
    )
    .await?;

    Ok(Json(ApiResponse::new(StatusCode::OK.into(), attendance)))
}
