use crate::controller::ApiResponse;
use crate::extractors::{acting_staff::ActingStaff, compare_api_version::CompareApiVersion};
use crate::params::enrollment::{CreateParams, IndexParams, UpdateRemarksParams};
use crate::{AppState, Error};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use domain::{
    attendance as AttendanceApi, enrollment as EnrollmentApi,
    enrollment_skip as EnrollmentSkipApi, Id,
};
use domain::{attendances, enrollment_skips, enrollments};
use service::config::ApiVersion;

use log::*;

/// POST create a new Enrollment with optional pre-declared skips
#[utoipa::path(
    post,
    path = "/enrollments",
    params(
        ApiVersion,
        ("x-staff-id" = Uuid, Header, description = "Id of the acting staff member")
    ),
    request_body = CreateParams,
    responses(
        (status = 201, description = "Successfully Created a New Enrollment", body = enrollments::Model),
        (status = 400, description = "Already enrolled or skip session not in the offering"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Offering or staff user not found")
    )
)]
pub async fn create(
    CompareApiVersion(_v): CompareApiVersion,
    ActingStaff(staff_id): ActingStaff,
    State(app_state): State<AppState>,
    Json(params): Json<CreateParams>,
) -> Result<impl IntoResponse, Error> {
    debug!("POST Create a New Enrollment from: {params:?}");

    let (enrollment_model, skipped_session_ids) = params.into_model();
    let enrollment = EnrollmentApi::enroll_with_skips(
        app_state.db_conn_ref(),
        enrollment_model,
        skipped_session_ids,
        staff_id,
    )
    .await?;

    debug!("New Enrollment: {enrollment:?}");

    Ok(Json(ApiResponse::new(
        StatusCode::CREATED.into(),
        enrollment,
    )))
}

/// GET all Enrollments matching the given filters
#[utoipa::path(
    get,
    path = "/enrollments",
    params(ApiVersion, IndexParams),
    responses(
        (status = 200, description = "Successfully retrieved Enrollments", body = [enrollments::Model]),
        (status = 400, description = "Bad request")
    )
)]
pub async fn index(
    CompareApiVersion(_v): CompareApiVersion,
    State(app_state): State<AppState>,
    Query(params): Query<IndexParams>,
) -> Result<impl IntoResponse, Error> {
    debug!("GET all Enrollments with: {params:?}");

    let enrollments = EnrollmentApi::find_by(app_state.db_conn_ref(), params).await?;

    Ok(Json(ApiResponse::new(StatusCode::OK.into(), enrollments)))
}

/// GET a particular Enrollment specified by its id.
#[utoipa::path(
    get,
    path = "/enrollments/{id}",
    params(
        ApiVersion,
        ("id" = Uuid, Path, description = "Enrollment id to retrieve")
    ),
    responses(
        (status = 200, description = "Successfully retrieved a specific Enrollment by its id", body = enrollments::Model),
        (status = 404, description = "Enrollment not found")
    )
)]
pub async fn read(
    CompareApiVersion(_v): CompareApiVersion,
    State(app_state): State<AppState>,
    Path(id): Path<Id>,
) -> Result<impl IntoResponse, Error> {
    debug!("GET Enrollment by id: {id}");

    let enrollment = EnrollmentApi::find_by_id(app_state.db_conn_ref(), id).await?;

    Ok(Json(ApiResponse::new(StatusCode::OK.into(), enrollment)))
}

/// PUT the free-text remarks of an Enrollment
#[utoipa::path(
    put,
    path = "/enrollments/{id}/remarks",
    params(
        ApiVersion,
        ("id" = Uuid, Path, description = "Id of enrollment to update"),
        ("x-staff-id" = Uuid, Header, description = "Id of the acting staff member")
    ),
    request_body = UpdateRemarksParams,
    responses(
        (status = 200, description = "Successfully Updated Enrollment remarks", body = enrollments::Model),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Enrollment or staff user not found")
    )
)]
pub async fn update_remarks(
    CompareApiVersion(_v): CompareApiVersion,
    ActingStaff(staff_id): ActingStaff,
    State(app_state): State<AppState>,
    Path(id): Path<Id>,
    Json(params): Json<UpdateRemarksParams>,
) -> Result<impl IntoResponse, Error> {
    debug!("PUT Update remarks of Enrollment {id}");

    let enrollment =
        EnrollmentApi::update_remarks(app_state.db_conn_ref(), id, params.remarks, staff_id)
            .await?;

    Ok(Json(ApiResponse::new(StatusCode::OK.into(), enrollment)))
}

/// GET every Enrollment linked to this one by transfers, oldest first
#[utoipa::path(
    get,
    path = "/enrollments/{id}/transfer_chain",
    params(
        ApiVersion,
        ("id" = Uuid, Path, description = "Id of any enrollment in the chain")
    ),
    responses(
        (status = 200, description = "Successfully retrieved the transfer chain", body = [enrollments::Model]),
        (status = 404, description = "Enrollment not found")
    )
)]
pub async fn transfer_chain(
    CompareApiVersion(_v): CompareApiVersion,
    State(app_state): State<AppState>,
    Path(id): Path<Id>,
) -> Result<impl IntoResponse, Error> {
    debug!("GET transfer chain of Enrollment {id}");

    let chain = EnrollmentApi::find_transfer_chain(app_state.db_conn_ref(), id).await?;

    Ok(Json(ApiResponse::new(StatusCode::OK.into(), chain)))
}

/// GET all Attendance recorded for an Enrollment
#[utoipa::path(
    get,
    path = "/enrollments/{id}/attendance",
    params(
        ApiVersion,
        ("id" = Uuid, Path, description = "Enrollment id")
    ),
    responses(
        (status = 200, description = "Successfully retrieved Attendance", body = [attendances::Model]),
        (status = 404, description = "Enrollment not found")
    )
)]
pub async fn attendance(
    CompareApiVersion(_v): CompareApiVersion,
    State(app_state): State<AppState>,
    Path(id): Path<Id>,
) -> Result<impl IntoResponse, Error> {
    debug!("GET Attendance of Enrollment {id}");

    let attendance = AttendanceApi::find_by_enrollment(app_state.db_conn_ref(), id).await?;

    Ok(Json(ApiResponse::new(StatusCode::OK.into(), attendance)))
}

/// GET all Skips declared for an Enrollment
#[utoipa::path(
    get,
    path = "/enrollments/{id}/skips",
    params(
        ApiVersion,
        ("id" = Uuid, Path, description = "Enrollment id")
    ),
    responses(
        (status = 200, description = "Successfully retrieved Skips", body = [enrollment_skips::Model]),
        (status = 404, description = "Enrollment not found")
    )
)]
pub async fn skips(
    CompareApiVersion(_v): CompareApiVersion,
    State(app_state): State<AppState>,
    Path(id): Path<Id>,
) -> Result<impl IntoResponse, Error> {
    debug!("GET Skips of Enrollment {id}");

    let skips = EnrollmentSkipApi::find_by_enrollment(app_state.db_conn_ref(), id).await?;

    Ok(Json(ApiResponse::new(StatusCode::OK.into(), skips)))
}
