use crate::controller::ApiResponse;
use crate::extractors::{acting_staff::ActingStaff, compare_api_version::CompareApiVersion};
use crate::params::transfer::{TransferParams, TransferResponse};
use crate::{AppState, Error};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use domain::{transfer as TransferApi, Id};
use service::config::ApiVersion;

use log::*;

/// POST transfer an active Enrollment to another Offering of the same term
#[utoipa::path(
    post,
    path = "/enrollments/{id}/transfer",
    params(
        ApiVersion,
        ("id" = Uuid, Path, description = "Id of the enrollment to transfer"),
        ("x-staff-id" = Uuid, Header, description = "Id of the acting staff member")
    ),
    request_body = TransferParams,
    responses(
        (status = 200, description = "Successfully transferred the Enrollment", body = TransferResponse),
        (status = 400, description = "Enrollment not active, cross-term target, already enrolled or foreign skip session"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Enrollment or target offering not found"),
        (status = 500, description = "Transfer failed and was rolled back")
    )
)]
pub async fn transfer(
    CompareApiVersion(_v): CompareApiVersion,
    ActingStaff(staff_id): ActingStaff,
    State(app_state): State<AppState>,
    Path(id): Path<Id>,
    Json(params): Json<TransferParams>,
) -> Result<impl IntoResponse, Error> {
    debug!("POST Transfer Enrollment {id} with: {params:?}");

    let outcome =
        TransferApi::transfer_enrollment(app_state.db_conn_ref(), params.into_request(id, staff_id))
            .await?;

    Ok(Json(ApiResponse::new(
        StatusCode::OK.into(),
        TransferResponse::from(outcome),
    )))
}
