use crate::controller::ApiResponse;
use crate::extractors::compare_api_version::CompareApiVersion;
use crate::{AppState, Error};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use domain::{class_session as ClassSessionApi, class_sessions, Id};
use service::config::ApiVersion;

use log::*;

/// GET the class sessions of an Offering in date order
#[utoipa::path(
    get,
    path = "/offerings/{id}/class_sessions",
    params(
        ApiVersion,
        ("id" = Uuid, Path, description = "Offering id")
    ),
    responses(
        (status = 200, description = "Successfully retrieved Class Sessions", body = [class_sessions::Model]),
        (status = 404, description = "Offering not found")
    )
)]
pub async fn class_sessions(
    CompareApiVersion(_v): CompareApiVersion,
    State(app_state): State<AppState>,
    Path(id): Path<Id>,
) -> Result<impl IntoResponse, Error> {
    debug!("GET Class Sessions of Offering {id}");

    let class_sessions = ClassSessionApi::find_by_offering(app_state.db_conn_ref(), id).await?;

    Ok(Json(ApiResponse::new(StatusCode::OK.into(), class_sessions)))
}
