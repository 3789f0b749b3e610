use crate::controller::ApiResponse;
use crate::extractors::compare_api_version::CompareApiVersion;
use crate::params::audit_log::IndexParams;
use crate::{AppState, Error};
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use domain::{audit_log as AuditLogApi, audit_logs};
use service::config::ApiVersion;

use log::*;

/// GET the audit history of one entity, newest first
#[utoipa::path(
    get,
    path = "/audit_logs",
    params(ApiVersion, IndexParams),
    responses(
        (status = 200, description = "Successfully retrieved Audit Logs", body = [audit_logs::Model]),
        (status = 400, description = "Bad request")
    )
)]
pub async fn index(
    CompareApiVersion(_v): CompareApiVersion,
    State(app_state): State<AppState>,
    Query(params): Query<IndexParams>,
) -> Result<impl IntoResponse, Error> {
    debug!("GET Audit Logs with: {params:?}");

    let audit_logs = AuditLogApi::find_by_entity(
        app_state.db_conn_ref(),
        &params.entity_type,
        params.entity_id,
    )
    .await?;

    Ok(Json(ApiResponse::new(StatusCode::OK.into(), audit_logs)))
}
