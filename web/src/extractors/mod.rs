pub(crate) mod acting_staff;
pub(crate) mod compare_api_version;

use axum::http::StatusCode;

type RejectionType = (StatusCode, String);
