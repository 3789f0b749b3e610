use crate::extractors::RejectionType;
use axum::extract::FromRequestParts;
use axum::http::{request::Parts, StatusCode};
use domain::Id;
use service::config::staff_id_header;

/// The staff member acting on a request, as identified by the authenticating
/// gateway through the `x-staff-id` header.
pub(crate) struct ActingStaff(pub Id);

impl<S> FromRequestParts<S> for ActingStaff
where
    S: Send + Sync,
{
    type Rejection = RejectionType;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .headers
            .get(staff_id_header())
            .and_then(|value| value.to_str().ok())
            .and_then(|value| Id::parse_str(value).ok())
            .map(ActingStaff)
            .ok_or_else(|| (StatusCode::UNAUTHORIZED, "Unauthorized".to_string()))
    }
}
