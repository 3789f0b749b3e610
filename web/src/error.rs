use std::error::Error as StdError;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use domain::error::{
    DomainErrorKind, EntityErrorKind, Error as DomainError, InternalErrorKind, RuleViolation,
};

use log::*;

pub type Result<T> = core::result::Result<T, Error>;

#[derive(Debug)]
pub struct Error(DomainError);

impl StdError for Error {}

impl std::fmt::Display for Error {
    fn fmt(&self, fmt: &mut std::fmt::Formatter) -> core::result::Result<(), std::fmt::Error> {
        write!(fmt, "{self:?}")
    }
}

// List of possible StatusCode variants https://docs.rs/http/latest/http/status/struct.StatusCode.html#associatedconstant.UNPROCESSABLE_ENTITY
impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self.0.error_kind {
            DomainErrorKind::Internal(internal_error_kind) => match internal_error_kind {
                InternalErrorKind::Entity(entity_error_kind) => match entity_error_kind {
                    EntityErrorKind::NotFound => {
                        (StatusCode::NOT_FOUND, "NOT FOUND").into_response()
                    }
                    EntityErrorKind::Invalid => {
                        (StatusCode::UNPROCESSABLE_ENTITY, "UNPROCESSABLE ENTITY").into_response()
                    }
                    EntityErrorKind::Conflict => {
                        (StatusCode::BAD_REQUEST, "CONFLICTING RECORD").into_response()
                    }
                    EntityErrorKind::DbTransaction | EntityErrorKind::Other(_) => {
                        error!("Responding with internal server error, source: {:?}", self.0.source);
                        (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL SERVER ERROR").into_response()
                    }
                },
                InternalErrorKind::Config | InternalErrorKind::Other(_) => {
                    (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL SERVER ERROR").into_response()
                }
            },
            DomainErrorKind::Rule(rule_violation) => match rule_violation {
                RuleViolation::InvalidState(reason) | RuleViolation::Conflict(reason) => {
                    (StatusCode::BAD_REQUEST, reason).into_response()
                }
            },
        }
    }
}

impl<E> From<E> for Error
where
    E: Into<DomainError>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_of(err: DomainError) -> StatusCode {
        Error::from(err).into_response().status()
    }

    #[test]
    fn not_found_maps_to_404() {
        assert_eq!(status_of(DomainError::not_found("Enrollment")), StatusCode::NOT_FOUND);
    }

    #[test]
    fn rule_violations_map_to_400() {
        assert_eq!(
            status_of(DomainError::invalid_state("Cross-term transfer is forbidden")),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(DomainError::conflict("already enrolled")),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn persistence_failure_maps_to_500() {
        assert_eq!(
            status_of(DomainError::persistence("connection reset")),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
