use crate::extractors::RejectionType;
use crate::AppState;
use axum::extract::{FromRef, FromRequestParts};
use axum::http::{request::Parts, StatusCode};
use log::*;
use semver::Version;
use service::config::ApiVersion;

/// Rejects requests whose `x-version` header does not name the API version this
/// server is configured to expose.
pub(crate) struct CompareApiVersion(pub Version);

impl<S> FromRequestParts<S> for CompareApiVersion
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = RejectionType;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);

        let header = parts
            .headers
            .get(ApiVersion::field_name())
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| {
                (
                    StatusCode::BAD_REQUEST,
                    format!("Missing {} header", ApiVersion::field_name()),
                )
            })?;

        let version = Version::parse(header).map_err(|_| {
            (
                StatusCode::BAD_REQUEST,
                format!("Invalid {} header: {header}", ApiVersion::field_name()),
            )
        })?;

        if version.to_string() != app_state.config.api_version() {
            warn!(
                "Rejecting request for API version {version}, serving {}",
                app_state.config.api_version()
            );
            return Err((
                StatusCode::BAD_REQUEST,
                format!(
                    "API version {version} is not supported, expected {}",
                    app_state.config.api_version()
                ),
            ));
        }

        Ok(CompareApiVersion(version))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use axum::routing::get;
    use axum::Router;
    use sea_orm::DatabaseConnection;
    use service::config::Config;
    use std::sync::Arc;
    use tower::ServiceExt;

    async fn versioned(CompareApiVersion(version): CompareApiVersion) -> String {
        version.to_string()
    }

    fn app() -> Router {
        let config = Config::from_env();
        let db = Arc::new(DatabaseConnection::Disconnected);
        Router::new()
            .route("/versioned", get(versioned))
            .with_state(AppState::new(config, &db))
    }

    #[tokio::test]
    async fn accepts_the_configured_version() {
        let request = Request::builder()
            .uri("/versioned")
            .header("x-version", ApiVersion::default_version())
            .body(Body::empty())
            .unwrap();

        let response = app().oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn rejects_a_missing_header() {
        let request = Request::builder()
            .uri("/versioned")
            .body(Body::empty())
            .unwrap();

        let response = app().oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn rejects_a_mismatched_version() {
        let request = Request::builder()
            .uri("/versioned")
            .header("x-version", "0.0.1")
            .body(Body::empty())
            .unwrap();

        let response = app().oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
