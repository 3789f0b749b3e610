use crate::{controller::health_check_controller, params, AppState};
use axum::{
    routing::{get, post, put},
    Router,
};

use crate::controller::{
    attendance_controller, audit_log_controller, enrollment_controller, offering_controller,
    transfer_controller,
};

use utoipa::OpenApi;
use utoipa_rapidoc::RapiDoc;

// This is the global definition of our OpenAPI spec. To be a part
// of the rendered spec, a path and schema must be listed here.
#[derive(OpenApi)]
#[openapi(
        info(
            title = "Swim School Platform API"
        ),
        paths(
            attendance_controller::mark,
            audit_log_controller::index,
            enrollment_controller::create,
            enrollment_controller::index,
            enrollment_controller::read,
            enrollment_controller::update_remarks,
            enrollment_controller::transfer_chain,
            enrollment_controller::attendance,
            enrollment_controller::skips,
            health_check_controller::health_check,
            offering_controller::class_sessions,
            transfer_controller::transfer,
        ),
        components(
            schemas(
                domain::attendances::Model,
                domain::audit_logs::Model,
                domain::class_sessions::Model,
                domain::enrollment_skips::Model,
                domain::enrollments::Model,
                domain::offerings::Model,
                domain::attendance_status::AttendanceStatus,
                domain::enrollment_status::EnrollmentStatus,
                params::attendance::MarkParams,
                params::enrollment::CreateParams,
                params::enrollment::UpdateRemarksParams,
                params::transfer::TransferParams,
                params::transfer::TransferResponse,
            )
        ),
        tags(
            (name = "swim_school_platform", description = "Swim School Enrollment API")
        )
    )]
struct ApiDoc;

pub fn define_routes(app_state: AppState) -> Router {
    Router::new()
        .merge(attendance_routes(app_state.clone()))
        .merge(audit_log_routes(app_state.clone()))
        .merge(enrollment_routes(app_state.clone()))
        .merge(health_routes())
        .merge(offering_routes(app_state.clone()))
        .merge(transfer_routes(app_state))
        .merge(RapiDoc::with_openapi("/api-docs/openapi.json", ApiDoc::openapi()).path("/rapidoc"))
}

fn attendance_routes(app_state: AppState) -> Router {
    Router::new()
        .route("/attendance", put(attendance_controller::mark))
        .with_state(app_state)
}

fn audit_log_routes(app_state: AppState) -> Router {
    Router::new()
        .route("/audit_logs", get(audit_log_controller::index))
        .with_state(app_state)
}

fn enrollment_routes(app_state: AppState) -> Router {
    Router::new()
        .route(
            "/enrollments",
            post(enrollment_controller::create).get(enrollment_controller::index),
        )
        .route("/enrollments/{id}", get(enrollment_controller::read))
        .route(
            "/enrollments/{id}/remarks",
            put(enrollment_controller::update_remarks),
        )
        .route(
            "/enrollments/{id}/transfer_chain",
            get(enrollment_controller::transfer_chain),
        )
        .route(
            "/enrollments/{id}/attendance",
            get(enrollment_controller::attendance),
        )
        .route("/enrollments/{id}/skips", get(enrollment_controller::skips))
        .with_state(app_state)
}

fn health_routes() -> Router {
    Router::new().route("/health", get(health_check_controller::health_check))
}

fn offering_routes(app_state: AppState) -> Router {
    Router::new()
        .route(
            "/offerings/{id}/class_sessions",
            get(offering_controller::class_sessions),
        )
        .with_state(app_state)
}

fn transfer_routes(app_state: AppState) -> Router {
    Router::new()
        .route(
            "/enrollments/{id}/transfer",
            post(transfer_controller::transfer),
        )
        .with_state(app_state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use sea_orm::DatabaseConnection;
    use service::config::{ApiVersion, Config};
    use std::sync::Arc;
    use tower::ServiceExt;

    fn disconnected_app() -> Router {
        let db = Arc::new(DatabaseConnection::Disconnected);
        define_routes(AppState::new(Config::from_env(), &db))
    }

    fn transfer_request(staff_id: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder()
            .method("POST")
            .uri(format!("/enrollments/{}/transfer", domain::Id::new_v4()))
            .header("content-type", "application/json")
            .header("x-version", ApiVersion::default_version());
        if let Some(staff_id) = staff_id {
            builder = builder.header("x-staff-id", staff_id);
        }
        builder
            .body(Body::from(
                serde_json::json!({
                    "target_offering_id": domain::Id::new_v4(),
                    "skipped_session_ids": []
                })
                .to_string(),
            ))
            .unwrap()
    }

    #[tokio::test]
    async fn health_check_responds_ok() {
        let request = Request::builder()
            .uri("/health")
            .body(Body::empty())
            .unwrap();

        let response = disconnected_app().oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn openapi_description_is_served() {
        let request = Request::builder()
            .uri("/api-docs/openapi.json")
            .body(Body::empty())
            .unwrap();

        let response = disconnected_app().oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[test]
    fn offering_start_time_is_documented_as_a_time_string() {
        let openapi = serde_json::to_value(ApiDoc::openapi()).unwrap();
        let start_time =
            &openapi["components"]["schemas"]["entity.offerings.Model"]["properties"]["start_time"];

        assert_eq!(start_time["type"], "string");
        assert_eq!(start_time["format"], "time");
    }

    #[tokio::test]
    async fn transfer_without_acting_staff_is_unauthorized() {
        let response = disconnected_app()
            .oneshot(transfer_request(None))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn transfer_with_database_down_is_an_internal_error() {
        let staff_id = domain::Id::new_v4().to_string();

        let response = disconnected_app()
            .oneshot(transfer_request(Some(&staff_id)))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}

#[cfg(test)]
// We need to gate seaORM's mock feature behind conditional compilation because
// the feature removes the Clone trait implementation from seaORM's DatabaseConnection.
// see https://github.com/SeaQL/sea-orm/issues/830
#[cfg(feature = "mock")]
mod mock_tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use domain::{enrollments, offerings, Id};
    use sea_orm::{DatabaseBackend, MockDatabase};
    use service::config::{ApiVersion, Config};
    use std::sync::Arc;
    use tower::ServiceExt;

    fn app(db: MockDatabase) -> Router {
        let db = Arc::new(db.into_connection());
        define_routes(AppState::new(Config::from_env(), &db))
    }

    fn enrollment(offering_id: Id) -> enrollments::Model {
        let now = chrono::Utc::now();
        enrollments::Model {
            id: Id::new_v4(),
            student_id: Id::new_v4(),
            offering_id,
            status: domain::enrollment_status::EnrollmentStatus::Active,
            enroll_date: now.date_naive(),
            class_ratio: Some("1:4".to_string()),
            transferred_from_id: None,
            transferred_to_id: None,
            transferred_at: None,
            transfer_notes: None,
            remarks: None,
            created_by: None,
            created_at: now.into(),
            updated_at: now.into(),
        }
    }

    fn offering(term_id: Id) -> offerings::Model {
        let now = chrono::Utc::now();
        offerings::Model {
            id: Id::new_v4(),
            term_id,
            location_id: None,
            title: "Beginners".to_string(),
            weekday: 0,
            start_time: chrono::NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
            duration_minutes: 30,
            created_at: now.into(),
            updated_at: now.into(),
        }
    }

    fn transfer_request(enrollment_id: Id, target_offering_id: Id) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(format!("/enrollments/{enrollment_id}/transfer"))
            .header("content-type", "application/json")
            .header("x-version", ApiVersion::default_version())
            .header("x-staff-id", Id::new_v4().to_string())
            .body(Body::from(
                serde_json::json!({ "target_offering_id": target_offering_id }).to_string(),
            ))
            .unwrap()
    }

    #[tokio::test]
    async fn read_missing_enrollment_is_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![Vec::<enrollments::Model>::new()]);
        let request = Request::builder()
            .uri(format!("/enrollments/{}", Id::new_v4()))
            .header("x-version", ApiVersion::default_version())
            .body(Body::empty())
            .unwrap();

        let response = app(db).oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn transfer_of_missing_enrollment_is_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![Vec::<enrollments::Model>::new()]);

        let response = app(db)
            .oneshot(transfer_request(Id::new_v4(), Id::new_v4()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn cross_term_transfer_is_a_bad_request() {
        let source = offering(Id::new_v4());
        let target = offering(Id::new_v4());
        let existing = enrollment(source.id);

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![existing.clone()]])
            .append_query_results(vec![vec![target.clone()], vec![source.clone()]]);

        let response = app(db)
            .oneshot(transfer_request(existing.id, target.id))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
