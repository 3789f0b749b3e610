use chrono::{NaiveDate, Utc};
use domain::enrollment_status::EnrollmentStatus;
use domain::{enrollments, Id};
use sea_orm::Value;
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

use domain::{IntoQueryFilterMap, QueryFilterMap};

#[derive(Debug, Deserialize, IntoParams)]
pub(crate) struct IndexParams {
    #[param(value_type = Option<Uuid>)]
    pub(crate) student_id: Option<Id>,
    #[param(value_type = Option<Uuid>)]
    pub(crate) offering_id: Option<Id>,
    pub(crate) status: Option<EnrollmentStatus>,
}

impl IntoQueryFilterMap for IndexParams {
    fn into_query_filter_map(self) -> QueryFilterMap {
        let mut query_filter_map = QueryFilterMap::new();
        query_filter_map.insert(
            "student_id".to_string(),
            self.student_id.map(|id| Value::Uuid(Some(Box::new(id)))),
        );
        query_filter_map.insert(
            "offering_id".to_string(),
            self.offering_id.map(|id| Value::Uuid(Some(Box::new(id)))),
        );
        query_filter_map.insert(
            "status".to_string(),
            self.status
                .map(|status| Value::String(Some(Box::new(status.to_string())))),
        );

        query_filter_map
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub(crate) struct CreateParams {
    #[schema(value_type = Uuid)]
    pub(crate) student_id: Id,
    #[schema(value_type = Uuid)]
    pub(crate) offering_id: Id,
    /// Defaults to today
    #[schema(value_type = Option<String>, format = Date)]
    pub(crate) enroll_date: Option<NaiveDate>,
    pub(crate) class_ratio: Option<String>,
    pub(crate) remarks: Option<String>,
    /// Sessions of the offering the student will not attend
    #[serde(default)]
    #[schema(value_type = Vec<Uuid>)]
    pub(crate) skipped_session_ids: Vec<Id>,
}

impl CreateParams {
    pub(crate) fn into_model(self) -> (enrollments::Model, Vec<Id>) {
        let now = Utc::now();
        let model = enrollments::Model {
            id: Id::nil(),
            student_id: self.student_id,
            offering_id: self.offering_id,
            status: EnrollmentStatus::Active,
            enroll_date: self.enroll_date.unwrap_or_else(|| now.date_naive()),
            class_ratio: self.class_ratio,
            transferred_from_id: None,
            transferred_to_id: None,
            transferred_at: None,
            transfer_notes: None,
            remarks: self.remarks,
            created_by: None,
            created_at: now.into(),
            updated_at: now.into(),
        };

        (model, self.skipped_session_ids)
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub(crate) struct UpdateRemarksParams {
    pub(crate) remarks: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_params_only_fill_given_filters() {
        let offering_id = Id::new_v4();
        let params = IndexParams {
            student_id: None,
            offering_id: Some(offering_id),
            status: Some(EnrollmentStatus::Active),
        };

        let query_filter_map = params.into_query_filter_map();

        assert!(query_filter_map.get("student_id").is_none());
        assert_eq!(
            query_filter_map.get("offering_id"),
            Some(Value::Uuid(Some(Box::new(offering_id))))
        );
        assert_eq!(
            query_filter_map.get("status"),
            Some(Value::String(Some(Box::new("active".to_string()))))
        );
    }

    #[test]
    fn create_params_default_to_an_active_enrollment() {
        let params: CreateParams = serde_json::from_value(serde_json::json!({
            "student_id": Id::new_v4(),
            "offering_id": Id::new_v4(),
            "class_ratio": "1:4"
        }))
        .unwrap();

        let (model, skips) = params.into_model();

        assert_eq!(model.status, EnrollmentStatus::Active);
        assert_eq!(model.class_ratio.as_deref(), Some("1:4"));
        assert!(skips.is_empty());
    }
}
