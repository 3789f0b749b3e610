use crate::attendance_status::AttendanceStatus;
use crate::attendances::Model;
use crate::error::Error;
use crate::Id;
use log::*;
use sea_orm::{ConnectionTrait, DatabaseConnection, TransactionTrait};

pub async fn find_by_enrollment(
    db: &impl ConnectionTrait,
    enrollment_id: Id,
) -> Result<Vec<Model>, Error> {
    entity_api::enrollment::find_by_id(db, enrollment_id).await?;

    Ok(entity_api::attendance::find_by_enrollment(db, enrollment_id).await?)
}

/// Marks attendance for one class session of an active enrollment. Any skip
/// declared for the same session is removed in the same transaction, so a pair
/// is never both attended and skipped.
pub async fn mark(
    db: &DatabaseConnection,
    enrollment_id: Id,
    class_session_id: Id,
    status: AttendanceStatus,
    notes: Option<String>,
    staff_id: Id,
) -> Result<Model, Error> {
    let txn = db.begin().await?;

    let enrollment = entity_api::enrollment::find_by_id(&txn, enrollment_id).await?;
    if !enrollment.is_active() {
        warn!("Refusing to mark attendance on inactive enrollment {enrollment_id}");
        return Err(Error::invalid_state("Enrollment is not active"));
    }

    let class_session = entity_api::class_session::find_by_id(&txn, class_session_id).await?;
    if class_session.offering_id != enrollment.offering_id {
        warn!(
            "Class session {class_session_id} does not belong to offering {}",
            enrollment.offering_id
        );
        return Err(Error::invalid_state(
            "Class session does not belong to the enrollment's offering",
        ));
    }

    let attendance = entity_api::attendance::upsert(
        &txn,
        enrollment_id,
        class_session_id,
        status,
        notes,
        staff_id,
    )
    .await?;

    let removed_skips = entity_api::enrollment_skip::delete_by_enrollment_and_session(
        &txn,
        enrollment_id,
        class_session_id,
    )
    .await?;
    if removed_skips > 0 {
        debug!("Removed skip for enrollment {enrollment_id} and session {class_session_id}");
    }

    txn.commit().await?;

    info!("Marked {status} for enrollment {enrollment_id} at session {class_session_id}");

    Ok(attendance)
}

#[cfg(test)]
// We need to gate seaORM's mock feature behind conditional compilation because
// the feature removes the Clone trait implementation from seaORM's DatabaseConnection.
// see https://github.com/SeaQL/sea-orm/issues/830
#[cfg(feature = "mock")]
mod tests {
    use super::*;
    use crate::class_sessions;
    use crate::enrollment_status::EnrollmentStatus;
    use crate::enrollments;
    use crate::error::{DomainErrorKind, RuleViolation};
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

    fn enrollment(status: EnrollmentStatus, offering_id: Id) -> enrollments::Model {
        let now = chrono::Utc::now();
        enrollments::Model {
            id: Id::new_v4(),
            student_id: Id::new_v4(),
            offering_id,
            status,
            enroll_date: now.date_naive(),
            class_ratio: None,
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

    fn session(offering_id: Id) -> class_sessions::Model {
        let now = chrono::Utc::now();
        class_sessions::Model {
            id: Id::new_v4(),
            offering_id,
            date: now.date_naive(),
            created_at: now.into(),
            updated_at: now.into(),
        }
    }

    #[tokio::test]
    async fn mark_rejects_inactive_enrollment() {
        let transferred = enrollment(EnrollmentStatus::Transferred, Id::new_v4());

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![transferred.clone()]])
            .into_connection();

        let result = mark(
            &db,
            transferred.id,
            Id::new_v4(),
            AttendanceStatus::Present,
            None,
            Id::new_v4(),
        )
        .await;

        assert_eq!(
            result.unwrap_err().error_kind,
            DomainErrorKind::Rule(RuleViolation::InvalidState(
                "Enrollment is not active".to_string()
            ))
        );
    }

    #[tokio::test]
    async fn mark_rejects_session_of_another_offering() {
        let active = enrollment(EnrollmentStatus::Active, Id::new_v4());
        let foreign_session = session(Id::new_v4());

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![active.clone()]])
            .append_query_results(vec![vec![foreign_session.clone()]])
            .into_connection();

        let result = mark(
            &db,
            active.id,
            foreign_session.id,
            AttendanceStatus::Present,
            None,
            Id::new_v4(),
        )
        .await;

        assert!(matches!(
            result.unwrap_err().error_kind,
            DomainErrorKind::Rule(RuleViolation::InvalidState(_))
        ));
    }

    #[tokio::test]
    async fn mark_upserts_attendance_and_clears_skip() -> Result<(), Error> {
        let active = enrollment(EnrollmentStatus::Active, Id::new_v4());
        let own_session = session(active.offering_id);
        let now = chrono::Utc::now();
        let marked = Model {
            id: Id::new_v4(),
            enrollment_id: active.id,
            class_session_id: own_session.id,
            status: AttendanceStatus::Present,
            notes: None,
            marked_by: Some(Id::new_v4()),
            marked_at: now.into(),
            created_at: now.into(),
            updated_at: now.into(),
        };

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![active.clone()]])
            .append_query_results(vec![vec![own_session.clone()]])
            .append_query_results(vec![Vec::<Model>::new()])
            .append_query_results(vec![vec![marked.clone()]])
            .append_exec_results(vec![MockExecResult {
                last_insert_id: 0,
                rows_affected: 1,
            }])
            .into_connection();

        let attendance = mark(
            &db,
            active.id,
            own_session.id,
            AttendanceStatus::Present,
            None,
            Id::new_v4(),
        )
        .await?;

        assert_eq!(attendance, marked);

        Ok(())
    }
}
