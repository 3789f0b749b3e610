use super::error::Error;
use entity::attendance_status::AttendanceStatus;
use entity::attendances::{ActiveModel, Column, Entity, Model};
use entity::Id;
use log::*;
use sea_orm::{
    entity::prelude::*,
    ActiveValue::{Set, Unchanged},
    ConnectionTrait, QueryOrder,
};

/// Inserts an attendance row. `marked_by` and `marked_at` are carried over from
/// `attendance_model` so that copied rows keep their original marker.
pub async fn create(db: &impl ConnectionTrait, attendance_model: Model) -> Result<Model, Error> {
    debug!("New Attendance Model to be inserted: {attendance_model:?}");

    let now = chrono::Utc::now();

    let active_model = ActiveModel {
        enrollment_id: Set(attendance_model.enrollment_id),
        class_session_id: Set(attendance_model.class_session_id),
        status: Set(attendance_model.status),
        notes: Set(attendance_model.notes),
        marked_by: Set(attendance_model.marked_by),
        marked_at: Set(attendance_model.marked_at),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
        ..Default::default()
    };

    Ok(active_model.insert(db).await?)
}

/// All attendance rows recorded against an enrollment.
pub async fn find_by_enrollment(
    db: &impl ConnectionTrait,
    enrollment_id: Id,
) -> Result<Vec<Model>, Error> {
    Ok(Entity::find()
        .filter(Column::EnrollmentId.eq(enrollment_id))
        .order_by_asc(Column::CreatedAt)
        .all(db)
        .await?)
}

pub async fn find_by_enrollment_and_session(
    db: &impl ConnectionTrait,
    enrollment_id: Id,
    class_session_id: Id,
) -> Result<Option<Model>, Error> {
    Ok(Entity::find()
        .filter(Column::EnrollmentId.eq(enrollment_id))
        .filter(Column::ClassSessionId.eq(class_session_id))
        .one(db)
        .await?)
}

/// Records attendance for one (enrollment, class session) pair, updating the
/// existing row for that pair if there is one.
pub async fn upsert(
    db: &impl ConnectionTrait,
    enrollment_id: Id,
    class_session_id: Id,
    status: AttendanceStatus,
    notes: Option<String>,
    marked_by: Id,
) -> Result<Model, Error> {
    let now = chrono::Utc::now();

    match find_by_enrollment_and_session(db, enrollment_id, class_session_id).await? {
        Some(existing) => {
            debug!("Existing Attendance model to be Updated: {existing:?}");

            let active_model = ActiveModel {
                id: Unchanged(existing.id),
                enrollment_id: Unchanged(existing.enrollment_id),
                class_session_id: Unchanged(existing.class_session_id),
                status: Set(status),
                notes: Set(notes),
                marked_by: Set(Some(marked_by)),
                marked_at: Set(now.into()),
                created_at: Unchanged(existing.created_at),
                updated_at: Set(now.into()),
            };

            Ok(active_model.update(db).await?)
        }
        None => {
            let active_model = ActiveModel {
                enrollment_id: Set(enrollment_id),
                class_session_id: Set(class_session_id),
                status: Set(status),
                notes: Set(notes),
                marked_by: Set(Some(marked_by)),
                marked_at: Set(now.into()),
                created_at: Set(now.into()),
                updated_at: Set(now.into()),
                ..Default::default()
            };

            Ok(active_model.insert(db).await?)
        }
    }
}

#[cfg(test)]
// We need to gate seaORM's mock feature behind conditional compilation because
// the feature removes the Clone trait implementation from seaORM's DatabaseConnection.
// see https://github.com/SeaQL/sea-orm/issues/830
#[cfg(feature = "mock")]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase};

    fn attendance(enrollment_id: Id, class_session_id: Id) -> Model {
        let now = chrono::Utc::now();
        Model {
            id: Id::new_v4(),
            enrollment_id,
            class_session_id,
            status: AttendanceStatus::Present,
            notes: None,
            marked_by: Some(Id::new_v4()),
            marked_at: now.into(),
            created_at: now.into(),
            updated_at: now.into(),
        }
    }

    #[tokio::test]
    async fn find_by_enrollment_returns_all_rows() -> Result<(), Error> {
        let enrollment_id = Id::new_v4();
        let rows = vec![
            attendance(enrollment_id, Id::new_v4()),
            attendance(enrollment_id, Id::new_v4()),
        ];

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![rows.clone()])
            .into_connection();

        let found = find_by_enrollment(&db, enrollment_id).await?;

        assert_eq!(found, rows);

        Ok(())
    }

    #[tokio::test]
    async fn upsert_inserts_when_no_row_exists() -> Result<(), Error> {
        let enrollment_id = Id::new_v4();
        let class_session_id = Id::new_v4();
        let inserted = attendance(enrollment_id, class_session_id);

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![Vec::<Model>::new(), vec![inserted.clone()]])
            .into_connection();

        let result = upsert(
            &db,
            enrollment_id,
            class_session_id,
            AttendanceStatus::Present,
            None,
            Id::new_v4(),
        )
        .await?;

        assert_eq!(result.id, inserted.id);

        Ok(())
    }

    #[tokio::test]
    async fn upsert_updates_the_existing_row() -> Result<(), Error> {
        let enrollment_id = Id::new_v4();
        let class_session_id = Id::new_v4();
        let existing = attendance(enrollment_id, class_session_id);
        let updated = Model {
            status: AttendanceStatus::Excused,
            notes: Some("sick".to_string()),
            ..existing.clone()
        };

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![existing.clone()], vec![updated.clone()]])
            .into_connection();

        let result = upsert(
            &db,
            enrollment_id,
            class_session_id,
            AttendanceStatus::Excused,
            Some("sick".to_string()),
            Id::new_v4(),
        )
        .await?;

        assert_eq!(result.id, existing.id);
        assert_eq!(result.status, AttendanceStatus::Excused);

        Ok(())
    }
}
