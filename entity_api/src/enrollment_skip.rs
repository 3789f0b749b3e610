use super::error::Error;
use entity::enrollment_skips::{ActiveModel, Column, Entity, Model};
use entity::Id;
use log::*;
use sea_orm::{entity::prelude::*, ConnectionTrait, QueryOrder, Set};

pub async fn create(
    db: &impl ConnectionTrait,
    enrollment_id: Id,
    class_session_id: Id,
    reason: Option<String>,
    created_by: Option<Id>,
) -> Result<Model, Error> {
    debug!("New Enrollment Skip for enrollment {enrollment_id} and session {class_session_id}");

    let active_model = ActiveModel {
        enrollment_id: Set(enrollment_id),
        class_session_id: Set(class_session_id),
        reason: Set(reason),
        created_by: Set(created_by),
        created_at: Set(chrono::Utc::now().into()),
        ..Default::default()
    };

    Ok(active_model.insert(db).await?)
}

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

/// Removes the skip, if any, declared for a single (enrollment, class session) pair.
pub async fn delete_by_enrollment_and_session(
    db: &impl ConnectionTrait,
    enrollment_id: Id,
    class_session_id: Id,
) -> Result<u64, Error> {
    let result = Entity::delete_many()
        .filter(Column::EnrollmentId.eq(enrollment_id))
        .filter(Column::ClassSessionId.eq(class_session_id))
        .exec(db)
        .await?;

    Ok(result.rows_affected)
}
