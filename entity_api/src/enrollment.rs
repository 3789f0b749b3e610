use super::error::{EntityApiErrorKind, Error};
use entity::enrollment_status::EnrollmentStatus;
use entity::enrollments::{ActiveModel, Column, Entity, Model};
use entity::Id;
use log::*;
use sea_orm::{
    entity::prelude::*,
    ActiveValue::{Set, Unchanged},
    ConnectionTrait,
};

/// Inserts a new enrollment. Status, ratio, remarks and the transfer back-reference
/// are taken from `enrollment_model`; the remaining transfer fields always start empty.
pub async fn create(
    db: &impl ConnectionTrait,
    enrollment_model: Model,
    created_by: Option<Id>,
) -> Result<Model, Error> {
    debug!("New Enrollment Model to be inserted: {enrollment_model:?}");

    let now = chrono::Utc::now();

    let enrollment_active_model = ActiveModel {
        student_id: Set(enrollment_model.student_id),
        offering_id: Set(enrollment_model.offering_id),
        status: Set(enrollment_model.status),
        enroll_date: Set(enrollment_model.enroll_date),
        class_ratio: Set(enrollment_model.class_ratio),
        transferred_from_id: Set(enrollment_model.transferred_from_id),
        transferred_to_id: Set(None),
        transferred_at: Set(None),
        transfer_notes: Set(None),
        remarks: Set(enrollment_model.remarks),
        created_by: Set(created_by),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
        ..Default::default()
    };

    Ok(enrollment_active_model.insert(db).await?)
}

pub async fn find_by_id(db: &impl ConnectionTrait, id: Id) -> Result<Model, Error> {
    Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(Error::not_found)
}

pub async fn find_optional(db: &impl ConnectionTrait, id: Id) -> Result<Option<Model>, Error> {
    Ok(Entity::find_by_id(id).one(db).await?)
}

/// Finds any enrollment, regardless of status, binding `student_id` to `offering_id`.
pub async fn find_by_offering_and_student(
    db: &impl ConnectionTrait,
    offering_id: Id,
    student_id: Id,
) -> Result<Option<Model>, Error> {
    Ok(Entity::find()
        .filter(Column::OfferingId.eq(offering_id))
        .filter(Column::StudentId.eq(student_id))
        .one(db)
        .await?)
}

/// Flips an active enrollment to `transferred` and links it forward to its successor.
///
/// The update only matches while the enrollment is still `active`, so of two
/// concurrent transfers of the same enrollment at most one can succeed. Returns the
/// number of rows updated, which is zero when the enrollment was no longer active.
pub async fn mark_transferred(
    db: &impl ConnectionTrait,
    id: Id,
    transferred_to_id: Id,
    transfer_notes: Option<String>,
) -> Result<u64, Error> {
    debug!("Marking Enrollment {id} as transferred to {transferred_to_id}");

    let now = chrono::Utc::now();

    let result = Entity::update_many()
        .set(ActiveModel {
            status: Set(EnrollmentStatus::Transferred),
            transferred_to_id: Set(Some(transferred_to_id)),
            transferred_at: Set(Some(now.into())),
            transfer_notes: Set(transfer_notes),
            updated_at: Set(now.into()),
            ..Default::default()
        })
        .filter(Column::Id.eq(id))
        .filter(Column::Status.eq(EnrollmentStatus::Active))
        .exec(db)
        .await?;

    Ok(result.rows_affected)
}

pub async fn update_remarks(
    db: &impl ConnectionTrait,
    id: Id,
    remarks: Option<String>,
) -> Result<Model, Error> {
    let result = Entity::find_by_id(id).one(db).await?;

    match result {
        Some(enrollment) => {
            debug!("Existing Enrollment model to be Updated: {enrollment:?}");

            let active_model = ActiveModel {
                id: Unchanged(enrollment.id),
                remarks: Set(remarks),
                updated_at: Set(chrono::Utc::now().into()),
                ..Default::default()
            };

            Ok(active_model.update(db).await?)
        }
        None => {
            error!("Enrollment with id {id} not found");

            Err(Error {
                source: None,
                error_kind: EntityApiErrorKind::RecordNotFound,
            })
        }
    }
}
