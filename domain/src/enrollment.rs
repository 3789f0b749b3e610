use crate::audit_log::{self, change, AuditEntry, ENROLLMENT};
use crate::enrollment_status::EnrollmentStatus;
use crate::enrollments::{Column, Entity, Model};
use crate::error::Error;
use crate::Id;
use entity_api::query::{self, IntoQueryFilterMap};
use log::*;
use sea_orm::{ConnectionTrait, DatabaseConnection, TransactionTrait};
use serde_json::{json, Value};
use std::collections::HashSet;

pub use entity_api::enrollment::find_by_id;

pub async fn find_by(
    db: &impl ConnectionTrait,
    params: impl IntoQueryFilterMap,
) -> Result<Vec<Model>, Error> {
    let enrollments = query::find_by::<Entity, Column>(
        db,
        params.into_query_filter_map(),
        Some(Column::CreatedAt),
    )
    .await?;

    Ok(enrollments)
}

/// Enrolls a student in an offering with a set of pre-declared skips.
///
/// The enrollment, its skips and the `enrollment.create` audit entry are written
/// in one transaction.
pub async fn enroll_with_skips(
    db: &DatabaseConnection,
    enrollment_model: Model,
    skip_session_ids: Vec<Id>,
    staff_id: Id,
) -> Result<Model, Error> {
    entity_api::staff_user::find_by_id(db, staff_id).await?;
    entity_api::offering::find_by_id(db, enrollment_model.offering_id).await?;

    if let Some(existing) = entity_api::enrollment::find_by_offering_and_student(
        db,
        enrollment_model.offering_id,
        enrollment_model.student_id,
    )
    .await?
    {
        if existing.is_active() {
            warn!(
                "Student {} already has active enrollment {} in offering {}",
                existing.student_id, existing.id, existing.offering_id
            );
            return Err(Error::conflict("Student is already enrolled in this offering"));
        }
    }

    let skip_session_ids = dedup(skip_session_ids);
    let sessions =
        entity_api::class_session::find_by_offering(db, enrollment_model.offering_id).await?;
    let offering_session_ids: HashSet<Id> = sessions.iter().map(|s| s.id).collect();
    if skip_session_ids
        .iter()
        .any(|id| !offering_session_ids.contains(id))
    {
        return Err(Error::invalid_state(
            "Skip session does not belong to the offering",
        ));
    }

    let txn = db.begin().await?;

    let enrollment = entity_api::enrollment::create(
        &txn,
        Model {
            status: EnrollmentStatus::Active,
            transferred_from_id: None,
            ..enrollment_model
        },
        Some(staff_id),
    )
    .await?;

    for class_session_id in &skip_session_ids {
        entity_api::enrollment_skip::create(
            &txn,
            enrollment.id,
            *class_session_id,
            None,
            Some(staff_id),
        )
        .await?;
    }

    audit_log::append(
        &txn,
        AuditEntry::new(staff_id, "enrollment.create", ENROLLMENT, enrollment.id)
            .changes(json!({ "status": change(Value::Null, "active") }))
            .metadata(json!({
                "student_id": enrollment.student_id,
                "offering_id": enrollment.offering_id,
                "skipped_session_ids": skip_session_ids,
                "skips_created": skip_session_ids.len(),
            })),
    )
    .await?;

    txn.commit().await?;

    info!(
        "Enrolled student {} in offering {} as enrollment {}",
        enrollment.student_id, enrollment.offering_id, enrollment.id
    );

    Ok(enrollment)
}

pub async fn update_remarks(
    db: &DatabaseConnection,
    id: Id,
    remarks: Option<String>,
    staff_id: Id,
) -> Result<Model, Error> {
    entity_api::staff_user::find_by_id(db, staff_id).await?;

    let txn = db.begin().await?;

    let existing = entity_api::enrollment::find_by_id(&txn, id).await?;
    let updated = entity_api::enrollment::update_remarks(&txn, id, remarks).await?;

    audit_log::append(
        &txn,
        AuditEntry::new(staff_id, "enrollment.update_remarks", ENROLLMENT, id).changes(json!({
            "remarks": change(existing.remarks, updated.remarks.clone()),
        })),
    )
    .await?;

    txn.commit().await?;

    Ok(updated)
}

/// Returns every enrollment linked to `id` by transfers, oldest first.
pub async fn find_transfer_chain(db: &impl ConnectionTrait, id: Id) -> Result<Vec<Model>, Error> {
    let start = entity_api::enrollment::find_by_id(db, id).await?;

    let mut visited = HashSet::from([start.id]);
    let mut earlier = Vec::new();
    let mut cursor = start.transferred_from_id;
    while let Some(previous_id) = cursor {
        if !visited.insert(previous_id) {
            warn!("Transfer chain of enrollment {id} loops back to {previous_id}");
            break;
        }
        match entity_api::enrollment::find_optional(db, previous_id).await? {
            Some(previous) => {
                cursor = previous.transferred_from_id;
                earlier.push(previous);
            }
            None => break,
        }
    }
    earlier.reverse();

    let mut cursor = start.transferred_to_id;
    let mut chain = earlier;
    chain.push(start);
    while let Some(next_id) = cursor {
        if !visited.insert(next_id) {
            warn!("Transfer chain of enrollment {id} loops back to {next_id}");
            break;
        }
        match entity_api::enrollment::find_optional(db, next_id).await? {
            Some(next) => {
                cursor = next.transferred_to_id;
                chain.push(next);
            }
            None => break,
        }
    }

    Ok(chain)
}

// Removes repeated ids, keeping the first occurrence of each.
pub(crate) fn dedup(ids: Vec<Id>) -> Vec<Id> {
    let mut seen = HashSet::new();
    ids.into_iter().filter(|id| seen.insert(*id)).collect()
}
