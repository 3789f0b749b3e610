//! Moving a student's active enrollment to another offering of the same term.
//!
//! Attendance already recorded is carried over session by session: the i-th
//! session of the old offering maps to the i-th session of the new one. Every
//! write of a transfer happens in one unit of work, so a failed transfer leaves
//! nothing behind.

use crate::audit_log::{change, AuditEntry, ENROLLMENT};
use crate::enrollment::dedup;
use crate::enrollment_status::EnrollmentStatus;
use crate::error::Error;
use crate::{attendances, class_sessions, enrollments, students, Id};
use log::*;
use sea_orm::DatabaseConnection;
use serde::Serialize;
use serde_json::{json, Value};
use std::collections::HashSet;

pub mod store;

#[cfg(test)]
mod memory;

pub use store::{SeaOrmTransferStore, TransferStore, TransferUnitOfWork};

const TRANSFERRED_NOTE_PREFIX: &str = "[Transferred]";

#[derive(Clone, Debug, PartialEq)]
pub struct TransferRequest {
    pub enrollment_id: Id,
    pub target_offering_id: Id,
    /// Sessions of the target offering the student will not attend
    pub skipped_session_ids: Vec<Id>,
    pub transfer_notes: Option<String>,
    pub acting_staff_id: Id,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct TransferOutcome {
    pub old_enrollment_id: Id,
    pub new_enrollment_id: Id,
}

/// What a transfer will write for the new enrollment, decided before anything is written.
#[derive(Debug, PartialEq)]
pub(crate) struct TransferPlan {
    /// Old attendance paired with the target session it carries over to
    pub carried: Vec<(attendances::Model, Id)>,
    /// Skips to create, in the order they were requested
    pub skipped_session_ids: Vec<Id>,
}

/// Pairs old and new sessions by ordinal position. Old sessions past the end of
/// `target_sessions` carry nothing over. A session that receives carried
/// attendance is never also skipped.
pub(crate) fn plan_transfer(
    source_sessions: &[class_sessions::Model],
    target_sessions: &[class_sessions::Model],
    attendance: &[attendances::Model],
    requested_skips: Vec<Id>,
) -> TransferPlan {
    let mut skipped_session_ids = dedup(requested_skips);
    let mut carried = Vec::new();

    for (old_session, new_session) in source_sessions.iter().zip(target_sessions) {
        if let Some(old_attendance) = attendance
            .iter()
            .find(|a| a.class_session_id == old_session.id)
        {
            carried.push((old_attendance.clone(), new_session.id));
            skipped_session_ids.retain(|id| *id != new_session.id);
        }
    }

    TransferPlan {
        carried,
        skipped_session_ids,
    }
}

/// Notes for carried attendance, marking them as transferred.
pub fn transferred_notes(notes: Option<&str>) -> String {
    match notes {
        Some(notes) if !notes.is_empty() => format!("{TRANSFERRED_NOTE_PREFIX} {notes}"),
        _ => TRANSFERRED_NOTE_PREFIX.to_string(),
    }
}

/// Transfers an enrollment using the application's database.
pub async fn transfer_enrollment(
    db: &DatabaseConnection,
    request: TransferRequest,
) -> Result<TransferOutcome, Error> {
    transfer(&SeaOrmTransferStore::new(db), request).await
}

/// Transfers an active enrollment to another offering of the same term.
///
/// Preconditions are checked in order and the first failure is returned before
/// anything is written. Once writing starts, any failure discards every write and
/// is reported as a persistence failure, except for a concurrent transfer of the
/// same enrollment which is reported as a conflict.
pub async fn transfer<S>(store: &S, request: TransferRequest) -> Result<TransferOutcome, Error>
where
    S: TransferStore + ?Sized,
{
    let enrollment = store
        .find_enrollment(request.enrollment_id)
        .await?
        .ok_or_else(|| Error::not_found("Enrollment"))?;

    if enrollment.status != EnrollmentStatus::Active {
        warn!(
            "Rejecting transfer of enrollment {} with status {}",
            enrollment.id, enrollment.status
        );
        return Err(Error::invalid_state("Enrollment is not active"));
    }

    let target_offering = store
        .find_offering(request.target_offering_id)
        .await?
        .ok_or_else(|| Error::not_found("Target offering"))?;

    let source_offering = store
        .find_offering(enrollment.offering_id)
        .await?
        .ok_or_else(|| Error::not_found("Source offering"))?;

    if target_offering.term_id != source_offering.term_id {
        warn!(
            "Rejecting transfer of enrollment {} from term {} to term {}",
            enrollment.id, source_offering.term_id, target_offering.term_id
        );
        return Err(Error::invalid_state("Cross-term transfer is forbidden"));
    }

    if let Some(existing) = store
        .find_enrollment_by_offering_and_student(target_offering.id, enrollment.student_id)
        .await?
    {
        warn!(
            "Rejecting transfer of enrollment {}: student {} already has enrollment {} in offering {}",
            enrollment.id, enrollment.student_id, existing.id, target_offering.id
        );
        return Err(Error::conflict(
            "Student is already enrolled in the target offering",
        ));
    }

    let student = store
        .find_student(enrollment.student_id)
        .await?
        .ok_or_else(|| Error::not_found("Student"))?;

    let target_sessions = store.list_sessions(target_offering.id).await?;
    let target_session_ids: HashSet<Id> = target_sessions.iter().map(|s| s.id).collect();
    if let Some(foreign) = request
        .skipped_session_ids
        .iter()
        .find(|id| !target_session_ids.contains(id))
    {
        warn!(
            "Rejecting transfer of enrollment {}: skip session {foreign} is not in offering {}",
            enrollment.id, target_offering.id
        );
        return Err(Error::invalid_state(
            "Skip session does not belong to the target offering",
        ));
    }

    let source_sessions = store.list_sessions(source_offering.id).await?;
    let attendance = store.list_attendance(enrollment.id).await?;

    let plan = plan_transfer(
        &source_sessions,
        &target_sessions,
        &attendance,
        request.skipped_session_ids.clone(),
    );
    debug!(
        "Transfer plan for enrollment {}: {} attendance carried, {} skips",
        enrollment.id,
        plan.carried.len(),
        plan.skipped_session_ids.len()
    );

    let mut unit_of_work = store.begin().await?;

    let written = write_transfer(
        unit_of_work.as_mut(),
        &request,
        &enrollment,
        &student,
        &plan,
    )
    .await;

    match written {
        Ok(outcome) => {
            unit_of_work.commit().await.map_err(|err| {
                error!(
                    "Failed to commit transfer of enrollment {}: {err}",
                    enrollment.id
                );
                Error::persistence(err)
            })?;

            info!(
                "Transferred enrollment {} to {} (offering {} -> {})",
                outcome.old_enrollment_id,
                outcome.new_enrollment_id,
                enrollment.offering_id,
                target_offering.id
            );
            Ok(outcome)
        }
        Err(err) => {
            // Rolls back every write made so far
            drop(unit_of_work);

            if err.is_rule_violation() {
                warn!("Transfer of enrollment {} aborted: {err}", enrollment.id);
                Err(err)
            } else {
                error!("Transfer of enrollment {} failed: {err}", enrollment.id);
                Err(Error::persistence(err))
            }
        }
    }
}

async fn write_transfer(
    unit_of_work: &mut dyn TransferUnitOfWork,
    request: &TransferRequest,
    enrollment: &enrollments::Model,
    student: &students::Model,
    plan: &TransferPlan,
) -> Result<TransferOutcome, Error> {
    let staff_id = request.acting_staff_id;
    let now = chrono::Utc::now();

    let new_enrollment = unit_of_work
        .create_enrollment(
            enrollments::Model {
                offering_id: request.target_offering_id,
                status: EnrollmentStatus::Active,
                enroll_date: now.date_naive(),
                transferred_from_id: Some(enrollment.id),
                transferred_to_id: None,
                transferred_at: None,
                transfer_notes: None,
                remarks: None,
                created_by: Some(staff_id),
                ..enrollment.clone()
            },
            staff_id,
        )
        .await?;

    for (old_attendance, new_session_id) in &plan.carried {
        unit_of_work
            .create_attendance(attendances::Model {
                enrollment_id: new_enrollment.id,
                class_session_id: *new_session_id,
                notes: Some(transferred_notes(old_attendance.notes.as_deref())),
                marked_by: Some(staff_id),
                marked_at: now.into(),
                ..old_attendance.clone()
            })
            .await?;
    }

    for class_session_id in &plan.skipped_session_ids {
        unit_of_work
            .create_skip(
                new_enrollment.id,
                *class_session_id,
                Some(format!("Declared on transfer from enrollment {}", enrollment.id)),
                staff_id,
            )
            .await?;
    }

    let updated = unit_of_work
        .mark_transferred(
            enrollment.id,
            new_enrollment.id,
            request.transfer_notes.clone(),
        )
        .await?;
    if updated == 0 {
        return Err(Error::conflict("Enrollment was modified concurrently"));
    }

    if let Some(line_item) = unit_of_work.find_line_item(enrollment.id).await? {
        unit_of_work
            .relink_line_item(line_item.id, new_enrollment.id)
            .await?;
        debug!(
            "Invoice line item {} now bills enrollment {}",
            line_item.id, new_enrollment.id
        );
    }

    unit_of_work
        .append_audit(
            AuditEntry::new(staff_id, "enrollment.transfer", ENROLLMENT, enrollment.id)
                .changes(json!({
                    "status": change("active", "transferred"),
                    "transferred_to_id": change(Value::Null, json!(new_enrollment.id)),
                }))
                .metadata(json!({
                    "student_id": student.id,
                    "student_name": student.full_name(),
                    "from_offering_id": enrollment.offering_id,
                    "to_offering_id": request.target_offering_id,
                    "skipped_session_ids": plan.skipped_session_ids,
                    "transfer_notes": request.transfer_notes,
                    "carried_attendance_count": plan.carried.len(),
                })),
        )
        .await?;

    unit_of_work
        .append_audit(
            AuditEntry::new(staff_id, "enrollment.create", ENROLLMENT, new_enrollment.id)
                .changes(json!({ "status": change(Value::Null, "active") }))
                .metadata(json!({
                    "transferred_from_id": enrollment.id,
                    "skips_created": plan.skipped_session_ids.len(),
                })),
        )
        .await?;

    Ok(TransferOutcome {
        old_enrollment_id: enrollment.id,
        new_enrollment_id: new_enrollment.id,
    })
}
