use chrono::{Days, NaiveTime, Utc};
use sea_orm::{ActiveModelTrait, DatabaseConnection, Set};
use serde_json::json;

pub use entity::{
    attendance_status, attendances, audit_logs, class_sessions, enrollment_skips,
    enrollment_status, enrollments, invoice_line_items, offerings, staff_users, students, terms,
    Id,
};

pub mod attendance;
pub mod audit_log;
pub mod class_session;
pub mod enrollment;
pub mod enrollment_skip;
pub mod error;
pub mod invoice_line_item;
pub mod offering;
pub mod query;
pub mod staff_user;
pub mod student;

pub use query::{IntoQueryFilterMap, QueryFilterMap};

/// Fills an empty database with one term of lessons that is enough to exercise a
/// transfer end to end: two offerings in the same term, one in the next term, a
/// student enrolled in the first offering with some attendance marked and a billed
/// line item.
pub async fn seed_database(db: &DatabaseConnection) {
    let now = Utc::now();
    let today = now.date_naive();

    let front_desk = staff_users::ActiveModel {
        email: Set("frontdesk@swimschool.example".to_owned()),
        display_name: Set(Some("Front Desk".to_owned())),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
        ..Default::default()
    }
    .insert(db)
    .await
    .unwrap();

    let term_one = terms::ActiveModel {
        name: Set("Term 1".to_owned()),
        starts_on: Set(today),
        ends_on: Set(today.checked_add_days(Days::new(70)).unwrap()),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
        ..Default::default()
    }
    .insert(db)
    .await
    .unwrap();

    let term_two = terms::ActiveModel {
        name: Set("Term 2".to_owned()),
        starts_on: Set(today.checked_add_days(Days::new(84)).unwrap()),
        ends_on: Set(today.checked_add_days(Days::new(154)).unwrap()),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
        ..Default::default()
    }
    .insert(db)
    .await
    .unwrap();

    let saturday_beginners = offerings::ActiveModel {
        term_id: Set(term_one.id),
        location_id: Set(None),
        title: Set("Beginners Saturday 9am".to_owned()),
        weekday: Set(6),
        start_time: Set(NaiveTime::from_hms_opt(9, 0, 0).unwrap()),
        duration_minutes: Set(30),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
        ..Default::default()
    }
    .insert(db)
    .await
    .unwrap();

    let sunday_beginners = offerings::ActiveModel {
        term_id: Set(term_one.id),
        location_id: Set(None),
        title: Set("Beginners Sunday 10am".to_owned()),
        weekday: Set(0),
        start_time: Set(NaiveTime::from_hms_opt(10, 0, 0).unwrap()),
        duration_minutes: Set(30),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
        ..Default::default()
    }
    .insert(db)
    .await
    .unwrap();

    offerings::ActiveModel {
        term_id: Set(term_two.id),
        location_id: Set(None),
        title: Set("Beginners Saturday 9am".to_owned()),
        weekday: Set(6),
        start_time: Set(NaiveTime::from_hms_opt(9, 0, 0).unwrap()),
        duration_minutes: Set(30),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
        ..Default::default()
    }
    .insert(db)
    .await
    .unwrap();

    // Ten weekly sessions per term one offering
    let mut saturday_sessions = Vec::new();
    for week in 0..10u64 {
        saturday_sessions.push(
            class_session::create(
                db,
                saturday_beginners.id,
                today.checked_add_days(Days::new(week * 7)).unwrap(),
            )
            .await
            .unwrap(),
        );

        class_session::create(
            db,
            sunday_beginners.id,
            today.checked_add_days(Days::new(week * 7 + 1)).unwrap(),
        )
        .await
        .unwrap();
    }

    let ada = students::ActiveModel {
        first_name: Set("Ada".to_owned()),
        last_name: Set("Lovelace".to_owned()),
        date_of_birth: Set(None),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
        ..Default::default()
    }
    .insert(db)
    .await
    .unwrap();

    students::ActiveModel {
        first_name: Set("Grace".to_owned()),
        last_name: Set("Hopper".to_owned()),
        date_of_birth: Set(None),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
        ..Default::default()
    }
    .insert(db)
    .await
    .unwrap();

    let ada_saturday = enrollments::ActiveModel {
        student_id: Set(ada.id),
        offering_id: Set(saturday_beginners.id),
        status: Set(enrollment_status::EnrollmentStatus::Active),
        enroll_date: Set(today),
        class_ratio: Set(Some("1:4".to_owned())),
        transferred_from_id: Set(None),
        transferred_to_id: Set(None),
        transferred_at: Set(None),
        transfer_notes: Set(None),
        remarks: Set(None),
        created_by: Set(Some(front_desk.id)),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
        ..Default::default()
    }
    .insert(db)
    .await
    .unwrap();

    // Ada attended the first two Saturdays and missed the third
    for (session, status) in saturday_sessions.iter().zip([
        attendance_status::AttendanceStatus::Present,
        attendance_status::AttendanceStatus::Present,
        attendance_status::AttendanceStatus::Absent,
    ]) {
        attendances::ActiveModel {
            enrollment_id: Set(ada_saturday.id),
            class_session_id: Set(session.id),
            status: Set(status),
            notes: Set(None),
            marked_by: Set(Some(front_desk.id)),
            marked_at: Set(now.into()),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
            ..Default::default()
        }
        .insert(db)
        .await
        .unwrap();
    }

    invoice_line_items::ActiveModel {
        invoice_id: Set(Id::new_v4()),
        enrollment_id: Set(Some(ada_saturday.id)),
        description: Set("Term 1 Beginners Saturday 9am".to_owned()),
        amount_cents: Set(24_000),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
        ..Default::default()
    }
    .insert(db)
    .await
    .unwrap();

    audit_logs::ActiveModel {
        staff_id: Set(front_desk.id),
        action: Set("enrollment.create".to_owned()),
        entity_type: Set("enrollment".to_owned()),
        entity_id: Set(ada_saturday.id),
        changes: Set(json!({"status": {"from": null, "to": "active"}})),
        metadata: Set(json!({"source": "seed"})),
        created_at: Set(now.into()),
        ..Default::default()
    }
    .insert(db)
    .await
    .unwrap();
}
