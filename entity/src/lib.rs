use uuid::Uuid;

pub mod prelude;

// Scheduling
pub mod class_sessions;
pub mod offerings;
pub mod terms;

// People
pub mod staff_users;
pub mod students;

// Enrollment lifecycle
pub mod attendance_status;
pub mod attendances;
pub mod enrollment_skips;
pub mod enrollment_status;
pub mod enrollments;

// Billing and traceability
pub mod audit_logs;
pub mod invoice_line_items;

/// A type alias that represents any Entity's internal id field data type.
/// Aliased so that it's easy to change the underlying type if necessary.
pub type Id = Uuid;
