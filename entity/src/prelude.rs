pub use super::attendances::Entity as Attendances;
pub use super::audit_logs::Entity as AuditLogs;
pub use super::class_sessions::Entity as ClassSessions;
pub use super::enrollment_skips::Entity as EnrollmentSkips;
pub use super::enrollments::Entity as Enrollments;
pub use super::invoice_line_items::Entity as InvoiceLineItems;
pub use super::offerings::Entity as Offerings;
pub use super::staff_users::Entity as StaffUsers;
pub use super::students::Entity as Students;
pub use super::terms::Entity as Terms;
