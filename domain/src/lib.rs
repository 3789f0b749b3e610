//! Business rules of the swim school platform.
//!
//! This module re-exports various items from the `entity_api` crate so that
//! consumers of the `domain` crate (namely `web`) do not need to depend on
//! `entity_api` directly.
pub use entity_api::query::{IntoQueryFilterMap, QueryFilterMap};

// Re-exports from `entity` crate via `entity_api`
pub use entity_api::{
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
pub mod transfer;
