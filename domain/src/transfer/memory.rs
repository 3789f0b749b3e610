//! In-memory `TransferStore` used to test the transfer workflow.
//!
//! A unit of work stages its writes on a copy of the shared state and swaps the
//! copy in on commit, so an uncommitted unit of work leaves no trace.

use super::store::{TransferStore, TransferUnitOfWork};
use crate::audit_log::AuditEntry;
use crate::enrollment_status::EnrollmentStatus;
use crate::error::Error;
use crate::{
    attendances, audit_logs, class_sessions, enrollment_skips, enrollments, invoice_line_items,
    offerings, students, Id,
};
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct State {
    pub enrollments: Vec<enrollments::Model>,
    pub offerings: Vec<offerings::Model>,
    pub students: Vec<students::Model>,
    pub sessions: Vec<class_sessions::Model>,
    pub attendances: Vec<attendances::Model>,
    pub skips: Vec<enrollment_skips::Model>,
    pub line_items: Vec<invoice_line_items::Model>,
    pub audit_logs: Vec<audit_logs::Model>,
}

impl State {
    pub fn enrollment(&self, id: Id) -> Option<&enrollments::Model> {
        self.enrollments.iter().find(|e| e.id == id)
    }
}

#[derive(Default)]
pub(crate) struct InMemoryTransferStore {
    state: Arc<Mutex<State>>,
    transactions_begun: AtomicUsize,
    // 1-based index of the audit append that fails
    fail_on_audit_append: Option<usize>,
    // Another transfer of this enrollment commits right after ours begins
    competing_transfer_of: Option<Id>,
}

impl InMemoryTransferStore {
    pub fn new(state: State) -> Self {
        Self {
            state: Arc::new(Mutex::new(state)),
            ..Default::default()
        }
    }

    pub fn fail_on_audit_append(mut self, nth: usize) -> Self {
        self.fail_on_audit_append = Some(nth);
        self
    }

    pub fn with_competing_transfer_of(mut self, enrollment_id: Id) -> Self {
        self.competing_transfer_of = Some(enrollment_id);
        self
    }

    pub fn snapshot(&self) -> State {
        lock(&self.state).clone()
    }

    pub fn transactions_begun(&self) -> usize {
        self.transactions_begun.load(Ordering::SeqCst)
    }
}

fn lock(state: &Mutex<State>) -> MutexGuard<'_, State> {
    state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn constraint_violation(what: &str) -> Error {
    Error::persistence(format!("duplicate key value violates unique constraint on {what}"))
}

#[async_trait]
impl TransferStore for InMemoryTransferStore {
    async fn find_enrollment(&self, id: Id) -> Result<Option<enrollments::Model>, Error> {
        Ok(lock(&self.state).enrollment(id).cloned())
    }

    async fn find_offering(&self, id: Id) -> Result<Option<offerings::Model>, Error> {
        Ok(lock(&self.state)
            .offerings
            .iter()
            .find(|o| o.id == id)
            .cloned())
    }

    async fn find_student(&self, id: Id) -> Result<Option<students::Model>, Error> {
        Ok(lock(&self.state)
            .students
            .iter()
            .find(|s| s.id == id)
            .cloned())
    }

    async fn find_enrollment_by_offering_and_student(
        &self,
        offering_id: Id,
        student_id: Id,
    ) -> Result<Option<enrollments::Model>, Error> {
        Ok(lock(&self.state)
            .enrollments
            .iter()
            .find(|e| e.offering_id == offering_id && e.student_id == student_id)
            .cloned())
    }

    async fn list_sessions(&self, offering_id: Id) -> Result<Vec<class_sessions::Model>, Error> {
        let mut sessions: Vec<_> = lock(&self.state)
            .sessions
            .iter()
            .filter(|s| s.offering_id == offering_id)
            .cloned()
            .collect();
        sessions.sort_by(|a, b| (a.date, a.created_at, a.id).cmp(&(b.date, b.created_at, b.id)));
        Ok(sessions)
    }

    async fn list_attendance(&self, enrollment_id: Id) -> Result<Vec<attendances::Model>, Error> {
        Ok(lock(&self.state)
            .attendances
            .iter()
            .filter(|a| a.enrollment_id == enrollment_id)
            .cloned()
            .collect())
    }

    async fn begin(&self) -> Result<Box<dyn TransferUnitOfWork>, Error> {
        self.transactions_begun.fetch_add(1, Ordering::SeqCst);

        if let Some(enrollment_id) = self.competing_transfer_of {
            let mut state = lock(&self.state);
            if let Some(enrollment) = state.enrollments.iter_mut().find(|e| e.id == enrollment_id)
            {
                enrollment.status = EnrollmentStatus::Transferred;
                enrollment.transferred_to_id = Some(Id::new_v4());
            }
        }

        let staged = lock(&self.state).clone();
        Ok(Box::new(InMemoryUnitOfWork {
            shared: Arc::clone(&self.state),
            staged,
            audit_appends: 0,
            fail_on_audit_append: self.fail_on_audit_append,
        }))
    }
}

struct InMemoryUnitOfWork {
    shared: Arc<Mutex<State>>,
    staged: State,
    audit_appends: usize,
    fail_on_audit_append: Option<usize>,
}

#[async_trait]
impl TransferUnitOfWork for InMemoryUnitOfWork {
    async fn create_enrollment(
        &mut self,
        model: enrollments::Model,
        created_by: Id,
    ) -> Result<enrollments::Model, Error> {
        let duplicate_active = self.staged.enrollments.iter().any(|e| {
            e.is_active()
                && model.status == EnrollmentStatus::Active
                && e.offering_id == model.offering_id
                && e.student_id == model.student_id
        });
        if duplicate_active {
            return Err(constraint_violation("enrollments (offering_id, student_id)"));
        }

        let now = chrono::Utc::now();
        let created = enrollments::Model {
            id: Id::new_v4(),
            transferred_to_id: None,
            transferred_at: None,
            transfer_notes: None,
            created_by: Some(created_by),
            created_at: now.into(),
            updated_at: now.into(),
            ..model
        };
        self.staged.enrollments.push(created.clone());
        Ok(created)
    }

    async fn create_attendance(
        &mut self,
        model: attendances::Model,
    ) -> Result<attendances::Model, Error> {
        if self.staged.attendances.iter().any(|a| {
            a.enrollment_id == model.enrollment_id && a.class_session_id == model.class_session_id
        }) {
            return Err(constraint_violation(
                "attendances (enrollment_id, class_session_id)",
            ));
        }

        let now = chrono::Utc::now();
        let created = attendances::Model {
            id: Id::new_v4(),
            created_at: now.into(),
            updated_at: now.into(),
            ..model
        };
        self.staged.attendances.push(created.clone());
        Ok(created)
    }

    async fn create_skip(
        &mut self,
        enrollment_id: Id,
        class_session_id: Id,
        reason: Option<String>,
        created_by: Id,
    ) -> Result<enrollment_skips::Model, Error> {
        if self
            .staged
            .skips
            .iter()
            .any(|s| s.enrollment_id == enrollment_id && s.class_session_id == class_session_id)
        {
            return Err(constraint_violation(
                "enrollment_skips (enrollment_id, class_session_id)",
            ));
        }

        let created = enrollment_skips::Model {
            id: Id::new_v4(),
            enrollment_id,
            class_session_id,
            reason,
            created_by: Some(created_by),
            created_at: chrono::Utc::now().into(),
        };
        self.staged.skips.push(created.clone());
        Ok(created)
    }

    async fn mark_transferred(
        &mut self,
        id: Id,
        transferred_to_id: Id,
        transfer_notes: Option<String>,
    ) -> Result<u64, Error> {
        let now = chrono::Utc::now();
        match self
            .staged
            .enrollments
            .iter_mut()
            .find(|e| e.id == id && e.is_active())
        {
            Some(enrollment) => {
                enrollment.status = EnrollmentStatus::Transferred;
                enrollment.transferred_to_id = Some(transferred_to_id);
                enrollment.transferred_at = Some(now.into());
                enrollment.transfer_notes = transfer_notes;
                enrollment.updated_at = now.into();
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn find_line_item(
        &mut self,
        enrollment_id: Id,
    ) -> Result<Option<invoice_line_items::Model>, Error> {
        Ok(self
            .staged
            .line_items
            .iter()
            .find(|l| l.enrollment_id == Some(enrollment_id))
            .cloned())
    }

    async fn relink_line_item(
        &mut self,
        line_item_id: Id,
        enrollment_id: Id,
    ) -> Result<invoice_line_items::Model, Error> {
        let line_item = self
            .staged
            .line_items
            .iter_mut()
            .find(|l| l.id == line_item_id)
            .ok_or_else(|| Error::not_found("Invoice line item"))?;
        line_item.enrollment_id = Some(enrollment_id);
        line_item.updated_at = chrono::Utc::now().into();
        Ok(line_item.clone())
    }

    async fn append_audit(&mut self, entry: AuditEntry) -> Result<(), Error> {
        self.audit_appends += 1;
        if self.fail_on_audit_append == Some(self.audit_appends) {
            return Err(Error::persistence("audit_logs insert failed"));
        }

        self.staged.audit_logs.push(audit_logs::Model {
            id: Id::new_v4(),
            staff_id: entry.staff_id,
            action: entry.action,
            entity_type: entry.entity_type,
            entity_id: entry.entity_id,
            changes: entry.changes,
            metadata: entry.metadata,
            created_at: chrono::Utc::now().into(),
        });
        Ok(())
    }

    async fn commit(self: Box<Self>) -> Result<(), Error> {
        let InMemoryUnitOfWork { shared, staged, .. } = *self;
        *lock(&shared) = staged;
        Ok(())
    }
}
