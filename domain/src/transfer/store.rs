//! Persistence seams of the transfer workflow.
//!
//! `TransferStore` covers the reads made while checking preconditions.
//! `TransferUnitOfWork` covers the writes, which all happen between `begin` and
//! `commit`. A unit of work that is dropped without `commit` discards every write
//! made through it.

use crate::audit_log::{self, AuditEntry};
use crate::error::Error;
use crate::{
    attendances, class_sessions, enrollment_skips, enrollments, invoice_line_items, offerings,
    students, Id,
};
use async_trait::async_trait;
use entity_api::{
    attendance, class_session, enrollment, enrollment_skip, invoice_line_item, offering, student,
};
use sea_orm::{DatabaseConnection, DatabaseTransaction, TransactionTrait};

#[async_trait]
pub trait TransferStore: Send + Sync {
    async fn find_enrollment(&self, id: Id) -> Result<Option<enrollments::Model>, Error>;

    async fn find_offering(&self, id: Id) -> Result<Option<offerings::Model>, Error>;

    async fn find_student(&self, id: Id) -> Result<Option<students::Model>, Error>;

    /// Any enrollment, whatever its status, binding the student to the offering.
    async fn find_enrollment_by_offering_and_student(
        &self,
        offering_id: Id,
        student_id: Id,
    ) -> Result<Option<enrollments::Model>, Error>;

    /// Sessions of an offering in ordinal order.
    async fn list_sessions(&self, offering_id: Id) -> Result<Vec<class_sessions::Model>, Error>;

    async fn list_attendance(&self, enrollment_id: Id) -> Result<Vec<attendances::Model>, Error>;

    async fn begin(&self) -> Result<Box<dyn TransferUnitOfWork>, Error>;
}

#[async_trait]
pub trait TransferUnitOfWork: Send {
    async fn create_enrollment(
        &mut self,
        enrollment: enrollments::Model,
        created_by: Id,
    ) -> Result<enrollments::Model, Error>;

    async fn create_attendance(
        &mut self,
        attendance: attendances::Model,
    ) -> Result<attendances::Model, Error>;

    async fn create_skip(
        &mut self,
        enrollment_id: Id,
        class_session_id: Id,
        reason: Option<String>,
        created_by: Id,
    ) -> Result<enrollment_skips::Model, Error>;

    /// Flips the enrollment to `transferred` only if it is still `active`.
    /// Returns the number of enrollments updated.
    async fn mark_transferred(
        &mut self,
        id: Id,
        transferred_to_id: Id,
        transfer_notes: Option<String>,
    ) -> Result<u64, Error>;

    async fn find_line_item(
        &mut self,
        enrollment_id: Id,
    ) -> Result<Option<invoice_line_items::Model>, Error>;

    async fn relink_line_item(
        &mut self,
        line_item_id: Id,
        enrollment_id: Id,
    ) -> Result<invoice_line_items::Model, Error>;

    async fn append_audit(&mut self, entry: AuditEntry) -> Result<(), Error>;

    async fn commit(self: Box<Self>) -> Result<(), Error>;
}

/// `TransferStore` backed by the application's database connection.
pub struct SeaOrmTransferStore<'db> {
    db: &'db DatabaseConnection,
}

impl<'db> SeaOrmTransferStore<'db> {
    pub fn new(db: &'db DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl<'db> TransferStore for SeaOrmTransferStore<'db> {
    async fn find_enrollment(&self, id: Id) -> Result<Option<enrollments::Model>, Error> {
        Ok(enrollment::find_optional(self.db, id).await?)
    }

    async fn find_offering(&self, id: Id) -> Result<Option<offerings::Model>, Error> {
        Ok(offering::find_optional(self.db, id).await?)
    }

    async fn find_student(&self, id: Id) -> Result<Option<students::Model>, Error> {
        Ok(student::find_optional(self.db, id).await?)
    }

    async fn find_enrollment_by_offering_and_student(
        &self,
        offering_id: Id,
        student_id: Id,
    ) -> Result<Option<enrollments::Model>, Error> {
        Ok(enrollment::find_by_offering_and_student(self.db, offering_id, student_id).await?)
    }

    async fn list_sessions(&self, offering_id: Id) -> Result<Vec<class_sessions::Model>, Error> {
        Ok(class_session::find_by_offering(self.db, offering_id).await?)
    }

    async fn list_attendance(&self, enrollment_id: Id) -> Result<Vec<attendances::Model>, Error> {
        Ok(attendance::find_by_enrollment(self.db, enrollment_id).await?)
    }

    async fn begin(&self) -> Result<Box<dyn TransferUnitOfWork>, Error> {
        let txn = self.db.begin().await?;

        Ok(Box::new(SeaOrmUnitOfWork { txn }))
    }
}

/// Unit of work wrapping one database transaction. Dropping it without calling
/// `commit` rolls the transaction back.
pub struct SeaOrmUnitOfWork {
    txn: DatabaseTransaction,
}

#[async_trait]
impl TransferUnitOfWork for SeaOrmUnitOfWork {
    async fn create_enrollment(
        &mut self,
        model: enrollments::Model,
        created_by: Id,
    ) -> Result<enrollments::Model, Error> {
        Ok(enrollment::create(&self.txn, model, Some(created_by)).await?)
    }

    async fn create_attendance(
        &mut self,
        model: attendances::Model,
    ) -> Result<attendances::Model, Error> {
        Ok(attendance::create(&self.txn, model).await?)
    }

    async fn create_skip(
        &mut self,
        enrollment_id: Id,
        class_session_id: Id,
        reason: Option<String>,
        created_by: Id,
    ) -> Result<enrollment_skips::Model, Error> {
        Ok(enrollment_skip::create(
            &self.txn,
            enrollment_id,
            class_session_id,
            reason,
            Some(created_by),
        )
        .await?)
    }

    async fn mark_transferred(
        &mut self,
        id: Id,
        transferred_to_id: Id,
        transfer_notes: Option<String>,
    ) -> Result<u64, Error> {
        Ok(enrollment::mark_transferred(&self.txn, id, transferred_to_id, transfer_notes).await?)
    }

    async fn find_line_item(
        &mut self,
        enrollment_id: Id,
    ) -> Result<Option<invoice_line_items::Model>, Error> {
        Ok(invoice_line_item::find_by_enrollment(&self.txn, enrollment_id).await?)
    }

    async fn relink_line_item(
        &mut self,
        line_item_id: Id,
        enrollment_id: Id,
    ) -> Result<invoice_line_items::Model, Error> {
        Ok(invoice_line_item::update_enrollment(&self.txn, line_item_id, enrollment_id).await?)
    }

    async fn append_audit(&mut self, entry: AuditEntry) -> Result<(), Error> {
        audit_log::append(&self.txn, entry).await?;
        Ok(())
    }

    async fn commit(self: Box<Self>) -> Result<(), Error> {
        Ok(self.txn.commit().await?)
    }
}
