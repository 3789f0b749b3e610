use domain::transfer::{TransferOutcome, TransferRequest};
use domain::Id;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Deserialize, ToSchema)]
pub(crate) struct TransferParams {
    #[schema(value_type = Uuid)]
    pub(crate) target_offering_id: Id,
    /// Sessions of the target offering the student will not attend
    #[serde(default)]
    #[schema(value_type = Vec<Uuid>)]
    pub(crate) skipped_session_ids: Vec<Id>,
    pub(crate) transfer_notes: Option<String>,
}

impl TransferParams {
    pub(crate) fn into_request(self, enrollment_id: Id, acting_staff_id: Id) -> TransferRequest {
        TransferRequest {
            enrollment_id,
            target_offering_id: self.target_offering_id,
            skipped_session_ids: self.skipped_session_ids,
            transfer_notes: self.transfer_notes,
            acting_staff_id,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct TransferResponse {
    pub(crate) success: bool,
    #[schema(value_type = Uuid)]
    pub(crate) old_enrollment_id: Id,
    #[schema(value_type = Uuid)]
    pub(crate) new_enrollment_id: Id,
}

impl From<TransferOutcome> for TransferResponse {
    fn from(outcome: TransferOutcome) -> Self {
        Self {
            success: true,
            old_enrollment_id: outcome.old_enrollment_id,
            new_enrollment_id: outcome.new_enrollment_id,
        }
    }
}
