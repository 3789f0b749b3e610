use crate::audit_logs::Model;
use crate::error::Error;
use crate::Id;
use sea_orm::ConnectionTrait;
use serde_json::{json, Value};

/// The entity type recorded for every enrollment related audit entry.
pub const ENROLLMENT: &str = "enrollment";

/// One audit record waiting to be appended.
#[derive(Clone, Debug, PartialEq)]
pub struct AuditEntry {
    pub staff_id: Id,
    pub action: String,
    pub entity_type: String,
    pub entity_id: Id,
    pub changes: Value,
    pub metadata: Value,
}

impl AuditEntry {
    pub fn new(staff_id: Id, action: &str, entity_type: &str, entity_id: Id) -> Self {
        Self {
            staff_id,
            action: action.to_owned(),
            entity_type: entity_type.to_owned(),
            entity_id,
            changes: json!({}),
            metadata: json!({}),
        }
    }

    pub fn changes(mut self, changes: Value) -> Self {
        self.changes = changes;
        self
    }

    pub fn metadata(mut self, metadata: Value) -> Self {
        self.metadata = metadata;
        self
    }
}

/// Builds a `{"from": .., "to": ..}` pair for the `changes` column.
pub fn change(from: impl Into<Value>, to: impl Into<Value>) -> Value {
    json!({ "from": from.into(), "to": to.into() })
}

pub async fn append(db: &impl ConnectionTrait, entry: AuditEntry) -> Result<Model, Error> {
    Ok(entity_api::audit_log::append(
        db,
        entry.staff_id,
        &entry.action,
        &entry.entity_type,
        entry.entity_id,
        entry.changes,
        entry.metadata,
    )
    .await?)
}

pub async fn find_by_entity(
    db: &impl ConnectionTrait,
    entity_type: &str,
    entity_id: Id,
) -> Result<Vec<Model>, Error> {
    Ok(entity_api::audit_log::find_by_entity(db, entity_type, entity_id).await?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn change_builds_a_from_to_pair() {
        assert_eq!(
            change(Value::Null, "active"),
            json!({"from": null, "to": "active"})
        );
    }

    #[test]
    fn entry_defaults_to_empty_objects() {
        let entry = AuditEntry::new(Id::new_v4(), "enrollment.create", ENROLLMENT, Id::new_v4());

        assert_eq!(entry.changes, json!({}));
        assert_eq!(entry.metadata, json!({}));
    }
}
