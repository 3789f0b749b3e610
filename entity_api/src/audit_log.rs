use super::error::Error;
use entity::audit_logs::{ActiveModel, Column, Entity, Model};
use entity::Id;
use log::*;
use sea_orm::{entity::prelude::*, ConnectionTrait, QueryOrder, Set};

/// Appends one audit record. Audit records are never updated or deleted.
pub async fn append(
    db: &impl ConnectionTrait,
    staff_id: Id,
    action: &str,
    entity_type: &str,
    entity_id: Id,
    changes: Json,
    metadata: Json,
) -> Result<Model, Error> {
    debug!("Appending audit log: {action} on {entity_type} {entity_id} by {staff_id}");

    let active_model = ActiveModel {
        staff_id: Set(staff_id),
        action: Set(action.to_owned()),
        entity_type: Set(entity_type.to_owned()),
        entity_id: Set(entity_id),
        changes: Set(changes),
        metadata: Set(metadata),
        created_at: Set(chrono::Utc::now().into()),
        ..Default::default()
    };

    Ok(active_model.insert(db).await?)
}

/// Audit history of a single entity, newest first.
pub async fn find_by_entity(
    db: &impl ConnectionTrait,
    entity_type: &str,
    entity_id: Id,
) -> Result<Vec<Model>, Error> {
    Ok(Entity::find()
        .filter(Column::EntityType.eq(entity_type))
        .filter(Column::EntityId.eq(entity_id))
        .order_by_desc(Column::CreatedAt)
        .all(db)
        .await?)
}
