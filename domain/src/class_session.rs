use crate::class_sessions::Model;
use crate::error::Error;
use crate::Id;
use sea_orm::ConnectionTrait;

/// Sessions of an existing offering in ordinal order.
pub async fn find_by_offering(
    db: &impl ConnectionTrait,
    offering_id: Id,
) -> Result<Vec<Model>, Error> {
    entity_api::offering::find_by_id(db, offering_id).await?;

    Ok(entity_api::class_session::find_by_offering(db, offering_id).await?)
}
