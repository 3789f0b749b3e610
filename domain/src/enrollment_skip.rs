use crate::enrollment_skips::Model;
use crate::error::Error;
use crate::Id;
use sea_orm::ConnectionTrait;

pub async fn find_by_enrollment(
    db: &impl ConnectionTrait,
    enrollment_id: Id,
) -> Result<Vec<Model>, Error> {
    entity_api::enrollment::find_by_id(db, enrollment_id).await?;

    Ok(entity_api::enrollment_skip::find_by_enrollment(db, enrollment_id).await?)
}
