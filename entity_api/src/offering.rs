use super::error::Error;
use entity::offerings::{Entity, Model};
use entity::Id;
use sea_orm::{entity::prelude::*, ConnectionTrait};

pub async fn find_by_id(db: &impl ConnectionTrait, id: Id) -> Result<Model, Error> {
    Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(Error::not_found)
}

/// Like `find_by_id` but reports absence as `None` instead of an error.
pub async fn find_optional(db: &impl ConnectionTrait, id: Id) -> Result<Option<Model>, Error> {
    Ok(Entity::find_by_id(id).one(db).await?)
}
