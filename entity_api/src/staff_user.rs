use super::error::Error;
use entity::staff_users::{Entity, Model};
use entity::Id;
use sea_orm::{entity::prelude::*, ConnectionTrait};

pub async fn find_by_id(db: &impl ConnectionTrait, id: Id) -> Result<Model, Error> {
    Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(Error::not_found)
}
