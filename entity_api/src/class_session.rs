use super::error::Error;
use entity::class_sessions::{ActiveModel, Column, Entity, Model};
use entity::Id;
use log::*;
use sea_orm::{entity::prelude::*, ConnectionTrait, QueryOrder, Set};

pub async fn create(db: &impl ConnectionTrait, offering_id: Id, date: Date) -> Result<Model, Error> {
    debug!("New Class Session to be inserted for offering {offering_id} on {date}");

    let now = chrono::Utc::now();

    let active_model = ActiveModel {
        offering_id: Set(offering_id),
        date: Set(date),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
        ..Default::default()
    };

    Ok(active_model.insert(db).await?)
}

pub async fn find_by_id(db: &impl ConnectionTrait, id: Id) -> Result<Model, Error> {
    Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(Error::not_found)
}

/// Returns every session of an offering ordered by date ascending. The position of
/// a session in this list is its ordinal within the offering, so ties on date are
/// broken deterministically by creation time and then id.
pub async fn find_by_offering(
    db: &impl ConnectionTrait,
    offering_id: Id,
) -> Result<Vec<Model>, Error> {
    Ok(Entity::find()
        .filter(Column::OfferingId.eq(offering_id))
        .order_by_asc(Column::Date)
        .order_by_asc(Column::CreatedAt)
        .order_by_asc(Column::Id)
        .all(db)
        .await?)
}
