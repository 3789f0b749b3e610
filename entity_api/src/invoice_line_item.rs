use super::error::Error;
use entity::invoice_line_items::{ActiveModel, Column, Entity, Model};
use entity::Id;
use log::*;
use sea_orm::{
    entity::prelude::*,
    ActiveValue::{Set, Unchanged},
    ConnectionTrait,
};

/// The line item billing an enrollment, if it has been invoiced.
pub async fn find_by_enrollment(
    db: &impl ConnectionTrait,
    enrollment_id: Id,
) -> Result<Option<Model>, Error> {
    Ok(Entity::find()
        .filter(Column::EnrollmentId.eq(enrollment_id))
        .one(db)
        .await?)
}

/// Re-points a line item at a different enrollment.
pub async fn update_enrollment(
    db: &impl ConnectionTrait,
    id: Id,
    enrollment_id: Id,
) -> Result<Model, Error> {
    debug!("Re-pointing Invoice Line Item {id} to enrollment {enrollment_id}");

    let active_model = ActiveModel {
        id: Unchanged(id),
        enrollment_id: Set(Some(enrollment_id)),
        updated_at: Set(chrono::Utc::now().into()),
        ..Default::default()
    };

    Ok(active_model.update(db).await?)
}

#[cfg(test)]
// We need to gate seaORM's mock feature behind conditional compilation because
// the feature removes the Clone trait implementation from seaORM's DatabaseConnection.
// see https://github.com/SeaQL/sea-orm/issues/830
#[cfg(feature = "mock")]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase, Transaction};

    #[tokio::test]
    async fn find_by_enrollment_filters_on_enrollment_id() -> Result<(), Error> {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![Vec::<Model>::new()])
            .into_connection();

        let enrollment_id = Id::new_v4();
        let found = find_by_enrollment(&db, enrollment_id).await?;

        assert!(found.is_none());
        assert_eq!(
            db.into_transaction_log(),
            [Transaction::from_sql_and_values(
                DatabaseBackend::Postgres,
                r#"SELECT "invoice_line_items"."id", "invoice_line_items"."invoice_id", "invoice_line_items"."enrollment_id", "invoice_line_items"."description", "invoice_line_items"."amount_cents", "invoice_line_items"."created_at", "invoice_line_items"."updated_at" FROM "swim_school"."invoice_line_items" WHERE "invoice_line_items"."enrollment_id" = $1 LIMIT $2"#,
                [enrollment_id.into(), 1u64.into()]
            )]
        );

        Ok(())
    }

    #[tokio::test]
    async fn update_enrollment_returns_the_re_pointed_item() -> Result<(), Error> {
        let now = chrono::Utc::now();
        let new_enrollment_id = Id::new_v4();
        let item = Model {
            id: Id::new_v4(),
            invoice_id: Id::new_v4(),
            enrollment_id: Some(new_enrollment_id),
            description: "Term 1 group lessons".to_string(),
            amount_cents: 24_000,
            created_at: now.into(),
            updated_at: now.into(),
        };

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![item.clone()]])
            .into_connection();

        let updated = update_enrollment(&db, item.id, new_enrollment_id).await?;

        assert_eq!(updated.enrollment_id, Some(new_enrollment_id));

        Ok(())
    }
}
