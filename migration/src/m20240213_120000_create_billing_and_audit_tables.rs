use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        // Invoice headers belong to the billing service, so invoice_id carries no FK.
        // Each enrollment is billed by at most one line item.
        db.execute_unprepared(
            r#"
            CREATE TABLE IF NOT EXISTS swim_school.invoice_line_items (
                id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
                invoice_id UUID NOT NULL,
                enrollment_id UUID UNIQUE REFERENCES swim_school.enrollments(id) ON DELETE SET NULL,
                description TEXT NOT NULL,
                amount_cents BIGINT NOT NULL,
                created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
            )
            "#,
        )
        .await?;

        db.execute_unprepared(
            r#"
            CREATE TABLE IF NOT EXISTS swim_school.audit_logs (
                id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
                staff_id UUID NOT NULL REFERENCES swim_school.staff_users(id) ON DELETE RESTRICT,
                action VARCHAR(100) NOT NULL,
                entity_type VARCHAR(100) NOT NULL,
                entity_id UUID NOT NULL,
                changes JSONB NOT NULL DEFAULT '{}'::jsonb,
                metadata JSONB NOT NULL DEFAULT '{}'::jsonb,
                created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
            )
            "#,
        )
        .await?;

        db.execute_unprepared(
            "CREATE INDEX IF NOT EXISTS idx_audit_logs_entity
             ON swim_school.audit_logs(entity_type, entity_id, created_at DESC)",
        )
        .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        db.execute_unprepared("DROP TABLE IF EXISTS swim_school.audit_logs")
            .await?;
        db.execute_unprepared("DROP TABLE IF EXISTS swim_school.invoice_line_items")
            .await?;

        Ok(())
    }
}
