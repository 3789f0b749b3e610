use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        db.execute_unprepared(
            r#"
            CREATE TABLE IF NOT EXISTS swim_school.staff_users (
                id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
                email VARCHAR(255) NOT NULL UNIQUE,
                display_name VARCHAR(255),
                created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
            )
            "#,
        )
        .await?;

        db.execute_unprepared(
            r#"
            CREATE TABLE IF NOT EXISTS swim_school.students (
                id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
                first_name VARCHAR(255) NOT NULL,
                last_name VARCHAR(255) NOT NULL,
                date_of_birth DATE,
                created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
            )
            "#,
        )
        .await?;

        db.execute_unprepared(
            r#"
            CREATE TABLE IF NOT EXISTS swim_school.terms (
                id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
                name VARCHAR(255) NOT NULL,
                starts_on DATE NOT NULL,
                ends_on DATE NOT NULL,
                created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),

                CHECK (starts_on <= ends_on)
            )
            "#,
        )
        .await?;

        // location_id points at pools managed outside this schema
        db.execute_unprepared(
            r#"
            CREATE TABLE IF NOT EXISTS swim_school.offerings (
                id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
                term_id UUID NOT NULL REFERENCES swim_school.terms(id) ON DELETE RESTRICT,
                location_id UUID,
                title VARCHAR(255) NOT NULL,
                weekday SMALLINT NOT NULL CHECK (weekday BETWEEN 0 AND 6),
                start_time TIME NOT NULL,
                duration_minutes INTEGER NOT NULL CHECK (duration_minutes > 0),
                created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
            )
            "#,
        )
        .await?;

        db.execute_unprepared(
            r#"
            CREATE TABLE IF NOT EXISTS swim_school.class_sessions (
                id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
                offering_id UUID NOT NULL REFERENCES swim_school.offerings(id) ON DELETE CASCADE,
                date DATE NOT NULL,
                created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
            )
            "#,
        )
        .await?;

        db.execute_unprepared(
            "CREATE INDEX IF NOT EXISTS idx_class_sessions_offering_date
             ON swim_school.class_sessions(offering_id, date)",
        )
        .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        for table in [
            "class_sessions",
            "offerings",
            "terms",
            "students",
            "staff_users",
        ] {
            db.execute_unprepared(&format!("DROP TABLE IF EXISTS swim_school.{table}"))
                .await?;
        }

        Ok(())
    }
}
