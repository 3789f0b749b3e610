use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create the platform's schema
        manager
            .get_connection()
            .execute_unprepared("CREATE SCHEMA IF NOT EXISTS swim_school;")
            .await?;

        manager
            .get_connection()
            .execute_unprepared("SET search_path TO swim_school, public;")
            .await?;

        // Create the base DB user that will execute all platform queries
        manager
            .get_connection()
            .execute_unprepared(
                r#"
                DO $$ BEGIN
                    GRANT ALL PRIVILEGES ON DATABASE swim_school TO swim_school;
                    GRANT ALL ON SCHEMA swim_school TO swim_school;

                    ALTER DEFAULT PRIVILEGES IN SCHEMA swim_school GRANT ALL ON TABLES TO swim_school;
                    ALTER DEFAULT PRIVILEGES IN SCHEMA swim_school GRANT ALL ON SEQUENCES TO swim_school;
                    ALTER DEFAULT PRIVILEGES IN SCHEMA swim_school GRANT ALL ON FUNCTIONS TO swim_school;
                END $$;
            "#,
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Revoke default privileges first
        manager
            .get_connection()
            .execute_unprepared(
                r#"
                DO $$ BEGIN
                    ALTER DEFAULT PRIVILEGES IN SCHEMA swim_school REVOKE ALL ON FUNCTIONS FROM swim_school;
                    ALTER DEFAULT PRIVILEGES IN SCHEMA swim_school REVOKE ALL ON SEQUENCES FROM swim_school;
                    ALTER DEFAULT PRIVILEGES IN SCHEMA swim_school REVOKE ALL ON TABLES FROM swim_school;
                    REVOKE ALL ON SCHEMA swim_school FROM swim_school;
                    REVOKE ALL PRIVILEGES ON DATABASE swim_school FROM swim_school;
                END $$;
            "#,
            )
            .await?;

        // Drop the schema (CASCADE will remove all objects in it)
        manager
            .get_connection()
            .execute_unprepared("DROP SCHEMA IF EXISTS swim_school CASCADE;")
            .await?;

        Ok(())
    }
}
