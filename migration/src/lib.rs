pub use sea_orm_migration::prelude::*;

mod m20240210_153056_create_schema_and_base_db_setup;
mod m20240211_174355_create_scheduling_tables;
mod m20240212_090000_create_enrollment_tables;
mod m20240213_120000_create_billing_and_audit_tables;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240210_153056_create_schema_and_base_db_setup::Migration),
            Box::new(m20240211_174355_create_scheduling_tables::Migration),
            Box::new(m20240212_090000_create_enrollment_tables::Migration),
            Box::new(m20240213_120000_create_billing_and_audit_tables::Migration),
        ]
    }
}
