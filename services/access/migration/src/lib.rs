pub use sea_orm_migration::prelude::*;

mod m20260301_000001_create_access_codes;
mod m20260301_000002_add_generation_timestamp_index;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260301_000001_create_access_codes::Migration),
            Box::new(m20260301_000002_add_generation_timestamp_index::Migration),
        ]
    }
}
