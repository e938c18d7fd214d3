use sea_orm_migration::prelude::*;

const INDEX_NAME: &str = "idx_access_codes_generation_timestamp";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Serves both the retention sweep and the date-filtered audit listing.
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .table(AccessCodes::Table)
                    .col(AccessCodes::GenerationTimestamp)
                    .name(INDEX_NAME)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .table(AccessCodes::Table)
                    .name(INDEX_NAME)
                    .to_owned(),
            )
            .await
    }
}

#[derive(DeriveIden)]
enum AccessCodes {
    Table,
    GenerationTimestamp,
}
