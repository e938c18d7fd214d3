use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // `if_not_exists` keeps tables created by earlier deployments intact.
        manager
            .create_table(
                Table::create()
                    .table(AccessCodes::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(AccessCodes::Code).text().not_null().primary_key())
                    .col(ColumnDef::new(AccessCodes::VisitorName).text().not_null())
                    .col(ColumnDef::new(AccessCodes::VisitHost).text().not_null())
                    .col(ColumnDef::new(AccessCodes::StartTime).time().not_null())
                    .col(ColumnDef::new(AccessCodes::EndTime).time().not_null())
                    .col(ColumnDef::new(AccessCodes::Location).text().not_null())
                    .col(ColumnDef::new(AccessCodes::GeneratedBy).text().not_null())
                    .col(
                        ColumnDef::new(AccessCodes::GenerationTimestamp)
                            .timestamp()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(AccessCodes::Used)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(AccessCodes::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum AccessCodes {
    Table,
    Code,
    VisitorName,
    VisitHost,
    StartTime,
    EndTime,
    Location,
    GeneratedBy,
    GenerationTimestamp,
    Used,
}
