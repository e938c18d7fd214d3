use sea_orm_migration::prelude::*;

use securevisit_access_migration::Migrator;

#[tokio::main]
async fn main() {
    cli::run_cli(Migrator).await;
}
