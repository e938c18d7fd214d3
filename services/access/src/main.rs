use std::sync::Arc;

use sea_orm::Database;
use tracing::{info, warn};

use securevisit_access::config::AccessConfig;
use securevisit_access::router::build_router;
use securevisit_access::state::AppState;
use securevisit_access::usecase::retention::SweepExpiredCodesUseCase;
use securevisit_access_migration::{Migrator, MigratorTrait};
use securevisit_core::clock::{Clock, SystemClock};
use securevisit_core::config::Config;
use securevisit_core::tracing::init_tracing;

#[tokio::main]
async fn main() {
    init_tracing();

    let config = AccessConfig::from_env();
    let operators = config.operators();
    info!(operators = operators.len(), "operator directory loaded");

    let db = Database::connect(&config.database_url)
        .await
        .expect("failed to connect to database");

    Migrator::up(&db, None)
        .await
        .expect("failed to run migrations");

    let state = AppState {
        db,
        operators: Arc::new(operators),
        default_location: config.access_default_location,
    };

    // Retention runs once per start; a failure must not keep the gate closed.
    let sweep = SweepExpiredCodesUseCase {
        access_codes: state.access_code_repo(),
    };
    if let Err(e) = sweep.execute(SystemClock.now()).await {
        warn!(error = ?e, "retention sweep failed");
    }

    let router = build_router(state);
    let addr = format!("0.0.0.0:{}", config.access_port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind");

    info!("access service listening on {addr}");
    axum::serve(listener, router).await.expect("server error");
}
