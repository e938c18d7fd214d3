use std::sync::Arc;

use axum::extract::FromRef;
use sea_orm::DatabaseConnection;

use securevisit_core::clock::SystemClock;

use crate::infra::db::DbAccessCodeRepository;
use crate::operator::OperatorDirectory;

/// Shared application state passed to every handler via axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub operators: Arc<OperatorDirectory>,
    /// Fallback for issue requests that omit `location`.
    pub default_location: Option<String>,
}

impl AppState {
    pub fn access_code_repo(&self) -> DbAccessCodeRepository {
        DbAccessCodeRepository {
            db: self.db.clone(),
        }
    }

    pub fn clock(&self) -> SystemClock {
        SystemClock
    }
}

impl FromRef<AppState> for Arc<OperatorDirectory> {
    fn from_ref(state: &AppState) -> Self {
        Arc::clone(&state.operators)
    }
}
