use axum::{
    Router,
    routing::{get, post},
};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use securevisit_core::health::healthz;
use securevisit_core::middleware::{propagate_request_id_layer, request_id_layer};

use crate::handlers::{
    access_code::{issue_access_code, list_access_codes, verify_access_code},
    health::readyz,
};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // Access codes
        .route("/access-codes", post(issue_access_code))
        .route("/access-codes", get(list_access_codes))
        .route("/access-codes/verify", post(verify_access_code))
        .layer(
            ServiceBuilder::new()
                .layer(request_id_layer())
                .layer(TraceLayer::new_for_http())
                .layer(propagate_request_id_layer()),
        )
        .with_state(state)
}
