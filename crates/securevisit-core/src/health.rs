use std::future::Future;

use axum::http::StatusCode;

/// Handler for `GET /healthz`: the process is up.
pub async fn healthz() -> StatusCode {
    StatusCode::OK
}

/// Map a dependency probe to a readiness status.
///
/// Services wrap their own `/readyz` handler around this, passing e.g. a
/// database ping. A failed probe is logged and reported as 503.
pub async fn readiness<F, E>(probe: F) -> StatusCode
where
    F: Future<Output = Result<(), E>>,
    E: std::fmt::Display,
{
    match probe.await {
        Ok(()) => StatusCode::OK,
        Err(e) => {
            tracing::warn!(error = %e, "readiness probe failed");
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}
