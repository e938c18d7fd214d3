use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};

/// Realm advertised in `WWW-Authenticate` challenges.
pub const AUTH_REALM: &str = "Basic realm=\"securevisit\"";

/// Errors raised by the HTTP edge before a request reaches a service use case.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// No credentials, or credentials that match no operator.
    #[error("unauthorized")]
    Unauthorized,
    /// Known operator without the role the route requires.
    #[error("forbidden")]
    Forbidden,
}

impl AppError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Unauthorized => "UNAUTHORIZED",
            Self::Forbidden => "FORBIDDEN",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::Forbidden => StatusCode::FORBIDDEN,
        }
    }
}

/// Build the `{"kind", "message"}` envelope every service error uses.
pub fn error_body(kind: &str, message: String) -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "kind": kind,
        "message": message,
    }))
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let mut response = (status, error_body(self.kind(), self.to_string())).into_response();
        if status == StatusCode::UNAUTHORIZED {
            response.headers_mut().insert(
                header::WWW_AUTHENTICATE,
                HeaderValue::from_static(AUTH_REALM),
            );
        }
        response
    }
}
