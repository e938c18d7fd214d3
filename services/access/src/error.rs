use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use securevisit_core::error::error_body;

/// Access service error variants.
///
/// A wrong or stale code is not an error: see `VerificationResult`.
#[derive(Debug, thiserror::Error)]
pub enum AccessServiceError {
    #[error("valid_from must be earlier than valid_until")]
    InvalidWindow,
    #[error("{0} must not be empty")]
    EmptyField(&'static str),
    #[error("access code already exists")]
    DuplicateKey,
    #[error("could not find an unused access code after {attempts} attempts")]
    GenerationExhausted { attempts: u32 },
    #[error("access code store unavailable")]
    StoreUnavailable(#[from] anyhow::Error),
}

impl AccessServiceError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidWindow => "INVALID_WINDOW",
            Self::EmptyField(_) => "EMPTY_FIELD",
            Self::DuplicateKey => "DUPLICATE_KEY",
            Self::GenerationExhausted { .. } => "GENERATION_EXHAUSTED",
            Self::StoreUnavailable(_) => "STORE_UNAVAILABLE",
        }
    }
}

impl IntoResponse for AccessServiceError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::InvalidWindow | Self::EmptyField(_) => StatusCode::BAD_REQUEST,
            Self::DuplicateKey => StatusCode::CONFLICT,
            Self::GenerationExhausted { .. } | Self::StoreUnavailable(_) => {
                StatusCode::SERVICE_UNAVAILABLE
            }
        };
        // Only the store failure carries a cause chain worth logging; the rest are
        // either client mistakes or already logged by the use case.
        if let Self::StoreUnavailable(ref e) = self {
            tracing::error!(error = ?e, kind = self.kind(), "store unavailable");
        }
        (status, error_body(self.kind(), self.to_string())).into_response()
    }
}
