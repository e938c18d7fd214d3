//! Operator credentials and the extractors that gate the HTTP routes.
//!
//! Two kinds of operator exist: front-desk admins, who issue codes and read the
//! audit list, and security guards, who verify codes at the gate. The access-code
//! use cases never see any of this; handlers pass the admin's display name in
//! as `issued_by`.

use std::collections::HashMap;
use std::sync::Arc;

use axum::extract::{FromRef, FromRequestParts};
use axum::http::request::Parts;
use axum_extra::headers::{Authorization, HeaderMapExt, authorization::Basic};

use securevisit_core::error::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperatorRole {
    Admin,
    Security,
}

/// An authenticated operator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Operator {
    pub username: String,
    pub display_name: String,
    pub role: OperatorRole,
}

#[derive(Debug, Clone)]
struct Credential {
    password: String,
    operator: Operator,
}

/// Credential sets for every operator, built once from config at startup.
#[derive(Debug, Clone, Default)]
pub struct OperatorDirectory {
    credentials: HashMap<String, Credential>,
}

impl OperatorDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an operator. A later entry with the same username replaces the earlier one.
    pub fn with_operator(
        mut self,
        username: &str,
        password: &str,
        display_name: &str,
        role: OperatorRole,
    ) -> Self {
        self.credentials.insert(
            username.to_owned(),
            Credential {
                password: password.to_owned(),
                operator: Operator {
                    username: username.to_owned(),
                    display_name: display_name.to_owned(),
                    role,
                },
            },
        );
        self
    }

    pub fn len(&self) -> usize {
        self.credentials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.credentials.is_empty()
    }

    /// Operator matching both username and password, if any.
    pub fn authenticate(&self, username: &str, password: &str) -> Option<&Operator> {
        self.credentials
            .get(username)
            .filter(|c| c.password == password)
            .map(|c| &c.operator)
    }

    fn authorize(&self, parts: &Parts, role: OperatorRole) -> Result<Operator, AppError> {
        let basic = parts
            .headers
            .typed_get::<Authorization<Basic>>()
            .ok_or(AppError::Unauthorized)?;
        let operator = self
            .authenticate(basic.username(), basic.password())
            .ok_or_else(|| {
                tracing::warn!(username = basic.username(), "operator login rejected");
                AppError::Unauthorized
            })?;
        if operator.role != role {
            return Err(AppError::Forbidden);
        }
        Ok(operator.clone())
    }
}

/// Front-desk operator allowed to issue and list codes.
#[derive(Debug, Clone)]
pub struct AdminOperator(pub Operator);

/// Gate operator allowed to verify codes.
#[derive(Debug, Clone)]
pub struct SecurityOperator(pub Operator);

impl<S> FromRequestParts<S> for AdminOperator
where
    Arc<OperatorDirectory>: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AppError;

    // Resolve synchronously and hand back a 'static future; see axum-core 0.5's
    // `fn -> impl Future + Send` signature.
    fn from_request_parts(
        parts: &mut Parts,
        state: &S,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let directory = Arc::<OperatorDirectory>::from_ref(state);
        let result = directory.authorize(parts, OperatorRole::Admin).map(Self);
        async move { result }
    }
}

impl<S> FromRequestParts<S> for SecurityOperator
where
    Arc<OperatorDirectory>: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AppError;

    fn from_request_parts(
        parts: &mut Parts,
        state: &S,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let directory = Arc::<OperatorDirectory>::from_ref(state);
        let result = directory.authorize(parts, OperatorRole::Security).map(Self);
        async move { result }
    }
}
