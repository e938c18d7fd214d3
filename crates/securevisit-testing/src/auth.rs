//! Operator credential helpers for HTTP tests.
//!
//! The access service authenticates operators with HTTP Basic credentials.
//! `MockOperator` renders the `Authorization` header a front desk or guard
//! terminal would send.

use axum::http::{HeaderName, HeaderValue, header};
use base64::{Engine as _, engine::general_purpose::STANDARD};

/// Username/password pair presented by a test request.
pub struct MockOperator {
    pub username: String,
    pub password: String,
}

impl MockOperator {
    pub fn new(username: &str, password: &str) -> Self {
        Self {
            username: username.to_owned(),
            password: password.to_owned(),
        }
    }

    /// `Authorization: Basic base64(username:password)`.
    pub fn header(&self) -> (HeaderName, HeaderValue) {
        let token = STANDARD.encode(format!("{}:{}", self.username, self.password));
        (
            header::AUTHORIZATION,
            HeaderValue::from_str(&format!("Basic {token}")).unwrap(),
        )
    }
}
