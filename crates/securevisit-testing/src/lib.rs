//! Test utilities for SecureVisit services.
//!
//! Provides operator credential headers and a hand-driven clock.
//! Import from tests only, never from production code.

pub mod auth;
pub mod clock;
